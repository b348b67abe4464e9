//! # decomment
//!
//! A streaming filter that removes C-style block comments (`/* ... */`) from
//! source text while leaving string literals, character literals and all
//! other code byte-for-byte intact.
//!
//! ## Overview
//!
//! The crate is built around a small finite-state [`Scanner`] that looks at
//! one byte at a time and tracks which of four lexical contexts it is in:
//! plain code, a block comment, a string literal or a character literal.
//! It does not tokenize, and it never needs to look ahead or back.
//!
//! - Each comment is replaced by a single space, so `a/**/b` stays two tokens.
//! - Newlines inside comments are kept, so line numbers in the output match
//!   the input.
//! - `//` is not treated as a line comment.
//! - Nested comments are not recognized.
//! - The only failure is a comment that is still open at end of input.
//!
//! ## Basic Usage
//!
//! ```rust
//! use decomment::decomment_str;
//!
//! let code = "int x = 1; /* set x */ int y = 2;";
//! assert_eq!(decomment_str(code)?, "int x = 1;   int y = 2;");
//! # Ok::<(), decomment::DecommentError>(())
//! ```
//!
//! ## Keeping Partial Output
//!
//! [`scan`] returns the output together with the outcome, so callers see
//! everything produced before an unterminated comment:
//!
//! ```rust
//! use decomment::{scan, DecommentError};
//!
//! let (output, result) = scan(b"x /* never ends");
//! assert_eq!(output, b"x  ");
//! match result {
//!     Err(DecommentError::UnterminatedComment { line, .. }) => assert_eq!(line, 1),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
//!
//! ## Streaming
//!
//! ```rust
//! use decomment::{decomment_reader, ScannerConfig};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! let summary = decomment_reader(
//!     Cursor::new("a /* 1 */ b\n"),
//!     &mut output,
//!     &ScannerConfig::default(),
//! )?;
//! assert_eq!(output, b"a   b\n");
//! assert_eq!(summary.comments_removed, 1);
//! # Ok::<(), decomment::DecommentError>(())
//! ```
//!
//! ## Lazy Iteration
//!
//! ```rust
//! use decomment::DecommentExt;
//!
//! let bytes: Result<Vec<u8>, _> = b"f(/**/)".iter().copied().decomment().collect();
//! assert_eq!(bytes?, b"f( )");
//! # Ok::<(), decomment::DecommentError>(())
//! ```

pub mod config;
pub mod error;
pub mod scanner;
pub mod stream;

#[cfg(test)]
mod error_tests;

// Re-export main types and functions
pub use config::ScannerConfig;
pub use error::{DecommentError, Position};
pub use scanner::{
    CommentInfo, Decomment, DecommentExt, Emit, ScanState, ScanSummary, Scanner, decomment_str,
    scan, scan_with_config,
};
pub use stream::{DecommentWriter, decomment_file, decomment_reader};
