//! Error types and position tracking for comment stripping
//!
//! The scanner has exactly one way to fail on its input: a `/*` that is never
//! closed. Everything else it is handed is accepted. The streaming driver adds
//! I/O failures on top of that.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Represents a position in the input byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-based)
    pub line: usize,
    /// Byte column within the line (1-based)
    pub column: usize,
    /// Byte offset from start of input (0-based)
    pub offset: usize,
}

impl Position {
    /// Creates a new position at the start of input
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Advances the position past one input byte
    #[inline]
    pub fn advance(&mut self, byte: u8) {
        match byte {
            b'\n' => {
                self.line += 1;
                self.column = 1;
            }
            b'\r' => {
                self.column = 1;
            }
            _ => {
                self.column += 1;
            }
        }
        self.offset += 1;
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Main error type for decommenting operations
#[derive(Debug, Error)]
pub enum DecommentError {
    /// Input ended while still inside a `/* ... */` block
    #[error("line {line}: unterminated comment")]
    UnterminatedComment {
        /// Line on which the unterminated comment was opened
        line: usize,
        /// Position of the opening `/`
        position: Position,
    },

    /// I/O error from the underlying reader or writer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecommentError {
    /// Returns the single-line diagnostic meant for the error channel
    pub fn diagnostic(&self) -> String {
        format!("Error: {}", self)
    }

    /// Returns true if this error reports an unterminated comment
    pub fn is_unterminated_comment(&self) -> bool {
        matches!(self, DecommentError::UnterminatedComment { .. })
    }

    /// Returns the line an unterminated comment began on, if that is the failure
    pub fn comment_start_line(&self) -> Option<usize> {
        match self {
            DecommentError::UnterminatedComment { line, .. } => Some(*line),
            DecommentError::Io(_) => None,
        }
    }
}
