//! Comment-stripping scanner
//!
//! This module holds the byte-level state machine that separates `/* ... */`
//! comments from everything else. It knows about exactly four lexical
//! contexts: plain code, block comments, string literals and character
//! literals. It does not tokenize anything.
//!
//! Each input byte is consumed once and produces one transition plus zero,
//! one or two output bytes. A comment is replaced by a single space the
//! moment its `/*` is confirmed, and newlines inside a comment are passed
//! through so line numbers stay aligned with the input.

use crate::config::ScannerConfig;
use crate::error::{DecommentError, Position};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::iter::FusedIterator;

/// Bytes produced by a single transition. Never more than two.
pub type Emit = SmallVec<[u8; 2]>;

/// Lexical context of the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanState {
    /// Plain code
    #[default]
    Code,
    /// A `/` was seen in code and is being held back
    SlashSeen,
    /// Inside a `/* ... */` block
    InComment,
    /// Inside a comment, directly after one or more `*`
    StarSeenInComment,
    /// Inside a `"..."` literal
    InString,
    /// Directly after a `\` inside a string literal
    StringEscape,
    /// Inside a `'...'` literal
    InChar,
    /// Directly after a `\` inside a character literal
    CharEscape,
}

impl ScanState {
    /// Returns true if input ending in this state means an unterminated comment
    pub fn is_in_comment(self) -> bool {
        matches!(self, ScanState::InComment | ScanState::StarSeenInComment)
    }

    /// Returns true inside a string or character literal, escapes included
    pub fn is_in_literal(self) -> bool {
        matches!(
            self,
            ScanState::InString
                | ScanState::StringEscape
                | ScanState::InChar
                | ScanState::CharEscape
        )
    }
}

/// Location of a removed comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentInfo {
    /// Position of the opening `/`
    pub start: Position,
    /// Position just past the closing `/`
    pub end: Position,
}

/// Statistics for a completed scan
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ScanSummary {
    /// Input bytes consumed
    pub bytes_read: usize,
    /// Output bytes produced
    pub bytes_written: usize,
    /// Final value of the line counter
    pub lines: usize,
    /// Number of closed comments that were replaced
    pub comments_removed: usize,
    /// Removed comments, recorded only when `save_comments` is enabled
    pub comments: Vec<CommentInfo>,
}

/// Scanner context for a single pass over one input
#[derive(Debug, Clone)]
pub struct Scanner {
    /// Current lexical context
    state: ScanState,
    /// Position of the next input byte; `line` is the line counter
    position: Position,
    /// Position of the withheld `/` while in `SlashSeen`
    slash_position: Position,
    /// Position of the `/` that opened the most recent comment
    comment_start: Position,
    /// Scanner configuration
    config: ScannerConfig,
    bytes_read: usize,
    bytes_written: usize,
    comments_removed: usize,
    /// Collected comments when save_comments is enabled
    comments: Vec<CommentInfo>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Creates a new scanner with default configuration
    pub fn new() -> Self {
        Self::with_config(ScannerConfig::default())
    }

    /// Creates a new scanner with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self {
            state: ScanState::Code,
            position: Position::new(),
            slash_position: Position::new(),
            comment_start: Position::new(),
            config,
            bytes_read: 0,
            bytes_written: 0,
            comments_removed: 0,
            comments: Vec::new(),
        }
    }

    /// Returns the current lexical context
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Returns the current line number (1-based)
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// Returns the position of the next input byte
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the line the open comment started on, if inside one
    pub fn comment_start_line(&self) -> Option<usize> {
        self.state.is_in_comment().then_some(self.comment_start.line)
    }

    /// Returns the comments recorded so far
    pub fn comments(&self) -> &[CommentInfo] {
        &self.comments
    }

    /// Consumes one input byte and returns the bytes to emit for it
    pub fn step(&mut self, byte: u8) -> Emit {
        let here = self.position;
        self.position.advance(byte);
        self.bytes_read += 1;

        let mut out = Emit::new();
        self.state = match (self.state, byte) {
            (ScanState::Code, b'/') => {
                self.slash_position = here;
                ScanState::SlashSeen
            }
            (ScanState::Code, b'"') => {
                out.push(byte);
                ScanState::InString
            }
            (ScanState::Code, b'\'') => {
                out.push(byte);
                ScanState::InChar
            }
            (ScanState::Code, _) => {
                out.push(byte);
                ScanState::Code
            }

            // Flush the first slash; the second one is a fresh candidate
            (ScanState::SlashSeen, b'/') => {
                out.push(b'/');
                self.slash_position = here;
                ScanState::SlashSeen
            }
            (ScanState::SlashSeen, b'*') => {
                out.push(b' ');
                self.open_comment();
                ScanState::InComment
            }
            (ScanState::SlashSeen, b'"') => {
                out.extend_from_slice(&[b'/', byte]);
                ScanState::InString
            }
            (ScanState::SlashSeen, b'\'') => {
                out.extend_from_slice(&[b'/', byte]);
                ScanState::InChar
            }
            (ScanState::SlashSeen, _) => {
                out.extend_from_slice(&[b'/', byte]);
                ScanState::Code
            }

            (ScanState::InComment, b'*') => ScanState::StarSeenInComment,
            (ScanState::InComment, b'\n') => {
                out.push(byte);
                ScanState::InComment
            }
            (ScanState::InComment, _) => ScanState::InComment,

            (ScanState::StarSeenInComment, b'/') => {
                self.close_comment();
                ScanState::Code
            }
            (ScanState::StarSeenInComment, b'*') => ScanState::StarSeenInComment,
            (ScanState::StarSeenInComment, b'\n') => {
                out.push(byte);
                ScanState::InComment
            }
            (ScanState::StarSeenInComment, _) => ScanState::InComment,

            (ScanState::InString, b'\\') => {
                out.push(byte);
                ScanState::StringEscape
            }
            (ScanState::InString, b'"') => {
                out.push(byte);
                ScanState::Code
            }
            (ScanState::InString, _) => {
                out.push(byte);
                ScanState::InString
            }
            (ScanState::StringEscape, _) => {
                out.push(byte);
                ScanState::InString
            }

            (ScanState::InChar, b'\\') => {
                out.push(byte);
                ScanState::CharEscape
            }
            (ScanState::InChar, b'\'') => {
                out.push(byte);
                ScanState::Code
            }
            (ScanState::InChar, _) => {
                out.push(byte);
                ScanState::InChar
            }
            (ScanState::CharEscape, _) => {
                out.push(byte);
                ScanState::InChar
            }
        };

        self.bytes_written += out.len();
        out
    }

    /// Applies the end-of-input policy.
    ///
    /// Returns the trailing bytes still to be emitted (the withheld `/` when
    /// input ends right after one) and the outcome of the scan. Output that
    /// was already produced stays valid when the outcome is an error.
    pub fn finish(mut self) -> (Emit, Result<ScanSummary, DecommentError>) {
        let mut out = Emit::new();
        match self.state {
            ScanState::SlashSeen => {
                out.push(b'/');
                self.bytes_written += 1;
            }
            ScanState::InComment | ScanState::StarSeenInComment => {
                tracing::debug!(
                    line = self.comment_start.line,
                    bytes_read = self.bytes_read,
                    "input ended inside a comment"
                );
                return (
                    out,
                    Err(DecommentError::UnterminatedComment {
                        line: self.comment_start.line,
                        position: self.comment_start,
                    }),
                );
            }
            state if state.is_in_literal() => {
                // Open literals are accepted as they are
                tracing::debug!(
                    line = self.position.line,
                    ?state,
                    "input ended inside a literal"
                );
            }
            _ => {}
        }

        let summary = ScanSummary {
            bytes_read: self.bytes_read,
            bytes_written: self.bytes_written,
            lines: self.position.line,
            comments_removed: self.comments_removed,
            comments: self.comments,
        };
        tracing::debug!(
            bytes_read = summary.bytes_read,
            bytes_written = summary.bytes_written,
            lines = summary.lines,
            comments_removed = summary.comments_removed,
            "scan finished"
        );
        (out, Ok(summary))
    }

    fn open_comment(&mut self) {
        self.comment_start = self.slash_position;
        tracing::trace!(line = self.comment_start.line, "comment opened");
    }

    fn close_comment(&mut self) {
        self.comments_removed += 1;
        tracing::trace!(
            start_line = self.comment_start.line,
            end_line = self.position.line,
            "comment closed"
        );

        if !self.config.save_comments {
            return;
        }
        if self.comments.len() < self.config.max_saved_comments {
            self.comments.push(CommentInfo {
                start: self.comment_start,
                end: self.position,
            });
        } else if self.comments.len() == self.comments_removed - 1 {
            // Only the first comment past the cap gets here
            tracing::warn!(
                limit = self.config.max_saved_comments,
                "saved comment limit reached; further comments are not recorded"
            );
        }
    }
}

/// Lazy decommenting adapter over a byte iterator.
///
/// Yields every output byte as `Ok`. If the input ends inside a comment, one
/// final `Err` follows the last output byte; after that the iterator is
/// exhausted.
pub struct Decomment<I> {
    input: I,
    scanner: Option<Scanner>,
    pending: smallvec::IntoIter<[u8; 2]>,
    error: Option<DecommentError>,
    summary: Option<ScanSummary>,
}

impl<I: Iterator<Item = u8>> Decomment<I> {
    /// Wraps `input` with a default-configured scanner
    pub fn new(input: I) -> Self {
        Self::with_config(input, ScannerConfig::default())
    }

    /// Wraps `input` with a custom-configured scanner
    pub fn with_config(input: I, config: ScannerConfig) -> Self {
        Self {
            input,
            scanner: Some(Scanner::with_config(config)),
            pending: Emit::new().into_iter(),
            error: None,
            summary: None,
        }
    }

    /// Returns the summary once the input has been fully and successfully consumed
    pub fn summary(&self) -> Option<&ScanSummary> {
        self.summary.as_ref()
    }
}

impl<I: Iterator<Item = u8>> Iterator for Decomment<I> {
    type Item = Result<u8, DecommentError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(byte) = self.pending.next() {
                return Some(Ok(byte));
            }
            if let Some(error) = self.error.take() {
                return Some(Err(error));
            }

            let scanner = self.scanner.as_mut()?;
            if let Some(byte) = self.input.next() {
                self.pending = scanner.step(byte).into_iter();
                continue;
            }

            let scanner = self.scanner.take()?;
            let (trailing, result) = scanner.finish();
            self.pending = trailing.into_iter();
            match result {
                Ok(summary) => self.summary = Some(summary),
                Err(error) => self.error = Some(error),
            }
        }
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for Decomment<I> {}

/// Extension trait adding `.decomment()` to byte iterators
pub trait DecommentExt: Iterator<Item = u8> + Sized {
    /// Strips block comments from this byte stream lazily
    fn decomment(self) -> Decomment<Self> {
        Decomment::new(self)
    }
}

impl<I: Iterator<Item = u8>> DecommentExt for I {}

/// Scans an in-memory input with default configuration.
///
/// The output is returned even when the scan fails; it holds everything
/// produced before input ran out.
pub fn scan(input: &[u8]) -> (Vec<u8>, Result<ScanSummary, DecommentError>) {
    scan_with_config(input, &ScannerConfig::default())
}

/// Scans an in-memory input with custom configuration
pub fn scan_with_config(
    input: &[u8],
    config: &ScannerConfig,
) -> (Vec<u8>, Result<ScanSummary, DecommentError>) {
    let mut scanner = Scanner::with_config(config.clone());
    let mut output = Vec::with_capacity(input.len());
    for &byte in input {
        output.extend_from_slice(&scanner.step(byte));
    }
    let (trailing, result) = scanner.finish();
    output.extend_from_slice(&trailing);
    (output, result)
}

/// Strips block comments from a string
pub fn decomment_str(input: &str) -> Result<String, DecommentError> {
    let (output, result) = scan(input.as_bytes());
    result?;
    // Removed spans start and end on ASCII `/`, so the output stays valid UTF-8
    Ok(String::from_utf8_lossy(&output).into_owned())
}
