//! Scanner configuration
//!
//! None of these options affect which bytes come out of the scanner; they only
//! control bookkeeping and buffering.

use serde::{Deserialize, Serialize};

/// Smallest read buffer the streaming driver will use
pub const MIN_CHUNK_SIZE: usize = 1024;

/// Configuration options for the scanner and streaming driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Record the position of every removed comment in the scan summary
    pub save_comments: bool,
    /// Maximum number of comments recorded when `save_comments` is enabled
    pub max_saved_comments: usize,
    /// Read buffer size used when streaming from a reader
    pub chunk_size: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            save_comments: false,
            max_saved_comments: 4096,
            chunk_size: 8 * 1024, // 8KB reads
        }
    }
}

impl ScannerConfig {
    /// Enables or disables recording of removed comments
    pub fn with_save_comments(mut self, save_comments: bool) -> Self {
        self.save_comments = save_comments;
        self
    }

    /// Sets the cap on recorded comments
    pub fn with_max_saved_comments(mut self, max_saved_comments: usize) -> Self {
        self.max_saved_comments = max_saved_comments;
        self
    }

    /// Sets the chunk size for reading from the input
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(MIN_CHUNK_SIZE);
        self
    }

    /// Chunk size actually used by the streaming driver
    pub(crate) fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(MIN_CHUNK_SIZE)
    }
}
