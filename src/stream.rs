//! Streaming driver
//!
//! Feeds a reader through a [`Scanner`] chunk by chunk and writes the result
//! as it is produced, so memory use does not grow with the input.

use crate::config::ScannerConfig;
use crate::error::DecommentError;
use crate::scanner::{ScanSummary, Scanner};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Decomments everything `reader` yields into `writer`.
///
/// The writer is flushed before returning, on success and on an unterminated
/// comment alike, so output produced before the failure is never lost.
pub fn decomment_reader<R: Read, W: Write>(
    mut reader: R,
    writer: W,
    config: &ScannerConfig,
) -> Result<ScanSummary, DecommentError> {
    let mut buffer = vec![0u8; config.effective_chunk_size()];
    let mut sink = DecommentWriter::with_config(writer, config.clone());

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(DecommentError::Io(e)),
        };
        sink.write_all(&buffer[..bytes_read])?;
    }

    let (_, result) = sink.finish()?;
    result
}

/// Opens the file at `path` and decomments it into `writer`
pub fn decomment_file<P: AsRef<Path>, W: Write>(
    path: P,
    writer: W,
    config: &ScannerConfig,
) -> Result<ScanSummary, DecommentError> {
    let file = File::open(path)?;
    decomment_reader(file, writer, config)
}

/// A writer adapter that strips block comments from everything written to it.
///
/// Output the inner writer has not accepted yet stays queued and is written
/// before any further input is scanned. A `write` that returns an error has
/// consumed none of its input, so retrying the same slice is safe.
pub struct DecommentWriter<W: Write> {
    /// Destination for decommented output
    inner: W,
    /// Scanner carrying state across writes
    scanner: Scanner,
    /// Scanned output not yet accepted by `inner`
    pending: Vec<u8>,
}

impl<W: Write> DecommentWriter<W> {
    /// Creates a new writer adapter with default configuration
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, ScannerConfig::default())
    }

    /// Creates a new writer adapter with custom configuration
    pub fn with_config(inner: W, config: ScannerConfig) -> Self {
        Self {
            inner,
            pending: Vec::with_capacity(config.effective_chunk_size()),
            scanner: Scanner::with_config(config),
        }
    }

    /// Applies the end-of-input policy, flushes, and hands back the inner writer.
    ///
    /// The outer `Result` reports I/O failures while writing the tail; the
    /// inner one is the outcome of the scan itself.
    pub fn finish(mut self) -> io::Result<(W, Result<ScanSummary, DecommentError>)> {
        self.drain_pending()?;
        let (trailing, result) = self.scanner.finish();
        self.inner.write_all(&trailing)?;
        self.inner.flush()?;
        Ok((self.inner, result))
    }

    /// Writes queued output to the inner writer, keeping whatever it refuses
    fn drain_pending(&mut self) -> io::Result<()> {
        while !self.pending.is_empty() {
            match self.inner.write(&self.pending) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write decommented output",
                    ));
                }
                Ok(n) => {
                    self.pending.drain(..n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl<W: Write> Write for DecommentWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Nothing from `buf` is scanned until earlier output is delivered
        self.drain_pending()?;

        for &byte in buf {
            self.pending.extend_from_slice(&self.scanner.step(byte));
        }

        // `buf` is consumed at this point; a failure here leaves the output
        // queued and surfaces on the next write, flush or finish
        if let Err(err) = self.drain_pending() {
            tracing::debug!(
                error = %err,
                queued = self.pending.len(),
                "inner writer refused output; keeping it queued"
            );
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drain_pending()?;
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that hands out one byte per call
    struct TrickleReader<'a> {
        data: &'a [u8],
        interrupted: bool,
    }

    impl Read for TrickleReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(io::ErrorKind::Interrupted, "try again"));
            }
            match self.data.split_first() {
                Some((&byte, rest)) if !buf.is_empty() => {
                    buf[0] = byte;
                    self.data = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    /// Writer that refuses the first `failures` calls
    struct FlakyWriter {
        written: Vec<u8>,
        failures: usize,
    }

    impl FlakyWriter {
        fn failing(failures: usize) -> Self {
            Self {
                written: Vec::new(),
                failures,
            }
        }
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(io::Error::other("disk full"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stream_matches_in_memory_scan() {
        let input = b"int a; /* one */\nchar *s = \"/* two */\"; /* three\n */ x/";
        let (expected, _) = crate::scanner::scan(input);

        let config = ScannerConfig::default();
        let mut output = Vec::new();
        let summary = decomment_reader(Cursor::new(&input[..]), &mut output, &config).unwrap();
        assert_eq!(output, expected);
        assert_eq!(summary.comments_removed, 2);
        assert_eq!(summary.lines, 3);
    }

    #[test]
    fn test_state_carries_across_reads() {
        let reader = TrickleReader {
            data: b"a/*\n*/b/",
            interrupted: false,
        };
        let mut output = Vec::new();
        decomment_reader(reader, &mut output, &ScannerConfig::default()).unwrap();
        assert_eq!(output, b"a \nb/");
    }

    #[test]
    fn test_partial_output_is_kept_on_unterminated_comment() {
        let mut output = Vec::new();
        let err = decomment_reader(
            Cursor::new(&b"keep\nthis /* but\nnot this"[..]),
            &mut output,
            &ScannerConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.comment_start_line(), Some(2));
        assert_eq!(output, b"keep\nthis  \n");
    }

    #[test]
    fn test_read_error_is_reported() {
        let config = ScannerConfig::default();
        let mut output = Vec::new();
        let err = decomment_reader(FailingReader, &mut output, &config).unwrap_err();
        assert!(matches!(err, DecommentError::Io(_)));
        assert!(!err.is_unterminated_comment());
    }

    #[test]
    fn test_writer_adapter() {
        let mut writer = DecommentWriter::new(Vec::new());
        writer.write_all(b"a /").unwrap();
        writer.write_all(b"* split */ b\n").unwrap();
        writer.write_all(b"c/").unwrap();

        let (inner, result) = writer.finish().unwrap();
        assert_eq!(inner, b"a   b\nc/");
        assert_eq!(result.unwrap().comments_removed, 1);
    }

    #[test]
    fn test_refused_output_is_queued() {
        let mut writer = DecommentWriter::new(FlakyWriter::failing(1));

        // The inner writer fails, but the input was scanned and its output kept
        assert_eq!(writer.write(b"/* c").unwrap(), 4);
        writer.write_all(b" */x").unwrap();

        let (inner, result) = writer.finish().unwrap();
        assert_eq!(inner.written, b" x");
        assert_eq!(result.unwrap().comments_removed, 1);
    }

    #[test]
    fn test_failed_write_consumes_no_input() {
        let mut writer = DecommentWriter::new(FlakyWriter::failing(2));
        assert_eq!(writer.write(b"/* c").unwrap(), 4);

        // Queued output cannot be delivered, so the new slice is rejected whole
        assert!(writer.write(b" */x").is_err());
        writer.write_all(b" */x").unwrap();

        let (inner, result) = writer.finish().unwrap();
        assert_eq!(inner.written, b" x");
        assert!(result.is_ok());
    }

    #[test]
    fn test_flush_delivers_queued_output() {
        let mut writer = DecommentWriter::new(FlakyWriter::failing(1));
        writer.write_all(b"ab/**/").unwrap();
        writer.flush().unwrap();

        let (inner, _) = writer.finish().unwrap();
        assert_eq!(inner.written, b"ab ");
    }

    #[test]
    fn test_missing_file() {
        let err = decomment_file(
            "/definitely/not/here.c",
            Vec::new(),
            &ScannerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DecommentError::Io(_)));
    }
}
