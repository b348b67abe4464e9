//! Tests for error reporting and position tracking
//!
//! Covers diagnostic wording, line attribution of unterminated comments and
//! position bookkeeping across newlines.

#[cfg(test)]
mod tests {
    use crate::error::{DecommentError, Position};
    use crate::scanner::{ScanSummary, scan};
    use std::io;

    fn scan_error(input: &str) -> DecommentError {
        let (_, result): (_, Result<ScanSummary, _>) = scan(input.as_bytes());
        result.expect_err("Expected scan to fail")
    }

    #[test]
    fn test_position_tracking_accuracy() {
        let mut pos = Position::new();

        pos.advance(b'a');
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 2);
        assert_eq!(pos.offset, 1);

        pos.advance(b'\n');
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 2);

        pos.advance(b'\r');
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 3);

        // Multi-byte UTF-8 is counted in bytes
        for &byte in "\u{fc}".as_bytes() {
            pos.advance(byte);
        }
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 3);
        assert_eq!(pos.offset, 5);
    }

    #[test]
    fn test_position_display() {
        let pos = Position {
            line: 12,
            column: 7,
            offset: 300,
        };
        assert_eq!(pos.to_string(), "12:7");
        assert_eq!(Position::default(), Position::new());
    }

    #[test]
    fn test_unterminated_comment_message() {
        let err = scan_error("int a;\n/* oops");
        assert_eq!(err.to_string(), "line 2: unterminated comment");
        assert_eq!(err.diagnostic(), "Error: line 2: unterminated comment");
        assert!(err.is_unterminated_comment());
        assert_eq!(err.comment_start_line(), Some(2));
    }

    #[test]
    fn test_error_line_is_where_comment_began() {
        // Input ends on line 5, the comment opened on line 2
        let err = scan_error("a\n/*\n\n\n\n");
        assert_eq!(err.comment_start_line(), Some(2));
    }

    #[test]
    fn test_crlf_line_endings() {
        let err = scan_error("a\r\nb\r\n/* open");
        assert_eq!(err.comment_start_line(), Some(3));
    }

    #[test]
    fn test_io_error_message() {
        let err = DecommentError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(err.to_string(), "IO error: missing");
        assert_eq!(err.diagnostic(), "Error: IO error: missing");
        assert_eq!(err.comment_start_line(), None);
    }

    #[test]
    fn test_literals_never_fail() {
        for input in ["\"open string", "'c", "\"esc\\", "\"/*\"", "'/*'"] {
            let (output, result) = scan(input.as_bytes());
            assert!(result.is_ok(), "Expected success for {:?}", input);
            assert_eq!(output, input.as_bytes());
        }
    }
}
