//! `decomment`: copies standard input to standard output with block comments removed.
//!
//! Exit status is 0 on success, 1 when input ends inside a comment and 2 on
//! I/O failure. Set `RUST_LOG` (e.g. `RUST_LOG=decomment=debug`) to get
//! scanner events on standard error.

use decomment::{DecommentError, ScannerConfig, decomment_reader};
use std::io::{self, BufWriter};
use std::process::ExitCode;

/// Exit status for an unterminated comment
const EXIT_UNTERMINATED: u8 = 1;
/// Exit status for I/O failures
const EXIT_IO: u8 = 2;

/// Installs the log subscriber, but only when `RUST_LOG` is set
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());

    match decomment_reader(stdin.lock(), writer, &ScannerConfig::default()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.diagnostic());
            match err {
                DecommentError::UnterminatedComment { .. } => ExitCode::from(EXIT_UNTERMINATED),
                DecommentError::Io(_) => ExitCode::from(EXIT_IO),
            }
        }
    }
}
