//! Errors that abort a run.
//!
//! Per-instruction failures are not fatal; they surface as
//! [`LineError`](crate::runner::LineError) records and the run continues.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A failure that stops the program before the report is complete.
#[derive(Debug, Error)]
pub enum RunError {
    /// The program source could not be read.
    #[error("unable to read program source {}: {source}", path.display())]
    ReadSource {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The final report could not be written.
    #[error("unable to write report {}: {source}", path.display())]
    WriteReport {
        /// Path that was being written.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The console display or diagnostics stream failed.
    #[error("console write failed: {0}")]
    Console(#[from] io::Error),
}

impl RunError {
    /// Process exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ReadSource { .. } | Self::WriteReport { .. } | Self::Console(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path() {
        let error = RunError::ReadSource {
            path: PathBuf::from("missing.asm"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };

        assert_eq!(
            error.to_string(),
            "unable to read program source missing.asm: no such file"
        );
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn source_is_preserved() {
        use std::error::Error as _;

        let error = RunError::WriteReport {
            path: PathBuf::from("out/report.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        let source = error.source().expect("io error should be the source");
        assert_eq!(source.to_string(), "denied");
    }

    #[test]
    fn console_failures_convert_from_io() {
        let error: RunError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();

        assert!(matches!(error, RunError::Console(_)));
        assert_eq!(error.to_string(), "console write failed: pipe");
    }
}
