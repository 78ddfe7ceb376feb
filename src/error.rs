use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SplitError>;

/// Failures that abort a split run. Nothing is rolled back.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("cannot read input {}: {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output {}: {source}", .path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SplitError {
    pub fn input(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SplitError::InputUnreadable {
            path: path.into(),
            source,
        }
    }

    pub fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SplitError::OutputUnwritable {
            path: path.into(),
            source,
        }
    }
}
