//! Error enum
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    Shape(ndarray::ShapeError),
    Npz(ndarray_npy::WriteNpzError),
    Serde(serde_json::Error),
    Regex(regex::Error),

    /// Dataset name that is not part of [crate::sources::Dataset].
    UnknownDataset(String),

    /// A line of an input file does not have the expected layout.
    MalformedLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The two sides of a lockstep-aligned corpus do not have the same number of lines.
    LengthMismatch {
        normal: PathBuf,
        simple: PathBuf,
        normal_lines: usize,
        simple_lines: usize,
    },

    /// Invalid or truncated word2vec binary file.
    W2vFormat(String),

    /// Token missing from a vocabulary that has no unknown-token sentinel.
    UnknownToken(String),

    /// A tokenizer worker reported a failure.
    Worker { worker: usize, source: Box<Error> },

    /// No worker report came in before the deadline.
    WorkerTimeout {
        waited: Duration,
        received: usize,
        expected: usize,
    },
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Csv(e) => write!(f, "csv error: {}", e),
            Error::Glob(e) => write!(f, "glob error: {}", e),
            Error::GlobPattern(e) => write!(f, "glob pattern error: {}", e),
            Error::Shape(e) => write!(f, "array shape error: {}", e),
            Error::Npz(e) => write!(f, "npz error: {}", e),
            Error::Serde(e) => write!(f, "serialization error: {}", e),
            Error::Regex(e) => write!(f, "regex error: {}", e),
            Error::UnknownDataset(name) => write!(
                f,
                "invalid dataset option {:?}, available datasets: {}",
                name,
                crate::sources::Dataset::names().join(", ")
            ),
            Error::MalformedLine { path, line, reason } => {
                write!(f, "{:?}:{}: {}", path, line, reason)
            }
            Error::LengthMismatch {
                normal,
                simple,
                normal_lines,
                simple_lines,
            } => write!(
                f,
                "aligned files differ in length: {:?} has {} lines, {:?} has {} lines",
                normal, normal_lines, simple, simple_lines
            ),
            Error::W2vFormat(msg) => write!(f, "word2vec format error: {}", msg),
            Error::UnknownToken(token) => {
                write!(f, "token {:?} is not in the vocabulary", token)
            }
            Error::Worker { worker, source } => write!(f, "worker {} failed: {}", worker, source),
            Error::WorkerTimeout {
                waited,
                received,
                expected,
            } => write!(
                f,
                "no worker report after {:?} ({}/{} workers reported)",
                waited, received, expected
            ),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<ndarray::ShapeError> for Error {
    fn from(e: ndarray::ShapeError) -> Error {
        Error::Shape(e)
    }
}

impl From<ndarray_npy::WriteNpzError> for Error {
    fn from(e: ndarray_npy::WriteNpzError) -> Error {
        Error::Npz(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Error {
        Error::Regex(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
