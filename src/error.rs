use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A single input line did not have the expected shape. Lines count from 1.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("malformed input: {0}")]
    Input(String),

    #[error("no answer: {0}")]
    NoAnswer(String),

    #[error("no solver for day {0}")]
    UnknownDay(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Error::Parse { line, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
