use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input record.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// The line number (1-based)
        line: usize,
        message: String,
    },
    /// The edge graph is in a state that the traversal cannot produce from
    /// valid input. Always fatal.
    #[error("internal inconsistency: {0}")]
    Invariant(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Error::Invariant(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::parse(12, "too few fields");
        assert_eq!(err.to_string(), "parse error at line 12: too few fields");

        let err = Error::invariant("odd chain length 3");
        assert_eq!(
            err.to_string(),
            "internal inconsistency: odd chain length 3"
        );
    }
}
