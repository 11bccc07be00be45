use derive_more::Display;
use std::error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug, Display)]
pub enum ErrorKind {
    #[display(fmt = "invalid argument")]
    InvalidArgument,
    #[display(fmt = "invalid configuration")]
    ConfigParse,
    #[display(fmt = "invalid date format")]
    DateParse,
    #[display(fmt = "invalid command")]
    ParseError,
    #[display(fmt = "{}", _0)]
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn invalid_argument(msg: &str) -> Self {
        Error::new(ErrorKind::InvalidArgument, msg)
    }

    /// Replaces the message, keeping the kind.
    pub fn context(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidArgument)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(ErrorKind::ConfigParse, &toml_error.to_string())
    }
}

impl From<chrono::ParseError> for Error {
    fn from(parse_error: chrono::ParseError) -> Error {
        Error::new(
            ErrorKind::DateParse,
            format!("Could not parse date: {}", parse_error).as_str(),
        )
    }
}

impl<E: fmt::Debug> From<nom::Err<E>> for Error {
    fn from(error: nom::Err<E>) -> Self {
        Error::new(
            ErrorKind::ParseError,
            &format!("Error while parsing: {:?}", error),
        )
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let text = err.to_string();
        match err.kind {
            ErrorKind::IOError(err) => err,
            _ => io::Error::new(io::ErrorKind::InvalidInput, text),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind, msg),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_kind_and_message() {
        let err = Error::invalid_argument("day 32");
        assert_eq!(err.to_string(), "invalid argument: day 32");

        let err = Error::from(ErrorKind::ParseError);
        assert_eq!(err.to_string(), "invalid command");
    }

    #[test]
    fn context_replaces_message() {
        let err = Error::from(ErrorKind::ConfigParse).context("could not read config");
        assert_eq!(err.to_string(), "invalid configuration: could not read config");
    }

    #[test]
    fn into_io_error() {
        let err: io::Error = Error::invalid_argument("month 13").into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "invalid argument: month 13");

        let err: io::Error = Error::from(ErrorKind::DateParse).into();
        assert_eq!(err.to_string(), "invalid date format");

        let inner = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: io::Error = Error::from(inner).into();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
