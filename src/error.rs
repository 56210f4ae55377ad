use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Unknown page name or non-positive page dimensions.
    InvalidSize(String),
    InvalidArgument(String),
    LineTooLong { line: usize, len: usize, max: usize },
    InvalidCharacter { line: usize, ch: char },
    /// Offset data from the generator that cannot be turned into strokes.
    InvalidGeometry(String),
    Generator(String),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSize(msg) => write!(f, "invalid page size: {msg}"),
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::LineTooLong { line, len, max } => write!(
                f,
                "each line must be at most {max} characters, line {line} contains {len}"
            ),
            Error::InvalidCharacter { line, ch } => {
                write!(f, "invalid character {ch:?} detected in line {line}")
            }
            Error::InvalidGeometry(msg) => write!(f, "invalid stroke geometry: {msg}"),
            Error::Generator(msg) => write!(f, "sequence generator failed: {msg}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
