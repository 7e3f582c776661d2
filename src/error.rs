use std::fmt;

#[derive(Debug)]
pub enum Error {
    Http(reqwest::Error),
    NotLoggedIn,
    Session(String),
    Parse(String),
    OutOfRange { requested: f64, min: f64, max: f64 },
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP error: {e}"),
            Error::NotLoggedIn => write!(f, "not logged in, no device selected"),
            Error::Session(msg) => write!(f, "session error: {msg}"),
            Error::Parse(msg) => write!(f, "parse error: {msg}"),
            Error::OutOfRange { requested, min, max } => write!(
                f,
                "temperature out of bounds: {requested}, needs to be between {min} and {max} inclusive"
            ),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Http(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
