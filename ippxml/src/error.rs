use std::error::Error as StdError;
use std::fmt;

use util::ParseEnumError;

/// Loader error classification.
///
/// A document the XML parser rejects is `Malformed`; a well-formed
/// document violating the program schema is `Structure`; everything the
/// core rejects while assembling the program keeps its own class.
#[derive(Debug)]
pub enum Error {
    Malformed(quick_xml::Error),
    Structure(String),
    Build(ippvm::Error),
}

impl Error {
    /// The process exit code bound to this error.
    pub fn code(&self) -> i32 {
        match self {
            Error::Malformed(_) => 31,
            Error::Structure(_) => 32,
            Error::Build(err) => err.code(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Malformed(err) => write!(f, "Source is not well-formed XML: {}", err),
            Error::Structure(message) => write!(f, "Wrong source structure: {}", message),
            Error::Build(err) => err.fmt(f),
        }
    }
}

impl StdError for Error {}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Error {
        Error::Malformed(err)
    }
}

impl From<ippvm::Error> for Error {
    fn from(err: ippvm::Error) -> Error {
        Error::Build(err)
    }
}

impl From<ParseEnumError> for Error {
    fn from(err: ParseEnumError) -> Error {
        Error::Structure(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
