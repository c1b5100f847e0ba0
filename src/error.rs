use std::error::Error as StdError;
use std::fmt;
use std::io;

use crate::memory::FrameName;

/// Runtime error taxonomy. Every failure is classified, reported once and
/// terminates the run; [`code`](#method.code) yields the process exit code
/// the class is bound to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    Structure(String),         // Structural or lexical defect in the program
    Semantic(String),          // Undefined/redefined label, DEFVAR of existing variable
    OperandType(String),       // Operand has the wrong type
    UndefinedVariable(String), // Variable missing from an existing frame
    FrameNotFound(FrameName),  // Referenced frame does not exist
    MissingValue(&'static str), // Unset variable, empty data stack or call stack
    OperandValue(String),      // Operand value outside its domain
    StringOperation(String),   // Bad index or code point in a string operation
    Internal(String),          // Interpreter failure
}

impl Error {
    pub fn code(&self) -> i32 {
        match self {
            Error::Structure(_) => 32,
            Error::Semantic(_) => 52,
            Error::OperandType(_) => 53,
            Error::UndefinedVariable(_) => 54,
            Error::FrameNotFound(_) => 55,
            Error::MissingValue(_) => 56,
            Error::OperandValue(_) => 57,
            Error::StringOperation(_) => 58,
            Error::Internal(_) => 99,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Structure(message) => write!(f, "Invalid program structure: {}", message),
            Error::Semantic(message) => write!(f, "Semantic error: {}", message),
            Error::OperandType(message) => write!(f, "Wrong operand type: {}", message),
            Error::UndefinedVariable(name) => {
                write!(f, "Access to undefined variable \"{}\"", name)
            }
            Error::FrameNotFound(frame) => write!(f, "Frame {} does not exist", frame),
            Error::MissingValue(what) => write!(f, "Missing value in {}", what),
            Error::OperandValue(message) => write!(f, "Wrong operand value: {}", message),
            Error::StringOperation(message) => {
                write!(f, "Invalid string operation: {}", message)
            }
            Error::Internal(message) => write!(f, "Internal error: {}", message),
        }
    }
}

impl StdError for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
