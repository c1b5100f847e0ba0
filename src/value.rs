use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// A runtime datum. Literals, variable contents and data stack entries are
/// all values; the type of a cell changes with every write.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    Nil,
}

impl Value {
    /// The type name as reported by `TYPE` and used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Nil => "nil",
        }
    }

    pub fn int(&self) -> Result<i64> {
        match self {
            Value::Int(value) => Ok(*value),
            other => Err(type_error("int", other)),
        }
    }

    pub fn bool(&self) -> Result<bool> {
        match self {
            Value::Bool(value) => Ok(*value),
            other => Err(type_error("bool", other)),
        }
    }

    pub fn str(&self) -> Result<&str> {
        match self {
            Value::Str(text) => Ok(text),
            other => Err(type_error("string", other)),
        }
    }

    /// Equality as used by `EQ` and the conditional jumps: `nil` may meet
    /// any type (equal only to itself), every other mixture of types is an
    /// operand-type error.
    pub fn equals(&self, other: &Value) -> Result<bool> {
        match (self, other) {
            (Value::Nil, Value::Nil) => Ok(true),
            (Value::Nil, _) | (_, Value::Nil) => Ok(false),
            (Value::Int(a), Value::Int(b)) => Ok(a == b),
            (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
            (Value::Str(a), Value::Str(b)) => Ok(a == b),
            (a, b) => Err(Error::OperandType(format!(
                "cannot compare {} with {}",
                a.type_name(),
                b.type_name()
            ))),
        }
    }

    /// Ordering as used by `LT` and `GT`. Operands must share a type and
    /// `nil` is not ordered at all.
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
            (a, b) => Err(Error::OperandType(format!(
                "cannot order {} against {}",
                a.type_name(),
                b.type_name()
            ))),
        }
    }
}

fn type_error(expected: &str, got: &Value) -> Error {
    Error::OperandType(format!("expected {}, got {}", expected, got.type_name()))
}

/// Rendering used by `WRITE` and `DPRINT`: decimal integers, `true`/`false`,
/// raw strings, and nothing at all for `nil`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Bool(true) => f.write_str("true"),
            Value::Bool(false) => f.write_str("false"),
            Value::Str(text) => f.write_str(text),
            Value::Nil => Ok(()),
        }
    }
}

/// A declared variable cell. `DEFVAR` creates the cell unset; only a write
/// replaces its contents, tag and payload at once.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Variable {
    value: Option<Value>,
}

impl Variable {
    pub fn new() -> Variable {
        Default::default()
    }

    /// The value for a normal read; reading an unset cell is a
    /// missing-value error.
    pub fn value(&self) -> Result<&Value> {
        self.value.as_ref().ok_or(Error::MissingValue("variable"))
    }

    /// Tag inspection for `TYPE`: an unset cell maps to the empty string
    /// instead of failing.
    pub fn type_name(&self) -> &'static str {
        match &self.value {
            Some(value) => value.type_name(),
            None => "",
        }
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn set(&mut self, value: Value) {
        self.value = Some(value);
    }
}
