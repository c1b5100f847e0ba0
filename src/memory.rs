use std::collections::HashMap;
use std::fmt;

use util::EnumFromStr;
use util_derive::EnumFromStr;

use crate::error::{Error, Result};
use crate::value::{Value, Variable};

/// The three frame scopes a variable reference can address.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumFromStr)]
pub enum FrameName {
    GF, // Global frame, lives for the whole run
    LF, // Top of the local frame stack
    TF, // Temporary frame, absent until CREATEFRAME
}

macro_rules! impl_enum_display {
    ($e:ty) => {
        impl std::fmt::Display for $e {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Debug::fmt(self, f)
            }
        }
    };
}

impl_enum_display!(FrameName);

/// A parsed `FRAME@name` variable reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VarRef {
    pub frame: FrameName,
    pub name: String,
}

impl VarRef {
    /// Parses `FRAME@name`. A malformed reference is an operand-type
    /// error; names are drawn from letters, digits and `_-$&%*!?`, not
    /// starting with a digit.
    pub fn parse(text: &str) -> Result<VarRef> {
        let at = text
            .find('@')
            .ok_or_else(|| malformed(text, "missing @"))?;
        let frame = EnumFromStr::from_str(&text[..at])
            .map_err(|_| malformed(text, "unknown frame"))?;
        let name = &text[at + 1..];
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if is_name_start(first) => {}
            _ => return Err(malformed(text, "bad variable name")),
        }
        if !chars.all(is_name_char) {
            return Err(malformed(text, "bad variable name"));
        }
        Ok(VarRef {
            frame,
            name: name.to_string(),
        })
    }
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{}", self.frame, self.name)
    }
}

fn malformed(text: &str, reason: &str) -> Error {
    Error::OperandType(format!("malformed variable reference \"{}\" ({})", text, reason))
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || is_name_symbol(c)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_name_symbol(c)
}

fn is_name_symbol(c: char) -> bool {
    match c {
        '_' | '-' | '$' | '&' | '%' | '*' | '!' | '?' => true,
        _ => false,
    }
}

/// A single scope: variable name to cell, names unique within the frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    vars: HashMap<String, Variable>,
}

impl Frame {
    pub fn new() -> Frame {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn define(&mut self, name: &str) -> Result<()> {
        if self.vars.contains_key(name) {
            return Err(Error::Semantic(format!(
                "variable \"{}\" already defined",
                name
            )));
        }
        self.vars.insert(name.to_string(), Variable::new());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Variable> {
        self.vars
            .get(name)
            .ok_or_else(|| Error::UndefinedVariable(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Variable> {
        self.vars
            .get_mut(name)
            .ok_or_else(|| Error::UndefinedVariable(name.to_string()))
    }
}

/// The three-tier frame store: one global frame, a stack of local frames
/// whose top is addressable as `LF`, and an optional temporary frame.
///
/// `PUSHFRAME` moves the temporary frame onto the local stack and
/// `POPFRAME` moves the top local frame back; the two are mutual inverses
/// whenever both succeed.
#[derive(Debug, Default)]
pub struct Memory {
    global: Frame,
    locals: Vec<Frame>,
    temporary: Option<Frame>,
}

impl Memory {
    pub fn new() -> Memory {
        Default::default()
    }

    /// `CREATEFRAME`: the temporary frame becomes a fresh empty frame,
    /// discarding any previous one.
    pub fn create_frame(&mut self) {
        self.temporary = Some(Frame::new());
    }

    /// `PUSHFRAME`: moves the temporary frame on top of the local stack.
    pub fn push_frame(&mut self) -> Result<()> {
        let frame = self
            .temporary
            .take()
            .ok_or(Error::FrameNotFound(FrameName::TF))?;
        self.locals.push(frame);
        Ok(())
    }

    /// `POPFRAME`: the top local frame becomes the temporary frame.
    pub fn pop_frame(&mut self) -> Result<()> {
        let frame = self
            .locals
            .pop()
            .ok_or(Error::FrameNotFound(FrameName::LF))?;
        self.temporary = Some(frame);
        Ok(())
    }

    fn frame(&self, name: FrameName) -> Result<&Frame> {
        match name {
            FrameName::GF => Ok(&self.global),
            FrameName::LF => self
                .locals
                .last()
                .ok_or(Error::FrameNotFound(FrameName::LF)),
            FrameName::TF => self
                .temporary
                .as_ref()
                .ok_or(Error::FrameNotFound(FrameName::TF)),
        }
    }

    fn frame_mut(&mut self, name: FrameName) -> Result<&mut Frame> {
        match name {
            FrameName::GF => Ok(&mut self.global),
            FrameName::LF => self
                .locals
                .last_mut()
                .ok_or(Error::FrameNotFound(FrameName::LF)),
            FrameName::TF => self
                .temporary
                .as_mut()
                .ok_or(Error::FrameNotFound(FrameName::TF)),
        }
    }

    /// `DEFVAR`: the target frame must exist and must not hold the name
    /// yet; the new cell starts unset.
    pub fn define(&mut self, var: &VarRef) -> Result<()> {
        self.frame_mut(var.frame)?.define(&var.name)
    }

    /// The cell a reference addresses. Failure order: missing frame, then
    /// missing name.
    pub fn variable(&self, var: &VarRef) -> Result<&Variable> {
        self.frame(var.frame)?.get(&var.name)
    }

    pub fn variable_mut(&mut self, var: &VarRef) -> Result<&mut Variable> {
        self.frame_mut(var.frame)?.get_mut(&var.name)
    }

    /// Reads the assigned value of a variable. Failure order: missing
    /// frame, missing name, unset cell.
    pub fn read(&self, var: &VarRef) -> Result<&Value> {
        self.variable(var)?.value()
    }

    /// Overwrites a declared variable; the cell does not have to be set.
    pub fn write(&mut self, var: &VarRef, value: Value) -> Result<()> {
        self.variable_mut(var)?.set(value);
        Ok(())
    }

    pub fn global_len(&self) -> usize {
        self.global.len()
    }

    pub fn local_depth(&self) -> usize {
        self.locals.len()
    }

    pub fn has_temporary(&self) -> bool {
        self.temporary.is_some()
    }
}
