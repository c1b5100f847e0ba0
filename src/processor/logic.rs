use std::char;
use std::cmp::Ordering;
use std::io::Write;

use super::{Io, Processor, StepResult};
use crate::error::{Error, Result};
use crate::io::InputSource;
use crate::memory::VarRef;
use crate::program::{ArgKind, Argument, Instruction, Opcode, Program};
use crate::value::Value;

impl Processor {
    /// Dispatches one instruction. The program counter has already been
    /// advanced, so `self.program_counter` is the index of the next
    /// sequential instruction; `CALL` pushes exactly that.
    pub(super) fn step(
        &mut self,
        program: &Program,
        instruction: &Instruction,
        io: &mut Io,
    ) -> Result<StepResult> {
        let args = &instruction.args;
        match instruction.opcode {
            Opcode::CREATEFRAME => self.memory.create_frame(),
            Opcode::PUSHFRAME => self.memory.push_frame()?,
            Opcode::POPFRAME => self.memory.pop_frame()?,
            Opcode::RETURN => {
                let target = self
                    .call_stack
                    .pop()
                    .ok_or(Error::MissingValue("call stack"))?;
                return Ok(StepResult::Jump(target));
            }
            Opcode::BREAK => self.write_trace(io)?,

            Opcode::DEFVAR => {
                let var = VarRef::parse(&args[0].text)?;
                self.memory.define(&var)?;
            }
            Opcode::PUSHS => {
                let value = self.resolve(&args[0])?;
                self.data_stack.push(value);
            }
            Opcode::POPS => {
                let value = self
                    .data_stack
                    .pop()
                    .ok_or(Error::MissingValue("data stack"))?;
                let var = self.destination(&args[0])?;
                self.memory.write(&var, value)?;
            }
            Opcode::CALL => {
                self.call_stack.push(self.program_counter);
                return Ok(StepResult::Jump(program.label_target(&args[0].text)?));
            }
            Opcode::JUMP => {
                return Ok(StepResult::Jump(program.label_target(&args[0].text)?));
            }
            Opcode::LABEL => {}
            Opcode::WRITE => {
                let value = self.resolve(&args[0])?;
                write!(io.output, "{}", value)?;
            }
            Opcode::DPRINT => {
                let value = self.resolve(&args[0])?;
                write!(io.log, "{}", value)?;
            }
            Opcode::EXIT => {
                let code = self.resolve(&args[0])?.int()?;
                if code < 0 || code > 49 {
                    return Err(Error::OperandValue(format!(
                        "exit code {} outside [0, 49]",
                        code
                    )));
                }
                return Ok(StepResult::Exit(code as i32));
            }

            Opcode::MOVE => {
                let var = self.destination(&args[0])?;
                let value = self.resolve(&args[1])?;
                self.memory.write(&var, value)?;
            }
            Opcode::NOT => {
                let var = self.destination(&args[0])?;
                let value = self.resolve(&args[1])?.bool()?;
                self.memory.write(&var, Value::Bool(!value))?;
            }
            Opcode::INT2CHAR => {
                let var = self.destination(&args[0])?;
                let code = self.resolve(&args[1])?.int()?;
                let decoded = if 0 <= code && code <= i64::from(std::u32::MAX) {
                    char::from_u32(code as u32)
                } else {
                    None
                };
                let decoded = decoded.ok_or_else(|| {
                    Error::StringOperation(format!("{} is not a valid code point", code))
                })?;
                self.memory.write(&var, Value::Str(decoded.to_string()))?;
            }
            Opcode::STRLEN => {
                let var = self.destination(&args[0])?;
                let value = self.resolve(&args[1])?;
                let length = value.str()?.chars().count() as i64;
                self.memory.write(&var, Value::Int(length))?;
            }
            Opcode::TYPE => {
                let var = self.destination(&args[0])?;
                let name = self.type_of(&args[1])?;
                self.memory.write(&var, Value::Str(name.to_string()))?;
            }
            Opcode::READ => {
                let var = self.destination(&args[0])?;
                let value = read_input(io.input, &args[1].text)?;
                self.memory.write(&var, value)?;
            }

            Opcode::ADD => self.arithmetic(args, i64::wrapping_add)?,
            Opcode::SUB => self.arithmetic(args, i64::wrapping_sub)?,
            Opcode::MUL => self.arithmetic(args, i64::wrapping_mul)?,
            Opcode::IDIV => {
                let var = self.destination(&args[0])?;
                let dividend = self.resolve(&args[1])?.int()?;
                let divisor = self.resolve(&args[2])?.int()?;
                if divisor == 0 {
                    return Err(Error::OperandValue("division by zero".to_string()));
                }
                self.memory
                    .write(&var, Value::Int(dividend.wrapping_div(divisor)))?;
            }
            Opcode::LT => self.relational(args, Ordering::Less)?,
            Opcode::GT => self.relational(args, Ordering::Greater)?,
            Opcode::EQ => {
                let var = self.destination(&args[0])?;
                let left = self.resolve(&args[1])?;
                let right = self.resolve(&args[2])?;
                let equal = left.equals(&right)?;
                self.memory.write(&var, Value::Bool(equal))?;
            }
            Opcode::AND => self.boolean(args, |a, b| a && b)?,
            Opcode::OR => self.boolean(args, |a, b| a || b)?,
            Opcode::STRI2INT => {
                let var = self.destination(&args[0])?;
                let string = self.resolve(&args[1])?;
                let index = self.resolve(&args[2])?.int()?;
                let c = index_str(string.str()?, index)?;
                self.memory.write(&var, Value::Int(c as i64))?;
            }
            Opcode::CONCAT => {
                let var = self.destination(&args[0])?;
                let left = self.resolve(&args[1])?;
                let right = self.resolve(&args[2])?;
                let mut joined = left.str()?.to_string();
                joined.push_str(right.str()?);
                self.memory.write(&var, Value::Str(joined))?;
            }
            Opcode::GETCHAR => {
                let var = self.destination(&args[0])?;
                let string = self.resolve(&args[1])?;
                let index = self.resolve(&args[2])?.int()?;
                let c = index_str(string.str()?, index)?;
                self.memory.write(&var, Value::Str(c.to_string()))?;
            }
            Opcode::SETCHAR => {
                let var = self.destination(&args[0])?;
                let index = self.resolve(&args[1])?.int()?;
                let replacement = self.resolve(&args[2])?;
                let replacement = replacement.str()?;
                let current = self.memory.read(&var)?.str()?;
                let replaced = set_char(current, index, replacement)?;
                self.memory.write(&var, Value::Str(replaced))?;
            }

            Opcode::JUMPIFEQ | Opcode::JUMPIFNEQ => {
                let target = program.label_target(&args[0].text)?;
                let left = self.resolve(&args[1])?;
                let right = self.resolve(&args[2])?;
                let equal = left.equals(&right)?;
                if equal == (instruction.opcode == Opcode::JUMPIFEQ) {
                    return Ok(StepResult::Jump(target));
                }
            }
        }
        Ok(StepResult::Next)
    }

    /// Resolves a symbol operand to a value: a variable reads its cell,
    /// a literal parses its text.
    fn resolve(&self, arg: &Argument) -> Result<Value> {
        if arg.kind == ArgKind::Var {
            let var = VarRef::parse(&arg.text)?;
            Ok(self.memory.read(&var)?.clone())
        } else {
            literal(arg)
        }
    }

    /// Parses a destination operand and checks that the cell exists. The
    /// cell does not have to be set; only reads require that.
    fn destination(&self, arg: &Argument) -> Result<VarRef> {
        let var = VarRef::parse(&arg.text)?;
        self.memory.variable(&var)?;
        Ok(var)
    }

    /// `TYPE` inspection: looks at the tag only, so an unset variable
    /// yields the empty string instead of a missing-value error.
    fn type_of(&self, arg: &Argument) -> Result<&'static str> {
        if arg.kind == ArgKind::Var {
            let var = VarRef::parse(&arg.text)?;
            Ok(self.memory.variable(&var)?.type_name())
        } else {
            Ok(literal(arg)?.type_name())
        }
    }

    fn arithmetic(&mut self, args: &[Argument], op: fn(i64, i64) -> i64) -> Result<()> {
        let var = self.destination(&args[0])?;
        let left = self.resolve(&args[1])?.int()?;
        let right = self.resolve(&args[2])?.int()?;
        self.memory.write(&var, Value::Int(op(left, right)))
    }

    fn relational(&mut self, args: &[Argument], expected: Ordering) -> Result<()> {
        let var = self.destination(&args[0])?;
        let left = self.resolve(&args[1])?;
        let right = self.resolve(&args[2])?;
        let ordering = left.compare(&right)?;
        self.memory.write(&var, Value::Bool(ordering == expected))
    }

    fn boolean(&mut self, args: &[Argument], op: fn(bool, bool) -> bool) -> Result<()> {
        let var = self.destination(&args[0])?;
        let left = self.resolve(&args[1])?.bool()?;
        let right = self.resolve(&args[2])?.bool()?;
        self.memory.write(&var, Value::Bool(op(left, right)))
    }

    fn write_trace(&self, io: &mut Io) -> Result<()> {
        writeln!(
            io.log,
            "break at {}: executed {}, globals {}, locals {}, temporary {}, stack {}",
            self.program_counter - 1,
            self.executed,
            self.memory.global_len(),
            self.memory.local_depth(),
            if self.memory.has_temporary() {
                "present"
            } else {
                "absent"
            },
            self.data_stack.len(),
        )?;
        Ok(())
    }
}

/// Builds a value from a literal argument. Integers parse in base 10
/// only; the loader leaves literal payloads textual, so this is where a
/// bad `int@` payload surfaces.
fn literal(arg: &Argument) -> Result<Value> {
    match arg.kind {
        ArgKind::Int => arg
            .text
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| Error::OperandType(format!("invalid int literal \"{}\"", arg.text))),
        ArgKind::Bool => match arg.text.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(Error::OperandType(format!(
                "invalid bool literal \"{}\"",
                arg.text
            ))),
        },
        ArgKind::String => Ok(Value::Str(arg.text.clone())),
        ArgKind::Nil => {
            if arg.text == "nil" {
                Ok(Value::Nil)
            } else {
                Err(Error::OperandType(format!(
                    "invalid nil literal \"{}\"",
                    arg.text
                )))
            }
        }
        ArgKind::Var | ArgKind::Label | ArgKind::Type => Err(Error::OperandType(format!(
            "a {} operand is not a value",
            arg.kind
        ))),
    }
}

/// `READ`: converts one line of program input per the requested type.
/// End of input and a failed integer parse both produce `nil`.
fn read_input(input: &mut dyn InputSource, requested: &str) -> Result<Value> {
    let line = match input.read_line() {
        Some(line) => line,
        None => return Ok(Value::Nil),
    };
    match requested {
        "int" => Ok(line.parse::<i64>().map(Value::Int).unwrap_or(Value::Nil)),
        "bool" => Ok(Value::Bool(line.eq_ignore_ascii_case("true"))),
        "string" => Ok(Value::Str(line)),
        other => Err(Error::Structure(format!(
            "unknown type \"{}\" for READ",
            other
        ))),
    }
}

/// The code point at `index`; out of range is a string error.
fn index_str(s: &str, index: i64) -> Result<char> {
    if index >= 0 {
        if let Some(c) = s.chars().nth(index as usize) {
            return Ok(c);
        }
    }
    Err(Error::StringOperation(format!(
        "index {} out of range",
        index
    )))
}

/// Replaces the code point at `index` with the first character of
/// `replacement`.
fn set_char(current: &str, index: i64, replacement: &str) -> Result<String> {
    let first = replacement
        .chars()
        .next()
        .ok_or_else(|| Error::StringOperation("empty replacement string".to_string()))?;
    if index < 0 || index as usize >= current.chars().count() {
        return Err(Error::StringOperation(format!(
            "index {} out of range",
            index
        )));
    }
    Ok(current
        .chars()
        .enumerate()
        .map(|(i, c)| if i == index as usize { first } else { c })
        .collect())
}
