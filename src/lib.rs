//! Execution core for the IPPcode23 interpreter.
//!
//! IPPcode23 is a three-address code with dynamically typed operands. A
//! program is a sequence of [`Instruction`](program/struct.Instruction.html)s
//! operating on variables that live in one of three frame scopes (a global
//! frame, a stack of local frames and an optional temporary frame), on a
//! value stack and on a call stack.
//!
//! This crate contains the runtime only: the value model, the frame memory,
//! the program representation with its label table, and the
//! [`Processor`](processor/struct.Processor.html) executing it. Turning the
//! XML source form into a [`Program`](program/struct.Program.html) is the
//! job of the `ippxml` crate; wiring files and process exit codes is the job
//! of the `ipprun` binary.

pub mod error;
pub mod io;
pub mod memory;
pub mod processor;
pub mod program;
pub mod value;

pub use crate::error::{Error, Result};
pub use crate::io::{InputSource, Lines};
pub use crate::memory::{Frame, FrameName, Memory, VarRef};
pub use crate::processor::{Io, Processor, StepResult};
pub use crate::program::{ArgKind, ArgSpec, Argument, Instruction, Opcode, Program};
pub use crate::value::{Value, Variable};
