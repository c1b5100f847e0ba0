use std::collections::HashMap;
use std::str;

use util::{EnumFromStr, ParseEnumError};
use util_derive::EnumFromStr;

use crate::error::{Error, Result};

/// The IPPcode23 instruction set.
///
/// Mnemonics are normalized to upper case before parsing, so the source
/// form may use any case. Every opcode carries a fixed operand
/// [`signature`](#method.signature).
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumFromStr)]
pub enum Opcode {
    // Frames and calls
    MOVE,        // var symb   | copy a value into a variable
    CREATEFRAME, //            | TF := fresh empty frame
    PUSHFRAME,   //            | move TF on top of the local stack
    POPFRAME,    //            | move the top local frame back into TF
    DEFVAR,      // var        | declare an unset variable
    CALL,        // label      | push return index, jump
    RETURN,      //            | pop return index, jump back
    // Data stack
    PUSHS, // symb             | push a value
    POPS,  // var              | pop into a variable
    // Arithmetic, relational, boolean and conversion
    ADD,      // var symb symb | wrapping 64-bit addition
    SUB,      // var symb symb | wrapping 64-bit subtraction
    MUL,      // var symb symb | wrapping 64-bit multiplication
    IDIV,     // var symb symb | integer quotient, truncating toward zero
    LT,       // var symb symb | strictly less, same-typed operands
    GT,       // var symb symb | strictly greater, same-typed operands
    EQ,       // var symb symb | equality, nil permitted on either side
    AND,      // var symb symb | boolean conjunction
    OR,       // var symb symb | boolean disjunction
    NOT,      // var symb      | boolean negation
    INT2CHAR, // var symb      | code point to one-character string
    STRI2INT, // var symb symb | code point at an index
    // Input/output
    READ,  // var type         | one line of program input, converted
    WRITE, // symb             | render to standard output
    // Strings
    CONCAT,  // var symb symb  | string concatenation
    STRLEN,  // var symb       | length in code points
    GETCHAR, // var symb symb  | one-character string at an index
    SETCHAR, // var symb symb  | replace one character of the destination
    // Types
    TYPE, // var symb          | type name, empty string for unset
    // Control flow
    LABEL,     // label        | jump target, no-op when executed
    JUMP,      // label        | unconditional jump
    JUMPIFEQ,  // label symb symb | jump when equal
    JUMPIFNEQ, // label symb symb | jump when not equal
    EXIT,      // symb         | terminate with an exit code in [0, 49]
    // Debugging
    DPRINT, // symb            | render to standard error
    BREAK,  //                 | trace line on standard error
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

impl_enum_display!(Opcode);

impl Opcode {
    /// Operand signature used for structural validation.
    pub fn signature(self) -> &'static [ArgSpec] {
        use self::ArgSpec::*;
        match self {
            Opcode::CREATEFRAME
            | Opcode::PUSHFRAME
            | Opcode::POPFRAME
            | Opcode::RETURN
            | Opcode::BREAK => &[],
            Opcode::DEFVAR | Opcode::POPS => &[Var],
            Opcode::PUSHS | Opcode::WRITE | Opcode::DPRINT | Opcode::EXIT => &[Symb],
            Opcode::CALL | Opcode::LABEL | Opcode::JUMP => &[Label],
            Opcode::MOVE
            | Opcode::NOT
            | Opcode::INT2CHAR
            | Opcode::STRLEN
            | Opcode::TYPE => &[Var, Symb],
            Opcode::READ => &[Var, Type],
            Opcode::ADD
            | Opcode::SUB
            | Opcode::MUL
            | Opcode::IDIV
            | Opcode::LT
            | Opcode::GT
            | Opcode::EQ
            | Opcode::AND
            | Opcode::OR
            | Opcode::STRI2INT
            | Opcode::CONCAT
            | Opcode::GETCHAR
            | Opcode::SETCHAR => &[Var, Symb, Symb],
            Opcode::JUMPIFEQ | Opcode::JUMPIFNEQ => &[Label, Symb, Symb],
        }
    }
}

/// Operand positions an opcode accepts, in order. `Symb` stands for
/// "variable or literal"; the other positions are exact.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArgSpec {
    Var,
    Symb,
    Label,
    Type,
}

/// Argument kinds as they appear in the source document.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArgKind {
    Var,
    Label,
    Type,
    Int,
    String,
    Bool,
    Nil,
}

impl ArgKind {
    pub fn name(self) -> &'static str {
        match self {
            ArgKind::Var => "var",
            ArgKind::Label => "label",
            ArgKind::Type => "type",
            ArgKind::Int => "int",
            ArgKind::String => "string",
            ArgKind::Bool => "bool",
            ArgKind::Nil => "nil",
        }
    }

    /// Whether an argument of this kind may stand in the given operand
    /// position.
    pub fn matches(self, spec: ArgSpec) -> bool {
        match spec {
            ArgSpec::Var => self == ArgKind::Var,
            ArgSpec::Label => self == ArgKind::Label,
            ArgSpec::Type => self == ArgKind::Type,
            ArgSpec::Symb => self != ArgKind::Label && self != ArgKind::Type,
        }
    }
}

impl std::fmt::Display for ArgKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl str::FromStr for ArgKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<ArgKind, ParseEnumError> {
        match s {
            "var" => Ok(ArgKind::Var),
            "label" => Ok(ArgKind::Label),
            "type" => Ok(ArgKind::Type),
            "int" => Ok(ArgKind::Int),
            "string" => Ok(ArgKind::String),
            "bool" => Ok(ArgKind::Bool),
            "nil" => Ok(ArgKind::Nil),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                enum_name: "ArgKind",
            }),
        }
    }
}

/// One captured operand: its declared kind and its (escape-decoded) text.
///
/// Literals stay textual until they are resolved by the processor, so a
/// bad `int@` payload only surfaces when the instruction actually runs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Argument {
    pub kind: ArgKind,
    pub text: String,
}

impl Argument {
    pub fn new(kind: ArgKind, text: &str) -> Argument {
        Argument {
            kind,
            text: text.to_string(),
        }
    }

    pub fn var(text: &str) -> Argument {
        Argument::new(ArgKind::Var, text)
    }

    pub fn label(text: &str) -> Argument {
        Argument::new(ArgKind::Label, text)
    }

    pub fn typ(text: &str) -> Argument {
        Argument::new(ArgKind::Type, text)
    }

    pub fn int(value: i64) -> Argument {
        Argument::new(ArgKind::Int, &value.to_string())
    }

    pub fn string(text: &str) -> Argument {
        Argument::new(ArgKind::String, text)
    }

    pub fn boolean(value: bool) -> Argument {
        Argument::new(ArgKind::Bool, if value { "true" } else { "false" })
    }

    pub fn nil() -> Argument {
        Argument::new(ArgKind::Nil, "nil")
    }
}

/// A single executable instruction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub args: Vec<Argument>,
}

impl Instruction {
    pub fn new(opcode: Opcode, args: Vec<Argument>) -> Instruction {
        Instruction { opcode, args }
    }

    /// Checks arity and operand-kind shape against the opcode signature.
    pub fn check_signature(&self) -> Result<()> {
        let signature = self.opcode.signature();
        if self.args.len() != signature.len() {
            return Err(Error::Structure(format!(
                "{} takes {} operand(s), got {}",
                self.opcode,
                signature.len(),
                self.args.len()
            )));
        }
        for (arg, spec) in self.args.iter().zip(signature) {
            if !arg.kind.matches(*spec) {
                return Err(Error::Structure(format!(
                    "{} does not accept a {} operand here",
                    self.opcode,
                    arg.kind
                )));
            }
        }
        Ok(())
    }
}

/// A validated program: instructions in execution order plus the label
/// table mapping label names to instruction indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    instructions: Vec<Instruction>,
    labels: HashMap<String, usize>,
}

impl Program {
    /// Validates every instruction shape, collects labels and verifies
    /// that every label operand resolves. Structural defects surface
    /// before any semantic one.
    pub fn new(instructions: Vec<Instruction>) -> Result<Program> {
        for instruction in &instructions {
            instruction.check_signature()?;
        }
        let mut labels = HashMap::new();
        for (index, instruction) in instructions.iter().enumerate() {
            if instruction.opcode == Opcode::LABEL {
                let name = instruction.args[0].text.clone();
                if labels.insert(name, index).is_some() {
                    return Err(Error::Semantic(format!(
                        "label \"{}\" redefined",
                        instruction.args[0].text
                    )));
                }
            }
        }
        for instruction in &instructions {
            if instruction.opcode == Opcode::LABEL {
                continue;
            }
            for arg in &instruction.args {
                if arg.kind == ArgKind::Label && !labels.contains_key(&arg.text) {
                    return Err(Error::Semantic(format!(
                        "label \"{}\" is not defined",
                        arg.text
                    )));
                }
            }
        }
        Ok(Program {
            instructions,
            labels,
        })
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Index of the instruction a label names.
    pub fn label_target(&self, name: &str) -> Result<usize> {
        self.labels
            .get(name)
            .copied()
            .ok_or_else(|| Error::Semantic(format!("label \"{}\" is not defined", name)))
    }
}
