//! Loader for the [ippvm](../ippvm/index.html) execution core.
//!
//! The main function provided by this crate is [`load`](fn.load.html),
//! which accepts an IPPcode23 program in its XML source form and outputs
//! the executable [`Program`](../ippvm/program/struct.Program.html).
//!
//! The accepted document is
//! `<program language="IPPcode23">` containing `<instruction order="N"
//! opcode="OP">` elements, each with up to three `<argK type="T">`
//! children (`K` in 1..=3). Instructions execute in ascending `order`,
//! which does not have to be dense or to match document order; argument
//! positions within one instruction must be contiguous from 1. String
//! literals escape problematic characters as `\ddd` with exactly three
//! decimal digits; the loader decodes these once, so the runtime only
//! ever sees final strings.
//!
//! Errors split into two classes: a document the XML parser itself
//! rejects ([`Error::Malformed`](enum.Error.html)) and a well-formed
//! document that violates the schema above
//! ([`Error::Structure`](enum.Error.html)). Label resolution and operand
//! shape checks run when the program is assembled and keep their own
//! classification.

mod error;
mod escape;


use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use ippvm::{ArgKind, Argument, Instruction, Opcode, Program};

pub use crate::error::{Error, Result};

/// An `<instruction>` element before ordering and validation.
struct RawInstruction {
    order: i64,
    opcode: Opcode,
    args: Vec<RawArgument>,
}

/// An `<argK>` element; `position` is the digit from the tag name.
struct RawArgument {
    position: usize,
    kind: ArgKind,
    text: String,
}

/// Parses an IPPcode23 XML document into an executable [`Program`].
pub fn load(source: &str) -> Result<Program> {
    build(collect(source)?)
}

fn collect(source: &str) -> Result<Vec<RawInstruction>> {
    let mut reader = Reader::from_str(source);
    reader.trim_text(true);

    let mut raw = Vec::new();

    // Prolog up to the program element.
    loop {
        match reader.read_event()? {
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Start(start) => {
                check_root(&start)?;
                break;
            }
            Event::Empty(start) => {
                check_root(&start)?;
                return Ok(raw);
            }
            Event::Eof => {
                return Err(Error::Structure("missing program element".to_string()));
            }
            _ => {
                return Err(Error::Structure(
                    "unexpected content before program element".to_string(),
                ));
            }
        }
    }

    // Instruction elements.
    loop {
        match reader.read_event()? {
            Event::Comment(_) => {}
            Event::Start(start) => raw.push(read_instruction(&mut reader, &start)?),
            Event::Empty(start) => raw.push(instruction_header(&start)?),
            Event::End(_) => break,
            Event::Eof => {
                return Err(Error::Structure("unterminated program element".to_string()));
            }
            _ => {
                return Err(Error::Structure(
                    "unexpected content in program element".to_string(),
                ));
            }
        }
    }

    // Nothing but comments may follow the program element.
    loop {
        match reader.read_event()? {
            Event::Comment(_) => {}
            Event::Eof => break,
            _ => {
                return Err(Error::Structure(
                    "unexpected content after program element".to_string(),
                ));
            }
        }
    }

    Ok(raw)
}

fn check_root(start: &BytesStart) -> Result<()> {
    if start.name().as_ref() != b"program" {
        return Err(Error::Structure("root element must be \"program\"".to_string()));
    }
    let mut language = None;
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        match attr.key.as_ref() {
            b"language" => language = Some(attr.unescape_value()?.into_owned()),
            b"name" | b"description" => {}
            other => {
                return Err(Error::Structure(format!(
                    "unexpected program attribute \"{}\"",
                    String::from_utf8_lossy(other)
                )));
            }
        }
    }
    match language {
        Some(ref value) if value.eq_ignore_ascii_case("IPPcode23") => Ok(()),
        Some(value) => Err(Error::Structure(format!(
            "unsupported language \"{}\"",
            value
        ))),
        None => Err(Error::Structure("missing language attribute".to_string())),
    }
}

fn read_instruction(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart,
) -> Result<RawInstruction> {
    let mut instruction = instruction_header(start)?;
    loop {
        match reader.read_event()? {
            Event::Comment(_) => {}
            Event::Start(child) => {
                let (position, kind) = argument_header(&child)?;
                let text = read_argument_text(reader)?;
                instruction.args.push(RawArgument {
                    position,
                    kind,
                    text,
                });
            }
            Event::Empty(child) => {
                let (position, kind) = argument_header(&child)?;
                instruction.args.push(RawArgument {
                    position,
                    kind,
                    text: String::new(),
                });
            }
            Event::End(_) => return Ok(instruction),
            Event::Eof => {
                return Err(Error::Structure(
                    "unterminated instruction element".to_string(),
                ));
            }
            _ => {
                return Err(Error::Structure(
                    "unexpected content in instruction element".to_string(),
                ));
            }
        }
    }
}

fn instruction_header(start: &BytesStart) -> Result<RawInstruction> {
    if start.name().as_ref() != b"instruction" {
        return Err(Error::Structure(format!(
            "unexpected element \"{}\" in program",
            String::from_utf8_lossy(start.name().as_ref())
        )));
    }
    let mut opcode = None;
    let mut order = None;
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        match attr.key.as_ref() {
            b"opcode" => opcode = Some(attr.unescape_value()?.into_owned()),
            b"order" => order = Some(attr.unescape_value()?.into_owned()),
            other => {
                return Err(Error::Structure(format!(
                    "unexpected instruction attribute \"{}\"",
                    String::from_utf8_lossy(other)
                )));
            }
        }
    }
    let opcode = opcode.ok_or_else(|| Error::Structure("missing opcode attribute".to_string()))?;
    let opcode = opcode.to_uppercase().parse::<Opcode>()?;
    let order = order.ok_or_else(|| Error::Structure("missing order attribute".to_string()))?;
    let order = order
        .trim()
        .parse::<i64>()
        .map_err(|_| Error::Structure(format!("invalid order \"{}\"", order)))?;
    if order < 1 {
        return Err(Error::Structure(format!("order {} is not positive", order)));
    }
    Ok(RawInstruction {
        order,
        opcode,
        args: Vec::new(),
    })
}

fn argument_header(start: &BytesStart) -> Result<(usize, ArgKind)> {
    let position = match start.name().as_ref() {
        b"arg1" => 1,
        b"arg2" => 2,
        b"arg3" => 3,
        other => {
            return Err(Error::Structure(format!(
                "unexpected element \"{}\" in instruction",
                String::from_utf8_lossy(other)
            )));
        }
    };
    let mut kind = None;
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        match attr.key.as_ref() {
            b"type" => kind = Some(attr.unescape_value()?.parse::<ArgKind>()?),
            other => {
                return Err(Error::Structure(format!(
                    "unexpected argument attribute \"{}\"",
                    String::from_utf8_lossy(other)
                )));
            }
        }
    }
    let kind = kind.ok_or_else(|| Error::Structure("missing type attribute".to_string()))?;
    Ok((position, kind))
}

fn read_argument_text(reader: &mut Reader<&[u8]>) -> Result<String> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Comment(_) => {}
            Event::Text(content) => text.push_str(&content.unescape()?),
            Event::CData(content) => {
                text.push_str(&String::from_utf8_lossy(&content.into_inner()))
            }
            Event::End(_) => return Ok(text),
            Event::Eof => {
                return Err(Error::Structure(
                    "unterminated argument element".to_string(),
                ));
            }
            _ => {
                return Err(Error::Structure(
                    "unexpected content in argument element".to_string(),
                ));
            }
        }
    }
}

/// Orders the collected instructions, checks argument contiguity,
/// decodes string escapes and assembles the executable program.
fn build(mut raw: Vec<RawInstruction>) -> Result<Program> {
    raw.sort_by_key(|instruction| instruction.order);
    let mut instructions = Vec::with_capacity(raw.len());
    let mut previous = 0;
    for mut item in raw {
        if item.order == previous {
            return Err(Error::Structure(format!("duplicate order {}", item.order)));
        }
        previous = item.order;

        item.args.sort_by_key(|arg| arg.position);
        for (index, arg) in item.args.iter().enumerate() {
            if arg.position != index + 1 {
                return Err(Error::Structure(format!(
                    "argument positions of {} are not contiguous",
                    item.opcode
                )));
            }
        }

        let args = item
            .args
            .into_iter()
            .map(finish_argument)
            .collect::<Result<Vec<_>>>()?;
        instructions.push(Instruction::new(item.opcode, args));
    }
    Ok(Program::new(instructions)?)
}

fn finish_argument(arg: RawArgument) -> Result<Argument> {
    match arg.kind {
        ArgKind::String => Ok(Argument::new(ArgKind::String, &escape::decode(&arg.text))),
        ArgKind::Type => match arg.text.as_str() {
            "int" | "string" | "bool" => Ok(Argument::new(ArgKind::Type, &arg.text)),
            other => Err(Error::Structure(format!(
                "unknown type name \"{}\"",
                other
            ))),
        },
        _ => Ok(Argument::new(arg.kind, &arg.text)),
    }
}
