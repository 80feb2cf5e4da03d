//! Instruction set for boot code.

use handheld_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction mnemonic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    Acc,
    Jmp,
    Nop,
}

impl Opcode {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Acc => "acc",
            Opcode::Jmp => "jmp",
            Opcode::Nop => "nop",
        }
    }

    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        match mnemonic {
            "acc" => Some(Opcode::Acc),
            "jmp" => Some(Opcode::Jmp),
            "nop" => Some(Opcode::Nop),
            _ => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A single instruction with its signed argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// Add the delta to the accumulator
    Accumulate(i64),
    /// Move the pointer by the offset
    Jump(i64),
    /// Do nothing; the argument is kept so the instruction can be toggled
    NoOp(i64),
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Accumulate(_) => Opcode::Acc,
            Instruction::Jump(_) => Opcode::Jmp,
            Instruction::NoOp(_) => Opcode::Nop,
        }
    }

    pub fn argument(&self) -> i64 {
        match *self {
            Instruction::Accumulate(v) | Instruction::Jump(v) | Instruction::NoOp(v) => v,
        }
    }

    /// Build an instruction from its parts
    pub fn new(opcode: Opcode, argument: i64) -> Self {
        match opcode {
            Opcode::Acc => Instruction::Accumulate(argument),
            Opcode::Jmp => Instruction::Jump(argument),
            Opcode::Nop => Instruction::NoOp(argument),
        }
    }

    /// The `jmp`/`nop` counterpart with the same argument. `acc` has none.
    pub fn toggled(&self) -> Option<Instruction> {
        match *self {
            Instruction::Jump(v) => Some(Instruction::NoOp(v)),
            Instruction::NoOp(v) => Some(Instruction::Jump(v)),
            Instruction::Accumulate(_) => None,
        }
    }

    /// Decode one line of boot code. `line` is the 1-based line number
    /// used in error reports.
    pub fn parse(line: usize, text: &str) -> Result<Self> {
        let malformed = |reason: &str| Error::MalformedInstruction {
            line,
            text: text.to_string(),
            reason: reason.to_string(),
        };

        let (mnemonic, argument) = text
            .split_once(' ')
            .ok_or_else(|| malformed("expected '<opcode> <signed integer>'"))?;

        if mnemonic.is_empty() || !mnemonic.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(malformed("opcode must be alphabetic"));
        }

        let digits = match argument.as_bytes().first() {
            Some(b'+') | Some(b'-') => &argument[1..],
            _ => return Err(malformed("argument must start with '+' or '-'")),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("argument must be a sign followed by digits"));
        }
        // i64::from_str accepts a leading '+' as well as '-'.
        let value: i64 = argument
            .parse()
            .map_err(|_| malformed("argument out of range"))?;

        let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| Error::UnknownOpcode {
            line,
            opcode: mnemonic.to_string(),
        })?;

        Ok(Instruction::new(opcode, value))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:+}", self.opcode(), self.argument())
    }
}
