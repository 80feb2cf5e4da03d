//! Error types for decoding and executing boot code.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Line numbers are 1-based.
    #[error("Malformed instruction on line {line} ({text:?}): {reason}")]
    MalformedInstruction {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("Unknown opcode {opcode:?} on line {line}")]
    UnknownOpcode { line: usize, opcode: String },

    #[error("Jump at instruction {pointer} targets {target}, before the start of the program")]
    JumpOutOfRange { pointer: usize, target: i64 },

    #[error("Accumulator overflow at instruction {pointer}")]
    AccumulatorOverflow { pointer: usize },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for errors raised while a program is running, as opposed to
    /// while it is being decoded or loaded.
    pub fn is_runtime(&self) -> bool {
        matches!(
            self,
            Error::JumpOutOfRange { .. } | Error::AccumulatorOverflow { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
