//! Boot-code instruction set.
//!
//! A program is a flat list of `acc`, `jmp` and `nop` instructions, each
//! carrying one signed argument. This crate covers:
//! - Decoding and encoding the line-oriented text format
//! - Single-instruction `jmp`/`nop` mutations
//! - Static checks on jump targets

pub mod instruction;
pub mod program;
pub mod mutation;
pub mod validation;

pub use instruction::{Instruction, Opcode};
pub use program::{parse, Program};
pub use mutation::{Mutation, Mutator};
pub use validation::validate_program;
