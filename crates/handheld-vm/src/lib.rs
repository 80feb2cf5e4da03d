//! Boot-code execution and repair.
//!
//! This module provides:
//! - An interpreter that runs a program until it terminates or is about to
//!   repeat an instruction
//! - A repair search that toggles one `jmp`/`nop` at a time until the
//!   program terminates

pub mod interpreter;
pub mod repair;

pub use interpreter::{run, Interpreter};
pub use repair::{repair, repair_all, Repair, RepairSearch};
