//! Static checks for boot code.

use crate::instruction::Instruction;
use crate::program::Program;
use handheld_core::{Error, Result};

/// Check that no `jmp` targets an index before the start of the program.
///
/// Jumps past the end are allowed; they terminate the program. A target
/// too large for `i64` is past the end too.
pub fn validate_program(program: &Program) -> Result<()> {
    for (idx, inst) in program.iter().enumerate() {
        if let Instruction::Jump(offset) = *inst {
            let target = (idx as i64).checked_add(offset);
            if target.is_some_and(|t| t < 0) {
                return Err(Error::Validation(format!(
                    "instruction {} ({}) jumps before the start of the program",
                    idx, inst
                )));
            }
        }
    }

    Ok(())
}
