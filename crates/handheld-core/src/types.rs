//! Plain result types shared between the interpreter and its callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One executed instruction, recorded when tracing is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Pointer of the executed instruction
    pub pointer: usize,
    /// Accumulator after the instruction ran
    pub accumulator: i64,
}

/// Outcome of a single interpreter run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    /// False when a pointer was about to run a second time
    pub terminated: bool,
    pub accumulator: i64,
    /// Pointer at which the run stopped: the repeated pointer for a loop,
    /// or the first pointer at or past the end for termination
    pub halted_at: usize,
    /// Number of instructions executed
    pub steps: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<TraceStep>,
}

impl Execution {
    /// The `(terminated, accumulator)` pair
    pub fn outcome(&self) -> (bool, i64) {
        (self.terminated, self.accumulator)
    }
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terminated {
            write!(
                f,
                "terminated at {} after {} steps, accumulator {}",
                self.halted_at, self.steps, self.accumulator
            )
        } else {
            write!(
                f,
                "loop detected at {} after {} steps, accumulator {}",
                self.halted_at, self.steps, self.accumulator
            )
        }
    }
}
