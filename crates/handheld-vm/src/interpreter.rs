//! Single-accumulator interpreter with loop detection.

use handheld_core::{Error, Execution, ExecutionConfig, Result, TraceStep};
use handheld_ir::{Instruction, Program};

/// Per-run machine state. Never outlives one call to [`Interpreter::run`].
struct ExecutionState {
    pointer: usize,
    accumulator: i64,
    visited: Vec<bool>,
    steps: usize,
    trace: Vec<TraceStep>,
}

impl ExecutionState {
    fn new(program_len: usize) -> Self {
        Self {
            pointer: 0,
            accumulator: 0,
            visited: vec![false; program_len],
            steps: 0,
            trace: Vec::new(),
        }
    }

    fn finish(self, terminated: bool) -> Execution {
        Execution {
            terminated,
            accumulator: self.accumulator,
            halted_at: self.pointer,
            steps: self.steps,
            trace: self.trace,
        }
    }
}

/// Runs programs. Holds no state between runs.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    config: ExecutionConfig,
}

impl Interpreter {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    /// Run `program` from pointer 0 with a zero accumulator.
    ///
    /// Stops with `terminated == false` as soon as a pointer is about to run
    /// a second time, and with `terminated == true` once the pointer reaches
    /// or passes the end of the program. Jumping before index 0 and
    /// accumulator overflow are errors.
    pub fn run(&self, program: &Program) -> Result<Execution> {
        let mut state = ExecutionState::new(program.len());

        loop {
            let pointer = state.pointer;

            if state.visited.get(pointer).copied().unwrap_or(false) {
                return Ok(state.finish(false));
            }
            let Some(inst) = program.get(pointer) else {
                return Ok(state.finish(true));
            };
            state.visited[pointer] = true;

            state.pointer = match inst {
                Instruction::Accumulate(delta) => {
                    state.accumulator = state
                        .accumulator
                        .checked_add(delta)
                        .ok_or(Error::AccumulatorOverflow { pointer })?;
                    pointer + 1
                }
                Instruction::Jump(offset) => jump_target(pointer, offset)?,
                Instruction::NoOp(_) => pointer + 1,
            };
            state.steps += 1;

            if self.config.record_trace {
                state.trace.push(TraceStep {
                    pointer,
                    accumulator: state.accumulator,
                });
            }
        }
    }
}

fn jump_target(pointer: usize, offset: i64) -> Result<usize> {
    let target = (pointer as i64).saturating_add(offset);
    if target < 0 {
        return Err(Error::JumpOutOfRange { pointer, target });
    }
    // A target beyond usize only means "past the end".
    Ok(usize::try_from(target).unwrap_or(usize::MAX))
}

/// Run `program` with the default interpreter
pub fn run(program: &Program) -> Result<Execution> {
    Interpreter::default().run(program)
}
