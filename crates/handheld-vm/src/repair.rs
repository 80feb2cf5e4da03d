//! Repair search over single `jmp`/`nop` toggles.

use crate::interpreter::Interpreter;
use handheld_core::{Execution, RepairConfig, Result};
use handheld_ir::{Mutation, Mutator, Program};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A program that terminates, and the toggle that made it so.
/// `mutation` is `None` when the input already terminated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repair {
    pub mutation: Option<Mutation>,
    pub program: Program,
    pub execution: Execution,
}

impl Repair {
    pub fn accumulator(&self) -> i64 {
        self.execution.accumulator
    }

    pub fn is_unchanged(&self) -> bool {
        self.mutation.is_none()
    }

    pub fn into_parts(self) -> (Program, i64) {
        let accumulator = self.execution.accumulator;
        (self.program, accumulator)
    }
}

/// Tries candidate mutations in ascending instruction order, running each
/// on a fresh interpreter state.
#[derive(Debug, Clone, Default)]
pub struct RepairSearch {
    interpreter: Interpreter,
    config: RepairConfig,
}

impl RepairSearch {
    pub fn new(interpreter: Interpreter, config: RepairConfig) -> Self {
        Self { interpreter, config }
    }

    /// The input itself if it already terminates, otherwise the
    /// lowest-index mutation that makes it terminate. `None` when no single
    /// toggle does.
    ///
    /// Runtime faults in the input or a candidate count as "does not
    /// terminate"; any other error is returned.
    #[instrument(skip_all, fields(len = program.len(), candidates = Mutator::candidate_count(program)))]
    pub fn first(&self, program: &Program) -> Result<Option<Repair>> {
        if let Some(unchanged) = self.check_unchanged(program)? {
            info!("Program already terminates");
            return Ok(Some(unchanged));
        }

        for mutation in Mutator::new(program) {
            if let Some(repair) = self.try_candidate(program, mutation)? {
                info!(%mutation, accumulator = repair.accumulator(), "Repair found");
                return Ok(Some(repair));
            }
        }
        info!("No repair found");
        Ok(None)
    }

    /// Every terminating single-toggle mutation, in ascending index order.
    /// Just the unchanged input if it already terminates.
    #[instrument(skip_all, fields(len = program.len(), candidates = Mutator::candidate_count(program)))]
    pub fn all(&self, program: &Program) -> Result<Vec<Repair>> {
        if let Some(unchanged) = self.check_unchanged(program)? {
            info!("Program already terminates");
            return Ok(vec![unchanged]);
        }

        let mut repairs = Vec::new();
        for mutation in Mutator::new(program) {
            if let Some(repair) = self.try_candidate(program, mutation)? {
                repairs.push(repair);
            }
        }
        info!(count = repairs.len(), "Exhaustive repair search finished");
        Ok(repairs)
    }

    /// `first` or `all`, depending on the configuration
    pub fn search(&self, program: &Program) -> Result<Vec<Repair>> {
        if self.config.exhaustive {
            self.all(program)
        } else {
            Ok(self.first(program)?.into_iter().collect())
        }
    }

    fn check_unchanged(&self, program: &Program) -> Result<Option<Repair>> {
        Ok(self.terminating_run(program)?.map(|execution| Repair {
            mutation: None,
            program: program.clone(),
            execution,
        }))
    }

    fn try_candidate(&self, program: &Program, mutation: Mutation) -> Result<Option<Repair>> {
        let Some(candidate) = mutation.apply(program) else {
            return Ok(None);
        };
        let execution = self.terminating_run(&candidate)?;
        if execution.is_none() {
            debug!(%mutation, "Candidate does not terminate");
        }
        Ok(execution.map(|execution| Repair {
            mutation: Some(mutation),
            program: candidate,
            execution,
        }))
    }

    /// The execution of `program` if it terminates. Loops and runtime
    /// faults give `None`.
    fn terminating_run(&self, program: &Program) -> Result<Option<Execution>> {
        match self.interpreter.run(program) {
            Ok(execution) if execution.terminated => Ok(Some(execution)),
            Ok(_) => Ok(None),
            Err(e) if e.is_runtime() => {
                debug!(error = %e, "Run faulted");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Find the first repair with default settings
pub fn repair(program: &Program) -> Result<Option<Repair>> {
    RepairSearch::default().first(program)
}

/// Find every repair with default settings
pub fn repair_all(program: &Program) -> Result<Vec<Repair>> {
    RepairSearch::default().all(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::run;
    use handheld_ir::{parse, Instruction};

    fn sample() -> Program {
        parse([
            "nop +0", "acc +1", "jmp +4", "acc +3", "jmp -3", "acc -99", "acc +1", "jmp -4",
            "acc +6",
        ])
        .unwrap()
    }

    fn index_of(repair: &Repair) -> Option<usize> {
        repair.mutation.map(|m| m.index)
    }

    #[test]
    fn test_sample_repair() {
        let program = sample();
        let repair = repair(&program).unwrap().unwrap();
        let mutation = repair.mutation.unwrap();
        assert_eq!(mutation.index, 7);
        assert_eq!(mutation.from, Instruction::Jump(-4));
        assert_eq!(mutation.to, Instruction::NoOp(-4));
        assert_eq!(repair.program.get(7), Some(Instruction::NoOp(-4)));
        assert_eq!(repair.accumulator(), 8);

        let rerun = run(&repair.program).unwrap();
        assert_eq!(rerun.outcome(), (true, 8));

        // The input is left alone.
        assert_eq!(program, sample());
    }

    #[test]
    fn test_into_parts() {
        let (program, accumulator) = repair(&sample()).unwrap().unwrap().into_parts();
        assert_eq!(accumulator, 8);
        assert_eq!(program.to_string().lines().nth(7), Some("nop -4"));
    }

    #[test]
    fn test_repair_of_repaired_program_is_unchanged() {
        let repaired = repair(&sample()).unwrap().unwrap().program;
        let again = repair(&repaired).unwrap().unwrap();
        assert!(again.is_unchanged());
        assert_eq!(again.program, repaired);
        assert_eq!(again.accumulator(), 8);
    }

    #[test]
    fn test_terminating_input_is_returned_unchanged() {
        let program = parse(["nop +0", "acc +5", "jmp +1"]).unwrap();
        let found = repair(&program).unwrap().unwrap();
        assert!(found.is_unchanged());
        assert_eq!(found.program, program);
        assert_eq!(found.execution.outcome(), (true, 5));

        assert_eq!(repair_all(&program).unwrap(), vec![found]);
    }

    #[test]
    fn test_lowest_index_wins() {
        // Toggling index 0, 2 or 3 each breaks the 0 -> 2 -> 3 loop.
        let program = parse(["jmp +2", "jmp +3", "nop -1", "jmp -3"]).unwrap();
        let repairs = repair_all(&program).unwrap();
        let indices: Vec<Option<usize>> = repairs.iter().map(index_of).collect();
        assert_eq!(indices, vec![Some(0), Some(2), Some(3)]);

        let first = repair(&program).unwrap().unwrap();
        assert_eq!(index_of(&first), Some(0));
        assert_eq!(first.execution.halted_at, 4);
    }

    #[test]
    fn test_no_repair_found() {
        let program = parse(["acc +1", "jmp +0", "jmp -2"]).unwrap();
        // Toggling index 1 reaches index 2, which jumps back to 0.
        // Toggling index 2 leaves the self-loop at 1.
        assert!(repair(&program).unwrap().is_none());
        assert!(repair_all(&program).unwrap().is_empty());
    }

    #[test]
    fn test_looping_accumulates_only() {
        let program = parse(["acc +1", "acc +2", "jmp -2"]).unwrap();
        let found = repair(&program).unwrap().unwrap();
        assert_eq!(index_of(&found), Some(2));
        assert_eq!(found.accumulator(), 3);
    }

    #[test]
    fn test_failing_candidates_are_skipped() {
        // Toggling index 0 gives `jmp -1`, which jumps before the start.
        let program = parse(["nop -1", "jmp +0", "nop +5"]).unwrap();
        let repair = repair(&program).unwrap().unwrap();
        assert_eq!(index_of(&repair), Some(1));
        assert_eq!(repair.execution.halted_at, 3);
    }

    #[test]
    fn test_faulting_input_can_be_repaired() {
        let program = parse(["acc +2", "jmp -5"]).unwrap();
        let found = repair(&program).unwrap().unwrap();
        assert_eq!(index_of(&found), Some(1));
        assert_eq!(found.execution.outcome(), (true, 2));
    }

    #[test]
    fn test_overshoot_counts_as_repair() {
        let program = parse(["acc +4", "nop +10", "jmp -2"]).unwrap();
        let repair = repair(&program).unwrap().unwrap();
        assert_eq!(index_of(&repair), Some(1));
        assert_eq!(repair.execution.halted_at, 11);
        assert_eq!(repair.accumulator(), 4);
    }

    #[test]
    fn test_search_respects_config() {
        let program = parse(["jmp +2", "jmp +3", "nop -1", "jmp -3"]).unwrap();
        let single = RepairSearch::default().search(&program).unwrap();
        assert_eq!(single.len(), 1);

        let exhaustive =
            RepairSearch::new(Interpreter::default(), RepairConfig { exhaustive: true });
        assert_eq!(exhaustive.search(&program).unwrap(), repair_all(&program).unwrap());
    }
}
