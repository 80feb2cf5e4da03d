//! Single-instruction `jmp`/`nop` mutations.

use crate::instruction::Instruction;
use crate::program::Program;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One instruction swapped for its toggled counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    pub index: usize,
    pub from: Instruction,
    pub to: Instruction,
}

impl Mutation {
    /// The mutation at `index`, if that instruction can be toggled
    pub fn at(program: &Program, index: usize) -> Option<Self> {
        let from = program.get(index)?;
        let to = from.toggled()?;
        Some(Self { index, from, to })
    }

    /// A copy of `program` with this mutation applied. `None` if the program
    /// does not hold `from` at `index`.
    pub fn apply(&self, program: &Program) -> Option<Program> {
        if program.get(self.index)? != self.from {
            return None;
        }
        program.with_replaced(self.index, self.to)
    }

    /// The mutation that undoes this one
    pub fn inverse(&self) -> Self {
        Self {
            index: self.index,
            from: self.to,
            to: self.from,
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instruction {}: {} -> {}", self.index, self.from, self.to)
    }
}

/// Yields every candidate mutation of a program in ascending index order.
/// `acc` instructions are skipped.
pub struct Mutator<'a> {
    program: &'a Program,
    next: usize,
}

impl<'a> Mutator<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self { program, next: 0 }
    }

    /// Number of toggleable instructions in the program
    pub fn candidate_count(program: &Program) -> usize {
        program.iter().filter(|inst| inst.toggled().is_some()).count()
    }
}

impl Iterator for Mutator<'_> {
    type Item = Mutation;

    fn next(&mut self) -> Option<Mutation> {
        while self.next < self.program.len() {
            let index = self.next;
            self.next += 1;
            if let Some(mutation) = Mutation::at(self.program, index) {
                return Some(mutation);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.program.len().saturating_sub(self.next)))
    }
}
