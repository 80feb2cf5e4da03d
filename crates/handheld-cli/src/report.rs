//! Rendering run and repair results.

use anyhow::Result;
use handheld_core::{Execution, OutputFormat, TraceStep};
use handheld_ir::Program;
use handheld_vm::Repair;
use serde::Serialize;
use std::fmt::{self, Write};

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub input: String,
    pub instructions: usize,
    pub execution: Execution,
    /// Only attempted when the original program loops
    pub repair_attempted: bool,
    pub repairs: Vec<Repair>,
    #[serde(skip)]
    pub program: Program,
}

impl Report {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => Ok(self.render_text()?),
        }
    }

    fn render_text(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let exec = &self.execution;

        writeln!(out, "Loaded {} instructions from {}", self.instructions, self.input)?;
        if exec.terminated {
            writeln!(
                out,
                "Boot sequence terminates after {} steps, accumulator {}",
                exec.steps, exec.accumulator
            )?;
        } else {
            writeln!(
                out,
                "Boot sequence loops: instruction {} would run a second time ({} steps), accumulator {}",
                exec.halted_at, exec.steps, exec.accumulator
            )?;
        }
        write_trace(&mut out, &self.program, &exec.trace)?;

        if !self.repair_attempted {
            return Ok(out);
        }
        if self.repairs.is_empty() {
            writeln!(out, "No single jmp/nop toggle makes the boot sequence terminate")?;
        }
        for repair in &self.repairs {
            match &repair.mutation {
                Some(mutation) => writeln!(out, "Repair: {}", mutation)?,
                None => writeln!(out, "Repair: none needed")?,
            }
            writeln!(
                out,
                "Repaired boot sequence terminates after {} steps, accumulator {}",
                repair.execution.steps,
                repair.accumulator()
            )?;
            write_trace(&mut out, &repair.program, &repair.execution.trace)?;
        }
        Ok(out)
    }
}

fn write_trace(out: &mut String, program: &Program, trace: &[TraceStep]) -> fmt::Result {
    if trace.is_empty() {
        return Ok(());
    }
    writeln!(out, "Trace:")?;
    for step in trace {
        let inst = program
            .get(step.pointer)
            .map(|i| i.to_string())
            .unwrap_or_default();
        writeln!(out, "  {:>5}  {:<12} acc {}", step.pointer, inst, step.accumulator)?;
    }
    Ok(())
}
