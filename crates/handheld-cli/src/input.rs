//! Loading boot code from disk.

use anyhow::{bail, Context, Result};
use handheld_ir::{parse, Program};
use std::path::Path;

/// Trim trailing whitespace from every line and drop blank lines at the end.
pub fn tidy_lines(contents: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = contents.lines().map(str::trim_end).collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

pub fn load_program(path: &Path) -> Result<Program> {
    if !path.exists() {
        bail!("could not locate boot code file '{}'", path.display());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let program = parse(tidy_lines(&contents))
        .with_context(|| format!("failed to parse '{}'", path.display()))?;
    Ok(program)
}
