//! Command-line driver: load boot code, run it, repair it if it loops.

mod args;
mod input;
mod logging;
mod report;

use anyhow::{Context, Result};
use args::{Args, USAGE};
use handheld_core::CliConfig;
use handheld_ir::validate_program;
use handheld_vm::{Interpreter, RepairSearch};
use report::Report;
use std::path::Path;
use tracing::{info, warn};

fn main() -> Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        print!("{USAGE}");
        return Ok(());
    }

    // Load configuration
    let mut config = match &args.config {
        Some(path) => CliConfig::from_json_file(path)?,
        None => CliConfig::default(),
    };
    args.apply(&mut config);

    logging::init_logging(&config.log_filter)?;

    let report = run_boot_sequence(&config)?;
    print!("{}", report.render(config.output)?);
    Ok(())
}

fn run_boot_sequence(config: &CliConfig) -> Result<Report> {
    let program = input::load_program(Path::new(&config.input_path))?;
    info!(instructions = program.len(), path = %config.input_path, "Boot code loaded");

    if let Err(e) = validate_program(&program) {
        warn!("{}", e);
    }

    let interpreter = Interpreter::new(config.execution.clone());
    let execution = interpreter
        .run(&program)
        .context("boot sequence failed")?;
    info!(
        terminated = execution.terminated,
        accumulator = execution.accumulator,
        "Boot sequence finished"
    );

    let repair_attempted = !execution.terminated;
    let repairs = if repair_attempted {
        RepairSearch::new(interpreter, config.repair.clone())
            .search(&program)
            .context("repair search failed")?
    } else {
        Vec::new()
    };

    Ok(Report {
        input: config.input_path.clone(),
        instructions: program.len(),
        execution,
        repair_attempted,
        repairs,
        program,
    })
}
