//! Command-line flags.

use anyhow::{bail, Result};
use handheld_core::{CliConfig, OutputFormat};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: handheld [OPTIONS] [INPUT]

Run boot code, and if it loops, find the single jmp/nop toggle that fixes it.

Arguments:
  [INPUT]            Boot code file (default: data.txt)

Options:
  --config <PATH>    JSON configuration file
  --json             Print the report as JSON
  --trace            Include every executed step in the report
  --all              List every repair, not just the first
  -h, --help         Print this help
";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub input: Option<String>,
    pub json: bool,
    pub trace: bool,
    pub all: bool,
    pub help: bool,
}

impl Args {
    /// Parse flags, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--json" => parsed.json = true,
                "--trace" => parsed.trace = true,
                "--all" => parsed.all = true,
                "--config" => match args.next() {
                    Some(path) => parsed.config = Some(PathBuf::from(path)),
                    None => bail!("--config requires a path"),
                },
                flag if flag.starts_with('-') && flag != "-" => bail!("unknown option {flag}"),
                other => {
                    if parsed.input.is_some() {
                        bail!("unexpected argument {other}");
                    }
                    parsed.input = Some(other.to_string());
                }
            }
        }

        Ok(parsed)
    }

    /// Layer the flags over a loaded configuration.
    pub fn apply(&self, config: &mut CliConfig) {
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if self.json {
            config.output = OutputFormat::Json;
        }
        if self.trace {
            config.execution.record_trace = true;
        }
        if self.all {
            config.repair.exhaustive = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&["--json", "--trace", "--all", "--config", "cfg.json", "boot.txt"]).unwrap();
        assert!(args.json && args.trace && args.all);
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        assert_eq!(args.input.as_deref(), Some("boot.txt"));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn test_apply_overrides_config() {
        let mut config = CliConfig::default();
        parse(&["--json", "--all", "boot.txt"]).unwrap().apply(&mut config);
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.repair.exhaustive);
        assert!(!config.execution.record_trace);
        assert_eq!(config.input_path, "boot.txt");
    }
}
