//! Command-line arguments of the `laoskit` binary.

use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;

/// Usage text printed for `--help` and on argument errors
pub const USAGE: &str = "\
Usage: laoskit <drawing.json> [options]

Options:
  -o, --output <file>     write the LAOS job to <file> instead of stdout
  -c, --config <file>     machine configuration (default: laoscfg.ps in the data directory)
  -f, --features <file>   feature header of the input document (.ps, .json or .toml)
  -r, --raster <file>     rendered page image for raster engraving
      --log-json          log as JSON lines
  -h, --help              print this help
  -V, --version           print the version";

/// Inputs and outputs of one conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobOptions {
    pub drawing: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub features: Option<PathBuf>,
    pub raster: Option<PathBuf>,
    pub log_json: bool,
}

/// What the binary was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(JobOptions),
    Help,
    Version,
}

/// Parse the arguments following the program name
pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut options = JobOptions::default();
    let mut drawing = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--log-json" => options.log_json = true,
            "-o" | "--output" => options.output = Some(value(&arg, args.next())?),
            "-c" | "--config" => options.config = Some(value(&arg, args.next())?),
            "-f" | "--features" => options.features = Some(value(&arg, args.next())?),
            "-r" | "--raster" => options.raster = Some(value(&arg, args.next())?),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                bail!("unknown option '{}'", flag)
            }
            _ => {
                if drawing.replace(PathBuf::from(&arg)).is_some() {
                    bail!("more than one drawing given");
                }
            }
        }
    }

    options.drawing = drawing.ok_or_else(|| anyhow!("no drawing given"))?;
    Ok(Command::Run(options))
}

fn value(flag: &str, next: Option<String>) -> Result<PathBuf> {
    next.map(PathBuf::from)
        .ok_or_else(|| anyhow!("option '{}' needs a file name", flag))
}
