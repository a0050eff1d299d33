//! `flycam` binary: opens a window and flies a camera around spinning
//! textured cubes.
//!
//! Mouse looks around, `W`/`A`/`S`/`D` move, `Space`/`Left Shift` rise and
//! sink, `Escape` quits. Keys and everything else are configurable through
//! a TOML options file.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use flycam::{Options, Viewer};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "flycam", version, about)]
struct Cli {
    /// Options preset (TOML) to load; missing fields use defaults.
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Write the default options to FILE and exit.
    #[arg(long, value_name = "FILE")]
    write_default_options: Option<PathBuf>,

    /// Print the options JSON Schema to stdout and exit.
    #[arg(long)]
    print_schema: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.print_schema {
        let printed = Options::json_schema_pretty().and_then(|schema| {
            writeln!(std::io::stdout().lock(), "{schema}").map_err(Into::into)
        });
        return match printed {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    if let Some(path) = cli.write_default_options {
        return match Options::default().save(&path) {
            Ok(()) => {
                log::info!("wrote default options to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    let options = match cli.options {
        Some(path) => match Options::load(&path) {
            Ok(options) => options,
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Options::default(),
    };

    match Viewer::builder().with_options(options).build().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
