// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`oifits`: validate and merge OIFITS optical/infrared interferometry files.
*/

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info, warn};
use thiserror::Error;

use oifits::filter::{FilterSpec, VisIter};
use oifits::{merge_datasets, read_fits, run_all, write_fits, CheckResult, OifitsError, Severity};

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Oifits(#[from] OifitsError),

    #[error("I/O error: {0}")]
    IO(#[from] std::io::Error),

    #[error("malformed filter file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[clap(name = "oifits", author, version, about)]
struct Cli {
    /// Verbosity: -v for debug, -vv for trace.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a file against the OIFITS exchange-format standard.
    Check {
        file: PathBuf,

        /// Print the report as JSON instead of human-readable text.
        #[clap(long)]
        json: bool,

        /// Optional JSON file deserialized into a FilterSpec, used only to
        /// report how many VIS records the filter would pass.
        #[clap(long)]
        filter_file: Option<PathBuf>,
    },

    /// Merge two or more files into one.
    Merge {
        output: PathBuf,

        #[clap(required = true, min_values = 2)]
        inputs: Vec<PathBuf>,
    },
}

fn setup_logging(level: u8) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match level {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .chain(std::io::stdout())
        .apply()
}

fn load_filter(path: &Option<PathBuf>) -> Result<FilterSpec, CliError> {
    match path {
        Some(p) => {
            let contents = std::fs::read_to_string(p)?;
            Ok(serde_json::from_str(&contents)?)
        }
        None => Ok(FilterSpec::default()),
    }
}

fn print_report_human(results: &[CheckResult]) {
    for r in results {
        if r.severity == Severity::None {
            continue;
        }
        println!("[{:?}] {}: {}", r.severity, r.name, r.description);
        for loc in &r.locations {
            println!("    {loc}");
        }
    }
}

fn check(file: PathBuf, json: bool, filter_file: Option<PathBuf>) -> Result<Severity, CliError> {
    let path = file.to_string_lossy().into_owned();
    let dataset = read_fits(&path)?;
    let (severity, results) = run_all(&dataset);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("{path}: worst severity {severity:?}");
        print_report_human(&results);
    }

    if let Some(ff) = &filter_file {
        let spec = load_filter(&Some(ff.clone()))?;
        let mut iter = VisIter::new(&dataset, &spec)
            .map_err(|e| CliError::Oifits(OifitsError::from(e)))?;
        let mut count = 0;
        while iter.advance().is_some() {
            count += 1;
        }
        info!("filter '{}' accepts {count} VIS channel(s)", ff.display());
    }

    Ok(severity)
}

fn merge(output: PathBuf, inputs: Vec<PathBuf>) -> Result<(), CliError> {
    let datasets = inputs
        .iter()
        .map(|p| read_fits(&p.to_string_lossy()))
        .collect::<Result<Vec<_>, _>>()?;
    let merged = merge_datasets(&datasets).map_err(OifitsError::from)?;
    write_fits(&output.to_string_lossy(), &merged)?;
    info!("wrote merged dataset to {}", output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = setup_logging(cli.verbosity) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match cli.command {
        Command::Check {
            file,
            json,
            filter_file,
        } => match check(file, json, filter_file) {
            Ok(severity) => {
                if severity >= Severity::NotOifits {
                    ExitCode::FAILURE
                } else {
                    if severity == Severity::Warning {
                        warn!("file has warnings but is conformant");
                    }
                    ExitCode::SUCCESS
                }
            }
            Err(e) => {
                error!("{e}");
                ExitCode::FAILURE
            }
        },

        Command::Merge { output, inputs } => match merge(output, inputs) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{e}");
                ExitCode::FAILURE
            }
        },
    }
}
