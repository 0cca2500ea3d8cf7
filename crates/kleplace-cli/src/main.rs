mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "kleplace", version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the keys of a KLE layout with their grid positions
    Parse {
        /// KLE layout (JSON)
        #[arg(value_name = "LAYOUT")]
        layout: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Move switch and diode footprints to match a KLE layout
    Place {
        /// KLE layout (JSON)
        #[arg(value_name = "LAYOUT")]
        layout: PathBuf,

        /// Board component list (JSON)
        #[arg(short, long, value_name = "BOARD")]
        board: PathBuf,

        /// Placement config (YAML)
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Override the key pitch (mm per grid unit)
        #[arg(long)]
        pitch: Option<f64>,

        /// Override the diode angle in degrees
        #[arg(long)]
        secondary_angle: Option<f64>,

        /// Write the updated board here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return exit_code(&CliError::usage(e.to_string()));
        }
    };

    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse { layout, json } => commands::run_parse(&layout, json),
        Command::Place {
            layout,
            board,
            config,
            pitch,
            secondary_angle,
            output,
        } => commands::run_place(commands::PlaceArgs {
            layout,
            board,
            config,
            pitch,
            secondary_angle,
            output,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code(&e)
        }
    }
}

fn exit_code(e: &CliError) -> ExitCode {
    ExitCode::from(e.code as u8)
}
