//! Command-line interface for brik
//! Parses a `.brik` game description, writes `arbol.ast` next to it and
//! prints the same document as JSON.
//!
//! Usage:
//!   brik `<path>` [--pretty]
//!
//! Exit codes: 0 on success, 1 on I/O, lex or parse failure, 2 on bad
//! invocation.

use std::path::PathBuf;
use std::process::ExitCode;

use brik::export::{self, Format};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "brik", version, about = "Parse a .brik game description into JSON")]
struct Cli {
    /// Path to the .brik source file
    path: PathBuf,

    /// Print indented JSON instead of compact JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    // clap exits with code 2 on usage errors
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let format = if cli.pretty { Format::Pretty } else { Format::Compact };
    match export::export_file(&cli.path, format) {
        Ok((artifact, json)) => {
            log::debug!("artifact written to {}", artifact.display());
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
