mod config;
mod filter;
mod registry;

use std::io;

use clap::{Parser, Subcommand};

use filter::FilterArgs;
use registry::Registry;

#[derive(Parser)]
#[command(name = "lbutils")]
#[command(version, about = "Query-string filtering for record listings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter a record file with request parameters and print the matches
    Filter(FilterArgs),

    /// Run a registered function by name
    Call {
        /// Registered function name
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let mut out = io::stdout().lock();
    match cli.command {
        Command::Filter(args) => filter::run(&args, &mut out),
        Command::Call { name } => Registry::builtin().call(&name, &mut out),
    }
}
