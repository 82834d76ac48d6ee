mod compare;
mod run;
mod util;

use anyhow::Result;
use clap::{Parser, Subcommand};
use compare::{run_compare, CompareArgs};
use run::{run_board, RunArgs};

#[derive(Parser, Debug)]
#[command(version, about)]
struct CLIParser {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Run a single board until it dies out or the iteration bound is reached
    Run(RunArgs),
    /// Run the same random board in every representation and compare time and memory
    Compare(CompareArgs),
}

fn main() -> Result<()> {
    let args = CLIParser::parse();

    match args.action {
        Action::Run(args) => run_board(args),
        Action::Compare(args) => run_compare(args),
    }
}
