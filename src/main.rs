//! zipls - ls inside of a zip file

use clap::Parser;
use std::process;
use zipls::{cli::Cli, list};

/// exit status when some operand could not be found, as `ls` uses
const EXIT_MISSING: i32 = 2;

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(summary) if summary.missing > 0 => process::exit(EXIT_MISSING),
        Ok(_) => {}
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> zipls::Result<list::ListSummary> {
    let options = cli.list_options();
    list::list(&cli.zipfile, &cli.paths, &options, cli.verbose)
}
