use clap::Parser;
use tally::cli::commands::Cli;
use tally::cli::handlers;

fn main() {
    let cli = Cli::parse();

    match handlers::dispatch(cli) {
        Ok(true) => {}
        // Each failed line was already reported
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
