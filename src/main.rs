use clap::Parser;

use subflock::args::Args;
use subflock::runner::Runner;

fn main() {
    let args = Args::parse();
    let mut runner = Runner::new(args).unwrap_or_else(|err| {
        eprintln!("Unable to initialize runner: {err}.");
        std::process::exit(1);
    });
    runner.start().unwrap_or_else(|err| {
        eprintln!("Run failed: {err}.");
        std::process::exit(1);
    });
}
