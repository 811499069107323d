use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the roster (csv with name, cohort, sex).
    #[clap(long, default_value = "birds.csv")]
    pub roster: String,

    /// Path to the pairing list (csv with male, female).
    #[clap(long, default_value = "relationships.csv")]
    pub pairs: String,

    /// Path to settings.
    #[clap(long)]
    pub settings: String,

    /// Path to output directory (history files and exported tables).
    #[clap(long, short, default_value = ".")]
    pub outdir: String,

    /// Seed for the random number generator; random runs when omitted.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Path to log file.
    #[clap(long, default_value = "subflock.log")]
    pub log_file: String,

    /// Verbosity of logging.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Do not show a progress bar.
    #[clap(long)]
    pub disable_progress_bar: bool,
}
