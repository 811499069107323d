use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;

use crate::args::Args;
use crate::config::{Experiment, Settings};
use crate::core::{Flock, Selector};
use crate::readwrite::{export_indicator_table, FlockIO, HistoryStore};
use crate::stats::SelectionCounts;

pub struct Runner {
    args: Args,
    settings: Settings,
    flock: Flock,
    rng: StdRng,
}

impl Runner {
    pub fn new(args: Args) -> Result<Runner> {
        Self::setup_logger(&args);

        let settings = Self::load_settings(&args.settings)?;
        let flock = Flock::read(&args.roster, &args.pairs)?;
        log::info!("Loaded flock of {} birds from {}", flock.len(), args.roster);

        let rng = match args.seed {
            Some(seed) => {
                log::info!("Seeding rng with {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            args,
            settings,
            flock,
            rng,
        })
    }

    pub fn start(&mut self) -> Result<()> {
        fs::create_dir_all(&self.args.outdir)?;
        let experiments = self.settings.experiments.clone();
        for experiment in &experiments {
            self.run_experiment(experiment)?;
        }
        log::info!("Finished all experiments.");
        Ok(())
    }

    fn run_experiment(&mut self, experiment: &Experiment) -> Result<()> {
        println!(
            "Running {} rounds of experiment {}...",
            self.settings.rounds, experiment.name
        );
        log::info!(
            "Running experiment {} ({} males, {} females, avoid_mates={})",
            experiment.name,
            experiment.males,
            experiment.females,
            experiment.avoid_mates
        );

        // every experiment starts from a clean history
        let store = HistoryStore::new(self.args.outdir.as_str());
        store.reset()?;

        let bar = match self.args.disable_progress_bar {
            true => None,
            false => {
                let bar = ProgressBar::new(self.settings.rounds as u64);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "[{bar:40}] {pos:>7}/{len:7} [{elapsed_precise} / {duration_precise}] {msg}",
                        )
                        .expect("Unable to create template.")
                        .progress_chars("=> "),
                );
                Some(bar)
            }
        };

        for round in 1..=self.settings.rounds {
            let window = store.load_recent_window()?;
            let mut selector = Selector::new(&self.flock, window, experiment.clone());
            let selection = selector.run(&store, &mut self.rng)?;

            log::info!(
                r###"
    experiment={}
    round={round}
    selection={selection:?}"###,
                experiment.name
            );

            if let Some(bar) = bar.as_ref() {
                bar.set_position(round as u64);
                bar.set_message(selection.join("|"));
            }
        }

        if let Some(bar) = bar {
            bar.finish_with_message("Done.");
        }

        let full_log = store.load_full_log()?;
        let table_path = Path::new(&self.args.outdir).join(format!("{}.csv", experiment.name));
        export_indicator_table(&table_path, &self.flock.names(), &full_log)?;
        log::info!(
            "Wrote {} rounds to {}; selection counts: {:?}",
            full_log.len(),
            table_path.display(),
            full_log.selection_counts()
        );
        Ok(())
    }

    /// Setup logging level and file
    fn setup_logger(args: &Args) {
        let log_level = match args.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        simple_logging::log_to_file(args.log_file.as_str(), log_level).unwrap_or_else(|_| {
            eprintln!("Unable to open log file.");
            std::process::exit(1);
        });
    }

    /// Load settings from file
    fn load_settings(path: &str) -> Result<Settings> {
        let settings = Settings::read_from_file(path)?;
        log::info!("Loaded settings\n{}", settings);
        Ok(settings)
    }
}
