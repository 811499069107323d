//! Selector module
//!
//! One `Selector` produces one quota-balanced round of selections from a
//! flock. Candidates come from three prioritized draw sources: the primary
//! pool of the sex being filled, then birds deferred because they were
//! selected two rounds ago, then birds deferred because they were selected
//! last round. Drawing the older tier first biases the round toward birds
//! with the longest time since their last selection.
//!
//! Pool draws are screened against the mate set of the selection so far
//! (when mate avoidance is on) and against the recent window. Fallback
//! draws are accepted as-is; once the pool is dry there is nothing better
//! left to hold out for.

use rand::Rng;

use crate::config::Experiment;
use crate::core::bird::{Bird, Sex};
use crate::core::flock::Flock;
use crate::core::window::{Recency, RecentWindow, WINDOW_ROUNDS};
use crate::errors::{Result, SubflockError};

/// Where a completed round is recorded.
///
/// Both writes must be durable before [`Selector::run`] returns, so the
/// next round sees a consistent history.
pub trait HistorySink {
    fn save_window(&self, window: &RecentWindow) -> Result<()>;
    fn append_round(&self, round: &[String]) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tier {
    Pool,
    DeferredOlder,
    DeferredNewest,
}

/// Prioritized draw sources for one sex within one round.
struct DrawSources<'a> {
    pool: Vec<&'a Bird>,
    deferred_older: Vec<&'a Bird>,
    deferred_newest: Vec<&'a Bird>,
}

impl<'a> DrawSources<'a> {
    fn new(pool: Vec<&'a Bird>) -> Self {
        Self {
            pool,
            deferred_older: Vec::new(),
            deferred_newest: Vec::new(),
        }
    }

    /// Draw uniformly from the first non-empty source, removing the bird.
    fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<(&'a Bird, Tier)> {
        let sources = [
            (&mut self.pool, Tier::Pool),
            (&mut self.deferred_older, Tier::DeferredOlder),
            (&mut self.deferred_newest, Tier::DeferredNewest),
        ];
        for (source, tier) in sources {
            if !source.is_empty() {
                let index = rng.random_range(0..source.len());
                return Some((source.swap_remove(index), tier));
            }
        }
        None
    }

    /// Put a recently-selected bird behind the pool, by recency tier.
    fn defer(&mut self, bird: &'a Bird, recency: Recency) {
        match recency {
            Recency::Older => self.deferred_older.push(bird),
            Recency::Newest => self.deferred_newest.push(bird),
        }
    }
}

/// Runs one selection round against a flock.
pub struct Selector<'a> {
    flock: &'a Flock,
    window: RecentWindow,
    experiment: Experiment,
}

impl<'a> Selector<'a> {
    pub fn new(flock: &'a Flock, window: RecentWindow, experiment: Experiment) -> Self {
        Self {
            flock,
            window,
            experiment,
        }
    }

    /// The recent window, including the round just produced after `run`.
    pub fn window(&self) -> &RecentWindow {
        &self.window
    }

    /// Produce one round, record it in the sink, and return the sorted
    /// selected names.
    pub fn run<R, S>(&mut self, sink: &S, rng: &mut R) -> Result<Vec<String>>
    where
        R: Rng,
        S: HistorySink,
    {
        let mut selection: Vec<&Bird> = Vec::new();
        for sex in [Sex::Female, Sex::Male] {
            self.fill_sex(sex, &mut selection, rng)?;
        }

        let mut names: Vec<String> = selection.iter().map(|bird| bird.name.clone()).collect();
        names.sort();

        self.window.push(names.clone());
        sink.save_window(&self.window)?;
        sink.append_round(&names)?;

        Ok(names)
    }

    fn fill_sex<R: Rng>(
        &self,
        sex: Sex,
        selection: &mut Vec<&'a Bird>,
        rng: &mut R,
    ) -> Result<()> {
        let quota = self.experiment.quota(sex);
        let mut sources = DrawSources::new(self.flock.of_sex(sex));
        let mut mates = self
            .flock
            .mates_of(selection.iter().map(|bird| bird.name.as_str()))?;

        let mut selected = 0;
        while selected < quota {
            let (bird, tier) = sources.draw(rng).ok_or_else(|| {
                SubflockError::FlockExhausted(format!(
                    "needed {quota} birds of sex {sex}, ran out after {selected}"
                ))
            })?;

            if tier == Tier::Pool {
                if self.experiment.avoid_mates && mates.contains(&bird.name) {
                    log::debug!("dropping {}: mate of a selected bird", bird.name);
                    continue;
                }
                match self.window.recency(&bird.name) {
                    None => {}
                    // with a partial window there is no older round to
                    // wait for, so a recent bird is simply dropped
                    Some(_) if self.window.len() < WINDOW_ROUNDS => {
                        log::debug!("dropping {}: selected last round", bird.name);
                        continue;
                    }
                    Some(recency) => {
                        sources.defer(bird, recency);
                        continue;
                    }
                }
            }

            log::debug!("selected {} ({:?})", bird.name, tier);
            selection.push(bird);
            mates = self
                .flock
                .mates_of(selection.iter().map(|bird| bird.name.as_str()))?;
            selected += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// In-memory sink for exercising rounds without touching disk.
    #[derive(Default)]
    struct MemorySink {
        window: RefCell<RecentWindow>,
        log: RefCell<Vec<Vec<String>>>,
    }

    impl HistorySink for MemorySink {
        fn save_window(&self, window: &RecentWindow) -> Result<()> {
            *self.window.borrow_mut() = window.clone();
            Ok(())
        }

        fn append_round(&self, round: &[String]) -> Result<()> {
            self.log.borrow_mut().push(round.to_vec());
            Ok(())
        }
    }

    fn experiment(males: usize, females: usize, avoid_mates: bool) -> Experiment {
        Experiment {
            name: "test".to_string(),
            males,
            females,
            avoid_mates,
        }
    }

    fn flock(males: &[&str], females: &[&str]) -> Flock {
        let mut flock = Flock::new();
        for (cohort, name) in males.iter().enumerate() {
            flock.push(Bird::new(*name, cohort as i32, Sex::Male));
        }
        for (cohort, name) in females.iter().enumerate() {
            flock.push(Bird::new(*name, cohort as i32, Sex::Female));
        }
        flock
    }

    fn count_of_sex(flock: &Flock, names: &[String], sex: Sex) -> usize {
        names
            .iter()
            .filter(|name| flock.get(name).unwrap().sex == sex)
            .count()
    }

    #[test]
    fn quotas_met_with_empty_history() {
        let flock = flock(&["a", "b", "c"], &["d", "e", "f", "g"]);
        let sink = MemorySink::default();
        let mut rng = StdRng::seed_from_u64(7);

        let mut selector = Selector::new(&flock, RecentWindow::new(), experiment(1, 1, false));
        let names = selector.run(&sink, &mut rng).unwrap();

        assert_eq!(names.len(), 2);
        assert_eq!(count_of_sex(&flock, &names, Sex::Male), 1);
        assert_eq!(count_of_sex(&flock, &names, Sex::Female), 1);
        for name in &names {
            assert!(flock.get(name).is_ok());
        }
    }

    #[test]
    fn selection_is_sorted_and_distinct() {
        let flock = flock(&["m1", "m2", "m3", "m4"], &["f1", "f2", "f3", "f4", "f5"]);
        let sink = MemorySink::default();
        let mut rng = StdRng::seed_from_u64(42);

        let mut selector = Selector::new(&flock, RecentWindow::new(), experiment(3, 4, false));
        let names = selector.run(&sink, &mut rng).unwrap();

        assert_eq!(names.len(), 7);
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(count_of_sex(&flock, &names, Sex::Male), 3);
        assert_eq!(count_of_sex(&flock, &names, Sex::Female), 4);
    }

    #[test]
    fn avoid_mates_never_coselects_pairs() {
        let mut flock = flock(&["m1", "m2"], &["f1"]);
        flock.pair("m1", "f1").unwrap();

        for seed in 0..20 {
            let sink = MemorySink::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut selector =
                Selector::new(&flock, RecentWindow::new(), experiment(1, 1, true));
            let names = selector.run(&sink, &mut rng).unwrap();
            // f1 fills the female quota, so her mate m1 is off the table
            assert_eq!(names, vec!["f1".to_string(), "m2".to_string()]);
        }
    }

    #[test]
    fn mates_allowed_when_avoidance_off() {
        let mut flock = flock(&["m1"], &["f1"]);
        flock.pair("m1", "f1").unwrap();

        let sink = MemorySink::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut selector = Selector::new(&flock, RecentWindow::new(), experiment(1, 1, false));
        let names = selector.run(&sink, &mut rng).unwrap();
        assert_eq!(names, vec!["f1".to_string(), "m1".to_string()]);
    }

    #[test]
    fn single_window_round_blocks_reselection() {
        let flock = flock(&["m1", "m2"], &[]);
        let window = RecentWindow::from_rounds(vec![vec!["m1".to_string()]]);

        for seed in 0..20 {
            let sink = MemorySink::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut selector = Selector::new(&flock, window.clone(), experiment(1, 0, false));
            let names = selector.run(&sink, &mut rng).unwrap();
            assert_eq!(names, vec!["m2".to_string()]);
        }
    }

    #[test]
    fn fallback_prefers_older_round() {
        // both males are in the window, so the quota must be met from the
        // deferred queues; m1 sits in the older round and must win
        let flock = flock(&["m1", "m2"], &[]);
        let window = RecentWindow::from_rounds(vec![
            vec!["m1".to_string()],
            vec!["m2".to_string()],
        ]);

        for seed in 0..20 {
            let sink = MemorySink::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut selector = Selector::new(&flock, window.clone(), experiment(1, 0, false));
            let names = selector.run(&sink, &mut rng).unwrap();
            assert_eq!(names, vec!["m1".to_string()]);
        }
    }

    #[test]
    fn exhaustion_is_an_error_not_a_hang() {
        let flock = flock(&["m1"], &[]);
        let window = RecentWindow::from_rounds(vec![vec!["m1".to_string()]]);

        let sink = MemorySink::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut selector = Selector::new(&flock, window, experiment(1, 0, false));
        match selector.run(&sink, &mut rng) {
            Err(SubflockError::FlockExhausted(_)) => {}
            other => panic!("expected FlockExhausted, got {:?}", other),
        }
    }

    #[test]
    fn exhaustion_when_quota_exceeds_flock() {
        let flock = flock(&["m1", "m2"], &["f1"]);
        let sink = MemorySink::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut selector = Selector::new(&flock, RecentWindow::new(), experiment(3, 1, false));
        match selector.run(&sink, &mut rng) {
            Err(SubflockError::FlockExhausted(_)) => {}
            other => panic!("expected FlockExhausted, got {:?}", other),
        }
    }

    #[test]
    fn round_is_recorded_in_window_and_log() {
        let flock = flock(&["m1", "m2", "m3"], &["f1", "f2", "f3"]);
        let sink = MemorySink::default();
        let mut rng = StdRng::seed_from_u64(11);

        let mut window = RecentWindow::new();
        let mut rounds = Vec::new();
        for _ in 0..4 {
            let mut selector =
                Selector::new(&flock, window.clone(), experiment(1, 1, false));
            let names = selector.run(&sink, &mut rng).unwrap();
            window = selector.window().clone();
            rounds.push(names);
        }

        assert_eq!(window.len(), WINDOW_ROUNDS);
        assert_eq!(window.rounds(), &rounds[rounds.len() - 2..]);
        assert_eq!(*sink.log.borrow(), rounds);
        assert_eq!(*sink.window.borrow(), window);
    }
}
