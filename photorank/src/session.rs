use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

use photorank_common::args;
use rand::Rng;

use crate::{
    decider::{Decider, MatchUp, Outcome},
    elo::{Elo, InvalidMatchError, Match, K_FACTOR},
    pairing::PairingSelector,
    report::Report,
    store::{RatingStore, RatingTable, StoreError},
};

args! {
    #[derive(Clone, Debug)]
    Session {
        "Number of passes over the whole photo set"
        ['r'] rounds: u32 = 3;

        "How far a single match can move a score"
        k_factor: f64 = K_FACTOR;

        "Drop ratings of photos that are no longer in the directory instead of keeping \
         them around"
        prune: bool = false;

        "Only save the rating table at the very end, not after every round"
        no_round_saves: bool = false;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("rating store")]
    Store(#[from] StoreError),
    #[error("bad match-up")]
    InvalidMatch(#[from] InvalidMatchError),
    #[error("the k-factor must be a non-negative number, got {0}")]
    KFactor(f64),
    #[error("failed to get a decision")]
    Decider(#[source] io::Error),
    #[error("failed to write the report to {path:?}")]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Merging,
    /// 1-based
    RunningRound(u32),
    Reporting,
    Done,
}

/// What happened during `Session::run`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rounds_completed: u32,
    pub matches_played: usize,
    pub matches_skipped: usize,
    pub aborted: bool,
}

/// One execution of the ranking: load, merge, some rounds of matches, report.
pub struct Session<R> {
    args: SessionArgs,
    store: RatingStore,
    table: RatingTable,
    /// Photos that can be paired, i.e., the ones that exist on disk
    active: Vec<String>,
    selector: PairingSelector<R>,
    elo: Elo,
    phase: Phase,
}

impl<R: Rng> Session<R> {
    /// Loads the table from `store` and adds `discovered` to it.
    pub fn open<S: AsRef<str>>(
        store: RatingStore,
        args: SessionArgs,
        discovered: &[S],
        rng: R,
    ) -> Result<Self, SessionError> {
        if !(args.k_factor.is_finite() && args.k_factor >= 0.0) {
            return Err(SessionError::KFactor(args.k_factor));
        }

        log::debug!("Phase: {:?}", Phase::Loading);
        let mut table = store.load()?;

        log::debug!("Phase: {:?}", Phase::Merging);
        let active: Vec<String> = {
            let mut active: Vec<String> =
                discovered.iter().map(|s| s.as_ref().to_owned()).collect();
            active.sort();
            active.dedup();
            active
        };

        let added = table.merge(&active);
        log::info!("Added {added} new photos to the table");

        let present: HashSet<&str> = active.iter().map(String::as_str).collect();
        let stale: Vec<String> = table
            .filenames()
            .filter(|name| !present.contains(name))
            .map(str::to_owned)
            .collect();
        if !stale.is_empty() {
            if args.prune {
                let removed = table.prune(&active);
                log::info!("Removed {removed} photos that are no longer around");
            } else {
                log::warn!(
                    "Keeping {} photos that are no longer around, they won't be shown: {:?}",
                    stale.len(),
                    stale
                );
            }
        }

        Ok(Self {
            elo: Elo::new(args.k_factor),
            args,
            store,
            table,
            active,
            selector: PairingSelector::new(rng),
            phase: Phase::Merging,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn table(&self) -> &RatingTable {
        &self.table
    }

    /// Photos that take part in the matches
    pub fn active(&self) -> &[String] {
        &self.active
    }

    /// Plays all rounds, or until `decider` aborts.
    pub fn run(&mut self, decider: &mut impl Decider) -> Result<RunSummary, SessionError> {
        let mut summary = RunSummary::default();
        let rounds = self.args.rounds;

        if self.active.len() < 2 {
            log::warn!(
                "Need at least two photos to compare, have {}",
                self.active.len()
            );
            return Ok(summary);
        }

        'rounds: for round in 1..=rounds {
            self.phase = Phase::RunningRound(round);
            let pairs = self.selector.next_round(&self.active);
            log::info!(
                "Round {round}/{rounds}: {} match-ups over {} photos",
                pairs.len(),
                self.active.len()
            );

            for (i, (first, second)) in pairs.iter().enumerate() {
                let match_up = MatchUp {
                    first,
                    second,
                    round,
                    rounds,
                    index: i + 1,
                    count: pairs.len(),
                };

                let outcome = decider.decide(&match_up).map_err(SessionError::Decider)?;
                if outcome == Outcome::Abort {
                    log::warn!("Aborting in the middle of round {round}");
                    summary.aborted = true;
                    break 'rounds;
                }
                let Some(result) = outcome.result() else {
                    log::debug!("Skipped {first} vs {second}");
                    summary.matches_skipped += 1;
                    continue;
                };

                self.elo.apply(
                    &mut self.table,
                    &Match {
                        first,
                        second,
                        result,
                    },
                )?;
                summary.matches_played += 1;
            }

            summary.rounds_completed = round;
            if !self.args.no_round_saves {
                self.store.save(&self.table)?;
            }
        }

        log::info!(
            "Played {} matches in {} complete rounds",
            summary.matches_played,
            summary.rounds_completed
        );
        Ok(summary)
    }

    /// Saves the table, writes the report to `report_path` and returns it.
    pub fn finish(mut self, report_path: impl AsRef<Path>) -> Result<Report, SessionError> {
        let report_path = report_path.as_ref();
        self.phase = Phase::Reporting;
        log::debug!("Phase: {:?}", self.phase);

        self.store.save(&self.table)?;
        log::info!("Saved the rating table to {:?}", self.store.path());

        let report = Report::from_table(&self.table);
        std::fs::write(report_path, report.to_string()).map_err(|source| {
            SessionError::Report {
                path: report_path.to_owned(),
                source,
            }
        })?;
        log::info!("Wrote the ranking to {:?}", report_path);

        self.phase = Phase::Done;
        log::debug!("Phase: {:?}", self.phase);
        Ok(report)
    }
}
