use std::{collections::VecDeque, fmt, io};

use crate::elo::MatchResult;

/// What the user said about a match-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    FirstWins,
    SecondWins,
    Tie,
    /// Don't count this match-up at all
    Skip,
    /// Stop ranking, keep what has been decided so far
    Abort,
}

impl Outcome {
    /// The result to score, `None` if nothing should be scored
    pub fn result(self) -> Option<MatchResult> {
        match self {
            Outcome::FirstWins => Some(MatchResult::FirstWins),
            Outcome::SecondWins => Some(MatchResult::SecondWins),
            Outcome::Tie => Some(MatchResult::Tie),
            Outcome::Skip | Outcome::Abort => None,
        }
    }
}

/// Two photos to compare and where in the session they are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchUp<'a> {
    pub first: &'a str,
    pub second: &'a str,
    /// 1-based
    pub round: u32,
    pub rounds: u32,
    /// 1-based
    pub index: usize,
    pub count: usize,
}

impl fmt::Display for MatchUp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Round {} / {}, Match Up {} / {}",
            self.round, self.rounds, self.index, self.count
        )
    }
}

/// Something that can pick the better of two photos, usually a human.
pub trait Decider {
    fn decide(&mut self, match_up: &MatchUp<'_>) -> io::Result<Outcome>;
}

impl<F> Decider for F
where
    F: FnMut(&MatchUp<'_>) -> io::Result<Outcome>,
{
    fn decide(&mut self, match_up: &MatchUp<'_>) -> io::Result<Outcome> {
        self(match_up)
    }
}

/// Replays a fixed list of outcomes and aborts once it runs out
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    outcomes: VecDeque<Outcome>,
    asked: usize,
}

impl Scripted {
    pub fn new(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
            asked: 0,
        }
    }

    /// How many times it has been asked
    pub fn asked(&self) -> usize {
        self.asked
    }
}

impl Decider for Scripted {
    fn decide(&mut self, _match_up: &MatchUp<'_>) -> io::Result<Outcome> {
        self.asked += 1;
        Ok(self.outcomes.pop_front().unwrap_or(Outcome::Abort))
    }
}
