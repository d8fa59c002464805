//! Elo rating updates
//!
//! <http://en.wikipedia.org/wiki/Elo_rating_system>

use crate::store::RatingTable;

/// K-factor used unless told otherwise, the maximum a single match can move a score
pub const K_FACTOR: f64 = 32.0;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InvalidMatchError {
    #[error("'{0}' is not in the rating table")]
    UnknownPhoto(String),
    #[error("'{0}' can't be matched against itself")]
    SelfMatch(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    FirstWins,
    SecondWins,
    Tie,
}

impl MatchResult {
    /// Actual score of the first photo, 1 for a win, 0.5 for a tie and 0 for a loss
    pub fn first_score(self) -> f64 {
        match self {
            MatchResult::FirstWins => 1.0,
            MatchResult::SecondWins => 0.0,
            MatchResult::Tie => 0.5,
        }
    }
}

/// A decided comparison between two photos
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    pub first: &'a str,
    pub second: &'a str,
    pub result: MatchResult,
}

/// How much the first photo's score moved, the second moved the same amount the other way
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EloChange(pub f64);

/// Expected score of a player rated `rating` against one rated `opponent`
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((opponent - rating) / 400.0))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elo {
    k_factor: f64,
}

impl Default for Elo {
    fn default() -> Self {
        Self::new(K_FACTOR)
    }
}

impl Elo {
    pub fn new(k_factor: f64) -> Self {
        assert!(k_factor.is_finite() && k_factor >= 0.0);
        Self { k_factor }
    }

    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }

    /// Updates the scores of both photos and counts the match. Nothing is touched if the
    /// match is invalid.
    pub fn apply(
        &self,
        table: &mut RatingTable,
        game: &Match<'_>,
    ) -> Result<EloChange, InvalidMatchError> {
        if game.first == game.second {
            return Err(InvalidMatchError::SelfMatch(game.first.to_owned()));
        }

        let score = |name: &str| {
            table
                .get(name)
                .map(|record| record.score())
                .ok_or_else(|| InvalidMatchError::UnknownPhoto(name.to_owned()))
        };
        let r_first = score(game.first)?;
        let r_second = score(game.second)?;

        let expected = expected_score(r_first, r_second);
        let change = self.k_factor * (game.result.first_score() - expected);

        // NOTE: both new scores come from the old ones, which is what makes this zero-sum
        let (first_won, second_won) = match game.result {
            MatchResult::FirstWins => (true, false),
            MatchResult::SecondWins => (false, true),
            MatchResult::Tie => (false, false),
        };
        table
            .get_mut(game.first)
            .expect("checked above")
            .record_match(r_first + change, first_won);
        table
            .get_mut(game.second)
            .expect("checked above")
            .record_match(r_second - change, second_won);

        log::debug!(
            "{} ({:.1}) vs {} ({:.1}): {:?}, moved {:.2}",
            game.first,
            r_first,
            game.second,
            r_second,
            game.result,
            change
        );

        Ok(EloChange(change))
    }
}
