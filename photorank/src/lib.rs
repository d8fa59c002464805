//! Ranks photos by asking which one of two is better, over and over, and keeping an Elo
//! score per photo. Scores are kept in a JSON file next to the photos so that ranking can
//! continue where it left off, also after new photos have been added.

pub mod decider;
pub mod discover;
pub mod elo;
pub mod pairing;
pub mod preview;
pub mod report;
pub mod session;
pub mod store;
pub mod terminal;
