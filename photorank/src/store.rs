use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashSet},
    io,
    path::{Path, PathBuf},
};

use photorank_common::utils::{fsutils, percent::Percent64};
use serde::{Deserialize, Serialize};

/// The score every photo starts out with
pub const BASE_SCORE: f64 = 1400.0;

pub const TABLE_FILENAME: &str = "ranking_table.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read the rating table at {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("the rating table at {path:?} is corrupt")]
    CorruptState {
        path: PathBuf,
        #[source]
        source: CorruptError,
    },
    #[error("failed to write the rating table to {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CorruptError {
    #[error("not the expected json")]
    Json(#[from] serde_json::Error),
    #[error("'{0}' occurs more than once")]
    Duplicate(String),
    #[error("a record has an empty filename")]
    EmptyFilename,
    #[error("'{0}' has won more matches than it has played")]
    WinsExceedMatches(String),
    #[error("'{0}' does not have a finite score")]
    NonFiniteScore(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    filename: String,
    matches: u32,
    wins: u32,
    score: f64,
}

impl PhotoRecord {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            matches: 0,
            wins: 0,
            score: BASE_SCORE,
        }
    }

    /// A record with some history, checked the same way as a loaded one.
    pub fn with_stats(
        filename: impl Into<String>,
        score: f64,
        matches: u32,
        wins: u32,
    ) -> Result<Self, CorruptError> {
        let record = Self {
            filename: filename.into(),
            matches,
            wins,
            score,
        };
        record.validate()?;
        Ok(record)
    }

    fn validate(&self) -> Result<(), CorruptError> {
        if self.filename.is_empty() {
            return Err(CorruptError::EmptyFilename);
        }
        if self.wins > self.matches {
            return Err(CorruptError::WinsExceedMatches(self.filename.clone()));
        }
        if !self.score.is_finite() {
            return Err(CorruptError::NonFiniteScore(self.filename.clone()));
        }
        Ok(())
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn win_percentage(&self) -> Percent64 {
        Percent64::of_or_zero(self.wins.into(), self.matches.into())
    }

    /// The only way a record changes, see `elo::Elo::apply`
    pub(crate) fn record_match(&mut self, new_score: f64, won: bool) {
        self.score = new_score;
        self.matches += 1;
        if won {
            self.wins += 1;
        }
    }
}

/// Best first, ties broken by filename
fn report_order(a: &PhotoRecord, b: &PhotoRecord) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.filename.cmp(&b.filename))
}

/// All photos and their ratings, keyed by filename
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingTable {
    records: BTreeMap<String, PhotoRecord>,
}

impl RatingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(
        records: impl IntoIterator<Item = PhotoRecord>,
    ) -> Result<Self, CorruptError> {
        let mut table = Self::new();
        for record in records {
            record.validate()?;
            if table.records.contains_key(&record.filename) {
                return Err(CorruptError::Duplicate(record.filename));
            }
            table.records.insert(record.filename.clone(), record);
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.records.contains_key(filename)
    }

    pub fn get(&self, filename: &str) -> Option<&PhotoRecord> {
        self.records.get(filename)
    }

    pub(crate) fn get_mut(&mut self, filename: &str) -> Option<&mut PhotoRecord> {
        self.records.get_mut(filename)
    }

    /// All filenames in ascending order
    pub fn filenames(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    /// Adds a fresh record for every filename not already present, in sorted order.
    /// Returns how many were added.
    pub fn merge<S: AsRef<str>>(&mut self, discovered: impl IntoIterator<Item = S>) -> usize {
        let mut new: Vec<String> = discovered
            .into_iter()
            .map(|s| s.as_ref().to_owned())
            .filter(|name| !self.records.contains_key(name))
            .collect();
        new.sort();
        new.dedup();

        for name in new.iter() {
            log::debug!("New photo: {name}");
            self.records.insert(name.clone(), PhotoRecord::new(name.clone()));
        }
        new.len()
    }

    /// Removes every record whose filename is not in `keep`. Returns how many were
    /// removed.
    pub fn prune<S: AsRef<str>>(&mut self, keep: impl IntoIterator<Item = S>) -> usize {
        let keep: HashSet<String> = keep.into_iter().map(|s| s.as_ref().to_owned()).collect();
        let before = self.records.len();
        self.records.retain(|name, _| keep.contains(name));
        before - self.records.len()
    }

    /// Records sorted highest score first, ties broken by ascending filename
    pub fn ranked(&self) -> Vec<&PhotoRecord> {
        let mut ranked: Vec<&PhotoRecord> = self.records.values().collect();
        ranked.sort_by(|a, b| report_order(a, b));
        ranked
    }
}

#[derive(Serialize)]
struct PersistedRef<'a> {
    photos: Vec<&'a PhotoRecord>,
}

#[derive(Deserialize)]
struct Persisted {
    photos: Vec<PhotoRecord>,
}

/// The rating table on disk
#[derive(Debug, Clone)]
pub struct RatingStore {
    path: PathBuf,
}

impl RatingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store at its usual place inside the photo directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(TABLE_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the table, or returns an empty one if there is no file yet
    pub fn load(&self) -> Result<RatingTable, StoreError> {
        let contents =
            fsutils::read_optional_file(&self.path).map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;

        let Some(contents) = contents else {
            log::info!("No rating table at {:?}, starting fresh", self.path);
            return Ok(RatingTable::new());
        };

        let table = parse_table(&contents).map_err(|source| StoreError::CorruptState {
            path: self.path.clone(),
            source,
        })?;
        log::info!("Read {} records from {:?}", table.len(), self.path);
        Ok(table)
    }

    pub fn save(&self, table: &RatingTable) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        let json = serialize_table(table).map_err(|e| write_err(e.into()))?;
        fsutils::replace_file(&self.path, json).map_err(write_err)?;
        log::debug!("Saved {} records to {:?}", table.len(), self.path);
        Ok(())
    }
}

fn parse_table(contents: &str) -> Result<RatingTable, CorruptError> {
    let persisted: Persisted = serde_json::from_str(contents)?;
    RatingTable::from_records(persisted.photos)
}

fn serialize_table(table: &RatingTable) -> serde_json::Result<Vec<u8>> {
    let persisted = PersistedRef {
        photos: table.ranked(),
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    persisted.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}
