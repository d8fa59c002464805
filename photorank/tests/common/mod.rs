// NOTE: every test will complain about the functions it doesn't use
#![allow(unused)]

use std::{fs, io, path::PathBuf};

use photorank::decider::{Decider, MatchUp, Outcome};
use tempfile::TempDir;

/// Returns a fresh temporary directory inside cargo's tmpdir
pub fn tmp_dir() -> TempDir {
    tempfile::tempdir_in(cargo_tmpdir()).expect("could not create temporary dir")
}

/// Returns cargo's tmpdir
pub fn cargo_tmpdir() -> PathBuf {
    PathBuf::from(option_env!("CARGO_TARGET_TMPDIR").expect("no cargo tmpdir???"))
}

/// Creates empty files with the given names, the contents are never looked at
pub fn touch_photos(dir: &TempDir, names: &[&str]) {
    for name in names {
        fs::write(dir.path().join(name), "").expect("could not create photo");
    }
}

/// Always prefers the photo whose name sorts first, and remembers every match-up
#[derive(Default)]
pub struct Alphabetical {
    pub seen: Vec<(String, String, u32)>,
}

impl Decider for Alphabetical {
    fn decide(&mut self, match_up: &MatchUp<'_>) -> io::Result<Outcome> {
        self.seen.push((
            match_up.first.to_owned(),
            match_up.second.to_owned(),
            match_up.round,
        ));
        if match_up.first < match_up.second {
            Ok(Outcome::FirstWins)
        } else {
            Ok(Outcome::SecondWins)
        }
    }
}
