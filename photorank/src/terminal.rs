use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::{Child, Command, Stdio},
    time::Instant,
};

use photorank_common::bin_common::termination::Interrupt;

use crate::{
    decider::{Decider, MatchUp, Outcome},
    preview::{self, Preview},
};

const PROMPT: &str = "Which is better? [1/left, 2/right, t/tie, s/skip, q/quit]: ";
const GAP: usize = 4;

/// Parses an answer to the prompt, `None` if it is gibberish
pub fn parse_answer(answer: &str) -> Option<Outcome> {
    match answer.trim().to_lowercase().as_str() {
        "1" | "l" | "left" | "a" => Some(Outcome::FirstWins),
        "2" | "r" | "right" | "b" => Some(Outcome::SecondWins),
        "t" | "tie" | "=" => Some(Outcome::Tie),
        "s" | "skip" => Some(Outcome::Skip),
        "q" | "quit" | "exit" => Some(Outcome::Abort),
        _ => None,
    }
}

/// Shows both photos in the terminal and asks which one is better.
pub struct TerminalDecider<I, O> {
    input: I,
    output: O,
    photo_dir: PathBuf,
    /// Size of each preview, `None` to not draw any
    preview_size: Option<(u32, u32)>,
    viewer: Option<String>,
    /// Viewers that haven't been waited on yet
    viewers: Vec<Child>,
    interrupt: Interrupt,
}

impl<I: BufRead, O: Write> TerminalDecider<I, O> {
    pub fn new(input: I, output: O, photo_dir: impl Into<PathBuf>, interrupt: Interrupt) -> Self {
        Self {
            input,
            output,
            photo_dir: photo_dir.into(),
            preview_size: None,
            viewer: None,
            viewers: Vec::new(),
            interrupt,
        }
    }

    pub fn with_previews(mut self, columns: u32, rows: u32) -> Self {
        self.preview_size = Some((columns, rows));
        self
    }

    /// Also open both photos with this program, like `xdg-open`
    pub fn with_viewer(mut self, viewer: impl Into<String>) -> Self {
        self.viewer = Some(viewer.into());
        self
    }

    fn preview(&self, filename: &str, columns: u32, rows: u32) -> Preview {
        let path = self.photo_dir.join(filename);
        match Preview::open(&path, columns, rows) {
            Ok(preview) => preview,
            Err(e) => {
                log::warn!("Could not read {}: {e}", path.display());
                Preview::placeholder(&format!("<unreadable: {e}>"), columns)
            }
        }
    }

    fn open_in_viewer(&mut self, filename: &str) {
        let Some(viewer) = &self.viewer else {
            return;
        };
        let path = self.photo_dir.join(filename);
        let spawned = Command::new(viewer)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => self.viewers.push(child),
            Err(e) => log::warn!("Failed to run '{viewer}' on {}: {e}", path.display()),
        }
    }

    /// Waits on the viewers that have exited, the rest are left running
    fn reap_viewers(&mut self) {
        self.viewers.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                log::trace!("Viewer {} exited with {status}", child.id());
                false
            }
            Ok(None) => true,
            Err(e) => {
                log::warn!("Failed to check on viewer {}: {e}", child.id());
                false
            }
        });
    }

    fn show(&mut self, match_up: &MatchUp<'_>) -> io::Result<()> {
        self.reap_viewers();
        writeln!(self.output)?;
        writeln!(self.output, "{match_up}")?;

        if let Some((columns, rows)) = self.preview_size {
            let left = self.preview(match_up.first, columns, rows);
            let right = self.preview(match_up.second, columns, rows);
            write!(self.output, "{}", preview::side_by_side(&left, &right, GAP))?;
            writeln!(
                self.output,
                "{:<width$}{}",
                "1: left",
                "2: right",
                width = left.width() + GAP
            )?;
        }

        writeln!(self.output, "1: {}", match_up.first)?;
        writeln!(self.output, "2: {}", match_up.second)?;

        self.open_in_viewer(match_up.first);
        self.open_in_viewer(match_up.second);
        Ok(())
    }
}

impl<I: BufRead, O: Write> Decider for TerminalDecider<I, O> {
    fn decide(&mut self, match_up: &MatchUp<'_>) -> io::Result<Outcome> {
        if self.interrupt.is_requested() {
            return Ok(Outcome::Abort);
        }

        self.show(match_up)?;
        let before = Instant::now();

        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            let mut answer = String::new();
            let read = self.input.read_line(&mut answer)?;
            if self.interrupt.is_requested() {
                log::warn!("Interrupted");
                return Ok(Outcome::Abort);
            }
            if read == 0 {
                log::info!("No more input");
                return Ok(Outcome::Abort);
            }

            match parse_answer(&answer) {
                Some(outcome) => {
                    log::trace!(
                        "Decided {outcome:?} in {}",
                        humantime::format_duration(before.elapsed())
                    );
                    return Ok(outcome);
                }
                None => writeln!(self.output, "Didn't get that: {:?}", answer.trim())?,
            }
        }
    }
}
