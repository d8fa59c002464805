use std::fmt;

use photorank_common::utils::percent::Percent64;

use crate::store::RatingTable;

pub const REPORT_FILENAME: &str = "ranked.txt";

const HEADERS: [&str; 5] = ["Rank", "Score", "Matches", "Win %", "Filename"];

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub rank: usize,
    pub score: i64,
    pub matches: u32,
    pub win_percentage: Percent64,
    pub filename: String,
}

/// The final ranking, in the same order as the rating table is saved in
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    pub fn from_table(table: &RatingTable) -> Self {
        let rows = table
            .ranked()
            .into_iter()
            .enumerate()
            .map(|(i, record)| ReportRow {
                rank: i + 1,
                score: record.score().round() as i64,
                matches: record.matches(),
                win_percentage: record.win_percentage(),
                filename: record.filename().to_owned(),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    fn cells(&self) -> Vec<[String; 5]> {
        self.rows
            .iter()
            .map(|row| {
                [
                    row.rank.to_string(),
                    row.score.to_string(),
                    row.matches.to_string(),
                    format!("{:.2}", row.win_percentage.as_f64()),
                    row.filename.clone(),
                ]
            })
            .collect()
    }
}

impl fmt::Display for Report {
    /// One header line and one line per photo. Numbers are right aligned, filenames left
    /// aligned and last, so they may contain anything.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.cells();
        let mut widths = HEADERS.map(str::len);
        for row in cells.iter() {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let [rank, score, matches, win, _] = widths;
        writeln!(
            f,
            "{:>rank$}  {:>score$}  {:>matches$}  {:>win$}  {}",
            HEADERS[0], HEADERS[1], HEADERS[2], HEADERS[3], HEADERS[4]
        )?;
        for [c_rank, c_score, c_matches, c_win, c_name] in cells.iter() {
            writeln!(
                f,
                "{c_rank:>rank$}  {c_score:>score$}  {c_matches:>matches$}  {c_win:>win$}  {c_name}"
            )?;
        }
        Ok(())
    }
}
