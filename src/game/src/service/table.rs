//! Box-drawn tables in the layout of a browser devtools `console.table`.

use std::fmt;

use common::model::game::{RoundResult, ScoreState};

pub const ROUND_HEADERS: [&str; 5] = [
    "Your choice",
    "Computer choice",
    "Outcome",
    "Your score",
    "Computer score",
];

const INDEX_HEADER: &str = "(index)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(u32),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => write!(f, "'{}'", text),
            Cell::Number(number) => write!(f, "{}", number),
        }
    }
}

/// Rows are prefixed with their position in an `(index)` column.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<H: ToString>(headers: impl IntoIterator<Item = H>) -> Self {
        Table {
            headers: headers.into_iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_row(mut self, row: Vec<Cell>) -> Self {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
        self
    }

    fn grid(&self) -> (Vec<String>, Vec<Vec<String>>) {
        let header = std::iter::once(INDEX_HEADER.to_owned())
            .chain(self.headers.iter().cloned())
            .collect();
        let body = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                std::iter::once(index.to_string())
                    .chain(row.iter().map(|cell| cell.to_string()))
                    .collect()
            })
            .collect();
        (header, body)
    }
}

fn border(f: &mut fmt::Formatter<'_>, widths: &[usize], chars: [char; 3]) -> fmt::Result {
    let [left, middle, right] = chars;
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    writeln!(f, "{}{}{}", left, segments.join(middle.to_string().as_str()), right)
}

fn line(f: &mut fmt::Formatter<'_>, widths: &[usize], cells: &[String]) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!(" {:<width$} ", cell, width = *width))
        .collect();
    writeln!(f, "│{}│", padded.join("│"))
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (header, body) = self.grid();
        let widths: Vec<usize> = (0..header.len())
            .map(|column| {
                std::iter::once(&header)
                    .chain(body.iter())
                    .map(|cells| cells[column].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        border(f, &widths, ['┌', '┬', '┐'])?;
        line(f, &widths, &header)?;
        border(f, &widths, ['├', '┼', '┤'])?;
        for cells in body.iter() {
            line(f, &widths, cells)?;
        }
        border(f, &widths, ['└', '┴', '┘'])
    }
}

/// The per-round progress report: both moves, the outcome and the score after the round.
pub fn round_table(round: &RoundResult, score: &ScoreState) -> Table {
    Table::new(ROUND_HEADERS).with_row(vec![
        Cell::Text(round.player_move.to_string()),
        Cell::Text(round.computer_move.to_string()),
        Cell::Text(round.outcome.to_string()),
        Cell::Number(score.player_score),
        Cell::Number(score.computer_score),
    ])
}
