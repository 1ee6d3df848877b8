//! Table rendering utilities for CLI outputs.

use crate::utils::colors::RESET;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub struct Column {
    pub header: String,
    pub max_width: usize,
}

impl Column {
    pub fn new(header: &str, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            max_width,
        }
    }
}

/// A cell is its text plus an optional ANSI color ("" for none).
type Cell = (String, &'static str);

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_colored_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let content = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|(s, _)| UnicodeWidthStr::width(s.as_str()))
                    .max()
                    .unwrap_or(0);
                content
                    .max(UnicodeWidthStr::width(col.header.as_str()))
                    .min(col.max_width)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        // Header
        for (col, w) in self.columns.iter().zip(&widths) {
            out.push_str(&pad(&fit(&col.header, *w), *w));
            out.push(' ');
        }
        out.push('\n');
        out.push_str(&"-".repeat(widths.iter().map(|w| w + 1).sum::<usize>()));
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, w) in widths.iter().enumerate() {
                let (text, color) = row.get(i).map(|(s, c)| (s.as_str(), *c)).unwrap_or(("", ""));
                let cell = pad(&fit(text, *w), *w);
                if color.is_empty() {
                    out.push_str(&cell);
                } else {
                    out.push_str(&format!("{color}{cell}{RESET}"));
                }
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

/// Truncate to `width` display columns, marking the cut with '…'.
fn fit(s: &str, width: usize) -> String {
    if UnicodeWidthStr::width(s) <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}
