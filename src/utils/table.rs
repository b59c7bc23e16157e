//! Table rendering utilities for CLI outputs.
//!
//! Cell widths are measured in terminal columns, ignoring ANSI color codes,
//! so colored outcome labels line up with plain text.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad_cell(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad_cell(cell, col.width));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

/// Display width of `s` with ANSI escape sequences removed.
pub fn visible_width(s: &str) -> usize {
    let mut plain = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // skip through the terminating 'm'
            for esc in chars.by_ref() {
                if esc == 'm' {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    UnicodeWidthStr::width(plain.as_str())
}

fn pad_cell(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{}{}", s, " ".repeat(pad))
}
