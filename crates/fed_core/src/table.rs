use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub release_date: NaiveDate,
    pub text: String,
}

impl DocumentRecord {
    pub fn new(release_date: NaiveDate, text: impl Into<String>) -> Self {
        Self {
            release_date,
            text: text.into(),
        }
    }
}

/// Date-indexed documents: ascending by release date, one row per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    column: String,
    rows: Vec<DocumentRecord>,
}

/// Output of [`ResultTable::assemble`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    pub table: ResultTable,
    /// Records overwritten by a later record with the same date.
    pub collapsed: usize,
}

impl ResultTable {
    /// Merges records given in index order into a sorted table.
    ///
    /// On equal dates the record that comes later in `records` replaces the
    /// earlier one.
    pub fn assemble(column: impl Into<String>, records: impl IntoIterator<Item = DocumentRecord>) -> Assembled {
        let mut by_date: BTreeMap<NaiveDate, String> = BTreeMap::new();
        let mut collapsed = 0;
        for record in records {
            if by_date.insert(record.release_date, record.text).is_some() {
                collapsed += 1;
            }
        }
        let rows = by_date
            .into_iter()
            .map(|(release_date, text)| DocumentRecord { release_date, text })
            .collect();
        Assembled {
            table: Self {
                column: column.into(),
                rows,
            },
            collapsed,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn rows(&self) -> &[DocumentRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|row| row.release_date).collect()
    }

    pub fn get(&self, release_date: NaiveDate) -> Option<&str> {
        self.rows
            .binary_search_by_key(&release_date, |row| row.release_date)
            .ok()
            .map(|idx| self.rows[idx].text.as_str())
    }

    /// True when rows are strictly ascending, i.e. sorted with unique dates.
    pub fn is_well_formed(&self) -> bool {
        self.rows
            .windows(2)
            .all(|pair| pair[0].release_date < pair[1].release_date)
    }
}

/// Flattens extracted paragraphs into a single line of text.
///
/// Line breaks become spaces, tabs and non-breaking spaces are dropped.
pub fn normalize_document_text(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            '\n' | '\r' => Some(' '),
            '\t' | '\u{a0}' => None,
            other => Some(other),
        })
        .collect::<String>()
        .trim()
        .to_string()
}
