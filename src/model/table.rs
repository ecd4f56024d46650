//! Table types.

use serde::{Deserialize, Serialize};

/// A table recovered from TABLE/CELL blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Page the table sits on (1-indexed)
    pub page: u32,

    /// Cell text, row-major; missing cells are empty strings
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with a blank grid of the given size.
    pub fn with_size(page: u32, rows: usize, columns: usize) -> Self {
        Self {
            page,
            rows: vec![vec![String::new(); columns]; rows],
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by 0-indexed position.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
