//! Table reconstruction from TABLE and CELL blocks.

use crate::model::{BlockGraph, BlockType, RelationshipType, Table};

use super::text::child_words;
use super::ExtractOptions;

/// Largest row or column index a cell may carry.
///
/// Cells positioned beyond it are treated like cells without a position.
pub const MAX_TABLE_INDEX: u32 = 1000;

/// Build a [`Table`] for every TABLE block, in collection order.
///
/// The grid is sized by the largest row and column index among the table's
/// cells. Cells without a usable position are ignored; uncovered slots stay
/// empty.
pub(crate) fn resolve_tables(graph: &BlockGraph<'_>, options: &ExtractOptions) -> Vec<Table> {
    graph
        .blocks()
        .iter()
        .filter(|b| b.block_type == BlockType::Table)
        .map(|table_block| {
            let cells: Vec<_> = graph
                .related(table_block, &RelationshipType::Child)
                .filter(|b| b.block_type == BlockType::Cell)
                .filter_map(|cell| match (cell.row_index, cell.column_index) {
                    (Some(row), Some(col)) if in_range(row) && in_range(col) => Some((
                        row as usize - 1,
                        col as usize - 1,
                        child_words(graph, cell, options),
                    )),
                    _ => {
                        log::debug!("skipping cell {} without a usable position", cell.id);
                        None
                    }
                })
                .collect();

            let rows = cells.iter().map(|(r, _, _)| r + 1).max().unwrap_or(0);
            let columns = cells.iter().map(|(_, c, _)| c + 1).max().unwrap_or(0);

            let mut table = Table::with_size(table_block.page_number(), rows, columns);
            for (row, col, text) in cells {
                table.rows[row][col] = text;
            }
            table
        })
        .collect()
}

fn in_range(index: u32) -> bool {
    (1..=MAX_TABLE_INDEX).contains(&index)
}
