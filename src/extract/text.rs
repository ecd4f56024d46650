//! Text assembly from LINE and WORD blocks.

use crate::model::{Block, BlockGraph, BlockType, RelationshipType};

use super::ExtractOptions;

/// Join the text of every LINE block with single spaces, in collection order.
pub(crate) fn line_text(graph: &BlockGraph<'_>, options: &ExtractOptions) -> String {
    graph
        .blocks()
        .iter()
        .filter(|b| b.block_type == BlockType::Line && options.accepts(b))
        .map(Block::text_or_empty)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join the text of `block`'s WORD children with single spaces, in edge order.
///
/// Children that are missing or not WORD blocks contribute nothing.
pub(crate) fn child_words(
    graph: &BlockGraph<'_>,
    block: &Block,
    options: &ExtractOptions,
) -> String {
    graph
        .related(block, &RelationshipType::Child)
        .filter(|child| child.block_type == BlockType::Word && options.accepts(child))
        .map(Block::text_or_empty)
        .collect::<Vec<_>>()
        .join(" ")
}
