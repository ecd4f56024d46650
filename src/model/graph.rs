//! Id-indexed view over a block collection.

use super::{Block, RelationshipType};
use std::collections::HashMap;

/// Arena over a borrowed block collection.
///
/// Blocks reference each other by id; the graph resolves those ids through
/// an index instead of following in-memory links. Collection order is kept.
#[derive(Debug, Clone)]
pub struct BlockGraph<'a> {
    blocks: &'a [Block],
    index: HashMap<&'a str, usize>,
}

impl<'a> BlockGraph<'a> {
    /// Index a block collection.
    ///
    /// Ids are expected to be unique; if one repeats, the first block owns it.
    pub fn new(blocks: &'a [Block]) -> Self {
        let mut index = HashMap::with_capacity(blocks.len());
        for (i, block) in blocks.iter().enumerate() {
            index.entry(block.id.as_str()).or_insert(i);
        }
        Self { blocks, index }
    }

    /// Look up a block by id.
    pub fn get(&self, id: &str) -> Option<&'a Block> {
        self.index.get(id).map(|&i| &self.blocks[i])
    }

    /// All blocks in collection order.
    pub fn blocks(&self) -> &'a [Block] {
        self.blocks
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Resolve the targets of `block`'s edges of the given kind.
    ///
    /// Ids that do not resolve are skipped.
    pub fn related<'g>(
        &'g self,
        block: &'a Block,
        kind: &'g RelationshipType,
    ) -> impl Iterator<Item = &'a Block> + 'g
    where
        'a: 'g,
    {
        block.related_ids(kind).filter_map(move |id| {
            let target = self.get(id);
            if target.is_none() {
                log::trace!("block {} references missing block {}", block.id, id);
            }
            target
        })
    }
}
