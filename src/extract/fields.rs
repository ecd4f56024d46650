//! Form-field (key-value) resolution.

use crate::model::{Block, BlockGraph, KeyValuePairs, RelationshipType};

use super::text::child_words;
use super::ExtractOptions;

/// Resolve every KEY block into a `key text → value text` pair.
///
/// Pairs where either side resolves to empty text are skipped. When two keys
/// share the same text, the later one in collection order wins.
pub(crate) fn resolve_pairs(graph: &BlockGraph<'_>, options: &ExtractOptions) -> KeyValuePairs {
    let mut pairs = KeyValuePairs::new();

    for block in graph.blocks().iter().filter(|b| b.is_key()) {
        let key = child_words(graph, block, options);
        let value = value_text(graph, block, options).unwrap_or_default();

        if key.is_empty() || value.is_empty() {
            log::trace!("skipping incomplete field {}", block.id);
            continue;
        }

        if let Some(previous) = pairs.insert(key, value) {
            log::debug!("field {} overwrote earlier value {:?}", block.id, previous);
        }
    }

    pairs
}

/// Text of the first resolvable value block linked from `key`.
fn value_text(graph: &BlockGraph<'_>, key: &Block, options: &ExtractOptions) -> Option<String> {
    graph
        .related(key, &RelationshipType::Value)
        .next()
        .map(|value| child_words(graph, value, options))
}
