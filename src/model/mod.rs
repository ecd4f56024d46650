//! Data model for OCR block graphs and what is extracted from them.
//!
//! Blocks arrive as a flat collection referencing each other by id.
//! [`BlockGraph`] indexes that collection so traversal resolves ids instead
//! of holding references between blocks.

mod block;
mod graph;
mod pairs;
mod table;

pub use block::{Block, BlockType, EntityType, Relationship, RelationshipType};
pub use graph::BlockGraph;
pub use pairs::KeyValuePairs;
pub use table::Table;
