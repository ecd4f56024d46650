//! Block-level types.
//!
//! Field names follow the OCR service's response shape (`BlockType`, `Id`,
//! `Relationships`, ...) so saved responses deserialize without a mapping layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an OCR block.
///
/// The set is open: types this crate does not act on are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    /// A page container
    Page,
    /// A line of text
    Line,
    /// A single word
    Word,
    /// One side (key or value) of a form field
    KeyValueSet,
    /// A table container
    Table,
    /// A table cell
    Cell,
    /// A checkbox or radio button
    SelectionElement,
    /// Any type not listed above
    Other(String),
}

impl BlockType {
    /// Wire name of this block type.
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Page => "PAGE",
            BlockType::Line => "LINE",
            BlockType::Word => "WORD",
            BlockType::KeyValueSet => "KEY_VALUE_SET",
            BlockType::Table => "TABLE",
            BlockType::Cell => "CELL",
            BlockType::SelectionElement => "SELECTION_ELEMENT",
            BlockType::Other(name) => name,
        }
    }
}

impl From<String> for BlockType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PAGE" => BlockType::Page,
            "LINE" => BlockType::Line,
            "WORD" => BlockType::Word,
            "KEY_VALUE_SET" => BlockType::KeyValueSet,
            "TABLE" => BlockType::Table,
            "CELL" => BlockType::Cell,
            "SELECTION_ELEMENT" => BlockType::SelectionElement,
            _ => BlockType::Other(value),
        }
    }
}

impl From<&str> for BlockType {
    fn from(value: &str) -> Self {
        BlockType::from(value.to_string())
    }
}

impl From<BlockType> for String {
    fn from(value: BlockType) -> Self {
        match value {
            BlockType::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a KEY_VALUE_SET block plays in a form field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    /// The label side of a field
    Key,
    /// The value side of a field
    Value,
    /// Any other role
    Other(String),
}

impl From<String> for EntityType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "KEY" => EntityType::Key,
            "VALUE" => EntityType::Value,
            _ => EntityType::Other(value),
        }
    }
}

impl From<EntityType> for String {
    fn from(value: EntityType) -> Self {
        match value {
            EntityType::Key => "KEY".to_string(),
            EntityType::Value => "VALUE".to_string(),
            EntityType::Other(name) => name,
        }
    }
}

/// Kind of a relationship edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    /// Structural containment (line → words, key → words, table → cells)
    Child,
    /// Key block → value block
    Value,
    /// Any other edge kind
    Other(String),
}

impl From<String> for RelationshipType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "CHILD" => RelationshipType::Child,
            "VALUE" => RelationshipType::Value,
            _ => RelationshipType::Other(value),
        }
    }
}

impl From<RelationshipType> for String {
    fn from(value: RelationshipType) -> Self {
        match value {
            RelationshipType::Child => "CHILD".to_string(),
            RelationshipType::Value => "VALUE".to_string(),
            RelationshipType::Other(name) => name,
        }
    }
}

/// A typed edge from one block to a list of target blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relationship {
    /// Edge kind
    #[serde(rename = "Type")]
    pub kind: RelationshipType,

    /// Target block ids, in edge-list order
    #[serde(default)]
    pub ids: Vec<String>,
}

impl Relationship {
    /// Create a relationship.
    pub fn new<S: Into<String>>(kind: RelationshipType, ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// One annotated unit of an OCR result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    /// Identifier, unique within one OCR response
    pub id: String,

    /// Block kind
    pub block_type: BlockType,

    /// Recognized text (WORD and LINE blocks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Form-field roles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<EntityType>,

    /// Outgoing edges
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,

    /// Page number (1-indexed); absent on single-page responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Recognition confidence in [0, 100]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Row of a CELL block (1-indexed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// Column of a CELL block (1-indexed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,
}

impl Block {
    /// Create a bare block.
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            text: None,
            entity_types: Vec::new(),
            relationships: Vec::new(),
            page: None,
            confidence: None,
            row_index: None,
            column_index: None,
        }
    }

    /// Create a LINE block.
    pub fn line(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockType::Line).with_text(text)
    }

    /// Create a WORD block.
    pub fn word(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockType::Word).with_text(text)
    }

    /// Create a KEY_VALUE_SET block with the KEY role.
    pub fn key(id: impl Into<String>) -> Self {
        Self::new(id, BlockType::KeyValueSet).with_entity_type(EntityType::Key)
    }

    /// Create a KEY_VALUE_SET block with the VALUE role.
    pub fn value(id: impl Into<String>) -> Self {
        Self::new(id, BlockType::KeyValueSet).with_entity_type(EntityType::Value)
    }

    /// Create a TABLE block.
    pub fn table(id: impl Into<String>) -> Self {
        Self::new(id, BlockType::Table)
    }

    /// Create a CELL block at the given (1-indexed) position.
    pub fn cell(id: impl Into<String>, row: u32, column: u32) -> Self {
        let mut block = Self::new(id, BlockType::Cell);
        block.row_index = Some(row);
        block.column_index = Some(column);
        block
    }

    /// Set the text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Add an entity role.
    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_types.push(entity_type);
        self
    }

    /// Add a CHILD relationship.
    pub fn with_children<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.relationships
            .push(Relationship::new(RelationshipType::Child, ids));
        self
    }

    /// Add a VALUE relationship.
    pub fn with_values<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.relationships
            .push(Relationship::new(RelationshipType::Value, ids));
        self
    }

    /// Page number, defaulting to 1 when absent.
    pub fn page_number(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Text of the block, or an empty string.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Check if this block has the given type.
    pub fn is(&self, block_type: &BlockType) -> bool {
        &self.block_type == block_type
    }

    /// Check if this is a KEY_VALUE_SET block carrying the KEY role.
    pub fn is_key(&self) -> bool {
        self.block_type == BlockType::KeyValueSet && self.entity_types.contains(&EntityType::Key)
    }

    /// Target ids of every edge of the given kind, in order.
    pub fn related_ids<'a>(
        &'a self,
        kind: &'a RelationshipType,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.relationships
            .iter()
            .filter(move |r| &r.kind == kind)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_round_trip_names() {
        assert_eq!(BlockType::from("KEY_VALUE_SET"), BlockType::KeyValueSet);
        assert_eq!(BlockType::from("LINE").as_str(), "LINE");
        assert_eq!(
            BlockType::from("MERGED_CELL"),
            BlockType::Other("MERGED_CELL".to_string())
        );
        assert_eq!(String::from(BlockType::Other("QUERY".into())), "QUERY");
    }

    #[test]
    fn test_deserialize_service_shape() {
        let json = r#"{
            "BlockType": "KEY_VALUE_SET",
            "Id": "k1",
            "Confidence": 91.5,
            "EntityTypes": ["KEY"],
            "Relationships": [
                {"Type": "VALUE", "Ids": ["v1"]},
                {"Type": "CHILD", "Ids": ["w1", "w2"]}
            ],
            "Geometry": {"BoundingBox": {"Width": 0.1}}
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();

        assert!(block.is_key());
        assert_eq!(block.page, None);
        assert_eq!(block.page_number(), 1);
        assert_eq!(block.confidence, Some(91.5));
        let children: Vec<_> = block.related_ids(&RelationshipType::Child).collect();
        assert_eq!(children, vec!["w1", "w2"]);
        let values: Vec<_> = block.related_ids(&RelationshipType::Value).collect();
        assert_eq!(values, vec!["v1"]);
    }

    #[test]
    fn test_unknown_relationship_kind_is_kept() {
        let json = r#"{"BlockType": "LINE", "Id": "l1", "Relationships": [{"Type": "ANSWER", "Ids": []}]}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(
            block.relationships[0].kind,
            RelationshipType::Other("ANSWER".to_string())
        );
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let json = serde_json::to_string(&Block::word("w1", "Hello")).unwrap();
        assert_eq!(json, r#"{"Id":"w1","BlockType":"WORD","Text":"Hello"}"#);
    }

    #[test]
    fn test_value_role_is_not_key() {
        assert!(!Block::value("v1").is_key());
        assert!(Block::key("k1").is_key());
        assert!(!Block::new("x", BlockType::Line)
            .with_entity_type(EntityType::Key)
            .is_key());
    }
}
