//! Plain text rendering for extraction results.

use crate::extract::ExtractionResult;

/// Render an extraction result as plain text.
///
/// The full text comes first, then one `key: value` line per form field,
/// then each table as tab-separated rows. Sections are separated by a blank
/// line and omitted when empty.
pub fn to_text(result: &ExtractionResult) -> String {
    let mut sections = Vec::new();

    if !result.full_text.is_empty() {
        sections.push(result.full_text.clone());
    }

    if !result.key_value_pairs.is_empty() {
        sections.push(
            result
                .key_value_pairs
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }

    sections.extend(
        result
            .tables
            .iter()
            .filter(|t| !t.is_empty())
            .map(|t| t.plain_text()),
    );

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{KeyValuePairs, Table};

    #[test]
    fn test_to_text() {
        let mut table = Table::with_size(1, 1, 2);
        table.rows[0] = vec!["Item".into(), "Qty".into()];

        let result = ExtractionResult {
            full_text: "Invoice 42".to_string(),
            key_value_pairs: [("Invoice", "42")].into_iter().collect::<KeyValuePairs>(),
            tables: vec![table],
            ..Default::default()
        };

        assert_eq!(to_text(&result), "Invoice 42\n\nInvoice: 42\n\nItem\tQty");
    }

    #[test]
    fn test_to_text_empty() {
        assert_eq!(to_text(&ExtractionResult::default()), "");
    }
}
