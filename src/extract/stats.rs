//! Page and confidence statistics over a block collection.

use crate::model::Block;
use std::collections::HashSet;

/// Number of distinct page numbers, counting a missing page as page 1.
pub fn page_count(blocks: &[Block]) -> u32 {
    blocks
        .iter()
        .map(Block::page_number)
        .collect::<HashSet<_>>()
        .len() as u32
}

/// Mean confidence over blocks that carry one, rounded to 2 decimals.
///
/// Returns 0 when no block has a confidence.
pub fn average_confidence(blocks: &[Block]) -> f64 {
    let (sum, count) = blocks
        .iter()
        .filter_map(|b| b.confidence)
        .fold((0.0, 0usize), |(sum, count), c| (sum + c, count + 1));

    if count == 0 {
        return 0.0;
    }
    round2(sum / count as f64)
}

/// Round to 2 decimal places, ties to even.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_defaults_missing_to_one() {
        let blocks = vec![
            Block::line("a", "x"),
            Block::line("b", "y").with_page(1),
            Block::line("c", "z").with_page(3),
        ];
        assert_eq!(page_count(&blocks), 2);
    }

    #[test]
    fn test_page_count_empty() {
        assert_eq!(page_count(&[]), 0);
    }

    #[test]
    fn test_average_confidence() {
        let blocks = vec![
            Block::word("a", "x").with_confidence(90.0),
            Block::word("b", "y").with_confidence(80.0),
            Block::word("c", "z").with_confidence(70.0),
            Block::word("d", "unscored"),
        ];
        assert_eq!(average_confidence(&blocks), 80.0);
    }

    #[test]
    fn test_average_confidence_rounding() {
        let blocks = vec![
            Block::word("a", "x").with_confidence(99.123),
            Block::word("b", "y").with_confidence(98.0),
        ];
        assert_eq!(average_confidence(&blocks), 98.56);
    }

    #[test]
    fn test_average_confidence_none() {
        let blocks = vec![Block::line("a", "x"), Block::line("b", "y")];
        assert_eq!(average_confidence(&blocks), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.987654), 0.99);
        assert_eq!(round2(12.0), 12.0);
    }

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(80.125), 80.12);
        assert_eq!(round2(80.375), 80.38);
        assert_eq!(round2(80.625), 80.62);
    }

    #[test]
    fn test_average_confidence_exact_tie() {
        let blocks = vec![
            Block::word("a", "x").with_confidence(80.25),
            Block::word("b", "y").with_confidence(80.0),
        ];
        assert_eq!(average_confidence(&blocks), 80.12);
    }
}
