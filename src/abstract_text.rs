//! Abstract reconstruction from the OpenAlex inverted-index encoding.
//!
//! OpenAlex ships abstracts as a map from each word to the positions it
//! occupies:
//!
//! ```json
//! {"Despite": [0], "growing": [1], "interest": [2, 50]}
//! ```
//!
//! Rebuilding places every word into its slots and joins the slots with
//! single spaces.
//!
//! Positions that are not non-negative integers, or that exceed
//! [`MAX_ABSTRACT_POSITION`], are dropped before slots are allocated. When two
//! words claim the same position the word visited last wins. Words are visited
//! in key order, so the lexicographically greatest word keeps the slot.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

/// Highest position accepted from a service record.
///
/// Real abstracts stay far below this; larger values are treated like any
/// other invalid position and dropped.
pub const MAX_ABSTRACT_POSITION: usize = 100_000;

/// Word → positions mapping for one abstract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    entries: BTreeMap<String, Vec<usize>>,
}

impl InvertedIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an index from a JSON value. Anything but an object yields an empty index.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        value.as_object().map(Self::from_map).unwrap_or_default()
    }

    /// Reads an index from a JSON object, dropping invalid positions.
    #[must_use]
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut index = Self::new();
        let mut dropped = 0_usize;
        for (word, positions) in map {
            let Some(positions) = positions.as_array() else {
                dropped += 1;
                continue;
            };
            let valid: Vec<usize> = positions
                .iter()
                .filter_map(|position| {
                    let parsed = position
                        .as_u64()
                        .and_then(|p| usize::try_from(p).ok())
                        .filter(|p| *p <= MAX_ABSTRACT_POSITION);
                    if parsed.is_none() {
                        dropped += 1;
                    }
                    parsed
                })
                .collect();
            index.insert(word.clone(), valid);
        }
        if dropped > 0 {
            debug!(dropped, "Dropped invalid inverted-index positions");
        }
        index
    }

    /// Adds positions for `word`. Positions above the limit are dropped and a
    /// word left with no positions is not stored.
    pub fn insert(&mut self, word: impl Into<String>, positions: impl IntoIterator<Item = usize>) {
        let mut positions: Vec<usize> = positions
            .into_iter()
            .filter(|p| *p <= MAX_ABSTRACT_POSITION)
            .collect();
        if positions.is_empty() {
            return;
        }
        self.entries
            .entry(word.into())
            .or_default()
            .append(&mut positions);
    }

    /// True when no word has a position.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.entries.len()
    }

    /// Largest position across all words, or `None` for an empty index.
    #[must_use]
    pub fn max_position(&self) -> Option<usize> {
        self.entries.values().flatten().copied().max()
    }

    /// Rebuilds the text.
    ///
    /// Empty slots collapse away, so the output never contains runs of
    /// spaces or leading/trailing whitespace.
    #[must_use]
    pub fn reconstruct(&self) -> String {
        let Some(max_position) = self.max_position() else {
            return String::new();
        };

        let mut slots = vec![""; max_position + 1];
        for (word, positions) in &self.entries {
            for &position in positions {
                if let Some(slot) = slots.get_mut(position) {
                    *slot = word.as_str();
                }
            }
        }

        slots
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<W: Into<String>> FromIterator<(W, Vec<usize>)> for InvertedIndex {
    fn from_iter<I: IntoIterator<Item = (W, Vec<usize>)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (word, positions) in iter {
            index.insert(word, positions);
        }
        index
    }
}

/// Rebuilds an abstract from an optional `abstract_inverted_index` value.
///
/// Missing, null and malformed values all yield an empty string.
#[must_use]
pub fn reconstruct_abstract(value: Option<&Value>) -> String {
    value
        .map(InvertedIndex::from_json)
        .map(|index| index.reconstruct())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reconstruct_in_position_order() {
        let value = json!({"test": [3], "This": [0], "a": [2], "is": [1]});
        assert_eq!(reconstruct_abstract(Some(&value)), "This is a test");
    }

    #[test]
    fn test_reconstruct_repeated_word() {
        let value = json!({"the": [0, 2], "cat": [1], "sat": [3]});
        assert_eq!(reconstruct_abstract(Some(&value)), "the cat the sat");
    }

    #[test]
    fn test_reconstruct_empty_and_absent() {
        assert_eq!(reconstruct_abstract(Some(&json!({}))), "");
        assert_eq!(reconstruct_abstract(None), "");
        assert_eq!(reconstruct_abstract(Some(&Value::Null)), "");
        assert_eq!(InvertedIndex::new().reconstruct(), "");
    }

    #[test]
    fn test_reconstruct_gaps_collapse_to_single_spaces() {
        let value = json!({"late": [7], "start": [2], "middle": [4]});
        assert_eq!(reconstruct_abstract(Some(&value)), "start middle late");
    }

    #[test]
    fn test_reconstruct_non_contiguous_positions_from_iterator() {
        let index: InvertedIndex = [("b", vec![10]), ("a", vec![5])].into_iter().collect();
        assert_eq!(index.max_position(), Some(10));
        assert_eq!(index.reconstruct(), "a b");
    }

    #[test]
    fn test_reconstruct_words_with_inner_whitespace_are_split() {
        let value = json!({"new\nline": [0], "end": [1]});
        assert_eq!(reconstruct_abstract(Some(&value)), "new line end");
    }

    #[test]
    fn regression_shared_position_last_key_in_order_wins() {
        // Two words share slot 0. Keys are visited in sorted order, so "beta"
        // overwrites "alpha". Pinned as observed, not as desirable.
        let value = json!({"beta": [0], "alpha": [0], "gamma": [1]});
        assert_eq!(reconstruct_abstract(Some(&value)), "beta gamma");
    }

    #[test]
    fn test_invalid_positions_are_dropped() {
        let value = json!({
            "neg": [-1],
            "frac": [1.5],
            "text": ["2"],
            "huge": [MAX_ABSTRACT_POSITION + 1],
            "ok": [0],
            "also": [1, -4]
        });
        let index = InvertedIndex::from_json(&value);
        assert_eq!(index.word_count(), 2);
        assert_eq!(index.reconstruct(), "ok also");
    }

    #[test]
    fn test_non_list_positions_contribute_nothing() {
        let value = json!({"word": 3, "other": null, "kept": [0]});
        assert_eq!(reconstruct_abstract(Some(&value)), "kept");
    }

    #[test]
    fn test_non_object_index_is_empty() {
        assert!(InvertedIndex::from_json(&json!(["a", "b"])).is_empty());
        assert_eq!(reconstruct_abstract(Some(&json!("text"))), "");
    }
}
