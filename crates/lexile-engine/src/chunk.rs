//! Paragraph-preserving chunking for bounded rewrite calls.

use lazy_static::lazy_static;
use regex::Regex;

/// Upper bound (in characters) on the input of a single rewrite call.
pub const MAX_CHUNK_SIZE: usize = 2500;

lazy_static! {
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"\n\s*\n").unwrap();
}

/// Split a passage on blank-line paragraph boundaries and accumulate the
/// paragraphs into chunks not exceeding `MAX_CHUNK_SIZE`. A single
/// paragraph longer than the bound becomes its own chunk. Rejoining the
/// chunks with blank lines reproduces the paragraphs in original order.
pub fn split_into_chunks(content: &str) -> Vec<String> {
    if content.chars().count() <= MAX_CHUNK_SIZE {
        return vec![content.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    for paragraph in PARAGRAPH_BREAK.split(content) {
        let would_be = current.chars().count() + paragraph.chars().count();
        if would_be > MAX_CHUNK_SIZE && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current.push_str(paragraph);
        } else {
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(paragraph);
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_short_passage_is_one_chunk() {
        let chunks = split_into_chunks("one paragraph\n\nanother one");
        assert_eq!(chunks, vec!["one paragraph\n\nanother one".to_string()]);
    }

    #[test]
    fn test_long_passage_splits_on_paragraphs() {
        let a = "a".repeat(1500);
        let b = "b".repeat(1500);
        let c = "c".repeat(1500);
        let content = format!("{}\n\n{}\n\n{}", a, b, c);

        let chunks = split_into_chunks(&content);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks.join("\n\n"), content);
    }

    #[test]
    fn test_oversized_paragraph_is_its_own_chunk() {
        let small = "tiny";
        let huge = "x".repeat(MAX_CHUNK_SIZE + 100);
        let content = format!("{}\n\n{}", small, huge);

        let chunks = split_into_chunks(&content);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], small);
        assert_eq!(chunks[1], huge);
    }

    proptest! {
        #[test]
        fn test_rejoin_reproduces_paragraph_order(
            paragraphs in prop::collection::vec("[a-z]{1,400}", 1..30)
        ) {
            let content = paragraphs.join("\n\n");
            let chunks = split_into_chunks(&content);
            prop_assert_eq!(chunks.join("\n\n"), content);
        }
    }
}
