//! Word-substitution rewriter: the no-network fallback implementation.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use reader_types::RewriteOutcome;

use crate::error::EngineError;
use crate::level::estimate_level;
use crate::rewrite::Rewriter;

const WORD_TABLE: &[(&str, &str)] = &[
    ("utilize", "use"),
    ("commence", "start"),
    ("terminate", "end"),
    ("endeavor", "try"),
    ("sufficient", "enough"),
    ("demonstrate", "show"),
    ("comprehend", "understand"),
    ("purchase", "buy"),
    ("inquire", "ask"),
    ("obtain", "get"),
];

lazy_static! {
    static ref SUBSTITUTIONS: Vec<(Regex, &'static str)> = WORD_TABLE
        .iter()
        .map(|(complex, simple)| {
            let pattern = Regex::new(&format!(r"(?i)\b{}\b", complex)).unwrap();
            (pattern, *simple)
        })
        .collect();
}

/// Case-insensitive whole-word replacement of complex vocabulary.
pub fn simplify_words(passage: &str) -> String {
    let mut adjusted = passage.to_string();
    for (pattern, simple) in SUBSTITUTIONS.iter() {
        adjusted = pattern.replace_all(&adjusted, *simple).into_owned();
    }
    adjusted
}

pub struct HeuristicRewriter;

#[async_trait]
impl Rewriter for HeuristicRewriter {
    async fn rewrite(
        &self,
        passage: &str,
        target_level: i32,
    ) -> Result<RewriteOutcome, EngineError> {
        Ok(RewriteOutcome {
            original_level: estimate_level(passage),
            adjusted_level: target_level,
            adjusted_passage: simplify_words(passage),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_substitutes_whole_words_case_insensitively() {
        assert_eq!(
            simplify_words("The endeavor was sufficient."),
            "The try was enough."
        );
        assert_eq!(simplify_words("UTILIZE the tool"), "use the tool");
    }

    #[test]
    fn test_leaves_partial_matches_alone() {
        // "purchaser" contains "purchase" but is not a whole-word match.
        assert_eq!(simplify_words("the purchaser obtains"), "the purchaser obtains");
        assert_eq!(simplify_words("they obtain it"), "they get it");
    }

    #[tokio::test]
    async fn test_rewrite_outcome_shape() {
        let outcome = HeuristicRewriter
            .rewrite("Commence the test.", 600)
            .await
            .unwrap();
        assert_eq!(outcome.adjusted_passage, "start the test.");
        assert_eq!(outcome.adjusted_level, 600);
        assert!((800..=1100).contains(&outcome.original_level));
    }
}
