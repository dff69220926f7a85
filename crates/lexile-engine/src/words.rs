//! Hard-word list parsing.
//!
//! Provider replies are an untrusted external format: either a proper JSON
//! array, or loosely formatted lines. The two strategies never mix: the
//! line regex only runs once structured parsing has been ruled out.

use lazy_static::lazy_static;
use regex::Regex;

use reader_types::HardWord;

/// Outcome of the structured parse attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum WordListReply {
    Structured(Vec<HardWord>),
    Unparsable(String),
}

lazy_static! {
    static ref JSON_ARRAY: Regex = Regex::new(r"(?s)\[.*\]").unwrap();
    static ref LOOSE_LINE: Regex = Regex::new(r#"^["\s]*([^":,-]+)[":,\-]+\s*(.+?)"*$"#).unwrap();
}

/// Try the structured shape: the first JSON array embedded in the reply.
pub fn parse_word_list(reply: &str) -> WordListReply {
    if let Some(found) = JSON_ARRAY.find(reply) {
        if let Ok(words) = serde_json::from_str::<Vec<HardWord>>(found.as_str()) {
            return WordListReply::Structured(words);
        }
    }
    WordListReply::Unparsable(reply.to_string())
}

/// Fallback: match `word - definition` / `word: definition` lines.
pub fn parse_loose_lines(text: &str) -> Vec<HardWord> {
    text.lines()
        .filter_map(|line| {
            let caps = LOOSE_LINE.captures(line)?;
            let word = caps[1].trim();
            let definition = caps[2].trim();
            if word.is_empty() || definition.is_empty() {
                return None;
            }
            Some(HardWord {
                word: word.to_string(),
                definition: definition.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hard(word: &str, definition: &str) -> HardWord {
        HardWord {
            word: word.to_string(),
            definition: definition.to_string(),
        }
    }

    #[test]
    fn test_parses_structured_array() {
        let reply = r#"[{"word": "arduous", "definition": "very hard"}]"#;
        assert_eq!(
            parse_word_list(reply),
            WordListReply::Structured(vec![hard("arduous", "very hard")])
        );
    }

    #[test]
    fn test_parses_array_embedded_in_prose() {
        let reply = "Here are the words:\n[{\"word\": \"vex\", \"definition\": \"to annoy\"}]\nHope that helps!";
        assert_eq!(
            parse_word_list(reply),
            WordListReply::Structured(vec![hard("vex", "to annoy")])
        );
    }

    #[test]
    fn test_malformed_array_falls_through_to_unparsable() {
        let reply = "[not json at all]";
        assert_eq!(
            parse_word_list(reply),
            WordListReply::Unparsable(reply.to_string())
        );
    }

    #[test]
    fn test_loose_lines_dash_and_colon() {
        let text = "arduous - very hard\nvex: to annoy";
        assert_eq!(
            parse_loose_lines(text),
            vec![hard("arduous", "very hard"), hard("vex", "to annoy")]
        );
    }

    #[test]
    fn test_loose_lines_ignore_garbage() {
        assert_eq!(parse_loose_lines("no separators here at all"), vec![]);
        assert_eq!(parse_loose_lines(""), vec![]);
    }
}
