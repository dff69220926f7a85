//! Text normalization applied to imported titles and content.

/// Canonicalize newlines and drop control characters that have no place in
/// stored text. Tabs and newlines survive; trailing whitespace per line and
/// surrounding blank space do not.
pub fn preprocess(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let cleaned: String = unified
        .chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect();
    let trimmed: Vec<&str> = cleaned.lines().map(|line| line.trim_end()).collect();
    trimmed.join("\n").trim_matches('\n').to_string()
}

/// Derive a display title from a file name: strip any directory prefix and
/// the final extension.
pub fn parse_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);
    let stem = match base.rfind('.') {
        Some(0) | None => base,
        Some(dot) => &base[..dot],
    };
    let stem = stem.trim();
    if stem.is_empty() {
        "Untitled Document".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preprocess_unifies_newlines() {
        assert_eq!(preprocess("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_preprocess_strips_control_chars() {
        assert_eq!(preprocess("a\u{0000}b\u{0007}c"), "abc");
        assert_eq!(preprocess("keep\ttabs"), "keep\ttabs");
    }

    #[test]
    fn test_preprocess_trims_trailing_whitespace() {
        assert_eq!(preprocess("line one   \nline two\t\n\n"), "line one\nline two");
    }

    #[test]
    fn test_parse_filename_strips_extension() {
        assert_eq!(parse_filename("story.txt"), "story");
        assert_eq!(parse_filename("notes/chapter one.txt"), "chapter one");
        assert_eq!(parse_filename("archive.tar.gz"), "archive.tar");
    }

    #[test]
    fn test_parse_filename_keeps_dotfiles_and_handles_empty() {
        assert_eq!(parse_filename(".hidden"), ".hidden");
        assert_eq!(parse_filename(""), "Untitled Document");
    }
}
