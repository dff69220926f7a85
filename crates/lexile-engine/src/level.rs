//! Complexity banding over Lexile-like levels.

use std::fmt;

/// Vocabulary/sentence-structure guidance band for a target level.
/// Pure and total over the whole integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    VerySimple,
    Simple,
    Moderate,
    Advanced,
    VeryAdvanced,
}

impl Complexity {
    pub fn for_level(level: i32) -> Self {
        if level < 500 {
            Complexity::VerySimple
        } else if level < 800 {
            Complexity::Simple
        } else if level < 1100 {
            Complexity::Moderate
        } else if level < 1400 {
            Complexity::Advanced
        } else {
            Complexity::VeryAdvanced
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Complexity::VerySimple => "very simple",
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Advanced => "advanced",
            Complexity::VeryAdvanced => "very advanced",
        };
        write!(f, "{}", text)
    }
}

/// Deterministic estimate of a passage's level from mean word length,
/// mapped into the 800-1100 range the original estimator reported.
pub fn estimate_level(passage: &str) -> i32 {
    let mut words = 0usize;
    let mut chars = 0usize;
    for word in passage.split_whitespace() {
        words += 1;
        chars += word.chars().count();
    }
    if words == 0 {
        return 800;
    }
    let mean = chars as f64 / words as f64;
    let level = 800.0 + (mean - 3.0) * 75.0;
    (level.round() as i32).clamp(800, 1100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banding_boundaries() {
        assert_eq!(Complexity::for_level(480), Complexity::VerySimple);
        assert_eq!(Complexity::for_level(500), Complexity::Simple);
        assert_eq!(Complexity::for_level(800), Complexity::Moderate);
        assert_eq!(Complexity::for_level(1399), Complexity::Advanced);
        assert_eq!(Complexity::for_level(1400), Complexity::VeryAdvanced);
    }

    #[test]
    fn test_banding_display() {
        assert_eq!(Complexity::for_level(600).to_string(), "simple");
        assert_eq!(Complexity::for_level(2000).to_string(), "very advanced");
    }

    #[test]
    fn test_estimate_stays_in_range() {
        for passage in ["", "a a a a", "Antidisestablishmentarianism notwithstanding"] {
            let level = estimate_level(passage);
            assert!((800..=1100).contains(&level), "{} out of range", level);
        }
    }

    #[test]
    fn test_estimate_ranks_complex_text_higher() {
        let simple = "The cat sat on the mat.";
        let complex = "Notwithstanding considerable institutional obstruction, perseverance prevailed.";
        assert!(estimate_level(complex) > estimate_level(simple));
    }
}
