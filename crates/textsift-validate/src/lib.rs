//! textsift Validate - Table validation and deterministic cleanup
//!
//! Two passes over an uploaded table:
//! - `Validator` scans without mutating and produces a log of findings
//!   (missing values, exact duplicates, normalized subset duplicates).
//! - `Resolver` removes or merges the flagged rows and reports every
//!   action it took.
//!
//! Both passes share the same text normalization, so a table the resolver
//! has cleaned validates without findings on a second pass.

pub mod resolver;
pub mod validator;

pub use resolver::Resolver;
pub use validator::Validator;

/// Normalize text for subset comparison: lowercase, strip punctuation,
/// collapse runs of whitespace to single spaces.
///
/// Punctuation characters are removed, not replaced, so "don't" becomes
/// "dont" rather than "don t".
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize("The CAT Sat"), "the cat sat");
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("hello, world!"), "hello world");
        assert_eq!(normalize("don't stop"), "dont stop");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  a \t b \n c  "), "a b c");
    }

    #[test]
    fn test_normalize_all_punctuation_is_empty() {
        assert_eq!(normalize("!!! ... ???"), "");
    }
}
