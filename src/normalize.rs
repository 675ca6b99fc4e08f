//! Normalization helpers shared by the matcher and the `findit` binary.
//!
//! All functions are pure. The matcher folds its inputs once and derives the
//! other forms from the folded text, so the article and parenthetical
//! patterns below only need to handle lowercase input.

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// Leading article followed by a single space: "the police" → "police",
/// "los lobos" → "lobos". Anchored, so only the first word is considered.
pub static LEADING_ARTICLE: Lazy<Regex> = Lazy::new(||
    Regex::new(r"^(?:the|el|la|los|las|le|les|os|as|o|a) ").unwrap()
);

/// Whitespace followed by a parenthesized span: " (feat. x)", " (remastered)".
/// Greedy, so "song (live) (2009)" loses both groups.
pub static PARENTHETICAL: Lazy<Regex> = Lazy::new(||
    Regex::new(r"\s\(.*\)").unwrap()
);

// ============================================================================
// NORMALIZATION FUNCTIONS
// ============================================================================

/// Case-fold for comparison.
pub fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Remove one leading article ("the", "los", "le", ...) from folded text.
pub fn strip_leading_article(s: &str) -> String {
    LEADING_ARTICLE.replace(s, "").into_owned()
}

/// Remove the first " (...)" span, e.g. "song (feat. x)" → "song".
pub fn strip_parenthetical(s: &str) -> String {
    PARENTHETICAL.replace(s, "").into_owned()
}

/// Try the other conjunction form.
///
/// " and " becomes " & " when present; otherwise every "&" becomes "and"
/// (no spaces are added, so "r&b" → "randb"). Only one direction is applied
/// per call, so a string holding both forms only has its " and " swapped.
pub fn swap_and_ampersand(s: &str) -> String {
    if s.contains(" and ") {
        s.replace(" and ", " & ")
    } else if s.contains('&') {
        s.replace('&', "and")
    } else {
        s.to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_is_idempotent() {
        for s in ["The Police", "BJÖRK", "already folded", "", "R&B"] {
            assert_eq!(fold(&fold(s)), fold(s));
        }
        assert_eq!(fold("The Police"), "the police");
    }

    #[test]
    fn test_strip_leading_article() {
        assert_eq!(strip_leading_article(&fold("The Police")), "police");
        assert_eq!(strip_leading_article(&fold("Police")), "police");
        assert_eq!(strip_leading_article("los lobos"), "lobos");
        assert_eq!(strip_leading_article("le tigre"), "tigre");
        assert_eq!(strip_leading_article("a tribe called quest"), "tribe called quest");
    }

    #[test]
    fn test_strip_leading_article_only_at_start() {
        // Article must be a whole word followed by a space
        assert_eq!(strip_leading_article("theatre of tragedy"), "theatre of tragedy");
        assert_eq!(strip_leading_article("abba"), "abba");
        // Articles later in the string are left alone
        assert_eq!(strip_leading_article("kings of the sun"), "kings of the sun");
        // No trailing space, no strip
        assert_eq!(strip_leading_article("the"), "the");
    }

    #[test]
    fn test_strip_leading_article_is_idempotent() {
        for s in ["the police", "police", "los lobos", "el canto del loco", "abba"] {
            let once = strip_leading_article(s);
            assert_eq!(strip_leading_article(&once), once);
        }
    }

    #[test]
    fn test_strip_parenthetical() {
        assert_eq!(strip_parenthetical("song (feat. x)"), "song");
        assert_eq!(strip_parenthetical("song (remastered)"), "song");
        assert_eq!(strip_parenthetical("song (live) (2009 mix)"), "song");
        assert_eq!(strip_parenthetical("plain song"), "plain song");
        // Needs whitespace before the paren
        assert_eq!(strip_parenthetical("song(demo)"), "song(demo)");
    }

    #[test]
    fn test_swap_and_ampersand() {
        assert_eq!(swap_and_ampersand("rhythm and blues"), "rhythm & blues");
        assert_eq!(swap_and_ampersand("rock & roll"), "rock and roll");
        assert_eq!(swap_and_ampersand("r&b"), "randb");
        assert_eq!(swap_and_ampersand("simon garfunkel"), "simon garfunkel");
        // "and" inside a word is not a conjunction
        assert_eq!(swap_and_ampersand("sandman"), "sandman");
    }

    #[test]
    fn test_swap_and_ampersand_one_direction_only() {
        // " and " wins; the existing "&" is left as is
        assert_eq!(swap_and_ampersand("salt and pepa & friends"), "salt & pepa & friends");
        // Every occurrence is replaced
        assert_eq!(swap_and_ampersand("a and b and c"), "a & b & c");
        assert_eq!(swap_and_ampersand("a & b & c"), "a and b and c");
    }
}
