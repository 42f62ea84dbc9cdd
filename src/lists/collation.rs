//! Locale-aware comparison for display names.
//!
//! Names are compared level by level: base letters first (accents and case
//! ignored), then accents, then case with lowercase sorting before uppercase.
//! Plain code point order breaks any remaining tie so that distinct names
//! never compare equal.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two names the way a reader expects them ordered
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| secondary_key(a).cmp(secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

/// Base letters only, case folded
fn primary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Letters with their accents, case folded
fn secondary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Case of each base letter; `false` (lowercase) sorts first
fn tertiary_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        names.sort_by(|a, b| locale_compare(a, b));
        names
    }

    #[test]
    fn test_case_does_not_dominate() {
        // plain byte order would put every uppercase letter first
        assert_eq!(
            sorted(&["banana", "Apple", "cherry"]),
            vec!["Apple", "banana", "cherry"]
        );
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(locale_compare("apple", "Apple"), Ordering::Less);
        assert_eq!(locale_compare("Apple", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_accents_are_secondary() {
        assert_eq!(
            sorted(&["résumé writing", "Rust", "resume writing"]),
            vec!["resume writing", "résumé writing", "Rust"]
        );
    }

    #[test]
    fn test_case_sensitive_equality() {
        assert_eq!(locale_compare("Data Science", "Data Science"), Ordering::Equal);
        assert_ne!(locale_compare("Data Science", "data science"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(locale_compare("Calculus", "Calculus II"), Ordering::Less);
    }
}
