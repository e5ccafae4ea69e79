//! Locale-aware string ordering for title/artist/album sorting
//!
//! Approximates the root collation used by browsers: letters compare without regard to
//! accents or case first, then unaccented before accented, then lowercase before uppercase.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

fn primary_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary_key(s: &str) -> Vec<bool> {
    s.nfd().map(char::is_uppercase).collect()
}

/// Compare two strings the way a user expects a sorted list of names to read
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
        assert_eq!("Zebra".cmp("apple"), Ordering::Less);
    }

    #[test]
    fn test_lowercase_before_uppercase() {
        assert_eq!(locale_cmp("abc", "Abc"), Ordering::Less);
        assert_eq!(locale_cmp("Abc", "abc"), Ordering::Greater);
        assert_eq!(locale_cmp("abc", "abc"), Ordering::Equal);
    }

    #[test]
    fn test_accents() {
        assert_eq!(locale_cmp("élan", "ember"), Ordering::Less);
        assert_eq!(locale_cmp("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_cmp("Beyoncé", "Björk"), Ordering::Less);
    }

    #[test]
    fn test_seed_titles() {
        let mut titles = vec![
            "What's Going On",
            "Like a Rolling Stone",
            "Lose Yourself",
            "Billie Jean",
            "Bohemian Rhapsody",
        ];
        titles.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(
            titles,
            vec![
                "Billie Jean",
                "Bohemian Rhapsody",
                "Like a Rolling Stone",
                "Lose Yourself",
                "What's Going On",
            ]
        );
    }
}
