//! Day labels as stored in a plan ("Día 1") and as requested in URLs ("dia-1").
//!
//! Two labels refer to the same day when their normalised keys are equal: the
//! key is lower-cased, stripped of Latin diacritics, and every run of
//! non-alphanumeric characters becomes a single `-`.

use std::cmp::Ordering;

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Normalised key of a day label; also used as the URL slug of the day.
pub fn normalize_day_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut pending_separator = false;

    for c in label.chars().flat_map(char::to_lowercase).map(fold_diacritic) {
        if c.is_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('-');
            }
            pending_separator = false;
            key.push(c);
        } else {
            pending_separator = true;
        }
    }

    key
}

pub fn day_keys_match(stored_label: &str, requested: &str) -> bool {
    let stored = normalize_day_key(stored_label);
    !stored.is_empty() && stored == normalize_day_key(requested)
}

/// Display title for a requested day slug: "dia-1" becomes "Dia 1".
pub fn day_title(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Number embedded in a label ("Día 12" -> 12). Digits are concatenated the
/// way the dashboard always read them, so "Semana 1 Día 2" yields 12.
pub fn day_number(label: &str) -> Option<u64> {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Dashboard ordering: numbered days ascending, unnumbered days last, ties by label.
pub fn compare_day_labels(a: &str, b: &str) -> Ordering {
    match (day_number(a), day_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accented_label_matches_plain_slug() {
        assert_eq!(normalize_day_key("Día 1"), "dia-1");
        assert!(day_keys_match("Día 1", "dia-1"));
        assert!(day_keys_match("DÍA  1", "dia-1"));
        assert!(day_keys_match("Día 1", "Dia_1"));
        assert!(!day_keys_match("Día 1", "dia-11"));
    }

    #[test]
    fn test_empty_labels_never_match() {
        assert!(!day_keys_match("", ""));
        assert!(!day_keys_match("  ", "-"));
    }

    #[test]
    fn test_separators_collapse_and_trim() {
        assert_eq!(normalize_day_key("  Día 3 - Pierna  "), "dia-3-pierna");
        assert_eq!(normalize_day_key("Day_2"), "day-2");
    }

    #[test]
    fn test_day_title() {
        assert_eq!(day_title("dia-1"), "Dia 1");
        assert_eq!(day_title("upper-body-a"), "Upper Body A");
        assert_eq!(day_title(""), "");
    }

    #[test]
    fn test_dashboard_ordering() {
        let mut labels = vec!["Día 10", "Extra", "Día 2", "Día 1"];
        labels.sort_by(|a, b| compare_day_labels(a, b));
        assert_eq!(labels, vec!["Día 1", "Día 2", "Día 10", "Extra"]);
    }

    proptest! {
        #[test]
        fn prop_matching_ignores_case_and_spacing(word in "[a-z]{1,8}", n in 0u32..100, pad in " {0,3}") {
            let stored = format!("{}{} {}{}", pad, word.to_uppercase(), n, pad);
            let requested = format!("{}-{}", word, n);
            prop_assert!(day_keys_match(&stored, &requested));
        }

        #[test]
        fn prop_normalization_is_idempotent(label in "[a-zA-Z0-9áéíóúÁÉÍÓÚñÑ _.-]{0,20}") {
            let once = normalize_day_key(&label);
            prop_assert_eq!(normalize_day_key(&once), once.clone());
        }
    }
}
