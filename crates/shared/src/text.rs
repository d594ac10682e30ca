//! Free-text normalization helpers.

/// Lowercases, trims, and collapses internal runs of whitespace to a single space.
pub fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Title-cases text: the first letter of every alphabetic run is uppercased and the rest
/// lowercased.
///
/// Any non-alphabetic character starts a new word, so `"pending-retry"` becomes
/// `"Pending-Retry"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut word_start = true;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  URL   Filtering\t"), "url filtering");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_title_case_words() {
        assert_eq!(title_case("device unreachable"), "Device Unreachable");
    }

    #[test]
    fn test_title_case_punctuation_starts_word() {
        assert_eq!(title_case("pending-retry"), "Pending-Retry");
        assert_eq!(title_case("commit(queued)"), "Commit(Queued)");
    }

    #[test]
    fn test_title_case_lowercases_tail() {
        assert_eq!(title_case("TIMED OUT"), "Timed Out");
    }

    #[test]
    fn test_title_case_digits_break_words() {
        assert_eq!(title_case("phase2done"), "Phase2Done");
    }
}
