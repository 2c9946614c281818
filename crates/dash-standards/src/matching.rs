//! Header normalization and similarity.

use rapidfuzz::distance::jaro_winkler;

/// Normalizes text for comparison by lowercasing and replacing separators with spaces.
///
/// Full-width brackets common in CJK spreadsheets count as separators.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(
            ['_', '-', '.', '/', '\\', '(', ')', '（', '）', '[', ']', '【', '】', ':', '：'],
            " ",
        )
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Jaro-Winkler similarity (0.0 to 1.0) of two already-normalized strings.
pub fn similarity(a: &str, b: &str) -> f64 {
    jaro_winkler::similarity(a.chars(), b.chars())
}

/// True when the normalized `phrase` occurs inside the normalized `header`.
///
/// ASCII phrases must align with whole words so `id` never matches `paid`;
/// other scripts have no word boundaries and need at least two characters.
pub fn contains_phrase(header: &str, phrase: &str) -> bool {
    if phrase.is_empty() || header == phrase {
        return false;
    }
    if phrase.is_ascii() {
        format!(" {header} ").contains(&format!(" {phrase} "))
    } else {
        phrase.chars().count() >= 2 && header.contains(phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_separators() {
        assert_eq!(normalize_text("  Order_Date "), "order date");
        assert_eq!(normalize_text("销售额（元）"), "销售额 元");
        assert_eq!(normalize_text("Unit-Price/USD"), "unit price usd");
    }

    #[test]
    fn ascii_phrases_match_whole_words() {
        assert!(contains_phrase("total sales", "sales"));
        assert!(!contains_phrase("paid", "id"));
        assert!(!contains_phrase("sales", "sales"));
    }

    #[test]
    fn cjk_phrases_match_substrings() {
        assert!(contains_phrase("销售额 元", "销售额"));
        assert!(!contains_phrase("省份", "省"));
    }
}
