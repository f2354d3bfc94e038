use paperbrain_core::constants::CHARS_PER_TOKEN;

/// Approximate token count: characters / 4, rounded down.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN
}

/// Approximate token count of several texts taken together.
///
/// Divides the summed character count once, so ten 3-character strings
/// estimate to 7 tokens rather than 0.
pub fn estimate_total<'a>(texts: impl IntoIterator<Item = &'a str>) -> usize {
    let chars: usize = texts.into_iter().map(|t| t.chars().count()).sum();
    chars / CHARS_PER_TOKEN
}

/// The first `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_rounds_down() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abc"), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcdefghi"), 2);
    }

    #[test]
    fn estimate_counts_chars_not_bytes() {
        // Four two-byte characters.
        assert_eq!(estimate_tokens("éééé"), 1);
    }

    #[test]
    fn total_divides_once() {
        let parts = vec!["abc"; 10];
        assert_eq!(estimate_total(parts), 7);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("naïve model", 3), "naï");
        assert_eq!(truncate_chars("short", 50), "short");
        assert_eq!(truncate_chars("anything", 0), "");
    }
}
