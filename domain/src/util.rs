//! Shared text helpers.

/// Shorten `s` to at most `max_chars` characters for one-line previews.
///
/// Newlines are flattened to spaces and an ellipsis is appended when the text
/// was cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let flat = flat.trim();

    if flat.chars().count() <= max_chars {
        return flat.to_string();
    }
    let mut cut: String = flat.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_unchanged() {
        assert_eq!(preview("Lahore", 20), "Lahore");
    }

    #[test]
    fn test_long_text_is_cut_with_ellipsis() {
        assert_eq!(preview("📍 **Weather in Lahore**", 5), "📍 **W…");
    }

    #[test]
    fn test_newlines_are_flattened() {
        assert_eq!(preview("line one\nline two\n", 40), "line one line two");
    }
}
