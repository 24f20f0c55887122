//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Remove `<think>...</think>` blocks emitted by reasoning models.
///
/// An unterminated block swallows the rest of the text.
pub fn strip_reasoning(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("<think>") {
        out.push_str(&rest[..start]);
        match rest[start..].find("</think>") {
            Some(end) => rest = &rest[start + end + "</think>".len()..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // "Göteborg" has a two-byte 'ö' at byte 1
        assert_eq!(truncate("Göteborg kafé", 30), "Göteborg kafé");
        assert_eq!(truncate("öööööö", 8), "öö...");
    }

    #[test]
    fn test_strip_reasoning() {
        assert_eq!(
            strip_reasoning("<think>score it low</think>\n{\"score\": 4}"),
            "{\"score\": 4}"
        );
        assert_eq!(strip_reasoning("a<think>x</think>b<think>y</think>c"), "abc");
        assert_eq!(strip_reasoning("plain"), "plain");
        assert_eq!(strip_reasoning("kept<think>never closed"), "kept");
    }
}
