//! Normalization of free-text fields coming from the upstream API.

/// Normalize a product description.
///
/// Every newline becomes a single space, every literal `\"` sequence is
/// removed, then surrounding whitespace is trimmed. Trimming runs last so
/// spaces introduced by newline replacement at either end are dropped too.
///
/// # Examples
///
/// ```
/// use shopify_collections_core::sanitize_description;
///
/// assert_eq!(sanitize_description("  A \\\"big\\\" mug\n"), "A big mug");
/// assert_eq!(sanitize_description(""), "");
/// ```
#[must_use]
pub fn sanitize_description(s: &str) -> String {
    s.replace('\n', " ").replace("\\\"", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newlines_become_spaces() {
        assert_eq!(sanitize_description("line one\nline two"), "line one line two");
        assert!(!sanitize_description("a\n\nb\n").contains('\n'));
    }

    #[test]
    fn test_escaped_quotes_removed() {
        let out = sanitize_description(r#"The \"best\" mug"#);
        assert_eq!(out, "The best mug");
        assert!(!out.contains(r#"\""#));
    }

    #[test]
    fn test_plain_quotes_kept() {
        assert_eq!(sanitize_description(r#"A "plain" quote"#), r#"A "plain" quote"#);
    }

    #[test]
    fn test_trailing_newline_trimmed() {
        // The replacement space must not survive at the ends.
        assert_eq!(sanitize_description("\nHello\n"), "Hello");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(sanitize_description(""), "");
        assert_eq!(sanitize_description(" \n \t"), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "clean",
            "  padded  ",
            "multi\nline\r\ntext",
            r#"\"quoted\" and \"more\""#,
            "\\\\\"odd\\",
        ];
        for input in inputs {
            let once = sanitize_description(input);
            assert_eq!(sanitize_description(&once), once, "input: {input:?}");
        }
    }
}
