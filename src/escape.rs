use std::borrow::Cow;

/// Escape the characters which are significant in HTML (`&`, `<`, `>`, `"`
/// and `'`) so `text` can be spliced into markup.
///
/// Text that doesn't need escaping is returned as-is without allocating.
///
/// # Examples
///
/// ```rust
/// assert_eq!(
///     linktitle::html_escape("<b>Tom & Jerry's</b>"),
///     "&lt;b&gt;Tom &amp; Jerry&#39;s&lt;/b&gt;",
/// );
/// ```
pub fn html_escape(text: &str) -> Cow<'_, str> {
    if !text.contains(needs_escaping) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }

    Cow::Owned(escaped)
}

fn needs_escaping(c: char) -> bool { matches!(c, '&' | '<' | '>' | '"' | '\'') }

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_is_borrowed() {
        let got = html_escape("Fix crash on startup");

        assert!(matches!(got, Cow::Borrowed("Fix crash on startup")));
    }

    #[test]
    fn escape_every_special_character() {
        let src = r#"a & b < c > d " e ' f"#;

        let got = html_escape(src);

        assert_eq!(got, "a &amp; b &lt; c &gt; d &quot; e &#39; f");
        assert!(!got.contains(|c: char| matches!(c, '<' | '>' | '"' | '\'')));
        // every remaining ampersand starts an entity
        assert_eq!(got.matches('&').count(), got.matches(';').count());
    }

    #[test]
    fn already_escaped_text_is_escaped_again() {
        assert_eq!(html_escape("&amp;"), "&amp;amp;");
    }
}
