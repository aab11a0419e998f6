//! Rendering of post bodies into a safe HTML subset.
//!
//! Post content is stored verbatim. When it is rendered into a page only a
//! handful of inline formatting tags survive; every other tag is stripped
//! (its text is kept) and all text is HTML-escaped.

use std::sync::LazyLock;

use regex::Regex;

/// Tags that survive sanitizing. Attributes are always dropped.
pub const ALLOWED_TAGS: &[&str] = &["b", "strong", "i", "em", "u", "br"];

// Opening or closing tag: group 1 is the slash, group 2 the tag name
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\s*(/?)\s*([A-Za-z][A-Za-z0-9]*)[^>]*>").expect("tag pattern is valid")
});

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Sanitize post content down to [`ALLOWED_TAGS`].
///
/// Output is always well nested: stray closing tags are dropped and tags left
/// open at the end of the input are closed.
pub fn sanitize_content(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut open: Vec<&'static str> = Vec::new();
    let mut cursor = 0;

    for caps in TAG_REGEX.captures_iter(input) {
        let whole = caps.get(0).expect("group 0 always matches");
        out.push_str(&escape_html(&input[cursor..whole.start()]));
        cursor = whole.end();

        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();
        let Some(tag) = ALLOWED_TAGS.iter().copied().find(|t| *t == name) else {
            continue;
        };

        if tag == "br" {
            out.push_str("<br>");
            continue;
        }

        if closing {
            // Close everything opened after the matching tag, then the tag.
            if let Some(pos) = open.iter().rposition(|t| *t == tag) {
                for t in open.drain(pos..).rev() {
                    out.push_str("</");
                    out.push_str(t);
                    out.push('>');
                }
            }
        } else {
            out.push('<');
            out.push_str(tag);
            out.push('>');
            open.push(tag);
        }
    }

    out.push_str(&escape_html(&input[cursor..]));
    for t in open.into_iter().rev() {
        out.push_str("</");
        out.push_str(t);
        out.push('>');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_allowed_tags() {
        let html = sanitize_content("濃厚<br/>で<b>なめらか</b>、<em>絶品</em>");
        assert_eq!(html, "濃厚<br>で<b>なめらか</b>、<em>絶品</em>");
    }

    #[test]
    fn test_drops_attributes_and_normalizes_case() {
        let html = sanitize_content(r#"<STRONG class="x" onclick="evil()">hi</Strong>"#);
        assert_eq!(html, "<strong>hi</strong>");
    }

    #[test]
    fn test_strips_disallowed_tags_and_escapes_text() {
        let html = sanitize_content(r#"<script>alert("x")</script><a href="/">link</a> 1 < 2"#);
        assert_eq!(html, "alert(&quot;x&quot;)link 1 &lt; 2");
    }

    #[test]
    fn test_closes_unbalanced_tags() {
        assert_eq!(sanitize_content("<b><i>open"), "<b><i>open</i></b>");
        assert_eq!(sanitize_content("stray</u>"), "stray");
        assert_eq!(sanitize_content("<b><i>x</b>y"), "<b><i>x</i></b>y");
    }
}
