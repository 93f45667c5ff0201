//! crates/revenue_content_core/src/html.rs
//!
//! Small HTML helpers shared by the structurer and the scorer.

use scraper::{Html, Selector};

/// Escapes text for use inside an element or a quoted attribute.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wraps every blank-line-separated chunk of `text` in its own `<p>`.
/// Single newlines inside a chunk become `<br />`.
pub fn paragraphs(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let mut html = String::new();
    let mut chunk: Vec<&str> = Vec::new();

    for line in text.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if !chunk.is_empty() {
                html.push_str("<p>");
                html.push_str(&chunk.join("<br />\n"));
                html.push_str("</p>\n");
                chunk.clear();
            }
        } else {
            chunk.push(line.trim());
        }
    }

    html
}

/// Reduces an HTML fragment to its visible text.
///
/// `<script>` and `<style>` contents are dropped, text nodes are separated by
/// a space and runs of whitespace collapse to one.
pub fn strip_tags(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut words: Vec<&str> = Vec::new();

    for node in fragment.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| matches!(el.name(), "script" | "style"))
        });
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }

    words.join(" ")
}

/// Cleans an untrusted HTML fragment against ammonia's default allow-list.
///
/// `<script>` and `<style>` are removed with their contents, event handler
/// attributes are dropped, and ordinary formatting tags survive.
pub fn sanitize_fragment(html: &str) -> String {
    ammonia::clean(html)
}

/// Counts elements matching a CSS selector. An invalid selector matches nothing.
pub fn count_elements(html: &str, selector: &str) -> usize {
    match Selector::parse(selector) {
        Ok(selector) => Html::parse_fragment(html).select(&selector).count(),
        Err(_) => 0,
    }
}

/// Counts whitespace-separated words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_and_quotes() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let html = paragraphs("First line\nsecond line\n\n\n  Second paragraph  \r\n");
        assert_eq!(
            html,
            "<p>First line<br />\nsecond line</p>\n<p>Second paragraph</p>\n"
        );
    }

    #[test]
    fn paragraphs_of_empty_text_is_empty() {
        assert_eq!(paragraphs(""), "");
        assert_eq!(paragraphs(" \n \n"), "");
    }

    #[test]
    fn strip_tags_keeps_visible_text_only() {
        let html = "<h2>Title</h2><p>Hello <b>world</b></p>\
                    <script>var hidden = 1;</script><style>p{}</style><p>end</p>";
        assert_eq!(strip_tags(html), "Title Hello world end");
    }

    #[test]
    fn sanitize_fragment_drops_scripts_and_handlers() {
        let clean = sanitize_fragment("<b>ok</b> <img src=x onerror=alert(1)><script>steal()</script>");
        assert!(clean.contains("<b>ok</b>"));
        assert!(clean.contains("<img src=\"x\">"));
        assert!(!clean.contains("onerror"));
        assert!(!clean.contains("steal()"));
    }

    #[test]
    fn count_elements_by_selector() {
        let html = "<h2>a</h2><p>x</p><h2 class=\"seo-subtitle\">b</h2>";
        assert_eq!(count_elements(html, "h2"), 2);
        assert_eq!(count_elements(html, "h2.seo-subtitle"), 1);
        assert_eq!(count_elements(html, "[["), 0);
    }

    #[test]
    fn count_words_handles_hangul() {
        assert_eq!(count_words("다이어트 는  정말 중요합니다"), 4);
        assert_eq!(count_words(""), 0);
    }
}
