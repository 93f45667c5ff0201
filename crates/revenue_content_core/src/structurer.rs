//! crates/revenue_content_core/src/structurer.rs
//!
//! Turns the AI's free text into the fixed article skeleton: an optional
//! intro, at most three subtitled sections, the ad/CTA blocks around the
//! second section and a trailing JSON-LD descriptor.
//!
//! Nothing here fails. Text without the expected `##` subtitles simply
//! produces a sparser article.

use crate::domain::{AdSlots, RenderedContent, Section, StructuredArticle};
use crate::html::{escape, paragraphs, sanitize_fragment, strip_tags};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;
use url::form_urlencoded::byte_serialize;

/// Class carried by both ad containers.
pub const AD_BLOCK_CLASS: &str = "revenue-ad-block";
/// Class carried by the call-to-action link.
pub const CTA_CLASS: &str = "cta-button";
/// Script type of the structured-data block.
pub const JSON_LD_TYPE: &str = "application/ld+json";

/// Sections beyond this many are discarded.
pub const MAX_SECTIONS: usize = 3;

/// 1-based position, among accepted sections, that receives the ads and the CTA.
const AD_SECTION_POSITION: usize = 2;

/// Search URLs for the CTA link, most preferred first.
const SEARCH_ENGINES: [&str; 2] = [
    "https://search.naver.com/search.naver?query=",
    "https://www.google.com/search?q=",
];

fn subtitle_delimiter() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    DELIMITER.get_or_init(|| Regex::new(r"(?m)^##[ \t]+").expect("subtitle pattern is valid"))
}

/// Parses and renders in one go.
pub fn structure(raw: &str, keyword: &str, ads: &AdSlots) -> RenderedContent {
    let article = parse_article(raw);
    let html = render(&article, keyword, ads);
    RenderedContent { article, html }
}

/// Like [`structure`], but the intro and every section body go through the
/// HTML allow-list first. Title and subtitles are escaped on render anyway.
pub fn structure_untrusted(raw: &str, keyword: &str, ads: &AdSlots) -> RenderedContent {
    let mut article = parse_article(raw);
    if let Some(intro) = article.intro.as_mut() {
        *intro = sanitize_fragment(intro);
    }
    for section in &mut article.sections {
        section.body = sanitize_fragment(&section.body);
    }
    let html = render(&article, keyword, ads);
    RenderedContent { article, html }
}

/// Slices raw AI text into title, intro and sections.
pub fn parse_article(raw: &str) -> StructuredArticle {
    let raw = raw.replace("\r\n", "\n");
    let mut blocks = subtitle_delimiter().split(&raw);

    let title = blocks
        .next()
        .unwrap_or_default()
        .trim()
        .trim_start_matches('#')
        .trim()
        .to_string();

    let mut candidates: Vec<&str> = blocks.collect();

    // A blank line inside the first block marks a preamble; what follows it
    // is parsed as the first section.
    let mut intro = None;
    if let Some(first) = candidates.first_mut() {
        let block = *first;
        if let Some((preamble, rest)) = block.trim().split_once("\n\n") {
            intro = Some(preamble.trim().to_string());
            *first = rest;
        }
    }

    let mut sections = Vec::with_capacity(MAX_SECTIONS);
    for (index, candidate) in candidates.iter().enumerate() {
        if sections.len() == MAX_SECTIONS {
            debug!(
                dropped = candidates.len() - index,
                "Discarding sections past the limit"
            );
            break;
        }

        let candidate = candidate.trim();
        let (subtitle, body) = candidate.split_once('\n').unwrap_or((candidate, ""));
        let subtitle = subtitle.trim();
        if subtitle.is_empty() {
            continue;
        }

        sections.push(Section {
            subtitle: subtitle.to_string(),
            body: body.trim().to_string(),
        });
    }

    StructuredArticle {
        title,
        intro,
        sections,
    }
}

/// Renders an article to HTML, placing ads and the CTA around the second section.
pub fn render(article: &StructuredArticle, keyword: &str, ads: &AdSlots) -> String {
    let mut html = String::new();

    if let Some(intro) = &article.intro {
        html.push_str(r#"<div class="intro-section">"#);
        html.push_str(&paragraphs(intro));
        html.push_str("</div>\n");
    }

    for (index, section) in article.sections.iter().take(MAX_SECTIONS).enumerate() {
        let is_ad_section = index + 1 == AD_SECTION_POSITION;

        if is_ad_section {
            if let Some(code) = &ads.top {
                html.push_str(&ad_block("ad-top", code));
            }
        }

        html.push_str(&format!(
            "<h2 class=\"seo-subtitle\">{}</h2>\n",
            escape(&section.subtitle)
        ));
        html.push_str(&paragraphs(&section.body));

        if is_ad_section {
            html.push_str(&cta_block(keyword));
            if let Some(code) = &ads.bottom {
                html.push_str(&ad_block("ad-bottom", code));
            }
        }
    }

    if article.sections.len() < AD_SECTION_POSITION {
        debug!(
            sections = article.sections.len(),
            "Too few sections for ad and CTA placement"
        );
    }

    let body_text = strip_tags(&html);
    html.push_str(&json_ld(&article.title, keyword, &body_text));
    html
}

/// Link target of the CTA button.
///
/// The first search engine is always chosen; the rest of the list is kept
/// for reference only.
pub fn related_link(keyword: &str) -> String {
    let query: String = byte_serialize(keyword.as_bytes()).collect();
    format!("{}{}", SEARCH_ENGINES[0], query)
}

fn ad_block(position: &str, code: &str) -> String {
    format!(
        "<div class=\"{AD_BLOCK_CLASS} {position}\" style=\"margin: 30px 0; text-align: center;\">{code}</div>\n"
    )
}

fn cta_block(keyword: &str) -> String {
    format!(
        "<div class=\"{CTA_CLASS}-container\" style=\"margin: 30px 0; text-align: center;\">\
         <a href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"{CTA_CLASS}\" \
         style=\"display: inline-block; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); \
         color: white; padding: 18px 40px; text-decoration: none; border-radius: 50px; \
         font-weight: bold; font-size: 18px; box-shadow: 0 4px 15px rgba(0,0,0,0.2);\">\
         🔥 {label} 자세히 알아보기 →</a></div>\n",
        href = escape(&related_link(keyword)),
        label = escape(keyword),
    )
}

fn json_ld(title: &str, keyword: &str, body_text: &str) -> String {
    let schema = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": title,
        "keywords": keyword,
        "articleBody": body_text,
    });
    // `</` inside a string would close the script element early.
    let schema = schema.to_string().replace("</", "<\\/");
    format!("<script type=\"{JSON_LD_TYPE}\">{schema}</script>")
}
