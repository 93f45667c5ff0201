//! crates/revenue_content_core/src/scorer.rs
//!
//! Heuristic SEO scoring of rendered article HTML.
//!
//! Each criterion looks only at the input and contributes its points
//! independently; the total is their sum and the grade follows from it.

use crate::domain::{CheckDetail, CheckStatus, Criterion, Grade, SeoScore};
use crate::html::{count_elements, count_words, strip_tags};
use crate::structurer::{AD_BLOCK_CLASS, CTA_CLASS, JSON_LD_TYPE, MAX_SECTIONS};

/// Inclusive word-count window for a full-length article.
const LENGTH_RANGE: (usize, usize) = (1500, 2500);

/// Scores `html` against the fixed rubric for `keyword`.
pub fn score(html: &str, keyword: &str) -> SeoScore {
    let text = strip_tags(html);
    let word_count = count_words(&text);

    let details = vec![
        keyword_density(&text, word_count, keyword),
        subtitle_count(html),
        content_length(word_count),
        marker_check(
            Criterion::AdPlacement,
            html.contains(AD_BLOCK_CLASS),
            "Ad placement: done",
            "Ad placement: none",
        ),
        marker_check(
            Criterion::CtaPresence,
            html.contains(CTA_CLASS),
            "CTA button: included",
            "CTA button: missing",
        ),
        marker_check(
            Criterion::StructuredData,
            html.contains(JSON_LD_TYPE),
            "Schema markup: done",
            "Schema markup: missing",
        ),
        // Awarded unconditionally.
        check(
            Criterion::ExternalLink,
            CheckStatus::Success,
            Criterion::ExternalLink.max_points(),
            "External link: included".to_string(),
        ),
    ];

    let total: u32 = details.iter().map(|d| d.points as u32).sum();
    let score = total.min(100) as u8;

    SeoScore {
        score,
        grade: Grade::from_score(score),
        details,
    }
}

/// Keyword occurrences per hundred words. Zero when there are no words.
pub fn keyword_density(text: &str, word_count: usize, keyword: &str) -> CheckDetail {
    let density = density_percent(text, word_count, keyword);

    if (2.0..=3.0).contains(&density) {
        check(
            Criterion::KeywordDensity,
            CheckStatus::Success,
            20,
            format!("Keyword density: optimal ({density:.2}%, target 2-3%)"),
        )
    } else if (1.0..=4.0).contains(&density) {
        check(
            Criterion::KeywordDensity,
            CheckStatus::Warning,
            15,
            format!("Keyword density: fair ({density:.2}%, target 2-3%)"),
        )
    } else {
        check(
            Criterion::KeywordDensity,
            CheckStatus::Failure,
            10,
            format!("Keyword density: needs work ({density:.2}%, target 2-3%)"),
        )
    }
}

fn density_percent(text: &str, word_count: usize, keyword: &str) -> f64 {
    let keyword = keyword.trim().to_lowercase();
    if word_count == 0 || keyword.is_empty() {
        return 0.0;
    }
    let occurrences = text.to_lowercase().matches(keyword.as_str()).count();
    occurrences as f64 * 100.0 / word_count as f64
}

fn subtitle_count(html: &str) -> CheckDetail {
    let headings = count_elements(html, "h2");
    if headings == MAX_SECTIONS {
        check(
            Criterion::SubtitleCount,
            CheckStatus::Success,
            20,
            format!("Subtitles: perfect ({headings})"),
        )
    } else {
        check(
            Criterion::SubtitleCount,
            CheckStatus::Warning,
            10,
            format!("Subtitles: {headings} (target {MAX_SECTIONS})"),
        )
    }
}

fn content_length(word_count: usize) -> CheckDetail {
    let (min, max) = LENGTH_RANGE;
    if (min..=max).contains(&word_count) {
        check(
            Criterion::ContentLength,
            CheckStatus::Success,
            15,
            format!("Content length: optimal ({word_count} words)"),
        )
    } else {
        check(
            Criterion::ContentLength,
            CheckStatus::Warning,
            10,
            format!("Content length: adjust recommended ({word_count} words, target {min}-{max})"),
        )
    }
}

fn marker_check(criterion: Criterion, present: bool, found: &str, missing: &str) -> CheckDetail {
    if present {
        check(criterion, CheckStatus::Success, criterion.max_points(), found.to_string())
    } else {
        check(criterion, CheckStatus::Failure, 0, missing.to_string())
    }
}

fn check(criterion: Criterion, status: CheckStatus, points: u8, message: String) -> CheckDetail {
    CheckDetail {
        criterion,
        status,
        points,
        max_points: criterion.max_points(),
        message,
    }
}
