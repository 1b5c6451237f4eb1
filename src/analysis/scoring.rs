// src/analysis/scoring.rs
// Band tables, overall score and recommendations for the heuristic scorer

use crate::report::{DetailedAnalysis, Grade, Level, Recommendation};

pub const WORDS_PER_MINUTE: usize = 200;
pub const HEADING_BONUS: u32 = 10;
pub const MAX_SCORE: u32 = 100;

// Sub-scores below these earn a recommendation
const TITLE_TARGET: u32 = 25;
const META_TARGET: u32 = 25;
const CONTENT_TARGET: u32 = 18;
const KEYWORD_TARGET: u32 = 10;

/// Points awarded for one component, with its band label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub score: u32,
    pub status: &'static str,
}

impl Band {
    const fn new(score: u32, status: &'static str) -> Self {
        Self { score, status }
    }
}

pub fn reading_time_minutes(word_count: usize) -> usize {
    word_count.div_ceil(WORDS_PER_MINUTE)
}

pub fn score_title(length: usize) -> Band {
    match length {
        0 => Band::new(0, "Missing"),
        30..=60 => Band::new(25, "Excellent"),
        20..=29 => Band::new(15, "Good"),
        61.. => Band::new(10, "Too Long"),
        _ => Band::new(5, "Too Short"),
    }
}

pub fn score_meta_description(length: usize) -> Band {
    match length {
        0 => Band::new(0, "Missing"),
        120..=160 => Band::new(25, "Excellent"),
        100..=119 => Band::new(15, "Good"),
        161.. => Band::new(10, "Too Long"),
        _ => Band::new(5, "Too Short"),
    }
}

pub fn score_content(word_count: usize) -> Band {
    match word_count {
        0 => Band::new(0, "Missing"),
        1000.. => Band::new(25, "Excellent"),
        500..=999 => Band::new(18, "Good"),
        300..=499 => Band::new(12, "Fair"),
        _ => Band::new(5, "Thin"),
    }
}

pub fn score_keywords(keyword_count: usize) -> u32 {
    match keyword_count {
        0 => 0,
        1..=4 => 5,
        5..=9 => 10,
        _ => 15,
    }
}

pub fn heading_bonus(heading_count: usize) -> u32 {
    if heading_count > 0 { HEADING_BONUS } else { 0 }
}

/// Sum of all components, capped at 100
pub fn overall_score(analysis: &DetailedAnalysis) -> u32 {
    let total = analysis.title.score
        + analysis.meta_description.score
        + analysis.content.score
        + analysis.keyword_score
        + analysis.headings.bonus;
    total.min(MAX_SCORE)
}

pub fn grade(score: u32) -> Grade {
    Grade::from_score(score)
}

fn recommendation(priority: Level, category: &str, issue: String, suggestion: &str) -> Recommendation {
    Recommendation {
        priority,
        category: category.to_string(),
        issue,
        suggestion: suggestion.to_string(),
    }
}

fn length_issue(what: &str, status: &str, length: usize) -> String {
    match status {
        "Missing" => format!("{} is missing", what),
        "Too Long" => format!("{} is too long ({} characters)", what, length),
        "Too Short" => format!("{} is too short ({} characters)", what, length),
        _ => format!("{} could be longer ({} characters)", what, length),
    }
}

/// Recommendations for every weak component, most urgent first
pub fn recommendations(analysis: &DetailedAnalysis) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    let title = &analysis.title;
    if title.score < TITLE_TARGET {
        let priority = if title.score <= 5 { Level::High } else { Level::Medium };
        recs.push(recommendation(
            priority,
            "Title",
            length_issue("Page title", &title.status, title.length),
            "Write a title of 30-60 characters that leads with your main keyword",
        ));
    }

    let meta = &analysis.meta_description;
    if meta.score < META_TARGET {
        let priority = if meta.score <= 5 { Level::High } else { Level::Medium };
        recs.push(recommendation(
            priority,
            "Meta Description",
            length_issue("Meta description", &meta.status, meta.length),
            "Write a 120-160 character summary that includes your main keyword and a call to action",
        ));
    }

    let content = &analysis.content;
    if content.score < CONTENT_TARGET {
        let priority = if content.score < 12 { Level::High } else { Level::Medium };
        recs.push(recommendation(
            priority,
            "Content",
            format!("Page has only {} words", content.word_count),
            "Expand the page to at least 500 words; in-depth pages of 1000+ words rank best",
        ));
    }

    if analysis.keyword_score < KEYWORD_TARGET {
        recs.push(recommendation(
            Level::Medium,
            "Keywords",
            "Few recurring keywords found".to_string(),
            "Use your main topic and closely related terms consistently throughout the content",
        ));
    }

    if analysis.headings.total() == 0 {
        recs.push(recommendation(
            Level::Medium,
            "Headings",
            "No headings found".to_string(),
            "Structure the page with one H1 and descriptive H2/H3 subheadings",
        ));
    }

    recs.sort_by_key(|r| r.priority);
    recs
}
