// src/report.rs
// Report data model shared by the heuristic scorer, the webhook client and the API

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{Result, SeoError};

// ═══════════════════════════════════════
// REQUEST
// ═══════════════════════════════════════

/// Body accepted by the analyze endpoints and forwarded to the webhook
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub main_topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ═══════════════════════════════════════
// REPORT
// ═══════════════════════════════════════

/// Letter grade derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Grade::APlus,
            80..=89 => Grade::A,
            70..=79 => Grade::B,
            60..=69 => Grade::C,
            50..=59 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = SeoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "A+" => Ok(Grade::APlus),
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "E" | "F" => Ok(Grade::F),
            other => Err(SeoError::InvalidInput(format!("unknown grade '{}'", other))),
        }
    }
}

/// Shared by keyword importance and recommendation priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    High,
    Medium,
    #[default]
    Low,
}

impl Level {
    /// Case-insensitive label as webhooks tend to send it
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" | "critical" => Some(Level::High),
            "medium" | "moderate" => Some(Level::Medium),
            "low" => Some(Level::Low),
            _ => None,
        }
    }
}

/// Where a report came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSource {
    Webhook,
    #[default]
    Heuristic,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TextAnalysis {
    pub text: String,
    pub length: usize,
    pub score: u32,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub word_count: usize,
    pub reading_time_minutes: usize,
    pub score: u32,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeadingSummary {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub bonus: u32,
}

impl HeadingSummary {
    pub fn total(&self) -> usize {
        self.h1 + self.h2 + self.h3
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailedAnalysis {
    pub title: TextAnalysis,
    pub meta_description: TextAnalysis,
    pub content: ContentAnalysis,
    pub headings: HeadingSummary,
    pub keyword_score: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeywordEntry {
    pub word: String,
    pub frequency: usize,
    pub density: f64,
    pub importance: Level,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Recommendation {
    pub priority: Level,
    pub category: String,
    pub issue: String,
    pub suggestion: String,
}

/// Report returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeoReport {
    pub report_id: String,
    pub website_url: String,
    pub main_topic: String,
    pub analyzed_at: String,
    pub overall_score: u32,
    pub grade: Grade,
    pub source: ReportSource,
    #[serde(rename = "detailed_analysis")]
    pub detailed_analysis: DetailedAnalysis,
    pub keywords: Vec<KeywordEntry>,
    pub recommendations: Vec<Recommendation>,
}

// ═══════════════════════════════════════
// UPSTREAM PAYLOAD
// ═══════════════════════════════════════

type JsonMap = Map<String, Value>;

const URL_KEYS: &[&str] = &["websiteUrl", "website_url", "url"];
const TOPIC_KEYS: &[&str] = &["mainTopic", "main_topic", "topic"];
const SCORE_KEYS: &[&str] = &["overallScore", "overall_score", "seoScore", "seo_score", "score"];
const ANALYZED_AT_KEYS: &[&str] = &["analyzedAt", "analyzed_at", "timestamp"];
const DETAIL_KEYS: &[&str] = &["detailed_analysis", "detailedAnalysis"];

/// First key among `keys` whose value converts; mismatched values are skipped
fn pick<T>(obj: &JsonMap, keys: &[&str], convert: fn(&Value) -> Option<T>) -> Option<T> {
    keys.iter().filter_map(|key| obj.get(*key)).find_map(convert)
}

fn as_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Numbers, or strings holding a number
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn as_level(value: &Value) -> Option<Level> {
    value.as_str().and_then(Level::from_label)
}

/// Decode one sub-object, falling back to its default when it does not fit
fn part<T: DeserializeOwned + Default>(obj: &JsonMap, keys: &[&str]) -> T {
    pick(obj, keys, |v| serde_json::from_value(v.clone()).ok()).unwrap_or_default()
}

fn detailed_from(value: &Value) -> Option<DetailedAnalysis> {
    let obj = value.as_object()?;
    Some(DetailedAnalysis {
        title: part(obj, &["title"]),
        meta_description: part(obj, &["metaDescription", "meta_description", "meta"]),
        content: part(obj, &["content"]),
        headings: part(obj, &["headings"]),
        keyword_score: pick(obj, &["keywordScore", "keyword_score"], as_number)
            .map(clamp_score)
            .unwrap_or(0),
    })
}

fn keyword_from(value: &Value) -> Option<KeywordEntry> {
    match value {
        Value::String(_) => Some(KeywordEntry {
            word: as_text(value)?,
            ..Default::default()
        }),
        Value::Object(obj) => Some(KeywordEntry {
            word: pick(obj, &["word", "keyword", "term"], as_text)?,
            frequency: pick(obj, &["frequency", "count"], as_number)
                .filter(|f| *f >= 0.0)
                .map(|f| f.round() as usize)
                .unwrap_or(0),
            density: pick(obj, &["density"], as_number).unwrap_or(0.0),
            importance: pick(obj, &["importance"], as_level).unwrap_or_default(),
        }),
        _ => None,
    }
}

fn recommendation_from(value: &Value) -> Option<Recommendation> {
    match value {
        Value::String(_) => Some(Recommendation {
            priority: Level::Medium,
            category: "General".to_string(),
            issue: as_text(value)?,
            suggestion: String::new(),
        }),
        Value::Object(obj) => {
            let issue = pick(obj, &["issue", "title", "message", "recommendation"], as_text);
            let suggestion = pick(obj, &["suggestion", "action", "fix"], as_text);
            if issue.is_none() && suggestion.is_none() {
                return None;
            }
            Some(Recommendation {
                priority: pick(obj, &["priority"], as_level).unwrap_or(Level::Medium),
                category: pick(obj, &["category", "type"], as_text)
                    .unwrap_or_else(|| "General".to_string()),
                issue: issue.unwrap_or_default(),
                suggestion: suggestion.unwrap_or_default(),
            })
        }
        _ => None,
    }
}

/// Whatever the webhook returned, with every field optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpstreamReport {
    pub website_url: Option<String>,
    pub main_topic: Option<String>,
    pub overall_score: Option<f64>,
    pub grade: Option<Grade>,
    pub analyzed_at: Option<String>,
    pub detailed_analysis: Option<DetailedAnalysis>,
    pub keywords: Vec<KeywordEntry>,
    pub recommendations: Vec<Recommendation>,
}

impl UpstreamReport {
    /// Read each field on its own so one bad value never sinks the report
    pub fn from_object(obj: &JsonMap) -> Self {
        let keywords: Vec<KeywordEntry> = pick(obj, &["keywords"], |v| {
            v.as_array().map(|items| items.iter().filter_map(keyword_from).collect())
        })
        .unwrap_or_default();

        let recommendations: Vec<Recommendation> = pick(obj, &["recommendations"], |v| {
            v.as_array()
                .map(|items| items.iter().filter_map(recommendation_from).collect())
        })
        .unwrap_or_default();

        Self {
            website_url: pick(obj, URL_KEYS, as_text),
            main_topic: pick(obj, TOPIC_KEYS, as_text),
            overall_score: pick(obj, SCORE_KEYS, as_number),
            grade: pick(obj, &["grade"], |v| v.as_str()?.parse().ok()),
            analyzed_at: pick(obj, ANALYZED_AT_KEYS, as_text),
            detailed_analysis: pick(obj, DETAIL_KEYS, detailed_from),
            keywords,
            recommendations,
        }
    }
}

/// The webhook answers with a report object or an array holding one
#[derive(Debug, Clone)]
pub enum UpstreamPayload {
    One(JsonMap),
    Many(Vec<Value>),
}

impl UpstreamPayload {
    /// Decode a raw webhook body
    pub fn parse(body: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(body).map_err(|e| SeoError::Parse(e.to_string()))? {
            Value::Object(obj) => Ok(UpstreamPayload::One(obj)),
            Value::Array(items) => Ok(UpstreamPayload::Many(items)),
            other => Err(SeoError::Parse(format!(
                "expected a JSON object or array, got {}",
                other
            ))),
        }
    }

    /// The report to use; first element of an array
    pub fn into_report(self) -> Result<UpstreamReport> {
        match self {
            UpstreamPayload::One(obj) => Ok(UpstreamReport::from_object(&obj)),
            UpstreamPayload::Many(items) => match items.first() {
                Some(Value::Object(obj)) => Ok(UpstreamReport::from_object(obj)),
                Some(_) => Err(SeoError::Parse(
                    "first array element is not an object".to_string(),
                )),
                None => Err(SeoError::Parse("webhook returned an empty array".to_string())),
            },
        }
    }
}

fn clamp_score(raw: f64) -> u32 {
    if raw.is_finite() {
        raw.round().clamp(0.0, 100.0) as u32
    } else {
        0
    }
}

impl UpstreamReport {
    /// Fill every gap with a safe default so clients never see a partial report
    pub fn normalize(self, request: &AnalyzeRequest) -> SeoReport {
        let overall_score = self.overall_score.map(clamp_score).unwrap_or(0);
        let grade = self
            .grade
            .unwrap_or_else(|| Grade::from_score(overall_score));

        let mut detailed_analysis = self.detailed_analysis.unwrap_or_else(|| {
            debug!("Webhook report has no usable detailed_analysis");
            DetailedAnalysis::default()
        });
        detailed_analysis.title.score = detailed_analysis.title.score.min(100);
        detailed_analysis.meta_description.score = detailed_analysis.meta_description.score.min(100);
        detailed_analysis.content.score = detailed_analysis.content.score.min(100);
        detailed_analysis.keyword_score = detailed_analysis.keyword_score.min(100);
        detailed_analysis.headings.bonus = detailed_analysis.headings.bonus.min(100);

        SeoReport {
            report_id: uuid::Uuid::new_v4().to_string(),
            website_url: self
                .website_url
                .unwrap_or_else(|| request.website_url.clone()),
            main_topic: self.main_topic.unwrap_or_else(|| request.main_topic.clone()),
            analyzed_at: self
                .analyzed_at
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            overall_score,
            grade,
            source: ReportSource::Webhook,
            detailed_analysis,
            keywords: self.keywords,
            recommendations: self.recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> AnalyzeRequest {
        AnalyzeRequest {
            website_url: "https://example.com".to_string(),
            main_topic: "coffee roasting".to_string(),
            email: None,
        }
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_score(100), Grade::APlus);
        assert_eq!(Grade::from_score(90), Grade::APlus);
        assert_eq!(Grade::from_score(89), Grade::A);
        assert_eq!(Grade::from_score(80), Grade::A);
        assert_eq!(Grade::from_score(70), Grade::B);
        assert_eq!(Grade::from_score(60), Grade::C);
        assert_eq!(Grade::from_score(50), Grade::D);
        assert_eq!(Grade::from_score(49), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }

    #[test]
    fn test_grade_is_monotonic() {
        // Grade ordering runs best to worst, so a higher score never gets a larger grade
        for score in 1..=100 {
            assert!(Grade::from_score(score) <= Grade::from_score(score - 1));
        }
    }

    #[test]
    fn test_grade_serializes_as_letter() {
        assert_eq!(serde_json::to_value(Grade::APlus).unwrap(), json!("A+"));
        assert_eq!("a+".parse::<Grade>().unwrap(), Grade::APlus);
        assert!("Z".parse::<Grade>().is_err());
    }

    #[test]
    fn test_request_missing_fields_default_to_empty() {
        let req: AnalyzeRequest = serde_json::from_value(json!({"websiteUrl": "x"})).unwrap();
        assert_eq!(req.website_url, "x");
        assert_eq!(req.main_topic, "");
        assert_eq!(req.email, None);

        let body = serde_json::to_value(&request()).unwrap();
        assert_eq!(body, json!({"websiteUrl": "https://example.com", "mainTopic": "coffee roasting"}));
    }

    #[test]
    fn test_parse_object_payload() {
        let payload = UpstreamPayload::parse(
            r#"{"seoScore": 82.6, "grade": "A", "keywords": ["coffee", {"word": "roast", "frequency": 4}]}"#,
        )
        .unwrap();
        let report = payload.into_report().unwrap().normalize(&request());
        assert_eq!(report.overall_score, 83);
        assert_eq!(report.grade, Grade::A);
        assert_eq!(report.source, ReportSource::Webhook);
        assert_eq!(report.keywords.len(), 2);
        assert_eq!(report.keywords[1].frequency, 4);
        assert_eq!(report.website_url, "https://example.com");
    }

    #[test]
    fn test_parse_array_payload_uses_first() {
        let payload =
            UpstreamPayload::parse(r#"[{"overall_score": 40}, {"overall_score": 99}]"#).unwrap();
        let report = payload.into_report().unwrap().normalize(&request());
        assert_eq!(report.overall_score, 40);
        assert_eq!(report.grade, Grade::F);
    }

    #[test]
    fn test_empty_array_is_parse_error() {
        let payload = UpstreamPayload::parse("[]").unwrap();
        assert!(matches!(payload.into_report(), Err(SeoError::Parse(_))));
    }

    #[test]
    fn test_non_json_is_parse_error() {
        assert!(matches!(
            UpstreamPayload::parse("<html>oops</html>"),
            Err(SeoError::Parse(_))
        ));
        assert!(matches!(UpstreamPayload::parse("42"), Err(SeoError::Parse(_))));
    }

    fn decode(body: &str) -> SeoReport {
        UpstreamPayload::parse(body)
            .unwrap()
            .into_report()
            .unwrap()
            .normalize(&request())
    }

    #[test]
    fn test_normalize_defaults_and_clamps() {
        let report = decode(
            r#"{"overallScore": 250, "detailed_analysis": {"title": {"score": 400}, "content": "garbage"}, "recommendations": ["Add alt text"]}"#,
        );
        assert_eq!(report.overall_score, 100);
        assert_eq!(report.grade, Grade::APlus);
        // bad parts fall back on their own, good parts survive
        assert_eq!(report.detailed_analysis.title.score, 100);
        assert_eq!(report.detailed_analysis.content, ContentAnalysis::default());
        assert_eq!(report.recommendations[0].issue, "Add alt text");
        assert_eq!(report.recommendations[0].priority, Level::Medium);
        assert!(report.keywords.is_empty());
    }

    #[test]
    fn test_numeric_string_score_is_accepted() {
        let report = decode(r#"{"overallScore": "85", "grade": "A"}"#);
        assert_eq!(report.overall_score, 85);
        assert_eq!(report.grade, Grade::A);
    }

    #[test]
    fn test_duplicate_score_keys_use_first_present() {
        let report = decode(r#"{"overallScore": 85, "score": 85}"#);
        assert_eq!(report.overall_score, 85);
        assert_eq!(report.grade, Grade::A);

        // a mismatched alias is skipped in favor of the next usable one
        let report = decode(r#"{"overallScore": "n/a", "seoScore": 72}"#);
        assert_eq!(report.overall_score, 72);
    }

    #[test]
    fn test_bad_keyword_entries_are_dropped_individually() {
        let report = decode(r#"{"overallScore": 85, "keywords": ["seo", 3, null, {"frequency": 2}]}"#);
        assert_eq!(report.overall_score, 85);
        assert_eq!(report.keywords.len(), 1);
        assert_eq!(report.keywords[0].word, "seo");
    }

    #[test]
    fn test_mismatched_fields_become_defaults() {
        let report = decode(
            r#"{"overallScore": 60, "grade": 7, "keywords": "coffee", "recommendations": {"issue": "x"}, "mainTopic": 12}"#,
        );
        assert_eq!(report.overall_score, 60);
        assert_eq!(report.grade, Grade::C);
        assert!(report.keywords.is_empty());
        assert!(report.recommendations.is_empty());
        assert_eq!(report.main_topic, "coffee roasting");
    }

    #[test]
    fn test_keyword_and_recommendation_objects_read_leniently() {
        let report = decode(
            r#"{"keywords": [{"keyword": "roast", "count": "6", "importance": "HIGH"}],
                "recommendations": [{"priority": "high", "title": "Title too short", "suggestion": "Lengthen it"}, 5]}"#,
        );
        assert_eq!(report.keywords[0].word, "roast");
        assert_eq!(report.keywords[0].frequency, 6);
        assert_eq!(report.keywords[0].importance, Level::High);
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].priority, Level::High);
        assert_eq!(report.recommendations[0].category, "General");
        assert_eq!(report.recommendations[0].issue, "Title too short");
    }

    #[test]
    fn test_normalize_clamps_keyword_score_and_heading_bonus() {
        let report = decode(
            r#"{"detailedAnalysis": {"keywordScore": 900, "headings": {"h1": 1, "bonus": 4000}}}"#,
        );
        assert_eq!(report.detailed_analysis.keyword_score, 100);
        assert_eq!(report.detailed_analysis.headings.bonus, 100);
        assert_eq!(report.detailed_analysis.headings.h1, 1);
    }

    #[test]
    fn test_array_with_non_object_first_is_parse_error() {
        let payload = UpstreamPayload::parse(r#"["report"]"#).unwrap();
        assert!(matches!(payload.into_report(), Err(SeoError::Parse(_))));
    }

    #[test]
    fn test_normalize_empty_object() {
        let report = UpstreamReport::default().normalize(&request());
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.grade, Grade::F);
        assert_eq!(report.main_topic, "coffee roasting");
        assert!(!report.report_id.is_empty());
    }

    #[test]
    fn test_report_wire_names() {
        let report = UpstreamReport::default().normalize(&request());
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("detailed_analysis").is_some());
        assert!(value.get("overallScore").is_some());
        assert_eq!(value["source"], json!("webhook"));
        assert!(value["detailed_analysis"].get("metaDescription").is_some());
    }
}
