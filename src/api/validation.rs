// src/api/validation.rs
// Request validation for the analyze endpoints

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::error::{ApiError, ApiResult, validation_error};
use crate::report::AnalyzeRequest;

pub const MISSING_FIELDS: &str = "Website URL and main topic are required";

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Parse a website URL, accepting bare hosts like `example.com`
pub fn normalize_website_url(raw: &str) -> Option<String> {
    let candidate = raw.trim();
    let parsed = match Url::parse(candidate) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let prefixed = format!("https://{}", candidate);
            let url = Url::parse(&prefixed).ok()?;
            return is_web_url(&url).then_some(prefixed);
        }
        Err(_) => return None,
    };
    is_web_url(&parsed).then(|| candidate.to_string())
}

fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some_and(|h| h.contains('.') || h == "localhost")
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Check required fields and formats; returns the cleaned request
pub fn validate(request: AnalyzeRequest) -> ApiResult<AnalyzeRequest> {
    let website_url = request.website_url.trim();
    let main_topic = request.main_topic.trim();

    if website_url.is_empty() || main_topic.is_empty() {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    }

    let website_url = normalize_website_url(website_url)
        .ok_or_else(|| validation_error("websiteUrl", "enter a valid http(s) URL"))?;

    let email = match request.email.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(email) if is_valid_email(email) => Some(email.to_string()),
        Some(_) => return Err(validation_error("email", "enter a valid email address")),
    };

    Ok(AnalyzeRequest {
        website_url,
        main_topic: main_topic.to_string(),
        email,
    })
}
