// src/webhook.rs
// Client for the external analysis workflow

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::{Result, SeoError};
use crate::report::{AnalyzeRequest, SeoReport, UpstreamPayload};

/// Default connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upstream error bodies are cut to this many characters
const MAX_ERROR_BODY: usize = 500;

/// Posts analysis requests to the configured webhook
#[derive(Debug, Clone)]
pub struct WebhookClient {
    url: String,
    client: reqwest::Client,
}

impl WebhookClient {
    /// Create a client for `url`; `timeout` bounds the whole request
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submit a request and normalize whatever comes back into a report
    pub async fn submit(&self, request: &AnalyzeRequest) -> Result<SeoReport> {
        let start_time = Instant::now();
        debug!(url = %self.url, topic = %request.main_topic, "Calling analysis webhook");

        let response = self.client.post(&self.url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Analysis webhook returned an error");
            return Err(SeoError::Upstream {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let report = UpstreamPayload::parse(&body)?
            .into_report()?
            .normalize(request);

        info!(
            score = report.overall_score,
            grade = %report.grade,
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Analysis webhook responded"
        );

        Ok(report)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
