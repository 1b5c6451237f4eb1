// src/api/handlers.rs
// HTTP handlers for health and analysis

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use super::validation::validate;
use crate::analysis;
use crate::report::{AnalyzeRequest, SeoReport};

/// Envelope for a successful analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseShape {
    #[default]
    Object,
    /// Legacy clients expect `[report]`
    Array,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeParams {
    #[serde(default)]
    pub shape: ResponseShape,
}

fn respond(report: SeoReport, shape: ResponseShape) -> Response {
    match shape {
        ResponseShape::Object => Json(report).into_response(),
        ResponseShape::Array => Json(vec![report]).into_response(),
    }
}

fn parse_params(params: Result<Query<AnalyzeParams>, QueryRejection>) -> ApiResult<AnalyzeParams> {
    let Query(params) = params.map_err(|rejection| {
        ApiError::bad_request("Invalid query parameters").with_details(rejection.body_text())
    })?;
    Ok(params)
}

fn parse_body(body: Result<Json<AnalyzeRequest>, JsonRejection>) -> ApiResult<AnalyzeRequest> {
    let Json(request) = body.map_err(|rejection| {
        ApiError::bad_request("Invalid request body").with_details(rejection.body_text())
    })?;
    validate(request)
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "webhookConfigured": state.webhook_configured(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Analyze via the webhook, or locally when none is configured
pub async fn analyze(
    State(state): State<AppState>,
    params: Result<Query<AnalyzeParams>, QueryRejection>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let params = parse_params(params)?;
    let request = parse_body(body)?;
    info!(url = %request.website_url, topic = %request.main_topic, "Analysis requested");

    let report = match &state.webhook {
        Some(client) => match client.submit(&request).await {
            Ok(report) => report,
            Err(e) if state.config.fallback_to_heuristic => {
                warn!(error = %e, "Webhook failed, falling back to heuristic analysis");
                analysis::analyze(&request.website_url, &request.main_topic)
            }
            Err(e) => return Err(e.into()),
        },
        None => analysis::analyze(&request.website_url, &request.main_topic),
    };

    Ok(respond(report, params.shape))
}

/// Always analyze locally with the heuristic scorer
pub async fn analyze_heuristic(
    params: Result<Query<AnalyzeParams>, QueryRejection>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let params = parse_params(params)?;
    let request = parse_body(body)?;
    info!(url = %request.website_url, topic = %request.main_topic, "Heuristic analysis requested");

    let report = analysis::analyze(&request.website_url, &request.main_topic);
    Ok(respond(report, params.shape))
}
