//! Axum route handlers for the Real Estate API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::real_estate::analysis::AnalysisResult;
use crate::real_estate::metrics::{
    compute_metrics, FormattedMetrics, InvestmentForm, InvestmentInputs, InvestmentMetrics,
    MetricsBreakdown,
};
use crate::real_estate::risk::{classify_risk, RiskComment, RiskLevel};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RiskView {
    pub code: RiskComment,
    pub level: RiskLevel,
    pub message: &'static str,
}

impl From<RiskComment> for RiskView {
    fn from(comment: RiskComment) -> Self {
        Self {
            code: comment,
            level: comment.risk_level(),
            message: comment.message(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub inputs: InvestmentInputs,
    pub metrics: InvestmentMetrics,
    pub breakdown: MetricsBreakdown,
    pub formatted: FormattedMetrics,
    pub risk: RiskView,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub query: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/real-estate/metrics
///
/// Parses the five form fields, computes the ratios and selects a risk comment.
pub async fn handle_metrics(
    Json(form): Json<InvestmentForm>,
) -> Result<Json<MetricsResponse>, AppError> {
    let inputs = form.parse()?;
    let metrics = compute_metrics(&inputs)?;
    let risk = classify_risk(&metrics);
    debug!(
        "Metrics computed: jeonse={:.2} ltv={:.2} risk={:?}",
        metrics.jeonse_ratio_percent, metrics.loan_to_value_percent, risk
    );

    Ok(Json(MetricsResponse {
        breakdown: MetricsBreakdown::from_inputs(&inputs),
        formatted: FormattedMetrics::from(&metrics),
        risk: risk.into(),
        inputs,
        metrics,
    }))
}

/// POST /api/v1/real-estate/analyze
///
/// Delegates to the analysis provider. The result has already been validated
/// against the documented schema.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = state.analysis.analyze(&request.query).await?;
    Ok(Json(result))
}
