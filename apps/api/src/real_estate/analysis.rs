//! Analysis Provider — LLM-generated property analysis behind a trait.
//!
//! The provider's reply is coerced into `AnalysisResult` and then validated.
//! Anything that does not match the documented shape is rejected; a partially
//! valid analysis is never returned.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::prompts::{fill, JSON_ONLY_SYSTEM};
use crate::llm_client::{complete_json, LanguageModel, LlmError};
use crate::real_estate::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};

/// Quarterly points expected in `priceHistory` (2022 Q1 – 2024 Q4).
pub const PRICE_HISTORY_POINTS: usize = 12;
/// Items expected in each of `strengths` and `weaknesses`.
pub const CONCLUSION_POINTS: usize = 3;
/// Upper bound of `livabilityScoreNum`.
pub const LIVABILITY_MAX: f64 = 10.0;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("query cannot be empty")]
    EmptyQuery,

    #[error("analysis provider failed: {0}")]
    Provider(#[source] LlmError),

    #[error("analysis response did not match the schema: {0}")]
    Schema(String),

    #[error("analysis timed out after {0}s")]
    Timeout(u64),
}

// ────────────────────────────────────────────────────────────────────────────
// Output data models (wire shape is camelCase)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallRisk {
    #[serde(rename = "low", alias = "낮음")]
    Low,
    #[serde(rename = "moderate", alias = "보통")]
    Moderate,
    #[serde(rename = "high", alias = "높음")]
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentGrade {
    A,
    B,
    C,
    D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "strong_buy", alias = "매수 적극")]
    StrongBuy,
    #[serde(rename = "consider_buying", alias = "매수 검토")]
    ConsiderBuying,
    #[serde(rename = "wait_and_see", alias = "관망")]
    WaitAndSee,
    #[serde(rename = "hold_off", alias = "매수 보류")]
    HoldOff,
}

/// One quarter of median prices, in units of 100 million KRW.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryPoint {
    pub period: String,
    pub sale: f64,
    pub jeonse: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPrice {
    pub sale: String,
    pub jeonse: String,
    pub jeonse_ratio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentFeasibility {
    pub rental_yield: String,
    pub ltv: String,
    pub dsr: String,
    pub min_cash_required: String,
    pub break_even_analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub market_risk: String,
    pub regulatory_risk: String,
    pub interest_rate_risk: String,
    pub overall_risk: OverallRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAnalysis {
    pub transportation: String,
    pub education: String,
    pub shopping: String,
    pub amenities: String,
    pub livability_score: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FutureProspects {
    pub development_plan: String,
    pub population_trend: String,
    pub policy_impact: String,
    pub investment_outlook: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Residents {
    pub age_group: String,
    pub family_type: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallConclusion {
    pub investment_grade: InvestmentGrade,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendation: Recommendation,
}

/// Full structured output of a property analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// True when figures are estimated rather than drawn from transaction records.
    pub is_simulation: bool,
    pub data_source: String,

    // Headline numbers. Prices and cash are in 100M KRW; ratios in percent.
    pub sale_price: f64,
    pub jeonse_price: f64,
    pub jeonse_ratio_num: f64,
    pub ltv_num: f64,
    pub rental_yield_num: f64,
    pub min_cash_num: f64,
    pub livability_score_num: f64,

    pub price_history: Vec<PriceHistoryPoint>,

    pub market_price: MarketPrice,
    pub investment_feasibility: InvestmentFeasibility,
    pub risk_assessment: RiskAssessment,
    pub location_analysis: LocationAnalysis,
    pub future_prospects: FutureProspects,
    pub residents: Residents,
    pub overall_conclusion: OverallConclusion,
}

impl AnalysisResult {
    /// Checks the constraints serde cannot express. Reports every violation.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let mut problems = Vec::new();

        if self.data_source.trim().is_empty() {
            problems.push("dataSource is empty".to_string());
        }

        for (name, value) in [
            ("salePrice", self.sale_price),
            ("jeonsePrice", self.jeonse_price),
            ("minCashNum", self.min_cash_num),
        ] {
            if !value.is_finite() || value < 0.0 {
                problems.push(format!("{name} must be a non-negative number, got {value}"));
            }
        }

        for (name, value) in [
            ("jeonseRatioNum", self.jeonse_ratio_num),
            ("ltvNum", self.ltv_num),
            ("rentalYieldNum", self.rental_yield_num),
        ] {
            if !(0.0..=100.0).contains(&value) {
                problems.push(format!("{name} must be within 0-100, got {value}"));
            }
        }

        if !(0.0..=LIVABILITY_MAX).contains(&self.livability_score_num) {
            problems.push(format!(
                "livabilityScoreNum must be within 0-{LIVABILITY_MAX}, got {}",
                self.livability_score_num
            ));
        }

        if self.price_history.len() != PRICE_HISTORY_POINTS {
            problems.push(format!(
                "priceHistory must have {PRICE_HISTORY_POINTS} points, got {}",
                self.price_history.len()
            ));
        }
        for point in &self.price_history {
            if point.period.trim().is_empty() {
                problems.push("priceHistory has a point without a period".to_string());
            }
            if !point.sale.is_finite() || point.sale < 0.0 {
                problems.push(format!("priceHistory {} has invalid sale", point.period));
            }
            if !point.jeonse.is_finite() || point.jeonse < 0.0 {
                problems.push(format!("priceHistory {} has invalid jeonse", point.period));
            }
        }

        let conclusion = &self.overall_conclusion;
        if conclusion.strengths.len() != CONCLUSION_POINTS {
            problems.push(format!(
                "strengths must have {CONCLUSION_POINTS} items, got {}",
                conclusion.strengths.len()
            ));
        }
        if conclusion.weaknesses.len() != CONCLUSION_POINTS {
            problems.push(format!(
                "weaknesses must have {CONCLUSION_POINTS} items, got {}",
                conclusion.weaknesses.len()
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::Schema(problems.join("; ")))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Provider trait + LLM-backed implementation
// ────────────────────────────────────────────────────────────────────────────

/// Carried in `AppState` as `Arc<dyn AnalysisProvider>`.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn analyze(&self, query: &str) -> Result<AnalysisResult, AnalysisError>;
}

pub struct LlmAnalysisProvider {
    llm: Arc<dyn LanguageModel>,
    timeout: Duration,
}

impl LlmAnalysisProvider {
    pub fn new(llm: Arc<dyn LanguageModel>, timeout: Duration) -> Self {
        Self { llm, timeout }
    }
}

#[async_trait]
impl AnalysisProvider for LlmAnalysisProvider {
    async fn analyze(&self, query: &str) -> Result<AnalysisResult, AnalysisError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AnalysisError::EmptyQuery);
        }

        let system = fill(ANALYSIS_SYSTEM, &[("json_only", JSON_ONLY_SYSTEM)]);
        let prompt = fill(ANALYSIS_PROMPT_TEMPLATE, &[("query", query)]);

        let result = tokio::time::timeout(
            self.timeout,
            complete_json::<AnalysisResult>(self.llm.as_ref(), &prompt, &system),
        )
        .await
        .map_err(|_| AnalysisError::Timeout(self.timeout.as_secs()))?
        .map_err(|e| match e {
            LlmError::Parse(e) => AnalysisError::Schema(e.to_string()),
            other => AnalysisError::Provider(other),
        })?;

        if let Err(e) = result.validate() {
            warn!("Rejected analysis for {query:?}: {e}");
            return Err(e);
        }

        info!(
            "Analysis for {:?}: grade={:?} simulation={}",
            query, result.overall_conclusion.investment_grade, result.is_simulation
        );
        Ok(result)
    }
}
