//! Shared fakes and fixtures for unit tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::llm_client::{LanguageModel, LlmError, Turn};
use crate::models::conversation::Role;
use crate::real_estate::analysis::LlmAnalysisProvider;
use crate::state::AppState;
use crate::store::MemoryStore;

#[derive(Debug, Clone)]
pub struct RecordedTurn {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub turns: Vec<RecordedTurn>,
}

/// Replays canned replies in order and records every call.
/// Once the script runs out, calls fail with `LlmError::EmptyContent`.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl ScriptedModel {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// Handle to the call log; stays valid after the model is moved.
    pub fn calls(&self) -> Arc<Mutex<Vec<RecordedCall>>> {
        self.calls.clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, system: &str, turns: &[Turn<'_>]) -> Result<String, LlmError> {
        self.calls.lock().await.push(RecordedCall {
            system: system.to_string(),
            turns: turns
                .iter()
                .map(|t| RecordedTurn {
                    role: t.role,
                    content: t.content.to_string(),
                })
                .collect(),
        });
        self.replies
            .lock()
            .await
            .pop_front()
            .ok_or(LlmError::EmptyContent)
    }
}

/// Never answers within any reasonable timeout.
pub struct StalledModel;

#[async_trait]
impl LanguageModel for StalledModel {
    async fn complete(&self, _system: &str, _turns: &[Turn<'_>]) -> Result<String, LlmError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(LlmError::EmptyContent)
    }
}

pub fn test_config() -> Config {
    Config {
        anthropic_api_key: "test-key".to_string(),
        database_url: None,
        port: 0,
        rust_log: "debug".to_string(),
        llm_timeout_secs: 5,
        summary_max_chars: 1_000,
    }
}

/// State over an in-memory store with `model` serving every LLM call.
pub fn test_state(model: impl LanguageModel + 'static) -> AppState {
    let config = test_config();
    let llm: Arc<dyn LanguageModel> = Arc::new(model);
    let analysis = Arc::new(LlmAnalysisProvider::new(llm.clone(), config.llm_timeout()));
    AppState::new(llm, analysis, Arc::new(MemoryStore::new()), config)
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A complete analysis that passes validation.
pub fn sample_analysis_json() -> Value {
    let price_history: Vec<Value> = (0..12)
        .map(|i| {
            let year = 2022 + i / 4;
            let quarter = i % 4 + 1;
            json!({
                "period": format!("{year} Q{quarter}"),
                "sale": 9.0 + f64::from(i) * 0.1,
                "jeonse": 5.5 + f64::from(i) * 0.05,
            })
        })
        .collect();

    json!({
        "isSimulation": true,
        "dataSource": "Estimated from regional averages (simulation)",
        "salePrice": 10.2,
        "jeonsePrice": 6.1,
        "jeonseRatioNum": 59.8,
        "ltvNum": 40.0,
        "rentalYieldNum": 2.9,
        "minCashNum": 4.1,
        "livabilityScoreNum": 8.1,
        "priceHistory": price_history,
        "marketPrice": {
            "sale": "About 1.02 billion KRW",
            "jeonse": "About 610 million KRW",
            "jeonseRatio": "59.8%"
        },
        "investmentFeasibility": {
            "rentalYield": "2.9% gross",
            "ltv": "Up to 40% under current rules",
            "dsr": "Roughly 35% for a median household",
            "minCashRequired": "About 410 million KRW",
            "breakEvenAnalysis": "Breaks even after about 6 years at 2% annual growth"
        },
        "riskAssessment": {
            "marketRisk": "Regional supply is rising",
            "regulatoryRisk": "Lending rules may tighten",
            "interestRateRisk": "Sensitive to rate rises",
            "overallRisk": "moderate"
        },
        "locationAnalysis": {
            "transportation": "Subway station within a 7-minute walk",
            "education": "Elementary and middle schools nearby",
            "shopping": "Department store in the district",
            "amenities": "Large park and hospital nearby",
            "livabilityScore": "8.1/10"
        },
        "futureProspects": {
            "developmentPlan": "New rail line planned",
            "populationTrend": "Stable",
            "policyImpact": "Neutral",
            "investmentOutlook": "Moderate growth expected"
        },
        "residents": {
            "ageGroup": "30s-40s",
            "familyType": "Families with school-age children",
            "summary": "Family-oriented neighbourhood"
        },
        "overallConclusion": {
            "investmentGrade": "B",
            "strengths": ["Transit access", "Schools", "Park views"],
            "weaknesses": ["High entry price", "Aging buildings", "Supply pressure"],
            "recommendation": "consider_buying"
        }
    })
}
