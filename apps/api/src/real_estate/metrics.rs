//! Investment Metrics Calculator — pure, deterministic ratios for a
//! leveraged residential purchase.
//!
//! No I/O and no hidden state: identical inputs always produce bit-identical
//! outputs, so the functions here are safe to call from any number of
//! handlers concurrently.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Validation failures. No metric is computed when either is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    #[error("{field} must be a valid number")]
    InvalidNumber { field: &'static str },

    #[error("price must be greater than zero")]
    NonPositivePrice,
}

impl MetricsError {
    /// Stable machine-readable code surfaced in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            MetricsError::InvalidNumber { .. } => "INVALID_NUMBER",
            MetricsError::NonPositivePrice => "NON_POSITIVE_PRICE",
        }
    }
}

/// Parsed calculator inputs. Money fields share one currency unit.
///
/// Only `price` is range-checked. Negative deposit, rent, loan or rate values
/// pass through the arithmetic unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentInputs {
    pub price: f64,
    pub deposit: f64,
    pub monthly_rent: f64,
    pub loan_amount: f64,
    /// Annual rate in percent (4.5 = 4.5%).
    pub loan_rate_percent: f64,
}

impl InvestmentInputs {
    /// Fields in form order, paired with the name reported on validation errors.
    fn named_fields(&self) -> [(&'static str, f64); 5] {
        [
            ("price", self.price),
            ("deposit", self.deposit),
            ("monthly_rent", self.monthly_rent),
            ("loan_amount", self.loan_amount),
            ("loan_rate", self.loan_rate_percent),
        ]
    }
}

/// The five calculator fields exactly as submitted by a form.
///
/// Each field accepts a JSON string or a JSON number; a missing field is
/// treated as empty text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InvestmentForm {
    #[serde(default, deserialize_with = "text_or_number")]
    pub price: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub deposit: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub monthly_rent: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub loan_amount: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub loan_rate: String,
}

impl InvestmentForm {
    /// Parses every field as a finite real. The first failing field, in form
    /// order, is named in the error.
    pub fn parse(&self) -> Result<InvestmentInputs, MetricsError> {
        Ok(InvestmentInputs {
            price: parse_field("price", &self.price)?,
            deposit: parse_field("deposit", &self.deposit)?,
            monthly_rent: parse_field("monthly_rent", &self.monthly_rent)?,
            loan_amount: parse_field("loan_amount", &self.loan_amount)?,
            loan_rate_percent: parse_field("loan_rate", &self.loan_rate)?,
        })
    }
}

/// Net yield is undefined when the cash invested is zero or negative.
///
/// Serialized as a JSON number, or `null` for `NotApplicable`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum NetYield {
    Finite(f64),
    NotApplicable,
}

impl NetYield {
    pub fn value(&self) -> Option<f64> {
        match self {
            NetYield::Finite(v) => Some(*v),
            NetYield::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, NetYield::Finite(_))
    }

    /// Two-decimal percentage, or "N/A".
    pub fn display(&self) -> String {
        match self {
            NetYield::Finite(v) => format_percent(*v),
            NetYield::NotApplicable => NOT_APPLICABLE.to_string(),
        }
    }
}

impl From<Option<f64>> for NetYield {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => NetYield::Finite(v),
            _ => NetYield::NotApplicable,
        }
    }
}

impl From<NetYield> for Option<f64> {
    fn from(value: NetYield) -> Self {
        value.value()
    }
}

/// The three headline ratios, all in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    pub jeonse_ratio_percent: f64,
    pub loan_to_value_percent: f64,
    pub net_yield_percent: NetYield,
}

/// Intermediate amounts behind the net yield, shown alongside the ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsBreakdown {
    pub annual_rent: f64,
    pub annual_interest: f64,
    /// Cash the buyer puts in: price less loan and tenant deposit.
    pub investment: f64,
}

impl MetricsBreakdown {
    pub fn from_inputs(inputs: &InvestmentInputs) -> Self {
        Self {
            annual_rent: inputs.monthly_rent * 12.0,
            annual_interest: inputs.loan_amount * (inputs.loan_rate_percent / 100.0),
            investment: inputs.price - inputs.loan_amount - inputs.deposit,
        }
    }
}

/// Presentation-only rendering of the three metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedMetrics {
    pub jeonse_ratio: String,
    pub loan_to_value: String,
    pub net_yield: String,
}

impl From<&InvestmentMetrics> for FormattedMetrics {
    fn from(m: &InvestmentMetrics) -> Self {
        Self {
            jeonse_ratio: format_percent(m.jeonse_ratio_percent),
            loan_to_value: format_percent(m.loan_to_value_percent),
            net_yield: m.net_yield_percent.display(),
        }
    }
}

const NOT_APPLICABLE: &str = "N/A";

// ────────────────────────────────────────────────────────────────────────────
// Public API
// ────────────────────────────────────────────────────────────────────────────

/// Computes jeonse ratio, LTV and net yield.
///
/// ```text
/// jeonse_ratio  = deposit / price * 100
/// ltv           = loan_amount / price * 100
/// investment    = price - loan_amount - deposit
/// net_yield     = (monthly_rent * 12 - loan_amount * rate / 100) / investment * 100
///                 when investment > 0, otherwise NotApplicable
/// ```
pub fn compute_metrics(inputs: &InvestmentInputs) -> Result<InvestmentMetrics, MetricsError> {
    if let Some((field, _)) = inputs
        .named_fields()
        .into_iter()
        .find(|(_, v)| !v.is_finite())
    {
        return Err(MetricsError::InvalidNumber { field });
    }

    if inputs.price <= 0.0 {
        return Err(MetricsError::NonPositivePrice);
    }

    let breakdown = MetricsBreakdown::from_inputs(inputs);

    let net_yield_percent = if breakdown.investment > 0.0 {
        NetYield::from(Some(
            (breakdown.annual_rent - breakdown.annual_interest) / breakdown.investment * 100.0,
        ))
    } else {
        NetYield::NotApplicable
    };

    Ok(InvestmentMetrics {
        jeonse_ratio_percent: inputs.deposit / inputs.price * 100.0,
        loan_to_value_percent: inputs.loan_amount / inputs.price * 100.0,
        net_yield_percent,
    })
}

/// Renders a percentage to two decimals. Non-finite values render as "N/A".
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return NOT_APPLICABLE.to_string();
    }
    format!("{value:.2}%")
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ────────────────────────────────────────────────────────────────────────────

fn parse_field(field: &'static str, raw: &str) -> Result<f64, MetricsError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(MetricsError::InvalidNumber { field })
}

/// Accepts any JSON value so that type mismatches surface as `InvalidNumber`
/// from `parse` rather than as a body rejection. Values that are neither text
/// nor numbers become empty text.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
