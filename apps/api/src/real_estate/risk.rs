//! Risk-comment ladder: an ordered table of `(predicate, comment)` rules over
//! `InvestmentMetrics`. The first rule that applies wins; categories overlap,
//! so table order is part of the contract.

use serde::{Deserialize, Serialize};

use crate::real_estate::metrics::InvestmentMetrics;

/// LTV above this is critical regardless of any other signal.
pub const LTV_CRITICAL_PERCENT: f64 = 70.0;
/// Jeonse ratio above this carries reverse-jeonse risk.
pub const JEONSE_REVERSE_RISK_PERCENT: f64 = 80.0;
/// LTV at or below this is considered stable.
pub const LTV_STABLE_PERCENT: f64 = 50.0;
/// Inclusive healthy jeonse-ratio band.
pub const JEONSE_HEALTHY_BAND: (f64, f64) = (60.0, 75.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryHigh,
    High,
    LowModerate,
    Low,
    Indeterminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskComment {
    LtvCritical,
    ReverseJeonseRisk,
    HealthyBand,
    LtvStable,
    MixedSignals,
}

impl RiskComment {
    pub fn message(&self) -> &'static str {
        match self {
            RiskComment::LtvCritical => "LTV critically high; loan size should be reduced.",
            RiskComment::ReverseJeonseRisk => "Jeonse ratio > 80%; high reverse-jeonse risk.",
            RiskComment::HealthyBand => {
                "LTV stable and jeonse ratio in a healthy band; comparatively safe."
            }
            RiskComment::LtvStable => {
                "LTV stable; consider jeonse ratio and yield together before deciding."
            }
            RiskComment::MixedSignals => {
                "Mixed signals; weigh risk and expected return carefully before deciding."
            }
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        match self {
            RiskComment::LtvCritical => RiskLevel::VeryHigh,
            RiskComment::ReverseJeonseRisk => RiskLevel::High,
            RiskComment::HealthyBand => RiskLevel::Low,
            RiskComment::LtvStable => RiskLevel::LowModerate,
            RiskComment::MixedSignals => RiskLevel::Indeterminate,
        }
    }
}

/// A single rung of the ladder.
pub struct RiskRule {
    pub name: &'static str,
    pub applies: fn(&InvestmentMetrics) -> bool,
    pub comment: RiskComment,
}

/// Evaluated top to bottom. `MixedSignals` is the fallback when nothing applies.
pub const RISK_LADDER: &[RiskRule] = &[
    RiskRule {
        name: "ltv_critical",
        applies: ltv_critical,
        comment: RiskComment::LtvCritical,
    },
    RiskRule {
        name: "reverse_jeonse",
        applies: reverse_jeonse,
        comment: RiskComment::ReverseJeonseRisk,
    },
    RiskRule {
        name: "healthy_band",
        applies: healthy_band,
        comment: RiskComment::HealthyBand,
    },
    RiskRule {
        name: "ltv_stable",
        applies: ltv_stable,
        comment: RiskComment::LtvStable,
    },
];

/// Selects the advisory comment for a set of metrics.
pub fn classify_risk(metrics: &InvestmentMetrics) -> RiskComment {
    RISK_LADDER
        .iter()
        .find(|rule| (rule.applies)(metrics))
        .map(|rule| rule.comment)
        .unwrap_or(RiskComment::MixedSignals)
}

fn ltv_critical(m: &InvestmentMetrics) -> bool {
    m.loan_to_value_percent > LTV_CRITICAL_PERCENT
}

fn reverse_jeonse(m: &InvestmentMetrics) -> bool {
    m.jeonse_ratio_percent > JEONSE_REVERSE_RISK_PERCENT
}

fn healthy_band(m: &InvestmentMetrics) -> bool {
    let (low, high) = JEONSE_HEALTHY_BAND;
    ltv_stable(m) && (low..=high).contains(&m.jeonse_ratio_percent)
}

fn ltv_stable(m: &InvestmentMetrics) -> bool {
    m.loan_to_value_percent <= LTV_STABLE_PERCENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::real_estate::metrics::{compute_metrics, InvestmentInputs, NetYield};

    fn metrics(jeonse: f64, ltv: f64) -> InvestmentMetrics {
        InvestmentMetrics {
            jeonse_ratio_percent: jeonse,
            loan_to_value_percent: ltv,
            net_yield_percent: NetYield::NotApplicable,
        }
    }

    fn from_amounts(price: f64, deposit: f64, loan: f64) -> InvestmentMetrics {
        compute_metrics(&InvestmentInputs {
            price,
            deposit,
            monthly_rent: 0.0,
            loan_amount: loan,
            loan_rate_percent: 4.5,
        })
        .unwrap()
    }

    #[test]
    fn test_ltv_rule_outranks_jeonse_rule() {
        let m = from_amounts(1_000_000_000.0, 850_000_000.0, 750_000_000.0);
        assert!(m.loan_to_value_percent > 70.0 && m.jeonse_ratio_percent > 80.0);
        assert_eq!(classify_risk(&m), RiskComment::LtvCritical);
    }

    #[test]
    fn test_high_ltv_fires_regardless_of_other_values() {
        let m = from_amounts(1_000_000_000.0, 600_000_000.0, 750_000_000.0);
        let comment = classify_risk(&m);
        assert_eq!(comment, RiskComment::LtvCritical);
        assert_eq!(comment.risk_level(), RiskLevel::VeryHigh);
    }

    #[test]
    fn test_stable_ltv_outside_band_selects_rule_four() {
        let m = from_amounts(1_000_000_000.0, 500_000_000.0, 400_000_000.0);
        assert_eq!(classify_risk(&m), RiskComment::LtvStable);
    }

    #[test]
    fn test_reverse_jeonse_when_ltv_moderate() {
        assert_eq!(classify_risk(&metrics(85.0, 10.0)), RiskComment::ReverseJeonseRisk);
        assert_eq!(classify_risk(&metrics(80.01, 70.0)), RiskComment::ReverseJeonseRisk);
    }

    #[test]
    fn test_healthy_band_edges_are_inclusive() {
        assert_eq!(classify_risk(&metrics(60.0, 50.0)), RiskComment::HealthyBand);
        assert_eq!(classify_risk(&metrics(75.0, 50.0)), RiskComment::HealthyBand);
        assert_eq!(classify_risk(&metrics(75.01, 50.0)), RiskComment::LtvStable);
        assert_eq!(classify_risk(&metrics(59.99, 0.0)), RiskComment::LtvStable);
    }

    #[test]
    fn test_threshold_boundaries() {
        // exactly 70 is not critical; exactly 80 is not reverse-jeonse
        assert_eq!(classify_risk(&metrics(80.0, 70.0)), RiskComment::MixedSignals);
        assert_eq!(classify_risk(&metrics(10.0, 70.000_001)), RiskComment::LtvCritical);
    }

    #[test]
    fn test_fallback_when_ltv_between_fifty_and_seventy() {
        let comment = classify_risk(&metrics(65.0, 60.0));
        assert_eq!(comment, RiskComment::MixedSignals);
        assert_eq!(comment.risk_level(), RiskLevel::Indeterminate);
    }

    #[test]
    fn test_ladder_order_is_stable() {
        let names: Vec<_> = RISK_LADDER.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["ltv_critical", "reverse_jeonse", "healthy_band", "ltv_stable"]
        );
    }

    #[test]
    fn test_every_comment_has_message() {
        for c in [
            RiskComment::LtvCritical,
            RiskComment::ReverseJeonseRisk,
            RiskComment::HealthyBand,
            RiskComment::LtvStable,
            RiskComment::MixedSignals,
        ] {
            assert!(!c.message().is_empty());
        }
    }
}
