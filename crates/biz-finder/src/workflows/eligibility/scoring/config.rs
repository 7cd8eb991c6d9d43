use serde::{Deserialize, Serialize};

/// Rubric configuration describing the additive point rules and limit formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub base_score: i16,
    /// Credit scores below this value end the evaluation as ineligible.
    pub credit_cutoff: u16,
    /// Checked in order; the first tier whose minimum is met applies.
    pub credit_tiers: Vec<CreditTier>,
    pub employment_growth_points: i16,
    pub workforce_threshold: u32,
    pub workforce_points: i16,
    pub debt_bands: DebtBands,
    pub bonus_flag_points: i16,
    /// Operating profit above `annual_revenue * profit_margin_threshold` earns `profit_points`.
    pub profit_margin_threshold: f64,
    pub profit_points: i16,
    pub loss_points: i16,
    pub max_score: u8,
    /// Share of annual revenue available as total policy-fund headroom.
    pub limit_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditTier {
    pub min_credit_score: u16,
    pub points: i16,
}

/// Mutually exclusive debt-ratio bands, evaluated from the most severe down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtBands {
    pub severe_above: u32,
    pub severe_points: i16,
    pub elevated_above: u32,
    pub elevated_points: i16,
    pub healthy_below: u32,
    pub healthy_points: i16,
}

impl ScoringConfig {
    pub fn standard() -> Self {
        Self {
            base_score: 55,
            credit_cutoff: 600,
            credit_tiers: vec![
                CreditTier {
                    min_credit_score: 900,
                    points: 10,
                },
                CreditTier {
                    min_credit_score: 800,
                    points: 5,
                },
            ],
            employment_growth_points: 10,
            workforce_threshold: 10,
            workforce_points: 5,
            debt_bands: DebtBands {
                severe_above: 500,
                severe_points: -20,
                elevated_above: 300,
                elevated_points: -10,
                healthy_below: 150,
                healthy_points: 10,
            },
            bonus_flag_points: 5,
            profit_margin_threshold: 0.1,
            profit_points: 5,
            loss_points: -10,
            max_score: 98,
            limit_ratio: 0.4,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}
