mod config;
mod policy;
mod rules;

pub use config::{CreditTier, DebtBands, ScoringConfig};
pub use policy::{Eligibility, IneligibleReason};

use std::sync::Arc;

use super::domain::BusinessProfile;
use super::programs::{MatchedProgram, ProgramCatalog};
use serde::{Deserialize, Serialize};

/// Stateless scorer that applies the rubric and the program table to a profile.
#[derive(Debug, Clone)]
pub struct EligibilityScorer {
    config: ScoringConfig,
    catalog: Arc<ProgramCatalog>,
}

impl EligibilityScorer {
    pub fn new(config: ScoringConfig, catalog: Arc<ProgramCatalog>) -> Self {
        Self { config, catalog }
    }

    pub fn standard() -> Self {
        Self::new(ScoringConfig::standard(), Arc::new(ProgramCatalog::standard()))
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ProgramCatalog {
        &self.catalog
    }

    pub fn score(&self, profile: &BusinessProfile) -> ScoreResult {
        if let Some(reason) = policy::screen(profile, &self.config) {
            return ScoreResult::ineligible(reason);
        }

        let (mut components, raw_total) = rules::score_profile(profile, &self.config);
        let score = policy::clamp_score(raw_total, &self.config, &mut components);

        let max_limit = profile.annual_revenue * self.config.limit_ratio;
        let remaining_limit = (max_limit - profile.policy_loan_balance).max(0.0);
        let matched_programs = self.catalog.match_profile(profile, remaining_limit);

        ScoreResult {
            score,
            max_limit,
            remaining_limit,
            matched_programs,
            eligibility: Eligibility::Eligible,
            components,
        }
    }
}

/// Scored dimension recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Base,
    CreditTier,
    EmploymentGrowth,
    Workforce,
    DebtRatio,
    Certification,
    Profitability,
    Adjustment,
}

/// Discrete contribution to a score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: i16,
    pub notes: String,
}

/// Scoring output. Amounts are in 억원.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub max_limit: f64,
    pub remaining_limit: f64,
    pub matched_programs: Vec<MatchedProgram>,
    pub eligibility: Eligibility,
    pub components: Vec<ScoreComponent>,
}

impl ScoreResult {
    fn ineligible(reason: IneligibleReason) -> Self {
        Self {
            score: 0,
            max_limit: 0.0,
            remaining_limit: 0.0,
            matched_programs: Vec::new(),
            eligibility: Eligibility::Ineligible { reason },
            components: Vec::new(),
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self.eligibility, Eligibility::Eligible)
    }
}
