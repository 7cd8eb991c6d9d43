use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::documents::{self, BusinessPlanDraft, DocumentError};
use super::domain::BusinessProfile;
use super::insights::{self, DashboardInsights};
use super::intake::{IntakeGuard, IntakeViolation, ProfileSubmission};
use super::normalizer::normalize_label;
use super::programs::{MatchedProgram, ProgramCatalog};
use super::scoring::{Eligibility, EligibilityScorer, IneligibleReason, ScoreResult, ScoringConfig};

/// Service composing the intake guard, scorer, program table and documents.
#[derive(Debug, Clone)]
pub struct EligibilityService {
    guard: IntakeGuard,
    scorer: EligibilityScorer,
    catalog: Arc<ProgramCatalog>,
}

/// Everything the dashboard renders for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub profile: BusinessProfile,
    pub result: ScoreResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<DashboardInsights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

impl EligibilityService {
    pub fn new(config: ScoringConfig, catalog: ProgramCatalog) -> Self {
        Self::with_guard(IntakeGuard::default(), config, catalog)
    }

    pub fn with_guard(guard: IntakeGuard, config: ScoringConfig, catalog: ProgramCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let scorer = EligibilityScorer::new(config, catalog.clone());
        Self {
            guard,
            scorer,
            catalog,
        }
    }

    pub fn standard() -> Self {
        Self::new(ScoringConfig::standard(), ProgramCatalog::standard())
    }

    pub fn catalog(&self) -> &ProgramCatalog {
        &self.catalog
    }

    pub fn scorer(&self) -> &EligibilityScorer {
        &self.scorer
    }

    /// Validate a submission and assess it.
    pub fn assess(
        &self,
        submission: ProfileSubmission,
    ) -> Result<Assessment, EligibilityServiceError> {
        let profile = self.guard.profile_from_submission(submission)?;
        self.assess_profile(profile)
    }

    /// Assess an already validated profile.
    pub fn assess_profile(
        &self,
        profile: BusinessProfile,
    ) -> Result<Assessment, EligibilityServiceError> {
        let result = self.scorer.score(&profile);
        debug!(
            score = result.score,
            eligible = result.is_eligible(),
            programs = result.matched_programs.len(),
            "profile scored"
        );

        let insights = insights::generate_insights(&profile, &result, &self.catalog);
        let narrative = match &insights {
            Some(insights) => Some(documents::render_narrative(&profile, &result, insights)?),
            None => None,
        };

        Ok(Assessment {
            profile,
            result,
            insights,
            narrative,
        })
    }

    /// Draft a loan application for one matched program. Without a key the first
    /// matched program is used.
    pub fn draft_business_plan(
        &self,
        submission: ProfileSubmission,
        program_key: Option<&str>,
        issued_on: NaiveDate,
    ) -> Result<BusinessPlanDraft, EligibilityServiceError> {
        let profile = self.guard.profile_from_submission(submission)?;
        let result = self.scorer.score(&profile);

        if let Eligibility::Ineligible { reason } = result.eligibility {
            return Err(EligibilityServiceError::Ineligible(reason));
        }

        let program = select_program(&self.catalog, &result.matched_programs, program_key)?;
        let draft = documents::draft_business_plan(&profile, program, issued_on)?;
        debug!(program = %draft.program_key, %issued_on, "business plan drafted");
        Ok(draft)
    }
}

fn select_program<'a>(
    catalog: &ProgramCatalog,
    matched: &'a [MatchedProgram],
    program_key: Option<&str>,
) -> Result<&'a MatchedProgram, EligibilityServiceError> {
    let mut programs = matched.iter().filter(|program| !program.is_warning());

    match program_key {
        Some(requested) => {
            let key = normalize_label(requested);
            if catalog.entry(&key).is_none() {
                return Err(EligibilityServiceError::UnknownProgram(requested.to_string()));
            }
            programs
                .find(|program| program.key == key)
                .ok_or(EligibilityServiceError::ProgramNotMatched(key))
        }
        None => programs
            .next()
            .ok_or(EligibilityServiceError::NoMatchedProgram),
    }
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error("{}", .0.summary())]
    Ineligible(IneligibleReason),
    #[error("unknown program '{0}'")]
    UnknownProgram(String),
    #[error("profile does not qualify for program '{0}'")]
    ProgramNotMatched(String),
    #[error("profile does not qualify for any program")]
    NoMatchedProgram,
    #[error(transparent)]
    Document(#[from] DocumentError),
}
