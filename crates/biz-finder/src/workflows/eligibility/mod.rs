//! Policy-fund eligibility: intake validation, scoring, program matching,
//! dashboard insights and templated documents.

pub mod documents;
pub mod domain;
pub mod insights;
pub mod intake;
pub(crate) mod normalizer;
pub mod programs;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use documents::{BusinessPlanDraft, DocumentError, DocumentTemplate, TemplateSlots};
pub use domain::{BonusFlags, BusinessProfile, Sector, UnknownSector};
pub use insights::{DashboardInsights, Grade, RadarAxis};
pub use intake::{IntakeBounds, IntakeGuard, IntakeViolation, ProfileSubmission};
pub use programs::{
    MatchKind, MatchedProgram, ProgramCatalog, ProgramCategory, ProgramEntry, ProgramRule,
};
pub use router::{eligibility_router, BusinessPlanRequest};
pub use scoring::{
    Eligibility, EligibilityScorer, IneligibleReason, ScoreComponent, ScoreFactor, ScoreResult,
    ScoringConfig,
};
pub use service::{Assessment, EligibilityService, EligibilityServiceError};
