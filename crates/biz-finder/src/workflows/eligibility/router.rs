use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use super::domain::Sector;
use super::intake::ProfileSubmission;
use super::programs::ProgramEntry;
use super::service::{EligibilityService, EligibilityServiceError};

/// Request body for business-plan drafting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessPlanRequest {
    pub profile: ProfileSubmission,
    #[serde(default)]
    pub program_key: Option<String>,
    #[serde(default)]
    pub issued_on: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ReferenceCaseView {
    pub sector: Sector,
    pub sector_label: &'static str,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct ProgramCatalogView {
    pub programs: Vec<ProgramEntry>,
    pub reference_cases: Vec<ReferenceCaseView>,
}

/// Router builder exposing HTTP endpoints for assessment and drafting.
pub fn eligibility_router(service: Arc<EligibilityService>) -> Router {
    Router::new()
        .route("/api/v1/eligibility/assessments", post(assess_handler))
        .route(
            "/api/v1/eligibility/business-plan",
            post(business_plan_handler),
        )
        .route("/api/v1/eligibility/programs", get(programs_handler))
        .with_state(service)
}

pub(crate) async fn assess_handler(
    State(service): State<Arc<EligibilityService>>,
    Json(submission): Json<ProfileSubmission>,
) -> Response {
    match service.assess(submission) {
        Ok(assessment) => {
            info!(
                score = assessment.result.score,
                eligible = assessment.result.is_eligible(),
                "assessment served"
            );
            (StatusCode::OK, Json(assessment)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn business_plan_handler(
    State(service): State<Arc<EligibilityService>>,
    Json(request): Json<BusinessPlanRequest>,
) -> Response {
    let BusinessPlanRequest {
        profile,
        program_key,
        issued_on,
    } = request;
    let issued_on = issued_on.unwrap_or_else(|| Local::now().date_naive());

    match service.draft_business_plan(profile, program_key.as_deref(), issued_on) {
        Ok(draft) => {
            let body = draft.body();
            let payload = json!({
                "draft": draft,
                "body": body,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn programs_handler(
    State(service): State<Arc<EligibilityService>>,
) -> Json<ProgramCatalogView> {
    let catalog = service.catalog();
    Json(ProgramCatalogView {
        programs: catalog.entries().to_vec(),
        reference_cases: catalog
            .reference_cases()
            .map(|(sector, summary)| ReferenceCaseView {
                sector,
                sector_label: sector.label(),
                summary: summary.to_string(),
            })
            .collect(),
    })
}

impl EligibilityServiceError {
    /// HTTP status reported for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            EligibilityServiceError::Intake(_)
            | EligibilityServiceError::Ineligible(_)
            | EligibilityServiceError::ProgramNotMatched(_)
            | EligibilityServiceError::NoMatchedProgram => StatusCode::UNPROCESSABLE_ENTITY,
            EligibilityServiceError::UnknownProgram(_) => StatusCode::NOT_FOUND,
            EligibilityServiceError::Document(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn error_response(error: EligibilityServiceError) -> Response {
    let status = error.status_code();
    if status.is_server_error() {
        warn!(%error, "eligibility request failed");
    }

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
