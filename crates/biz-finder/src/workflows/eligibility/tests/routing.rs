use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::eligibility::router::{
    assess_handler, business_plan_handler, programs_handler,
};
use crate::workflows::eligibility::{eligibility_router, BusinessPlanRequest, ProfileSubmission};

fn json_request(uri: &str, payload: &impl serde::Serialize) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serialize payload")))
        .expect("request builds")
}

#[tokio::test]
async fn assess_handler_returns_score_and_insights() {
    let response = assess_handler(
        State(service()),
        Json(submission_from(&typical_profile())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["result"]["score"], json!(60));
    assert_eq!(payload["result"]["remaining_limit"], json!(2.0));
    assert_eq!(payload["result"]["eligibility"]["status"], json!("eligible"));
    assert_eq!(payload["insights"]["grade"], json!("B"));
    assert!(payload["narrative"].is_string());
}

#[tokio::test]
async fn assessment_route_reports_ineligibility_as_success() {
    let router = eligibility_router(service());

    let response = router
        .oneshot(json_request(
            "/api/v1/eligibility/assessments",
            &submission_from(&ineligible_profile()),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["result"]["score"], json!(0));
    assert_eq!(
        payload["result"]["eligibility"]["reason"]["code"],
        json!("credit_below_cutoff")
    );
    assert!(payload.get("insights").is_none());
}

#[tokio::test]
async fn assessment_route_rejects_out_of_range_fields() {
    let router = eligibility_router(service());
    let submission = ProfileSubmission {
        employee_count: 5000,
        ..submission_from(&typical_profile())
    };

    let response = router
        .oneshot(json_request("/api/v1/eligibility/assessments", &submission))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    let message = payload["error"].as_str().expect("error message");
    assert!(message.contains("employee_count"));
}

#[tokio::test]
async fn business_plan_handler_returns_draft_and_body() {
    let request = BusinessPlanRequest {
        profile: submission_from(&typical_profile()),
        program_key: Some("new_growth_guarantee".to_string()),
        issued_on: Some(issued_on()),
    };

    let response = business_plan_handler(State(service()), Json(request)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["draft"]["program_key"],
        json!("new_growth_guarantee")
    );
    assert_eq!(payload["draft"]["form_id"], json!("2025-KODIT-LN-01"));
    let body = payload["body"].as_str().expect("body text");
    assert!(body.contains("guarantee-backed operating loan"));
}

#[tokio::test]
async fn business_plan_route_maps_unknown_program_to_not_found() {
    let router = eligibility_router(service());
    let request = BusinessPlanRequest {
        profile: submission_from(&typical_profile()),
        program_key: Some("lottery".to_string()),
        issued_on: Some(issued_on()),
    };

    let response = router
        .oneshot(json_request("/api/v1/eligibility/business-plan", &request))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn business_plan_route_refuses_ineligible_profiles() {
    let router = eligibility_router(service());
    let request = BusinessPlanRequest {
        profile: submission_from(&ineligible_profile()),
        program_key: None,
        issued_on: None,
    };

    let response = router
        .oneshot(json_request("/api/v1/eligibility/business-plan", &request))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("below the 600 cutoff")));
}

#[tokio::test]
async fn programs_handler_lists_catalog_and_reference_cases() {
    let Json(view) = programs_handler(State(service())).await;

    assert_eq!(view.programs.len(), 5);
    assert_eq!(view.reference_cases.len(), 6);

    let payload: Value = serde_json::to_value(&view).expect("view serializes");
    assert_eq!(payload["programs"][0]["rule"]["kind"], json!("technical_certification"));
    assert_eq!(payload["reference_cases"][0]["sector"], json!("manufacturing"));
}

#[tokio::test]
async fn programs_route_is_served() {
    let router = eligibility_router(service());

    let response = router
        .oneshot(
            Request::get("/api/v1/eligibility/programs")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
}
