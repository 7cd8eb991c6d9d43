use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use biz_finder::workflows::eligibility::{eligibility_router, EligibilityService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_eligibility_routes(service: Arc<EligibilityService>) -> axum::Router {
    eligibility_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app_state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        }
    }

    fn app(state: AppState) -> axum::Router {
        with_eligibility_routes(Arc::new(EligibilityService::standard())).layer(Extension(state))
    }

    async fn get(router: axum::Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes")
            .status()
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_flag_set() {
        let state = app_state(false);

        assert_eq!(
            get(app(state.clone()), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );

        state.readiness.store(true, Ordering::Release);
        assert_eq!(get(app(state), "/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn health_metrics_and_catalog_share_one_router() {
        let state = app_state(true);

        assert_eq!(get(app(state.clone()), "/health").await, StatusCode::OK);
        assert_eq!(get(app(state.clone()), "/metrics").await, StatusCode::OK);
        assert_eq!(
            get(app(state), "/api/v1/eligibility/programs").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
