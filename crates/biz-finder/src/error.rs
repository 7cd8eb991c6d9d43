use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::catalog::ProgramCatalogImportError;
use crate::workflows::eligibility::EligibilityServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Catalog(ProgramCatalogImportError),
    Eligibility(EligibilityServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Catalog(err) => write!(f, "program catalog error: {}", err),
            AppError::Eligibility(err) => write!(f, "eligibility error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Eligibility(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Eligibility(err) => err.status_code(),
            AppError::Catalog(ProgramCatalogImportError::Io(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Catalog(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ProgramCatalogImportError> for AppError {
    fn from(value: ProgramCatalogImportError) -> Self {
        Self::Catalog(value)
    }
}

impl From<EligibilityServiceError> for AppError {
    fn from(value: EligibilityServiceError) -> Self {
        Self::Eligibility(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligibility_errors_keep_their_http_status() {
        let response =
            AppError::from(EligibilityServiceError::UnknownProgram("missing".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::from(EligibilityServiceError::NoMatchedProgram).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn malformed_catalog_is_a_client_error() {
        let response = AppError::from(ProgramCatalogImportError::Empty).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
