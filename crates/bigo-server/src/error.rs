//! Request-level error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, warn};

use bigo_algo::{AlgoError, HarnessError};
use bigo_plot::PlotError;
use bigo_table::TableError;

use crate::analysis::AnalysisError;

/// Every handler failure ends up here. The body is always `{"error": msg}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_)   => StatusCode::NOT_FOUND,
            ApiError::Internal(_)   => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "request rejected");
        }

        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<AlgoError> for ApiError {
    fn from(e: AlgoError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<HarnessError> for ApiError {
    fn from(e: HarnessError) -> Self {
        match e {
            HarnessError::AlgorithmPanicked { .. } => ApiError::Internal(e.to_string()),
            other => ApiError::BadRequest(format!("Invalid parameters: {other}")),
        }
    }
}

impl From<PlotError> for ApiError {
    fn from(e: PlotError) -> Self {
        ApiError::Internal(format!("failed to render timing curve: {e}"))
    }
}

impl From<TableError> for ApiError {
    fn from(e: TableError) -> Self {
        match e {
            TableError::Rejected(_) => ApiError::BadRequest(e.to_string()),
            _ => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::Harness(h) => h.into(),
            AnalysisError::Plot(p)    => p.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_algorithm_is_bad_request() {
        let err: ApiError = AlgoError::UnknownAlgorithm {
            key:   "quick".into(),
            valid: vec!["bubble", "linear"],
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("bubble, linear"));
    }

    #[test]
    fn harness_errors_split_by_cause() {
        let bad: ApiError = HarnessError::InvalidStep.into();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
        assert!(bad.to_string().starts_with("Invalid parameters"));

        let panicked: ApiError = HarnessError::AlgorithmPanicked { size: 10, message: "boom".into() }.into();
        assert_eq!(panicked.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn storage_errors_are_internal_unless_rejected() {
        let rejected: ApiError = TableError::Rejected("end_time precedes start_time".into()).into();
        assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

        let broken: ApiError = TableError::InvalidSchema("no column 'items'".into()).into();
        assert_eq!(broken.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(broken.to_string().contains("items"));
    }
}
