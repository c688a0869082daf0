//! Request-level errors and their HTTP mapping.
//!
//! Every handler returns `Result<_, ApiError>`. Validation problems become
//! 400 and unknown ids 404. Unreadable request bodies and store failures
//! become 500 with a fixed message per operation; the underlying cause is
//! logged but never sent to the client.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid todo id: {0}")]
    InvalidId(String),

    #[error("{context}")]
    MalformedBody {
        context: &'static str,
        #[source]
        source: JsonRejection,
    },

    #[error("Todo not found")]
    NotFound,

    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl ApiError {
    /// Adapter for `map_err` that tags a store failure with the message the
    /// client will see.
    pub fn store(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Store { context, source }
    }

    /// Adapter for `map_err` on a `Json` extraction result. The request body
    /// is reported under the operation's failure message.
    pub fn body(context: &'static str) -> impl FnOnce(JsonRejection) -> Self {
        move |source| Self::MalformedBody { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MalformedBody { .. } | Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidId(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Store { context, source } => {
                tracing::error!(error = %source, "{context}");
            }
            Self::MalformedBody { context, source } => {
                tracing::error!(error = %source.body_text(), "{context}");
            }
            other => tracing::debug!(%status, error = %other, "rejected request"),
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            ApiError::Validation("Title is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::InvalidId("abc".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        let err = ApiError::store("Failed to fetch todos")(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_errors_hide_the_database_cause() {
        let err = ApiError::store("Failed to delete todo")(sqlx::Error::PoolClosed);
        assert_eq!(err.to_string(), "Failed to delete todo");
    }
}
