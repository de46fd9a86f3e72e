use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing request parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The store holds no rows the endpoint can answer from
    #[error("Not found: {0}")]
    NotFound(String),
    /// The observation store cannot be reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    /// A query reached the store and failed there
    #[error("Query error: {0}")]
    Query(String),
    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Query(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::InvalidInput(msg)
            | Self::NotFound(msg)
            | Self::StoreUnavailable(msg)
            | Self::Query(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "error": {
                "message": self.message(),
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::InvalidInput(_) => "invalid_input",
        AppError::NotFound(_) => "not_found",
        AppError::StoreUnavailable(_) => "store_unavailable",
        AppError::Query(_) => "query_error",
        AppError::Internal(_) => "internal_error",
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::StoreUnavailable(err.to_string())
            }
            sqlx::Error::Database(db_err) if is_unopenable(&**db_err) => {
                Self::StoreUnavailable(db_err.message().to_string())
            }
            _ => Self::Query(err.to_string()),
        }
    }
}

/// SQLITE_CANTOPEN (14) and SQLITE_NOTADB (26): the store file is missing,
/// unreadable or not a database at all
fn is_unopenable(err: &dyn sqlx::error::DatabaseError) -> bool {
    matches!(err.code().as_deref(), Some("14") | Some("26"))
        || err.message().contains("unable to open database file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::InvalidInput("start is required".to_string());
        assert_eq!(error.to_string(), "Invalid input: start is required");
    }

    #[test]
    fn test_error_type_name() {
        assert_eq!(error_type_name(&AppError::NotFound("test".to_string())), "not_found");
        assert_eq!(
            error_type_name(&AppError::StoreUnavailable("test".to_string())),
            "store_unavailable"
        );
    }

    #[test]
    fn test_pool_errors_map_to_store_unavailable() {
        assert!(matches!(
            AppError::from(sqlx::Error::PoolTimedOut),
            AppError::StoreUnavailable(_)
        ));
        assert!(matches!(
            AppError::from(sqlx::Error::PoolClosed),
            AppError::StoreUnavailable(_)
        ));
        assert!(matches!(
            AppError::from(sqlx::Error::RowNotFound),
            AppError::Query(_)
        ));
    }

    #[tokio::test]
    async fn test_error_response() {
        let response = AppError::InvalidInput("bad date".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::StoreUnavailable("down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
