use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::error;

use crate::db::{DatabaseError, ErrorResponse};

/// Failure of a data route. Always answered as 500 `{error: message}`.
#[derive(Debug)]
pub struct ApiError(pub DatabaseError);

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Database error: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(self.0.to_string())),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_errors_become_500() {
        let response =
            ApiError::from(DatabaseError::Query("Syntax error".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
