use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use travelog_core::TravelogError;

/// HTTP-facing wrapper around the unified error type.
///
/// Validation failures carry the full field list; not-found names the id;
/// store failures are logged and surfaced as a generic 500 body.
#[derive(Debug)]
pub struct ApiError(TravelogError);

impl From<TravelogError> for ApiError {
    fn from(err: TravelogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match &self.0 {
            TravelogError::Validation(fields) => {
                json!({ "error": "validation failed", "fields": fields })
            }
            TravelogError::EntryNotFound(_) => json!({ "error": self.0.to_string() }),
            other => {
                tracing::error!(error = %other, "request failed");
                json!({ "error": "internal error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travelog_core::entry::FieldError;

    #[test]
    fn validation_error_maps_to_400() {
        let err = ApiError(TravelogError::Validation(vec![FieldError {
            field: "title".to_string(),
            reason: "is required".to_string(),
        }]));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError(TravelogError::EntryNotFound("e1".to_string()));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failure_maps_to_500() {
        let io = std::io::Error::other("disk gone");
        let err = ApiError(TravelogError::Io(io));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
