use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveDate;
use derive_more::Display;
use serde_json::json;

#[derive(Debug, Display)]
pub enum ReconError {
    /// One of the input stores could not be read. Nothing was written.
    #[display(fmt = "failed to read {}: {}", store, message)]
    Fetch { store: &'static str, message: String },

    /// The final bulk upsert failed.
    #[display(fmt = "failed to upsert attendance status: {}", _0)]
    Upsert(String),

    #[display(fmt = "startDate {} is after endDate {}", start, end)]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[display(fmt = "invalid request: {}", _0)]
    InvalidRequest(String),
}

impl std::error::Error for ReconError {}

impl ReconError {
    pub fn fetch(store: &'static str, e: impl std::fmt::Display) -> Self {
        ReconError::Fetch {
            store,
            message: e.to_string(),
        }
    }
}

impl ResponseError for ReconError {
    fn status_code(&self) -> StatusCode {
        match self {
            ReconError::InvalidWindow { .. } | ReconError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ReconError::Fetch { .. } | ReconError::Upsert(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_are_server_errors() {
        let err = ReconError::fetch("attendance_swipes", "connection reset");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "failed to read attendance_swipes: connection reset"
        );

        let err = ReconError::Upsert("deadlock".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_windows_are_client_errors() {
        let err = ReconError::InvalidWindow {
            start: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "startDate 2024-03-12 is after endDate 2024-03-10"
        );
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }
}
