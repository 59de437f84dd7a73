use crate::entry::FieldError;
use thiserror::Error;

/// Unified error type for Travelog.
#[derive(Error, Debug)]
pub enum TravelogError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("entry not found: {0}")]
    EntryNotFound(String),

    #[error("store error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl TravelogError {
    /// Map to HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            TravelogError::Validation(_) => 400,
            TravelogError::EntryNotFound(_) => 404,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_distinguish_error_kinds() {
        assert_eq!(TravelogError::Validation(vec![]).status_code(), 400);
        assert_eq!(
            TravelogError::EntryNotFound("x".to_string()).status_code(),
            404
        );
        assert_eq!(
            TravelogError::Config("bad".to_string()).status_code(),
            500
        );
    }

    #[test]
    fn not_found_message_names_the_id() {
        let err = TravelogError::EntryNotFound("abc-123".to_string());
        assert_eq!(err.to_string(), "entry not found: abc-123");
    }
}
