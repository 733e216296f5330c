//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::AdminRequired => StatusCode::FORBIDDEN,
            Self::InvalidStatusTransition => StatusCode::CONFLICT,
            Self::RateNotFound => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ValueOutOfRange => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_status() {
        assert_eq!(ErrorCode::AdminRequired.http_status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_pricing_status() {
        assert_eq!(
            ErrorCode::RateNotFound.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(
            ErrorCode::InvalidStatusTransition.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_bad_request_status() {
        assert_eq!(ErrorCode::ValueOutOfRange.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_config_status() {
        assert_eq!(
            ErrorCode::ConfigError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
