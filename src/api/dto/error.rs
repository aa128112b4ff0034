//! Error response DTOs.

use serde::Serialize;

/// Standard error response format.
///
/// `error` carries the human-readable message; `code` is a stable
/// machine-readable discriminator. Request correlation happens through the
/// `x-request-id` response header, which is set on every response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            error: message.to_string(),
            code: code.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_error_and_code_only() {
        let response = ErrorResponse::new("NOT_FOUND", "car with id=5 not found");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "car with id=5 not found");
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
