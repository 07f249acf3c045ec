//! Service Response Envelope
//!
//! Every gateway endpoint answers with the same tagged envelope:
//! `{"success": true, "payload": ...}` or
//! `{"success": false, "message": "..."}`. Domain failures travel inside a
//! 200 response; clients branch on `success` before touching `payload`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::StoreError;

/// Tagged success/payload/message envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ServiceResponse<T> {
    /// Successful response carrying a payload
    pub fn success(payload: T) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            message: None,
        }
    }

    /// Failed response carrying a message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            message: Some(message.into()),
        }
    }

    /// Wrap a store result, logging the failure branch
    pub fn from_result(result: Result<T, StoreError>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(err) => {
                warn!("gateway request failed: {}", err);
                Self::failure(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let response = ServiceResponse::success(42);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["payload"], 42);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_failure_shape() {
        let response: ServiceResponse<()> = ServiceResponse::failure("nope");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "nope");
        assert!(json.get("payload").is_none());
    }

    #[test]
    fn test_from_result_failure_branch() {
        let result: Result<(), StoreError> = Err(StoreError::not_found("anchor", "anchor.x"));
        let response = ServiceResponse::from_result(result);

        assert!(!response.success);
        assert!(response.message.unwrap().contains("anchor.x"));
    }
}
