use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptsmithError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No API key found for {provider}. Please add your API key in settings.")]
    MissingApiKey { provider: String },

    #[error("Please add API key in Settings.")]
    FreeTierExhausted,

    #[error("Provider {provider} error: {message}")]
    Provider { provider: String, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl PromptsmithError {
    /// Body fields for the wire error contract:
    /// `{ "error": ..., "requiresApiKey"?: true, "details"?: ... }`.
    fn body(&self) -> serde_json::Value {
        match self {
            PromptsmithError::MissingApiKey { .. } | PromptsmithError::FreeTierExhausted => {
                json!({ "error": self.to_string(), "requiresApiKey": true })
            }
            PromptsmithError::Provider { provider, message } => json!({
                "error": format!(
                    "Failed to get response from {provider}. Please check your API key."
                ),
                "details": message,
            }),
            PromptsmithError::Validation(msg) | PromptsmithError::NotFound(msg) => {
                json!({ "error": msg })
            }
            PromptsmithError::Json(e) => json!({ "error": format!("Invalid JSON: {e}") }),
            // Internal details are logged, never surfaced.
            PromptsmithError::Http(_)
            | PromptsmithError::Io(_)
            | PromptsmithError::Internal(_) => {
                json!({ "error": "Internal server error" })
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            PromptsmithError::Validation(_)
            | PromptsmithError::Json(_)
            | PromptsmithError::MissingApiKey { .. }
            | PromptsmithError::FreeTierExhausted => StatusCode::BAD_REQUEST,
            PromptsmithError::NotFound(_) => StatusCode::NOT_FOUND,
            PromptsmithError::Provider { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            PromptsmithError::Http(_)
            | PromptsmithError::Io(_)
            | PromptsmithError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PromptsmithError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            PromptsmithError::Http(_) | PromptsmithError::Io(_) | PromptsmithError::Internal(_)
        ) {
            tracing::error!(error = %self, "Internal error mapped to response");
        }

        (self.status(), Json(self.body())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, PromptsmithError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_sets_requires_api_key_flag() {
        let err = PromptsmithError::MissingApiKey {
            provider: "groq".to_string(),
        };
        let body = err.body();
        assert_eq!(body["requiresApiKey"], true);
        assert!(body["error"].as_str().unwrap().contains("groq"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn provider_error_carries_details() {
        let err = PromptsmithError::Provider {
            provider: "openai".to_string(),
            message: "Invalid API key".to_string(),
        };
        let body = err.body();
        assert_eq!(body["details"], "Invalid API key");
        assert_eq!(
            body["error"],
            "Failed to get response from openai. Please check your API key."
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_error_does_not_leak() {
        let err = PromptsmithError::Internal("secret path /etc/shadow".to_string());
        assert_eq!(err.body()["error"], "Internal server error");
        assert!(err.body().get("details").is_none());
    }

    #[test]
    fn validation_error_is_bad_request() {
        let err = PromptsmithError::Validation("Prompt is required".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body()["error"], "Prompt is required");
    }

    #[test]
    fn free_tier_exhausted_asks_for_key() {
        let err = PromptsmithError::FreeTierExhausted;
        assert_eq!(err.body()["error"], "Please add API key in Settings.");
        assert_eq!(err.body()["requiresApiKey"], true);
    }
}
