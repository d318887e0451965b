use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::PromptsmithError;

/// `axum::Json` wrapper whose rejection is a [`PromptsmithError`], so body
/// parse failures come back in the same `{"error": ...}` shape as everything
/// else.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(PromptsmithError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for PromptsmithError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let message = err.to_string();
                if let Some(field) = extract_missing_field(&message) {
                    PromptsmithError::Validation(format!("Missing required field: {field}"))
                } else {
                    PromptsmithError::Validation(format!("Invalid JSON: {message}"))
                }
            }
            JsonRejection::JsonSyntaxError(err) => {
                PromptsmithError::Validation(format!("JSON syntax error: {err}"))
            }
            JsonRejection::MissingJsonContentType(_) => PromptsmithError::Validation(
                "Missing `Content-Type: application/json` header".to_string(),
            ),
            JsonRejection::BytesRejection(_) => {
                PromptsmithError::Internal("Failed to read request body".to_string())
            }
            _ => PromptsmithError::Validation(rejection.to_string()),
        }
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}
