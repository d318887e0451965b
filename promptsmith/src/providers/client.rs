//! Execution dispatcher: sends a prompt to the selected vendor and
//! normalizes the outcome.

use std::time::Duration;

use serde_json::Value;

use crate::config::ProviderHttpConfig;
use crate::error::{PromptsmithError, Result};
use crate::models::{OutputFormat, Provider};
use crate::providers::adapter::ProviderAdapter;

#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    base_url_override: Option<String>,
}

impl ProviderClient {
    pub fn new(config: &ProviderHttpConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| {
                PromptsmithError::Internal(format!("Failed to create HTTP client: {error}"))
            })?;

        Ok(Self {
            http,
            base_url_override: config.base_url_override.clone(),
        })
    }

    /// Forward `prompt` to `provider` and return the extracted completion
    /// text.
    ///
    /// Error normalization:
    /// - empty key → [`PromptsmithError::MissingApiKey`]
    /// - HTTP 401/403 → provider error "Invalid API key"
    /// - other non-2xx → provider error "Provider API error: {status}"
    /// - transport failure → provider error "Provider not responding, try again"
    pub async fn execute(
        &self,
        provider: Provider,
        api_key: &str,
        prompt: &str,
        format: OutputFormat,
    ) -> Result<String> {
        if api_key.is_empty() {
            return Err(PromptsmithError::MissingApiKey {
                provider: provider.as_str().to_string(),
            });
        }

        let adapter = ProviderAdapter::new(provider);
        let url = adapter.url(api_key, self.base_url_override.as_deref());

        let mut request = self.http.post(&url).json(&adapter.request_body(prompt, format));
        for (name, value) in adapter.headers(api_key) {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|error| {
            tracing::warn!(provider = %provider, error = %error, "Vendor request failed");
            PromptsmithError::Provider {
                provider: provider.as_str().to_string(),
                message: "Provider not responding, try again".to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                "Invalid API key".to_string()
            } else {
                format!("Provider API error: {status}")
            };
            return Err(PromptsmithError::Provider {
                provider: provider.as_str().to_string(),
                message,
            });
        }

        let body: Value = response.json().await.map_err(|error| PromptsmithError::Provider {
            provider: provider.as_str().to_string(),
            message: format!("Provider returned malformed JSON: {error}"),
        })?;

        Ok(adapter.extract_output(&body))
    }

    /// Fire a tiny plain-format prompt and report whether the vendor
    /// answered. Used by the settings dialog's "Test Connection" button.
    pub async fn test_connection(&self, provider: Provider, api_key: &str) -> bool {
        self.execute(provider, api_key, "Test connection", OutputFormat::Plain)
            .await
            .is_ok()
    }
}
