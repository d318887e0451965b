//! Request/response DTOs for the workbench API.
//!
//! `provider` and `format` travel as raw strings on the execute path so that
//! an unknown provider name can fall through to the mock response instead of
//! being rejected at the serde boundary. Everywhere else the closed enums are
//! used directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::keys;
use crate::models::{HistoryEntry, OutputFormat, Provider, UserSettings};

// ---------------------------------------------------------------------------
// Execute
// ---------------------------------------------------------------------------

/// Request body for `POST /api/prompts/execute`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    /// The prompt text to forward to the provider.
    #[serde(default)]
    pub prompt: String,
    /// Requested output rendering: `xml`, `json`, `advanced`, or `plain`.
    #[serde(default)]
    pub format: Option<String>,
}

/// Successful execution result.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    pub output: String,
    pub provider: String,
    pub format: OutputFormat,
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
}

/// Per-request settings carried in the `x-user-settings` header as JSON:
/// `{"provider": "openai", "apiKeys": {"openai": "sk-..."}}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderSettings {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/login`. Demo auth: any non-empty pair
/// signs in.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub email: String,
    pub authenticated: bool,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Settings view returned to the UI. The API key is masked; `hasApiKey`
/// tells the dashboard whether real executions are possible.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub provider: Provider,
    pub provider_name: String,
    pub api_key: String,
    pub has_api_key: bool,
    pub output_format: OutputFormat,
    pub free_prompts_used: u32,
    pub max_free_prompts: u32,
}

impl From<UserSettings> for SettingsResponse {
    fn from(settings: UserSettings) -> Self {
        Self {
            provider: settings.provider,
            provider_name: settings.provider.display_name().to_string(),
            api_key: keys::mask(&settings.api_key),
            has_api_key: settings.has_api_key(),
            output_format: settings.output_format,
            free_prompts_used: settings.free_prompts_used,
            max_free_prompts: settings.max_free_prompts,
        }
    }
}

/// Request body for `PUT /api/settings`. All fields optional; present fields
/// replace the stored value.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub provider: Option<Provider>,
    pub api_key: Option<String>,
    pub output_format: Option<OutputFormat>,
}

/// Request body for `POST /api/providers/test`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestConnectionRequest {
    pub provider: Provider,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestConnectionResponse {
    pub provider: Provider,
    pub ok: bool,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryListResponse {
    pub entries: Vec<HistoryEntry>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteHistoryResponse {
    pub deleted: bool,
}
