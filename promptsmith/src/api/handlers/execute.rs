//! Prompt execution: the dispatcher behind `POST /api/prompts/execute`.
//!
//! Settings resolution order: the `x-user-settings` header (per-request
//! overrides sent by the dashboard) wins over the stored settings. A provider
//! name outside the supported set falls through to a mock response rather
//! than failing, and requests without an API key run against the free tier
//! while it lasts.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;

use crate::api::dto::{ExecuteRequest, ExecuteResponse, HeaderSettings};
use crate::api::extractors::AppJson;
use crate::api::state::AppState;
use crate::error::{PromptsmithError, Result};
use crate::models::{HistoryEntry, OutputFormat, Provider};
use crate::providers::mock;
use crate::validation::validate_prompt;

pub const USER_SETTINGS_HEADER: &str = "x-user-settings";

/// Where the execution settings came from, which decides the error shape
/// when no API key is available.
enum SettingsSource {
    Header,
    Store,
}

/// Run a prompt against the configured provider.
#[utoipa::path(
    post,
    path = "/api/prompts/execute",
    request_body = ExecuteRequest,
    responses(
        (status = 200, description = "Prompt executed", body = ExecuteResponse),
        (status = 400, description = "Invalid prompt or no API key available"),
        (status = 500, description = "Provider call failed"),
    ),
    tag = "prompts"
)]
pub async fn execute_prompt(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(request): AppJson<ExecuteRequest>,
) -> Result<Json<ExecuteResponse>> {
    validate_prompt(&request.prompt)?;

    let stored = state.settings.get();
    let format = match request.format.as_deref() {
        Some(raw) => raw.parse::<OutputFormat>().map_err(|_| {
            PromptsmithError::Validation(format!("Unknown output format: {raw}"))
        })?,
        None => stored.output_format,
    };

    let (provider_raw, api_key, source) = match parse_header_settings(&headers) {
        Some(header) => {
            let provider_raw = header
                .provider
                .unwrap_or_else(|| Provider::OpenAi.as_str().to_string());
            let api_key = header.api_keys.get(&provider_raw).cloned();
            (provider_raw, api_key, SettingsSource::Header)
        }
        None => {
            let api_key = (!stored.api_key.is_empty()).then(|| stored.api_key.clone());
            (
                stored.provider.as_str().to_string(),
                api_key,
                SettingsSource::Store,
            )
        }
    };

    let provider = match provider_raw.parse::<Provider>() {
        Ok(provider) => provider,
        Err(_) => {
            // Unsupported provider names get a canned response so the UI
            // keeps working with experimental entries.
            tracing::debug!(provider = %provider_raw, "Unsupported provider, returning mock response");
            let output = mock::unsupported_provider_response(&provider_raw, &request.prompt);
            record_success(&state, &request.prompt, &output, format, &provider_raw)?;
            return Ok(Json(respond(output, provider_raw, format)));
        }
    };

    let Some(api_key) = api_key.filter(|key| !key.is_empty()) else {
        if state.settings.can_use_free_plan() {
            let output = mock::free_plan_response(&request.prompt, format);
            let used = state.settings.record_free_prompt()?;
            tracing::info!(free_prompts_used = used, "Executed prompt on the free tier");
            record_success(&state, &request.prompt, &output, format, provider.as_str())?;
            return Ok(Json(respond(output, provider.as_str().to_string(), format)));
        }

        return Err(match source {
            SettingsSource::Header => PromptsmithError::MissingApiKey {
                provider: provider.as_str().to_string(),
            },
            SettingsSource::Store => PromptsmithError::FreeTierExhausted,
        });
    };

    match state
        .providers
        .execute(provider, &api_key, &request.prompt, format)
        .await
    {
        Ok(output) => {
            record_success(&state, &request.prompt, &output, format, provider.as_str())?;
            Ok(Json(respond(output, provider.as_str().to_string(), format)))
        }
        Err(error) => {
            let detail = match &error {
                PromptsmithError::Provider { message, .. } => message.clone(),
                other => other.to_string(),
            };
            state.history.append(HistoryEntry::new(
                request.prompt.clone(),
                format!("Error: {detail}"),
                format,
                provider.as_str().to_string(),
                false,
            ))?;
            Err(error)
        }
    }
}

fn parse_header_settings(headers: &HeaderMap) -> Option<HeaderSettings> {
    let raw = headers.get(USER_SETTINGS_HEADER)?.to_str().ok()?;
    match serde_json::from_str::<HeaderSettings>(raw) {
        Ok(settings) => Some(settings),
        Err(error) => {
            // A malformed header falls back to stored settings.
            tracing::warn!(error = %error, "Ignoring unparseable x-user-settings header");
            None
        }
    }
}

fn record_success(
    state: &AppState,
    prompt: &str,
    output: &str,
    format: OutputFormat,
    provider: &str,
) -> Result<()> {
    state.history.append(HistoryEntry::new(
        prompt.to_string(),
        output.to_string(),
        format,
        provider.to_string(),
        true,
    ))?;
    Ok(())
}

fn respond(output: String, provider: String, format: OutputFormat) -> ExecuteResponse {
    ExecuteResponse {
        output,
        provider,
        format,
        timestamp: Utc::now(),
    }
}
