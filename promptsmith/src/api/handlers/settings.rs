//! Settings endpoints: read the masked view, apply partial updates, and
//! test a provider key with a live round trip.

use axum::extract::State;
use axum::Json;

use crate::api::dto::{
    SettingsResponse, TestConnectionRequest, TestConnectionResponse, UpdateSettingsRequest,
};
use crate::api::extractors::AppJson;
use crate::api::state::AppState;
use crate::error::{PromptsmithError, Result};
use crate::keys;
use crate::store::SettingsPatch;

/// Current settings with the API key masked.
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Current settings", body = SettingsResponse),
    ),
    tag = "settings"
)]
pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    Json(SettingsResponse::from(state.settings.get()))
}

/// Apply a partial settings update.
///
/// A non-empty API key must match the target provider's key format; an empty
/// string clears the stored key.
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Updated settings", body = SettingsResponse),
        (status = 400, description = "API key does not match the provider's format"),
    ),
    tag = "settings"
)]
pub async fn update_settings(
    State(state): State<AppState>,
    AppJson(request): AppJson<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>> {
    if let Some(api_key) = request.api_key.as_deref() {
        if !api_key.is_empty() {
            let provider = request.provider.unwrap_or(state.settings.get().provider);
            if !keys::validate_api_key(api_key, provider) {
                return Err(PromptsmithError::Validation(format!(
                    "Invalid API key format for {}",
                    provider.display_name()
                )));
            }
        }
    }

    let updated = state.settings.update(SettingsPatch {
        provider: request.provider,
        api_key: request.api_key,
        output_format: request.output_format,
    })?;

    tracing::info!(provider = %updated.provider, "Settings updated");
    Ok(Json(SettingsResponse::from(updated)))
}

/// Fire a minimal request at the provider to check that a key works.
#[utoipa::path(
    post,
    path = "/api/providers/test",
    request_body = TestConnectionRequest,
    responses(
        (status = 200, description = "Connection test result", body = TestConnectionResponse),
    ),
    tag = "settings"
)]
pub async fn test_connection(
    State(state): State<AppState>,
    AppJson(request): AppJson<TestConnectionRequest>,
) -> Json<TestConnectionResponse> {
    let ok = state
        .providers
        .test_connection(request.provider, &request.api_key)
        .await;

    Json(TestConnectionResponse {
        provider: request.provider,
        ok,
    })
}
