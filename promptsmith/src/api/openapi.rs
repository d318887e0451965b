use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Promptsmith API",
        version = "1.0.0",
        description = "Prompt workbench. Forwards prompts to LLM providers and keeps settings and history.",
    ),
    paths(
        handlers::health::health,
        handlers::auth::login,
        handlers::execute::execute_prompt,
        handlers::settings::get_settings,
        handlers::settings::update_settings,
        handlers::settings::test_connection,
        handlers::history::list_history,
        handlers::history::delete_history_entry,
        handlers::history::clear_history,
    ),
    components(schemas(
        // Domain
        models::Provider,
        models::OutputFormat,
        models::HistoryEntry,
        // Execute
        dto::ExecuteRequest,
        dto::ExecuteResponse,
        // Auth
        dto::LoginRequest,
        dto::LoginResponse,
        // Settings
        dto::SettingsResponse,
        dto::UpdateSettingsRequest,
        dto::TestConnectionRequest,
        dto::TestConnectionResponse,
        // History
        dto::HistoryListResponse,
        dto::DeleteHistoryResponse,
        // Health (handler-local types)
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "auth", description = "Demo sign-in"),
        (name = "prompts", description = "Prompt execution"),
        (name = "settings", description = "Provider, API key, and format settings"),
        (name = "history", description = "Execution history"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
