//! Demo login. There is no account database; any non-empty email/password
//! pair is accepted so the dashboard can gate itself behind a login screen.

use axum::Json;

use crate::api::dto::{LoginRequest, LoginResponse};
use crate::api::extractors::AppJson;
use crate::error::{PromptsmithError, Result};
use crate::validation::sanitize_input;

/// Sign in with any non-empty credentials.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
    ),
    tag = "auth"
)]
pub async fn login(AppJson(request): AppJson<LoginRequest>) -> Result<Json<LoginResponse>> {
    let email = sanitize_input(&request.email);
    if email.is_empty() || request.password.is_empty() {
        return Err(PromptsmithError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    tracing::info!(email = %email, "User signed in");
    Ok(Json(LoginResponse {
        email: email.to_string(),
        authenticated: true,
    }))
}
