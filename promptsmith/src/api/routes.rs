use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::{frontend, handlers, openapi, AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/auth/login", post(handlers::auth::login))
        .route("/prompts/execute", post(handlers::execute::execute_prompt))
        .route(
            "/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .route("/providers/test", post(handlers::settings::test_connection))
        .route(
            "/history",
            get(handlers::history::list_history).delete(handlers::history::clear_history),
        )
        .route(
            "/history/{id}",
            delete(handlers::history::delete_history_entry),
        )
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router());

    Router::new()
        .nest("/api", api)
        .route("/", get(frontend::serve_root))
        .route("/{*path}", get(frontend::serve_path))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
