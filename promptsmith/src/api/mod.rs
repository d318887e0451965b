pub mod dto;
mod extractors;
mod frontend;
pub mod handlers;
mod openapi;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
