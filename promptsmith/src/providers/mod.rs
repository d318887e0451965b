mod adapter;
mod client;
pub mod mock;

pub use adapter::{prompt_with_format, ProviderAdapter};
pub use client::ProviderClient;
