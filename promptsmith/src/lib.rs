//! Promptsmith: a prompt workbench that forwards prompts to hosted LLM
//! providers and keeps per-user settings and execution history on disk.

pub mod api;
pub mod config;
pub mod error;
pub mod keys;
pub mod models;
pub mod providers;
pub mod store;
pub mod validation;
