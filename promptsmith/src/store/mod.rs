//! Local JSON persistence for settings and history.
//!
//! Both stores mirror browser-local-storage semantics: one JSON document per
//! store, read fully on open, rewritten fully on every mutation, and any
//! unreadable or unparsable document is silently replaced with defaults.

mod history;
mod settings;

pub use history::HistoryStore;
pub use settings::{SettingsPatch, SettingsStore};
