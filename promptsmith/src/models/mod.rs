pub mod history;
pub mod settings;

pub use history::{HistoryEntry, MAX_HISTORY_ITEMS};
pub use settings::{OutputFormat, Provider, UserSettings, DEFAULT_MAX_FREE_PROMPTS};
