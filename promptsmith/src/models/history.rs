//! Prompt history domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::settings::{OutputFormat, Provider};

/// History is capped to the most recent 100 entries; older entries are
/// evicted FIFO on append.
pub const MAX_HISTORY_ITEMS: usize = 100;

/// A single past execution, successful or not.
///
/// `provider` is kept as a raw string so that entries recorded for the
/// unsupported-provider mock fallback round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Millisecond-timestamp-derived identifier.
    pub id: String,
    pub prompt: String,
    pub output: String,
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
    pub format: OutputFormat,
    pub provider: String,
    pub success: bool,
}

impl HistoryEntry {
    /// Build a new entry stamped with the current time.
    pub fn new(
        prompt: impl Into<String>,
        output: impl Into<String>,
        format: OutputFormat,
        provider: impl Into<String>,
        success: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            prompt: prompt.into(),
            output: output.into(),
            timestamp: now,
            format,
            provider: provider.into(),
            success,
        }
    }

    /// Convenience constructor for entries tied to a known provider.
    pub fn for_provider(
        prompt: impl Into<String>,
        output: impl Into<String>,
        format: OutputFormat,
        provider: Provider,
        success: bool,
    ) -> Self {
        Self::new(prompt, output, format, provider.as_str(), success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_derives_id_from_timestamp() {
        let entry = HistoryEntry::new(
            "hello",
            "world",
            OutputFormat::Plain,
            "openai",
            true,
        );
        assert_eq!(entry.id, entry.timestamp.timestamp_millis().to_string());
        assert!(entry.success);
    }

    #[test]
    fn entry_round_trips_through_json() {
        let entry = HistoryEntry::for_provider(
            "a prompt",
            "an output",
            OutputFormat::Xml,
            Provider::Groq,
            false,
        );
        let json = serde_json::to_string(&entry).expect("serialize");
        let back: HistoryEntry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(entry, back);
        assert!(json.contains("\"provider\":\"groq\""));
    }
}
