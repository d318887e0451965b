//! User settings domain model: provider choice, API key, output format, and
//! the free-tier prompt counter.

use serde::{Deserialize, Serialize};

/// Number of mock executions a user gets before an API key is required.
pub const DEFAULT_MAX_FREE_PROMPTS: u32 = 5;

/// Supported LLM vendors. Closed set; anything else on the wire is rejected
/// at the serde boundary.
///
/// Wire format: lowercase string (`"openai"`, `"gemini"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Gemini,
    Anthropic,
    Groq,
    Together,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::OpenAi,
        Provider::Gemini,
        Provider::Anthropic,
        Provider::Groq,
        Provider::Together,
    ];

    /// Canonical wire/storage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::Anthropic => "anthropic",
            Provider::Groq => "groq",
            Provider::Together => "together",
        }
    }

    /// Human-readable vendor name for UI display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Gemini => "Google Gemini",
            Provider::Anthropic => "Anthropic Claude",
            Provider::Groq => "Groq",
            Provider::Together => "Together AI",
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "gemini" => Ok(Provider::Gemini),
            "anthropic" => Ok(Provider::Anthropic),
            "groq" => Ok(Provider::Groq),
            "together" => Ok(Provider::Together),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output rendering requested from the vendor.
///
/// Wire format: lowercase string (`"xml"`, `"json"`, `"advanced"`, `"plain"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Xml,
    Json,
    Advanced,
    Plain,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Json => "json",
            OutputFormat::Advanced => "advanced",
            OutputFormat::Plain => "plain",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "json" => Ok(OutputFormat::Json),
            "advanced" => Ok(OutputFormat::Advanced),
            "plain" => Ok(OutputFormat::Plain),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-user workbench settings.
///
/// The API key is held in the clear in memory; it is obfuscated only when
/// written to disk by the settings store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub provider: Provider,
    #[serde(default)]
    pub api_key: String,
    pub output_format: OutputFormat,
    #[serde(default)]
    pub free_prompts_used: u32,
    #[serde(default = "default_max_free_prompts")]
    pub max_free_prompts: u32,
}

fn default_max_free_prompts() -> u32 {
    DEFAULT_MAX_FREE_PROMPTS
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            provider: Provider::OpenAi,
            api_key: String::new(),
            output_format: OutputFormat::Json,
            free_prompts_used: 0,
            max_free_prompts: DEFAULT_MAX_FREE_PROMPTS,
        }
    }
}

impl UserSettings {
    /// Whether the free tier still has prompts left.
    pub fn can_use_free_plan(&self) -> bool {
        self.free_prompts_used < self.max_free_prompts
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn provider_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Provider::OpenAi).unwrap(),
            serde_json::json!("openai")
        );
        assert_eq!(
            serde_json::to_value(Provider::Together).unwrap(),
            serde_json::json!("together")
        );
    }

    #[test]
    fn provider_parses_known_names() {
        assert_eq!(Provider::from_str("anthropic"), Ok(Provider::Anthropic));
        assert_eq!(Provider::from_str("GROQ"), Ok(Provider::Groq));
        assert!(Provider::from_str("mistral").is_err());
        assert!(Provider::from_str("").is_err());
    }

    #[test]
    fn unknown_provider_rejected_at_serde_boundary() {
        let result: Result<Provider, _> = serde_json::from_str("\"cohere\"");
        assert!(result.is_err());
    }

    #[test]
    fn format_parses_known_names() {
        assert_eq!(OutputFormat::from_str("xml"), Ok(OutputFormat::Xml));
        assert_eq!(
            OutputFormat::from_str("Advanced"),
            Ok(OutputFormat::Advanced)
        );
        assert!(OutputFormat::from_str("yaml").is_err());
    }

    #[test]
    fn default_settings_match_free_tier() {
        let settings = UserSettings::default();
        assert_eq!(settings.provider, Provider::OpenAi);
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert!(!settings.has_api_key());
        assert_eq!(settings.free_prompts_used, 0);
        assert_eq!(settings.max_free_prompts, DEFAULT_MAX_FREE_PROMPTS);
        assert!(settings.can_use_free_plan());
    }

    #[test]
    fn free_plan_exhausts_at_limit() {
        let settings = UserSettings {
            free_prompts_used: DEFAULT_MAX_FREE_PROMPTS,
            ..UserSettings::default()
        };
        assert!(!settings.can_use_free_plan());
    }

    #[test]
    fn settings_deserialize_fills_missing_fields() {
        let json = r#"{"provider":"gemini","outputFormat":"plain"}"#;
        let settings: UserSettings = serde_json::from_str(json).expect("deserialize");
        assert_eq!(settings.provider, Provider::Gemini);
        assert_eq!(settings.output_format, OutputFormat::Plain);
        assert_eq!(settings.api_key, "");
        assert_eq!(settings.max_free_prompts, DEFAULT_MAX_FREE_PROMPTS);
    }
}
