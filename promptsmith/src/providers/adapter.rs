//! Per-vendor request/response adapters.
//!
//! Each supported vendor is described by its endpoint, headers, request body
//! shape, and the JSON path its completion text comes back on. The adapter is
//! a pure mapping; all HTTP is done by [`super::ProviderClient`].

use serde_json::{json, Value};

use crate::models::{OutputFormat, Provider};

/// Fallback output when the vendor response lacks the expected field.
pub const NO_RESPONSE: &str = "No response received";

const OPENAI_HOST: &str = "https://api.openai.com";
const GEMINI_HOST: &str = "https://generativelanguage.googleapis.com";
const ANTHROPIC_HOST: &str = "https://api.anthropic.com";
const GROQ_HOST: &str = "https://api.groq.com";
const TOGETHER_HOST: &str = "https://api.together.xyz";

const OPENAI_MODEL: &str = "gpt-3.5-turbo";
const GEMINI_MODEL: &str = "gemini-pro";
const ANTHROPIC_MODEL: &str = "claude-3-sonnet-20240229";
const GROQ_MODEL: &str = "mixtral-8x7b-32768";
const TOGETHER_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

const MAX_TOKENS: u32 = 1000;

/// Suffix the prompt with the requested rendering, e.g.
/// `"...\n\nPlease respond in JSON format."`.
pub fn prompt_with_format(prompt: &str, format: OutputFormat) -> String {
    format!(
        "{prompt}\n\nPlease respond in {} format.",
        format.as_str().to_uppercase()
    )
}

#[derive(Debug, Clone, Copy)]
pub struct ProviderAdapter {
    provider: Provider,
}

impl ProviderAdapter {
    pub fn new(provider: Provider) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    fn host(&self) -> &'static str {
        match self.provider {
            Provider::OpenAi => OPENAI_HOST,
            Provider::Gemini => GEMINI_HOST,
            Provider::Anthropic => ANTHROPIC_HOST,
            Provider::Groq => GROQ_HOST,
            Provider::Together => TOGETHER_HOST,
        }
    }

    /// URL path on the vendor host.
    pub fn path(&self) -> &'static str {
        match self.provider {
            Provider::OpenAi => "/v1/chat/completions",
            Provider::Gemini => "/v1beta/models/gemini-pro:generateContent",
            Provider::Anthropic => "/v1/messages",
            Provider::Groq => "/openai/v1/chat/completions",
            Provider::Together => "/v1/chat/completions",
        }
    }

    /// Full request URL. Gemini authenticates via a `?key=` query parameter;
    /// everyone else via headers. `base_override` redirects the call to a
    /// different host (mock server in tests).
    pub fn url(&self, api_key: &str, base_override: Option<&str>) -> String {
        let base = base_override.unwrap_or_else(|| self.host());
        let base = base.trim_end_matches('/');
        match self.provider {
            Provider::Gemini => format!("{base}{}?key={api_key}", self.path()),
            _ => format!("{base}{}", self.path()),
        }
    }

    /// Request headers beyond `Content-Type: application/json`.
    pub fn headers(&self, api_key: &str) -> Vec<(&'static str, String)> {
        match self.provider {
            Provider::OpenAi | Provider::Groq | Provider::Together => {
                vec![("Authorization", format!("Bearer {api_key}"))]
            }
            Provider::Anthropic => vec![
                ("x-api-key", api_key.to_string()),
                ("anthropic-version", "2023-06-01".to_string()),
            ],
            // Key travels in the query string.
            Provider::Gemini => Vec::new(),
        }
    }

    /// Vendor-specific JSON request body.
    pub fn request_body(&self, prompt: &str, format: OutputFormat) -> Value {
        let content = prompt_with_format(prompt, format);
        match self.provider {
            Provider::OpenAi => chat_completion_body(OPENAI_MODEL, &content),
            Provider::Groq => chat_completion_body(GROQ_MODEL, &content),
            Provider::Together => chat_completion_body(TOGETHER_MODEL, &content),
            Provider::Gemini => json!({
                "contents": [
                    { "parts": [ { "text": content } ] }
                ]
            }),
            Provider::Anthropic => json!({
                "model": ANTHROPIC_MODEL,
                "max_tokens": MAX_TOKENS,
                "messages": [
                    { "role": "user", "content": content }
                ]
            }),
        }
    }

    /// Pull the completion text out of the vendor response, falling back to
    /// [`NO_RESPONSE`] when the expected field is absent.
    pub fn extract_output(&self, response: &Value) -> String {
        let text = match self.provider {
            Provider::OpenAi | Provider::Groq | Provider::Together => {
                response["choices"][0]["message"]["content"].as_str()
            }
            Provider::Gemini => response["candidates"][0]["content"]["parts"][0]["text"].as_str(),
            Provider::Anthropic => response["content"][0]["text"].as_str(),
        };

        text.unwrap_or(NO_RESPONSE).to_string()
    }
}

fn chat_completion_body(model: &str, content: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "user", "content": content }
        ],
        "max_tokens": MAX_TOKENS,
    })
}
