//! API key handling: at-rest obfuscation, per-vendor format validation, and
//! display masking.
//!
//! The obfuscation routine is a reversible base64 trick, not encryption. It
//! only keeps keys out of casual view of the settings file; anyone with the
//! file can recover them.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::Provider;

/// Fixed suffix appended before encoding. Shared with nothing else; changing
/// it invalidates previously stored keys.
const OBFUSCATION_KEY: &str = "promptsmith-secure-key-2024";

/// Obfuscate an API key for storage. Empty input stays empty.
pub fn obfuscate(api_key: &str) -> String {
    if api_key.is_empty() {
        return String::new();
    }

    BASE64.encode(format!("{api_key}{OBFUSCATION_KEY}"))
}

/// Reverse [`obfuscate`]. Any decode failure yields the empty string, which
/// downstream code treats as "no key configured".
pub fn deobfuscate(stored: &str) -> String {
    if stored.is_empty() {
        return String::new();
    }

    let Ok(decoded) = BASE64.decode(stored) else {
        return String::new();
    };
    let Ok(decoded) = String::from_utf8(decoded) else {
        return String::new();
    };

    match decoded.strip_suffix(OBFUSCATION_KEY) {
        Some(key) => key.to_string(),
        None => decoded,
    }
}

/// Display form of a key: everything but the last four characters hidden.
pub fn mask(api_key: &str) -> String {
    if api_key.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() <= 4 {
        return "•".repeat(chars.len());
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "•".repeat(8), tail)
}

fn key_patterns() -> &'static HashMap<Provider, Regex> {
    static PATTERNS: OnceLock<HashMap<Provider, Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let table = [
            (Provider::OpenAi, r"^sk-[a-zA-Z0-9]{48,}$"),
            (Provider::Gemini, r"^[a-zA-Z0-9_-]{39}$"),
            (Provider::Anthropic, r"^sk-ant-[a-zA-Z0-9_-]{95,}$"),
            (Provider::Groq, r"^gsk_[a-zA-Z0-9]{52}$"),
            (Provider::Together, r"^[a-f0-9]{64}$"),
        ];

        table
            .into_iter()
            .filter_map(|(provider, pattern)| {
                Regex::new(pattern).ok().map(|regex| (provider, regex))
            })
            .collect()
    })
}

/// Check an API key against the vendor's known key shape. Providers without
/// a pattern fall back to a minimum-length check.
pub fn validate_api_key(api_key: &str, provider: Provider) -> bool {
    if api_key.is_empty() {
        return false;
    }

    match key_patterns().get(&provider) {
        Some(pattern) => pattern.is_match(api_key),
        None => api_key.len() > 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn obfuscate_round_trips() {
        let key = "sk-proj-abc123";
        let stored = obfuscate(key);
        assert_ne!(stored, key);
        assert_eq!(deobfuscate(&stored), key);
    }

    #[test]
    fn obfuscate_empty_stays_empty() {
        assert_eq!(obfuscate(""), "");
        assert_eq!(deobfuscate(""), "");
    }

    #[test]
    fn deobfuscate_garbage_yields_empty() {
        assert_eq!(deobfuscate("!!! not base64 !!!"), "");
    }

    #[test]
    fn deobfuscate_tolerates_missing_suffix() {
        // A legacy value encoded without the suffix decodes to itself.
        let stored = BASE64.encode("plain-old-key");
        assert_eq!(deobfuscate(&stored), "plain-old-key");
    }

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask("sk-abcdef1234"), "••••••••1234");
        assert_eq!(mask("abc"), "•••");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn validate_openai_key_shape() {
        let good = format!("sk-{}", "a".repeat(48));
        assert!(validate_api_key(&good, Provider::OpenAi));
        assert!(!validate_api_key("sk-short", Provider::OpenAi));
        assert!(!validate_api_key("", Provider::OpenAi));
    }

    #[test]
    fn validate_gemini_key_shape() {
        let good = "A".repeat(39);
        assert!(validate_api_key(&good, Provider::Gemini));
        assert!(!validate_api_key(&"A".repeat(38), Provider::Gemini));
    }

    #[test]
    fn validate_anthropic_key_shape() {
        let good = format!("sk-ant-{}", "x".repeat(95));
        assert!(validate_api_key(&good, Provider::Anthropic));
        assert!(!validate_api_key("sk-ant-short", Provider::Anthropic));
    }

    #[test]
    fn validate_groq_key_shape() {
        let good = format!("gsk_{}", "b".repeat(52));
        assert!(validate_api_key(&good, Provider::Groq));
        assert!(!validate_api_key(&format!("gsk_{}", "b".repeat(51)), Provider::Groq));
    }

    #[test]
    fn validate_together_key_shape() {
        let good = "0123456789abcdef".repeat(4);
        assert!(validate_api_key(&good, Provider::Together));
        assert!(!validate_api_key("0123456789ABCDEF", Provider::Together));
    }
}
