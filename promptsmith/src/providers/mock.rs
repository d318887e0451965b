//! Canned responses for the free tier and for provider names outside the
//! supported set.

use chrono::Utc;

use crate::models::OutputFormat;

fn preview(prompt: &str, max_chars: usize) -> String {
    let truncated: String = prompt.chars().take(max_chars).collect();
    if prompt.chars().count() > max_chars {
        format!("{truncated}...")
    } else {
        truncated
    }
}

/// Free-tier mock output, rendered in the requested format.
pub fn free_plan_response(prompt: &str, format: OutputFormat) -> String {
    let snippet = preview(prompt, 50);
    let now = Utc::now().to_rfc3339();

    match format {
        OutputFormat::Json => format!(
            "{{\"response\": \"Mock response for: {snippet}\", \"status\": \"success\", \"timestamp\": \"{now}\"}}"
        ),
        OutputFormat::Xml => format!(
            "<response><content>Mock response for: {snippet}</content><status>success</status><timestamp>{now}</timestamp></response>"
        ),
        OutputFormat::Advanced => format!(
            "# Advanced Response\n\n**Prompt:** {snippet}\n\n**Analysis:** This is a mock response generated for demonstration purposes.\n\n**Recommendations:**\n- Consider upgrading to use real AI providers\n- Add your API key in settings for actual responses"
        ),
        OutputFormat::Plain => format!(
            "Mock response for: {snippet}\n\nThis is a demonstration response. Add your API key in settings to get real AI-powered responses."
        ),
    }
}

/// Fallback output when the requested provider name is not one of the
/// supported vendors. Never an error: the workbench degrades to a mock.
pub fn unsupported_provider_response(provider: &str, prompt: &str) -> String {
    format!(
        "Mock response for {provider}: Enhanced version of your prompt: \"{}\"",
        preview(prompt, 100)
    )
}
