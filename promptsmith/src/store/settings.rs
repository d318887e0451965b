use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::Result;
use crate::keys;
use crate::models::{OutputFormat, Provider, UserSettings};

const SETTINGS_FILE: &str = "promptsmith-settings.json";

/// Partial settings update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub provider: Option<Provider>,
    pub api_key: Option<String>,
    pub output_format: Option<OutputFormat>,
}

/// File-backed settings store.
///
/// The in-memory copy holds the API key in the clear; the on-disk document
/// holds it obfuscated. A corrupt or missing file yields defaults.
pub struct SettingsStore {
    path: PathBuf,
    state: Mutex<UserSettings>,
}

impl SettingsStore {
    pub fn open(data_dir: &Path, max_free_prompts: u32) -> Self {
        let path = data_dir.join(SETTINGS_FILE);
        let mut settings = load_settings(&path);
        // Configuration is the authority on the free-tier cap; the stored
        // counter is preserved.
        settings.max_free_prompts = max_free_prompts;

        Self {
            path,
            state: Mutex::new(settings),
        }
    }

    pub fn get(&self) -> UserSettings {
        self.lock().clone()
    }

    pub fn can_use_free_plan(&self) -> bool {
        self.lock().can_use_free_plan()
    }

    /// Merge a partial update and persist. Returns the updated settings.
    pub fn update(&self, patch: SettingsPatch) -> Result<UserSettings> {
        let mut state = self.lock();
        if let Some(provider) = patch.provider {
            state.provider = provider;
        }
        if let Some(api_key) = patch.api_key {
            state.api_key = api_key;
        }
        if let Some(output_format) = patch.output_format {
            state.output_format = output_format;
        }

        persist(&self.path, &state)?;
        Ok(state.clone())
    }

    /// Count one free-tier execution. Returns the new counter value.
    pub fn record_free_prompt(&self) -> Result<u32> {
        let mut state = self.lock();
        state.free_prompts_used += 1;
        persist(&self.path, &state)?;
        Ok(state.free_prompts_used)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, UserSettings> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load_settings(path: &Path) -> UserSettings {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            if error.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %error, "Failed to read settings, using defaults");
            }
            return UserSettings::default();
        }
    };

    match serde_json::from_str::<UserSettings>(&raw) {
        Ok(mut stored) => {
            stored.api_key = keys::deobfuscate(&stored.api_key);
            stored
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), error = %error, "Corrupt settings file, using defaults");
            UserSettings::default()
        }
    }
}

fn persist(path: &Path, settings: &UserSettings) -> Result<()> {
    let mut stored = settings.clone();
    stored.api_key = keys::obfuscate(&stored.api_key);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&stored)?)?;
    Ok(())
}
