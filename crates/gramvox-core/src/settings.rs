//! Settings domain types and validation.
//!
//! This module contains the core settings types used across the monitor.
//! These are pure domain types with no infrastructure dependencies.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default poll cadence in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Display languages the monitor supports.
///
/// The voice layer maps these codes to host speech locales; settings
/// validation rejects anything outside this set.
pub const SUPPORTED_LANGUAGES: [&str; 5] = ["en", "hi", "kn", "ta", "ml"];

/// Monitor settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the village backend.
    pub backend_url: Option<String>,

    /// Seconds between alert poll cycles (5-3600).
    pub poll_interval_secs: Option<u64>,

    /// Active display language code.
    pub language: Option<String>,

    /// Whether voice announcements are enabled.
    pub voice_enabled: Option<bool>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            backend_url: Some(DEFAULT_BACKEND_URL.to_string()),
            poll_interval_secs: Some(DEFAULT_POLL_INTERVAL_SECS),
            language: Some("en".to_string()),
            voice_enabled: Some(true),
        }
    }

    /// Get the effective backend URL (with default fallback).
    #[must_use]
    pub fn effective_backend_url(&self) -> &str {
        self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
    }

    /// Get the effective poll interval (with default fallback).
    #[must_use]
    pub fn effective_poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.unwrap_or(DEFAULT_POLL_INTERVAL_SECS))
    }

    /// Get the effective display language (with default fallback).
    #[must_use]
    pub fn effective_language(&self) -> &str {
        self.language.as_deref().unwrap_or("en")
    }

    /// Get the effective voice enablement (defaults to on).
    #[must_use]
    pub fn effective_voice_enabled(&self) -> bool {
        self.voice_enabled.unwrap_or(true)
    }

    /// Merge another settings into this one, only updating fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref url) = other.backend_url {
            self.backend_url.clone_from(url);
        }
        if let Some(ref secs) = other.poll_interval_secs {
            self.poll_interval_secs = *secs;
        }
        if let Some(ref language) = other.language {
            self.language.clone_from(language);
        }
        if let Some(ref enabled) = other.voice_enabled {
            self.voice_enabled = *enabled;
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = set field to None/null
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub backend_url: Option<Option<String>>,
    pub poll_interval_secs: Option<Option<u64>>,
    pub language: Option<Option<String>>,
    pub voice_enabled: Option<Option<bool>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Poll interval must be between 5 and 3600 seconds, got {0}")]
    InvalidPollInterval(u64),

    #[error("Backend URL cannot be empty")]
    EmptyBackendUrl,

    #[error("Backend URL must start with http:// or https://, got {0}")]
    InvalidBackendUrl(String),

    #[error("Unsupported display language {0:?} (expected one of en, hi, kn, ta, ml)")]
    UnsupportedLanguage(String),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    // Validate poll interval
    if let Some(secs) = settings.poll_interval_secs {
        if !(5..=3600).contains(&secs) {
            return Err(SettingsError::InvalidPollInterval(secs));
        }
    }

    // Validate backend URL if specified
    if let Some(ref url) = settings.backend_url {
        if url.trim().is_empty() {
            return Err(SettingsError::EmptyBackendUrl);
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SettingsError::InvalidBackendUrl(url.clone()));
        }
    }

    // Validate language code
    if let Some(ref language) = settings.language {
        if !SUPPORTED_LANGUAGES.contains(&language.as_str()) {
            return Err(SettingsError::UnsupportedLanguage(language.clone()));
        }
    }

    Ok(())
}
