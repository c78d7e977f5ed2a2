//! Runtime configuration, resolved from environment variables.
//!
//! `.env.local` / `.env` are loaded by [`crate::init`] before this runs,
//! so values in those files behave exactly like exported variables.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_SILENCE_MS: u64 = 6000;
pub const DEFAULT_MIN_CHARS: usize = 10;
pub const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_SPEECH_LANG: &str = "es-ES";

#[derive(Debug, Clone, PartialEq)]
pub struct IntakeConfig {
    /// Backend base URL, no trailing slash.
    pub api_base_url: String,
    pub remote_enabled: bool,
    pub remote_timeout: Duration,
    /// Quiet period after the last final span before the primary field auto-commits.
    pub silence_window: Duration,
    pub min_description_chars: usize,
    pub speech_lang: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            remote_enabled: true,
            remote_timeout: Duration::from_millis(DEFAULT_REMOTE_TIMEOUT_MS),
            silence_window: Duration::from_millis(DEFAULT_SILENCE_MS),
            min_description_chars: DEFAULT_MIN_CHARS,
            speech_lang: DEFAULT_SPEECH_LANG.to_string(),
        }
    }
}

impl IntakeConfig {
    /// Build config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let api_base_url = get("PROMPT_API_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let remote_enabled = match get("PROMPT_REMOTE_CLASSIFIER").map(|v| v.to_lowercase()) {
            Some(v) if matches!(v.as_str(), "off" | "false" | "0" | "disabled") => false,
            _ => true,
        };

        let remote_timeout = parse_number(get("PROMPT_REMOTE_TIMEOUT_MS"), "PROMPT_REMOTE_TIMEOUT_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.remote_timeout);
        let silence_window = parse_number(get("PROMPT_SILENCE_MS"), "PROMPT_SILENCE_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.silence_window);
        let min_description_chars = parse_number(get("PROMPT_MIN_CHARS"), "PROMPT_MIN_CHARS")
            .map(|n| n as usize)
            .unwrap_or(defaults.min_description_chars);

        let speech_lang = get("PROMPT_SPEECH_LANG").unwrap_or(defaults.speech_lang);

        let config = Self {
            api_base_url,
            remote_enabled,
            remote_timeout,
            silence_window,
            min_description_chars,
            speech_lang,
        };
        log::info!(
            "[CONFIG] api={} remote={} silence={}ms min_chars={} lang={}",
            config.api_base_url,
            config.remote_enabled,
            config.silence_window.as_millis(),
            config.min_description_chars,
            config.speech_lang
        );
        config
    }
}

fn parse_number(value: Option<String>, key: &str) -> Option<u64> {
    let raw = value?;
    match raw.parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => {
            log::warn!("[CONFIG] Ignoring invalid {}={:?} — using default", key, raw);
            None
        }
    }
}
