use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::portal::feedback::DEFAULT_CLOSE_DELAY;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Where the coach client sends its requests and how the dialog behaves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    pub base_url: String,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub close_delay_ms: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            close_delay_ms: DEFAULT_CLOSE_DELAY.as_millis() as u64,
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = env::var("FITCOACH_API_URL") {
            config.base_url = v;
        }
        if let Ok(v) = env::var("FITCOACH_TOKEN") {
            config.token = Some(v).filter(|t| !t.trim().is_empty());
        }
        if let Ok(v) = env::var("FITCOACH_CLOSE_DELAY_MS") {
            config.close_delay_ms = v.parse().unwrap_or(config.close_delay_ms);
        }

        config
    }

    /// Command-line flags win over the environment
    pub fn with_overrides(mut self, base_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
        self
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dialog_behavior() {
        let config = PortalConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.close_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn flags_override_and_blank_tokens_are_ignored() {
        let config = PortalConfig::default()
            .with_overrides(Some("https://api.fitcoach.example.com".to_string()), Some(" ".to_string()));
        assert_eq!(config.base_url, "https://api.fitcoach.example.com");
        assert_eq!(config.token, None);

        let config = config.with_overrides(None, Some("abc".to_string()));
        assert_eq!(config.token.as_deref(), Some("abc"));
    }
}
