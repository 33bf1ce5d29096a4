//! Client configuration.

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Record store root, without a trailing slash.
    pub api_base_url: String,
}

impl ClientConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL baked in at build time through `TRACKER_API_URL`.
    pub fn from_build_env() -> Self {
        Self::with_base_url(option_env!("TRACKER_API_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slash() {
        let config = ClientConfig::with_base_url("https://api.example.edu/");
        assert_eq!(config.api_base_url, "https://api.example.edu");
        assert_eq!(ClientConfig::default().api_base_url, DEFAULT_API_BASE_URL);
    }
}
