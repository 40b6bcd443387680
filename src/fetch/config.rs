//! Fetcher configuration
//!
//! The header set mimics a desktop browser closely enough for the site to
//! serve the server-rendered note page.

/// Desktop Chrome user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Accept header sent with every request
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

/// Accept-Language header sent with every request
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,zh-CN;q=0.8,zh;q=0.7";

/// Default request timeout (10 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default redirect limit; short links resolve in one or two hops
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Configuration for the page fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// User-Agent header
    pub user_agent: String,
    /// Accept header
    pub accept: String,
    /// Accept-Language header
    pub accept_language: String,
    /// Whole-request timeout in milliseconds (default: 10000)
    pub timeout_ms: u64,
    /// Maximum redirects followed (default: 10)
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl FetcherConfig {
    /// Create a new config builder
    pub fn builder() -> FetcherConfigBuilder {
        FetcherConfigBuilder::default()
    }
}

/// Builder for FetcherConfig
#[derive(Default)]
pub struct FetcherConfigBuilder {
    config: FetcherConfig,
}

impl FetcherConfigBuilder {
    /// Set user agent
    pub fn user_agent<S: Into<String>>(mut self, ua: S) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Set Accept-Language
    pub fn accept_language<S: Into<String>>(mut self, lang: S) -> Self {
        self.config.accept_language = lang.into();
        self
    }

    /// Set request timeout
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Set redirect limit
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Build the config
    pub fn build(self) -> FetcherConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_config_default() {
        let config = FetcherConfig::default();
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.max_redirects, 10);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert!(config.accept_language.contains("zh-CN"));
    }

    #[test]
    fn test_fetcher_config_builder() {
        let config = FetcherConfig::builder()
            .user_agent("TestBot/1.0")
            .accept_language("zh-CN")
            .timeout_ms(2500)
            .max_redirects(3)
            .build();

        assert_eq!(config.user_agent, "TestBot/1.0");
        assert_eq!(config.accept_language, "zh-CN");
        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.max_redirects, 3);
        assert_eq!(config.accept, DEFAULT_ACCEPT);
    }
}
