//! Configuration types for the ChartMogul client.

use crate::auth::AuthMethod;
use crate::errors::ChartMogulError;
use std::time::Duration;

/// Default ChartMogul API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.chartmogul.com/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = "integrations-chartmogul/0.1.0";

/// HTTP statuses retried by default: rate limiting and transient server
/// failures.
pub const DEFAULT_RETRYABLE_STATUSES: &[u16] = &[429, 500, 502, 503];

/// Retry configuration.
///
/// Retrying stops at `max_attempts` or `max_elapsed`, whichever is reached
/// first. The retryable status set is data, not code: widen or narrow it
/// here without touching the retry controller.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum total attempts (including the first).
    pub max_attempts: u32,
    /// Initial backoff delay.
    pub initial_backoff: Duration,
    /// Maximum backoff delay.
    pub max_backoff: Duration,
    /// Maximum cumulative wall-clock time spent on one logical operation.
    pub max_elapsed: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
    /// Jitter factor (0.0 to 1.0).
    pub jitter: f64,
    /// HTTP statuses classified as transient.
    pub retryable_statuses: Vec<u16>,
    /// Enable retries.
    pub enabled: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(60),
            max_elapsed: Duration::from_secs(15 * 60),
            multiplier: 1.5,
            jitter: 0.5,
            retryable_statuses: DEFAULT_RETRYABLE_STATUSES.to_vec(),
            enabled: true,
        }
    }
}

/// Connection pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum idle connections per host.
    pub max_idle_per_host: usize,
    /// Idle connection timeout.
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 20,
            idle_timeout: Duration::from_secs(90),
        }
    }
}

/// ChartMogul client configuration.
///
/// Built once and treated as read-only afterwards; the client shares it
/// across concurrent callers without locking.
#[derive(Debug, Clone)]
pub struct ChartMogulConfig {
    /// API base URL; resolved endpoint paths are joined onto it.
    pub base_url: String,
    /// Authentication method attached to every request.
    pub auth: Option<AuthMethod>,
    /// Request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// User-Agent header.
    pub user_agent: String,
    /// Retry configuration.
    pub retry: RetryConfig,
    /// Connection pool configuration.
    pub pool: PoolConfig,
}

impl Default for ChartMogulConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryConfig::default(),
            pool: PoolConfig::default(),
        }
    }
}

impl ChartMogulConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ChartMogulConfigBuilder {
        ChartMogulConfigBuilder::new()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ChartMogulError> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| ChartMogulError::Configuration(format!("invalid base URL: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ChartMogulError::Configuration(
                "base URL must use http or https".to_string(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(ChartMogulError::Configuration(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`ChartMogulConfig`].
#[derive(Debug, Default)]
pub struct ChartMogulConfigBuilder {
    base_url: Option<String>,
    auth: Option<AuthMethod>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    retry: Option<RetryConfig>,
    pool: Option<PoolConfig>,
}

impl ChartMogulConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the authentication method.
    pub fn auth(mut self, auth: AuthMethod) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the retry configuration.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = Some(config);
        self
    }

    /// Disables retries.
    pub fn no_retry(mut self) -> Self {
        self.retry = Some(RetryConfig {
            enabled: false,
            ..Default::default()
        });
        self
    }

    /// Sets the connection pool configuration.
    pub fn pool(mut self, config: PoolConfig) -> Self {
        self.pool = Some(config);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> Result<ChartMogulConfig, ChartMogulError> {
        let config = ChartMogulConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            auth: self.auth,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            retry: self.retry.unwrap_or_default(),
            pool: self.pool.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChartMogulConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.auth.is_none());
        assert_eq!(config.retry.retryable_statuses, vec![429, 500, 502, 503]);
    }

    #[test]
    fn test_config_builder() {
        let config = ChartMogulConfig::builder()
            .base_url("https://api.example.com/v1")
            .auth(AuthMethod::basic("token", "key"))
            .timeout(Duration::from_secs(60))
            .user_agent("test-client/1.0")
            .build()
            .unwrap();

        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-client/1.0");
        assert!(config.auth.is_some());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ChartMogulConfig::builder()
            .base_url("not-a-url")
            .build()
            .is_err());
        assert!(ChartMogulConfig::builder()
            .base_url("ftp://api.example.com")
            .build()
            .is_err());
    }

    #[test]
    fn test_no_retry() {
        let config = ChartMogulConfig::builder().no_retry().build().unwrap();
        assert!(!config.retry.enabled);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let result = ChartMogulConfig::builder()
            .retry(RetryConfig {
                max_attempts: 0,
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }
}
