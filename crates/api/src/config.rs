//! API configuration loaded from environment variables.
//!
//! Configuration is read once at startup into an immutable [`ApiConfig`] and
//! passed explicitly to the handlers; nothing re-reads the environment per
//! request.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_URL` - Shopify GraphQL endpoint (e.g. `https://shop.myshopify.com/admin/api/2025-01/graphql.json`)
//! - `SHOPIFY_ADMIN_TOKEN` - Admin API access token, sent as `X-Shopify-Access-Token`
//!
//! ## Optional
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 8080, also when set but empty)
//! - `SHOPIFY_TIMEOUT_SECS` - Per-call upstream timeout (default: 10)
//! - `PRODUCT_FETCH_CONCURRENCY` - Parallel product fetches per request (default: 4)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroUsize;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PRODUCT_FETCH_CONCURRENCY: usize = 4;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Upstream Shopify configuration
    pub shopify: ShopifyConfig,
    /// Maximum number of product fetches in flight for one request
    pub product_fetch_concurrency: NonZeroUsize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Upstream Shopify GraphQL configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyConfig {
    /// GraphQL endpoint URL
    pub url: Url,
    /// Admin API access token
    pub admin_token: SecretString,
    /// Timeout applied to every upstream call
    pub timeout: Duration,
}

impl std::fmt::Debug for ShopifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("url", &self.url.as_str())
            .field("admin_token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the access token fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_non_empty_env("HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = parse_port(get_non_empty_env("PORT").as_deref())?;
        let product_fetch_concurrency =
            parse_concurrency(get_non_empty_env("PRODUCT_FETCH_CONCURRENCY").as_deref())?;

        let shopify = ShopifyConfig::from_env()?;

        Ok(Self {
            host,
            port,
            shopify,
            product_fetch_concurrency,
            sentry_dsn: get_non_empty_env("SENTRY_DSN"),
            sentry_environment: get_non_empty_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyConfig {
    /// Load the upstream configuration from environment variables.
    ///
    /// Also used on its own by the CLI, which has no listener to configure.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `SHOPIFY_URL` or `SHOPIFY_ADMIN_TOKEN` is
    /// missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let url = parse_endpoint(&get_required_env("SHOPIFY_URL")?)?;
        let admin_token = get_validated_secret("SHOPIFY_ADMIN_TOKEN")?;
        let timeout = parse_timeout(get_non_empty_env("SHOPIFY_TIMEOUT_SECS").as_deref())?;

        Ok(Self {
            url,
            admin_token,
            timeout,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    get_non_empty_env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating an empty value as unset.
fn get_non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_port(value: Option<&str>) -> Result<u16, ConfigError> {
    value.map_or(Ok(DEFAULT_PORT), |v| {
        v.trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))
    })
}

fn parse_timeout(value: Option<&str>) -> Result<Duration, ConfigError> {
    let secs = value.map_or(Ok(DEFAULT_TIMEOUT_SECS), |v| {
        v.trim().parse::<u64>().map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPIFY_TIMEOUT_SECS".to_string(), e.to_string())
        })
    })?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            "SHOPIFY_TIMEOUT_SECS".to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_concurrency(value: Option<&str>) -> Result<NonZeroUsize, ConfigError> {
    let invalid = |msg: String| {
        ConfigError::InvalidEnvVar("PRODUCT_FETCH_CONCURRENCY".to_string(), msg)
    };
    let n = value.map_or(Ok(DEFAULT_PRODUCT_FETCH_CONCURRENCY), |v| {
        v.trim().parse::<usize>().map_err(|e| invalid(e.to_string()))
    })?;
    NonZeroUsize::new(n).ok_or_else(|| invalid("must be at least 1".to_string()))
}

/// Parse the upstream endpoint, accepting only http(s) URLs.
fn parse_endpoint(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("SHOPIFY_URL".to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar(
            "SHOPIFY_URL".to_string(),
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real access tokens are random
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
