//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JSONBIN_CATALOG_BIN_ID` - Document-store bin holding the product catalog
//! - `JSONBIN_PAYMENT_BIN_ID` - Document-store bin holding payment details
//! - `JSONBIN_MASTER_KEY` - JSONBin access credential (sent as `X-Master-Key`)
//! - `EMAILJS_SERVICE_ID` - EmailJS service identifier
//! - `EMAILJS_TEMPLATE_ID` - EmailJS order template identifier
//! - `EMAILJS_PUBLIC_KEY` - EmailJS public key
//!
//! ## Optional
//! - `DEEPVAULT_HOST` - Bind address (default: 127.0.0.1)
//! - `DEEPVAULT_PORT` - Listen port (default: 3000)
//! - `DEEPVAULT_BASE_URL` - Public URL (default: http://localhost:3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
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

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// JSONBin document-store configuration
    pub jsonbin: JsonBinConfig,
    /// EmailJS order relay configuration
    pub emailjs: EmailJsConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// JSONBin document-store configuration.
///
/// Implements `Debug` manually to redact the master key.
#[derive(Clone)]
pub struct JsonBinConfig {
    /// Bin holding the product catalog
    pub catalog_bin_id: String,
    /// Bin holding bank details and the BTC address
    pub payment_bin_id: String,
    /// Access credential sent as the `X-Master-Key` header
    pub master_key: SecretString,
}

impl std::fmt::Debug for JsonBinConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonBinConfig")
            .field("catalog_bin_id", &self.catalog_bin_id)
            .field("payment_bin_id", &self.payment_bin_id)
            .field("master_key", &"[REDACTED]")
            .finish()
    }
}

/// EmailJS order relay configuration.
///
/// The public key is designed to be exposed to browsers, so none of these
/// fields are secrets.
#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    /// EmailJS service identifier
    pub service_id: String,
    /// Order template identifier
    pub template_id: String,
    /// Public key sent as `user_id`
    pub public_key: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the master key fails validation (placeholder detection, entropy
    /// check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("DEEPVAULT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("DEEPVAULT_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("DEEPVAULT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("DEEPVAULT_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("DEEPVAULT_BASE_URL", "http://localhost:3000");

        let jsonbin = JsonBinConfig::from_env()?;
        let emailjs = EmailJsConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            base_url,
            jsonbin,
            emailjs,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl JsonBinConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            catalog_bin_id: get_required_env("JSONBIN_CATALOG_BIN_ID")?,
            payment_bin_id: get_required_env("JSONBIN_PAYMENT_BIN_ID")?,
            master_key: get_validated_secret("JSONBIN_MASTER_KEY")?,
        })
    }
}

impl EmailJsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            service_id: get_required_env("EMAILJS_SERVICE_ID")?,
            template_id: get_required_env("EMAILJS_TEMPLATE_ID")?,
            public_key: get_required_env("EMAILJS_PUBLIC_KEY")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
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
    let len = s.len() as f64;
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

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real credentials like JSONBin master keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the real credential."
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_shannon_entropy_high() {
        // A bcrypt-style master key should have high entropy
        let entropy = shannon_entropy("$2a$10$LoUE3DG23v0idSgqUwPW2e");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-master-key-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_changeme() {
        let result = validate_secret_strength("changeme123", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        // High-entropy random string
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            jsonbin: JsonBinConfig {
                catalog_bin_id: "67b0a7d1ad19ca34f804be59".to_string(),
                payment_bin_id: "67b4ff60acd3cb34a8e75b63".to_string(),
                master_key: SecretString::from("$2a$10$LoUE3DG23v0idSgqUwPW2e"),
            },
            emailjs: EmailJsConfig {
                service_id: "service_abc1234".to_string(),
                template_id: "template_abc1234".to_string(),
                public_key: "pubkey".to_string(),
            },
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_jsonbin_config_debug_redacts_master_key() {
        let config = JsonBinConfig {
            catalog_bin_id: "catalog-bin".to_string(),
            payment_bin_id: "payment-bin".to_string(),
            master_key: SecretString::from("super_secret_master_key"),
        };

        let debug_output = format!("{config:?}");

        // Public fields should be visible
        assert!(debug_output.contains("catalog-bin"));
        assert!(debug_output.contains("payment-bin"));

        // The master key should be redacted
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_master_key"));
    }
}
