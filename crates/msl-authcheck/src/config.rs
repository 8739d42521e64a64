//! Tool configuration.
//!
//! Defaults come from environment variables; command-line flags override
//! them in `main`.

use chrono::Duration;
use msl_tokens::{DEFAULT_MASTER_TOKEN_TTL_SECS, DEFAULT_USER_ID_TOKEN_TTL_SECS};

/// Settings shared by all subcommands.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// nkeys account seed of the token issuer, if configured.
    pub issuer_seed: Option<String>,
    /// Lifetime of issued master tokens.
    pub master_token_ttl: Duration,
    /// Lifetime of issued user ID tokens.
    pub user_id_token_ttl: Duration,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                     | Default | Description                        |
    /// |------------------------------|---------|------------------------------------|
    /// | `MSL_ISSUER_SEED`            | unset   | nkeys account seed of the issuer   |
    /// | `MSL_MASTER_TOKEN_TTL_SECS`  | `86400` | master token lifetime on issue     |
    /// | `MSL_USER_ID_TOKEN_TTL_SECS` | `3600`  | user ID token lifetime on issue    |
    ///
    /// A TTL that is not a positive number of seconds within range is ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Unparsable, non-positive or out-of-range values fall back to the default.
        let seconds = |key: &str, default: i64| {
            lookup(key)
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|secs| *secs > 0)
                .and_then(Duration::try_seconds)
                .unwrap_or_else(|| Duration::seconds(default))
        };

        Self {
            issuer_seed: lookup("MSL_ISSUER_SEED").filter(|s| !s.is_empty()),
            master_token_ttl: seconds("MSL_MASTER_TOKEN_TTL_SECS", DEFAULT_MASTER_TOKEN_TTL_SECS),
            user_id_token_ttl: seconds("MSL_USER_ID_TOKEN_TTL_SECS", DEFAULT_USER_ID_TOKEN_TTL_SECS),
        }
    }
}
