//! Token issuing.
//!
//! [`TokenIssuer`] signs master tokens and user ID tokens with an nkeys
//! account key pair. The signature covers the base64url encoded token data
//! exactly as it appears on the wire.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use nkeys::KeyPair;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::TokenError;
use crate::master_token::{MasterToken, MasterTokenData};
use crate::user_id_token::{UserIdToken, UserIdTokenData};
use crate::MAX_LONG_VALUE;

/// Default master token lifetime.
pub const DEFAULT_MASTER_TOKEN_TTL_SECS: i64 = 86_400;
/// Default user ID token lifetime.
pub const DEFAULT_USER_ID_TOKEN_TTL_SECS: i64 = 3_600;

/// Issues signed tokens.
pub struct TokenIssuer {
    key_pair: KeyPair,
    master_token_ttl: Duration,
    user_id_token_ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer signing with `key_pair` and default lifetimes.
    pub fn new(key_pair: KeyPair) -> Self {
        Self {
            key_pair,
            master_token_ttl: Duration::seconds(DEFAULT_MASTER_TOKEN_TTL_SECS),
            user_id_token_ttl: Duration::seconds(DEFAULT_USER_ID_TOKEN_TTL_SECS),
        }
    }

    /// Create an issuer with a freshly generated account key pair.
    pub fn generate() -> Self {
        Self::new(KeyPair::new_account())
    }

    /// Create an issuer from an nkeys seed.
    pub fn from_seed(seed: &str) -> Result<Self, TokenError> {
        let key_pair = KeyPair::from_seed(seed)
            .map_err(|e| anyhow::anyhow!("invalid issuer seed: {e}"))?;
        Ok(Self::new(key_pair))
    }

    /// Override the token lifetimes.
    #[must_use]
    pub fn with_ttls(mut self, master_token_ttl: Duration, user_id_token_ttl: Duration) -> Self {
        self.master_token_ttl = master_token_ttl;
        self.user_id_token_ttl = user_id_token_ttl;
        self
    }

    /// Public key that verifies this issuer's signatures.
    pub fn public_key(&self) -> String {
        self.key_pair.public_key()
    }

    /// Issue a new master token to `identity`.
    pub fn issue_master_token(&self, identity: &str) -> Result<MasterToken, TokenError> {
        let data = MasterTokenData {
            serial_number: random_serial_number(),
            sequence_number: 1,
            expiration: expires_in(self.master_token_ttl)?,
            identity: identity.to_string(),
        };
        let (tokendata, signature) = self.seal(&data)?;
        debug!(serial_number = data.serial_number, %identity, "master token issued");
        Ok(MasterToken::from_parts(data, tokendata, signature))
    }

    /// Issue a user ID token for `user`, bound to `master_token`.
    pub fn issue_user_id_token(
        &self,
        master_token: &MasterToken,
        user: &str,
    ) -> Result<UserIdToken, TokenError> {
        let data = UserIdTokenData {
            serial_number: random_serial_number(),
            master_token_serial_number: master_token.serial_number(),
            expiration: expires_in(self.user_id_token_ttl)?,
            user: user.to_string(),
        };
        let (tokendata, signature) = self.seal(&data)?;
        debug!(
            serial_number = data.serial_number,
            mt_serial_number = data.master_token_serial_number,
            %user,
            "user ID token issued"
        );
        Ok(UserIdToken::from_parts(data, tokendata, signature))
    }

    /// Encode token data and sign it: `(base64url(json), base64url(sig))`.
    fn seal<T: Serialize>(&self, data: &T) -> Result<(String, String), TokenError> {
        let json = serde_json::to_vec(data).map_err(anyhow::Error::from)?;
        let tokendata = URL_SAFE_NO_PAD.encode(json);
        let sig = self
            .key_pair
            .sign(tokendata.as_bytes())
            .map_err(|e| anyhow::anyhow!("token signing failed: {e}"))?;
        Ok((tokendata, URL_SAFE_NO_PAD.encode(sig)))
    }
}

/// Expiration in epoch seconds, `ttl` from now.
fn expires_in(ttl: Duration) -> Result<i64, TokenError> {
    Utc::now()
        .checked_add_signed(ttl)
        .map(|at| at.timestamp())
        .ok_or_else(|| anyhow::anyhow!("token lifetime {ttl} is out of range").into())
}

fn random_serial_number() -> u64 {
    rand::thread_rng().gen_range(0..=MAX_LONG_VALUE)
}
