//! Token parsing and verification.
//!
//! [`TokenFactory`] is the contract user authentication relies on to turn
//! untrusted JSON into verified tokens. [`SignedTokenFactory`] verifies
//! tokens produced by a [`crate::TokenIssuer`].

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use nkeys::KeyPair;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ErrorCode, TokenError};
use crate::master_token::{KEY_SIGNATURE, KEY_TOKENDATA, MasterToken, MasterTokenData};
use crate::user_id_token::{UserIdToken, UserIdTokenData};
use crate::{JsonObject, MAX_LONG_VALUE};

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// Parses and verifies tokens received from a peer.
///
/// Implementations report protocol failures (malformed, forged, expired or
/// unbound tokens) as [`TokenError::Rejected`] and anything else as
/// [`TokenError::Unexpected`].
#[async_trait]
pub trait TokenFactory: Send + Sync {
    /// Parse and verify a master token.
    async fn parse_master_token(&self, jo: &JsonObject) -> Result<MasterToken, TokenError>;

    /// Parse and verify a user ID token, including its binding to
    /// `master_token`.
    async fn parse_user_id_token(
        &self,
        jo: &JsonObject,
        master_token: &MasterToken,
    ) -> Result<UserIdToken, TokenError>;
}

// ---------------------------------------------------------------------------
// SignedTokenFactory
// ---------------------------------------------------------------------------

/// Verifies tokens against an issuer's public key.
pub struct SignedTokenFactory {
    verifier: KeyPair,
}

impl SignedTokenFactory {
    /// Create a factory trusting tokens signed by `issuer_public_key`.
    pub fn new(issuer_public_key: &str) -> Result<Self, TokenError> {
        let verifier = KeyPair::from_public_key(issuer_public_key)
            .map_err(|e| anyhow::anyhow!("invalid issuer public key: {e}"))?;
        Ok(Self { verifier })
    }

    /// Extract the token data and signature, verify the signature and
    /// decode the token data.
    fn open<T: DeserializeOwned>(
        &self,
        jo: &JsonObject,
        untrusted: ErrorCode,
        parse_error: ErrorCode,
    ) -> Result<(T, String, String), TokenError> {
        let (Some(tokendata), Some(signature)) = (
            jo.get(KEY_TOKENDATA).and_then(Value::as_str),
            jo.get(KEY_SIGNATURE).and_then(Value::as_str),
        ) else {
            return Err(TokenError::rejected(
                ErrorCode::JsonParseError,
                format!("token requires string `{KEY_TOKENDATA}` and `{KEY_SIGNATURE}`"),
            ));
        };

        let sig = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|e| TokenError::rejected(untrusted, format!("signature encoding: {e}")))?;
        self.verifier
            .verify(tokendata.as_bytes(), &sig)
            .map_err(|e| TokenError::rejected(untrusted, format!("signature: {e}")))?;

        let bytes = URL_SAFE_NO_PAD
            .decode(tokendata)
            .map_err(|e| TokenError::rejected(parse_error, format!("tokendata encoding: {e}")))?;
        let data = serde_json::from_slice(&bytes)
            .map_err(|e| TokenError::rejected(parse_error, format!("tokendata: {e}")))?;

        Ok((data, tokendata.to_string(), signature.to_string()))
    }
}

#[async_trait]
impl TokenFactory for SignedTokenFactory {
    async fn parse_master_token(&self, jo: &JsonObject) -> Result<MasterToken, TokenError> {
        let (data, tokendata, signature): (MasterTokenData, _, _) = self.open(
            jo,
            ErrorCode::MasterTokenUntrusted,
            ErrorCode::MasterTokenTokendataParseError,
        )?;

        if data.serial_number > MAX_LONG_VALUE || data.sequence_number > MAX_LONG_VALUE {
            return Err(TokenError::rejected(
                ErrorCode::MasterTokenTokendataParseError,
                format!("serial/sequence number out of range: {}/{}", data.serial_number, data.sequence_number),
            ));
        }

        let master_token = MasterToken::from_parts(data, tokendata, signature);
        if master_token.is_expired(Utc::now()) {
            return Err(TokenError::rejected(
                ErrorCode::MasterTokenExpired,
                format!("serial number {}", master_token.serial_number()),
            ));
        }

        debug!(serial_number = master_token.serial_number(), "master token verified");
        Ok(master_token)
    }

    async fn parse_user_id_token(
        &self,
        jo: &JsonObject,
        master_token: &MasterToken,
    ) -> Result<UserIdToken, TokenError> {
        let (data, tokendata, signature): (UserIdTokenData, _, _) = self.open(
            jo,
            ErrorCode::UserIdTokenUntrusted,
            ErrorCode::UserIdTokenTokendataParseError,
        )?;

        if data.serial_number > MAX_LONG_VALUE {
            return Err(TokenError::rejected(
                ErrorCode::UserIdTokenTokendataParseError,
                format!("serial number out of range: {}", data.serial_number),
            ));
        }

        let user_id_token = UserIdToken::from_parts(data, tokendata, signature);
        if !user_id_token.is_bound_to(master_token) {
            return Err(TokenError::rejected(
                ErrorCode::UserIdTokenMasterTokenMismatch,
                format!(
                    "uit mtserialnumber {}; mt serialnumber {}",
                    user_id_token.master_token_serial_number(),
                    master_token.serial_number()
                ),
            ));
        }
        if user_id_token.is_expired(Utc::now()) {
            return Err(TokenError::rejected(
                ErrorCode::UserIdTokenExpired,
                format!("serial number {}", user_id_token.serial_number()),
            ));
        }

        debug!(
            serial_number = user_id_token.serial_number(),
            mt_serial_number = master_token.serial_number(),
            "user ID token verified"
        );
        Ok(user_id_token)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
