//! Session credential.
//!
//! A [`MasterToken`] is issued to an authenticated entity and identifies
//! its session. On the wire it is a signed envelope:
//!
//! ```text
//! { "tokendata": base64url(json(MasterTokenData)), "signature": base64url(sig) }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::JsonObject;

/// JSON key for the base64url encoded token data.
pub(crate) const KEY_TOKENDATA: &str = "tokendata";
/// JSON key for the base64url encoded signature.
pub(crate) const KEY_SIGNATURE: &str = "signature";

/// Signed contents of a master token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct MasterTokenData {
    #[serde(rename = "serialnumber")]
    pub serial_number: u64,
    #[serde(rename = "sequencenumber")]
    pub sequence_number: u64,
    /// Seconds since the UNIX epoch.
    pub expiration: i64,
    pub identity: String,
}

/// A session credential issued to an entity.
///
/// Two master tokens are equal when they share serial number, sequence
/// number and expiration; the encoded form is not compared.
#[derive(Debug, Clone)]
pub struct MasterToken {
    data: MasterTokenData,
    tokendata: String,
    signature: String,
}

impl MasterToken {
    pub(crate) fn from_parts(data: MasterTokenData, tokendata: String, signature: String) -> Self {
        Self {
            data,
            tokendata,
            signature,
        }
    }

    /// Serial number shared by every user ID token bound to this token.
    pub fn serial_number(&self) -> u64 {
        self.data.serial_number
    }

    /// Sequence number, incremented on renewal.
    pub fn sequence_number(&self) -> u64 {
        self.data.sequence_number
    }

    /// Expiration as seconds since the UNIX epoch.
    pub fn expiration(&self) -> i64 {
        self.data.expiration
    }

    /// Identity of the entity the token was issued to.
    pub fn identity(&self) -> &str {
        &self.data.identity
    }

    /// `true` if the token is expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.data.expiration <= now.timestamp()
    }

    /// Wire representation. Every call returns a fresh object.
    pub fn to_json(&self) -> JsonObject {
        let mut jo = JsonObject::new();
        jo.insert(KEY_TOKENDATA.into(), Value::String(self.tokendata.clone()));
        jo.insert(KEY_SIGNATURE.into(), Value::String(self.signature.clone()));
        jo
    }
}

impl PartialEq for MasterToken {
    fn eq(&self, other: &Self) -> bool {
        self.data.serial_number == other.data.serial_number
            && self.data.sequence_number == other.data.sequence_number
            && self.data.expiration == other.data.expiration
    }
}

impl Eq for MasterToken {}
