//! User credential.
//!
//! A [`UserIdToken`] asserts a user's identity and is bound to exactly one
//! [`MasterToken`] through the master token's serial number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::master_token::{KEY_SIGNATURE, KEY_TOKENDATA};
use crate::{JsonObject, MasterToken};

/// Signed contents of a user ID token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct UserIdTokenData {
    #[serde(rename = "serialnumber")]
    pub serial_number: u64,
    #[serde(rename = "mtserialnumber")]
    pub master_token_serial_number: u64,
    /// Seconds since the UNIX epoch.
    pub expiration: i64,
    pub user: String,
}

/// A user credential bound to a master token.
///
/// Two user ID tokens are equal when they share serial number and master
/// token serial number.
#[derive(Debug, Clone)]
pub struct UserIdToken {
    data: UserIdTokenData,
    tokendata: String,
    signature: String,
}

impl UserIdToken {
    pub(crate) fn from_parts(data: UserIdTokenData, tokendata: String, signature: String) -> Self {
        Self {
            data,
            tokendata,
            signature,
        }
    }

    /// Serial number of this token.
    pub fn serial_number(&self) -> u64 {
        self.data.serial_number
    }

    /// Serial number of the master token this token was issued for.
    pub fn master_token_serial_number(&self) -> u64 {
        self.data.master_token_serial_number
    }

    /// Expiration as seconds since the UNIX epoch.
    pub fn expiration(&self) -> i64 {
        self.data.expiration
    }

    /// The user this token identifies.
    pub fn user(&self) -> &str {
        &self.data.user
    }

    /// `true` if the token is expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.data.expiration <= now.timestamp()
    }

    /// `true` if this token was issued for `master_token`.
    pub fn is_bound_to(&self, master_token: &MasterToken) -> bool {
        self.data.master_token_serial_number == master_token.serial_number()
    }

    /// Wire representation. Every call returns a fresh object.
    pub fn to_json(&self) -> JsonObject {
        let mut jo = JsonObject::new();
        jo.insert(KEY_TOKENDATA.into(), Value::String(self.tokendata.clone()));
        jo.insert(KEY_SIGNATURE.into(), Value::String(self.signature.clone()));
        jo
    }
}

impl PartialEq for UserIdToken {
    fn eq(&self, other: &Self) -> bool {
        self.data.serial_number == other.data.serial_number
            && self.data.master_token_serial_number == other.data.master_token_serial_number
    }
}

impl Eq for UserIdToken {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::master_token::MasterTokenData;

    fn master_token(serial: u64) -> MasterToken {
        MasterToken::from_parts(
            MasterTokenData {
                serial_number: serial,
                sequence_number: 1,
                expiration: 2_000_000_000,
                identity: "entity".into(),
            },
            "mt".into(),
            "sig".into(),
        )
    }

    fn user_id_token(serial: u64, mt_serial: u64) -> UserIdToken {
        UserIdToken::from_parts(
            UserIdTokenData {
                serial_number: serial,
                master_token_serial_number: mt_serial,
                expiration: 2_000_000_000,
                user: "alice".into(),
            },
            "uit".into(),
            "sig".into(),
        )
    }

    #[test]
    fn binding_follows_master_token_serial() {
        let uit = user_id_token(10, 42);
        assert!(uit.is_bound_to(&master_token(42)));
        assert!(!uit.is_bound_to(&master_token(43)));
    }

    #[test]
    fn equality() {
        assert_eq!(user_id_token(10, 42), user_id_token(10, 42));
        assert_ne!(user_id_token(10, 42), user_id_token(11, 42));
        assert_ne!(user_id_token(10, 42), user_id_token(10, 43));
    }

    #[test]
    fn to_json_is_an_independent_copy() {
        let uit = user_id_token(10, 42);
        let mut jo = uit.to_json();
        jo.insert("tokendata".into(), Value::String("tampered".into()));
        assert_eq!(uit.to_json()["tokendata"], "uit");
    }
}
