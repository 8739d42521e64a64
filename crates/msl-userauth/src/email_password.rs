//! Email/password user authentication data.
//!
//! ```text
//! { "email": string, "password": string }
//! ```

use std::fmt;

use msl_tokens::JsonObject;
use serde_json::Value;

use crate::auth_data::AuthenticationData;
use crate::error::UserAuthError;
use crate::scheme::UserAuthenticationScheme;

const KEY_EMAIL: &str = "email";
const KEY_PASSWORD: &str = "password";

/// A user identified by email address and password.
#[derive(Clone, PartialEq, Eq)]
pub struct EmailPasswordAuthenticationData {
    email: String,
    password: String,
}

impl EmailPasswordAuthenticationData {
    /// Create email/password data.
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    /// The email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Parse the scheme-specific payload.
    pub fn parse(jo: &JsonObject) -> Result<Self, UserAuthError> {
        Ok(Self::new(
            string_field(jo, KEY_EMAIL)?,
            string_field(jo, KEY_PASSWORD)?,
        ))
    }
}

fn string_field<'a>(jo: &'a JsonObject, key: &str) -> Result<&'a str, UserAuthError> {
    jo.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| UserAuthError::missing_field("email/password authdata", "string", key))
}

impl AuthenticationData for EmailPasswordAuthenticationData {
    fn scheme(&self) -> UserAuthenticationScheme {
        UserAuthenticationScheme::EmailPassword
    }

    fn auth_data(&self) -> JsonObject {
        let mut jo = JsonObject::new();
        jo.insert(KEY_EMAIL.into(), Value::String(self.email.clone()));
        jo.insert(KEY_PASSWORD.into(), Value::String(self.password.clone()));
        jo
    }
}

impl fmt::Debug for EmailPasswordAuthenticationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailPasswordAuthenticationData")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
