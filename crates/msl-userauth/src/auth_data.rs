//! The user authentication data family.
//!
//! Every scheme contributes one case of [`UserAuthenticationData`]. The
//! shared behaviour lives in [`AuthenticationData`], implemented by each
//! case and by the enum itself (by delegation).
//!
//! On the wire the data travels in a scheme-tagged envelope:
//!
//! ```text
//! { "scheme": "USER_ID_TOKEN", "authdata": { ...scheme specific... } }
//! ```

use msl_tokens::JsonObject;
use serde_json::Value;
use tracing::debug;

use crate::context::MslContext;
use crate::email_password::EmailPasswordAuthenticationData;
use crate::error::UserAuthError;
use crate::scheme::UserAuthenticationScheme;
use crate::user_id_token::UserIdTokenAuthenticationData;

/// JSON key for the scheme name.
pub const KEY_SCHEME: &str = "scheme";
/// JSON key for the scheme-specific data.
pub const KEY_AUTHDATA: &str = "authdata";

/// Behaviour shared by every user authentication scheme.
pub trait AuthenticationData {
    /// The scheme this data belongs to. Fixed at construction.
    fn scheme(&self) -> UserAuthenticationScheme;

    /// Scheme-specific payload holding exactly the mandatory keys.
    ///
    /// Each call returns an independent copy; modifying it does not affect
    /// `self` or later calls.
    fn auth_data(&self) -> JsonObject;
}

/// User authentication data of any supported scheme.
///
/// Equality is scheme-discriminated: values of different schemes are never
/// equal, values of the same scheme compare their fields.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAuthenticationData {
    /// [`UserAuthenticationScheme::EmailPassword`]
    EmailPassword(EmailPasswordAuthenticationData),
    /// [`UserAuthenticationScheme::UserIdToken`]
    UserIdToken(UserIdTokenAuthenticationData),
}

impl UserAuthenticationData {
    /// Scheme-tagged wire representation.
    pub fn to_json(&self) -> JsonObject {
        let mut jo = JsonObject::new();
        jo.insert(KEY_SCHEME.into(), Value::String(self.scheme().name().into()));
        jo.insert(KEY_AUTHDATA.into(), Value::Object(self.auth_data()));
        jo
    }

    /// Parse a scheme-tagged envelope and dispatch to the scheme's parser.
    pub async fn parse(ctx: &dyn MslContext, jo: &JsonObject) -> Result<Self, UserAuthError> {
        let scheme_name = jo
            .get(KEY_SCHEME)
            .and_then(Value::as_str)
            .ok_or_else(|| UserAuthError::missing_field("user authentication data", "string", KEY_SCHEME))?;
        let scheme = UserAuthenticationScheme::from_name(scheme_name)
            .ok_or_else(|| UserAuthError::UnsupportedScheme(scheme_name.to_string()))?;
        let authdata = jo
            .get(KEY_AUTHDATA)
            .and_then(Value::as_object)
            .ok_or_else(|| UserAuthError::missing_field("user authentication data", "object", KEY_AUTHDATA))?;
        debug!(%scheme, "parsing user authentication data");

        match scheme {
            UserAuthenticationScheme::EmailPassword => {
                EmailPasswordAuthenticationData::parse(authdata).map(Self::EmailPassword)
            }
            UserAuthenticationScheme::UserIdToken => {
                UserIdTokenAuthenticationData::parse(ctx, authdata)
                    .await
                    .map(Self::UserIdToken)
            }
        }
    }
}

impl AuthenticationData for UserAuthenticationData {
    fn scheme(&self) -> UserAuthenticationScheme {
        match self {
            Self::EmailPassword(data) => data.scheme(),
            Self::UserIdToken(data) => data.scheme(),
        }
    }

    fn auth_data(&self) -> JsonObject {
        match self {
            Self::EmailPassword(data) => data.auth_data(),
            Self::UserIdToken(data) => data.auth_data(),
        }
    }
}

impl From<EmailPasswordAuthenticationData> for UserAuthenticationData {
    fn from(data: EmailPasswordAuthenticationData) -> Self {
        Self::EmailPassword(data)
    }
}

impl From<UserIdTokenAuthenticationData> for UserAuthenticationData {
    fn from(data: UserIdTokenAuthenticationData) -> Self {
        Self::UserIdToken(data)
    }
}
