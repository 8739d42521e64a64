//! User authentication schemes.

use serde::{Deserialize, Serialize};

/// The mechanism by which user authentication data is structured and
/// validated.
///
/// The set is closed: a new scheme is added as a new variant here and a new
/// case of [`crate::UserAuthenticationData`].
///
/// # Examples
///
/// ```
/// use msl_userauth::UserAuthenticationScheme;
///
/// let scheme: UserAuthenticationScheme = "USER_ID_TOKEN".parse().unwrap();
/// assert_eq!(scheme, UserAuthenticationScheme::UserIdToken);
/// assert_eq!(scheme.to_string(), "USER_ID_TOKEN");
/// ```
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UserAuthenticationScheme {
    /// Email address and password.
    EmailPassword,
    /// A user ID token bound to a master token.
    UserIdToken,
}

impl UserAuthenticationScheme {
    /// Look up a scheme by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Wire name of the scheme.
    pub fn name(self) -> &'static str {
        self.into()
    }
}
