#![deny(missing_docs)]

//! # MSL User Authentication
//!
//! User authentication data for the message security layer: how a claimed
//! user identity is represented, serialised, and rebuilt from untrusted wire
//! input.
//!
//! ## Schemes
//!
//! ```text
//! UserAuthenticationData
//! ├── EmailPassword(EmailPasswordAuthenticationData)
//! └── UserIdToken(UserIdTokenAuthenticationData)
//!     ├── MasterToken
//!     └── UserIdToken (bound to the master token)
//! ```
//!
//! ## Failure categories
//!
//! | Error | Meaning | Peer response |
//! |-------|---------|---------------|
//! | [`UserAuthError::Encoding`] | missing or malformed fields | `FAIL` |
//! | [`UserAuthError::UserAuth`] | master token or user ID token rejected | `USER_REAUTH` |
//! | [`UserAuthError::UnsupportedScheme`] | unknown scheme name | `FAIL` |
//! | [`UserAuthError::Internal`] | unbound token pair assembled | `FAIL` |
//! | [`UserAuthError::Unexpected`] | anything else, passed through | `FAIL` |
//!
//! # Quick start
//!
//! ```rust
//! use msl_tokens::{SignedTokenFactory, TokenIssuer};
//! use msl_userauth::{TokenContext, UserAuthenticationData, UserIdTokenAuthenticationData};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let issuer = TokenIssuer::generate();
//! let master_token = issuer.issue_master_token("device-1")?;
//! let user_id_token = issuer.issue_user_id_token(&master_token, "alice")?;
//! let data = UserAuthenticationData::from(
//!     UserIdTokenAuthenticationData::new(master_token, user_id_token)?,
//! );
//!
//! let ctx = TokenContext::new(SignedTokenFactory::new(&issuer.public_key())?);
//! let parsed = UserAuthenticationData::parse(&ctx, &data.to_json()).await?;
//! assert_eq!(parsed, data);
//! # Ok(())
//! # }
//! ```

pub mod auth_data;
pub mod context;
pub mod email_password;
pub mod error;
pub mod scheme;
pub mod user_id_token;

#[cfg(test)]
mod testing;

pub use auth_data::{AuthenticationData, UserAuthenticationData};
pub use context::{MslContext, TokenContext};
pub use email_password::EmailPasswordAuthenticationData;
pub use error::UserAuthError;
pub use scheme::UserAuthenticationScheme;
pub use user_id_token::UserIdTokenAuthenticationData;
