#![deny(missing_docs)]

//! # MSL Tokens
//!
//! Session and user credentials consumed by MSL user authentication.
//!
//! ## Token binding
//!
//! ```text
//! MasterToken (serial number N, issued to an entity)
//! └── UserIdToken (master token serial number N, issued to a user)
//! ```
//!
//! A [`UserIdToken`] is only valid together with the [`MasterToken`] it was
//! issued for. [`UserIdToken::is_bound_to`] is the binding predicate.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`error`] | `ErrorCode`, `ResponseCode`, `TokenError` |
//! | [`master_token`] | Session credential |
//! | [`user_id_token`] | User credential bound to a master token |
//! | [`issuer`] | Signs new tokens with an nkeys account key |
//! | [`factory`] | `TokenFactory` trait and the signature-verifying factory |

pub mod error;
pub mod factory;
pub mod issuer;
pub mod master_token;
pub mod user_id_token;

pub use error::*;
pub use factory::*;
pub use issuer::*;
pub use master_token::*;
pub use user_id_token::*;

/// A JSON object as carried on the wire.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Largest serial or sequence number a token may carry (2^53).
pub const MAX_LONG_VALUE: u64 = 9_007_199_254_740_992;
