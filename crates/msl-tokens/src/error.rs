//! Error types for the `msl-tokens` crate.
//!
//! Every protocol-level failure is identified by an [`ErrorCode`], which in
//! turn tells the remote peer what to do next through its [`ResponseCode`].
//! Token parsing failures are reported as [`TokenError`].

// ---------------------------------------------------------------------------
// ResponseCode
// ---------------------------------------------------------------------------

/// Corrective action requested from the peer when a message is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ResponseCode {
    /// The message is rejected; no corrective action will help.
    Fail = 1,
    /// The message may succeed if retried later.
    TransientFailure = 2,
    /// The entity must re-authenticate.
    EntityReauth = 3,
    /// The user must re-authenticate.
    UserReauth = 4,
    /// A key exchange is required.
    KeyxRequired = 5,
}

impl ResponseCode {
    /// Numeric value carried on the wire.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// ErrorCode
// ---------------------------------------------------------------------------

/// Protocol errors raised while parsing and validating user authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A JSON document was missing a mandatory field or had the wrong type.
    JsonParseError,
    /// The master token signature did not verify.
    MasterTokenUntrusted,
    /// The master token has expired.
    MasterTokenExpired,
    /// The master token data could not be decoded.
    MasterTokenTokendataParseError,
    /// The user ID token signature did not verify.
    UserIdTokenUntrusted,
    /// The user ID token has expired.
    UserIdTokenExpired,
    /// The user ID token data could not be decoded.
    UserIdTokenTokendataParseError,
    /// The user ID token was issued for a different master token.
    UserIdTokenMasterTokenMismatch,
    /// User authentication data carried an invalid master token.
    UserAuthMasterTokenInvalid,
    /// User authentication data carried an invalid user ID token.
    UserAuthUserIdTokenInvalid,
    /// User authentication data named a scheme this build does not know.
    UnidentifiedUserAuthScheme,
    /// A local invariant was violated.
    InternalException,
}

impl ErrorCode {
    /// Numeric error code reported to the peer.
    pub fn internal_code(self) -> u32 {
        match self {
            Self::JsonParseError => 1000,
            Self::MasterTokenUntrusted => 3001,
            Self::MasterTokenExpired => 3002,
            Self::MasterTokenTokendataParseError => 3003,
            Self::UserIdTokenUntrusted => 4001,
            Self::UserIdTokenExpired => 4002,
            Self::UserIdTokenTokendataParseError => 4003,
            Self::UserIdTokenMasterTokenMismatch => 4004,
            Self::UserAuthMasterTokenInvalid => 5001,
            Self::UserAuthUserIdTokenInvalid => 5002,
            Self::UnidentifiedUserAuthScheme => 5003,
            Self::InternalException => 9000,
        }
    }

    /// The corrective action the peer should take.
    pub fn response_code(self) -> ResponseCode {
        match self {
            Self::MasterTokenUntrusted
            | Self::MasterTokenExpired
            | Self::MasterTokenTokendataParseError => ResponseCode::EntityReauth,
            Self::UserIdTokenUntrusted
            | Self::UserIdTokenExpired
            | Self::UserIdTokenTokendataParseError
            | Self::UserIdTokenMasterTokenMismatch
            | Self::UserAuthMasterTokenInvalid
            | Self::UserAuthUserIdTokenInvalid => ResponseCode::UserReauth,
            Self::JsonParseError | Self::UnidentifiedUserAuthScheme | Self::InternalException => {
                ResponseCode::Fail
            }
        }
    }

    /// Human-readable description.
    pub fn message(self) -> &'static str {
        match self {
            Self::JsonParseError => "Error parsing JSON.",
            Self::MasterTokenUntrusted => "Master token is not trusted.",
            Self::MasterTokenExpired => "Master token is expired.",
            Self::MasterTokenTokendataParseError => "Error parsing master token data.",
            Self::UserIdTokenUntrusted => "User ID token is not trusted.",
            Self::UserIdTokenExpired => "User ID token is expired.",
            Self::UserIdTokenTokendataParseError => "Error parsing user ID token data.",
            Self::UserIdTokenMasterTokenMismatch => {
                "User ID token master token serial number does not match master token serial number."
            }
            Self::UserAuthMasterTokenInvalid => "User authentication data master token is invalid.",
            Self::UserAuthUserIdTokenInvalid => "User authentication data user ID token is invalid.",
            Self::UnidentifiedUserAuthScheme => "Unable to identify user authentication scheme.",
            Self::InternalException => "Internal exception.",
        }
    }
}

// ---------------------------------------------------------------------------
// TokenError
// ---------------------------------------------------------------------------

/// Errors reported by token parsing and issuing.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token is malformed, forged, expired or not bound as required.
    #[error("{code}: {details}")]
    Rejected {
        /// Protocol error identifying the failed check.
        code: ErrorCode,
        /// Context for diagnostics.
        details: String,
    },

    /// A failure outside the protocol's own validation rules.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl TokenError {
    /// Shorthand for a [`TokenError::Rejected`].
    pub fn rejected(code: ErrorCode, details: impl Into<String>) -> Self {
        Self::Rejected {
            code,
            details: details.into(),
        }
    }

    /// The protocol error code, if this is a protocol-level rejection.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Rejected { code, .. } => Some(*code),
            Self::Unexpected(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
