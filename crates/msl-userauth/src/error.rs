//! Error types for user authentication.
//!
//! [`UserAuthError`] is what callers see at the parse boundary. Failures
//! reported by the token collaborators are reclassified exactly once, right
//! after the failing call, so the caller can tell a bad master token from a
//! bad user ID token without inspecting collaborator errors.

use msl_tokens::{ErrorCode, ResponseCode, TokenError};

/// Errors produced when constructing or parsing user authentication data.
#[derive(Debug, thiserror::Error)]
pub enum UserAuthError {
    /// Missing or malformed mandatory fields in the wire input.
    #[error("{code}: {details}")]
    Encoding {
        /// Protocol error code.
        code: ErrorCode,
        /// Which field was at fault.
        details: String,
    },

    /// A credential was rejected while parsing user authentication data.
    #[error("{code}: {details}")]
    UserAuth {
        /// Which credential failed.
        code: ErrorCode,
        /// Context for diagnostics.
        details: String,
        /// The collaborator's original rejection.
        #[source]
        cause: TokenError,
    },

    /// The scheme named on the wire is not known.
    #[error("unidentified user authentication scheme: {0}")]
    UnsupportedScheme(String),

    /// A precondition that correct code and collaborators never violate.
    #[error("internal error: {0}")]
    Internal(String),

    /// A failure outside the protocol's validation rules, passed through
    /// unchanged.
    #[error(transparent)]
    Unexpected(anyhow::Error),
}

impl UserAuthError {
    /// Protocol error code for this failure.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Encoding { code, .. } | Self::UserAuth { code, .. } => *code,
            Self::UnsupportedScheme(_) => ErrorCode::UnidentifiedUserAuthScheme,
            Self::Internal(_) | Self::Unexpected(_) => ErrorCode::InternalException,
        }
    }

    /// The corrective action the peer should be asked to take.
    pub fn response_code(&self) -> ResponseCode {
        self.error_code().response_code()
    }

    pub(crate) fn missing_field(context: &str, kind: &str, key: &str) -> Self {
        Self::Encoding {
            code: ErrorCode::JsonParseError,
            details: format!("{context} requires {kind} `{key}`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn user_auth_keeps_cause_as_source() {
        let err = UserAuthError::UserAuth {
            code: ErrorCode::UserAuthMasterTokenInvalid,
            details: "user ID token authdata".into(),
            cause: TokenError::rejected(ErrorCode::MasterTokenUntrusted, "bad signature"),
        };
        assert_eq!(
            err.to_string(),
            "USER_AUTH_MASTER_TOKEN_INVALID: user ID token authdata"
        );
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "MASTER_TOKEN_UNTRUSTED: bad signature");
    }

    #[test]
    fn response_codes() {
        let encoding = UserAuthError::missing_field("user ID token authdata", "object", "mastertoken");
        assert_eq!(
            encoding.to_string(),
            "JSON_PARSE_ERROR: user ID token authdata requires object `mastertoken`"
        );
        assert_eq!(encoding.response_code(), ResponseCode::Fail);

        let internal = UserAuthError::Internal("unbound".into());
        assert_eq!(internal.error_code(), ErrorCode::InternalException);
        assert_eq!(internal.response_code(), ResponseCode::Fail);

        let scheme = UserAuthError::UnsupportedScheme("X".into());
        assert_eq!(scheme.to_string(), "unidentified user authentication scheme: X");
        assert_eq!(scheme.error_code(), ErrorCode::UnidentifiedUserAuthScheme);
    }
}
