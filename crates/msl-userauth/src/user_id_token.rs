//! User ID token user authentication data.
//!
//! ```text
//! { "mastertoken": mastertoken, "useridtoken": useridtoken }
//! ```
//!
//! Both keys are mandatory and both values are the tokens' own JSON objects.

use msl_tokens::{ErrorCode, JsonObject, MasterToken, TokenError, UserIdToken};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::auth_data::AuthenticationData;
use crate::context::MslContext;
use crate::error::UserAuthError;
use crate::scheme::UserAuthenticationScheme;

/// JSON key for the master token.
pub const KEY_MASTER_TOKEN: &str = "mastertoken";
/// JSON key for the user ID token.
pub const KEY_USER_ID_TOKEN: &str = "useridtoken";

const CONTEXT: &str = "user ID token authdata";

/// A user identified by a user ID token and the master token it is bound
/// to.
///
/// The user ID token is bound to the master token for as long as the value
/// exists; [`new`](Self::new) refuses an unbound pair and there is no way to
/// replace either token afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdTokenAuthenticationData {
    master_token: MasterToken,
    user_id_token: UserIdToken,
}

impl UserIdTokenAuthenticationData {
    /// Pair a master token with a user ID token bound to it.
    ///
    /// Returns [`UserAuthError::Internal`] if `user_id_token` is not bound to
    /// `master_token`: pairing unrelated tokens is a caller bug, not a
    /// validation failure.
    pub fn new(master_token: MasterToken, user_id_token: UserIdToken) -> Result<Self, UserAuthError> {
        if !user_id_token.is_bound_to(&master_token) {
            return Err(UserAuthError::Internal(format!(
                "user ID token {} must be bound to master token {}",
                user_id_token.serial_number(),
                master_token.serial_number()
            )));
        }
        Ok(Self {
            master_token,
            user_id_token,
        })
    }

    /// The master token.
    pub fn master_token(&self) -> &MasterToken {
        &self.master_token
    }

    /// The user ID token.
    pub fn user_id_token(&self) -> &UserIdToken {
        &self.user_id_token
    }

    /// Reconstruct and verify user ID token authentication data received
    /// from a peer.
    ///
    /// 1. Both mandatory keys must hold JSON objects; otherwise
    ///    [`UserAuthError::Encoding`] is returned and no token is parsed.
    /// 2. The master token is parsed. A protocol rejection becomes
    ///    [`UserAuthError::UserAuth`] with
    ///    [`ErrorCode::UserAuthMasterTokenInvalid`].
    /// 3. Only then is the user ID token parsed against the verified master
    ///    token. A protocol rejection becomes [`UserAuthError::UserAuth`]
    ///    with [`ErrorCode::UserAuthUserIdTokenInvalid`].
    /// 4. The pair is assembled with [`new`](Self::new).
    ///
    /// Non-protocol failures from either parser are returned unchanged as
    /// [`UserAuthError::Unexpected`].
    pub async fn parse(ctx: &dyn MslContext, jo: &JsonObject) -> Result<Self, UserAuthError> {
        // 1. Shape
        let master_token_jo = object_field(jo, KEY_MASTER_TOKEN)?;
        let user_id_token_jo = object_field(jo, KEY_USER_ID_TOKEN)?;

        let factory = ctx.token_factory();

        // 2. Master token
        let master_token = factory
            .parse_master_token(master_token_jo)
            .await
            .map_err(|e| reclassify(e, ErrorCode::UserAuthMasterTokenInvalid))?;

        // 3. User ID token, verified against the resolved master token
        let user_id_token = factory
            .parse_user_id_token(user_id_token_jo, &master_token)
            .await
            .map_err(|e| reclassify(e, ErrorCode::UserAuthUserIdTokenInvalid))?;

        // 4. Assemble. The token factory already checked the binding, so a
        //    failure here means the factory is broken.
        let data = Self::new(master_token, user_id_token).inspect_err(|e| {
            error!(error = %e, "token factory accepted an unbound user ID token");
        })?;

        debug!(
            mt_serial_number = data.master_token.serial_number(),
            uit_serial_number = data.user_id_token.serial_number(),
            "user ID token authdata parsed"
        );
        Ok(data)
    }
}

impl AuthenticationData for UserIdTokenAuthenticationData {
    fn scheme(&self) -> UserAuthenticationScheme {
        UserAuthenticationScheme::UserIdToken
    }

    fn auth_data(&self) -> JsonObject {
        let mut jo = JsonObject::new();
        jo.insert(KEY_MASTER_TOKEN.into(), Value::Object(self.master_token.to_json()));
        jo.insert(KEY_USER_ID_TOKEN.into(), Value::Object(self.user_id_token.to_json()));
        jo
    }
}

fn object_field<'a>(jo: &'a JsonObject, key: &str) -> Result<&'a JsonObject, UserAuthError> {
    jo.get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| UserAuthError::missing_field(CONTEXT, "object", key))
}

/// Map a token parser failure onto the user authentication boundary.
///
/// Protocol rejections are tagged with `code` so the caller does not trigger
/// entity re-authentication for a problem with user authentication data.
fn reclassify(err: TokenError, code: ErrorCode) -> UserAuthError {
    match err {
        TokenError::Rejected { .. } => {
            warn!(%code, cause = %err, "credential rejected in user ID token authdata");
            UserAuthError::UserAuth {
                code,
                details: CONTEXT.to_string(),
                cause: err,
            }
        }
        TokenError::Unexpected(e) => UserAuthError::Unexpected(e),
    }
}
