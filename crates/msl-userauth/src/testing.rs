//! Test doubles shared by the unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use msl_tokens::{
    ErrorCode, JsonObject, MasterToken, SignedTokenFactory, TokenError, TokenFactory, TokenIssuer,
    UserIdToken,
};
use serde_json::Value;

use crate::context::TokenContext;
use crate::user_id_token::UserIdTokenAuthenticationData;

pub(crate) fn object(value: Value) -> JsonObject {
    match value {
        Value::Object(jo) => jo,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Observable collaborator events, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    MasterTokenStarted,
    MasterTokenResolved,
    UserIdTokenStarted,
    UserIdTokenResolved,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Fault {
    Reject(ErrorCode),
    Unexpected,
}

impl Fault {
    fn into_error(self) -> TokenError {
        match self {
            Self::Reject(code) => TokenError::rejected(code, "injected"),
            Self::Unexpected => {
                TokenError::Unexpected(anyhow::Error::new(std::io::Error::other("key store unavailable")))
            }
        }
    }
}

/// Wraps a [`SignedTokenFactory`], records every call and can inject
/// failures.
pub(crate) struct RecordingFactory {
    inner: SignedTokenFactory,
    calls: Arc<Mutex<Vec<Call>>>,
    master_token_fault: Option<Fault>,
    user_id_token_fault: Option<Fault>,
    substitute_user_id_token: Option<UserIdToken>,
}

impl RecordingFactory {
    fn new(inner: SignedTokenFactory) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
            master_token_fault: None,
            user_id_token_fault: None,
            substitute_user_id_token: None,
        }
    }

    pub(crate) fn fail_master_token(mut self, fault: Fault) -> Self {
        self.master_token_fault = Some(fault);
        self
    }

    pub(crate) fn fail_user_id_token(mut self, fault: Fault) -> Self {
        self.user_id_token_fault = Some(fault);
        self
    }

    /// Return `token` from every user ID token parse, skipping verification.
    pub(crate) fn substitute_user_id_token(mut self, token: UserIdToken) -> Self {
        self.substitute_user_id_token = Some(token);
        self
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TokenFactory for RecordingFactory {
    async fn parse_master_token(&self, jo: &JsonObject) -> Result<MasterToken, TokenError> {
        self.record(Call::MasterTokenStarted);
        tokio::task::yield_now().await;
        let result = match self.master_token_fault {
            Some(fault) => Err(fault.into_error()),
            None => self.inner.parse_master_token(jo).await,
        };
        self.record(Call::MasterTokenResolved);
        result
    }

    async fn parse_user_id_token(
        &self,
        jo: &JsonObject,
        master_token: &MasterToken,
    ) -> Result<UserIdToken, TokenError> {
        self.record(Call::UserIdTokenStarted);
        tokio::task::yield_now().await;
        let result = match (self.user_id_token_fault, &self.substitute_user_id_token) {
            (Some(fault), _) => Err(fault.into_error()),
            (None, Some(token)) => Ok(token.clone()),
            (None, None) => self.inner.parse_user_id_token(jo, master_token).await,
        };
        self.record(Call::UserIdTokenResolved);
        result
    }
}

/// An issuer, a context trusting it, and one bound token pair.
pub(crate) struct Fixture {
    pub issuer: TokenIssuer,
    pub ctx: TokenContext<RecordingFactory>,
    pub master_token: MasterToken,
    pub user_id_token: UserIdToken,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::with(|_, factory| factory)
    }

    pub(crate) fn with(
        configure: impl FnOnce(&TokenIssuer, RecordingFactory) -> RecordingFactory,
    ) -> Self {
        let issuer = TokenIssuer::generate();
        let inner = SignedTokenFactory::new(&issuer.public_key()).unwrap();
        let factory = configure(&issuer, RecordingFactory::new(inner));
        let master_token = issuer.issue_master_token("entity").unwrap();
        let user_id_token = issuer.issue_user_id_token(&master_token, "alice").unwrap();
        Self {
            issuer,
            ctx: TokenContext::new(factory),
            master_token,
            user_id_token,
        }
    }

    pub(crate) fn bound_data(&self) -> UserIdTokenAuthenticationData {
        UserIdTokenAuthenticationData::new(self.master_token.clone(), self.user_id_token.clone())
            .unwrap()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.ctx.factory().calls.lock().unwrap().clone()
    }
}
