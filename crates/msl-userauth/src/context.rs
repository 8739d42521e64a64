//! Collaborators available while parsing user authentication data.

use msl_tokens::TokenFactory;

/// Access to the collaborators the parse pipeline depends on.
pub trait MslContext: Send + Sync {
    /// Factory used to parse and verify tokens.
    fn token_factory(&self) -> &dyn TokenFactory;
}

/// An [`MslContext`] backed by a single token factory.
pub struct TokenContext<F> {
    factory: F,
}

impl<F: TokenFactory> TokenContext<F> {
    /// Wrap `factory`.
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    /// The wrapped factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }
}

impl<F: TokenFactory> MslContext for TokenContext<F> {
    fn token_factory(&self) -> &dyn TokenFactory {
        &self.factory
    }
}
