/*
 * Responsibility
 * - Strategy (host が要求する capability: name + authenticate) の定義
 * - TokenStrategy: credential 抽出 → verify delegate 呼び出し → outcome への変換
 *
 * Notes
 * - ロギング / リトライ / エラー変換はここではしない (host 側の責務)
 * - リクエストごとの可変状態は持たない。並行呼び出しでも同期不要
 */
use std::sync::Arc;

use async_trait::async_trait;

use super::{
    AuthenticateOptions, BadRequestError, CredentialSource, Credentials, Failure, OutcomeSink,
    StrategyError, Verification, VerifyDelegate,
};

/// Name the token strategy registers under.
pub const STRATEGY_NAME: &str = "token";

/// Default credential keys (cookie names).
pub const DEFAULT_IDENTITY_FIELD: &str = "username";
pub const DEFAULT_TOKEN_FIELD: &str = "token";

/// Capability every pluggable authentication strategy exposes to the host.
///
/// `P` / `I` / `E` are the principal, info and error payloads the strategy
/// hands to the sink.
#[async_trait]
pub trait Strategy<P: Send, I: Send, E: Send>: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run one authentication attempt and emit exactly one signal into `sink`.
    async fn authenticate<C, S>(
        &self,
        source: &C,
        options: &AuthenticateOptions,
        sink: S,
    ) -> S::Output
    where
        C: CredentialSource + Sync + ?Sized,
        S: OutcomeSink<P, I, E> + Send,
        S::Output: Send;
}

/// Authenticates an (identity, token) pair through a verify delegate.
pub struct TokenStrategy<V: ?Sized> {
    verify: Arc<V>,
    identity_field: String,
    token_field: String,
}

impl<V: ?Sized> Clone for TokenStrategy<V> {
    fn clone(&self) -> Self {
        Self {
            verify: Arc::clone(&self.verify),
            identity_field: self.identity_field.clone(),
            token_field: self.token_field.clone(),
        }
    }
}

impl<V: ?Sized> std::fmt::Debug for TokenStrategy<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // delegate is opaque (may hold pools / secrets)
        f.debug_struct("TokenStrategy")
            .field("name", &STRATEGY_NAME)
            .field("identity_field", &self.identity_field)
            .field("token_field", &self.token_field)
            .finish_non_exhaustive()
    }
}

impl<V: VerifyDelegate> TokenStrategy<V> {
    /// Strategy with the default credential keys.
    pub fn new(verify: V) -> Self {
        Self::from_shared(Arc::new(verify))
    }
}

impl<V: VerifyDelegate + ?Sized> TokenStrategy<V> {
    /// Share an existing delegate (also accepts `Arc<dyn VerifyDelegate<..>>`).
    pub fn from_shared(verify: Arc<V>) -> Self {
        Self {
            verify,
            identity_field: DEFAULT_IDENTITY_FIELD.to_owned(),
            token_field: DEFAULT_TOKEN_FIELD.to_owned(),
        }
    }

    pub fn builder() -> TokenStrategyBuilder<V> {
        TokenStrategyBuilder::default()
    }

    pub fn identity_field(&self) -> &str {
        &self.identity_field
    }

    pub fn token_field(&self) -> &str {
        &self.token_field
    }

    /// Read both credentials from `source`. `None` if either is absent or empty.
    pub fn extract<C>(&self, source: &C) -> Option<Credentials>
    where
        C: CredentialSource + ?Sized,
    {
        Credentials::from_parts(
            source.credential(&self.identity_field).as_deref(),
            source.credential(&self.token_field).as_deref(),
        )
    }
}

#[async_trait]
impl<V: VerifyDelegate + ?Sized> Strategy<V::Principal, V::Info, V::Error> for TokenStrategy<V> {
    fn name(&self) -> &'static str {
        STRATEGY_NAME
    }

    async fn authenticate<C, S>(
        &self,
        source: &C,
        options: &AuthenticateOptions,
        sink: S,
    ) -> S::Output
    where
        C: CredentialSource + Sync + ?Sized,
        S: OutcomeSink<V::Principal, V::Info, V::Error> + Send,
        S::Output: Send,
    {
        let Some(Credentials { identity, token }) = self.extract(source) else {
            return sink.fail(Failure::BadRequest(BadRequestError::new(
                options.bad_request_message(),
            )));
        };

        match (*self.verify).verify(&identity, &token).await {
            Verification::Error(cause) => sink.error(cause),
            Verification::Rejected(info) => sink.fail(Failure::Rejected(info)),
            Verification::Accepted(principal, info) => sink.success(principal, info),
        }
    }
}

/// Builder for [`TokenStrategy`]. `build` fails if no delegate was set.
pub struct TokenStrategyBuilder<V: ?Sized> {
    verify: Option<Arc<V>>,
    identity_field: String,
    token_field: String,
}

impl<V: ?Sized> Default for TokenStrategyBuilder<V> {
    fn default() -> Self {
        Self {
            verify: None,
            identity_field: DEFAULT_IDENTITY_FIELD.to_owned(),
            token_field: DEFAULT_TOKEN_FIELD.to_owned(),
        }
    }
}

impl<V: VerifyDelegate> TokenStrategyBuilder<V> {
    pub fn verify(self, verify: V) -> Self {
        self.shared_verify(Arc::new(verify))
    }
}

impl<V: VerifyDelegate + ?Sized> TokenStrategyBuilder<V> {
    pub fn shared_verify(mut self, verify: Arc<V>) -> Self {
        self.verify = Some(verify);
        self
    }

    pub fn identity_field(mut self, name: impl Into<String>) -> Self {
        self.identity_field = name.into();
        self
    }

    pub fn token_field(mut self, name: impl Into<String>) -> Self {
        self.token_field = name.into();
        self
    }

    pub fn build(self) -> Result<TokenStrategy<V>, StrategyError> {
        let verify = self.verify.ok_or(StrategyError::MissingVerify)?;

        if self.identity_field.trim().is_empty() {
            return Err(StrategyError::EmptyField("identity_field"));
        }
        if self.token_field.trim().is_empty() {
            return Err(StrategyError::EmptyField("token_field"));
        }

        Ok(TokenStrategy {
            verify,
            identity_field: self.identity_field,
            token_field: self.token_field,
        })
    }
}
