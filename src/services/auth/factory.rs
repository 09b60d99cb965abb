//! Factory: build the token strategy from application `Config`.
use std::sync::Arc;

use token_auth::{StrategyError, TokenStrategy};

use crate::config::Config;
use crate::services::auth::{DynVerify, StaticTokenStore};

pub fn build_token_strategy(
    config: &Config,
) -> Result<Arc<TokenStrategy<DynVerify>>, StrategyError> {
    let store = StaticTokenStore::new(config.static_tokens.clone());
    if store.is_empty() {
        tracing::warn!("AUTH_STATIC_TOKENS has no entries; every attempt will fail as unavailable");
    } else {
        tracing::debug!(identities = store.len(), "static token store loaded");
    }
    let store: Arc<DynVerify> = Arc::new(store);

    let strategy = TokenStrategy::builder()
        .shared_verify(store)
        .identity_field(config.identity_field.as_str())
        .token_field(config.token_field.as_str())
        .build()?;

    Ok(Arc::new(strategy))
}
