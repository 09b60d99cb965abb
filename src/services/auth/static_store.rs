use std::collections::HashMap;

use async_trait::async_trait;
use token_auth::{Verification, VerifyDelegate};
use uuid::Uuid;

use crate::api::v1::extractors::AuthCtx;
use crate::config::StaticToken;
use crate::services::auth::types::{AuthInfo, VerifyError};

/// In-memory verify delegate fed from `AUTH_STATIC_TOKENS`.
///
/// - Token values are not printable via Debug.
/// - Tokens are compared in constant time.
/// - An empty store cannot verify anyone and answers with `VerifyError`.
#[derive(Clone, Default)]
pub struct StaticTokenStore {
    entries: HashMap<String, Entry>,
}

#[derive(Clone)]
struct Entry {
    token: String,
    user_id: Uuid,
}

impl std::fmt::Debug for StaticTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenStore")
            .field("identities", &self.entries.len())
            .finish()
    }
}

impl StaticTokenStore {
    /// Later entries for the same identity replace earlier ones.
    pub fn new(tokens: impl IntoIterator<Item = StaticToken>) -> Self {
        let entries = tokens
            .into_iter()
            .map(|t| {
                (
                    t.identity,
                    Entry {
                        token: t.token,
                        user_id: t.user_id,
                    },
                )
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl VerifyDelegate for StaticTokenStore {
    type Principal = AuthCtx;
    type Info = AuthInfo;
    type Error = VerifyError;

    async fn verify(
        &self,
        identity: &str,
        token: &str,
    ) -> Verification<AuthCtx, AuthInfo, VerifyError> {
        if self.entries.is_empty() {
            return Verification::Error(VerifyError::Unavailable(
                "no static tokens configured".to_string(),
            ));
        }

        let Some(entry) = self.entries.get(identity) else {
            // same amount of comparison work as a known identity
            std::hint::black_box(constant_time_eq(token.as_bytes(), token.as_bytes()));
            return Verification::Rejected(Some(AuthInfo::UnknownIdentity));
        };

        if !constant_time_eq(entry.token.as_bytes(), token.as_bytes()) {
            return Verification::Rejected(Some(AuthInfo::TokenMismatch));
        }

        Verification::accepted(AuthCtx::new(entry.user_id, identity))
    }
}

// length mismatch returns early; content is compared without short-circuit
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}
