//! Verify delegate interface.
use async_trait::async_trait;
use std::{future::Future, sync::Arc};

use super::Verification;

/// Decides whether an (identity, token) pair is valid.
///
/// The strategy awaits `verify` exactly once per authentication attempt.
/// Implementations are shared across concurrent requests, so they must be
/// `Send + Sync` (typically `Arc<...>` / pool handles inside).
#[async_trait]
pub trait VerifyDelegate: Send + Sync + 'static {
    // Authenticated identity handed to the host on success.
    type Principal: Send;
    // Optional diagnostics attached to a rejection or an acceptance.
    type Info: Send;
    // Cause of an infrastructural failure.
    type Error: Send;

    async fn verify(
        &self,
        identity: &str,
        token: &str,
    ) -> Verification<Self::Principal, Self::Info, Self::Error>;
}

#[async_trait]
impl<V> VerifyDelegate for Arc<V>
where
    V: VerifyDelegate + ?Sized,
{
    type Principal = V::Principal;
    type Info = V::Info;
    type Error = V::Error;

    async fn verify(
        &self,
        identity: &str,
        token: &str,
    ) -> Verification<Self::Principal, Self::Info, Self::Error> {
        self.as_ref().verify(identity, token).await
    }
}

/// Delegate built from an async closure. See [`verify_fn`].
#[derive(Clone, Copy)]
pub struct VerifyFn<F> {
    f: F,
}

/// Wrap `Fn(identity, token) -> impl Future<Output = Verification<..>>` as a
/// [`VerifyDelegate`].
///
/// ```ignore
/// let verify = verify_fn(|identity: String, token: String| async move {
///     if token == "t1" {
///         Verification::<_, (), std::io::Error>::accepted(identity)
///     } else {
///         Verification::rejected()
///     }
/// });
/// ```
pub fn verify_fn<F>(f: F) -> VerifyFn<F> {
    VerifyFn { f }
}

impl<F> std::fmt::Debug for VerifyFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyFn").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut, P, I, E> VerifyDelegate for VerifyFn<F>
where
    F: Fn(String, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Verification<P, I, E>> + Send + 'static,
    P: Send + 'static,
    I: Send + 'static,
    E: Send + 'static,
{
    type Principal = P;
    type Info = I;
    type Error = E;

    async fn verify(&self, identity: &str, token: &str) -> Verification<P, I, E> {
        (self.f)(identity.to_owned(), token.to_owned()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn verify_fn_forwards_both_values() {
        let verify = verify_fn(|identity: String, token: String| async move {
            Verification::<_, (), ()>::accepted(format!("{identity}/{token}"))
        });

        assert_eq!(
            verify.verify("alice", "t1").await,
            Verification::Accepted("alice/t1".to_string(), None)
        );
    }

    #[tokio::test]
    async fn arc_delegate_forwards_to_inner() {
        let verify = Arc::new(verify_fn(|_: String, _: String| async {
            Verification::<(), &'static str, ()>::Rejected(Some("nope"))
        }));

        assert_eq!(
            verify.verify("alice", "t1").await,
            Verification::Rejected(Some("nope"))
        );
    }
}
