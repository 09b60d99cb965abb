/*
 * Responsibility
 * - verify delegate がこのアプリで返す型 (principal / info / error) を固定する
 * - middleware や state はここで定義した DynVerify だけに依存する
 */
use thiserror::Error;
use token_auth::VerifyDelegate;

use crate::api::v1::extractors::AuthCtx;

/// Diagnostics attached to a verdict. Only logged, never sent to the client.
///
/// The static store attaches one to rejections only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthInfo {
    UnknownIdentity,
    TokenMismatch,
}

/// Verification could not be completed.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Delegate type the HTTP layer works with.
pub type DynVerify =
    dyn VerifyDelegate<Principal = AuthCtx, Info = AuthInfo, Error = VerifyError>;
