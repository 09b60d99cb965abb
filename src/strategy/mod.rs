/*!
 * Token authentication strategy
 *
 * Responsibility:
 * - request の credential source から (identity, token) を取り出す
 * - verify delegate に検証を委譲し、結果を success / fail / error のいずれか一つに変換する
 *
 * Public API:
 * - Strategy / TokenStrategy / TokenStrategyBuilder
 * - VerifyDelegate / verify_fn
 * - CredentialSource / CookieSource
 * - OutcomeSink / Outcome / Collect
 */

mod core;
mod delegate;
mod error;
mod sink;
mod source;
mod types;

pub use self::core::{
    DEFAULT_IDENTITY_FIELD, DEFAULT_TOKEN_FIELD, STRATEGY_NAME, Strategy, TokenStrategy,
    TokenStrategyBuilder,
};
pub use delegate::{VerifyDelegate, VerifyFn, verify_fn};
pub use error::StrategyError;
pub use sink::{Collect, Outcome, OutcomeSink};
pub use source::{CookieSource, CredentialSource};
pub use types::{
    AuthenticateOptions, BadRequestError, Credentials, DEFAULT_BAD_REQUEST_MESSAGE, Failure,
    Verification,
};
