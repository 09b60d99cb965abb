/*
 * Responsibility
 * - strategy が扱う値の型 (Credentials / Verification / Failure / Options)
 * - 振る舞いは core 側、ここは「型（契約）」として固定する
 */
use serde::Deserialize;
use thiserror::Error;

/// Message used when the request carries no usable credentials.
pub const DEFAULT_BAD_REQUEST_MESSAGE: &str = "Missing credentials";

/// Identity + token pair read from a credential source.
///
/// Both fields are non-empty once extraction has succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identity: String,
    pub token: String,
}

impl Credentials {
    /// Returns `None` unless both values are present and non-empty.
    pub fn from_parts(identity: Option<&str>, token: Option<&str>) -> Option<Self> {
        match (identity, token) {
            (Some(identity), Some(token)) if !identity.is_empty() && !token.is_empty() => {
                Some(Self {
                    identity: identity.to_owned(),
                    token: token.to_owned(),
                })
            }
            _ => None,
        }
    }
}

/// Result produced by a verify delegate.
///
/// - `Error`: verification could not be completed (backend failure etc.)
/// - `Rejected`: verification completed, credentials are not valid
/// - `Accepted`: verification completed, credentials are valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification<P, I, E> {
    Error(E),
    Rejected(Option<I>),
    Accepted(P, Option<I>),
}

impl<P, I, E> Verification<P, I, E> {
    pub fn accepted(principal: P) -> Self {
        Self::Accepted(principal, None)
    }

    pub fn rejected() -> Self {
        Self::Rejected(None)
    }

    /// Fold a `(err, principal, info)` completion into a single verdict.
    ///
    /// An error always wins, even when a principal came along with it.
    /// Without an error, a missing principal is a rejection.
    pub fn from_parts(error: Option<E>, principal: Option<P>, info: Option<I>) -> Self {
        match (error, principal) {
            (Some(cause), _) => Self::Error(cause),
            (None, None) => Self::Rejected(info),
            (None, Some(principal)) => Self::Accepted(principal, info),
        }
    }
}

/// Missing identity or token. Distinct from a rejection by the delegate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BadRequestError {
    message: String,
}

impl BadRequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Payload of a failure signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure<I> {
    // request did not carry both credentials; the delegate was not called
    BadRequest(BadRequestError),
    // delegate looked at the credentials and said no
    Rejected(Option<I>),
}

/// Per-call options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthenticateOptions {
    #[serde(default, alias = "badRequestMessage")]
    pub bad_request_message: Option<String>,
}

impl AuthenticateOptions {
    pub fn with_bad_request_message(message: impl Into<String>) -> Self {
        Self {
            bad_request_message: Some(message.into()),
        }
    }

    pub fn bad_request_message(&self) -> &str {
        self.bad_request_message
            .as_deref()
            .unwrap_or(DEFAULT_BAD_REQUEST_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_both_values() {
        assert!(Credentials::from_parts(None, None).is_none());
        assert!(Credentials::from_parts(Some("alice"), None).is_none());
        assert!(Credentials::from_parts(None, Some("t1")).is_none());
        assert!(Credentials::from_parts(Some(""), Some("t1")).is_none());
        assert!(Credentials::from_parts(Some("alice"), Some("")).is_none());

        let creds = Credentials::from_parts(Some("alice"), Some("t1")).unwrap();
        assert_eq!(creds.identity, "alice");
        assert_eq!(creds.token, "t1");
    }

    #[test]
    fn from_parts_error_wins_over_principal() {
        let v: Verification<&str, (), &str> =
            Verification::from_parts(Some("boom"), Some("p"), None);
        assert_eq!(v, Verification::Error("boom"));
    }

    #[test]
    fn from_parts_without_principal_is_rejection_with_info() {
        let v: Verification<&str, &str, ()> = Verification::from_parts(None, None, Some("why"));
        assert_eq!(v, Verification::Rejected(Some("why")));
    }

    #[test]
    fn from_parts_with_principal_is_acceptance() {
        let v: Verification<&str, &str, ()> =
            Verification::from_parts(None, Some("alice"), Some("meta"));
        assert_eq!(v, Verification::Accepted("alice", Some("meta")));
    }

    #[test]
    fn options_default_message() {
        assert_eq!(
            AuthenticateOptions::default().bad_request_message(),
            "Missing credentials"
        );
        assert_eq!(
            AuthenticateOptions::with_bad_request_message("log in first").bad_request_message(),
            "log in first"
        );
    }

    #[test]
    fn options_accept_camel_case_key() {
        let opts: AuthenticateOptions =
            serde_json::from_str(r#"{"badRequestMessage":"nope"}"#).unwrap();
        assert_eq!(opts.bad_request_message.as_deref(), Some("nope"));

        let opts: AuthenticateOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, AuthenticateOptions::default());
    }
}
