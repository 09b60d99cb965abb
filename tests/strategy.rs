#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the token strategy contract
//!
//! These tests verify that:
//! 1. Missing credentials fail with a bad request and never reach the delegate
//! 2. Present credentials reach the delegate exactly once, unchanged
//! 3. Each delegate verdict maps to exactly one signal, payloads untouched

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use token_auth::strategy::{
    AuthenticateOptions, BadRequestError, Collect, Failure, Outcome, OutcomeSink, Strategy,
    StrategyError, TokenStrategy, Verification, VerifyDelegate, verify_fn,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct User {
    id: u32,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Info(&'static str);

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoreDown;

type Reply = Verification<User, Info, StoreDown>;

/// Delegate that records its calls and answers with a fixed verdict.
struct Scripted {
    calls: Mutex<Vec<(String, String)>>,
    reply: Reply,
}

impl Scripted {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply,
        })
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VerifyDelegate for Scripted {
    type Principal = User;
    type Info = Info;
    type Error = StoreDown;

    async fn verify(&self, identity: &str, token: &str) -> Reply {
        self.calls
            .lock()
            .unwrap()
            .push((identity.to_owned(), token.to_owned()));
        // behave like a store lookup that suspends before answering
        tokio::task::yield_now().await;
        self.reply.clone()
    }
}

fn alice() -> User {
    User {
        id: 1,
        name: "alice".to_string(),
    }
}

fn cookies(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

async fn run(
    delegate: &Arc<Scripted>,
    source: &HashMap<String, String>,
    options: &AuthenticateOptions,
) -> Outcome<User, Info, StoreDown> {
    let strategy = TokenStrategy::from_shared(Arc::clone(delegate));
    strategy.authenticate(source, options, Collect).await
}

fn bad_request(message: &str) -> Outcome<User, Info, StoreDown> {
    Outcome::Failure(Failure::BadRequest(BadRequestError::new(message)))
}

#[tokio::test]
async fn no_credentials_fail_with_default_message() {
    let delegate = Scripted::new(Verification::accepted(alice()));

    let outcome = run(&delegate, &cookies(&[]), &AuthenticateOptions::default()).await;

    assert_eq!(outcome, bad_request("Missing credentials"));
    assert!(delegate.calls().is_empty());
}

#[tokio::test]
async fn partial_or_empty_credentials_never_reach_the_delegate() {
    let delegate = Scripted::new(Verification::accepted(alice()));
    let cases = [
        cookies(&[("username", "alice")]),
        cookies(&[("token", "t1")]),
        cookies(&[("username", ""), ("token", "t1")]),
        cookies(&[("username", "alice"), ("token", "")]),
    ];

    for source in &cases {
        let outcome = run(&delegate, source, &AuthenticateOptions::default()).await;
        assert_eq!(outcome, bad_request("Missing credentials"), "{source:?}");
    }
    assert!(delegate.calls().is_empty());
}

#[tokio::test]
async fn bad_request_message_can_be_overridden() {
    let delegate = Scripted::new(Verification::rejected());
    let options = AuthenticateOptions::with_bad_request_message("Please sign in");

    let outcome = run(&delegate, &cookies(&[("username", "alice")]), &options).await;

    assert_eq!(outcome, bad_request("Please sign in"));
}

#[tokio::test]
async fn present_credentials_reach_the_delegate_once_and_unchanged() {
    let delegate = Scripted::new(Verification::rejected());
    let source = cookies(&[("username", "alice"), ("token", " t1=x ")]);

    run(&delegate, &source, &AuthenticateOptions::default()).await;

    assert_eq!(
        delegate.calls(),
        vec![("alice".to_string(), " t1=x ".to_string())]
    );
}

#[tokio::test]
async fn rejection_fails_with_the_delegate_info() {
    let source = cookies(&[("username", "alice"), ("token", "t1")]);

    let delegate = Scripted::new(Verification::Rejected(None));
    let outcome = run(&delegate, &source, &AuthenticateOptions::default()).await;
    assert_eq!(outcome, Outcome::Failure(Failure::Rejected(None)));

    let delegate = Scripted::new(Verification::Rejected(Some(Info("wrong token"))));
    let outcome = run(&delegate, &source, &AuthenticateOptions::default()).await;
    assert_eq!(
        outcome,
        Outcome::Failure(Failure::Rejected(Some(Info("wrong token"))))
    );
}

#[tokio::test]
async fn acceptance_succeeds_with_principal_and_info() {
    let source = cookies(&[("username", "alice"), ("token", "t1")]);

    let delegate = Scripted::new(Verification::accepted(alice()));
    let outcome = run(&delegate, &source, &AuthenticateOptions::default()).await;
    assert_eq!(
        outcome,
        Outcome::Success {
            principal: alice(),
            info: None,
        }
    );

    let delegate = Scripted::new(Verification::Accepted(alice(), Some(Info("fresh"))));
    let outcome = run(&delegate, &source, &AuthenticateOptions::default()).await;
    assert_eq!(
        outcome,
        Outcome::Success {
            principal: alice(),
            info: Some(Info("fresh")),
        }
    );
}

#[tokio::test]
async fn delegate_error_is_passed_through_even_with_a_principal() {
    let source = cookies(&[("username", "alice"), ("token", "t1")]);
    let reply = Verification::from_parts(Some(StoreDown), Some(alice()), Some(Info("ignored")));

    let delegate = Scripted::new(reply);
    let outcome = run(&delegate, &source, &AuthenticateOptions::default()).await;

    assert_eq!(outcome, Outcome::Error(StoreDown));
}

#[tokio::test]
async fn closure_delegate_with_callback_style_parts() {
    let strategy = TokenStrategy::new(verify_fn(|identity: String, token: String| async move {
        let user = (identity == "alice" && token == "t1").then(alice);
        Verification::<User, Info, StoreDown>::from_parts(None, user, None)
    }));

    let ok = cookies(&[("username", "alice"), ("token", "t1")]);
    let wrong = cookies(&[("username", "alice"), ("token", "t2")]);
    let options = AuthenticateOptions::default();

    assert_eq!(
        strategy.authenticate(&ok, &options, Collect).await.kind(),
        "success"
    );
    assert_eq!(
        strategy.authenticate(&wrong, &options, Collect).await,
        Outcome::Failure(Failure::Rejected(None))
    );
}

#[test]
fn construction_without_delegate_fails_before_any_request() {
    let result = TokenStrategy::<Scripted>::builder().build();
    assert_eq!(result.unwrap_err(), StrategyError::MissingVerify);
}

/// Host-side sink that counts signals; used to check exactly-once emission.
#[derive(Default)]
struct Tally {
    success: usize,
    fail: usize,
    error: usize,
}

impl OutcomeSink<User, Info, StoreDown> for &mut Tally {
    type Output = ();

    fn success(self, _: User, _: Option<Info>) {
        self.success += 1;
    }

    fn fail(self, _: Failure<Info>) {
        self.fail += 1;
    }

    fn error(self, _: StoreDown) {
        self.error += 1;
    }
}

#[tokio::test]
async fn each_attempt_emits_exactly_one_signal() {
    let source = cookies(&[("username", "alice"), ("token", "t1")]);
    let options = AuthenticateOptions::default();
    let replies = [
        Verification::accepted(alice()),
        Verification::rejected(),
        Verification::Error(StoreDown),
    ];

    let mut tally = Tally::default();
    for reply in replies {
        let strategy = TokenStrategy::from_shared(Scripted::new(reply));
        strategy.authenticate(&source, &options, &mut tally).await;
    }
    TokenStrategy::from_shared(Scripted::new(Verification::rejected()))
        .authenticate(&cookies(&[]), &options, &mut tally)
        .await;

    assert_eq!((tally.success, tally.fail, tally.error), (1, 2, 1));
}

#[tokio::test]
async fn one_strategy_serves_concurrent_requests() {
    let strategy = Arc::new(TokenStrategy::new(verify_fn(
        |identity: String, token: String| async move {
            tokio::task::yield_now().await;
            if token == format!("{identity}-token") {
                Verification::<String, (), StoreDown>::accepted(identity)
            } else {
                Verification::rejected()
            }
        },
    )));

    let handles = (0..16)
        .map(|i| {
            let strategy = Arc::clone(&strategy);
            tokio::spawn(async move {
                let identity = format!("user{i}");
                // odd requests carry a wrong token
                let token = if i % 2 == 0 {
                    format!("{identity}-token")
                } else {
                    "nope".to_string()
                };
                let source = cookies(&[
                    ("username", identity.as_str()),
                    ("token", token.as_str()),
                ]);
                let outcome = strategy
                    .authenticate(&source, &AuthenticateOptions::default(), Collect)
                    .await;
                (identity, i, outcome)
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let (identity, i, outcome) = handle.await.unwrap();
        if i % 2 == 0 {
            assert_eq!(
                outcome,
                Outcome::Success {
                    principal: identity,
                    info: None,
                }
            );
        } else {
            assert_eq!(outcome, Outcome::Failure(Failure::Rejected(None)));
        }
    }
}
