//! Cookie-backed token authentication strategy.
//!
//! A [`TokenStrategy`](strategy::TokenStrategy) reads an identity and a token
//! from the request, hands them to an application supplied
//! [`VerifyDelegate`](strategy::VerifyDelegate) and reports exactly one of
//! success / fail / error to the host through an
//! [`OutcomeSink`](strategy::OutcomeSink).
pub mod strategy;

pub use strategy::{
    AuthenticateOptions, Strategy, StrategyError, TokenStrategy, Verification, VerifyDelegate,
};
