//! Outcome sink: the three terminal signals of an authentication attempt.
//!
//! The sink is taken by value, so a strategy can emit at most one signal per
//! attempt; `authenticate` returns whatever the chosen signal returns.

use super::Failure;

/// Receives the verdict of one authentication attempt.
pub trait OutcomeSink<P, I, E> {
    type Output;

    fn success(self, principal: P, info: Option<I>) -> Self::Output;

    fn fail(self, failure: Failure<I>) -> Self::Output;

    fn error(self, cause: E) -> Self::Output;
}

/// Signal emitted by a strategy, as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<P, I, E> {
    Success { principal: P, info: Option<I> },
    Failure(Failure<I>),
    Error(E),
}

impl<P, I, E> Outcome<P, I, E> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Failure(_) => "fail",
            Self::Error(_) => "error",
        }
    }

    /// Replay this outcome into another sink.
    pub fn emit<S>(self, sink: S) -> S::Output
    where
        S: OutcomeSink<P, I, E>,
    {
        match self {
            Self::Success { principal, info } => sink.success(principal, info),
            Self::Failure(failure) => sink.fail(failure),
            Self::Error(cause) => sink.error(cause),
        }
    }
}

/// Sink that hands the signal back as an [`Outcome`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Collect;

impl<P, I, E> OutcomeSink<P, I, E> for Collect {
    type Output = Outcome<P, I, E>;

    fn success(self, principal: P, info: Option<I>) -> Self::Output {
        Outcome::Success { principal, info }
    }

    fn fail(self, failure: Failure<I>) -> Self::Output {
        Outcome::Failure(failure)
    }

    fn error(self, cause: E) -> Self::Output {
        Outcome::Error(cause)
    }
}
