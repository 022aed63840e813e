//! Domain-level error type used across the engine, the step environment
//! and the table runner.
//!
//! Two families exist. `Validation` errors reject a caller's action and are
//! always recoverable: the engine checks everything before it mutates, so
//! the same seat can simply be asked again. `Invariant` errors mean the
//! engine's own bookkeeping is broken (card accounting, trick counts) and
//! must abort the round.

use thiserror::Error;

/// Reasons an action can be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Bid is neither a pass nor a rung of the bid ladder.
    InvalidBid,
    /// Bid does not exceed the current high bid.
    BidTooLow,
    MustFollowSuit,
    CardNotInHand,
    OutOfTurn,
    PhaseMismatch,
    /// Widow discard that is not exactly four distinct held cards.
    InvalidDiscard,
    /// Trump requested in a mode without trump, or a missing trump.
    InvalidTrump,
    /// Flat action id outside the action space or meaningless in this phase.
    InvalidActionId,
    ParseCard,
    /// The match already reached its target; reset before stepping again.
    MatchOver,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Rejected action; engine state is unchanged.
    #[error("invalid action {0:?}: {1}")]
    Validation(ValidationKind, String),
    /// Engine bookkeeping is inconsistent.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    /// Kind of a validation failure, `None` for invariant violations.
    pub fn kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            DomainError::Invariant(_) => None,
        }
    }

    /// True when the caller may retry with a different action.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DomainError::Validation(..))
    }
}
