use serde::Serialize;

use crate::{
    attempt::{entitled_attempts, taken_count},
    types::{CutoffBoundary, Direction},
    wcif::Round,
};

/// Derived lifecycle state of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundState {
    /// No results yet.
    NotStarted,
    /// Results exist and someone still has attempts to take.
    Active,
    /// Every competitor has taken every attempt they are entitled to.
    Finished,
}

impl RoundState {
    /// True once the round has results.
    pub fn is_open(self) -> bool {
        self != RoundState::NotStarted
    }

    /// True while attempts are outstanding.
    pub fn is_active(self) -> bool {
        self == RoundState::Active
    }

    /// True when no attempts are outstanding.
    pub fn is_finished(self) -> bool {
        self == RoundState::Finished
    }

    /// Status badge text.
    pub fn badge(self) -> Option<&'static str> {
        match self {
            RoundState::NotStarted => None,
            RoundState::Active => Some("Live"),
            RoundState::Finished => Some("Done"),
        }
    }
}

/// Derives the state of `round` from its current results.
///
/// When the round carries no expected competitor count, `Finished` only means
/// every present result is complete.
pub fn round_state(round: &Round, direction: Direction, boundary: CutoffBoundary) -> RoundState {
    if round.results.is_empty() {
        return RoundState::NotStarted;
    }

    let missing_competitors = round
        .expected_count()
        .is_some_and(|expected| round.results.len() < expected);
    if missing_competitors {
        return RoundState::Active;
    }

    let mid_attempt = round.results.iter().any(|result| {
        let entitled = entitled_attempts(
            &result.attempts,
            round.format,
            round.cutoff.as_ref(),
            direction,
            boundary,
        );
        taken_count(&result.attempts) < entitled
    });

    if mid_attempt {
        RoundState::Active
    } else {
        RoundState::Finished
    }
}
