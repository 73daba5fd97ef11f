//! Attempt encoding and per-result score reduction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
    types::{AttemptValue, CutoffBoundary, Direction, Format},
    wcif::Cutoff,
};

/// Encoded value of an attempt that was not taken.
pub const SKIPPED: AttemptValue = 0;
/// Encoded value of a did-not-finish attempt.
pub const DNF: AttemptValue = -1;
/// Encoded value of a did-not-start attempt.
pub const DNS: AttemptValue = -2;

/// Attempt list inconsistent with the declared format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttemptsError {
    /// More attempts than the format allows.
    #[error("{format:?} allows {expected} attempts, got {actual}")]
    TooManyAttempts {
        /// Declared format.
        format: Format,
        /// Maximum attempt count.
        expected: usize,
        /// Supplied attempt count.
        actual: usize,
    },
    /// Value outside the signed encoding.
    #[error("attempt {index} has invalid value {value}")]
    InvalidValue {
        /// Zero-based attempt index.
        index: usize,
        /// Offending value.
        value: AttemptValue,
    },
    /// Taken attempt following a skipped slot.
    #[error("attempt {index} was taken after a skipped attempt")]
    Gap {
        /// Zero-based index of the taken attempt.
        index: usize,
    },
}

/// Decoded attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attempt {
    /// Completed attempt with a positive score.
    Completed(AttemptValue),
    /// Not taken (yet, or because of a cutoff).
    Skipped,
    /// Did not finish.
    Dnf,
    /// Did not start.
    Dns,
}

impl Attempt {
    /// Decodes a raw value, returning `None` for values below the DNS sentinel.
    pub fn from_value(value: AttemptValue) -> Option<Self> {
        match value {
            v if v > 0 => Some(Attempt::Completed(v)),
            SKIPPED => Some(Attempt::Skipped),
            DNF => Some(Attempt::Dnf),
            DNS => Some(Attempt::Dns),
            _ => None,
        }
    }

    /// Encodes back to the raw value.
    pub fn value(self) -> AttemptValue {
        match self {
            Attempt::Completed(v) => v,
            Attempt::Skipped => SKIPPED,
            Attempt::Dnf => DNF,
            Attempt::Dns => DNS,
        }
    }

    /// True for a completed attempt.
    pub fn is_completed(self) -> bool {
        matches!(self, Attempt::Completed(_))
    }

    /// True for anything but a skipped slot.
    pub fn is_taken(self) -> bool {
        self != Attempt::Skipped
    }
}

/// Best single and format average of one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    /// Best completed attempt.
    pub best: Option<AttemptValue>,
    /// Format average, when defined.
    pub average: Option<AttemptValue>,
}

impl Score {
    /// True when neither best nor average is set.
    pub fn is_empty(&self) -> bool {
        self.best.is_none() && self.average.is_none()
    }
}

/// Validates and decodes a result's attempts against `format`.
pub fn parse_attempts(values: &[AttemptValue], format: Format) -> Result<Vec<Attempt>, AttemptsError> {
    if values.len() > format.solve_count() {
        return Err(AttemptsError::TooManyAttempts {
            format,
            expected: format.solve_count(),
            actual: values.len(),
        });
    }

    let mut attempts = Vec::with_capacity(values.len());
    let mut seen_skip = false;
    for (index, &value) in values.iter().enumerate() {
        let attempt = Attempt::from_value(value).ok_or(AttemptsError::InvalidValue { index, value })?;
        if attempt.is_taken() && seen_skip {
            return Err(AttemptsError::Gap { index });
        }
        seen_skip |= !attempt.is_taken();
        attempts.push(attempt);
    }
    Ok(attempts)
}

/// Number of attempts taken, counting DNF/DNS.
pub fn taken_count(values: &[AttemptValue]) -> usize {
    values.iter().filter(|&&v| v != SKIPPED).count()
}

/// Reduces attempts to best and average under `format`.
pub fn reduce(values: &[AttemptValue], format: Format, direction: Direction) -> Result<Score, AttemptsError> {
    let attempts = parse_attempts(values, format)?;

    let mut completed: Vec<AttemptValue> = attempts
        .iter()
        .filter_map(|a| match a {
            Attempt::Completed(v) => Some(*v),
            _ => None,
        })
        .collect();
    completed.sort_by(|a, b| direction.compare(*a, *b));

    Ok(Score {
        best: completed.first().copied(),
        average: average_of(&attempts, &completed, format),
    })
}

// `completed` must be sorted best-first.
fn average_of(attempts: &[Attempt], completed: &[AttemptValue], format: Format) -> Option<AttemptValue> {
    let rule = format.average_rule()?;
    let taken = attempts.iter().filter(|a| a.is_taken()).count();
    if taken < rule.attempts {
        return None;
    }

    let incomplete = taken - completed.len();
    if incomplete > rule.trim {
        return None;
    }

    // Incomplete attempts occupy the worst trimmed slots first.
    let counted = &completed[rule.trim..completed.len() - (rule.trim - incomplete)];
    rounded_mean(counted)
}

// Accumulates in i128; `None` when empty or the mean does not fit.
fn rounded_mean(values: &[AttemptValue]) -> Option<AttemptValue> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as i128;
    let sum: i128 = values.iter().map(|&v| i128::from(v)).sum();
    AttemptValue::try_from((2 * sum + n) / (2 * n)).ok()
}

/// True when one of the first `cutoff.number_of_attempts` attempts passes the cutoff.
pub fn meets_cutoff(
    values: &[AttemptValue],
    cutoff: &Cutoff,
    direction: Direction,
    boundary: CutoffBoundary,
) -> bool {
    values
        .iter()
        .take(cutoff.number_of_attempts)
        .filter(|&&v| v > 0)
        .any(|&v| match (direction.compare(v, cutoff.attempt_result), boundary) {
            (Ordering::Less, _) => true,
            (Ordering::Equal, CutoffBoundary::Inclusive) => true,
            _ => false,
        })
}

/// Attempts a competitor is entitled to given their progress against the cutoff.
pub fn entitled_attempts(
    values: &[AttemptValue],
    format: Format,
    cutoff: Option<&Cutoff>,
    direction: Direction,
    boundary: CutoffBoundary,
) -> usize {
    let Some(cutoff) = cutoff else {
        return format.solve_count();
    };
    let limit = cutoff.number_of_attempts.min(format.solve_count());
    let decided = values.iter().take(limit).filter(|&&v| v != SKIPPED).count() == limit;
    if decided && !meets_cutoff(values, cutoff, direction, boundary) {
        limit
    } else {
        format.solve_count()
    }
}
