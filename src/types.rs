//! Shared primitive IDs and competition-related enums.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Stable registrant identifier of a person.
pub type RegistrantId = u32;
/// One-based round number within an event.
pub type RoundNumber = u32;
/// One-based competition rank (ties share a rank).
pub type Rank = u32;
/// Signed attempt encoding: positive score, `0` skipped, `-1` DNF, `-2` DNS.
pub type AttemptValue = i64;

/// Round format, serialized with the one-character WCIF id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// Best of 1.
    #[serde(rename = "1")]
    BestOf1,
    /// Best of 2.
    #[serde(rename = "2")]
    BestOf2,
    /// Best of 3.
    #[serde(rename = "3")]
    BestOf3,
    /// Average of 5, dropping the best and worst attempt.
    #[serde(rename = "a")]
    AverageOf5,
    /// Mean of 3, no trimming.
    #[serde(rename = "m")]
    MeanOf3,
}

/// Which score a format ranks by first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortBy {
    /// Rank by best single attempt only.
    Best,
    /// Rank by average, then best.
    Average,
}

/// Trimmed-mean rule for averaging formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AverageRule {
    /// Number of attempts the average is computed over.
    pub attempts: usize,
    /// Attempts dropped from each end before taking the mean.
    pub trim: usize,
}

impl Format {
    /// All supported formats.
    pub const ALL: [Format; 5] = [
        Format::BestOf1,
        Format::BestOf2,
        Format::BestOf3,
        Format::AverageOf5,
        Format::MeanOf3,
    ];

    /// Number of attempts a competitor may take in this format.
    pub fn solve_count(self) -> usize {
        match self {
            Format::BestOf1 => 1,
            Format::BestOf2 => 2,
            Format::BestOf3 => 3,
            Format::AverageOf5 => 5,
            Format::MeanOf3 => 3,
        }
    }

    /// Primary ranking criterion.
    pub fn sort_by(self) -> SortBy {
        match self.average_rule() {
            Some(_) => SortBy::Average,
            None => SortBy::Best,
        }
    }

    /// Averaging rule, if this format computes an average.
    pub fn average_rule(self) -> Option<AverageRule> {
        match self {
            Format::BestOf1 | Format::BestOf2 | Format::BestOf3 => None,
            Format::AverageOf5 => Some(AverageRule { attempts: 5, trim: 1 }),
            Format::MeanOf3 => Some(AverageRule { attempts: 3, trim: 0 }),
        }
    }

    /// One-character document id.
    pub fn id(self) -> char {
        match self {
            Format::BestOf1 => '1',
            Format::BestOf2 => '2',
            Format::BestOf3 => '3',
            Format::AverageOf5 => 'a',
            Format::MeanOf3 => 'm',
        }
    }

    /// Looks a format up by its one-character id.
    pub fn from_id(id: char) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    /// Human-facing name.
    pub fn name(self) -> &'static str {
        match self {
            Format::BestOf1 => "Best of 1",
            Format::BestOf2 => "Best of 2",
            Format::BestOf3 => "Best of 3",
            Format::AverageOf5 => "Average of 5",
            Format::MeanOf3 => "Mean of 3",
        }
    }

    /// Compact name for badges.
    pub fn short_name(self) -> &'static str {
        match self {
            Format::BestOf1 => "Bo1",
            Format::BestOf2 => "Bo2",
            Format::BestOf3 => "Bo3",
            Format::AverageOf5 => "Ao5",
            Format::MeanOf3 => "Mo3",
        }
    }
}

/// Comparison direction for completed attempt values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Smaller values are better (times, move counts).
    #[default]
    LowerIsBetter,
    /// Larger values are better (points).
    HigherIsBetter,
}

impl Direction {
    /// Orders two completed values so that the better one is `Less`.
    pub fn compare(self, a: AttemptValue, b: AttemptValue) -> Ordering {
        match self {
            Direction::LowerIsBetter => a.cmp(&b),
            Direction::HigherIsBetter => b.cmp(&a),
        }
    }

    /// True when `a` is strictly better than `b`.
    pub fn is_better(self, a: AttemptValue, b: AttemptValue) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// How an attempt equal to the cutoff value is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CutoffBoundary {
    /// The attempt must be strictly better than the cutoff.
    #[default]
    Strict,
    /// Meeting the cutoff exactly also passes.
    Inclusive,
}
