use std::cmp::Ordering;

use serde::Serialize;
use tracing::warn;

use crate::{
    attempt::{reduce, AttemptsError, Score},
    types::{AttemptValue, Direction, Format, Rank, RegistrantId, SortBy},
    wcif::ResultRecord,
};

/// A result with its derived score and assigned rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    /// Competitor.
    pub person_id: RegistrantId,
    /// Attempts as entered.
    pub attempts: Vec<AttemptValue>,
    /// Best completed attempt.
    pub best: Option<AttemptValue>,
    /// Format average.
    pub average: Option<AttemptValue>,
    /// Competition rank; `None` when nothing was completed.
    pub ranking: Option<Rank>,
}

impl RankedResult {
    /// Derived score pair.
    pub fn score(&self) -> Score {
        Score {
            best: self.best,
            average: self.average,
        }
    }
}

/// A result excluded from ranking because its attempts are malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedResult {
    /// Competitor.
    pub person_id: RegistrantId,
    /// Why the attempts were rejected.
    #[serde(serialize_with = "serialize_display")]
    pub error: AttemptsError,
}

fn serialize_display<S: serde::Serializer>(err: &AttemptsError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(err)
}

/// Ordered, ranked results of one round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Ranking {
    /// Results in rank order; unranked results last in submission order.
    pub results: Vec<RankedResult>,
    /// Results excluded for malformed attempts.
    pub rejected: Vec<RejectedResult>,
}

impl Ranking {
    /// Result of `person_id`, if ranked or unranked (not rejected).
    pub fn get(&self, person_id: RegistrantId) -> Option<&RankedResult> {
        self.results.iter().find(|r| r.person_id == person_id)
    }

    /// Zero-based position of `person_id` in the ordering.
    pub fn position(&self, person_id: RegistrantId) -> Option<usize> {
        self.results.iter().position(|r| r.person_id == person_id)
    }

    /// Results that received a rank.
    pub fn ranked(&self) -> impl Iterator<Item = &RankedResult> {
        self.results.iter().filter(|r| r.ranking.is_some())
    }

    /// Number of results in the ordering.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when nothing was ranked or left unranked.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Compares two scores under `sort_by`; better is `Less`, missing values sort last.
pub fn compare_scores(a: &Score, b: &Score, sort_by: SortBy, direction: Direction) -> Ordering {
    match sort_by {
        SortBy::Best => compare_value(a.best, b.best, direction),
        SortBy::Average => compare_value(a.average, b.average, direction)
            .then_with(|| compare_value(a.best, b.best, direction)),
    }
}

fn compare_value(a: Option<AttemptValue>, b: Option<AttemptValue>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.compare(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Ranks `results` under `format`, using standard competition ranking (1, 2, 2, 4).
pub fn rank(results: &[ResultRecord], format: Format, direction: Direction) -> Ranking {
    let sort_by = format.sort_by();
    let mut ranking = Ranking::default();

    for record in results {
        match reduce(&record.attempts, format, direction) {
            Ok(score) => ranking.results.push(RankedResult {
                person_id: record.person_id,
                attempts: record.attempts.clone(),
                best: score.best,
                average: score.average,
                ranking: None,
            }),
            Err(error) => {
                warn!(person_id = record.person_id, %error, "excluding result from ranking");
                ranking.rejected.push(RejectedResult {
                    person_id: record.person_id,
                    error,
                });
            }
        }
    }

    // Stable sort keeps submission order among equal and unranked results.
    ranking
        .results
        .sort_by(|a, b| compare_scores(&a.score(), &b.score(), sort_by, direction));

    let mut prev: Option<(Score, Rank)> = None;
    for (pos, result) in ranking.results.iter_mut().enumerate() {
        let score = result.score();
        if score.is_empty() {
            continue;
        }
        let rank = match prev {
            Some((prev_score, prev_rank))
                if compare_scores(&prev_score, &score, sort_by, direction) == Ordering::Equal =>
            {
                prev_rank
            }
            _ => pos as Rank + 1,
        };
        result.ranking = Some(rank);
        prev = Some((score, rank));
    }

    ranking
}
