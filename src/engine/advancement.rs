use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    types::{AttemptValue, Direction, Rank, RegistrantId, SortBy},
    wcif::{AdvancementConditionSpec, Round},
};

use super::{config::EngineConfig, ranking::Ranking};

/// Advancement condition the evaluator cannot apply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvancementError {
    /// Unrecognized condition type.
    #[error("unknown advancement condition type `{0}`")]
    UnknownCondition(String),
}

/// Recognized advancement rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdvancementCondition {
    /// Top `level` ranks advance.
    Ranking(i64),
    /// Top `level` percent of the roster advance.
    Percent(i64),
    /// Results strictly better than `level` advance.
    AttemptResult(AttemptValue),
}

impl TryFrom<&AdvancementConditionSpec> for AdvancementCondition {
    type Error = AdvancementError;

    fn try_from(spec: &AdvancementConditionSpec) -> Result<Self, Self::Error> {
        match spec.kind.as_str() {
            "ranking" => Ok(AdvancementCondition::Ranking(spec.level)),
            "percent" => Ok(AdvancementCondition::Percent(spec.level)),
            "attemptResult" => Ok(AdvancementCondition::AttemptResult(spec.level)),
            other => Err(AdvancementError::UnknownCondition(other.to_string())),
        }
    }
}

/// Outcome of evaluating a round's advancement condition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Advancement {
    /// Advancing registrants in rank order.
    pub advancing: Vec<RegistrantId>,
    /// Set when the condition could not be evaluated; `advancing` is then empty.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_error")]
    pub error: Option<AdvancementError>,
}

fn serialize_error<S: serde::Serializer>(
    err: &Option<AdvancementError>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match err {
        Some(err) => s.collect_str(err),
        None => s.serialize_none(),
    }
}

impl Advancement {
    /// True when `person_id` advances.
    pub fn contains(&self, person_id: RegistrantId) -> bool {
        self.advancing.contains(&person_id)
    }
}

/// Ranked registrants with rank at most `n`; ties at `n` all advance.
pub fn advancing_by_rank(ranking: &Ranking, n: i64) -> Vec<RegistrantId> {
    if n <= 0 {
        return Vec::new();
    }
    ranking
        .ranked()
        .filter(|r| r.ranking.is_some_and(|rank| i64::from(rank) <= n))
        .map(|r| r.person_id)
        .collect()
}

/// Number of spots a percent condition yields for a roster of `count`.
pub fn percent_spots(count: usize, percent: i64) -> i64 {
    if percent <= 0 {
        return 0;
    }
    (count as i64).saturating_mul(percent) / 100
}

/// Evaluates `round`'s advancement condition over its current `ranking`.
///
/// Works on partial results too, giving the live "currently advancing" set.
pub fn advancing(round: &Round, ranking: &Ranking, config: &EngineConfig) -> Advancement {
    let Some(spec) = round.advancement_condition.as_ref() else {
        return Advancement::default();
    };

    let condition = match AdvancementCondition::try_from(spec) {
        Ok(condition) => condition,
        Err(error) => {
            warn!(round = %round.id, %error, "advancement not evaluated");
            return Advancement {
                advancing: Vec::new(),
                error: Some(error),
            };
        }
    };

    let direction = config.direction_for(&round.id.event_id);
    let mut advancing = match condition {
        AdvancementCondition::Ranking(n) => advancing_by_rank(ranking, n),
        AdvancementCondition::Percent(p) => {
            let count = round.expected_count().unwrap_or(round.results.len());
            advancing_by_rank(ranking, percent_spots(count, p))
        }
        AdvancementCondition::AttemptResult(level) => {
            by_attempt_result(ranking, round.format.sort_by(), direction, level)
        }
    };

    if let Some(max_percent) = config.max_advancing_percent {
        let cap = percent_spots(ranking.len(), i64::from(max_percent));
        advancing.retain(|id| {
            ranking
                .get(*id)
                .and_then(|r| r.ranking)
                .is_some_and(|rank: Rank| i64::from(rank) <= cap)
        });
    }

    debug!(round = %round.id, count = advancing.len(), "evaluated advancement");
    Advancement {
        advancing,
        error: None,
    }
}

fn by_attempt_result(
    ranking: &Ranking,
    sort_by: SortBy,
    direction: Direction,
    level: AttemptValue,
) -> Vec<RegistrantId> {
    ranking
        .ranked()
        .filter(|r| {
            let value = match sort_by {
                SortBy::Best => r.best,
                SortBy::Average => r.average,
            };
            value.is_some_and(|v| direction.is_better(v, level))
        })
        .map(|r| r.person_id)
        .collect()
}
