//! Presentation-facing views assembled from the engine derivations.
//!
//! Every function here is a pure read over a [`Competition`] snapshot. A round
//! whose advancement cannot be evaluated still gets a view, with the error
//! reported on that round only.

use serde::Serialize;
use tracing::warn;

use crate::{
    core::competition::{Competition, LookupError},
    engine::{
        advancement::{advancing, Advancement, AdvancementCondition},
        config::EngineConfig,
        lifecycle::{round_state, RoundState},
        naming::{round_label, round_name},
        ranking::{rank, Ranking, RejectedResult},
        reconcile::{missing_qualifying, next_qualifying, MissingQualifying},
    },
    types::{AttemptValue, Format, Rank, RegistrantId, RoundNumber},
    wcif::{ActivityCode, Person, Round},
};

/// Ranking and advancement of one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundEvaluation {
    /// Ranked results.
    pub ranking: Ranking,
    /// Advancement over the ranking.
    pub advancement: Advancement,
}

/// Ranks `round` and evaluates its advancement condition.
pub fn evaluate_round(round: &Round, config: &EngineConfig) -> RoundEvaluation {
    let direction = config.direction_for(&round.id.event_id);
    let ranking = rank(&round.results, round.format, direction);
    let advancement = advancing(round, &ranking, config);
    RoundEvaluation {
        ranking,
        advancement,
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    /// Competitor.
    pub person_id: RegistrantId,
    /// Competitor name, when the person is known.
    pub person_name: Option<String>,
    /// Competitor country, when the person is known.
    pub country_iso2: Option<String>,
    /// Attempts as entered.
    pub attempts: Vec<AttemptValue>,
    /// Best completed attempt.
    pub best: Option<AttemptValue>,
    /// Format average.
    pub average: Option<AttemptValue>,
    /// Rank, `None` until something is completed.
    pub ranking: Option<Rank>,
    /// Whether the result currently advances.
    pub advancing: bool,
}

/// Full view of one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    /// Activity code.
    pub id: ActivityCode,
    /// Round number.
    pub number: RoundNumber,
    /// Display name.
    pub name: String,
    /// Compact label.
    pub label: String,
    /// Round format.
    pub format: Format,
    /// Format name, e.g. "Average of 5".
    pub format_name: &'static str,
    /// Compact format name, e.g. "Ao5".
    pub format_short_name: &'static str,
    /// Lifecycle state.
    pub state: RoundState,
    /// Live/Done badge.
    pub badge: Option<&'static str>,
    /// Leaderboard rows in rank order.
    pub results: Vec<ResultView>,
    /// Results excluded for malformed attempts.
    pub rejected: Vec<RejectedResult>,
    /// Advancement error message, if the condition was not evaluated.
    pub advancement_error: Option<String>,
}

/// Navigation entry for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    /// Activity code.
    pub id: ActivityCode,
    /// Display name.
    pub name: String,
    /// Compact label.
    pub label: String,
    /// Lifecycle state.
    pub state: RoundState,
    /// Live/Done badge.
    pub badge: Option<&'static str>,
    /// Advancement error message, if any.
    pub advancement_error: Option<String>,
}

/// A person's result in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRoundResult {
    /// Round activity code.
    pub round: ActivityCode,
    /// Round display name.
    pub round_name: String,
    /// Attempts as entered.
    pub attempts: Vec<AttemptValue>,
    /// Best completed attempt.
    pub best: Option<AttemptValue>,
    /// Format average.
    pub average: Option<AttemptValue>,
    /// Rank in the round.
    pub ranking: Option<Rank>,
    /// Whether the result currently advances.
    pub advancing: bool,
}

/// Roster mismatch resolved to persons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingPersons<'a> {
    /// Should be in the roster but are not.
    pub qualifying: Vec<&'a Person>,
    /// In the roster without qualifying.
    pub excess: Vec<&'a Person>,
}

fn condition_error(round: &Round) -> Option<String> {
    round
        .advancement_condition
        .as_ref()
        .and_then(|spec| AdvancementCondition::try_from(spec).err())
        .map(|e| e.to_string())
}

fn state_of(round: &Round, config: &EngineConfig) -> RoundState {
    round_state(
        round,
        config.direction_for(&round.id.event_id),
        config.cutoff_boundary,
    )
}

/// Builds the leaderboard view of the round at `code`.
pub fn round_view(
    competition: &Competition,
    code: &ActivityCode,
    config: &EngineConfig,
) -> Result<RoundView, LookupError> {
    let round = competition.round(code)?;
    let number = round
        .number()
        .ok_or_else(|| LookupError::UnknownRound(code.clone()))?;
    let total = competition.total_rounds(&round.id.event_id)?;
    let RoundEvaluation {
        ranking,
        advancement,
    } = evaluate_round(round, config);
    let state = state_of(round, config);

    let results = ranking
        .results
        .into_iter()
        .map(|r| {
            let person = competition.person(r.person_id).ok();
            ResultView {
                person_id: r.person_id,
                person_name: person.map(|p| p.name.clone()),
                country_iso2: person.map(|p| p.country_iso2.clone()),
                advancing: advancement.contains(r.person_id),
                attempts: r.attempts,
                best: r.best,
                average: r.average,
                ranking: r.ranking,
            }
        })
        .collect();

    Ok(RoundView {
        id: round.id.clone(),
        number,
        name: round_name(number, total, round.cutoff.is_some()),
        label: round_label(number, round.cutoff.is_some()),
        format: round.format,
        format_name: round.format.name(),
        format_short_name: round.format.short_name(),
        state,
        badge: state.badge(),
        results,
        rejected: ranking.rejected,
        advancement_error: advancement.error.map(|e| e.to_string()),
    })
}

/// Summaries of every round of every event, in document order.
pub fn round_summaries(competition: &Competition, config: &EngineConfig) -> Vec<RoundSummary> {
    competition
        .rounds()
        .map(|(event, number, round)| {
            let state = state_of(round, config);
            RoundSummary {
                id: round.id.clone(),
                name: round_name(number, event.rounds.len(), round.cutoff.is_some()),
                label: round_label(number, round.cutoff.is_some()),
                state,
                badge: state.badge(),
                advancement_error: condition_error(round),
            }
        })
        .collect()
}

/// Every round in which `person_id` has taken at least one attempt.
pub fn person_results(
    competition: &Competition,
    person_id: RegistrantId,
    config: &EngineConfig,
) -> Result<Vec<PersonRoundResult>, LookupError> {
    competition.person(person_id)?;

    let mut out = Vec::new();
    for (event, number, round) in competition.rounds() {
        let has_attempts = round
            .results
            .iter()
            .any(|r| r.person_id == person_id && !r.attempts.is_empty());
        if !has_attempts {
            continue;
        }

        let evaluation = evaluate_round(round, config);
        let Some(result) = evaluation.ranking.get(person_id) else {
            // Rejected for malformed attempts; already logged by the ranking.
            continue;
        };
        out.push(PersonRoundResult {
            round: round.id.clone(),
            round_name: round_name(number, event.rounds.len(), round.cutoff.is_some()),
            attempts: result.attempts.clone(),
            best: result.best,
            average: result.average,
            ranking: result.ranking,
            advancing: evaluation.advancement.contains(person_id),
        });
    }
    Ok(out)
}

/// Registrants who would be next to qualify into the round at `code`.
///
/// Looks at the previous round; a first round has no next qualifiers.
pub fn next_qualifying_ids(
    competition: &Competition,
    code: &ActivityCode,
    config: &EngineConfig,
) -> Result<Vec<RegistrantId>, LookupError> {
    let round = competition.round(code)?;
    let Some(previous) = competition.previous_round(code)? else {
        return Ok(Vec::new());
    };

    let evaluation = evaluate_round(previous, config);
    Ok(next_qualifying(
        &evaluation.ranking,
        &evaluation.advancement.advancing,
        &round.roster_ids(),
    ))
}

/// [`next_qualifying_ids`] resolved to persons.
pub fn next_qualifying_to<'a>(
    competition: &'a Competition,
    code: &ActivityCode,
    config: &EngineConfig,
) -> Result<Vec<&'a Person>, LookupError> {
    let ids = next_qualifying_ids(competition, code, config)?;
    Ok(resolve_persons(competition, &ids))
}

/// Compares who should be in the round at `code` against its roster.
///
/// Expected qualifiers come from the previous round's advancement, or from
/// accepted registrations for a first round.
pub fn missing_qualifying_ids(
    competition: &Competition,
    code: &ActivityCode,
    config: &EngineConfig,
) -> Result<MissingQualifying, LookupError> {
    let round = competition.round(code)?;
    let expected: Vec<RegistrantId> = match competition.previous_round(code)? {
        Some(previous) => evaluate_round(previous, config).advancement.advancing,
        None => competition
            .registered_for(&round.id.event_id)
            .into_iter()
            .map(|p| p.registrant_id)
            .collect(),
    };

    let mismatch = missing_qualifying(&expected, &round.roster_ids());
    if !mismatch.is_consistent() {
        warn!(
            round = %round.id,
            missing = mismatch.qualifying.len(),
            excess = mismatch.excess.len(),
            "inconsistent roster"
        );
    }
    Ok(mismatch)
}

/// [`missing_qualifying_ids`] resolved to persons.
pub fn missing_qualifying_for<'a>(
    competition: &'a Competition,
    code: &ActivityCode,
    config: &EngineConfig,
) -> Result<MissingPersons<'a>, LookupError> {
    let ids = missing_qualifying_ids(competition, code, config)?;
    Ok(MissingPersons {
        qualifying: resolve_persons(competition, &ids.qualifying),
        excess: resolve_persons(competition, &ids.excess),
    })
}

fn resolve_persons<'a>(competition: &'a Competition, ids: &[RegistrantId]) -> Vec<&'a Person> {
    ids.iter()
        .filter_map(|&id| match competition.person(id) {
            Ok(person) => Some(person),
            Err(error) => {
                warn!(%error, "skipping unknown registrant");
                None
            }
        })
        .collect()
}
