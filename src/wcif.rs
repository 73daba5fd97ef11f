//! Competition document records: events, rounds, results and persons.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{AttemptValue, Format, Rank, RegistrantId, RoundNumber};

/// Root of a competition document snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionDocument {
    /// Competition identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Registered persons.
    #[serde(default)]
    pub persons: Vec<Person>,
    /// Events in schedule order.
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Registration state of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Accepted to compete.
    Accepted,
    /// Awaiting approval.
    Pending,
    /// Withdrawn or removed.
    Deleted,
}

/// Events a person registered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Event ids.
    #[serde(default)]
    pub event_ids: Vec<String>,
    /// Registration status.
    pub status: RegistrationStatus,
}

/// A registered person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Stable registrant id.
    pub registrant_id: RegistrantId,
    /// Full name.
    pub name: String,
    /// Global competitor id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wca_id: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_iso2: String,
    /// Registration, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<Registration>,
}

impl Person {
    /// True when the person has an accepted registration for `event_id`.
    pub fn is_registered_for(&self, event_id: &str) -> bool {
        self.registration.as_ref().is_some_and(|r| {
            r.status == RegistrationStatus::Accepted && r.event_ids.iter().any(|e| e == event_id)
        })
    }
}

/// An event and its rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event code, e.g. `333`.
    pub id: String,
    /// Rounds ordered by round number.
    #[serde(default)]
    pub rounds: Vec<Round>,
}

/// Cutoff limiting attempts for competitors who do not beat it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cutoff {
    /// Attempts allowed to beat the cutoff.
    pub number_of_attempts: usize,
    /// Value to beat.
    pub attempt_result: AttemptValue,
}

/// Advancement condition as declared by the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancementConditionSpec {
    /// Condition kind (`ranking`, `percent`, `attemptResult`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Threshold for the condition.
    pub level: i64,
}

/// One round of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Activity code, e.g. `333-r1`.
    pub id: ActivityCode,
    /// Round format.
    pub format: Format,
    /// Optional cutoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff: Option<Cutoff>,
    /// Optional advancement condition to the next round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advancement_condition: Option<AdvancementConditionSpec>,
    /// Results entered so far.
    #[serde(default)]
    pub results: Vec<ResultRecord>,
    /// Size of the registered roster, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_competitor_count: Option<usize>,
    /// Registrants assigned before the round opened.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roster: Vec<RegistrantId>,
}

impl Round {
    /// Round number from the activity code; `None` for a code without one.
    pub fn number(&self) -> Option<RoundNumber> {
        self.id.round_number
    }

    /// Registrants in the round: result holders first, then assigned roster.
    pub fn roster_ids(&self) -> Vec<RegistrantId> {
        let mut ids: Vec<RegistrantId> = self.results.iter().map(|r| r.person_id).collect();
        for id in &self.roster {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }

    /// Externally supplied expected competitor count.
    pub fn expected_count(&self) -> Option<usize> {
        self.expected_competitor_count
    }
}

/// A person's result in a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    /// Registrant id of the competitor.
    pub person_id: RegistrantId,
    /// Ranking as stored upstream; recomputed by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking: Option<Rank>,
    /// Attempts in the signed encoding.
    #[serde(default, deserialize_with = "deserialize_attempts")]
    pub attempts: Vec<AttemptValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AttemptRepr {
    Plain(AttemptValue),
    Wcif { result: AttemptValue },
}

fn deserialize_attempts<'de, D>(deserializer: D) -> Result<Vec<AttemptValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<AttemptRepr>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|a| match a {
            AttemptRepr::Plain(v) => v,
            AttemptRepr::Wcif { result } => result,
        })
        .collect())
}

/// Malformed activity code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivityCodeError {
    /// Empty event id.
    #[error("activity code `{0}` has no event id")]
    MissingEvent(String),
    /// Unknown or malformed segment.
    #[error("activity code `{code}` has invalid segment `{segment}`")]
    InvalidSegment {
        /// Full code.
        code: String,
        /// Offending segment.
        segment: String,
    },
}

/// Composite activity code `event[-rN][-gN][-aN]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityCode {
    /// Event id.
    pub event_id: String,
    /// Round number.
    pub round_number: Option<RoundNumber>,
    /// Group number.
    pub group: Option<u32>,
    /// Attempt number.
    pub attempt: Option<u32>,
}

impl ActivityCode {
    /// Code for round `round_number` of `event_id`.
    pub fn round(event_id: impl Into<String>, round_number: RoundNumber) -> Self {
        Self {
            event_id: event_id.into(),
            round_number: Some(round_number),
            group: None,
            attempt: None,
        }
    }

    /// Code of the round immediately before this one, if any.
    pub fn previous_round(&self) -> Option<Self> {
        match self.round_number {
            Some(n) if n > 1 => Some(Self::round(self.event_id.clone(), n - 1)),
            _ => None,
        }
    }

    /// This code with group and attempt qualifiers removed.
    pub fn round_code(&self) -> Self {
        Self {
            group: None,
            attempt: None,
            ..self.clone()
        }
    }
}

impl FromStr for ActivityCode {
    type Err = ActivityCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let event_id = parts.next().unwrap_or_default();
        if event_id.is_empty() {
            return Err(ActivityCodeError::MissingEvent(s.to_string()));
        }

        let mut code = ActivityCode {
            event_id: event_id.to_string(),
            round_number: None,
            group: None,
            attempt: None,
        };

        for segment in parts {
            let invalid = || ActivityCodeError::InvalidSegment {
                code: s.to_string(),
                segment: segment.to_string(),
            };
            let (tag, num) = segment.split_at_checked(1).ok_or_else(invalid)?;
            let num: u32 = num.parse().map_err(|_| invalid())?;
            let slot = match tag {
                "r" => &mut code.round_number,
                "g" => &mut code.group,
                "a" => &mut code.attempt,
                _ => return Err(invalid()),
            };
            if slot.replace(num).is_some() {
                return Err(invalid());
            }
        }

        Ok(code)
    }
}

impl fmt::Display for ActivityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.event_id)?;
        if let Some(r) = self.round_number {
            write!(f, "-r{r}")?;
        }
        if let Some(g) = self.group {
            write!(f, "-g{g}")?;
        }
        if let Some(a) = self.attempt {
            write!(f, "-a{a}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for ActivityCode {
    type Error = ActivityCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ActivityCode> for String {
    fn from(value: ActivityCode) -> Self {
        value.to_string()
    }
}
