use hashbrown::HashSet;
use tracing::debug;

use crate::{
    types::{RegistrantId, RoundNumber},
    wcif::{ActivityCode, CompetitionDocument, Event, Person, Round},
};

use super::indices::PosIndex;

/// Structural invariant violated by a competition document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document is not valid JSON for the expected shape.
    #[error("malformed competition document: {0}")]
    Json(#[from] serde_json::Error),
    /// Two persons share a registrant id.
    #[error("duplicate registrant id {0}")]
    DuplicatePerson(RegistrantId),
    /// Two events share an id.
    #[error("duplicate event `{0}`")]
    DuplicateEvent(String),
    /// Round code names another event or lacks a round number.
    #[error("round `{round}` does not belong to event `{event}`")]
    ForeignRound {
        /// Owning event id.
        event: String,
        /// Round activity code.
        round: ActivityCode,
    },
    /// Round numbers are not 1..N in order.
    #[error("event `{event}` expected round {expected}, found `{found}`")]
    NonContiguousRounds {
        /// Event id.
        event: String,
        /// Expected round number at this position.
        expected: RoundNumber,
        /// Code found instead.
        found: ActivityCode,
    },
    /// A registrant appears twice among a round's results.
    #[error("round `{round}` has more than one result for registrant {person_id}")]
    DuplicateResult {
        /// Round activity code.
        round: ActivityCode,
        /// Duplicated registrant.
        person_id: RegistrantId,
    },
}

/// Missing entity on lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No event with this id.
    #[error("unknown event `{0}`")]
    UnknownEvent(String),
    /// No round with this code.
    #[error("unknown round `{0}`")]
    UnknownRound(ActivityCode),
    /// No person with this registrant id.
    #[error("unknown registrant {0}")]
    UnknownPerson(RegistrantId),
}

/// Read-only competition snapshot indexed by stable ids.
#[derive(Debug, Clone)]
pub struct Competition {
    doc: CompetitionDocument,
    event_pos: PosIndex<String>,
    person_pos: PosIndex<RegistrantId>,
}

impl Competition {
    /// Validates `doc` and builds id indices over it.
    pub fn from_document(doc: CompetitionDocument) -> Result<Self, DocumentError> {
        let mut person_pos = PosIndex::new();
        for (idx, person) in doc.persons.iter().enumerate() {
            if person_pos.insert(person.registrant_id, idx).is_some() {
                return Err(DocumentError::DuplicatePerson(person.registrant_id));
            }
        }

        let mut event_pos = PosIndex::new();
        for (idx, event) in doc.events.iter().enumerate() {
            if event_pos.insert(event.id.clone(), idx).is_some() {
                return Err(DocumentError::DuplicateEvent(event.id.clone()));
            }
            validate_rounds(event)?;
        }

        debug!(
            competition = %doc.id,
            events = doc.events.len(),
            persons = doc.persons.len(),
            "loaded competition document"
        );

        Ok(Self {
            doc,
            event_pos,
            person_pos,
        })
    }

    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let doc: CompetitionDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Borrowed underlying document.
    pub fn document(&self) -> &CompetitionDocument {
        &self.doc
    }

    /// Owned copy of the underlying document.
    pub fn export_document(&self) -> CompetitionDocument {
        self.doc.clone()
    }

    /// Competition id.
    pub fn id(&self) -> &str {
        &self.doc.id
    }

    /// Events in document order.
    pub fn events(&self) -> &[Event] {
        &self.doc.events
    }

    /// Persons in document order.
    pub fn persons(&self) -> &[Person] {
        &self.doc.persons
    }

    /// Event by id.
    pub fn event(&self, event_id: &str) -> Result<&Event, LookupError> {
        self.event_pos
            .get(event_id)
            .map(|&idx| &self.doc.events[idx])
            .ok_or_else(|| LookupError::UnknownEvent(event_id.to_string()))
    }

    /// Person by registrant id.
    pub fn person(&self, id: RegistrantId) -> Result<&Person, LookupError> {
        self.person_pos
            .get(&id)
            .map(|&idx| &self.doc.persons[idx])
            .ok_or(LookupError::UnknownPerson(id))
    }

    /// Round by activity code; group and attempt qualifiers are ignored.
    pub fn round(&self, code: &ActivityCode) -> Result<&Round, LookupError> {
        let event = self
            .event(&code.event_id)
            .map_err(|_| LookupError::UnknownRound(code.clone()))?;
        let number = code.round_number.ok_or_else(|| LookupError::UnknownRound(code.clone()))?;

        // Rounds are contiguous from 1, so the number is the position.
        (number as usize)
            .checked_sub(1)
            .and_then(|idx| event.rounds.get(idx))
            .ok_or_else(|| LookupError::UnknownRound(code.clone()))
    }

    /// Round preceding `code` in the same event, `None` for a first round.
    pub fn previous_round(&self, code: &ActivityCode) -> Result<Option<&Round>, LookupError> {
        self.round(code)?;
        code.previous_round()
            .map(|prev| self.round(&prev))
            .transpose()
    }

    /// Number of rounds held for `event_id`.
    pub fn total_rounds(&self, event_id: &str) -> Result<usize, LookupError> {
        Ok(self.event(event_id)?.rounds.len())
    }

    /// Persons with an accepted registration for `event_id`, in document order.
    pub fn registered_for(&self, event_id: &str) -> Vec<&Person> {
        self.doc
            .persons
            .iter()
            .filter(|p| p.is_registered_for(event_id))
            .collect()
    }

    /// Iterates every round of every event with its round number.
    pub fn rounds(&self) -> impl Iterator<Item = (&Event, RoundNumber, &Round)> {
        self.doc.events.iter().flat_map(|event| {
            event
                .rounds
                .iter()
                .enumerate()
                .map(move |(idx, round)| (event, idx as RoundNumber + 1, round))
        })
    }
}

fn validate_rounds(event: &Event) -> Result<(), DocumentError> {
    for (idx, round) in event.rounds.iter().enumerate() {
        if round.id.event_id != event.id || round.id.round_number.is_none() {
            return Err(DocumentError::ForeignRound {
                event: event.id.clone(),
                round: round.id.clone(),
            });
        }

        let expected = idx as RoundNumber + 1;
        if round.id.round_number != Some(expected) {
            return Err(DocumentError::NonContiguousRounds {
                event: event.id.clone(),
                expected,
                found: round.id.clone(),
            });
        }

        let mut seen = HashSet::new();
        for result in &round.results {
            if !seen.insert(result.person_id) {
                return Err(DocumentError::DuplicateResult {
                    round: round.id.clone(),
                    person_id: result.person_id,
                });
            }
        }
    }
    Ok(())
}
