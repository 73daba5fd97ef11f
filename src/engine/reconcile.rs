use hashbrown::HashSet;
use serde::Serialize;

use crate::types::RegistrantId;

use super::ranking::Ranking;

/// Roster mismatch between expected qualifiers and the registered roster.
///
/// Non-empty sets are an administrative warning, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MissingQualifying {
    /// Should be in the roster but are not.
    pub qualifying: Vec<RegistrantId>,
    /// In the roster without qualifying.
    pub excess: Vec<RegistrantId>,
}

impl MissingQualifying {
    /// True when the roster matches the expected qualifiers exactly.
    pub fn is_consistent(&self) -> bool {
        self.qualifying.is_empty() && self.excess.is_empty()
    }
}

/// First tied block of ranked, non-advancing results not already in `already_in`.
pub fn next_qualifying(
    ranking: &Ranking,
    advancing: &[RegistrantId],
    already_in: &[RegistrantId],
) -> Vec<RegistrantId> {
    let skip: HashSet<RegistrantId> = advancing.iter().chain(already_in).copied().collect();

    let mut candidates = ranking
        .ranked()
        .filter(|r| !skip.contains(&r.person_id))
        .peekable();

    let Some(block_rank) = candidates.peek().and_then(|r| r.ranking) else {
        return Vec::new();
    };

    candidates
        .take_while(|r| r.ranking == Some(block_rank))
        .map(|r| r.person_id)
        .collect()
}

/// Compares who should be in a round (`expected`) against who is (`roster`).
///
/// Output preserves the order of the input sequences.
pub fn missing_qualifying(expected: &[RegistrantId], roster: &[RegistrantId]) -> MissingQualifying {
    let expected_set: HashSet<RegistrantId> = expected.iter().copied().collect();
    let roster_set: HashSet<RegistrantId> = roster.iter().copied().collect();

    MissingQualifying {
        qualifying: expected
            .iter()
            .copied()
            .filter(|id| !roster_set.contains(id))
            .collect(),
        excess: roster
            .iter()
            .copied()
            .filter(|id| !expected_set.contains(id))
            .collect(),
    }
}
