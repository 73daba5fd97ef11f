use crate::types::RoundNumber;

const ORDINALS: [&str; 10] = [
    "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh", "Eighth", "Ninth", "Tenth",
];

/// Human-facing round name, e.g. "Second Round" or "Final (Combined)".
pub fn round_name(round_number: RoundNumber, total_rounds: usize, has_cutoff: bool) -> String {
    let base = if round_number as usize >= total_rounds {
        "Final".to_string()
    } else {
        match ORDINALS.get((round_number as usize).wrapping_sub(1)) {
            Some(ordinal) => format!("{ordinal} Round"),
            None => format!("Round {round_number}"),
        }
    };

    if has_cutoff {
        format!("{base} (Combined)")
    } else {
        base
    }
}

/// Compact round code for badges, e.g. "R2" or "R1c" for a cutoff round.
pub fn round_label(round_number: RoundNumber, has_cutoff: bool) -> String {
    if has_cutoff {
        format!("R{round_number}c")
    } else {
        format!("R{round_number}")
    }
}
