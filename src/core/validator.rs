use crate::domain::model::{FamilyId, Participant};
use crate::utils::error::{Result, SantaError};
use std::collections::HashMap;

/// Rejects participant sets that can never produce a valid assignment.
///
/// The family-size check is necessary, not sufficient: relations and history
/// can still make the search fail later.
pub fn validate_participants(participants: Vec<Participant>) -> Result<Vec<Participant>> {
    if participants.is_empty() {
        return Err(SantaError::invalid_participants("No participants found"));
    }
    if participants.len() < 2 {
        return Err(SantaError::invalid_participants("Need at least 2 participants"));
    }

    let largest = largest_family_size(&participants);
    let total = participants.len();
    if largest > total - largest {
        tracing::debug!(
            "Largest family has {} of {} participants",
            largest,
            total
        );
        return Err(SantaError::assignment_impossible(
            "Assignment impossible: largest family too big relative to participants",
        ));
    }

    Ok(participants)
}

fn largest_family_size(participants: &[Participant]) -> usize {
    let mut sizes: HashMap<FamilyId, usize> = HashMap::new();
    for participant in participants {
        *sizes.entry(participant.family_id).or_insert(0) += 1;
    }
    sizes.values().copied().max().unwrap_or(0)
}
