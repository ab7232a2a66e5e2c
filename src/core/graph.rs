//! Compatibility graph of admissible giver → recipient pairings.
//!
//! Participants are addressed by their position in the input slice for the
//! lifetime of one request; adjacency lists preserve input order so the
//! search is reproducible.

use crate::domain::model::{HistoryIndex, Participant};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How `IMMEDIATE_FAMILY` relations restrict a giver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImmediateFamilyRule {
    /// A giver with any immediate-family edge may give to nobody.
    #[default]
    AnyEdge,
    /// Only the two participants joined by the edge (either direction) are kept apart.
    Targeted,
}

impl fmt::Display for ImmediateFamilyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnyEdge => write!(f, "any_edge"),
            Self::Targeted => write!(f, "targeted"),
        }
    }
}

impl FromStr for ImmediateFamilyRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any_edge" | "any-edge" => Ok(Self::AnyEdge),
            "targeted" => Ok(Self::Targeted),
            other => Err(format!(
                "unknown immediate family rule '{}' (expected any_edge or targeted)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityGraph {
    adjacency: Vec<Vec<usize>>,
}

impl CompatibilityGraph {
    pub fn build(
        participants: &[Participant],
        history: &HistoryIndex,
        rule: ImmediateFamilyRule,
    ) -> Self {
        let adjacency = participants
            .iter()
            .map(|santa| {
                // AnyEdge 規則只看送禮者本身，每位送禮者判斷一次
                if rule == ImmediateFamilyRule::AnyEdge && santa.has_immediate_family() {
                    return Vec::new();
                }

                participants
                    .iter()
                    .enumerate()
                    .filter(|(_, recipient)| is_admissible(santa, recipient, history, rule))
                    .map(|(index, _)| index)
                    .collect()
            })
            .collect();

        Self { adjacency }
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Successors of `node` in the order they are tried by the search.
    pub fn successors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.adjacency[from].contains(&to)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// True when some participant has no admissible recipient or no admissible
    /// giver. No covering cycle can exist then.
    pub fn has_isolated_node(&self) -> bool {
        let mut in_degree = vec![0usize; self.adjacency.len()];
        for successors in &self.adjacency {
            for &to in successors {
                in_degree[to] += 1;
            }
        }

        self.adjacency
            .iter()
            .zip(in_degree)
            .any(|(successors, incoming)| successors.is_empty() || incoming == 0)
    }
}

fn is_admissible(
    santa: &Participant,
    recipient: &Participant,
    history: &HistoryIndex,
    rule: ImmediateFamilyRule,
) -> bool {
    if santa.id == recipient.id {
        return false;
    }
    if santa.family_id == recipient.family_id {
        return false;
    }
    if rule == ImmediateFamilyRule::Targeted
        && (santa.is_immediate_family_of(recipient.id) || recipient.is_immediate_family_of(santa.id))
    {
        return false;
    }
    !history.has_given(santa.id, recipient.id)
}
