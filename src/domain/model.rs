use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type ParticipantId = i64;
pub type FamilyId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    ImmediateFamily,
    ExtendedFamily,
    Other,
}

/// Directed relation owned by the participant it originates from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEdge {
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    pub target_participant_id: ParticipantId,
}

impl RelationEdge {
    pub fn new(relation_type: RelationType, target_participant_id: ParticipantId) -> Self {
        Self {
            relation_type,
            target_participant_id,
        }
    }

    pub fn immediate_family(target_participant_id: ParticipantId) -> Self {
        Self::new(RelationType::ImmediateFamily, target_participant_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub family_id: FamilyId,
    pub name: String,
    #[serde(default)]
    pub relations: Vec<RelationEdge>,
}

impl Participant {
    pub fn new(id: ParticipantId, family_id: FamilyId, name: impl Into<String>) -> Self {
        Self {
            id,
            family_id,
            name: name.into(),
            relations: Vec::new(),
        }
    }

    pub fn with_relation(mut self, edge: RelationEdge) -> Self {
        self.relations.push(edge);
        self
    }

    pub fn has_immediate_family(&self) -> bool {
        self.relations
            .iter()
            .any(|edge| edge.relation_type == RelationType::ImmediateFamily)
    }

    pub fn is_immediate_family_of(&self, other: ParticipantId) -> bool {
        self.relations.iter().any(|edge| {
            edge.relation_type == RelationType::ImmediateFamily
                && edge.target_participant_id == other
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub assignment_year: i32,
    pub santa_id: ParticipantId,
    pub recipient_id: ParticipantId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub santa_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
}

impl Assignment {
    pub fn new(assignment_year: i32, santa_id: ParticipantId, recipient_id: ParticipantId) -> Self {
        Self {
            id: None,
            assignment_year,
            santa_id,
            recipient_id,
            santa_name: None,
            recipient_name: None,
        }
    }

    pub fn with_names(mut self, santa: &Participant, recipient: &Participant) -> Self {
        self.santa_name = Some(santa.name.clone());
        self.recipient_name = Some(recipient.name.clone());
        self
    }
}

/// Recipients each giver was assigned inside the trailing history window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryIndex {
    recent: HashMap<ParticipantId, HashSet<ParticipantId>>,
}

impl HistoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_assignments<'a, I>(history: I) -> Self
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        let mut recent: HashMap<ParticipantId, HashSet<ParticipantId>> = HashMap::new();
        for assignment in history {
            recent
                .entry(assignment.santa_id)
                .or_default()
                .insert(assignment.recipient_id);
        }
        Self { recent }
    }

    pub fn has_given(&self, santa_id: ParticipantId, recipient_id: ParticipantId) -> bool {
        self.recent
            .get(&santa_id)
            .map(|recipients| recipients.contains(&recipient_id))
            .unwrap_or(false)
    }

    pub fn recipients_of(&self, santa_id: ParticipantId) -> Option<&HashSet<ParticipantId>> {
        self.recent.get(&santa_id)
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn giver_count(&self) -> usize {
        self.recent.len()
    }
}
