#![allow(dead_code)]

use async_trait::async_trait;
use santa_engine::core::{
    Assignment, AssignmentRepository, AssignmentStrategy, HistoryIndex, MemberRepository,
    Participant,
};
use santa_engine::domain::model::ParticipantId;
use santa_engine::utils::error::{Result, SantaError};
use santa_engine::HamiltonianCycleStrategy;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn six_members() -> Vec<Participant> {
    vec![
        Participant::new(1, 1, "A"),
        Participant::new(2, 1, "B"),
        Participant::new(3, 2, "C"),
        Participant::new(4, 2, "D"),
        Participant::new(5, 3, "E"),
        Participant::new(6, 3, "F"),
    ]
}

pub fn four_members() -> Vec<Participant> {
    vec![
        Participant::new(1, 1, "A"),
        Participant::new(2, 1, "B"),
        Participant::new(3, 2, "C"),
        Participant::new(4, 2, "D"),
    ]
}

#[derive(Clone, Default)]
pub struct MockMemberRepository {
    members: Arc<Mutex<Vec<Participant>>>,
    hidden: Arc<Mutex<HashSet<ParticipantId>>>,
    fail: bool,
}

impl MockMemberRepository {
    pub fn new(members: Vec<Participant>) -> Self {
        Self {
            members: Arc::new(Mutex::new(members)),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// `find_by_id` reports the participant as absent.
    pub async fn hide(&self, id: ParticipantId) {
        self.hidden.lock().await.insert(id);
    }
}

#[async_trait]
impl MemberRepository for MockMemberRepository {
    async fn find_all_with_relations(&self) -> Result<Vec<Participant>> {
        if self.fail {
            return Err(SantaError::storage("connection reset by peer"));
        }
        Ok(self.members.lock().await.clone())
    }

    async fn find_by_id(&self, id: ParticipantId) -> Result<Option<Participant>> {
        if self.hidden.lock().await.contains(&id) {
            return Ok(None);
        }
        let members = self.members.lock().await;
        Ok(members.iter().find(|m| m.id == id).cloned())
    }
}

#[derive(Clone, Default)]
pub struct MockAssignmentRepository {
    stored: Arc<Mutex<Vec<Assignment>>>,
    range_queries: Arc<Mutex<Vec<(i32, i32)>>>,
}

impl MockAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: Vec<Assignment>) -> Self {
        Self {
            stored: Arc::new(Mutex::new(history)),
            ..Self::default()
        }
    }

    pub async fn stored(&self) -> Vec<Assignment> {
        self.stored.lock().await.clone()
    }

    pub async fn range_queries(&self) -> Vec<(i32, i32)> {
        self.range_queries.lock().await.clone()
    }
}

#[async_trait]
impl AssignmentRepository for MockAssignmentRepository {
    async fn find_by_years_between(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<Assignment>> {
        self.range_queries.lock().await.push((start_year, end_year));
        let stored = self.stored.lock().await;
        Ok(stored
            .iter()
            .filter(|a| a.assignment_year >= start_year && a.assignment_year <= end_year)
            .cloned()
            .collect())
    }

    async fn save_all(&self, assignments: Vec<Assignment>) -> Result<Vec<Assignment>> {
        let mut stored = self.stored.lock().await;
        let mut saved = Vec::with_capacity(assignments.len());
        for mut assignment in assignments {
            assignment.id = Some(stored.len() as i64 + 1);
            stored.push(assignment.clone());
            saved.push(assignment);
        }
        Ok(saved)
    }
}

/// Counts how often the search is reached.
#[derive(Default)]
pub struct CountingStrategy {
    inner: HamiltonianCycleStrategy,
    calls: AtomicUsize,
}

impl CountingStrategy {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AssignmentStrategy for CountingStrategy {
    fn generate_assignments(
        &self,
        year: i32,
        participants: &[Participant],
        history: &HistoryIndex,
    ) -> Result<Vec<Assignment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.generate_assignments(year, participants, history)
    }
}

/// Checks coverage, self, family and history properties of one year's result.
pub fn assert_valid_assignments(
    assignments: &[Assignment],
    members: &[Participant],
    year: i32,
    history: &HistoryIndex,
) {
    let by_id: HashMap<ParticipantId, &Participant> = members.iter().map(|m| (m.id, m)).collect();
    assert_eq!(assignments.len(), members.len(), "year {}", year);

    let givers: HashSet<ParticipantId> = assignments.iter().map(|a| a.santa_id).collect();
    let recipients: HashSet<ParticipantId> = assignments.iter().map(|a| a.recipient_id).collect();
    let everyone: HashSet<ParticipantId> = by_id.keys().copied().collect();
    assert_eq!(givers, everyone, "year {}: every participant gives once", year);
    assert_eq!(recipients, everyone, "year {}: every participant receives once", year);

    for assignment in assignments {
        let santa = by_id[&assignment.santa_id];
        let recipient = by_id[&assignment.recipient_id];

        assert_eq!(assignment.assignment_year, year);
        assert_ne!(
            santa.id, recipient.id,
            "Year {}: {} cannot be their own Secret Santa",
            year, santa.name
        );
        assert_ne!(
            santa.family_id, recipient.family_id,
            "Year {}: {} cannot give to family member {}",
            year, santa.name, recipient.name
        );
        assert!(
            !santa.is_immediate_family_of(recipient.id)
                && !recipient.is_immediate_family_of(santa.id),
            "Year {}: {} and {} are immediate family",
            year,
            santa.name,
            recipient.name
        );
        assert!(
            !history.has_given(santa.id, recipient.id),
            "Year {}: {} cannot give to {} (assigned within last 3 years)",
            year,
            santa.name,
            recipient.name
        );
    }
}
