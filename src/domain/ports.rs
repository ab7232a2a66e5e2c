use crate::domain::model::{Assignment, HistoryIndex, Participant, ParticipantId};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Every participant with its relation edges populated.
    async fn find_all_with_relations(&self) -> Result<Vec<Participant>>;
    async fn find_by_id(&self, id: ParticipantId) -> Result<Option<Participant>>;
}

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Both bounds are inclusive.
    async fn find_by_years_between(&self, start_year: i32, end_year: i32)
        -> Result<Vec<Assignment>>;
    /// Persists the records and returns them with ids assigned.
    async fn save_all(&self, assignments: Vec<Assignment>) -> Result<Vec<Assignment>>;
}

// 同一個 store 可同時作為兩種 repository 共用
#[async_trait]
impl<T: MemberRepository + ?Sized> MemberRepository for Arc<T> {
    async fn find_all_with_relations(&self) -> Result<Vec<Participant>> {
        (**self).find_all_with_relations().await
    }

    async fn find_by_id(&self, id: ParticipantId) -> Result<Option<Participant>> {
        (**self).find_by_id(id).await
    }
}

#[async_trait]
impl<T: AssignmentRepository + ?Sized> AssignmentRepository for Arc<T> {
    async fn find_by_years_between(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<Assignment>> {
        (**self).find_by_years_between(start_year, end_year).await
    }

    async fn save_all(&self, assignments: Vec<Assignment>) -> Result<Vec<Assignment>> {
        (**self).save_all(assignments).await
    }
}

/// Swappable assignment algorithm. Must be pure: no I/O, no shared state.
pub trait AssignmentStrategy: Send + Sync {
    fn generate_assignments(
        &self,
        year: i32,
        participants: &[Participant],
        history: &HistoryIndex,
    ) -> Result<Vec<Assignment>>;
}
