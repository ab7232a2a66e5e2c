use crate::core::validator::validate_participants;
use crate::domain::model::{Assignment, HistoryIndex, Participant, ParticipantId};
use crate::domain::ports::{AssignmentRepository, AssignmentStrategy, MemberRepository};
use crate::utils::error::{Result, SantaError};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Number of prior years whose pairings may not repeat.
pub const HISTORY_WINDOW: i32 = 3;

/// Inclusive year range whose assignments constrain `year`.
pub fn history_range(year: i32) -> (i32, i32) {
    (year.saturating_sub(HISTORY_WINDOW), year.saturating_sub(1))
}

pub struct SecretSantaService<M: MemberRepository, A: AssignmentRepository> {
    members: M,
    assignments: A,
    strategy: Arc<dyn AssignmentStrategy>,
}

impl<M: MemberRepository, A: AssignmentRepository> SecretSantaService<M, A> {
    pub fn new(members: M, assignments: A, strategy: Arc<dyn AssignmentStrategy>) -> Self {
        Self {
            members,
            assignments,
            strategy,
        }
    }

    /// Generates, persists and returns the assignment set for `year`, with
    /// giver and recipient names attached.
    pub async fn create_assignments(&self, year: i32) -> Result<Vec<Assignment>> {
        tracing::info!("🎅 Creating Secret Santa assignments for {}", year);

        let (_, generated) = self.generate_valid_assignments(year).await?;

        tracing::debug!("Saving {} assignments", generated.len());
        let saved = self.assignments.save_all(generated).await?;

        let mut detailed = Vec::with_capacity(saved.len());
        for assignment in saved {
            detailed.push(self.load_assignment_details(assignment).await?);
        }

        tracing::info!("✅ Created {} assignments for {}", detailed.len(), year);
        Ok(detailed)
    }

    /// Same pipeline as [`create_assignments`](Self::create_assignments) but
    /// nothing is written; names come from the loaded participants.
    pub async fn preview_assignments(&self, year: i32) -> Result<Vec<Assignment>> {
        tracing::info!("🔍 Previewing Secret Santa assignments for {}", year);

        let (participants, generated) = self.generate_valid_assignments(year).await?;
        let by_id: HashMap<ParticipantId, &Participant> =
            participants.iter().map(|p| (p.id, p)).collect();

        generated
            .into_iter()
            .map(|assignment| -> Result<Assignment> {
                let santa = by_id
                    .get(&assignment.santa_id)
                    .ok_or(SantaError::ParticipantNotFound {
                        id: assignment.santa_id,
                    })?;
                let recipient = by_id
                    .get(&assignment.recipient_id)
                    .ok_or(SantaError::ParticipantNotFound {
                        id: assignment.recipient_id,
                    })?;
                Ok(assignment.with_names(santa, recipient))
            })
            .collect()
    }

    async fn generate_valid_assignments(
        &self,
        year: i32,
    ) -> Result<(Vec<Participant>, Vec<Assignment>)> {
        // 1. 載入參與者與關係
        let participants = self.members.find_all_with_relations().await?;
        tracing::debug!("Loaded {} participants", participants.len());

        // 2. 驗證參與者
        let participants = validate_participants(participants)?;

        // 3. 載入歷史配對
        let history = self.load_recent_history(year).await?;

        // 4 + 5. 建圖並搜尋，CPU 密集的部分放到 blocking 執行緒
        let strategy = Arc::clone(&self.strategy);
        let (participants, generated) = tokio::task::spawn_blocking(move || {
            let generated = strategy.generate_assignments(year, &participants, &history);
            (participants, generated)
        })
        .await
        .map_err(|e| SantaError::Internal {
            message: format!("assignment search task failed: {}", e),
        })?;

        let generated = generated?;
        Ok((participants, generated))
    }

    async fn load_recent_history(&self, year: i32) -> Result<HistoryIndex> {
        let (start_year, end_year) = history_range(year);
        let history = self
            .assignments
            .find_by_years_between(start_year, end_year)
            .await?;

        let index = HistoryIndex::from_assignments(&history);
        tracing::debug!(
            "History {}-{}: {} assignments across {} givers",
            start_year,
            end_year,
            history.len(),
            index.giver_count()
        );
        Ok(index)
    }

    async fn load_assignment_details(&self, assignment: Assignment) -> Result<Assignment> {
        let (santa, recipient) = tokio::try_join!(
            self.find_participant(assignment.santa_id),
            self.find_participant(assignment.recipient_id)
        )?;
        Ok(assignment.with_names(&santa, &recipient))
    }

    async fn find_participant(&self, id: ParticipantId) -> Result<Participant> {
        self.members
            .find_by_id(id)
            .await?
            .ok_or(SantaError::ParticipantNotFound { id })
    }
}

/// Applies an optional external deadline to `future`. Expiry abandons the
/// work and reports [`SantaError::Timeout`].
pub async fn run_with_deadline<T, F>(timeout_seconds: Option<u64>, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout_seconds {
        Some(seconds) => tokio::time::timeout(Duration::from_secs(seconds), future)
            .await
            .map_err(|_| SantaError::Timeout { seconds })?,
        None => future.await,
    }
}
