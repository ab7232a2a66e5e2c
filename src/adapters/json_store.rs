use crate::core::{Assignment, AssignmentRepository, MemberRepository, Participant};
use crate::domain::model::ParticipantId;
use crate::utils::error::{Result, SantaError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub const DEFAULT_MEMBERS_FILE: &str = "members.json";
pub const DEFAULT_ASSIGNMENTS_FILE: &str = "assignments.json";

/// Participants and assignment history kept as two JSON arrays in a data
/// directory.
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    members_file: String,
    assignments_file: String,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_file_names(data_dir, DEFAULT_MEMBERS_FILE, DEFAULT_ASSIGNMENTS_FILE)
    }

    pub fn with_file_names(
        data_dir: impl Into<PathBuf>,
        members_file: impl Into<String>,
        assignments_file: impl Into<String>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            members_file: members_file.into(),
            assignments_file: assignments_file.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn members_path(&self) -> PathBuf {
        self.data_dir.join(&self.members_file)
    }

    pub fn assignments_path(&self) -> PathBuf {
        self.data_dir.join(&self.assignments_file)
    }

    async fn read_members(&self) -> Result<Vec<Participant>> {
        let path = self.members_path();
        let data = tokio::fs::read(&path).await.map_err(|e| {
            SantaError::storage(format!("cannot read members file {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_slice(&data)?)
    }

    async fn read_assignments(&self) -> Result<Vec<Assignment>> {
        let path = self.assignments_path();
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            // 尚未產生過任何配對
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(SantaError::storage(format!(
                "cannot read assignments file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn write_assignments(&self, path: &Path, assignments: &[Assignment]) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // 先寫暫存檔再改名，避免中途失敗留下半個檔案
        let tmp_path = path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(assignments)?;
        tokio::fs::write(&tmp_path, &data).await?;
        tokio::fs::rename(&tmp_path, path).await?;
        Ok(())
    }
}

#[async_trait]
impl MemberRepository for JsonFileStore {
    async fn find_all_with_relations(&self) -> Result<Vec<Participant>> {
        self.read_members().await
    }

    async fn find_by_id(&self, id: ParticipantId) -> Result<Option<Participant>> {
        let members = self.read_members().await?;
        Ok(members.into_iter().find(|member| member.id == id))
    }
}

#[async_trait]
impl AssignmentRepository for JsonFileStore {
    async fn find_by_years_between(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<Assignment>> {
        let assignments = self.read_assignments().await?;
        Ok(assignments
            .into_iter()
            .filter(|a| a.assignment_year >= start_year && a.assignment_year <= end_year)
            .collect())
    }

    async fn save_all(&self, assignments: Vec<Assignment>) -> Result<Vec<Assignment>> {
        let _guard = self.write_lock.lock().await;

        let mut stored = self.read_assignments().await?;
        let mut next_id = stored.iter().filter_map(|a| a.id).max().unwrap_or(0) + 1;

        let mut saved = Vec::with_capacity(assignments.len());
        for mut assignment in assignments {
            assignment.id = Some(next_id);
            next_id += 1;
            // 名稱只用於輸出，不落地
            assignment.santa_name = None;
            assignment.recipient_name = None;
            saved.push(assignment);
        }

        stored.extend(saved.iter().cloned());
        self.write_assignments(&self.assignments_path(), &stored).await?;

        tracing::debug!(
            "Persisted {} assignments to {}",
            saved.len(),
            self.assignments_path().display()
        );
        Ok(saved)
    }
}
