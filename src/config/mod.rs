#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::json_store::{JsonFileStore, DEFAULT_ASSIGNMENTS_FILE, DEFAULT_MEMBERS_FILE};
use crate::api::handler::{AssignmentsRequest, DEFAULT_API_VERSION};
use crate::core::graph::ImmediateFamilyRule;
use crate::core::hamiltonian::HamiltonianCycleStrategy;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_name, validate_non_empty_string, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_DATA_DIR: &str = "./data";

/// Effective settings after command line flags are layered over the TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub year: i32,
    pub api_version: String,
    pub data_dir: String,
    pub members_file: String,
    pub assignments_file: String,
    pub immediate_family_rule: ImmediateFamilyRule,
    pub timeout_seconds: Option<u64>,
    pub dry_run: bool,
    pub json_logs: bool,
    pub verbose: bool,
}

impl Settings {
    pub fn for_year(year: i32) -> Self {
        Self::from_file(year, &TomlConfig::default())
    }

    pub fn from_file(year: i32, file: &TomlConfig) -> Self {
        Self {
            year,
            api_version: DEFAULT_API_VERSION.to_string(),
            data_dir: file
                .storage
                .data_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            members_file: file
                .storage
                .members_file
                .clone()
                .unwrap_or_else(|| DEFAULT_MEMBERS_FILE.to_string()),
            assignments_file: file
                .storage
                .assignments_file
                .clone()
                .unwrap_or_else(|| DEFAULT_ASSIGNMENTS_FILE.to_string()),
            immediate_family_rule: file.engine.immediate_family_rule.unwrap_or_default(),
            timeout_seconds: file.engine.timeout_seconds,
            dry_run: false,
            json_logs: file.logging.json.unwrap_or(false),
            verbose: file.logging.verbose.unwrap_or(false),
        }
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::with_file_names(&self.data_dir, &self.members_file, &self.assignments_file)
    }

    pub fn strategy(&self) -> HamiltonianCycleStrategy {
        HamiltonianCycleStrategy::new(self.immediate_family_rule)
    }

    pub fn request(&self) -> AssignmentsRequest {
        AssignmentsRequest {
            year: self.year,
            api_version: self.api_version.clone(),
            preview: self.dry_run,
            timeout_seconds: self.timeout_seconds,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_range("year", self.year, 1, 9999)?;
        validate_non_empty_string("api_version", &self.api_version)?;
        validate_path("data_dir", &self.data_dir)?;
        validate_file_name("members_file", &self.members_file)?;
        validate_file_name("assignments_file", &self.assignments_file)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 86_400)?;
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
