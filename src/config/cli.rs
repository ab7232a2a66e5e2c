use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::core::graph::ImmediateFamilyRule;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "santa")]
#[command(about = "Generate Secret Santa assignments for a year")]
pub struct CliConfig {
    /// Year to generate assignments for
    #[arg(long)]
    pub year: i32,

    /// Directory holding members.json and assignments.json
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "1")]
    pub api_version: String,

    /// any_edge or targeted
    #[arg(long)]
    pub immediate_family_rule: Option<ImmediateFamilyRule>,

    /// Abandon the request after this many seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Compute assignments without saving them
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Reads the TOML file when one was given, then lets flags override it.
    pub fn load_settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        file.validate()?;

        let settings = self.merge(&file);
        settings.validate()?;
        Ok(settings)
    }

    pub fn merge(&self, file: &TomlConfig) -> Settings {
        let mut settings = Settings::from_file(self.year, file);

        settings.api_version = self.api_version.clone();
        if let Some(data_dir) = &self.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(rule) = self.immediate_family_rule {
            settings.immediate_family_rule = rule;
        }
        if self.timeout_seconds.is_some() {
            settings.timeout_seconds = self.timeout_seconds;
        }
        settings.dry_run = self.dry_run;
        settings.json_logs |= self.json_logs;
        settings.verbose |= self.verbose;
        settings
    }
}
