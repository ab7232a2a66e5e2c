pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::JsonFileStore;
pub use config::Settings;
pub use core::{
    graph::ImmediateFamilyRule, hamiltonian::HamiltonianCycleStrategy,
    service::SecretSantaService,
};
pub use utils::error::{Result, SantaError};
