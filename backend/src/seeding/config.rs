//! Fee seeding configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::SeedOverrides;

const DEFAULT_SEED_NAME: &str = "amber-ledger";

fn default_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("fee-seeds")
        .join("seeds.json")
}

/// Configuration values controlling fee history seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FEE_SEED")]
pub struct SeedSettings {
    /// Enable fee history seeding on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Seed name to load from the registry.
    pub seed_name: Option<String>,
    /// Optional registry path override.
    pub registry_path: Option<PathBuf>,
    /// Optional override for the number of members generated.
    pub member_count: Option<usize>,
    /// Optional override for the number of fees generated.
    pub transaction_count: Option<usize>,
}

impl SeedSettings {
    /// Return the configured seed name, falling back to the default.
    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Return the configured registry path, falling back to the default.
    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(default_registry_path)
    }

    /// Count overrides to apply on top of the registry seed.
    pub fn overrides(&self) -> SeedOverrides {
        SeedOverrides {
            member_count: self.member_count,
            transaction_count: self.transaction_count,
        }
    }
}
