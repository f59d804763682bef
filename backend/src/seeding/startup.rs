//! Startup seeding orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use fee_timeline::{RegistryError, SeedRegistry};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{BorrowFeeRepository, MemberRepository};
use crate::domain::{FeeHistorySeeder, FeeSeedOutcome, FeeSeedingError};
use crate::seeding::config::SeedSettings;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing failed.
    #[error("registry parse error: {0}")]
    Registry(#[from] RegistryError),
    /// Generation or persistence failed.
    #[error("fee seeding error: {0}")]
    Seeding(#[from] FeeSeedingError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Seed the store with a generated fee history when enabled.
///
/// Returns `Ok(None)` when seeding is disabled.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use fee_ledger::outbound::memory::InMemoryStore;
/// use fee_ledger::seeding::{SeedSettings, seed_fees_on_startup};
/// use mockable::DefaultClock;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = SeedSettings {
///     enabled: true,
///     seed_name: Some("quiet-branch".to_owned()),
///     registry_path: None,
///     member_count: None,
///     transaction_count: None,
/// };
/// let store = Arc::new(InMemoryStore::default());
/// let outcome =
///     seed_fees_on_startup(&settings, Arc::clone(&store), store, Arc::new(DefaultClock)).await?;
/// assert!(outcome.is_some());
/// # Ok(())
/// # }
/// ```
pub async fn seed_fees_on_startup<M, F>(
    settings: &SeedSettings,
    members: Arc<M>,
    fees: Arc<F>,
    clock: Arc<dyn Clock>,
) -> Result<Option<FeeSeedOutcome>, StartupSeedingError>
where
    M: MemberRepository,
    F: BorrowFeeRepository,
{
    if !settings.enabled {
        info!(reason = "disabled", "fee seeding skipped");
        return Ok(None);
    }

    let seed_name = settings.seed_name().trim();
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }

    let registry = load_registry(&settings.registry_path())?;
    let seeder = FeeHistorySeeder::new(members, fees, clock);
    let outcome = seeder
        .seed_from_registry(&registry, seed_name, settings.overrides())
        .await?;

    info!(
        seed_key = %outcome.seed_key,
        member_count = outcome.member_count,
        transaction_count = outcome.transaction_count,
        "startup fee seeding applied"
    );
    Ok(Some(outcome))
}

/// Read and parse a seed registry through a capability-scoped directory.
///
/// # Errors
///
/// Returns [`StartupSeedingError::RegistryRead`] when the file cannot be read
/// and [`StartupSeedingError::Registry`] when it does not parse.
pub fn load_registry(path: &Path) -> Result<SeedRegistry, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(SeedRegistry::from_json(&contents)?)
}
