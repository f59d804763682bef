//! Startup wiring for fee history seeding.

mod config;
mod startup;

pub use config::SeedSettings;
pub use startup::{StartupSeedingError, load_registry, seed_fees_on_startup};
