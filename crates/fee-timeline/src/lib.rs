//! Deterministic borrow fee timeline generation.
//!
//! This crate synthesises members and their time-stamped borrow fee
//! transactions from an injected random source and an explicit "now". It is
//! independent of backend domain types so the backend can depend on it
//! without cycles.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Generating per-member fee timelines whose timestamps never precede the
//!   member's creation, never run backwards, and never reach the future
//! - Verifying any timeline against those rules
//! - Generating plausible members with past creation dates
//! - Loading named seeds from a JSON registry for reproducible datasets
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use fee_timeline::{SeedRegistry, generate_dataset};
//!
//! let json = r#"{
//!     "version": 1,
//!     "seeds": [{"name": "tiny", "seed": 7, "memberCount": 3, "transactionCount": 20}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("tiny").expect("seed exists");
//! let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single().expect("valid now");
//! let dataset = generate_dataset(seed_def, now).expect("generation succeeds");
//!
//! assert_eq!(dataset.members.len(), 3);
//! assert_eq!(dataset.fees.len(), 20);
//! ```

mod config;
mod dataset;
mod error;
mod invariants;
mod members;
mod registry;
mod timeline;

pub use config::{
    DEFAULT_FLOOR_MONTHS, DEFAULT_MAX_GAP_SECONDS, FeeRange, HistoryFloor, MemberSelection,
    TimelineConfig,
};
pub use dataset::{SeededDataset, generate_dataset};
pub use error::{GenerationError, RegistryError, TimelineViolation};
pub use invariants::verify_timeline;
pub use members::{MemberSeed, USERNAME_MAX, generate_members, is_valid_username};
pub use registry::{SeedDefinition, SeedRegistry};
pub use timeline::{FeeRecord, MemberAnchor, generate_fee_history};
