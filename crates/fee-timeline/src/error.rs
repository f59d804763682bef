//! Error types for the fee-timeline crate.
//!
//! Registry parsing, timeline generation, and timeline verification each get
//! their own enum so callers can react to the failure category.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// Two seed definitions share a name.
    #[error("seed name '{name}' is defined more than once")]
    DuplicateSeedName {
        /// The repeated seed name.
        name: String,
    },

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// A generated timeline broke one of the ordering rules.
///
/// `record_index` is the position of the offending record in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineViolation {
    /// The record references a member that is not in the member set.
    #[error("record {record_index} references an unknown member")]
    UnknownMember {
        /// Position of the offending record.
        record_index: usize,
    },

    /// The record is timestamped before its member was created.
    #[error("record {record_index} at {created_at} precedes member creation at {member_created_at}")]
    PrecedesMemberCreation {
        /// Position of the offending record.
        record_index: usize,
        /// Record timestamp.
        created_at: DateTime<Utc>,
        /// Member creation timestamp.
        member_created_at: DateTime<Utc>,
    },

    /// The record is earlier than the member's previous record.
    #[error("record {record_index} at {created_at} is earlier than the previous record at {previous}")]
    OutOfOrder {
        /// Position of the offending record.
        record_index: usize,
        /// Record timestamp.
        created_at: DateTime<Utc>,
        /// Timestamp of the member's previous record.
        previous: DateTime<Utc>,
    },

    /// The record is timestamped after generation time.
    #[error("record {record_index} at {created_at} is after {now}")]
    InFuture {
        /// Position of the offending record.
        record_index: usize,
        /// Record timestamp.
        created_at: DateTime<Utc>,
        /// Generation time.
        now: DateTime<Utc>,
    },

    /// The record's sequence ordinal skips or repeats a value.
    #[error("record {record_index} has sequence {actual}, expected {expected}")]
    SequenceGap {
        /// Position of the offending record.
        record_index: usize,
        /// Ordinal the member should have received next.
        expected: u32,
        /// Ordinal found on the record.
        actual: u32,
    },
}

/// Errors that can occur during member or timeline generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// Transactions were requested for an empty member set.
    #[error("cannot generate {transaction_count} transactions without members")]
    NoMembers {
        /// Number of transactions requested.
        transaction_count: usize,
    },

    /// A member appears twice in the member set.
    #[error("member at index {index} duplicates an earlier member")]
    DuplicateMember {
        /// Position of the repeated member.
        index: usize,
    },

    /// A member was created after generation time, so no valid timestamp exists.
    #[error("member at index {index} was created at {created_at}, after {now}")]
    MemberCreatedInFuture {
        /// Position of the member in the member set.
        index: usize,
        /// Member creation timestamp.
        created_at: DateTime<Utc>,
        /// Generation time.
        now: DateTime<Utc>,
    },

    /// A fixed history floor lies after generation time.
    #[error("history floor {floor} is after {now}")]
    FloorAfterNow {
        /// Configured floor.
        floor: DateTime<Utc>,
        /// Generation time.
        now: DateTime<Utc>,
    },

    /// Selection weights do not describe a usable distribution.
    #[error("invalid member weights: {message}")]
    InvalidWeights {
        /// Description of the problem.
        message: String,
    },

    /// The fee range is empty, negative, or not finite.
    #[error("invalid fee range [{min}, {max})")]
    InvalidFeeRange {
        /// Inclusive lower bound.
        min: f64,
        /// Exclusive upper bound.
        max: f64,
    },

    /// More transactions were requested than sequence ordinals can number.
    #[error("transaction count {count} exceeds the maximum of {max}")]
    TooManyTransactions {
        /// Number of transactions requested.
        count: usize,
        /// Largest supported count.
        max: u32,
    },

    /// A calendar computation left the representable timestamp range.
    #[error("timestamp arithmetic overflowed while computing {what}")]
    TimestampOutOfRange {
        /// Which value was being computed.
        what: &'static str,
    },

    /// Failed to generate a valid username after maximum retries.
    #[error("failed to generate valid username after {max_attempts} attempts")]
    UsernameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// The generated timeline failed verification.
    #[error("generated timeline violates ordering rules: {0}")]
    InvariantViolation(#[from] TimelineViolation),
}
