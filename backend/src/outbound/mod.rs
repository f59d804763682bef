//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel.
//! - **memory**: process-local store used without a database.
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules beyond what the port contracts require.

pub mod memory;
pub mod persistence;
