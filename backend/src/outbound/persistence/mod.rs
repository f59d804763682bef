//! PostgreSQL persistence adapters.
//!
//! Diesel row structs and table definitions stay private to this module;
//! repositories translate rows into domain types and Diesel failures into
//! port errors. Connections come from a `bb8` pool over `diesel-async`.
//!
//! # Example
//!
//! ```rust,no_run
//! use fee_ledger::outbound::persistence::{DbPool, DieselMemberRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/ledger")).await?;
//! let members = DieselMemberRepository::new(pool);
//! # let _ = members;
//! # Ok(())
//! # }
//! ```

mod diesel_borrow_fee_repository;
mod diesel_error_mapping;
mod diesel_member_repository;
mod models;
mod pool;
mod schema;

pub use diesel_borrow_fee_repository::DieselBorrowFeeRepository;
pub use diesel_member_repository::DieselMemberRepository;
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, DbPool, PoolConfig, PoolError,
};
