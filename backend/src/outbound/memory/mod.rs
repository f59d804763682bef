//! In-memory adapter for the member and borrow fee ports.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. Both repository ports are implemented on one [`InMemoryStore`] so
//! fee writes can check member existence atomically.

mod store;

pub use store::InMemoryStore;
