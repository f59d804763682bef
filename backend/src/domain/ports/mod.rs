//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters and
//! return typed errors. Driving ports (`*Command`, `*Query`) are implemented
//! by domain services and return the transport-agnostic [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod borrow_fee_repository;
mod member_repository;
mod member_totals_query;
mod member_transactions_query;
mod members_command;
mod members_query;

#[cfg(test)]
pub use borrow_fee_repository::MockBorrowFeeRepository;
pub use borrow_fee_repository::{BorrowFeeRepository, BorrowFeeRepositoryError};
#[cfg(test)]
pub use member_repository::MockMemberRepository;
pub use member_repository::{MemberRepository, MemberRepositoryError};
#[cfg(test)]
pub use member_totals_query::MockMemberTotalsQuery;
pub use member_totals_query::MemberTotalsQuery;
#[cfg(test)]
pub use member_transactions_query::MockMemberTransactionsQuery;
pub use member_transactions_query::MemberTransactionsQuery;
#[cfg(test)]
pub use members_command::MockMembersCommand;
pub use members_command::{MemberUpdate, MembersCommand};
#[cfg(test)]
pub use members_query::MockMembersQuery;
pub use members_query::MembersQuery;
