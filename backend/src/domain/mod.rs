//! Domain primitives, services and ports.
//!
//! Purpose: define the member and borrow fee model, the totals and
//! transaction queries over it, and the seeding service that fills a store
//! with a reproducible history. Nothing here depends on HTTP or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Member, BorrowFee, MemberTotal: the ledger model.
//! - TrailingWindow / WindowStart: totals window arithmetic.
//! - TransactionDateRange: inclusive day ranges for transaction listings.
//! - MemberService, MemberTotalsService, MemberTransactionsService,
//!   FeeHistorySeeder: services behind the driving ports in [`ports`].

pub mod borrow_fee;
pub mod error;
pub mod fee_seeding;
pub mod member;
pub mod member_service;
pub mod member_totals_service;
pub mod member_transactions_service;
pub mod ports;
mod repository_errors;
pub mod totals;
pub mod trace_id;
pub mod transaction_range;

pub use self::borrow_fee::{
    BorrowFee, BorrowFeeId, BorrowFeeValidationError, FeeAmount, NewBorrowFee, SequenceType,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::fee_seeding::{FeeHistorySeeder, FeeSeedOutcome, FeeSeedingError, SeedOverrides};
pub use self::member::{
    Member, MemberId, MemberValidationError, NewMember, USERNAME_MAX, Username,
};
pub use self::member_service::MemberService;
pub use self::member_totals_service::MemberTotalsService;
pub use self::member_transactions_service::MemberTransactionsService;
pub use self::totals::{
    DEFAULT_WINDOW_MONTHS, MemberTotal, TrailingWindow, WindowStart, aggregate_member_totals,
};
pub use self::trace_id::TraceId;
pub use self::transaction_range::{DateRangeError, TransactionDateRange};
