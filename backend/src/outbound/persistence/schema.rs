//! Diesel table definitions for the ledger schema.
//!
//! Must match `backend/migrations`. Regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Library members.
    members (id) {
        /// Primary key assigned by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Display username, at most 64 characters.
        username -> Varchar,
        /// Creation instant; never updated.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Borrow fee transactions.
    ///
    /// `(member_id, sequence_type)` is unique.
    borrow_fees (id) {
        /// Primary key assigned by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Owning member.
        member_id -> Int8,
        /// One-based ordinal within the member's history.
        sequence_type -> Int4,
        /// Fee amount, non-negative.
        fee -> Float8,
        /// Instant the fee was incurred.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(borrow_fees -> members (member_id));

diesel::allow_tables_to_appear_in_same_query!(borrow_fees, members);
