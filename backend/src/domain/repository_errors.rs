//! Mapping from driven-port errors to domain errors.

use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::{BorrowFeeRepositoryError, MemberRepositoryError};

pub(crate) fn map_member_repository_error(error: MemberRepositoryError) -> Error {
    match error {
        MemberRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("member repository unavailable: {message}"))
        }
        MemberRepositoryError::Query { message } => {
            Error::internal(format!("member repository error: {message}"))
        }
    }
}

pub(crate) fn map_borrow_fee_repository_error(error: BorrowFeeRepositoryError) -> Error {
    match error {
        BorrowFeeRepositoryError::UnknownMember { member_id } => {
            Error::invalid_request(format!("member {member_id} does not exist")).with_details(
                json!({
                    "field": "memberId",
                    "value": member_id,
                    "code": "unknown_member",
                }),
            )
        }
        BorrowFeeRepositoryError::DuplicateSequence {
            member_id,
            sequence_type,
        } => Error::invalid_request(format!(
            "member {member_id} already has a fee with sequence {sequence_type}"
        ))
        .with_details(json!({
            "field": "sequenceType",
            "value": sequence_type,
            "code": "duplicate_sequence",
        })),
        BorrowFeeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("borrow fee repository unavailable: {message}"))
        }
        BorrowFeeRepositoryError::Query { message } => {
            Error::internal(format!("borrow fee repository error: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(MemberRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(MemberRepositoryError::query("syntax"), ErrorCode::InternalError)]
    fn member_errors_map_to_codes(#[case] error: MemberRepositoryError, #[case] code: ErrorCode) {
        assert_eq!(map_member_repository_error(error).code(), code);
    }

    #[rstest]
    #[case(BorrowFeeRepositoryError::unknown_member(9_i64), ErrorCode::InvalidRequest)]
    #[case(
        BorrowFeeRepositoryError::duplicate_sequence(9_i64, 2_u32),
        ErrorCode::InvalidRequest
    )]
    #[case(BorrowFeeRepositoryError::connection("timeout"), ErrorCode::ServiceUnavailable)]
    #[case(BorrowFeeRepositoryError::query("boom"), ErrorCode::InternalError)]
    fn fee_errors_map_to_codes(#[case] error: BorrowFeeRepositoryError, #[case] code: ErrorCode) {
        assert_eq!(map_borrow_fee_repository_error(error).code(), code);
    }

    #[rstest]
    fn unknown_member_carries_field_details() {
        let error = map_borrow_fee_repository_error(BorrowFeeRepositoryError::unknown_member(9_i64));
        assert_eq!(
            error.details(),
            Some(&json!({"field": "memberId", "value": 9, "code": "unknown_member"}))
        );
    }
}
