//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` [`Error`] whose `details` carry
//! `{field, code, value?}` so clients can point at the offending input.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{
    DateRangeError, Error, MemberId, MemberValidationError, TransactionDateRange, Username,
};

/// Date format accepted by query parameters.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    InvalidDate,
    EmptyUsername,
    UsernameTooLong,
    EndBeforeStart,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::EmptyUsername => "empty_username",
            ErrorCode::UsernameTooLong => "username_too_long",
            ErrorCode::EndBeforeStart => "end_before_start",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

/// Parse a path segment into a positive [`MemberId`].
pub(crate) fn parse_member_id(value: &str, field: FieldName) -> Result<MemberId, Error> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|raw| MemberId::new(raw).ok())
        .ok_or_else(|| {
            ValidationError::new(field, format!("{} must be a positive integer", field.as_str()))
                .with_value(ErrorCode::InvalidId, value)
        })
}

/// Parse an optional `YYYY-MM-DD` query value, using `default` when absent.
pub(crate) fn parse_date_or(
    value: Option<&str>,
    field: FieldName,
    default: NaiveDate,
) -> Result<NaiveDate, Error> {
    let Some(raw) = value else {
        return Ok(default);
    };
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::new(field, format!("{} must be a YYYY-MM-DD date", field.as_str()))
            .with_value(ErrorCode::InvalidDate, raw)
    })
}

/// Validate a username from a request body.
pub(crate) fn parse_username(value: String, field: FieldName) -> Result<Username, Error> {
    Username::new(value).map_err(|err| username_error(&err, field))
}

fn username_error(err: &MemberValidationError, field: FieldName) -> Error {
    let code = match err {
        MemberValidationError::UsernameTooLong { .. } => ErrorCode::UsernameTooLong,
        MemberValidationError::EmptyUsername | MemberValidationError::InvalidId => {
            ErrorCode::EmptyUsername
        }
    };
    ValidationError::new(field, err.to_string()).with_code(code)
}

/// Build a transaction range, reporting an inverted range against `end`.
pub(crate) fn date_range(
    start: NaiveDate,
    end: NaiveDate,
    end_field: FieldName,
) -> Result<TransactionDateRange, Error> {
    TransactionDateRange::new(start, end).map_err(|err| match err {
        DateRangeError::EndBeforeStart { end, .. } => {
            ValidationError::new(end_field, err.to_string())
                .with_value(ErrorCode::EndBeforeStart, end.format(DATE_FORMAT).to_string())
        }
        DateRangeError::OutOfRange { end } => ValidationError::new(end_field, err.to_string())
            .with_value(ErrorCode::InvalidDate, end.format(DATE_FORMAT).to_string()),
    })
}
