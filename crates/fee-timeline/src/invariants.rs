//! Verification of fee timelines against the per-member ordering rules.
//!
//! For every member a valid timeline satisfies:
//!
//! - no record precedes the member's creation
//! - records ordered by sequence never go back in time
//! - no record is after generation time
//! - sequence ordinals start at 1 and increase by exactly 1

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};

use crate::error::TimelineViolation;
use crate::timeline::{FeeRecord, MemberAnchor};

/// Check `records`, in emission order, against the ordering rules.
///
/// Returns the first violation found.
///
/// # Errors
///
/// Returns a [`TimelineViolation`] describing the first offending record.
///
/// # Example
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use fee_timeline::{FeeRecord, MemberAnchor, TimelineViolation, verify_timeline};
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single().expect("valid now");
/// let members = vec![MemberAnchor::new(1_u8, now - Duration::days(10))];
/// let records = vec![FeeRecord {
///     member: 1_u8,
///     sequence_type: 2,
///     fee: 5.0,
///     created_at: now - Duration::days(1),
/// }];
///
/// assert!(matches!(
///     verify_timeline(&members, &records, now),
///     Err(TimelineViolation::SequenceGap { expected: 1, actual: 2, .. })
/// ));
/// ```
pub fn verify_timeline<K>(
    members: &[MemberAnchor<K>],
    records: &[FeeRecord<K>],
    now: DateTime<Utc>,
) -> Result<(), TimelineViolation>
where
    K: Eq + Hash,
{
    let created: HashMap<&K, DateTime<Utc>> = members
        .iter()
        .map(|member| (&member.key, member.created_at))
        .collect();
    let mut latest: HashMap<&K, (u32, DateTime<Utc>)> = HashMap::with_capacity(members.len());

    for (record_index, record) in records.iter().enumerate() {
        let member_created_at = *created
            .get(&record.member)
            .ok_or(TimelineViolation::UnknownMember { record_index })?;

        if record.created_at < member_created_at {
            return Err(TimelineViolation::PrecedesMemberCreation {
                record_index,
                created_at: record.created_at,
                member_created_at,
            });
        }
        if record.created_at > now {
            return Err(TimelineViolation::InFuture {
                record_index,
                created_at: record.created_at,
                now,
            });
        }

        let previous = latest.get(&record.member).copied();
        let expected = previous.map_or(1, |(sequence, _)| sequence.saturating_add(1));
        if record.sequence_type != expected {
            return Err(TimelineViolation::SequenceGap {
                record_index,
                expected,
                actual: record.sequence_type,
            });
        }
        if let Some((_, previous_at)) = previous.filter(|(_, at)| record.created_at < *at) {
            return Err(TimelineViolation::OutOfOrder {
                record_index,
                created_at: record.created_at,
                previous: previous_at,
            });
        }

        latest.insert(&record.member, (record.sequence_type, record.created_at));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
            .single()
            .expect("valid now")
    }

    fn record(member: u8, sequence_type: u32, created_at: DateTime<Utc>) -> FeeRecord<u8> {
        FeeRecord {
            member,
            sequence_type,
            fee: 1.0,
            created_at,
        }
    }

    fn members(now: DateTime<Utc>) -> Vec<MemberAnchor<u8>> {
        vec![
            MemberAnchor::new(1, now - Duration::days(30)),
            MemberAnchor::new(2, now - Duration::days(5)),
        ]
    }

    #[rstest]
    fn accepts_interleaved_valid_histories(now: DateTime<Utc>) {
        let records = vec![
            record(1, 1, now - Duration::days(20)),
            record(2, 1, now - Duration::days(4)),
            record(1, 2, now - Duration::days(20)),
            record(2, 2, now - Duration::days(1)),
        ];
        assert_eq!(verify_timeline(&members(now), &records, now), Ok(()));
    }

    #[rstest]
    fn rejects_record_before_member_creation(now: DateTime<Utc>) {
        let records = vec![record(2, 1, now - Duration::days(6))];
        assert!(matches!(
            verify_timeline(&members(now), &records, now),
            Err(TimelineViolation::PrecedesMemberCreation { record_index: 0, .. })
        ));
    }

    #[rstest]
    fn rejects_time_travel(now: DateTime<Utc>) {
        let records = vec![
            record(1, 1, now - Duration::days(2)),
            record(1, 2, now - Duration::days(3)),
        ];
        assert!(matches!(
            verify_timeline(&members(now), &records, now),
            Err(TimelineViolation::OutOfOrder { record_index: 1, .. })
        ));
    }

    #[rstest]
    fn accepts_record_stamped_now(now: DateTime<Utc>) {
        let records = vec![record(1, 1, now)];
        assert_eq!(verify_timeline(&members(now), &records, now), Ok(()));
    }

    #[rstest]
    #[case::one_second(Duration::seconds(1))]
    #[case::one_day(Duration::days(1))]
    fn rejects_records_after_now(#[case] offset: Duration, now: DateTime<Utc>) {
        let records = vec![record(1, 1, now + offset)];
        assert!(matches!(
            verify_timeline(&members(now), &records, now),
            Err(TimelineViolation::InFuture { record_index: 0, .. })
        ));
    }

    #[rstest]
    #[case::starts_at_zero(vec![0])]
    #[case::skips(vec![1, 3])]
    #[case::repeats(vec![1, 1])]
    fn rejects_broken_sequences(#[case] sequences: Vec<u32>, now: DateTime<Utc>) {
        let records: Vec<FeeRecord<u8>> = sequences
            .into_iter()
            .map(|sequence| record(1, sequence, now - Duration::days(1)))
            .collect();
        assert!(matches!(
            verify_timeline(&members(now), &records, now),
            Err(TimelineViolation::SequenceGap { .. })
        ));
    }

    #[rstest]
    fn rejects_unknown_member(now: DateTime<Utc>) {
        let records = vec![record(9, 1, now - Duration::days(1))];
        assert_eq!(
            verify_timeline(&members(now), &records, now),
            Err(TimelineViolation::UnknownMember { record_index: 0 })
        );
    }
}
