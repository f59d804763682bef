//! Per-member fee timeline generation.
//!
//! Each member owns a cursor that only moves forwards. A transaction picks a
//! member, draws a gap, and advances that member's cursor only when the new
//! instant is still before "now"; otherwise the record reuses the current
//! cursor. Cursors start at the later of the member's creation time and the
//! history floor.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::IndexedRandom;

use crate::config::{MemberSelection, TimelineConfig};
use crate::error::GenerationError;
use crate::invariants::verify_timeline;

/// A member as seen by the generator: a caller-chosen key plus its creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAnchor<K> {
    /// Caller key identifying the member (a database id, an index, ...).
    pub key: K,
    /// When the member was created.
    pub created_at: DateTime<Utc>,
}

impl<K> MemberAnchor<K> {
    /// Pair a member key with its creation time.
    pub const fn new(key: K, created_at: DateTime<Utc>) -> Self {
        Self { key, created_at }
    }
}

/// One synthesised borrow fee.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeRecord<K> {
    /// Key of the member the fee belongs to.
    pub member: K,
    /// 1-based ordinal of the fee within the member's history.
    pub sequence_type: u32,
    /// Fee amount.
    pub fee: f64,
    /// When the fee was incurred.
    pub created_at: DateTime<Utc>,
}

/// Generation state for one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MemberCursor {
    /// Timestamp of the member's most recent record, or its start point.
    at: DateTime<Utc>,
    /// Ordinal handed to the member's most recent record; zero before the first.
    last_sequence: u32,
}

impl MemberCursor {
    const fn starting_at(at: DateTime<Utc>) -> Self {
        Self {
            at,
            last_sequence: 0,
        }
    }

    /// Move the cursor by `gap` when the result stays strictly before `now`.
    fn advance(&mut self, gap: TimeDelta, now: DateTime<Utc>) {
        if let Some(candidate) = self
            .at
            .checked_add_signed(gap)
            .filter(|candidate| *candidate < now)
        {
            self.at = candidate;
        }
    }
}

enum Picker {
    Uniform,
    Weighted(WeightedIndex<f64>),
}

impl Picker {
    fn build(selection: &MemberSelection, member_count: usize) -> Result<Self, GenerationError> {
        match selection {
            MemberSelection::Uniform => Ok(Self::Uniform),
            MemberSelection::Weighted(weights) => {
                if weights.len() != member_count {
                    return Err(GenerationError::InvalidWeights {
                        message: format!(
                            "expected {member_count} weights, found {}",
                            weights.len()
                        ),
                    });
                }
                WeightedIndex::new(weights)
                    .map(Self::Weighted)
                    .map_err(|err| GenerationError::InvalidWeights {
                        message: err.to_string(),
                    })
            }
        }
    }

    fn pick<'a, K, R>(
        &self,
        rng: &mut R,
        members: &'a [MemberAnchor<K>],
    ) -> Option<&'a MemberAnchor<K>>
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Uniform => members.choose(rng),
            Self::Weighted(index) => members.get(index.sample(rng)),
        }
    }
}

/// Generate `config.transaction_count()` fee records over `members`.
///
/// Output is a pure function of the random source, the inputs and `now`:
/// re-seeding `rng` identically reproduces the same records. Records are
/// returned in emission order and have been verified against the ordering
/// rules before returning.
///
/// # Errors
///
/// Returns [`GenerationError`] if:
/// - Transactions are requested with no members
/// - A member is duplicated or was created after `now`
/// - The weights or fee range are unusable
/// - The floor cannot be computed or lies after `now`
/// - The output fails verification
///
/// # Example
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use fee_timeline::{MemberAnchor, TimelineConfig, generate_fee_history};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single().expect("valid now");
/// let members = vec![
///     MemberAnchor::new(1_i64, now - Duration::days(900)),
///     MemberAnchor::new(2_i64, now - Duration::days(30)),
/// ];
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
///
/// let fees = generate_fee_history(&mut rng, &members, &TimelineConfig::new(50), now)
///     .expect("generation succeeds");
/// assert_eq!(fees.len(), 50);
/// assert!(fees.iter().all(|fee| fee.created_at < now));
/// ```
pub fn generate_fee_history<K, R>(
    rng: &mut R,
    members: &[MemberAnchor<K>],
    config: &TimelineConfig,
    now: DateTime<Utc>,
) -> Result<Vec<FeeRecord<K>>, GenerationError>
where
    K: Eq + Hash + Clone,
    R: Rng + ?Sized,
{
    let transaction_count = config.transaction_count();
    if transaction_count == 0 {
        return Ok(Vec::new());
    }
    if members.is_empty() {
        return Err(GenerationError::NoMembers { transaction_count });
    }
    if u32::try_from(transaction_count).is_err() {
        return Err(GenerationError::TooManyTransactions {
            count: transaction_count,
            max: u32::MAX,
        });
    }

    let fee_range = config.fee_range();
    let picker = Picker::build(config.selection(), members.len())?;
    let floor = config.floor().resolve(now)?;
    let mut cursors = initial_cursors(members, floor, now)?;
    let mut records = Vec::with_capacity(transaction_count);

    for _ in 0..transaction_count {
        let member = picker
            .pick(rng, members)
            .ok_or(GenerationError::NoMembers { transaction_count })?;
        let cursor = cursors
            .get_mut(&member.key)
            .ok_or(GenerationError::NoMembers { transaction_count })?;

        let gap = TimeDelta::seconds(i64::from(rng.random_range(0..=config.max_gap_seconds())));
        cursor.advance(gap, now);
        cursor.last_sequence = cursor.last_sequence.saturating_add(1);

        records.push(FeeRecord {
            member: member.key.clone(),
            sequence_type: cursor.last_sequence,
            fee: rng.random_range(fee_range.min()..fee_range.max()),
            created_at: cursor.at,
        });
    }

    verify_timeline(members, &records, now)?;
    Ok(records)
}

fn initial_cursors<K>(
    members: &[MemberAnchor<K>],
    floor: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<HashMap<K, MemberCursor>, GenerationError>
where
    K: Eq + Hash + Clone,
{
    let mut cursors = HashMap::with_capacity(members.len());
    for (index, member) in members.iter().enumerate() {
        if member.created_at > now {
            return Err(GenerationError::MemberCreatedInFuture {
                index,
                created_at: member.created_at,
                now,
            });
        }
        let start = member.created_at.max(floor);
        if cursors
            .insert(member.key.clone(), MemberCursor::starting_at(start))
            .is_some()
        {
            return Err(GenerationError::DuplicateMember { index });
        }
    }
    Ok(cursors)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::config::{FeeRange, HistoryFloor};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
            .single()
            .expect("valid now")
    }

    fn members(now: DateTime<Utc>) -> Vec<MemberAnchor<u32>> {
        vec![
            MemberAnchor::new(1, now - Duration::days(2000)),
            MemberAnchor::new(2, now - Duration::days(400)),
            MemberAnchor::new(3, now - Duration::days(3)),
        ]
    }

    fn generate(
        seed: u64,
        config: &TimelineConfig,
        now: DateTime<Utc>,
    ) -> Result<Vec<FeeRecord<u32>>, GenerationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate_fee_history(&mut rng, &members(now), config, now)
    }

    #[rstest]
    fn zero_transactions_produce_nothing(now: DateTime<Utc>) {
        let records = generate(1, &TimelineConfig::new(0), now).expect("generation succeeds");
        assert!(records.is_empty());
    }

    #[rstest]
    fn zero_transactions_without_members_is_fine(now: DateTime<Utc>) {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let members: Vec<MemberAnchor<u32>> = Vec::new();
        let records = generate_fee_history(&mut rng, &members, &TimelineConfig::new(0), now)
            .expect("generation succeeds");
        assert!(records.is_empty());
    }

    #[rstest]
    fn transactions_without_members_are_rejected(now: DateTime<Utc>) {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let members: Vec<MemberAnchor<u32>> = Vec::new();
        let result = generate_fee_history(&mut rng, &members, &TimelineConfig::new(5), now);
        assert_eq!(
            result,
            Err(GenerationError::NoMembers {
                transaction_count: 5
            })
        );
    }

    #[rstest]
    fn generation_is_deterministic(now: DateTime<Utc>) {
        let config = TimelineConfig::new(300);
        let first = generate(99, &config, now).expect("first run");
        let second = generate(99, &config, now).expect("second run");
        assert_eq!(first, second);
    }

    #[rstest]
    fn different_seeds_diverge(now: DateTime<Utc>) {
        let config = TimelineConfig::new(50);
        let first = generate(1, &config, now).expect("first run");
        let second = generate(2, &config, now).expect("second run");
        assert_ne!(first, second);
    }

    #[rstest]
    #[case(3)]
    #[case(17)]
    #[case(2024)]
    fn records_respect_floor_and_member_creation(#[case] seed: u64, now: DateTime<Utc>) {
        let floor = HistoryFloor::default().resolve(now).expect("floor resolves");
        let anchors = members(now);
        let records = generate(seed, &TimelineConfig::new(500), now).expect("generation succeeds");

        for record in &records {
            let member = anchors
                .iter()
                .find(|anchor| anchor.key == record.member)
                .expect("record belongs to a member");
            assert!(record.created_at >= member.created_at);
            assert!(record.created_at >= floor);
            assert!(record.created_at < now);
        }
    }

    #[rstest]
    fn late_member_starts_at_its_creation(now: DateTime<Utc>) {
        let created_at = now - Duration::hours(1);
        let anchors = vec![MemberAnchor::new("late", created_at)];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let records =
            generate_fee_history(&mut rng, &anchors, &TimelineConfig::new(40), now)
                .expect("generation succeeds");

        let first = records.first().expect("at least one record");
        assert!(first.created_at >= created_at);
        assert!(records.iter().all(|record| record.created_at < now));
    }

    #[rstest]
    fn cursor_holds_when_now_is_close(now: DateTime<Utc>) {
        // A member created one second ago cannot advance past `now`.
        let created_at = now - Duration::seconds(1);
        let anchors = vec![MemberAnchor::new(7_u8, created_at)];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let config = TimelineConfig::new(25).with_max_gap_seconds(3600);
        let records =
            generate_fee_history(&mut rng, &anchors, &config, now).expect("generation succeeds");

        assert!(records.iter().all(|record| record.created_at == created_at));
        let sequences: Vec<u32> = records.iter().map(|record| record.sequence_type).collect();
        let expected: Vec<u32> = (1..=25).collect();
        assert_eq!(sequences, expected);
    }

    #[rstest]
    fn zero_gap_keeps_timestamps_at_start(now: DateTime<Utc>) {
        let config = TimelineConfig::new(30).with_max_gap_seconds(0);
        let floor = HistoryFloor::default().resolve(now).expect("floor resolves");
        let anchors = members(now);
        let records = generate(8, &config, now).expect("generation succeeds");

        for record in &records {
            let member = anchors
                .iter()
                .find(|anchor| anchor.key == record.member)
                .expect("record belongs to a member");
            assert_eq!(record.created_at, member.created_at.max(floor));
        }
    }

    #[rstest]
    fn member_created_after_now_is_rejected(now: DateTime<Utc>) {
        let anchors = vec![
            MemberAnchor::new(1_u32, now - Duration::days(1)),
            MemberAnchor::new(2_u32, now + Duration::seconds(1)),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = generate_fee_history(&mut rng, &anchors, &TimelineConfig::new(3), now);
        assert!(matches!(
            result,
            Err(GenerationError::MemberCreatedInFuture { index: 1, .. })
        ));
    }

    #[rstest]
    fn member_created_at_now_gets_records_stamped_now(now: DateTime<Utc>) {
        let anchors = vec![MemberAnchor::new(1_u32, now)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let records = generate_fee_history(&mut rng, &anchors, &TimelineConfig::new(3), now)
            .expect("generation succeeds");

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|record| record.created_at == now));
        let sequences: Vec<u32> = records.iter().map(|record| record.sequence_type).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }

    #[rstest]
    fn fixed_floor_after_now_is_a_configuration_error(now: DateTime<Utc>) {
        let floor = now + Duration::days(30);
        let config = TimelineConfig::new(5).with_floor(HistoryFloor::Fixed(floor));
        assert_eq!(
            generate(1, &config, now),
            Err(GenerationError::FloorAfterNow { floor, now })
        );
    }

    #[rstest]
    fn duplicate_members_are_rejected(now: DateTime<Utc>) {
        let anchors = vec![
            MemberAnchor::new(1_u32, now - Duration::days(1)),
            MemberAnchor::new(1_u32, now - Duration::days(2)),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = generate_fee_history(&mut rng, &anchors, &TimelineConfig::new(3), now);
        assert_eq!(result, Err(GenerationError::DuplicateMember { index: 1 }));
    }

    #[rstest]
    fn fees_stay_within_configured_range(now: DateTime<Utc>) {
        let range = FeeRange::new(5.0, 6.0).expect("valid range");
        let config = TimelineConfig::new(200).with_fee_range(range);
        let records = generate(4, &config, now).expect("generation succeeds");
        assert!(
            records
                .iter()
                .all(|record| record.fee >= 5.0 && record.fee < 6.0)
        );
    }

    #[rstest]
    fn weighted_selection_skips_zero_weight_members(now: DateTime<Utc>) {
        let config = TimelineConfig::new(200)
            .with_selection(MemberSelection::Weighted(vec![0.0, 1.0, 0.0]));
        let records = generate(12, &config, now).expect("generation succeeds");
        assert!(records.iter().all(|record| record.member == 2));
    }

    #[rstest]
    #[case::wrong_length(vec![1.0, 1.0])]
    #[case::all_zero(vec![0.0, 0.0, 0.0])]
    #[case::negative(vec![1.0, -1.0, 1.0])]
    fn unusable_weights_are_rejected(#[case] weights: Vec<f64>, now: DateTime<Utc>) {
        let config = TimelineConfig::new(5).with_selection(MemberSelection::Weighted(weights));
        let result = generate(1, &config, now);
        assert!(matches!(result, Err(GenerationError::InvalidWeights { .. })));
    }

    #[rstest]
    fn sequence_numbers_count_up_per_member(now: DateTime<Utc>) {
        let records = generate(21, &TimelineConfig::new(400), now).expect("generation succeeds");
        let mut last: HashMap<u32, u32> = HashMap::new();
        for record in &records {
            let previous = last.insert(record.member, record.sequence_type).unwrap_or(0);
            assert_eq!(record.sequence_type, previous + 1);
        }
    }
}
