//! Synthetic member generation.
//!
//! Members get a generated username and a creation date at least one year
//! and just under six years in the past, so their histories usually reach
//! back past the default history floor.

use chrono::{DateTime, Days, Months, Utc};
use fake::Fake;
use fake::faker::internet::raw::Username;
use fake::locales::EN;
use rand::Rng;

use crate::error::GenerationError;

/// Maximum username length accepted by the member store.
pub const USERNAME_MAX: usize = 64;

const MAX_NAME_ATTEMPTS: usize = 100;
const MIN_AGE_YEARS: u32 = 1;
const MAX_AGE_YEARS: u32 = 5;
const MAX_EXTRA_MONTHS: u32 = 11;
const MAX_EXTRA_DAYS: u64 = 29;

/// A generated member, before the store assigns it an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSeed {
    /// Member username.
    pub username: String,
    /// When the member joined.
    pub created_at: DateTime<Utc>,
}

/// Returns `true` when `username` is non-blank and at most [`USERNAME_MAX`] characters.
///
/// # Examples
///
/// ```
/// use fee_timeline::is_valid_username;
///
/// assert!(is_valid_username("ada_l"));
/// assert!(!is_valid_username("   "));
/// ```
#[must_use]
pub fn is_valid_username(username: &str) -> bool {
    let trimmed = username.trim();
    !trimmed.is_empty() && trimmed == username && username.chars().count() <= USERNAME_MAX
}

/// Generate `count` members created before `now`.
///
/// # Errors
///
/// Returns [`GenerationError`] when a valid username cannot be produced or a
/// creation date falls outside chrono's range.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use fee_timeline::generate_members;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single().expect("valid now");
/// let mut rng = ChaCha8Rng::seed_from_u64(3);
/// let members = generate_members(&mut rng, 4, now).expect("generated");
///
/// assert_eq!(members.len(), 4);
/// assert!(members.iter().all(|member| member.created_at < now));
/// ```
pub fn generate_members<R>(
    rng: &mut R,
    count: usize,
    now: DateTime<Utc>,
) -> Result<Vec<MemberSeed>, GenerationError>
where
    R: Rng + ?Sized,
{
    let mut members = Vec::with_capacity(count);
    for _ in 0..count {
        let username = generate_username(rng)?;
        let created_at = generate_join_date(rng, now)?;
        members.push(MemberSeed {
            username,
            created_at,
        });
    }
    Ok(members)
}

fn generate_username<R>(rng: &mut R) -> Result<String, GenerationError>
where
    R: Rng + ?Sized,
{
    for _ in 0..MAX_NAME_ATTEMPTS {
        let candidate: String = Username(EN).fake_with_rng(rng);
        if is_valid_username(&candidate) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::UsernameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

fn generate_join_date<R>(rng: &mut R, now: DateTime<Utc>) -> Result<DateTime<Utc>, GenerationError>
where
    R: Rng + ?Sized,
{
    let years = rng.random_range(MIN_AGE_YEARS..=MAX_AGE_YEARS);
    let months = rng.random_range(0..=MAX_EXTRA_MONTHS);
    let days = rng.random_range(0..=MAX_EXTRA_DAYS);

    now.checked_sub_months(Months::new(years.saturating_mul(12).saturating_add(months)))
        .and_then(|date| date.checked_sub_days(Days::new(days)))
        .ok_or(GenerationError::TimestampOutOfRange {
            what: "member creation date",
        })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
            .single()
            .expect("valid now")
    }

    #[rstest]
    fn generates_requested_count(now: DateTime<Utc>) {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let members = generate_members(&mut rng, 25, now).expect("generated");
        assert_eq!(members.len(), 25);
    }

    #[rstest]
    fn usernames_are_valid(now: DateTime<Utc>) {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let members = generate_members(&mut rng, 50, now).expect("generated");
        for member in &members {
            assert!(
                is_valid_username(&member.username),
                "invalid username: {}",
                member.username
            );
        }
    }

    #[rstest]
    fn join_dates_fall_in_expected_window(now: DateTime<Utc>) {
        let earliest = Utc
            .with_ymd_and_hms(2018, 6, 1, 0, 0, 0)
            .single()
            .expect("valid bound");
        let latest = Utc
            .with_ymd_and_hms(2023, 6, 1, 0, 0, 0)
            .single()
            .expect("valid bound");
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let members = generate_members(&mut rng, 200, now).expect("generated");

        for member in &members {
            assert!(member.created_at <= latest, "{} too recent", member.created_at);
            assert!(member.created_at >= earliest, "{} too old", member.created_at);
        }
    }

    #[rstest]
    fn generation_is_deterministic(now: DateTime<Utc>) {
        let mut first_rng = ChaCha8Rng::seed_from_u64(9);
        let mut second_rng = ChaCha8Rng::seed_from_u64(9);
        let first = generate_members(&mut first_rng, 10, now).expect("generated");
        let second = generate_members(&mut second_rng, 10, now).expect("generated");
        assert_eq!(first, second);
    }

    #[rstest]
    #[case("ada", true)]
    #[case("", false)]
    #[case(" padded", false)]
    #[case("trailing ", false)]
    fn validates_usernames(#[case] username: &str, #[case] expected: bool) {
        assert_eq!(is_valid_username(username), expected);
    }

    #[test]
    fn rejects_overlong_usernames() {
        let long = "a".repeat(USERNAME_MAX + 1);
        assert!(!is_valid_username(&long));
        assert!(is_valid_username(&long[..USERNAME_MAX]));
    }
}
