//! Reproducible member and fee datasets built from a named seed.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::TimelineConfig;
use crate::error::GenerationError;
use crate::members::{MemberSeed, generate_members};
use crate::registry::SeedDefinition;
use crate::timeline::{FeeRecord, MemberAnchor, generate_fee_history};

/// Members plus their fees; each fee's `member` indexes into `members`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeededDataset {
    /// Generated members.
    pub members: Vec<MemberSeed>,
    /// Generated fees keyed by position in `members`.
    pub fees: Vec<FeeRecord<usize>>,
}

impl SeededDataset {
    /// Fees belonging to the member at `index`, in sequence order.
    pub fn fees_for(&self, index: usize) -> impl Iterator<Item = &FeeRecord<usize>> {
        self.fees.iter().filter(move |fee| fee.member == index)
    }
}

/// Generate the dataset described by `seed_def` relative to `now`.
///
/// Members and fees share one `ChaCha8Rng` seeded from the definition, so the
/// same definition and `now` always yield the same dataset.
///
/// # Errors
///
/// Returns [`GenerationError`] when member or fee generation fails.
pub fn generate_dataset(
    seed_def: &SeedDefinition,
    now: DateTime<Utc>,
) -> Result<SeededDataset, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let members = generate_members(&mut rng, seed_def.member_count(), now)?;
    let anchors: Vec<MemberAnchor<usize>> = members
        .iter()
        .enumerate()
        .map(|(index, member)| MemberAnchor::new(index, member.created_at))
        .collect();
    let config = TimelineConfig::new(seed_def.transaction_count());
    let fees = generate_fee_history(&mut rng, &anchors, &config, now)?;

    Ok(SeededDataset { members, fees })
}
