//! Fee history seeding.
//!
//! Turns a named seed from the `fee-timeline` registry into stored members
//! and borrow fees. Generation is deterministic for a seed and clock reading.
//! Each member's fees are written in one atomic insert.

use std::sync::Arc;

use fee_timeline::{
    FeeRecord, GenerationError, MemberSeed, RegistryError, SeedDefinition, SeedRegistry,
    generate_dataset,
};
use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::ports::{
    BorrowFeeRepository, BorrowFeeRepositoryError, MemberRepository, MemberRepositoryError,
};
use crate::domain::{
    BorrowFeeValidationError, FeeAmount, MemberId, MemberValidationError, NewBorrowFee, NewMember,
    SequenceType, Username,
};

/// Optional overrides for the counts stored in a registry seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOverrides {
    /// Replacement member count.
    pub member_count: Option<usize>,
    /// Replacement transaction count.
    pub transaction_count: Option<usize>,
}

/// Summary of a completed seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSeedOutcome {
    /// Registry seed name.
    pub seed_key: String,
    /// Members stored.
    pub member_count: usize,
    /// Fees stored.
    pub transaction_count: usize,
}

/// Errors raised while generating or storing a fee history.
#[derive(Debug, Error)]
pub enum FeeSeedingError {
    /// Seed registry lookup failed.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Timeline generation failed or broke an ordering invariant.
    #[error("fee history generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// A generated member was rejected by domain validation.
    #[error("generated member failed validation: {0}")]
    InvalidMember(#[from] MemberValidationError),
    /// A generated fee was rejected by domain validation.
    #[error("generated fee failed validation: {0}")]
    InvalidFee(#[from] BorrowFeeValidationError),
    /// A fee referenced a member index outside the generated set.
    #[error("generated fee references unknown member index {index}")]
    DanglingMember {
        /// Offending member index.
        index: usize,
    },
    /// Member persistence failed.
    #[error("member persistence error: {0}")]
    MemberPersistence(#[from] MemberRepositoryError),
    /// Fee persistence failed.
    #[error("fee persistence error: {0}")]
    FeePersistence(#[from] BorrowFeeRepositoryError),
}

/// Service that generates and stores a reproducible fee history.
#[derive(Clone)]
pub struct FeeHistorySeeder<M, F> {
    members: Arc<M>,
    fees: Arc<F>,
    clock: Arc<dyn Clock>,
}

impl<M, F> FeeHistorySeeder<M, F> {
    /// Create a seeder writing through the given repositories.
    pub fn new(members: Arc<M>, fees: Arc<F>, clock: Arc<dyn Clock>) -> Self {
        Self {
            members,
            fees,
            clock,
        }
    }
}

impl<M, F> FeeHistorySeeder<M, F>
where
    M: MemberRepository,
    F: BorrowFeeRepository,
{
    /// Seed the history named `seed_name` in `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`FeeSeedingError`] if lookup, generation, validation or
    /// persistence fails. Members stored before a failure are kept.
    pub async fn seed_from_registry(
        &self,
        registry: &SeedRegistry,
        seed_name: &str,
        overrides: SeedOverrides,
    ) -> Result<FeeSeedOutcome, FeeSeedingError> {
        let base = registry.find_seed(seed_name)?;
        let seed_def = SeedDefinition::new(
            base.name().to_owned(),
            base.seed(),
            overrides.member_count.unwrap_or(base.member_count()),
            overrides.transaction_count.unwrap_or(base.transaction_count()),
        );
        self.seed(&seed_def).await
    }

    /// Generate and store the history described by `seed_def`.
    ///
    /// # Errors
    ///
    /// See [`Self::seed_from_registry`].
    pub async fn seed(&self, seed_def: &SeedDefinition) -> Result<FeeSeedOutcome, FeeSeedingError> {
        let now = self.clock.utc();
        let dataset = generate_dataset(seed_def, now)?;
        debug!(
            seed_key = seed_def.name(),
            members = dataset.members.len(),
            transactions = dataset.fees.len(),
            "fee history generated"
        );

        let mut member_ids = Vec::with_capacity(dataset.members.len());
        for seed in &dataset.members {
            member_ids.push(self.store_member(seed).await?);
        }

        let mut stored_fees = 0;
        for (index, member_id) in member_ids.iter().enumerate() {
            let fees = dataset
                .fees_for(index)
                .map(|record| to_new_fee(record, &member_ids))
                .collect::<Result<Vec<_>, _>>()?;
            if fees.is_empty() {
                continue;
            }
            let inserted = self.fees.insert_fees(&fees).await?;
            debug!(member_id = member_id.get(), fees = inserted.len(), "member fees stored");
            stored_fees += inserted.len();
        }

        let outcome = FeeSeedOutcome {
            seed_key: seed_def.name().to_owned(),
            member_count: member_ids.len(),
            transaction_count: stored_fees,
        };
        info!(
            seed_key = %outcome.seed_key,
            member_count = outcome.member_count,
            transaction_count = outcome.transaction_count,
            "fee history seeded"
        );
        Ok(outcome)
    }

    async fn store_member(&self, seed: &MemberSeed) -> Result<MemberId, FeeSeedingError> {
        let new_member = NewMember {
            username: Username::new(seed.username.as_str())?,
            created_at: seed.created_at,
        };
        let member = self.members.create(&new_member).await?;
        Ok(member.id())
    }
}

fn to_new_fee(
    record: &FeeRecord<usize>,
    member_ids: &[MemberId],
) -> Result<NewBorrowFee, FeeSeedingError> {
    let member_id = member_ids
        .get(record.member)
        .copied()
        .ok_or(FeeSeedingError::DanglingMember {
            index: record.member,
        })?;
    Ok(NewBorrowFee {
        member_id,
        sequence_type: SequenceType::new(record.sequence_type)?,
        fee: FeeAmount::new(record.fee)?,
        created_at: record.created_at,
    })
}
