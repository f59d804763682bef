//! Seed registry types and JSON parsing.
//!
//! A registry names RNG seeds together with the dataset size they produce, so
//! a dataset can be regenerated by name.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A registry of named dataset seeds.
///
/// # Example
///
/// ```
/// use fee_timeline::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{"name": "test", "seed": 42, "memberCount": 5, "transactionCount": 40}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the JSON is malformed, the version is
    /// unsupported, the seeds array is empty, or a seed name repeats.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let mut names = HashSet::with_capacity(raw.seeds.len());
        let mut seeds = Vec::with_capacity(raw.seeds.len());
        for s in raw.seeds {
            if !names.insert(s.name.clone()) {
                return Err(RegistryError::DuplicateSeedName { name: s.name });
            }
            seeds.push(SeedDefinition::new(
                s.name,
                s.seed,
                s.member_count,
                s.transaction_count,
            ));
        }

        Ok(Self {
            version: raw.version,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

/// A named seed and the dataset size it generates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    member_count: usize,
    transaction_count: usize,
}

impl SeedDefinition {
    /// Build a seed definition, e.g. to apply count overrides.
    #[must_use]
    pub const fn new(
        name: String,
        seed: u64,
        member_count: usize,
        transaction_count: usize,
    ) -> Self {
        Self {
            name,
            seed,
            member_count,
            transaction_count,
        }
    }

    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of members to generate.
    #[must_use]
    pub const fn member_count(&self) -> usize {
        self.member_count
    }

    /// Returns the number of borrow fees to generate.
    #[must_use]
    pub const fn transaction_count(&self) -> usize {
        self.transaction_count
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    seeds: Vec<RawSeedDefinition>,
}

/// Raw JSON representation of a seed definition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    member_count: usize,
    transaction_count: usize,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const VALID_JSON: &str = r#"{
        "version": 1,
        "seeds": [
            {"name": "amber-ledger", "seed": 2024, "memberCount": 1000, "transactionCount": 5000},
            {"name": "quiet-branch", "seed": 17, "memberCount": 4, "transactionCount": 0}
        ]
    }"#;

    #[test]
    fn parses_valid_registry() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");

        assert_eq!(registry.version(), 1);
        assert_eq!(registry.seeds().len(), 2);
    }

    #[test]
    fn finds_seed_by_name() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let seed = registry.find_seed("amber-ledger").expect("seed found");

        assert_eq!(seed.name(), "amber-ledger");
        assert_eq!(seed.seed(), 2024);
        assert_eq!(seed.member_count(), 1000);
        assert_eq!(seed.transaction_count(), 5000);
    }

    #[test]
    fn returns_error_for_unknown_seed() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let result = registry.find_seed("unknown");

        assert_eq!(
            result,
            Err(RegistryError::SeedNotFound {
                name: "unknown".to_owned()
            })
        );
    }

    #[rstest]
    #[case::malformed_json("not valid json")]
    #[case::missing_version(
        r#"{"seeds": [{"name": "a", "seed": 1, "memberCount": 1, "transactionCount": 1}]}"#
    )]
    #[case::missing_transaction_count(
        r#"{"version": 1, "seeds": [{"name": "a", "seed": 1, "memberCount": 1}]}"#
    )]
    fn rejects_json_with_parse_error(#[case] json: &str) {
        let result = SeedRegistry::from_json(json);
        assert!(matches!(result, Err(RegistryError::ParseError { .. })));
    }

    #[rstest]
    #[case::unsupported_version(
        r#"{"version": 99, "seeds": [{"name": "a", "seed": 1, "memberCount": 1, "transactionCount": 1}]}"#,
        RegistryError::UnsupportedVersion { expected: 1, actual: 99 }
    )]
    #[case::empty_seeds(r#"{"version": 1, "seeds": []}"#, RegistryError::EmptySeeds)]
    #[case::duplicate_name(
        r#"{"version": 1, "seeds": [
            {"name": "a", "seed": 1, "memberCount": 1, "transactionCount": 1},
            {"name": "a", "seed": 2, "memberCount": 1, "transactionCount": 1}
        ]}"#,
        RegistryError::DuplicateSeedName { name: "a".to_owned() }
    )]
    fn rejects_invalid_registry(#[case] json: &str, #[case] expected: RegistryError) {
        let result = SeedRegistry::from_json(json);
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn reports_missing_file() {
        let path = Path::new("/definitely/not/here/seeds.json");
        let result = SeedRegistry::from_file(path);
        assert!(matches!(result, Err(RegistryError::IoError { .. })));
    }
}
