//! Seed a Postgres database with a reproducible member and fee history.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use fee_ledger::domain::{FeeHistorySeeder, SeedOverrides};
use fee_ledger::outbound::persistence::{
    DbPool, DieselBorrowFeeRepository, DieselMemberRepository, PoolConfig,
};
use fee_ledger::seeding::load_registry;
use mockable::DefaultClock;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `seed-fees` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-fees",
    about = "Generate a deterministic member and borrow fee history into Postgres",
    version
)]
struct CliArgs {
    /// Seed name from the registry.
    #[arg(long = "seed-name", value_name = "name", default_value = "amber-ledger")]
    seed_name: String,
    /// Path to the seed registry JSON file.
    #[arg(long = "registry", value_name = "path", default_value_os_t = default_registry_path())]
    registry_path: PathBuf,
    /// Override the registry's member count.
    #[arg(long = "member-count", value_name = "count")]
    member_count: Option<usize>,
    /// Override the registry's transaction count.
    #[arg(long = "transaction-count", value_name = "count")]
    transaction_count: Option<usize>,
    /// List the registry's seeds and exit without writing.
    #[arg(long = "list")]
    list: bool,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn default_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("fee-seeds")
        .join("seeds.json")
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let registry = load_registry(&args.registry_path)
        .map_err(|error| io::Error::other(format!("load seed registry: {error}")))?;

    if args.list {
        for seed in registry.seeds() {
            println!(
                "{} seed={} members={} transactions={}",
                seed.name(),
                seed.seed(),
                seed.member_count(),
                seed.transaction_count()
            );
        }
        return Ok(());
    }

    let database_url = resolve_database_url(args.database_url)?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let seeder = FeeHistorySeeder::new(
        Arc::new(DieselMemberRepository::new(pool.clone())),
        Arc::new(DieselBorrowFeeRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let overrides = SeedOverrides {
        member_count: args.member_count,
        transaction_count: args.transaction_count,
    };
    let outcome = seeder
        .seed_from_registry(&registry, &args.seed_name, overrides)
        .await
        .map_err(|error| io::Error::other(format!("seed fee history: {error}")))?;

    println!("seed_key={}", outcome.seed_key);
    println!("member_count={}", outcome.member_count);
    println!("transaction_count={}", outcome.transaction_count);
    Ok(())
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let from_env = env::var("DATABASE_URL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or DATABASE_URL",
        )
    })?;
    if from_env.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "DATABASE_URL must not be empty",
        ));
    }
    Ok(from_env)
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use clap::Parser;
    use rstest::rstest;

    use super::{CliArgs, default_registry_path, resolve_database_url};

    #[rstest]
    fn defaults_point_at_the_bundled_registry() {
        let args = CliArgs::try_parse_from(["seed-fees"]).expect("defaults parse");
        assert_eq!(args.seed_name, "amber-ledger");
        assert_eq!(args.registry_path, default_registry_path());
        assert!(args.member_count.is_none());
        assert!(!args.list);
    }

    #[rstest]
    fn count_overrides_parse() {
        let args = CliArgs::try_parse_from([
            "seed-fees",
            "--seed-name",
            "quiet-branch",
            "--member-count",
            "3",
            "--transaction-count",
            "30",
        ])
        .expect("overrides parse");
        assert_eq!(args.seed_name, "quiet-branch");
        assert_eq!(args.member_count, Some(3));
        assert_eq!(args.transaction_count, Some(30));
    }

    #[rstest]
    fn negative_counts_are_rejected() {
        assert!(CliArgs::try_parse_from(["seed-fees", "--member-count", "-1"]).is_err());
    }

    #[rstest]
    fn resolve_database_url_rejects_empty_explicit() {
        let error = resolve_database_url(Some("   ".to_owned())).expect_err("empty should fail");
        assert_eq!(error.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[rstest]
    fn resolve_database_url_prefers_explicit() {
        let url = resolve_database_url(Some("postgres://localhost/ledger".to_owned()))
            .expect("explicit url");
        assert_eq!(url, "postgres://localhost/ledger");
    }
}
