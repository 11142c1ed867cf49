//! Command-line front-end (§6): a thin dispatcher over [`crate::Multilock`].
//!
//! Not part of the core lock design, this module owns argument parsing,
//! connection setup, and process exit codes only.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::RetryConfig;
use crate::error::MultilockError;
use crate::lock::Multilock;
use crate::store::{RedisStore, Store};

/// Acquire, release, flush, and inspect distributed reader/writer locks.
#[derive(Parser, Debug)]
#[command(name = "multilock", author, version, about)]
pub struct Cli {
    /// Store connection URL.
    #[arg(short = 'r', long = "redis", default_value = "redis://localhost/")]
    pub redis: String,

    /// Print debug diagnostics.
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Shared arguments for `exclusive`/`shared` acquisition commands.
#[derive(Parser, Debug)]
pub struct AcquireArgs {
    /// Lock name.
    pub name: String,

    /// Lock time, in seconds.
    #[arg(short = 't', long, default_value_t = 1.0)]
    pub ttl: f64,

    /// Maximum number of `BLOCKED` replies to tolerate before giving up.
    #[arg(short = 'c', long)]
    pub retry_count: Option<u32>,

    /// Delay between retries, in seconds.
    #[arg(short = 'd', long)]
    pub retry_delay: Option<f64>,
}

impl AcquireArgs {
    fn ttl(&self) -> Duration {
        Duration::from_secs_f64(self.ttl)
    }

    fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            retry_count: self.retry_count,
            retry_delay: self.retry_delay.map(Duration::from_secs_f64),
        }
    }
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Acquire exclusive, sleep `ttl` seconds, then release.
    Exclusive(AcquireArgs),
    /// Acquire shared, sleep `ttl` seconds, then release.
    Shared(AcquireArgs),
    /// Delete all four keys for a lock name.
    Flush {
        /// Lock name.
        name: String,
    },
    /// Print the current holders and waiters for a lock name.
    Info {
        /// Lock name.
        name: String,
    },
}

/// Run the parsed CLI and return the process exit code.
pub async fn run(cli: Cli) -> anyhow::Result<i32> {
    log::debug!("cli: {cli:?}");

    let store = Arc::new(RedisStore::connect(&cli.redis).await?);
    log::debug!("cli: connected to {}", cli.redis);

    match cli.command {
        Command::Exclusive(args) => {
            let lock = Multilock::with_retry(store, args.name.clone(), args.retry_config());
            Ok(run_hold(lock, args.ttl(), true).await)
        }
        Command::Shared(args) => {
            let lock = Multilock::with_retry(store, args.name.clone(), args.retry_config());
            Ok(run_hold(lock, args.ttl(), false).await)
        }
        Command::Flush { name } => {
            let lock = Multilock::new(store, name);
            lock.flush().await?;
            Ok(0)
        }
        Command::Info { name } => {
            print_info(store.as_ref(), &name).await?;
            Ok(0)
        }
    }
}

async fn run_hold(lock: Multilock, ttl: Duration, exclusive: bool) -> i32 {
    let acquired = if exclusive {
        lock.acquire_exclusive(ttl).await
    } else {
        lock.acquire_shared(ttl).await
    };

    match acquired {
        Ok(()) => {
            tokio::time::sleep(ttl).await;
            if let Err(err) = lock.release().await {
                log::error!("cli: release failed: {err}");
            }
            0
        }
        Err(MultilockError::CannotObtainLock { name }) => {
            log::debug!("cli: failed to obtain lock {name:?}");
            1
        }
        Err(err) => {
            log::error!("cli: acquire failed: {err}");
            1
        }
    }
}

async fn print_info(store: &RedisStore, name: &str) -> anyhow::Result<()> {
    let ks = crate::keyspace::Keyspace::new(name);

    let exclusive = store.get_string(&ks.exclusive).await?;
    let exclusive_waiting = store.zrange(&ks.exclusive_waiting, 0, -1).await?;
    let shared = store.zrange(&ks.shared, 0, -1).await?;
    let shared_waiting = store.zrange(&ks.shared_waiting, 0, -1).await?;

    println!("exclusive: {exclusive:?}");
    println!("exclusive waiting: {exclusive_waiting:?}");
    println!("shared: {shared:?}");
    println!("shared waiting: {shared_waiting:?}");

    Ok(())
}
