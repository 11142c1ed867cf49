//! # multilock
//!
//! A distributed reader/writer lock service layered on Redis. Clients
//! across multiple processes or machines contend for named locks that
//! support two modes:
//!
//! - **exclusive** (writer): at most one holder at a time; no shared
//!   holders present.
//! - **shared** (reader): unbounded holders may coexist, provided no writer
//!   holds or is queued ahead of them.
//!
//! ## Architecture
//!
//! - [`keyspace`]: derives the four Redis keys backing a lock name.
//! - [`scripts`]: the five atomic Lua protocols and their tagged replies.
//! - [`store`]: the async boundary over Redis (`Store` trait, `RedisStore`).
//! - [`protocols`]: wires the scripts to a store and a keyspace.
//! - [`lock`]: `Multilock`, the per-owner handle and retry loop.
//! - [`config`]: retry policy.
//! - [`error`]: domain error types.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use multilock::{Multilock, RedisStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(RedisStore::connect("redis://localhost/").await?);
//! let lock = Multilock::new(store, "my-resource");
//!
//! lock.acquire_exclusive(Duration::from_secs(5)).await?;
//! lock.release().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod keyspace;
pub mod lock;
pub mod protocols;
pub mod scripts;
pub mod store;

pub use config::RetryConfig;
pub use error::{MultilockError, MultilockResult};
pub use keyspace::Keyspace;
pub use lock::Multilock;
pub use store::{RedisStore, Store};

/// Crate version, re-exported the way the rest of this codebase's binaries
/// report their own.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name, re-exported for the same reason.
pub const NAME: &str = env!("CARGO_PKG_NAME");
