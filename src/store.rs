//! Store Adapter: the thin async boundary over Redis (§4.1).
//!
//! `eval_script` is the sole primitive the atomic protocols in
//! [`crate::protocols`] use; the remaining methods exist for the CLI's
//! `info` command, administrative introspection, and the ghost-compaction
//! property test. The adapter surfaces only transport errors, since domain
//! outcomes are encoded in the script's tagged reply.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::error::MultilockResult;
use crate::scripts::ScriptReply;

/// Async boundary over the primitives a reader/writer lock service needs
/// from its backing store.
#[async_trait]
pub trait Store: Send + Sync {
    /// `GET key`.
    async fn get_string(&self, key: &str) -> MultilockResult<Option<String>>;

    /// `DEL key`.
    async fn delete(&self, key: &str) -> MultilockResult<()>;

    /// `ZRANK key member`.
    async fn zrank(&self, key: &str, member: &str) -> MultilockResult<Option<u64>>;

    /// `ZRANGE key start stop`.
    async fn zrange(&self, key: &str, start: isize, stop: isize) -> MultilockResult<Vec<String>>;

    /// `ZCOUNT key min max`.
    async fn zcount_in_range(&self, key: &str, min: &str, max: &str) -> MultilockResult<u64>;

    /// Current server wall-clock time, in fractional seconds since the
    /// epoch, read from the store rather than the local process.
    async fn server_time(&self) -> MultilockResult<f64>;

    /// Evaluate one of the five atomic protocols server-side and parse its
    /// tagged reply. `keys` and `args` become Redis `KEYS`/`ARGV`.
    async fn eval_script(
        &self,
        script: &str,
        keys: &[&str],
        args: &[String],
    ) -> MultilockResult<ScriptReply>;
}

/// [`Store`] backed by a Redis `ConnectionManager`, mirroring the
/// connection-manager pattern the job queue and scheduler use elsewhere in
/// this codebase.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to `redis_url` and wrap the resulting connection manager.
    pub async fn connect(redis_url: &str) -> MultilockResult<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_tokio_connection_manager().await?;
        Ok(Self { conn })
    }

    /// Wrap an already-established connection manager.
    pub fn from_connection_manager(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn get_string(&self, key: &str) -> MultilockResult<Option<String>> {
        let value: Option<String> = self.conn.clone().get(key).await?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> MultilockResult<()> {
        let _: () = self.conn.clone().del(key).await?;
        Ok(())
    }

    async fn zrank(&self, key: &str, member: &str) -> MultilockResult<Option<u64>> {
        let rank: Option<u64> = self.conn.clone().zrank(key, member).await?;
        Ok(rank)
    }

    async fn zrange(&self, key: &str, start: isize, stop: isize) -> MultilockResult<Vec<String>> {
        let members: Vec<String> = self.conn.clone().zrange(key, start, stop).await?;
        Ok(members)
    }

    async fn zcount_in_range(&self, key: &str, min: &str, max: &str) -> MultilockResult<u64> {
        let count: u64 = redis::cmd("ZCOUNT")
            .arg(key)
            .arg(min)
            .arg(max)
            .query_async(&mut self.conn.clone())
            .await?;
        Ok(count)
    }

    async fn server_time(&self) -> MultilockResult<f64> {
        let (secs, micros): (i64, i64) = redis::cmd("TIME").query_async(&mut self.conn.clone()).await?;
        Ok(secs as f64 + (micros as f64) / 1_000_000.0)
    }

    async fn eval_script(
        &self,
        script: &str,
        keys: &[&str],
        args: &[String],
    ) -> MultilockResult<ScriptReply> {
        let mut cmd = redis::cmd("EVAL");
        cmd.arg(script).arg(keys.len());
        for key in keys {
            cmd.arg(*key);
        }
        for arg in args {
            cmd.arg(arg);
        }
        let raw: String = cmd.query_async(&mut self.conn.clone()).await?;
        ScriptReply::parse(&raw)
    }
}
