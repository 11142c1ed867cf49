//! The per-owner lock handle (§4.4): `Multilock`.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::config::RetryConfig;
use crate::error::{MultilockError, MultilockResult};
use crate::keyspace::Keyspace;
use crate::protocols;
use crate::scripts::ScriptReply;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AcquireMode {
    Exclusive,
    Shared,
}

/// A handle to a named reader/writer lock.
///
/// Mints a stable owner id on construction and carries no lock state beyond
/// that id and its retry policy, since all authoritative state lives in the
/// store. Cheap to clone (the store is behind an `Arc`), but each clone
/// shares the *same* owner id; spawn a fresh `Multilock::new` per logical
/// acquirer instead of cloning if independent identities are needed.
#[derive(Clone)]
pub struct Multilock {
    store: Arc<dyn Store>,
    name: String,
    keyspace: Keyspace,
    owner_id: String,
    retry: RetryConfig,
}

impl Multilock {
    /// Create a handle for lock name `name` against `store`, with the
    /// default retry policy (3 retries, 200ms delay).
    pub fn new(store: Arc<dyn Store>, name: impl Into<String>) -> Self {
        Self::with_retry(store, name, RetryConfig::default())
    }

    /// Create a handle with an explicit retry policy.
    pub fn with_retry(store: Arc<dyn Store>, name: impl Into<String>, retry: RetryConfig) -> Self {
        let name = name.into();
        let keyspace = Keyspace::new(&name);
        let owner_id = Uuid::new_v4().to_string();
        log::debug!("multilock: minted owner {owner_id} for {name:?}");
        Self {
            store,
            name,
            keyspace,
            owner_id,
            retry,
        }
    }

    /// This handle's stable owner id.
    pub fn id(&self) -> &str {
        &self.owner_id
    }

    /// Lock name this handle contends for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Acquire the exclusive (writer) lock, retrying on `BLOCKED` up to the
    /// configured retry budget.
    pub async fn acquire_exclusive(&self, ttl: Duration) -> MultilockResult<()> {
        self.acquire(ttl, AcquireMode::Exclusive).await
    }

    /// Acquire a shared (reader) lock, retrying on `BLOCKED` up to the
    /// configured retry budget.
    pub async fn acquire_shared(&self, ttl: Duration) -> MultilockResult<()> {
        self.acquire(ttl, AcquireMode::Shared).await
    }

    async fn acquire(&self, ttl: Duration, mode: AcquireMode) -> MultilockResult<()> {
        let retry_count = self.retry.resolved_retry_count();
        let retry_delay = self.retry.resolved_retry_delay();

        for attempt_number in 0..=retry_count {
            let reply = match mode {
                AcquireMode::Exclusive => {
                    protocols::acquire_exclusive(self.store.as_ref(), &self.keyspace, &self.owner_id, ttl)
                        .await?
                }
                AcquireMode::Shared => {
                    protocols::acquire_shared(self.store.as_ref(), &self.keyspace, &self.owner_id, ttl)
                        .await?
                }
            };

            match reply {
                ScriptReply::Ok => {
                    log::debug!(
                        "multilock: {} acquired {:?} on attempt {attempt_number}",
                        self.owner_id,
                        self.name
                    );
                    return Ok(());
                }
                ScriptReply::Blocked => {
                    log::debug!(
                        "multilock: {} blocked on {:?} (attempt {attempt_number}/{retry_count})",
                        self.owner_id,
                        self.name
                    );
                    if attempt_number < retry_count {
                        tokio::time::sleep(retry_delay).await;
                    }
                }
                ScriptReply::Expired => {
                    return Err(MultilockError::UnexpectedReply(
                        "acquire script returned EXPIRED".to_string(),
                    ));
                }
            }
        }

        // Retry budget exhausted: purge our entry from whichever waiting
        // set the last attempt queued us into.
        let _ = protocols::release(self.store.as_ref(), &self.keyspace, &self.owner_id).await;

        Err(MultilockError::CannotObtainLock {
            name: self.name.clone(),
        })
    }

    /// Refresh this handle's active grant, resetting its deadline to
    /// `server_now + ttl`. Fails with [`MultilockError::LockExpired`] if the
    /// handle no longer holds the lock.
    pub async fn refresh(&self, ttl: Duration) -> MultilockResult<()> {
        let reply = protocols::refresh(self.store.as_ref(), &self.keyspace, &self.owner_id, ttl).await?;
        match reply {
            ScriptReply::Ok => Ok(()),
            ScriptReply::Expired => Err(MultilockError::LockExpired {
                name: self.name.clone(),
            }),
            ScriptReply::Blocked => Err(MultilockError::UnexpectedReply(
                "refresh script returned BLOCKED".to_string(),
            )),
        }
    }

    /// Release whatever this handle holds or is queued for. A no-op if the
    /// handle holds nothing; never fails with a domain error.
    pub async fn release(&self) -> MultilockResult<()> {
        protocols::release(self.store.as_ref(), &self.keyspace, &self.owner_id).await?;
        Ok(())
    }

    /// Administrative: delete all four keys backing this lock name,
    /// releasing every holder and waiter unconditionally.
    pub async fn flush(&self) -> MultilockResult<()> {
        protocols::flush(self.store.as_ref(), &self.keyspace).await?;
        Ok(())
    }
}
