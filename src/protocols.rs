//! Wires the five atomic scripts (§4.3) to a [`Store`] and a [`Keyspace`].

use std::time::Duration;

use crate::error::MultilockResult;
use crate::keyspace::Keyspace;
use crate::scripts::{self, ScriptReply};
use crate::store::Store;

fn ttl_arg(ttl: Duration) -> String {
    ttl.as_secs_f64().to_string()
}

/// Attempt to acquire the exclusive (writer) lock for one script round-trip.
pub async fn acquire_exclusive(
    store: &dyn Store,
    ks: &Keyspace,
    owner: &str,
    ttl: Duration,
) -> MultilockResult<ScriptReply> {
    store
        .eval_script(
            scripts::ACQUIRE_EXCLUSIVE,
            &[&ks.exclusive, &ks.exclusive_waiting, &ks.shared, &ks.shared_waiting],
            &[owner.to_string(), ttl_arg(ttl)],
        )
        .await
}

/// Attempt to acquire a shared (reader) lock for one script round-trip.
pub async fn acquire_shared(
    store: &dyn Store,
    ks: &Keyspace,
    owner: &str,
    ttl: Duration,
) -> MultilockResult<ScriptReply> {
    store
        .eval_script(
            scripts::ACQUIRE_SHARED,
            &[&ks.exclusive, &ks.exclusive_waiting, &ks.shared, &ks.shared_waiting],
            &[owner.to_string(), ttl_arg(ttl)],
        )
        .await
}

/// Refresh an active grant's deadline. Returns [`ScriptReply::Expired`] if
/// `owner` holds neither the exclusive nor a shared grant.
pub async fn refresh(
    store: &dyn Store,
    ks: &Keyspace,
    owner: &str,
    ttl: Duration,
) -> MultilockResult<ScriptReply> {
    store
        .eval_script(
            scripts::REFRESH,
            &[&ks.exclusive, &ks.exclusive_waiting, &ks.shared, &ks.shared_waiting],
            &[owner.to_string(), ttl_arg(ttl)],
        )
        .await
}

/// Release whatever grant or queue entry `owner` holds. Always succeeds.
pub async fn release(store: &dyn Store, ks: &Keyspace, owner: &str) -> MultilockResult<ScriptReply> {
    store
        .eval_script(
            scripts::RELEASE,
            &[&ks.exclusive, &ks.exclusive_waiting, &ks.shared, &ks.shared_waiting],
            &[owner.to_string()],
        )
        .await
}

/// Administrative: delete all four keys for this lock name.
pub async fn flush(store: &dyn Store, ks: &Keyspace) -> MultilockResult<ScriptReply> {
    store
        .eval_script(
            scripts::FLUSH,
            &[&ks.exclusive, &ks.exclusive_waiting, &ks.shared, &ks.shared_waiting],
            &[],
        )
        .await
}
