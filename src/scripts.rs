//! The five atomic Lua protocols (§4.3) and their tagged replies.
//!
//! Every script is evaluated server-side via `EVAL` against the four keys
//! derived by [`crate::keyspace::Keyspace`]. Each begins by compacting the
//! three sorted sets (removing ghosts whose deadline has passed) against the
//! store's own clock (`redis.call('TIME')`), never a client-supplied one.

use crate::error::{MultilockError, MultilockResult};

/// `KEYS[1]=exclusive KEYS[2]=exclusive_waiting KEYS[3]=shared KEYS[4]=shared_waiting`
/// `ARGV[1]=owner ARGV[2]=ttl_seconds`
pub const ACQUIRE_EXCLUSIVE: &str = r#"
local now = tonumber(redis.call('TIME')[1]) + tonumber(redis.call('TIME')[2]) / 1000000
redis.call('ZREMRANGEBYSCORE', KEYS[2], '-inf', now)
redis.call('ZREMRANGEBYSCORE', KEYS[3], '-inf', now)
redis.call('ZREMRANGEBYSCORE', KEYS[4], '-inf', now)

local owner = ARGV[1]
local ttl = tonumber(ARGV[2])
local deadline = now + ttl

local exclusive_present = redis.call('EXISTS', KEYS[1]) == 1
local shared_count = redis.call('ZCARD', KEYS[3])

local other_writer_waiting = false
local waiters = redis.call('ZRANGE', KEYS[2], 0, -1)
for _, member in ipairs(waiters) do
    if member ~= owner then
        other_writer_waiting = true
    end
end

if exclusive_present or shared_count > 0 or other_writer_waiting then
    redis.call('ZADD', KEYS[2], deadline, owner)
    return 'BLOCKED'
end

local ttl_ms = math.floor(ttl * 1000)
if ttl_ms < 1 then ttl_ms = 1 end
redis.call('SET', KEYS[1], owner, 'PX', ttl_ms)
redis.call('ZREM', KEYS[2], owner)
return 'OK'
"#;

/// `KEYS[1]=exclusive KEYS[2]=exclusive_waiting KEYS[3]=shared KEYS[4]=shared_waiting`
/// `ARGV[1]=owner ARGV[2]=ttl_seconds`
pub const ACQUIRE_SHARED: &str = r#"
local now = tonumber(redis.call('TIME')[1]) + tonumber(redis.call('TIME')[2]) / 1000000
redis.call('ZREMRANGEBYSCORE', KEYS[2], '-inf', now)
redis.call('ZREMRANGEBYSCORE', KEYS[3], '-inf', now)
redis.call('ZREMRANGEBYSCORE', KEYS[4], '-inf', now)

local owner = ARGV[1]
local ttl = tonumber(ARGV[2])
local deadline = now + ttl

local exclusive_present = redis.call('EXISTS', KEYS[1]) == 1
local writer_waiting = redis.call('ZCARD', KEYS[2]) > 0

if exclusive_present or writer_waiting then
    redis.call('ZADD', KEYS[4], deadline, owner)
    return 'BLOCKED'
end

redis.call('ZADD', KEYS[3], deadline, owner)
redis.call('ZREM', KEYS[4], owner)
return 'OK'
"#;

/// `KEYS[1]=exclusive KEYS[2]=exclusive_waiting KEYS[3]=shared KEYS[4]=shared_waiting`
/// `ARGV[1]=owner ARGV[2]=ttl_seconds`
pub const REFRESH: &str = r#"
local now = tonumber(redis.call('TIME')[1]) + tonumber(redis.call('TIME')[2]) / 1000000
redis.call('ZREMRANGEBYSCORE', KEYS[2], '-inf', now)
redis.call('ZREMRANGEBYSCORE', KEYS[3], '-inf', now)
redis.call('ZREMRANGEBYSCORE', KEYS[4], '-inf', now)

local owner = ARGV[1]
local ttl = tonumber(ARGV[2])
local deadline = now + ttl

if redis.call('GET', KEYS[1]) == owner then
    local ttl_ms = math.floor(ttl * 1000)
    if ttl_ms < 1 then ttl_ms = 1 end
    redis.call('PEXPIRE', KEYS[1], ttl_ms)
    return 'OK'
end

if redis.call('ZSCORE', KEYS[3], owner) then
    redis.call('ZADD', KEYS[3], deadline, owner)
    return 'OK'
end

return 'EXPIRED'
"#;

/// `KEYS[1]=exclusive KEYS[2]=exclusive_waiting KEYS[3]=shared KEYS[4]=shared_waiting`
/// `ARGV[1]=owner`
pub const RELEASE: &str = r#"
local now = tonumber(redis.call('TIME')[1]) + tonumber(redis.call('TIME')[2]) / 1000000
redis.call('ZREMRANGEBYSCORE', KEYS[2], '-inf', now)
redis.call('ZREMRANGEBYSCORE', KEYS[3], '-inf', now)
redis.call('ZREMRANGEBYSCORE', KEYS[4], '-inf', now)

local owner = ARGV[1]

if redis.call('GET', KEYS[1]) == owner then
    redis.call('DEL', KEYS[1])
else
    redis.call('ZREM', KEYS[3], owner)
    redis.call('ZREM', KEYS[4], owner)
    redis.call('ZREM', KEYS[2], owner)
end

return 'OK'
"#;

/// `KEYS[1]=exclusive KEYS[2]=exclusive_waiting KEYS[3]=shared KEYS[4]=shared_waiting`
pub const FLUSH: &str = r#"
for _, key in ipairs(KEYS) do
    redis.call('DEL', key)
end
return 'OK'
"#;

/// Tagged reply every atomic protocol returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptReply {
    /// The admission or mutation succeeded.
    Ok,
    /// The request was queued; the caller should retry.
    Blocked,
    /// `refresh` observed that the caller no longer holds the lock.
    Expired,
}

impl ScriptReply {
    /// Parse the string tag a script returns.
    pub fn parse(raw: &str) -> MultilockResult<Self> {
        match raw {
            "OK" => Ok(Self::Ok),
            "BLOCKED" => Ok(Self::Blocked),
            "EXPIRED" => Ok(Self::Expired),
            other => Err(MultilockError::UnexpectedReply(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tags() {
        assert_eq!(ScriptReply::parse("OK").unwrap(), ScriptReply::Ok);
        assert_eq!(ScriptReply::parse("BLOCKED").unwrap(), ScriptReply::Blocked);
        assert_eq!(ScriptReply::parse("EXPIRED").unwrap(), ScriptReply::Expired);
    }

    #[test]
    fn rejects_unknown_tags() {
        let err = ScriptReply::parse("WAT").unwrap_err();
        assert!(matches!(err, MultilockError::UnexpectedReply(tag) if tag == "WAT"));
    }
}
