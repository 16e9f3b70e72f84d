// Time-bounded in-memory cache for upstream responses
mod ttl;

pub use ttl::{cache_key, TtlCache, DEFAULT_CACHE_TTL, DEFAULT_SWEEP_INTERVAL, MAX_CACHE_TTL};
