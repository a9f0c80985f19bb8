pub mod ttl;

pub use ttl::CacheKey;
pub use ttl::TtlCache;
