//! Cart line identity generation
//!
//! Injected wherever lines are created so tests can supply a deterministic
//! generator.

use shared::util::now_millis;

/// Capability for allocating cart line ids
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Default generator: UUID v4
#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Timestamp + random-suffix generator for environments without a UUID
/// source. 48 random bits per millisecond is collision-free at storefront
/// scale.
#[derive(Debug, Default)]
pub struct FallbackIdGenerator;

impl IdGenerator for FallbackIdGenerator {
    fn next_id(&self) -> String {
        use rand::Rng;
        let suffix: u64 = rand::thread_rng().gen_range(0..(1u64 << 48));
        format!("item_{}_{:012x}", now_millis(), suffix)
    }
}
