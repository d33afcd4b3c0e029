//! Task identifier generation.
//!
//! # Invariants
//! - Ids are non-empty lowercase base36 strings.
//! - Ids from one generator are unique with overwhelming probability: a
//!   millisecond prefix plus 64 random bits.

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of fresh task ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Time-prefixed random id generator.
///
/// Format: `<epoch millis base36><random base36>`. Not globally unique, which
/// is acceptable for a single user's local store.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeRandomIdGenerator;

impl IdGenerator for TimeRandomIdGenerator {
    fn next_id(&mut self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis());
        // v4 UUIDs carry 122 random bits; the low 64 are all random.
        let random = Uuid::new_v4().as_u128() as u64;

        let mut id = to_base36(millis);
        id.push_str(&to_base36(u128::from(random)));
        id
    }
}

/// Deterministic generator yielding `<prefix>-1`, `<prefix>-2`, ...
///
/// Useful for reproducible fixtures and imports.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.iter().rev().map(|digit| char::from(*digit)).collect()
}
