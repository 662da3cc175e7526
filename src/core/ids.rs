//! Record identifier generation

use chrono::Utc;

/// Hands out identifiers derived from the wall clock in milliseconds.
///
/// Each id is strictly greater than the previous one from the same
/// generator, so several records created within one millisecond still get
/// distinct ids. Ids from two generators can collide.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Create a generator
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Next identifier
    pub fn next_id(&mut self) -> String {
        self.next_after(Utc::now().timestamp_millis())
    }

    fn next_after(&mut self, now_ms: i64) -> String {
        let id = now_ms.max(self.last + 1);
        self.last = id;
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut ids = IdGenerator::new();
        let a = ids.next_after(1_700_000_000_000);
        let b = ids.next_after(1_700_000_000_000);
        let c = ids.next_after(1_700_000_000_000);
        assert_eq!(a, "1700000000000");
        assert_eq!(b, "1700000000001");
        assert_eq!(c, "1700000000002");
    }

    #[test]
    fn test_clock_moving_backwards_still_increases() {
        let mut ids = IdGenerator::new();
        let first: i64 = ids.next_after(5_000).parse().unwrap();
        let second: i64 = ids.next_after(4_000).parse().unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_burst_of_real_ids_is_unique() {
        let mut ids = IdGenerator::new();
        let seen: HashSet<String> = (0..1_000).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 1_000);
    }
}
