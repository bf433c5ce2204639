use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Generates post ids from the creation timestamp in Unix milliseconds.
///
/// Ids are strictly increasing per generator: if the clock has not moved
/// past the last issued value, the next id is `last + 1`.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    last: AtomicI64,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis();
        let mut current = self.last.load(Ordering::Relaxed);

        loop {
            let candidate = millis.max(current + 1);
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate.to_string(),
                Err(actual) => current = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_id_is_millisecond_timestamp() {
        let ids = TimestampIdGenerator::new();
        let now = Utc.timestamp_millis_opt(1_704_067_200_123).unwrap();

        assert_eq!(ids.next_id(now), "1704067200123");
    }

    #[test]
    fn test_same_instant_yields_distinct_ids() {
        let ids = TimestampIdGenerator::new();
        let now = Utc.timestamp_millis_opt(1_704_067_200_000).unwrap();

        let first = ids.next_id(now);
        let second = ids.next_id(now);

        assert_eq!(first, "1704067200000");
        assert_eq!(second, "1704067200001");
    }

    #[test]
    fn test_clock_going_backwards_stays_monotonic() {
        let ids = TimestampIdGenerator::new();
        let later = Utc.timestamp_millis_opt(2_000).unwrap();
        let earlier = Utc.timestamp_millis_opt(1_000).unwrap();

        ids.next_id(later);
        assert_eq!(ids.next_id(earlier), "2001");
    }
}
