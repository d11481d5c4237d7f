use chrono::{DateTime, Utc};

/// Issues time-derived record ids.
///
/// Ids are the creation time in milliseconds, bumped forward when two records
/// are created within the same millisecond so they never collide.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Starts after the highest id already in use.
    pub fn after<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self {
            last: existing.into_iter().max().unwrap_or(0),
        }
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last + 1);
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing_within_one_millisecond() {
        let now = Utc::now();
        let mut ids = IdGenerator::default();
        let first = ids.next_id(now);
        let second = ids.next_id(now);
        assert_eq!(first, now.timestamp_millis());
        assert_eq!(second, first + 1);
    }

    #[test]
    fn seeded_generator_skips_existing_ids() {
        let now = Utc::now();
        let future = now.timestamp_millis() + 10_000;
        let mut ids = IdGenerator::after([3, future, 7]);
        assert_eq!(ids.next_id(now), future + 1);
    }
}
