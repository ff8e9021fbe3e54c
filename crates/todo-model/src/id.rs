// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque identifier source: `"{counter}_{unix_micros}"`.
///
/// The counter is atomic, so concurrent callers never observe the same value
/// within one generator. The timestamp keeps ids from colliding across runs,
/// where the counter starts over.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{n}_{}", unix_micros())
    }
}

fn unix_micros() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_micros())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn ids_have_counter_and_timestamp_parts() {
        let ids = IdGenerator::new();
        let first = ids.next_id();
        let (counter, micros) = first.split_once('_').expect("separator");
        assert_eq!(counter, "1");
        assert!(micros.parse::<u128>().expect("numeric timestamp") > 0);
        assert!(ids.next_id().starts_with("2_"));
    }

    #[test]
    fn concurrent_callers_get_distinct_ids() {
        let ids = Arc::new(IdGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();
        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().expect("join") {
                assert!(seen.insert(id), "duplicate id");
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
