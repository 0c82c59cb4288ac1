//! Time-boxed memo of past verdicts, keyed by the raw address string.
//!
//! The validator only sees the [`ResultMemo`] trait. [`InMemoryMemo`] is the
//! default store: bounded, least-recently-used eviction, expired entries
//! swept before anything live is evicted.

use crate::core::models::MemoEntry;
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// A store of memoized verdicts together with the clock used to age them.
///
/// The store owns the freshness window: [`ResultMemo::ttl`] is the only TTL
/// callers consult.
pub trait ResultMemo: Send + Sync {
    fn get(&self, address: &str) -> Option<MemoEntry>;
    /// Inserts or overwrites the entry for `address`.
    fn put(&self, address: &str, entry: MemoEntry);
    fn now(&self) -> DateTime<Utc>;
    /// How long an entry stays fresh after `observed_at`.
    fn ttl(&self) -> TimeDelta;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += TimeDelta::from_std(by).unwrap_or(TimeDelta::MAX);
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Converts a std duration into a chrono delta, saturating on overflow.
fn to_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}

/// True if an entry observed at `observed_at` is still fresh at `now`.
pub(crate) fn is_fresh(observed_at: DateTime<Utc>, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
    now.signed_duration_since(observed_at) < ttl
}

struct Slot {
    entry: MemoEntry,
    last_used: u64,
}

struct Inner {
    slots: HashMap<String, Slot>,
    tick: u64,
}

impl Inner {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

/// Bounded in-process memo.
pub struct InMemoryMemo {
    inner: Mutex<Inner>,
    capacity: usize,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl InMemoryMemo {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::with_clock(capacity, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                slots: HashMap::new(),
                tick: 0,
            }),
            capacity: capacity.max(1),
            ttl: to_delta(ttl),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut inner = self.inner.lock();
        Self::sweep_locked(&mut inner, now, self.ttl)
    }

    fn sweep_locked(inner: &mut Inner, now: DateTime<Utc>, ttl: TimeDelta) -> usize {
        let before = inner.slots.len();
        inner
            .slots
            .retain(|_, slot| is_fresh(slot.entry.observed_at, now, ttl));
        before - inner.slots.len()
    }
}

impl ResultMemo for InMemoryMemo {
    fn get(&self, address: &str) -> Option<MemoEntry> {
        let mut inner = self.inner.lock();
        let tick = inner.next_tick();
        inner.slots.get_mut(address).map(|slot| {
            slot.last_used = tick;
            slot.entry.clone()
        })
    }

    fn put(&self, address: &str, entry: MemoEntry) {
        let now = self.clock.now();
        let mut inner = self.inner.lock();

        if !inner.slots.contains_key(address) && inner.slots.len() >= self.capacity {
            let swept = Self::sweep_locked(&mut inner, now, self.ttl);
            if swept > 0 {
                tracing::debug!(target: "memo", "Swept {} expired entries", swept);
            }
            if inner.slots.len() >= self.capacity {
                let victim = inner
                    .slots
                    .iter()
                    .min_by_key(|(_, slot)| slot.last_used)
                    .map(|(key, _)| key.clone());
                if let Some(victim) = victim {
                    tracing::debug!(target: "memo", "Evicting least recently used entry {}", victim);
                    inner.slots.remove(&victim);
                }
            }
        }

        let last_used = inner.next_tick();
        inner
            .slots
            .insert(address.to_string(), Slot { entry, last_used });
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn ttl(&self) -> TimeDelta {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ValidationResult;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn entry(details: &str, observed_at: DateTime<Utc>) -> MemoEntry {
        MemoEntry {
            result: ValidationResult::invalid_format(details),
            observed_at,
        }
    }

    fn memo(capacity: usize) -> (InMemoryMemo, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start()));
        let memo = InMemoryMemo::with_clock(capacity, Duration::from_secs(3600), clock.clone());
        (memo, clock)
    }

    #[test]
    fn put_overwrites_existing_entry() {
        let (memo, _) = memo(4);
        memo.put("a@example.com", entry("first", start()));
        memo.put("a@example.com", entry("second", start()));
        assert_eq!(memo.len(), 1);
        assert_eq!(memo.get("a@example.com").unwrap().result.details, "second");
    }

    #[test]
    fn keys_are_case_sensitive() {
        let (memo, _) = memo(4);
        memo.put("A@example.com", entry("upper", start()));
        assert!(memo.get("a@example.com").is_none());
    }

    #[test]
    fn evicts_least_recently_used_when_full() {
        let (memo, _) = memo(2);
        memo.put("a", entry("a", start()));
        memo.put("b", entry("b", start()));
        assert!(memo.get("a").is_some());

        memo.put("c", entry("c", start()));
        assert_eq!(memo.len(), 2);
        assert!(memo.get("b").is_none());
        assert!(memo.get("a").is_some());
        assert!(memo.get("c").is_some());
    }

    #[test]
    fn expired_entries_are_swept_before_eviction() {
        let (memo, clock) = memo(2);
        memo.put("old", entry("old", start()));
        clock.advance(Duration::from_secs(1800));
        memo.put("recent", entry("recent", clock.now()));
        memo.get("old");

        clock.advance(Duration::from_secs(2400));
        memo.put("new", entry("new", clock.now()));

        assert!(memo.get("old").is_none());
        assert!(memo.get("recent").is_some());
        assert!(memo.get("new").is_some());
    }

    #[test]
    fn sweep_expired_reports_removed_count() {
        let (memo, clock) = memo(8);
        memo.put("a", entry("a", start()));
        memo.put("b", entry("b", start()));
        clock.advance(Duration::from_secs(3600));
        assert_eq!(memo.sweep_expired(), 2);
        assert!(memo.is_empty());
    }

    #[test]
    fn reports_configured_ttl() {
        let (memo, _) = memo(1);
        assert_eq!(memo.ttl(), TimeDelta::hours(1));
    }

    #[test]
    fn freshness_is_strictly_less_than_ttl() {
        let ttl = TimeDelta::hours(24);
        assert!(is_fresh(start(), start() + TimeDelta::hours(23), ttl));
        assert!(!is_fresh(start(), start() + TimeDelta::hours(24), ttl));
    }
}
