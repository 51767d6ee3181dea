use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out a fixed number of request slots across workers.
#[derive(Debug)]
pub(super) struct RequestLimiter {
    limit: u64,
    counter: AtomicU64,
}

impl RequestLimiter {
    pub(super) const fn new(limit: u64) -> Self {
        Self {
            limit,
            counter: AtomicU64::new(0),
        }
    }

    /// Claims one slot. Returns `false` once the limit is exhausted.
    pub(super) fn try_reserve(&self) -> bool {
        loop {
            let current = self.counter.load(Ordering::Relaxed);
            if current >= self.limit {
                return false;
            }
            let Some(next) = current.checked_add(1) else {
                return false;
            };
            if self
                .counter
                .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                return true;
            }
        }
    }

    pub(super) fn reserved(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}
