//! Index selection primitives behind the load-balancing strategies.

use crate::model::ServiceKey;
use dashmap::DashMap;
use rand::Rng;

/// Per-service round-robin cursors.
///
/// Cursors live in memory for the lifetime of the registry and are local to
/// the process, so rotation is fair per instance, not across a cluster. The
/// stored cursor is taken modulo the *current* candidate count, so editing a
/// service's endpoints shifts the rotation without ever indexing out of
/// bounds.
#[derive(Debug, Default)]
pub struct RoundRobinCursors {
    cursors: DashMap<ServiceKey, usize>,
}

impl RoundRobinCursors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next index in `[0, len)` and advance the cursor.
    ///
    /// `len` must be non-zero.
    pub fn next_index(&self, key: &ServiceKey, len: usize) -> usize {
        debug_assert!(len > 0, "round-robin over empty candidate set");
        let mut cursor = self.cursors.entry(key.clone()).or_insert(0);
        let index = *cursor % len;
        *cursor = (index + 1) % len;
        index
    }

    /// Forget a service's cursor so rotation restarts at the first candidate.
    pub fn reset(&self, key: &ServiceKey) {
        self.cursors.remove(key);
    }
}

/// Uniform index in `[0, len)`.
///
/// # Panics
///
/// Panics if `len` is zero.
pub(crate) fn random_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    rng.gen_range(0..len)
}

/// Index drawn proportionally to `weights`.
///
/// Draws a point in `[0, total)` and walks the list until the running sum
/// passes it; ties go to the earlier entry. An all-zero list degrades to a
/// uniform pick.
///
/// # Panics
///
/// Panics if `weights` is empty.
pub(crate) fn weighted_index<R: Rng + ?Sized>(rng: &mut R, weights: &[u32]) -> usize {
    let total: u64 = weights.iter().map(|w| u64::from(*w)).sum();
    if total == 0 {
        return random_index(rng, weights.len());
    }

    let point = rng.gen_range(0..total);
    let mut cumulative = 0u64;
    for (index, weight) in weights.iter().enumerate() {
        cumulative += u64::from(*weight);
        if point < cumulative {
            return index;
        }
    }

    // Unreachable while point < total
    0
}
