//! # Retention Policy
//!
//! Boards are bounded: once a board holds more than [`MAX_THREADS`] threads,
//! exactly one thread is evicted, together with all of its comments. The
//! candidate is the thread with the fewest comments; ties go to the lowest id,
//! which is also the oldest thread. The thread whose insertion triggered the
//! eviction is exempt — stores pass only the established threads to
//! [`eviction_candidate`]. Capacity grows by at most one per insertion, so a
//! single eviction always restores the bound.

use crate::models::Thread;

/// Maximum number of threads a board retains.
pub const MAX_THREADS: usize = 100;

/// True when an eviction is due after an append.
pub fn over_capacity(len: usize) -> bool {
    len > MAX_THREADS
}

/// Index of the thread to evict: fewest comments first, lowest id on ties.
/// `None` only for an empty listing.
pub fn eviction_candidate(threads: &[Thread]) -> Option<usize> {
    threads
        .iter()
        .enumerate()
        .min_by_key(|(_, t)| (t.comments.len(), t.id))
        .map(|(i, _)| i)
}
