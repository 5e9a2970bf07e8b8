use std::fmt::Debug;
use std::time::{SystemTime, UNIX_EPOCH};

use auto_impl::auto_impl;

/// A monotonically non-decreasing source of unix timestamps, shared by
/// every gate operation.
#[auto_impl(&, Box, Arc)]
pub trait Clock: Send + Sync + Debug {
    /// Current unix time in seconds.
    fn now(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}
