//! Testing utilities: a submodule with settable behavior and a clock that
//! tests move by hand.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;

use primitive_types::H256;

use crate::{Clock, InterchainSecurityModule, IsmResult, ModuleType, OptimisticIsmError};

/// A verification submodule for tests.
///
/// Accepts every message by default; `set_accept(false)` makes it reject,
/// `set_fail(true)` makes its calls error.
#[derive(Debug)]
pub struct TestIsm {
    address: H256,
    accept: AtomicBool,
    fail: AtomicBool,
    calls: AtomicU64,
}

impl TestIsm {
    /// A test submodule at `address` that accepts every message.
    pub fn new(address: H256) -> Self {
        Self {
            address,
            accept: AtomicBool::new(true),
            fail: AtomicBool::new(false),
            calls: AtomicU64::new(0),
        }
    }

    /// Set whether messages should be accepted.
    pub fn set_accept(&self, accept: bool) {
        self.accept.store(accept, Ordering::SeqCst);
    }

    /// Make subsequent verify calls fail with an error.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of verify invocations made against this submodule.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InterchainSecurityModule for TestIsm {
    fn address(&self) -> H256 {
        self.address
    }

    fn module_type(&self) -> ModuleType {
        ModuleType::Unused
    }

    async fn verify(&self, _metadata: &[u8], _message: &[u8]) -> IsmResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(OptimisticIsmError::from_submodule_str("verify unavailable"));
        }
        Ok(self.accept.load(Ordering::SeqCst))
    }
}

/// A clock tests can move by hand.
#[derive(Debug, Default)]
pub struct ManualClock(AtomicU64);

impl ManualClock {
    /// A manual clock starting at `now`.
    pub fn new(now: u64) -> Self {
        Self(AtomicU64::new(now))
    }

    /// Advance the clock by `secs`.
    pub fn advance(&self, secs: u64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }

    /// Pin the clock to `now`.
    pub fn set(&self, now: u64) {
        self.0.store(now, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}
