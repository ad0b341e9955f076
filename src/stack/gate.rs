//! Admission gate guarding calls into a transport endpoint.
//!
//! Any number of packet-processing threads may hold an admission at once. The
//! owner of the endpoint closes the gate exactly once when tearing it down:
//! [Gate::close] refuses new admissions and then blocks until every admission
//! already granted has been released, after which the endpoint is no longer
//! touched through this gate.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, PoisonError};

/// High bit of the state word, set once closing has begun. The remaining bits
/// count admissions.
const CLOSING: usize = 1 << (usize::BITS - 1);

/// A closeable gate admitting concurrent entries.
pub struct Gate {
    state: AtomicUsize,
    /// Set by the last admission leaving while a close is pending.
    drained: Mutex<bool>,
    drained_cv: Condvar,
}

impl Gate {
    /// Creates an open gate with no admissions.
    pub fn new() -> Self {
        Self {
            state: AtomicUsize::new(0),
            drained: Mutex::new(false),
            drained_cv: Condvar::new(),
        }
    }

    /// Attempts to enter the gate. Returns `false` if the gate is closing or
    /// closed, in which case [Gate::leave] must NOT be called.
    pub fn enter(&self) -> bool {
        let prev = self.state.fetch_add(1, Ordering::Acquire);
        if prev & CLOSING != 0 {
            self.leave();
            return false;
        }

        true
    }

    /// Releases an admission previously granted by [Gate::enter].
    pub fn leave(&self) {
        let prev = self.state.fetch_sub(1, Ordering::Release);

        // Last admission out while a close is waiting.
        if prev == CLOSING | 1 {
            let mut drained = self.drained.lock().unwrap_or_else(PoisonError::into_inner);
            *drained = true;
            self.drained_cv.notify_all();
        }
    }

    /// Closes the gate, blocking until all outstanding admissions have left.
    ///
    /// Must only be called once per gate.
    pub fn close(&self) {
        let prev = self.state.fetch_or(CLOSING, Ordering::Acquire);
        debug_assert_eq!(prev & CLOSING, 0, "gate closed twice");

        if prev & !CLOSING == 0 {
            return;
        }

        let mut drained = self.drained.lock().unwrap_or_else(PoisonError::into_inner);
        while !*drained {
            drained = self
                .drained_cv
                .wait(drained)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Returns `true` once [Gate::close] has been called.
    pub fn is_closed(&self) -> bool {
        self.state.load(Ordering::Acquire) & CLOSING != 0
    }

    /// Number of admissions currently held.
    pub fn in_flight(&self) -> usize {
        self.state.load(Ordering::Acquire) & !CLOSING
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("closed", &self.is_closed())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

/// An admission that leaves its gate when dropped, so an endpoint that panics
/// mid-delivery cannot wedge a later [Gate::close].
#[derive(Debug)]
pub(crate) struct Admission<'a>(&'a Gate);

impl<'a> Admission<'a> {
    /// Enters `gate`, returning `None` if admission is denied.
    pub(crate) fn new(gate: &'a Gate) -> Option<Self> {
        gate.enter().then(|| Admission(gate))
    }
}

impl Drop for Admission<'_> {
    fn drop(&mut self) {
        self.0.leave();
    }
}
