use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Allows at most one generation at a time
///
/// A trigger that finds the gate busy is dropped, not queued. The next
/// trigger rescans from scratch, so nothing is lost.
#[derive(Debug, Clone, Default)]
pub struct GenerationGate {
    busy: Arc<AtomicBool>,
}

/// Held for the duration of one generation; releases the gate on drop
#[derive(Debug)]
pub struct GenerationPermit {
    busy: Arc<AtomicBool>,
}

impl GenerationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a permit unless a generation is already in flight
    pub fn try_begin(&self) -> Option<GenerationPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GenerationPermit {
                busy: self.busy.clone(),
            })
    }
}

impl Drop for GenerationPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
