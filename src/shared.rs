//! State shared between the interrupt-driven tasks and the event loop.
//!
//! # Ownership
//!
//! | Field | Writer | Reader |
//! |-------|--------|--------|
//! | `unit_toggle_requested` | button task | event loop (clears) |
//! | `display_update_requested` | sample task, event loop | event loop (clears) |
//! | `measurement` | sample task | event loop |
//!
//! Each flag is a capacity-1 coalescing mailbox: setting an already set flag
//! is a no-op, and taking it clears it in the same atomic operation.
//!
//! The measurement is published inside a critical section before the display
//! flag is raised, so the event loop never sees a half-written snapshot.
//!
//! Every producer also signals `wake`, which is what the event loop awaits
//! while idle. A flag set between the loop's check and its wait leaves the
//! signal pending, so no wake-up is lost.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::acquisition::Measurement;

/// Flags, latest measurement and wake source for one firmware instance.
pub struct SharedState {
    unit_toggle_requested: AtomicBool,
    display_update_requested: AtomicBool,
    measurement: Mutex<CriticalSectionRawMutex, Cell<Measurement>>,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl SharedState {
    /// Create the shared state. `const` so it can live in a `static`.
    pub const fn new() -> Self {
        Self {
            unit_toggle_requested: AtomicBool::new(false),
            display_update_requested: AtomicBool::new(false),
            measurement: Mutex::new(Cell::new(Measurement::ZERO)),
            wake: Signal::new(),
        }
    }

    // =========================================================================
    // Producers
    // =========================================================================

    /// Ask the event loop to flip the display unit.
    pub fn request_unit_toggle(&self) {
        self.unit_toggle_requested.store(true, Ordering::Release);
        self.wake.signal(());
    }

    /// Ask the event loop to redraw the display.
    pub fn request_display_update(&self) {
        self.display_update_requested.store(true, Ordering::Release);
        self.wake.signal(());
    }

    /// Replace the latest measurement as one uninterruptible write.
    pub fn publish(
        &self,
        measurement: Measurement,
    ) {
        self.measurement.lock(|cell| cell.set(measurement));
    }

    // =========================================================================
    // Consumer (event loop)
    // =========================================================================

    /// Clear the unit-toggle flag, returning whether it was set.
    pub fn take_unit_toggle(&self) -> bool { self.unit_toggle_requested.swap(false, Ordering::AcqRel) }

    /// Clear the display-update flag, returning whether it was set.
    pub fn take_display_update(&self) -> bool { self.display_update_requested.swap(false, Ordering::AcqRel) }

    /// Whether either flag is set.
    pub fn has_pending(&self) -> bool {
        self.unit_toggle_requested.load(Ordering::Acquire) || self.display_update_requested.load(Ordering::Acquire)
    }

    /// Copy of the latest measurement.
    pub fn latest(&self) -> Measurement { self.measurement.lock(Cell::get) }

    /// Suspend until a producer raises a flag. Returns at once if one is already pending.
    pub async fn wait_for_event(&self) {
        if self.has_pending() {
            return;
        }
        self.wake.wait().await;
    }
}

impl Default for SharedState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
