//! Edge-triggered button debounce.
//!
//! The first falling edge is accepted immediately; the edge interrupt is then
//! disabled and a one-shot timer re-arms it after [`DEBOUNCE_MS`]. Contact
//! bounce during that window is never seen, so one physical press yields
//! exactly one logical press.
//!
//! A second real press within the quiet window is lost. This caps the press
//! rate at one per [`DEBOUNCE_MS`] and is accepted behaviour.
//!
//! Time is passed in as milliseconds since boot so the state machine runs on
//! the host as well as under the firmware timer.

use crate::config::DEBOUNCE_MS;

/// Debouncer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DebounceState {
    /// Edge interrupt enabled, waiting for a press.
    #[default]
    Armed,
    /// Press recorded, edge interrupt disabled until the re-arm deadline.
    Quiescing { rearm_at_ms: u64 },
}

/// Falling-edge debouncer with a fixed quiet period.
#[derive(Clone, Debug, Default)]
pub struct Debouncer {
    state: DebounceState,
}

impl Debouncer {
    /// Create an armed debouncer.
    pub const fn new() -> Self {
        Self {
            state: DebounceState::Armed,
        }
    }

    /// Handle a falling edge at `now_ms`.
    ///
    /// Returns `true` if this edge is a new press. The caller must then keep
    /// the edge interrupt disabled and call [`rearm`](Self::rearm) once the
    /// deadline from [`rearm_deadline`](Self::rearm_deadline) has passed.
    pub fn on_falling_edge(
        &mut self,
        now_ms: u64,
    ) -> bool {
        match self.state {
            DebounceState::Armed => {
                self.state = DebounceState::Quiescing {
                    rearm_at_ms: now_ms.saturating_add(DEBOUNCE_MS),
                };
                true
            }
            DebounceState::Quiescing { .. } => false,
        }
    }

    /// One-shot timer expiry: re-enable edge detection.
    pub fn rearm(&mut self) { self.state = DebounceState::Armed; }

    /// Fire the re-arm timer if its deadline has passed. Returns `true` if it fired.
    pub fn poll(
        &mut self,
        now_ms: u64,
    ) -> bool {
        match self.state {
            DebounceState::Quiescing { rearm_at_ms } if now_ms >= rearm_at_ms => {
                self.rearm();
                true
            }
            _ => false,
        }
    }

    /// When the pending re-arm is due, if any.
    pub const fn rearm_deadline(&self) -> Option<u64> {
        match self.state {
            DebounceState::Armed => None,
            DebounceState::Quiescing { rearm_at_ms } => Some(rearm_at_ms),
        }
    }

    /// Whether the edge interrupt should be enabled.
    #[inline]
    pub const fn is_armed(&self) -> bool { matches!(self.state, DebounceState::Armed) }

    #[inline]
    pub const fn state(&self) -> DebounceState { self.state }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed edges at the given times, firing the re-arm timer in between.
    fn presses(edges_ms: &[u64]) -> usize {
        let mut debouncer = Debouncer::new();
        let mut count = 0;
        for &t in edges_ms {
            debouncer.poll(t);
            if debouncer.on_falling_edge(t) {
                count += 1;
            }
        }
        count
    }

    #[test]
    fn test_starts_armed() {
        let debouncer = Debouncer::new();
        assert!(debouncer.is_armed());
        assert_eq!(debouncer.rearm_deadline(), None);
        assert_eq!(debouncer.state(), DebounceState::default());
    }

    #[test]
    fn test_single_edge_records_one_press() {
        let mut debouncer = Debouncer::new();
        assert!(debouncer.on_falling_edge(1_000));
        assert!(!debouncer.is_armed());
        assert_eq!(debouncer.rearm_deadline(), Some(1_200));
    }

    #[test]
    fn test_bounce_within_window_is_coalesced() {
        assert_eq!(presses(&[0, 3, 7, 50, 199]), 1);
    }

    #[test]
    fn test_edge_after_window_is_new_press() {
        assert_eq!(presses(&[0, 120, 200]), 2);
        assert_eq!(presses(&[0, 250]), 2);
    }

    #[test]
    fn test_fast_double_press_loses_second() {
        // Two deliberate presses 150 ms apart: second is inside the quiet window
        assert_eq!(presses(&[0, 150, 400]), 2);
    }

    #[test]
    fn test_poll_before_deadline_does_not_rearm() {
        let mut debouncer = Debouncer::new();
        debouncer.on_falling_edge(0);
        assert!(!debouncer.poll(199));
        assert!(!debouncer.is_armed());
        assert!(debouncer.poll(200));
        assert!(debouncer.is_armed());
        assert!(!debouncer.poll(500));
    }

    #[test]
    fn test_rearm_is_unconditional() {
        let mut debouncer = Debouncer::new();
        debouncer.on_falling_edge(0);
        debouncer.rearm();
        assert!(debouncer.on_falling_edge(10));
    }

    #[test]
    fn test_deadline_saturates() {
        let mut debouncer = Debouncer::new();
        debouncer.on_falling_edge(u64::MAX - 5);
        assert_eq!(debouncer.rearm_deadline(), Some(u64::MAX));
    }
}
