//! Fixed-window moving-average filter.
//!
//! The sample history is a pre-allocated circular buffer of `N` slots with a
//! write cursor and a `filled` flag. Until the cursor wraps for the first
//! time only the first `cursor` slots hold samples; afterwards all `N` do.
//!
//! The mean is recomputed from the buffer on every push rather than kept as a
//! running sum, so a NaN sample affects the output only while it is inside the
//! window.

/// Circular sample history returning the mean of the last `N` samples.
#[derive(Clone, Debug)]
pub struct MovingAverage<const N: usize> {
    samples: [f32; N],
    cursor: usize,
    filled: bool,
}

impl<const N: usize> MovingAverage<N> {
    /// Create an empty filter.
    pub const fn new() -> Self {
        const { assert!(N > 0, "moving average window must not be empty") };
        Self {
            samples: [0.0; N],
            cursor: 0,
            filled: false,
        }
    }

    /// Store a sample and return the mean over the valid samples.
    pub fn push(
        &mut self,
        sample: f32,
    ) -> f32 {
        self.samples[self.cursor] = sample;
        self.cursor = (self.cursor + 1) % N;
        if self.cursor == 0 {
            self.filled = true;
        }

        let count = self.len();
        let sum: f32 = self.samples[..count].iter().sum();
        sum / count as f32
    }

    /// Number of valid samples (`cursor` until the first wrap, then `N`).
    #[inline]
    pub const fn len(&self) -> usize { if self.filled { N } else { self.cursor } }

    /// True before the first push.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.len() == 0 }

    /// Index the next sample will be written to.
    #[inline]
    pub const fn cursor(&self) -> usize { self.cursor }

    /// True once `N` samples have ever been written.
    #[inline]
    pub const fn is_filled(&self) -> bool { self.filled }

    /// Window size.
    #[inline]
    pub const fn capacity(&self) -> usize { N }
}

impl<const N: usize> Default for MovingAverage<N> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mean(values: &[f32]) -> f32 { values.iter().sum::<f32>() / values.len() as f32 }

    #[test]
    fn test_new_filter_is_empty() {
        let filter = MovingAverage::<4>::new();
        assert!(filter.is_empty());
        assert_eq!(filter.cursor(), 0);
        assert!(!filter.is_filled());
        assert_eq!(filter.capacity(), 4);
    }

    #[test]
    fn test_first_sample_is_its_own_mean() {
        let mut filter = MovingAverage::<4>::new();
        assert_eq!(filter.push(21.5), 21.5);
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_partial_window_averages_samples_so_far() {
        let mut filter = MovingAverage::<4>::new();
        filter.push(10.0);
        filter.push(20.0);
        assert_eq!(filter.push(30.0), 20.0);
        assert_eq!(filter.len(), 3);
        assert!(!filter.is_filled());
    }

    #[test]
    fn test_cursor_wraps_and_filled_sticks() {
        let mut filter = MovingAverage::<3>::new();
        for i in 0..3 {
            assert!(!filter.is_filled());
            filter.push(i as f32);
        }
        assert_eq!(filter.cursor(), 0);
        assert!(filter.is_filled());

        for i in 0..7 {
            filter.push(i as f32);
            assert!(filter.is_filled());
            assert_eq!(filter.len(), 3);
        }
        assert_eq!(filter.cursor(), 7 % 3);
    }

    #[test]
    fn test_full_window_averages_last_n() {
        let mut filter = MovingAverage::<4>::new();
        let inputs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        for (i, &value) in inputs.iter().enumerate() {
            let out = filter.push(value);
            let window = if i + 1 >= 4 { &inputs[i + 1 - 4..=i] } else { &inputs[..=i] };
            assert!((out - mean(window)).abs() < 1e-5, "push {i}: {out} != {}", mean(window));
        }
    }

    #[test]
    fn test_production_window_size() {
        let mut filter = MovingAverage::<{ crate::config::MOVING_AVG_WINDOW }>::new();
        for _ in 0..crate::config::MOVING_AVG_WINDOW {
            filter.push(0.0);
        }
        assert!(filter.is_filled());
        // One outlier moves the mean by value / N
        let out = filter.push(40.0);
        assert!((out - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_deterministic_for_same_inputs() {
        let inputs = [3.5, -1.25, 80.0, 22.0, 22.0, 19.5, 0.0];
        let mut a = MovingAverage::<5>::new();
        let mut b = MovingAverage::<5>::new();
        for value in inputs {
            assert_eq!(a.push(value).to_bits(), b.push(value).to_bits());
        }
    }

    #[test]
    fn test_nan_propagates_then_leaves_window() {
        let mut filter = MovingAverage::<2>::new();
        filter.push(1.0);
        assert!(filter.push(f32::NAN).is_nan());
        assert!(filter.push(3.0).is_nan());
        assert_eq!(filter.push(5.0), 4.0);
    }
}
