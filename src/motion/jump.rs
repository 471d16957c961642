use crate::history::SampleWindow;
use tracing::{debug, trace};

/// Sliding-window jump detector over the vertical shoulder measure.
///
/// A jump shows up as a dip-and-recovery in image space: y grows downward,
/// so the window minimum is the visually topmost point of the motion (the
/// peak of the jump) and the maxima on either side of it are the take-off
/// and landing bottoms. The detection threshold scales with the subject's
/// shoulder distance so apparent body size does not change sensitivity.
#[derive(Debug)]
pub struct JumpDetector {
    window: SampleWindow,
    threshold_factor: f64,
}

impl JumpDetector {
    pub fn new(window_capacity: usize, threshold_factor: f64) -> Self {
        Self {
            window: SampleWindow::new(window_capacity),
            threshold_factor,
        }
    }

    /// Feed one vertical shoulder measure; `shoulder_dist` scales the
    /// detection threshold for this frame. Returns true when a complete
    /// dip-and-recovery sits in the window; the window is cleared on
    /// detection and retained otherwise.
    pub fn observe(&mut self, measure: f64, shoulder_dist: f64) -> bool {
        self.window.push(measure);
        let threshold = shoulder_dist * self.threshold_factor;
        let samples = self.window.as_slice();

        // Window minimum, first occurrence wins on ties.
        let mut peak_idx = 0;
        let mut peak = samples[0];
        for (idx, &sample) in samples.iter().enumerate().skip(1) {
            if sample < peak {
                peak = sample;
                peak_idx = idx;
            }
        }

        if peak_idx == 0 {
            // The take-off side of the dip is not in the window yet.
            return false;
        }

        let start_bottom = samples[..peak_idx]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let end_bottom = samples[peak_idx..]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        let start_delta = (peak - start_bottom).abs();
        let end_delta = (peak - end_bottom).abs();
        trace!(
            "Jump scan: peak {:.3} at {}, deltas {:.3}/{:.3}, threshold {:.3}",
            peak,
            peak_idx,
            start_delta,
            end_delta,
            threshold
        );

        if start_delta >= threshold && end_delta >= threshold {
            debug!(
                "Jump detected: deltas {:.3}/{:.3} over threshold {:.3}",
                start_delta, end_delta, threshold
            );
            self.window.clear();
            return true;
        }

        false
    }

    /// Current window contents, oldest first.
    pub fn window(&self) -> &[f64] {
        self.window.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Threshold large enough to never fire, used to preload the window.
    const QUIET_DIST: f64 = 1000.0;

    #[test]
    fn test_dip_and_recovery_detected() {
        let mut detector = JumpDetector::new(10, 2.0);

        // Preload so the scan sees the full history at once.
        for measure in [50.0, 48.0, 46.0, 10.0, 44.0, 49.0] {
            assert!(!detector.observe(measure, QUIET_DIST));
        }

        // shoulder_dist 5 makes the threshold 10; deltas are 40 and 42.
        assert!(detector.observe(52.0, 5.0));
        assert!(detector.window().is_empty());
    }

    #[test]
    fn test_slow_descent_not_detected() {
        let mut detector = JumpDetector::new(10, 2.0);

        for measure in [50.0, 49.0, 48.0, 47.0, 46.0] {
            assert!(!detector.observe(measure, 5.0));
        }
        // History is retained after a miss.
        assert_eq!(detector.window(), &[50.0, 49.0, 48.0, 47.0, 46.0]);
    }

    #[test]
    fn test_peak_at_window_start_is_no_jump() {
        let mut detector = JumpDetector::new(10, 2.0);
        assert!(!detector.observe(10.0, 0.001));
        assert!(!detector.observe(50.0, 0.001));
        assert_eq!(detector.window().len(), 2);
    }

    #[test]
    fn test_window_capacity_evicts_oldest() {
        let mut detector = JumpDetector::new(10, 2.0);
        for measure in 0..12 {
            detector.observe(100.0 + f64::from(measure), QUIET_DIST);
        }
        assert_eq!(detector.window().len(), 10);
        assert_eq!(detector.window()[0], 102.0);
    }

    #[test]
    fn test_recovery_side_must_clear_threshold() {
        let mut detector = JumpDetector::new(10, 2.0);
        // Deep dip with no recovery: end delta stays 0.
        assert!(!detector.observe(50.0, 5.0));
        assert!(!detector.observe(10.0, 5.0));
        assert_eq!(detector.window().len(), 2);
    }
}
