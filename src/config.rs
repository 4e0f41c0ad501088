use crate::ease::Ease;
use crate::error::{SidleError, SidleResult};

/// Timing constants for the overlay visit cycle. All values are seconds.
///
/// The `[min, max]` pairs are sampled uniformly once per use; `emerge_secs`
/// and `leave_secs` are fixed animation durations. Values are validated at
/// controller construction and immutable while a run is active.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CycleTimings {
    /// Wait before the very first visit.
    pub initial_wait_secs: [f64; 2],
    /// How long the overlay stays flush with its anchor edges.
    pub hold_secs: [f64; 2],
    /// Wait between the end of one visit and the start of the next.
    pub between_secs: [f64; 2],
    /// Duration of the slide-in animation.
    pub emerge_secs: f64,
    /// Duration of the slide-out animation.
    pub leave_secs: f64,
    /// Curve shared by the slide-in and slide-out animations.
    pub ease: Ease,
}

impl Default for CycleTimings {
    fn default() -> Self {
        Self {
            initial_wait_secs: [0.0, 5.0],
            hold_secs: [2.0, 10.0],
            between_secs: [0.0, 40.0],
            emerge_secs: 0.5,
            leave_secs: 1.0,
            ease: Ease::InOutSine,
        }
    }
}

impl CycleTimings {
    pub fn validate(&self) -> SidleResult<()> {
        for (name, [min, max]) in [
            ("initial_wait_secs", self.initial_wait_secs),
            ("hold_secs", self.hold_secs),
            ("between_secs", self.between_secs),
        ] {
            if !min.is_finite() || !max.is_finite() || min < 0.0 {
                return Err(SidleError::config(format!(
                    "{name} must be finite and non-negative"
                )));
            }
            if min > max {
                return Err(SidleError::config(format!("{name} min must be <= max")));
            }
        }
        for (name, secs) in [
            ("emerge_secs", self.emerge_secs),
            ("leave_secs", self.leave_secs),
        ] {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(SidleError::config(format!("{name} must be finite and > 0")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timings_validate() {
        CycleTimings::default().validate().unwrap();
    }

    #[test]
    fn inverted_range_is_rejected() {
        let timings = CycleTimings {
            hold_secs: [10.0, 2.0],
            ..Default::default()
        };
        assert!(timings.validate().is_err());
    }

    #[test]
    fn negative_wait_is_rejected() {
        let timings = CycleTimings {
            between_secs: [-1.0, 5.0],
            ..Default::default()
        };
        assert!(timings.validate().is_err());
    }

    #[test]
    fn zero_animation_duration_is_rejected() {
        let timings = CycleTimings {
            emerge_secs: 0.0,
            ..Default::default()
        };
        assert!(timings.validate().is_err());

        let timings = CycleTimings {
            leave_secs: f64::NAN,
            ..Default::default()
        };
        assert!(timings.validate().is_err());
    }
}
