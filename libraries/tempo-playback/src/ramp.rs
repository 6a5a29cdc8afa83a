//! Speed ramp curve
//!
//! Maps track progress (0.0 to 1.0) onto a playback rate between the
//! configured start and max speeds:
//!
//! ```text
//! speed = start + (max - start) * progress^(1 / exponent)
//! ```
//!
//! Exponents below 1 make the ramp steep near the end of the track,
//! exponents above 1 make it steep near the start.

use crate::error::Result;
use crate::types::RampSettings;

/// Validated speed ramp curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRamp {
    start_speed: f64,
    max_speed: f64,
    /// Cached `1 / acceleration_exponent`
    curve_power: f64,
}

impl SpeedRamp {
    /// Build a ramp from settings, rejecting invalid ones
    pub fn new(settings: RampSettings) -> Result<Self> {
        settings.validate()?;

        Ok(Self {
            start_speed: settings.start_speed,
            max_speed: settings.max_speed,
            curve_power: 1.0 / settings.acceleration_exponent,
        })
    }

    /// Playback rate at the start of a track
    pub fn start_speed(&self) -> f64 {
        self.start_speed
    }

    /// Playback rate at the end of a track
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Playback rate for the given progress
    ///
    /// Progress is clamped into [0, 1]; NaN is treated as 0.
    #[inline]
    pub fn speed_at(&self, progress: f64) -> f64 {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };

        let range = self.max_speed - self.start_speed;
        let curve = progress.powf(self.curve_power);
        let raw = self.start_speed + range * curve;

        raw.clamp(self.start_speed, self.max_speed)
    }

    /// Clamp an arbitrary rate into the ramp's range
    pub fn clamp(&self, speed: f64) -> f64 {
        speed.clamp(self.start_speed, self.max_speed)
    }
}

impl Default for SpeedRamp {
    fn default() -> Self {
        let settings = RampSettings::default();
        Self {
            start_speed: settings.start_speed,
            max_speed: settings.max_speed,
            curve_power: 1.0 / settings.acceleration_exponent,
        }
    }
}

/// Fraction of the track elapsed, or `None` when the duration is unusable
pub fn progress(current_time: f64, duration: Option<f64>) -> Option<f64> {
    let duration = duration?;
    if !duration.is_finite() || duration <= 0.0 || !current_time.is_finite() {
        return None;
    }

    Some((current_time / duration).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(start: f64, max: f64, exponent: f64) -> SpeedRamp {
        SpeedRamp::new(RampSettings {
            start_speed: start,
            max_speed: max,
            acceleration_exponent: exponent,
        })
        .unwrap()
    }

    #[test]
    fn endpoints() {
        let ramp = SpeedRamp::default();
        assert_eq!(ramp.speed_at(0.0), 1.0);
        assert_eq!(ramp.speed_at(1.0), 2.0);
    }

    #[test]
    fn quarter_progress_with_default_curve() {
        // 0.25^(1/0.5) = 0.0625
        let ramp = SpeedRamp::default();
        assert!((ramp.speed_at(0.25) - 1.0625).abs() < 1e-12);
    }

    #[test]
    fn exponent_above_one_ramps_early() {
        let early = ramp(1.0, 2.0, 2.0);
        let late = ramp(1.0, 2.0, 0.5);

        // 0.25^0.5 = 0.5
        assert!((early.speed_at(0.25) - 1.5).abs() < 1e-12);
        assert!(early.speed_at(0.25) > late.speed_at(0.25));
    }

    #[test]
    fn exponent_below_one_ramps_late() {
        let late = ramp(1.0, 2.0, 0.5);
        let linear = ramp(1.0, 2.0, 1.0);

        // Most of the gain lands in the second half
        assert!((late.speed_at(0.5) - 1.25).abs() < 1e-12);
        assert!(late.speed_at(0.5) < linear.speed_at(0.5));
        assert!(late.speed_at(0.9) - late.speed_at(0.5) > late.speed_at(0.5) - 1.0);
    }

    #[test]
    fn linear_exponent() {
        let ramp = ramp(0.5, 1.5, 1.0);
        assert!((ramp.speed_at(0.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let ramp = SpeedRamp::default();
        assert_eq!(ramp.speed_at(-0.5), 1.0);
        assert_eq!(ramp.speed_at(1.7), 2.0);
        assert_eq!(ramp.speed_at(f64::NAN), 1.0);
    }

    #[test]
    fn flat_range_stays_at_start() {
        let ramp = ramp(1.25, 1.25, 0.5);
        assert_eq!(ramp.speed_at(0.0), 1.25);
        assert_eq!(ramp.speed_at(0.6), 1.25);
        assert_eq!(ramp.speed_at(1.0), 1.25);
    }

    #[test]
    fn invalid_settings_rejected() {
        let result = SpeedRamp::new(RampSettings {
            acceleration_exponent: 0.0,
            ..RampSettings::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn progress_requires_known_duration() {
        assert_eq!(progress(10.0, None), None);
        assert_eq!(progress(10.0, Some(0.0)), None);
        assert_eq!(progress(10.0, Some(f64::NAN)), None);
        assert_eq!(progress(10.0, Some(f64::INFINITY)), None);
        assert_eq!(progress(30.0, Some(120.0)), Some(0.25));
        assert_eq!(progress(130.0, Some(120.0)), Some(1.0));
    }
}
