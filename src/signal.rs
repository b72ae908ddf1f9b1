//! # Signal Primitives
//!
//! Per-sample smoothing and arm-angle estimation. Both functions are pure and
//! run in constant time; the tracker calls them once per incoming sample.
//!
//! Smoothing uses an exponential moving average rather than the rolling
//! median of the original van Hees method. The EMA needs one `f32` of state
//! per axis instead of a sorted window, at the cost of slightly higher
//! sensitivity to outliers.

/// One exponential-moving-average step.
///
/// Returns `previous_average + eta * (new_value - previous_average)`. With
/// the default decay factor (0.005 at 10 Hz) the average has a time constant
/// of roughly 20 seconds.
pub fn ema(new_value: f32, previous_average: f32, eta: f32) -> f32 {
    previous_average + eta * (new_value - previous_average)
}

/// Anterior-posterior arm elevation angle in degrees.
///
/// `atan(z / sqrt(x² + y² ))` of the smoothed acceleration vector, the
/// posture proxy from van Hees et al. 2015. A vector resting flat on the
/// z axis yields ±90°, one in the x/y plane yields 0°.
///
/// When `x` and `y` are both zero the quotient degenerates: IEEE semantics
/// then give ±90° for nonzero `z` and NaN for the all-zero vector. The value
/// is passed through unmodified; downstream window arithmetic tolerates it.
pub fn arm_angle_deg(x: f32, y: f32, z: f32) -> f32 {
    (z / (x * x + y * y).sqrt()).atan().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_single_step() {
        let updated = ema(1.0, 0.0, 0.005);
        assert!((updated - 0.005).abs() < 1e-7);

        // general form: prev + eta * (x - prev)
        let updated = ema(3.0, 7.0, 0.25);
        assert!((updated - 6.0).abs() < 1e-6);
    }

    #[test]
    fn ema_converges_to_constant_input() {
        let mut avg = 0.0;
        for _ in 0..5000 {
            avg = ema(1.0, avg, 0.005);
        }
        assert!((avg - 1.0).abs() < 1e-3);
    }

    #[test]
    fn vertical_vector_is_ninety_degrees() {
        assert!((arm_angle_deg(0.0, 0.0, 1.0) - 90.0).abs() < 1e-3);
        assert!((arm_angle_deg(0.0, 0.0, -0.5) + 90.0).abs() < 1e-3);
    }

    #[test]
    fn horizontal_vector_is_zero_degrees() {
        assert_eq!(arm_angle_deg(1.0, 0.0, 0.0), 0.0);
        assert_eq!(arm_angle_deg(0.3, -0.4, 0.0), 0.0);
    }

    #[test]
    fn forty_five_degrees() {
        let angle = arm_angle_deg(1.0, 0.0, 1.0);
        assert!((angle - 45.0).abs() < 1e-4);
    }

    #[test]
    fn zero_vector_propagates_nan() {
        assert!(arm_angle_deg(0.0, 0.0, 0.0).is_nan());
    }
}
