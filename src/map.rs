// src/map.rs

//! # Linear Mapper
//!
//! Affine rescaling of a value from one range into another. No clamping is
//! applied: inputs outside the source range extrapolate linearly, so callers
//! saturate where they need to.

use crate::error::{Error, ErrorKind, Result};
use crate::Number;

/// Rescales `value` from `[in_min, in_max]` into `[out_min, out_max]`.
///
/// Fails with [`ErrorKind::InvalidRange`] when `in_min == in_max`.
///
/// ```
/// use quad_acro_flight_core::map::try_map;
///
/// let mapped = try_map(1500.0_f32, 1000.0, 2000.0, -100.0, 100.0).unwrap();
/// assert_eq!(mapped, 0.0);
/// ```
pub fn try_map<T: Number>(value: T, in_min: T, in_max: T, out_min: T, out_max: T) -> Result<T> {
    let in_span = in_max - in_min;
    if in_span == T::zero() {
        return Err(Error::new(ErrorKind::InvalidRange, "map input range is empty"));
    }
    // Dividing first keeps pulse-width spans inside narrow fixed-point types.
    Ok(out_min + (value - in_min) / in_span * (out_max - out_min))
}

/// Rescales `value` from `[in_min, in_max]` into `[out_min, out_max]`.
///
/// A degenerate input range yields `out_min` and logs a warning instead of
/// producing a non-finite result.
pub fn map<T: Number>(value: T, in_min: T, in_max: T, out_min: T, out_max: T) -> T {
    match try_map(value, in_min, in_max, out_min, out_max) {
        Ok(mapped) => mapped,
        Err(err) => {
            log::warn!("{}, using lower output bound", err);
            out_min
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use fixed::types::I16F16;

    /// Test that mapping a range onto itself is the identity.
    #[test]
    fn test_map_identity() {
        for x in [0.0_f32, 0.5, 13.25, 50.0, 99.0, 100.0] {
            assert!(value_close(x, map(x, 0.0, 100.0, 0.0, 100.0)));
        }
    }

    /// Test that range endpoints map onto output endpoints.
    #[test]
    fn test_map_endpoints() {
        assert_eq!(map(1000.0_f32, 1000.0, 2000.0, -100.0, 100.0), -100.0);
        assert_eq!(map(2000.0_f32, 1000.0, 2000.0, -100.0, 100.0), 100.0);
        assert_eq!(map(1500.0_f32, 1000.0, 2000.0, -100.0, 100.0), 0.0);
    }

    /// Test that inputs outside the range extrapolate.
    #[test]
    fn test_map_extrapolates_without_clamping() {
        assert!(value_close(-125.0, map(875.0_f32, 1000.0, 2000.0, -100.0, 100.0)));
        assert!(value_close(150.0, map(2250.0_f32, 1000.0, 2000.0, -100.0, 100.0)));
    }

    /// Test mapping onto a reversed output range.
    #[test]
    fn test_map_inverted_output() {
        assert!(value_close(75.0, map(25.0_f32, 0.0, 100.0, 100.0, 0.0)));
    }

    /// Test the empty input range error and its fallback.
    #[test]
    fn test_map_degenerate_range() {
        let err = try_map(5.0_f32, 3.0, 3.0, -1.0, 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert_eq!(map(5.0_f32, 3.0, 3.0, -1.0, 1.0), -1.0);
    }

    /// Test mapping with fixed-point numbers.
    #[test]
    fn test_map_fixed_point() {
        let mapped = map(
            I16F16::from_num(75),
            I16F16::from_num(0),
            I16F16::from_num(100),
            I16F16::from_num(-10),
            I16F16::from_num(10),
        );
        assert_eq!(mapped, I16F16::from_num(5));
    }

    /// Test mapping full receiver pulse widths with fixed-point numbers.
    #[test]
    fn test_map_pulse_width_fixed_point() {
        let stick = |pulse: i32| {
            map(
                I16F16::from_num(pulse),
                I16F16::from_num(1000),
                I16F16::from_num(2000),
                I16F16::from_num(-100),
                I16F16::from_num(100),
            )
        };
        assert_eq!(I16F16::from_num(100), stick(2000));
        assert_eq!(I16F16::from_num(0), stick(1500));
        assert_eq!(I16F16::from_num(-100), stick(1000));
    }
}
