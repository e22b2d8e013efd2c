// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Stereo camera constants and the disparity to depth conversion.

use crate::error::{DepthError, Result};
use crate::misc::type_aliases::Float;

/// Stored depths are divided by this value to be expressed in meters.
pub const DEPTH_UNIT_DIVISOR: Float = 1000.0;

/// A stored disparity carries a measurement only when it is finite and non-zero.
///
/// Zero is the "no data" sentinel, float maps may also use NaN or infinities.
pub fn is_valid_disparity(disparity: Float) -> bool {
    disparity.is_finite() && disparity != 0.0
}

/// Constants of a rectified stereo pair.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct CameraParameters {
    /// Distance between the two optical centers.
    pub baseline: Float,
    /// Horizontal focal length, in pixels.
    pub fx: Float,
    /// Stored disparities are this many times bigger than real ones.
    pub scale_factor: u32,
}

impl CameraParameters {
    /// Build camera parameters, refusing values that would make depth meaningless.
    pub fn new(baseline: Float, fx: Float, scale_factor: u32) -> Result<Self> {
        if !(baseline.is_finite() && baseline > 0.0) {
            return Err(DepthError::invalid_argument(
                "baseline",
                &baseline.to_string(),
                "must be a positive number",
            ));
        }
        if !(fx.is_finite() && fx > 0.0) {
            return Err(DepthError::invalid_argument(
                "fx",
                &fx.to_string(),
                "must be a positive number",
            ));
        }
        if scale_factor == 0 {
            return Err(DepthError::invalid_argument(
                "disparity_factor",
                "0",
                "must be a positive integer",
            ));
        }
        Ok(CameraParameters {
            baseline,
            fx,
            scale_factor,
        })
    }

    /// Real disparity of a raw stored sample.
    #[allow(clippy::cast_precision_loss)]
    pub fn real_disparity(&self, raw: Float) -> Float {
        raw / self.scale_factor as Float
    }

    /// Depth of a real disparity value.
    ///
    /// Plain division: a zero disparity gives an infinite depth,
    /// callers must exclude it beforehand (or use `depth`).
    pub fn compute_depth(&self, disparity: Float) -> Float {
        (self.baseline * self.fx) / disparity / DEPTH_UNIT_DIVISOR
    }

    /// Depth of a real disparity value, `None` for the "no data" zero sentinel
    /// and for non-finite disparities.
    pub fn depth(&self, disparity: Float) -> Option<Float> {
        if is_valid_disparity(disparity) {
            Some(self.compute_depth(disparity))
        } else {
            None
        }
    }
}

// TESTS #############################################################

#[cfg(test)]
mod tests {

    use super::*;
    use approx;
    use quickcheck::TestResult;
    use quickcheck_macros;

    const EPSILON: Float = 1e-5;

    fn camera() -> CameraParameters {
        CameraParameters::new(0.1, 500.0, 16).unwrap()
    }

    #[test]
    fn raw_160_with_scale_16_is_5_millimeters() {
        let cam = camera();
        let disparity = cam.real_disparity(160.0);
        assert_eq!(disparity, 10.0);
        approx::assert_relative_eq!(cam.compute_depth(disparity), 0.005, max_relative = EPSILON);
    }

    #[test]
    fn zero_disparity_has_no_depth() {
        assert_eq!(camera().depth(0.0), None);
        assert!(camera().compute_depth(0.0).is_infinite());
    }

    #[test]
    fn rejects_invalid_constants() {
        assert!(CameraParameters::new(0.0, 500.0, 16).is_err());
        assert!(CameraParameters::new(0.1, -1.0, 16).is_err());
        assert!(CameraParameters::new(0.1, Float::NAN, 16).is_err());
        assert!(CameraParameters::new(0.1, 500.0, 0).is_err());
    }

    #[test]
    fn non_finite_disparity_has_no_depth() {
        let cam = camera();
        assert_eq!(cam.depth(Float::NAN), None);
        assert_eq!(cam.depth(Float::INFINITY), None);
        assert_eq!(cam.depth(Float::NEG_INFINITY), None);
        assert!(is_valid_disparity(0.5));
        assert!(!is_valid_disparity(0.0));
    }

    // PROPERTY TESTS ################################################

    #[quickcheck_macros::quickcheck]
    fn depth_formula(baseline: u16, fx: u16, disparity: u16) -> TestResult {
        if baseline == 0 || fx == 0 || disparity == 0 {
            return TestResult::discard();
        }
        let (b, f, d) = (
            Float::from(baseline) / 100.0,
            Float::from(fx),
            Float::from(disparity) / 16.0,
        );
        let cam = CameraParameters::new(b, f, 1).unwrap();
        TestResult::from_bool(approx::relative_eq!(
            cam.compute_depth(d),
            b * f / d / 1000.0,
            max_relative = EPSILON
        ))
    }

    #[quickcheck_macros::quickcheck]
    fn depth_strictly_decreasing(d1: u16, d2: u16) -> TestResult {
        if d1 == 0 || d1 == d2 {
            return TestResult::discard();
        }
        let (low, high) = if d1 < d2 { (d1, d2) } else { (d2, d1) };
        if low == 0 {
            return TestResult::discard();
        }
        let cam = camera();
        let d_low = cam.real_disparity(Float::from(low));
        let d_high = cam.real_disparity(Float::from(high));
        TestResult::from_bool(cam.compute_depth(d_low) > cam.compute_depth(d_high))
    }
}
