// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rectangular selections and the mean depth over them.

use std::ops::Range;

use crate::core::camera::CameraParameters;
use crate::core::disparity::DisparityMap;
use crate::misc::type_aliases::{Float, Pixel};

/// An axis aligned rectangle of pixels, end exclusive.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Region {
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl Region {
    /// Rectangle spanned by two opposite corners, in any order.
    ///
    /// The second corner is excluded, so identical corners
    /// give an empty rectangle.
    #[allow(clippy::cast_sign_loss)]
    pub fn from_corners(a: Pixel, b: Pixel) -> Region {
        Region {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).unsigned_abs(),
            height: (a.y - b.y).unsigned_abs(),
        }
    }

    /// Zero sized rectangle at a given position.
    pub fn empty_at(p: Pixel) -> Region {
        Self::from_corners(p, p)
    }

    /// True if the rectangle does not contain any pixel.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Rows and columns of the rectangle lying inside a `width x height` image.
    #[allow(clippy::cast_possible_wrap)]
    #[allow(clippy::cast_sign_loss)]
    pub fn clip(&self, width: usize, height: usize) -> (Range<usize>, Range<usize>) {
        let clamp = |v: i64, max: usize| v.max(0).min(max as i64) as usize;
        let x0 = i64::from(self.x);
        let y0 = i64::from(self.y);
        let rows = clamp(y0, height)..clamp(y0 + i64::from(self.height), height);
        let cols = clamp(x0, width)..clamp(x0 + i64::from(self.width), width);
        (rows, cols)
    }
}

/// Mean depth of a region.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum RegionAverage {
    /// The region does not contain any valid disparity.
    NoData,
    /// `Mean { depth, count }`: mean over `count` valid samples.
    Mean {
        /// Mean depth.
        depth: Float,
        /// Number of valid samples averaged.
        count: usize,
    },
}

impl RegionAverage {
    /// Mean depth if any.
    pub fn depth(&self) -> Option<Float> {
        match self {
            RegionAverage::Mean { depth, .. } => Some(*depth),
            RegionAverage::NoData => None,
        }
    }
}

/// Mean depth over the non-zero disparities inside a region.
///
/// Zero disparities are neither summed nor counted.
/// Parts of the region outside of the map are ignored.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn average_depth(
    map: &DisparityMap,
    camera: &CameraParameters,
    region: &Region,
) -> RegionAverage {
    let (rows, cols) = region.clip(map.width(), map.height());
    let field = map.field();
    let mut sum = 0.0_f64;
    let mut count = 0_usize;
    for row in rows {
        for col in cols.clone() {
            if let Some(depth) = camera.depth(field[(row, col)]) {
                sum += f64::from(depth);
                count += 1;
            }
        }
    }
    if count == 0 {
        RegionAverage::NoData
    } else {
        RegionAverage::Mean {
            depth: (sum / count as f64) as Float,
            count,
        }
    }
}

// TESTS #############################################################

#[cfg(test)]
mod tests {

    use super::*;
    use crate::misc::type_aliases::DisparityField;
    use approx;
    use quickcheck::TestResult;
    use quickcheck_macros;

    fn camera() -> CameraParameters {
        CameraParameters::new(0.1, 500.0, 1).unwrap()
    }

    #[test]
    fn from_corners_normalizes() {
        let r = Region::from_corners(Pixel::new(10, 2), Pixel::new(4, 8));
        assert_eq!(
            r,
            Region {
                x: 4,
                y: 2,
                width: 6,
                height: 6
            }
        );
    }

    #[test]
    fn zero_area_selection_has_no_data() {
        let map = DisparityMap::new(DisparityField::from_element(5, 5, 10.0));
        let region = Region::empty_at(Pixel::new(2, 2));
        assert!(region.is_empty());
        assert_eq!(average_depth(&map, &camera(), &region), RegionAverage::NoData);
    }

    #[test]
    fn all_zero_region_has_no_data() {
        let map = DisparityMap::new(DisparityField::zeros(5, 5));
        let region = Region::from_corners(Pixel::new(0, 0), Pixel::new(5, 5));
        assert_eq!(average_depth(&map, &camera(), &region), RegionAverage::NoData);
    }

    #[test]
    fn non_finite_samples_are_not_counted() {
        let field = DisparityField::from_row_slice(1, 4, &[Float::NAN, 10.0, 20.0, Float::INFINITY]);
        let map = DisparityMap::new(field);
        let region = Region::from_corners(Pixel::new(0, 0), Pixel::new(4, 1));
        match average_depth(&map, &camera(), &region) {
            RegionAverage::Mean { depth, count } => {
                assert_eq!(count, 2);
                let expected = (0.005 + 0.0025) / 2.0;
                approx::assert_relative_eq!(depth, expected, max_relative = 1e-5);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn zeros_are_not_counted() {
        #[rustfmt::skip]
        let field = DisparityField::from_row_slice(2, 3, &[
            10.0, 0.0, 20.0,
             0.0, 0.0, 40.0,
        ]);
        let map = DisparityMap::new(field);
        let cam = camera();
        let region = Region::from_corners(Pixel::new(0, 0), Pixel::new(3, 2));
        let expected = (cam.compute_depth(10.0) + cam.compute_depth(20.0) + cam.compute_depth(40.0)) / 3.0;
        match average_depth(&map, &cam, &region) {
            RegionAverage::Mean { depth, count } => {
                assert_eq!(count, 3);
                approx::assert_relative_eq!(depth, expected, max_relative = 1e-5);
            }
            RegionAverage::NoData => panic!("expected a mean"),
        }
    }

    #[test]
    fn region_is_clipped_to_the_map() {
        let map = DisparityMap::new(DisparityField::from_element(4, 4, 5.0));
        let region = Region::from_corners(Pixel::new(-10, -10), Pixel::new(100, 2));
        let (rows, cols) = region.clip(4, 4);
        assert_eq!((rows, cols), (0..2, 0..4));
        match average_depth(&map, &camera(), &region) {
            RegionAverage::Mean { count, .. } => assert_eq!(count, 8),
            RegionAverage::NoData => panic!("expected a mean"),
        }
        let outside = Region::from_corners(Pixel::new(10, 10), Pixel::new(20, 20));
        assert_eq!(average_depth(&map, &camera(), &outside), RegionAverage::NoData);
    }

    // PROPERTY TESTS ################################################

    #[quickcheck_macros::quickcheck]
    fn mean_of_valid_samples(samples: Vec<u8>) -> TestResult {
        let valid: Vec<Float> = samples
            .iter()
            .filter(|&&s| s != 0)
            .map(|&s| Float::from(s))
            .collect();
        if valid.is_empty() {
            return TestResult::discard();
        }
        let cam = camera();
        let field = DisparityField::from_iterator(
            1,
            samples.len(),
            samples.iter().map(|&s| Float::from(s)),
        );
        let map = DisparityMap::new(field);
        #[allow(clippy::cast_possible_truncation)]
        #[allow(clippy::cast_possible_wrap)]
        let region = Region::from_corners(Pixel::new(0, 0), Pixel::new(samples.len() as i32, 1));
        let expected: Float =
            valid.iter().map(|&d| cam.compute_depth(d)).sum::<Float>() / valid.len() as Float;
        match average_depth(&map, &cam, &region) {
            RegionAverage::Mean { depth, count } => TestResult::from_bool(
                count == valid.len() && approx::relative_eq!(depth, expected, max_relative = 1e-4),
            ),
            RegionAverage::NoData => TestResult::failed(),
        }
    }
}
