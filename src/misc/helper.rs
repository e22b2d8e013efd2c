// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Miscellaneous helper functions that didn't fit elsewhere.

use nalgebra::{DMatrix, Scalar};

use crate::core::camera::is_valid_disparity;
use crate::misc::type_aliases::DisparityField;

/// Map a function onto a matrix, at positions given by a mask.
/// A default value is used at the other positions.
pub fn zip_mask_map<T, U, F>(mat: &DMatrix<T>, mask: &DMatrix<bool>, default: U, f: F) -> DMatrix<U>
where
    T: Scalar,
    U: Scalar,
    F: Fn(T) -> U,
{
    mat.zip_map(mask, |x, is_true| if is_true { f(x) } else { default.clone() })
}

/// Mask of the samples carrying a disparity (finite and non-zero ones).
pub fn valid_mask(field: &DisparityField) -> DMatrix<bool> {
    field.map(is_valid_disparity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_positions_get_default() {
        let field = DisparityField::from_row_slice(1, 3, &[0.0, 2.0, 3.0]);
        let mask = valid_mask(&field);
        assert_eq!(mask.as_slice(), &[false, true, true]);
        let doubled = zip_mask_map(&field, &mask, -1.0, |d| 2.0 * d);
        assert_eq!(doubled.as_slice(), &[-1.0, 4.0, 6.0]);
    }

    #[test]
    fn non_finite_samples_are_masked() {
        let field = DisparityField::from_row_slice(1, 4, &[f32::NAN, 2.0, f32::INFINITY, 0.0]);
        assert_eq!(valid_mask(&field).as_slice(), &[false, true, false, false]);
    }
}
