// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Type aliases for common types used all over the code base.

use nalgebra as na;

/// At the moment, the library is focused on f32 computation.
pub type Float = f32;

/// A pixel position in image coordinates (x to the right, y downward).
pub type Pixel = na::Point2<i32>;

/// A dense field of real disparities, indexed by `(row, column)`.
pub type DisparityField = na::DMatrix<Float>;
