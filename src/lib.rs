// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Depth from stereo disparity maps.
//!
//! A disparity map stores, for each pixel, the horizontal shift between
//! the two views of a rectified stereo pair. With the baseline and
//! focal length of the pair, each non-zero disparity `d` gives a depth
//! `baseline * fx / d / 1000`. Zero disparities mean "no data".
//!
//! This crate provides that conversion, the mean depth over rectangular
//! selections, a color legend with distance labels, and the state of an
//! interactive viewer (see the `depth_viewer` binary).

#![warn(missing_docs)]

pub mod core;
pub mod error;
pub mod misc;
pub mod viewer;
