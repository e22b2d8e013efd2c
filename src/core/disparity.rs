// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Disparity maps: loading, rescaling and range of valid samples.

use itertools::{Itertools, MinMaxResult};
use std::path::Path;

use crate::core::camera::{is_valid_disparity, CameraParameters};
use crate::error::{DepthError, Result};
use crate::misc::{interop, type_aliases::DisparityField, type_aliases::Float};

/// A map of real disparities (stored values already divided by the scale factor).
///
/// A zero sample means that no disparity was measured at that pixel.
#[derive(PartialEq, Debug, Clone)]
pub struct DisparityMap {
    field: DisparityField,
}

impl DisparityMap {
    /// Wrap a matrix of real disparities.
    pub fn new(field: DisparityField) -> DisparityMap {
        DisparityMap { field }
    }

    /// Rescale raw stored samples into real disparities.
    pub fn from_raw(raw: &DisparityField, camera: &CameraParameters) -> DisparityMap {
        Self::new(raw.map(|x| camera.real_disparity(x)))
    }

    /// Read an image file and interpret its samples as raw disparities.
    ///
    /// The image is decoded without any conversion to keep its bit depth.
    /// Only the first channel of multi-channel images is used.
    pub fn load<P: AsRef<Path>>(path: P, camera: &CameraParameters) -> Result<DisparityMap> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|err| DepthError::ImageLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let (raw, nb_channels) = interop::matrix_from_dynamic_image(&img)?;
        if raw.is_empty() {
            return Err(DepthError::ImageLoad {
                path: path.to_path_buf(),
                reason: "image is empty".to_string(),
            });
        }
        if nb_channels > 1 {
            tracing::warn!(
                nb_channels,
                "disparity image has several channels, only the first one is used"
            );
        }
        tracing::info!(
            width = raw.ncols(),
            height = raw.nrows(),
            color = ?img.color(),
            "loaded disparity image"
        );
        Ok(Self::from_raw(&raw, camera))
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.field.ncols()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.field.nrows()
    }

    /// Underlying matrix, indexed by `(row, column)`.
    pub fn field(&self) -> &DisparityField {
        &self.field
    }

    /// Disparity at pixel `(x, y)`, `None` outside of the map.
    #[allow(clippy::cast_sign_loss)]
    pub fn at(&self, x: i32, y: i32) -> Option<Float> {
        if x < 0 || y < 0 {
            return None;
        }
        self.field.get((y as usize, x as usize)).copied()
    }

    /// Iterator over the samples carrying a disparity (finite and non-zero).
    pub fn valid_samples(&self) -> impl Iterator<Item = Float> + '_ {
        self.field.iter().copied().filter(|&d| is_valid_disparity(d))
    }

    /// Extreme valid disparities and their corresponding distances.
    pub fn range(&self, camera: &CameraParameters) -> Result<DisparityRange> {
        match self
            .valid_samples()
            .minmax_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        {
            MinMaxResult::NoElements => Err(DepthError::NoValidDisparity),
            MinMaxResult::OneElement(d) => Ok(DisparityRange::new(camera, d, d)),
            MinMaxResult::MinMax(min, max) => Ok(DisparityRange::new(camera, min, max)),
        }
    }
}

/// Range of valid disparities of a map, with the matching distances.
///
/// Depth is inversely proportional to disparity, so the smallest
/// distance comes from the biggest disparity and vice versa.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct DisparityRange {
    /// Smallest non-zero disparity.
    pub min_disparity: Float,
    /// Biggest disparity.
    pub max_disparity: Float,
    /// Depth of `max_disparity`.
    pub min_distance: Float,
    /// Depth of `min_disparity`.
    pub max_distance: Float,
}

impl DisparityRange {
    /// Build the range from its extreme disparities.
    pub fn new(camera: &CameraParameters, min_disparity: Float, max_disparity: Float) -> Self {
        DisparityRange {
            min_disparity,
            max_disparity,
            min_distance: camera.compute_depth(max_disparity),
            max_distance: camera.compute_depth(min_disparity),
        }
    }
}

// TESTS #############################################################
