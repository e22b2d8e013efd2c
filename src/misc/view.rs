// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Visualization helpers turning disparity maps and selections into images.

use image::{Rgb, RgbImage};
use imageproc::{drawing, rect::Rect};

use crate::core::camera::CameraParameters;
use crate::core::disparity::{DisparityMap, DisparityRange};
use crate::core::legend::{normalize_u8, LegendKey};
use crate::core::region::Region;
use crate::misc::colormap::Colormap;
use crate::misc::{helper, interop};

/// Create an RGB image of a disparity map.
///
/// Valid samples are colored along `key`, normalized over the valid range,
/// so that colors match the legend built with the same key.
/// Zero disparities (no data) are black.
pub fn disparity_image(
    map: &DisparityMap,
    camera: &CameraParameters,
    range: &DisparityRange,
    key: LegendKey,
    colormap: Colormap,
) -> RgbImage {
    let (min, max) = key.extremes(range);
    let table = colormap.table();
    let mask = helper::valid_mask(map.field());
    let colors = helper::zip_mask_map(map.field(), &mask, (0, 0, 0), |d| {
        let value = match key {
            LegendKey::Disparity => d,
            LegendKey::Distance => camera.compute_depth(d),
        };
        table[normalize_u8(value, min, max) as usize]
    });
    interop::rgb_from_matrix(&colors)
}

/// Draw the outline of a region, `thickness` pixels wide, growing inward.
///
/// Empty regions are not drawn.
pub fn draw_region(img: &mut RgbImage, region: &Region, color: Rgb<u8>, thickness: u32) {
    let mut x = region.x;
    let mut y = region.y;
    let mut width = region.width;
    let mut height = region.height;
    for _ in 0..thickness {
        if width == 0 || height == 0 {
            break;
        }
        drawing::draw_hollow_rect_mut(img, Rect::at(x, y).of_size(width, height), color);
        x += 1;
        y += 1;
        width = width.saturating_sub(2);
        height = height.saturating_sub(2);
    }
}
