// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Interoperability conversions between the image and matrix types.

use image::{DynamicImage, ImageBuffer, Pixel, Rgb, RgbImage};
use nalgebra::DMatrix;

use crate::error::{DepthError, Result};
use crate::misc::type_aliases::Float;

/// Convert an `(u8,u8,8)` matrix into an `RgbImage`.
///
/// Performs a transposition to accomodate for the
/// column major matrix into the row major image.
#[allow(clippy::cast_possible_truncation)]
pub fn rgb_from_matrix(mat: &DMatrix<(u8, u8, u8)>) -> RgbImage {
    let (nb_rows, nb_cols) = mat.shape();
    let mut img_buf = RgbImage::new(nb_cols as u32, nb_rows as u32);
    for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
        let (r, g, b) = mat[(y as usize, x as usize)];
        *pixel = Rgb([r, g, b]);
    }
    img_buf
}

/// Extract the first channel of an image buffer into a `Float` matrix.
///
/// Values are kept as stored, without any normalization,
/// so 16 bits images keep their full range.
#[allow(clippy::cast_possible_truncation)]
pub fn matrix_from_first_channel<P>(img: &ImageBuffer<P, Vec<P::Subpixel>>) -> DMatrix<Float>
where
    P: Pixel,
    P::Subpixel: Into<Float>,
{
    let (width, height) = img.dimensions();
    DMatrix::from_fn(height as usize, width as usize, |row, col| {
        let pixel = img.get_pixel(col as u32, row as u32);
        pixel.channels()[0].into()
    })
}

/// Convert a decoded image into a `Float` matrix of its raw samples.
///
/// Returns the matrix and the number of channels of the source image,
/// only the first of which was kept.
pub fn matrix_from_dynamic_image(img: &DynamicImage) -> Result<(DMatrix<Float>, u8)> {
    let nb_channels = img.color().channel_count();
    let mat = match img {
        DynamicImage::ImageLuma8(buf) => matrix_from_first_channel(buf),
        DynamicImage::ImageLumaA8(buf) => matrix_from_first_channel(buf),
        DynamicImage::ImageRgb8(buf) => matrix_from_first_channel(buf),
        DynamicImage::ImageRgba8(buf) => matrix_from_first_channel(buf),
        DynamicImage::ImageLuma16(buf) => matrix_from_first_channel(buf),
        DynamicImage::ImageLumaA16(buf) => matrix_from_first_channel(buf),
        DynamicImage::ImageRgb16(buf) => matrix_from_first_channel(buf),
        DynamicImage::ImageRgba16(buf) => matrix_from_first_channel(buf),
        DynamicImage::ImageRgb32F(buf) => matrix_from_first_channel(buf),
        DynamicImage::ImageRgba32F(buf) => matrix_from_first_channel(buf),
        other => {
            return Err(DepthError::UnsupportedFormat(format!(
                "pixel layout {:?}",
                other.color()
            )))
        }
    };
    Ok((mat, nb_channels))
}
