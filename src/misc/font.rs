// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A small 5x7 bitmap font, enough to write numbers and short labels.
//!
//! Lower case letters are drawn with their upper case glyph.
//! Characters without a glyph are drawn as a question mark.

use image::{Rgb, RgbImage};

/// Width of a glyph, in font pixels.
pub const GLYPH_WIDTH: u32 = 5;
/// Height of a glyph, in font pixels.
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance between two glyphs, in font pixels.
pub const ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Rows of a glyph, the most significant of the 5 bits is the left column.
type Glyph = [u8; 7];

#[rustfmt::skip]
fn glyph(c: char) -> Glyph {
    match c.to_ascii_uppercase() {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        _   => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04], // ?
    }
}

/// Size in image pixels of a text drawn at a given scale.
#[allow(clippy::cast_possible_truncation)]
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let nb_chars = text.chars().count() as u32;
    let width = if nb_chars == 0 {
        0
    } else {
        (nb_chars * ADVANCE - 1) * scale
    };
    (width, GLYPH_HEIGHT * scale)
}

/// Draw a text with its top left corner at `(x, y)`.
///
/// Pixels outside of the image are skipped.
#[allow(clippy::cast_possible_wrap)]
pub fn draw_text(img: &mut RgbImage, x: i32, y: i32, text: &str, scale: u32, color: Rgb<u8>) {
    let s = scale as i32;
    for (i, c) in text.chars().enumerate() {
        let left = x + i as i32 * ADVANCE as i32 * s;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if (*bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 1 {
                    let px = left + col as i32 * s;
                    let py = y + row as i32 * s;
                    fill_square(img, px, py, s, color);
                }
            }
        }
    }
}

/// Draw a text with a dark outline first, then the fill color on top.
pub fn draw_outlined_text(
    img: &mut RgbImage,
    x: i32,
    y: i32,
    text: &str,
    scale: u32,
    outline: Rgb<u8>,
    fill: Rgb<u8>,
) {
    let t = outline_thickness(scale);
    for dy in -t..=t {
        for dx in -t..=t {
            if dx != 0 || dy != 0 {
                draw_text(img, x + dx, y + dy, text, scale, outline);
            }
        }
    }
    draw_text(img, x, y, text, scale, fill);
}

/// Outline stroke width, in image pixels.
#[allow(clippy::cast_possible_wrap)]
pub fn outline_thickness(scale: u32) -> i32 {
    (scale as i32 / 2).max(1)
}

#[allow(clippy::cast_sign_loss)]
fn fill_square(img: &mut RgbImage, x: i32, y: i32, size: i32, color: Rgb<u8>) {
    let (width, height) = img.dimensions();
    for py in y.max(0)..(y + size) {
        for px in x.max(0)..(x + size) {
            if (px as u32) < width && (py as u32) < height {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    #[test]
    fn size_of_text() {
        assert_eq!(text_size("", 2), (0, 14));
        assert_eq!(text_size("1", 1), (5, 7));
        assert_eq!(text_size("12.5", 3), ((4 * 6 - 1) * 3, 21));
    }

    #[test]
    fn lower_case_uses_upper_case_glyph() {
        assert_eq!(glyph('m'), glyph('M'));
    }

    #[test]
    fn draws_inside_its_box() {
        let mut img = RgbImage::new(20, 20);
        draw_text(&mut img, 2, 3, "8", 2, WHITE);
        let (w, h) = text_size("8", 2);
        for (x, y, p) in img.enumerate_pixels() {
            if *p == WHITE {
                assert!(x >= 2 && x < 2 + w && y >= 3 && y < 3 + h);
            }
        }
        // Top bar of the 8 starts one font pixel from the left.
        assert_eq!(img.get_pixel(4, 3), &WHITE);
        assert_eq!(img.get_pixel(2, 3), &BLACK);
    }

    #[test]
    fn clips_at_borders() {
        let mut img = RgbImage::new(4, 4);
        draw_text(&mut img, -3, -3, "0123", 3, WHITE);
        draw_outlined_text(&mut img, 2, 2, "W", 2, BLACK, WHITE);
    }

    #[test]
    fn outline_surrounds_fill() {
        let mut img = RgbImage::from_pixel(20, 20, Rgb([100, 100, 100]));
        draw_outlined_text(&mut img, 5, 5, "-", 1, BLACK, WHITE);
        // The dash is on the fourth row, 5 pixels wide.
        assert_eq!(img.get_pixel(5, 8), &WHITE);
        assert_eq!(img.get_pixel(5, 7), &BLACK);
        assert_eq!(img.get_pixel(4, 8), &BLACK);
        assert_eq!(img.get_pixel(10, 8), &BLACK);
    }
}
