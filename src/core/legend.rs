// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Color legend with distance labels.
//!
//! A legend is a vertical gradient between the extremes of a key
//! (disparity or distance), colored with a colormap, and annotated
//! with a few distances at the rows where they appear in the gradient.
//! Which values get a label depends on the legend style.

use image::{imageops, Rgb, RgbImage};

use crate::core::camera::CameraParameters;
use crate::core::disparity::DisparityRange;
use crate::error::{DepthError, Result};
use crate::misc::colormap::Colormap;
use crate::misc::font;
use crate::misc::type_aliases::Float;

/// Biggest spacing between two labels of the `Interval` style.
pub const MAX_DISTANCE_INTERVAL: Float = 100.0;
/// Smallest spacing between two labels of the `Interval` style.
pub const MIN_DISTANCE_INTERVAL: Float = 1.0;

/// Quantity along which the legend gradient is linear.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum LegendKey {
    /// Real disparity.
    Disparity,
    /// Depth in meters.
    Distance,
}

/// Label placement policy.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum LegendStyle {
    /// Keyed by disparity, labels at the max disparity divided by fixed divisors.
    Divisors,
    /// Keyed by distance, labels at every multiple of a round interval.
    Interval,
}

impl Default for LegendStyle {
    fn default() -> Self {
        LegendStyle::Divisors
    }
}

impl std::str::FromStr for LegendStyle {
    type Err = DepthError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "divisors" => Ok(LegendStyle::Divisors),
            "interval" => Ok(LegendStyle::Interval),
            _ => Err(DepthError::invalid_argument(
                "legend_style",
                s,
                "expected divisors or interval",
            )),
        }
    }
}

impl LegendStyle {
    /// Quantity the gradient is linear in.
    pub fn key(self) -> LegendKey {
        match self {
            LegendStyle::Divisors => LegendKey::Disparity,
            LegendStyle::Interval => LegendKey::Distance,
        }
    }
}

impl LegendKey {
    /// Extremes `(min, max)` of the key over a disparity range.
    pub fn extremes(self, range: &DisparityRange) -> (Float, Float) {
        match self {
            LegendKey::Disparity => (range.min_disparity, range.max_disparity),
            LegendKey::Distance => (range.min_distance, range.max_distance),
        }
    }
}

/// Rendering parameters of a legend.
#[derive(PartialEq, Debug, Clone)]
pub struct LegendConfig {
    /// Label placement policy.
    pub style: LegendStyle,
    /// Colormap of the gradient.
    pub colormap: Colormap,
    /// Width of the full resolution legend.
    pub width: u32,
    /// Divisors of the max disparity for the `Divisors` style.
    pub divisors: Vec<u32>,
    /// Preferred font scale of the labels, reduced if a label is wider than the legend.
    pub label_scale: u32,
    /// Number of decimals of the labels.
    pub label_precision: usize,
    /// Legend is shrunk by this factor before being overlaid.
    pub downscale: Float,
    /// Width of the border added around the shrunk legend.
    pub border: u32,
    /// Color of the border.
    pub border_color: Rgb<u8>,
    /// Label outline color.
    pub outline_color: Rgb<u8>,
    /// Label fill color.
    pub fill_color: Rgb<u8>,
    /// Distance between the left side of the legend and the right side of the display.
    pub offset_from_right: u32,
}

impl Default for LegendConfig {
    fn default() -> Self {
        LegendConfig {
            style: LegendStyle::default(),
            colormap: Colormap::default(),
            width: 90,
            divisors: vec![1, 2, 3, 5, 8],
            label_scale: 3,
            label_precision: 1,
            downscale: 1.5,
            border: 5,
            border_color: Rgb([255, 255, 255]),
            outline_color: Rgb([0, 0, 0]),
            fill_color: Rgb([255, 255, 255]),
            offset_from_right: 100,
        }
    }
}

/// A labeled value of the legend.
#[derive(PartialEq, Debug, Clone)]
pub struct Tick {
    /// Value of the key at this tick.
    pub value: Float,
    /// Distance written on the label.
    pub distance: Float,
    /// Row of the full resolution legend.
    pub row: u32,
    /// Text of the label.
    pub label: String,
}

/// Values of each row of a vertical gradient going from `min` (top) to `max` (bottom).
#[allow(clippy::cast_precision_loss)]
pub fn gradient(min: Float, max: Float, height: u32) -> Vec<Float> {
    if height <= 1 {
        return vec![min; height as usize];
    }
    let last = (height - 1) as Float;
    (0..height)
        .map(|i| min + (i as Float / last) * (max - min))
        .collect()
}

/// Row of the gradient where `value` lies, `None` if outside of `[min, max]`.
///
/// When `min == max`, the only representable value sits on the middle row.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn row_of(value: Float, min: Float, max: Float, height: u32) -> Option<u32> {
    if height == 0 || !value.is_finite() {
        return None;
    }
    let last = height - 1;
    if max <= min {
        return if value == min { Some(last / 2) } else { None };
    }
    let ratio = (value - min) / (max - min);
    if (0.0..=1.0).contains(&ratio) {
        Some(((ratio * last as Float) as u32).min(last))
    } else {
        None
    }
}

/// Spacing of the `Interval` labels: the order of magnitude of the
/// max distance, bounded to `[MIN_DISTANCE_INTERVAL, MAX_DISTANCE_INTERVAL]`.
pub fn distance_interval(max_distance: Float) -> Float {
    if !(max_distance.is_finite() && max_distance > 0.0) {
        return MIN_DISTANCE_INTERVAL;
    }
    let order_of_magnitude = (10.0 as Float).powf(max_distance.log10().floor());
    order_of_magnitude
        .min(MAX_DISTANCE_INTERVAL)
        .max(MIN_DISTANCE_INTERVAL)
}

/// Labeled values for a legend of `height` rows, before any overlap filtering.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn ticks(
    config: &LegendConfig,
    camera: &CameraParameters,
    range: &DisparityRange,
    height: u32,
) -> Vec<Tick> {
    let (min, max) = config.style.key().extremes(range);
    let values: Vec<(Float, Float)> = match config.style {
        LegendStyle::Divisors => config
            .divisors
            .iter()
            .filter(|&&r| r > 0)
            .map(|&r| {
                let disparity = range.max_disparity / r as Float;
                (disparity, camera.compute_depth(disparity))
            })
            .collect(),
        LegendStyle::Interval => {
            let interval = distance_interval(range.max_distance);
            let first = (range.min_distance / interval).ceil().max(1.0) as u64;
            let last = (range.max_distance / interval).floor() as u64;
            // More labels than rows could never be drawn.
            let last = last.min(first + u64::from(height));
            (first..=last)
                .map(|k| {
                    let distance = k as Float * interval;
                    (distance, distance)
                })
                .collect()
        }
    };
    values
        .into_iter()
        .filter_map(|(value, distance)| {
            row_of(value, min, max, height).map(|row| Tick {
                value,
                distance,
                row,
                label: format!("{:.*}", config.label_precision, distance),
            })
        })
        .collect()
}

/// A rendered legend.
#[derive(PartialEq, Debug, Clone)]
pub struct Legend {
    /// Shrunk legend with its border, ready to be overlaid.
    pub image: RgbImage,
    /// Ticks that were actually drawn.
    pub ticks: Vec<Tick>,
    /// Legend placement offset from the right of the display.
    pub offset_from_right: u32,
}

impl Legend {
    /// Render the legend of a disparity range for a display of `height` rows.
    pub fn build(
        config: &LegendConfig,
        camera: &CameraParameters,
        range: &DisparityRange,
        height: u32,
    ) -> Legend {
        let (min, max) = config.style.key().extremes(range);
        let mut bar = color_bar(config, min, max, height);
        let mut drawn: Vec<Tick> = Vec::new();
        let mut occupied: Vec<(i32, i32)> = Vec::new();
        for tick in ticks(config, camera, range, height) {
            let scale = fitting_scale(&tick.label, config.label_scale, config.width);
            let (text_w, text_h) = font::text_size(&tick.label, scale);
            let (x, y) = label_position(config.width, height, text_w, text_h, tick.row);
            let margin = font::outline_thickness(scale);
            #[allow(clippy::cast_possible_wrap)]
            let span = (y - margin, y + text_h as i32 + margin);
            if occupied.iter().any(|&(a, b)| span.0 < b && a < span.1) {
                tracing::debug!(label = %tick.label, row = tick.row, "legend label skipped, it overlaps another one");
                continue;
            }
            font::draw_outlined_text(
                &mut bar,
                x,
                y,
                &tick.label,
                scale,
                config.outline_color,
                config.fill_color,
            );
            occupied.push(span);
            drawn.push(tick);
        }
        Legend {
            image: shrink_with_border(config, &bar),
            ticks: drawn,
            offset_from_right: config.offset_from_right,
        }
    }

    /// Top left corner of the legend on a display of a given size.
    ///
    /// Vertically centered, `offset_from_right` pixels from the right side.
    /// May lie partially outside of the display.
    pub fn position(&self, display_width: u32, display_height: u32) -> (i64, i64) {
        let x = i64::from(display_width) - i64::from(self.offset_from_right);
        let y = (i64::from(display_height) - i64::from(self.image.height())) / 2;
        (x.max(0), y)
    }

    /// Copy the legend onto a display image, clipped to its bounds.
    pub fn overlay_onto(&self, display: &mut RgbImage) {
        let (x, y) = self.position(display.width(), display.height());
        imageops::replace(display, &self.image, x, y);
    }
}

/// Full resolution gradient colored with the colormap.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
fn color_bar(config: &LegendConfig, min: Float, max: Float, height: u32) -> RgbImage {
    let rows = gradient(min, max, height);
    let mut bar = RgbImage::new(config.width, height);
    for (y, value) in rows.iter().enumerate() {
        let intensity = normalize_u8(*value, min, max);
        let (r, g, b) = config.colormap.color(intensity);
        for x in 0..config.width {
            bar.put_pixel(x, y as u32, Rgb([r, g, b]));
        }
    }
    bar
}

/// Map `[min, max]` onto `[0, 255]`, a degenerate range gives 0.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn normalize_u8(value: Float, min: Float, max: Float) -> u8 {
    if max <= min {
        return 0;
    }
    (255.0 * ((value - min) / (max - min)).max(0.0).min(1.0)).round() as u8
}

/// Biggest scale not above `preferred` for which the text fits in `width`.
fn fitting_scale(text: &str, preferred: u32, width: u32) -> u32 {
    (1..=preferred.max(1))
        .rev()
        .find(|&s| font::text_size(text, s).0 <= width)
        .unwrap_or(1)
}

/// Label centered horizontally in the legend and vertically on its row,
/// kept inside the legend.
#[allow(clippy::cast_possible_wrap)]
fn label_position(width: u32, height: u32, text_w: u32, text_h: u32, row: u32) -> (i32, i32) {
    let x = (width as i32 - text_w as i32) / 2;
    let y = row as i32 - text_h as i32 / 2;
    let max_y = (height as i32 - text_h as i32).max(0);
    (x, y.max(0).min(max_y))
}

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
fn shrink_with_border(config: &LegendConfig, bar: &RgbImage) -> RgbImage {
    let factor = if config.downscale > 0.0 { config.downscale } else { 1.0 };
    let new_w = ((bar.width() as Float / factor) as u32).max(1);
    let new_h = ((bar.height() as Float / factor) as u32).max(1);
    let small = imageops::resize(bar, new_w, new_h, imageops::FilterType::Triangle);
    let b = config.border;
    let mut framed = RgbImage::from_pixel(new_w + 2 * b, new_h + 2 * b, config.border_color);
    imageops::replace(&mut framed, &small, i64::from(b), i64::from(b));
    framed
}

// TESTS #############################################################
