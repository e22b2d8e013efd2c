// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! State of the interactive depth viewer, independent of any window backend.
//!
//! The window loop feeds mouse events into `Viewer::handle`
//! and displays the images produced by `Viewer::render`.

use image::{Rgb, RgbImage};

use crate::core::camera::CameraParameters;
use crate::core::disparity::{DisparityMap, DisparityRange};
use crate::core::interaction::{MouseEvent, Selection};
use crate::core::legend::{Legend, LegendConfig};
use crate::core::region::{self, RegionAverage};
use crate::error::Result;
use crate::misc::type_aliases::Float;
use crate::misc::{font, view};

/// Appearance of the texts and selection drawn over the depth image.
#[derive(PartialEq, Debug, Clone)]
pub struct OverlayConfig {
    /// Font scale of the depth readouts.
    pub text_scale: u32,
    /// Top left corner of the live depth readout.
    pub cursor_depth_origin: (i32, i32),
    /// Top left corner of the average depth readout.
    pub average_depth_origin: (i32, i32),
    /// Number of decimals of the readouts.
    pub precision: usize,
    /// Readout fill color.
    pub text_color: Rgb<u8>,
    /// Readout outline color.
    pub outline_color: Rgb<u8>,
    /// Color of the selection rectangle.
    pub selection_color: Rgb<u8>,
    /// Line width of the selection rectangle.
    pub selection_thickness: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            text_scale: 3,
            cursor_depth_origin: (5, 9),
            average_depth_origin: (5, 39),
            precision: 3,
            text_color: Rgb([255, 255, 255]),
            outline_color: Rgb([0, 0, 0]),
            selection_color: Rgb([0, 255, 0]),
            selection_thickness: 2,
        }
    }
}

/// Everything the viewer needs between two frames.
#[derive(Debug, Clone)]
pub struct Viewer {
    camera: CameraParameters,
    map: DisparityMap,
    range: DisparityRange,
    base: RgbImage,
    legend: Legend,
    overlay: OverlayConfig,
    selection: Selection,
    average: Option<RegionAverage>,
}

impl Viewer {
    /// Prepare the colored depth image and its legend.
    ///
    /// Fails if the map has no valid disparity at all.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(
        camera: CameraParameters,
        map: DisparityMap,
        legend_config: &LegendConfig,
        overlay: OverlayConfig,
    ) -> Result<Viewer> {
        let range = map.range(&camera)?;
        let key = legend_config.style.key();
        let base = view::disparity_image(&map, &camera, &range, key, legend_config.colormap);
        let legend = Legend::build(legend_config, &camera, &range, map.height() as u32);
        tracing::info!(
            labels = ?legend.ticks.iter().map(|t| t.label.as_str()).collect::<Vec<_>>(),
            "legend ready"
        );
        Ok(Viewer {
            camera,
            map,
            range,
            base,
            legend,
            overlay,
            selection: Selection::new(),
            average: None,
        })
    }

    /// Width of the displayed image.
    pub fn width(&self) -> usize {
        self.map.width()
    }

    /// Height of the displayed image.
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Valid disparity range of the map.
    pub fn range(&self) -> &DisparityRange {
        &self.range
    }

    /// Legend overlaid on each frame.
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Average of the last completed selection, `None` before the first one.
    pub fn average(&self) -> Option<RegionAverage> {
        self.average
    }

    /// Apply a mouse event, computing the average when a selection completes.
    pub fn handle(&mut self, event: MouseEvent) {
        if let Some(completed) = self.selection.handle(event) {
            let average = region::average_depth(&self.map, &self.camera, &completed);
            match average {
                RegionAverage::Mean { depth, count } => {
                    tracing::info!(depth, count, "average depth of selection");
                }
                RegionAverage::NoData => {
                    tracing::info!(?completed, "no valid samples in selection");
                }
            }
            self.average = Some(average);
        }
    }

    /// The cursor left the image.
    pub fn cursor_left(&mut self) {
        self.selection.cursor_left();
    }

    /// Depth under the cursor, `None` without cursor or without disparity there.
    pub fn cursor_depth(&self) -> Option<Float> {
        let cursor = self.selection.cursor()?;
        let disparity = self.map.at(cursor.x, cursor.y)?;
        self.camera.depth(disparity)
    }

    /// Text of the live depth readout, if any.
    pub fn cursor_depth_text(&self) -> Option<String> {
        self.cursor_depth()
            .map(|d| format!("Depth: {:.*} meters", self.overlay.precision, d))
    }

    /// Text of the average depth readout, if the last selection had data.
    pub fn average_depth_text(&self) -> Option<String> {
        self.average
            .and_then(|avg| avg.depth())
            .map(|d| format!("Average Depth: {:.*} meters", self.overlay.precision, d))
    }

    /// Compose the current frame.
    pub fn render(&self) -> RgbImage {
        let mut frame = self.base.clone();
        if let Some(selected) = self.selection.region() {
            view::draw_region(
                &mut frame,
                &selected,
                self.overlay.selection_color,
                self.overlay.selection_thickness,
            );
        }
        if let Some(text) = self.average_depth_text() {
            self.draw_readout(&mut frame, self.overlay.average_depth_origin, &text);
        }
        if let Some(text) = self.cursor_depth_text() {
            self.draw_readout(&mut frame, self.overlay.cursor_depth_origin, &text);
        }
        self.legend.overlay_onto(&mut frame);
        frame
    }

    fn draw_readout(&self, frame: &mut RgbImage, (x, y): (i32, i32), text: &str) {
        font::draw_outlined_text(
            frame,
            x,
            y,
            text,
            self.overlay.text_scale,
            self.overlay.outline_color,
            self.overlay.text_color,
        );
    }
}

// TESTS #############################################################

#[cfg(test)]
mod tests {

    use super::*;
    use crate::misc::type_aliases::{DisparityField, Pixel};

    fn viewer() -> Viewer {
        let camera = CameraParameters::new(0.1, 500.0, 16).unwrap();
        let mut raw = DisparityField::from_element(120, 200, 160.0);
        raw[(10, 20)] = 0.0;
        for row in 50..60 {
            for col in 50..60 {
                raw[(row, col)] = 0.0;
            }
        }
        raw[(100, 100)] = 320.0;
        let map = DisparityMap::from_raw(&raw, &camera);
        Viewer::new(camera, map, &LegendConfig::default(), OverlayConfig::default()).unwrap()
    }

    fn drag(viewer: &mut Viewer, from: Pixel, to: Pixel) {
        viewer.handle(MouseEvent::Press(from));
        viewer.handle(MouseEvent::Move(to));
        viewer.handle(MouseEvent::Release(to));
    }

    #[test]
    fn live_readout_under_cursor() {
        let mut v = viewer();
        v.handle(MouseEvent::Move(Pixel::new(30, 30)));
        let depth = v.cursor_depth().unwrap();
        approx::assert_relative_eq!(depth, 0.005, max_relative = 1e-5);
        assert_eq!(v.cursor_depth_text().unwrap(), "Depth: 0.005 meters");
    }

    #[test]
    fn no_live_readout_on_zero_disparity() {
        let mut v = viewer();
        v.handle(MouseEvent::Move(Pixel::new(20, 10)));
        assert_eq!(v.cursor_depth(), None);
        assert_eq!(v.cursor_depth_text(), None);
        // Rendering such a frame must not draw the readout.
        let frame = v.render();
        let mut expected = v.base.clone();
        v.legend.overlay_onto(&mut expected);
        assert_eq!(frame, expected);
    }

    #[test]
    fn no_readouts_on_non_finite_disparities() {
        let camera = CameraParameters::new(0.1, 500.0, 1).unwrap();
        let field = DisparityField::from_row_slice(2, 2, &[Float::NAN, 10.0, Float::INFINITY, 20.0]);
        let mut v = Viewer::new(
            camera,
            DisparityMap::new(field),
            &LegendConfig::default(),
            OverlayConfig::default(),
        )
        .unwrap();
        assert_eq!(v.range().min_disparity, 10.0);
        assert_eq!(v.range().max_disparity, 20.0);
        v.handle(MouseEvent::Move(Pixel::new(0, 0)));
        assert_eq!(v.cursor_depth_text(), None);
        v.handle(MouseEvent::Move(Pixel::new(0, 1)));
        assert_eq!(v.cursor_depth_text(), None);
        drag(&mut v, Pixel::new(0, 0), Pixel::new(1, 2));
        assert_eq!(v.average(), Some(RegionAverage::NoData));
        drag(&mut v, Pixel::new(0, 0), Pixel::new(2, 2));
        let text = v.average_depth_text().unwrap();
        assert!(!text.contains("NaN") && !text.contains("inf"));
        assert_eq!(text, "Average Depth: 0.004 meters");
    }

    #[test]
    fn no_live_readout_outside_of_image() {
        let mut v = viewer();
        v.handle(MouseEvent::Move(Pixel::new(500, 10)));
        assert_eq!(v.cursor_depth(), None);
        v.handle(MouseEvent::Move(Pixel::new(30, 30)));
        v.cursor_left();
        assert_eq!(v.cursor_depth(), None);
    }

    #[test]
    fn selection_average() {
        let mut v = viewer();
        drag(&mut v, Pixel::new(95, 95), Pixel::new(105, 105));
        match v.average() {
            Some(RegionAverage::Mean { depth, count }) => {
                assert_eq!(count, 100);
                let expected = (99.0 * 0.005 + 0.0025) / 100.0;
                approx::assert_relative_eq!(depth, expected, max_relative = 1e-5);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(v.average_depth_text().unwrap().starts_with("Average Depth: "));
    }

    #[test]
    fn empty_selection_hides_average() {
        let mut v = viewer();
        drag(&mut v, Pixel::new(50, 50), Pixel::new(60, 60));
        assert_eq!(v.average(), Some(RegionAverage::NoData));
        assert_eq!(v.average_depth_text(), None);
        let p = Pixel::new(10, 10);
        v.handle(MouseEvent::Press(p));
        v.handle(MouseEvent::Release(p));
        assert_eq!(v.average(), Some(RegionAverage::NoData));
    }

    #[test]
    fn render_draws_selection_and_legend() {
        let mut v = viewer();
        drag(&mut v, Pixel::new(10, 70), Pixel::new(40, 100));
        let frame = v.render();
        assert_eq!(frame.dimensions(), (200, 120));
        assert_eq!(frame.get_pixel(10, 70), &Rgb([0, 255, 0]));
        let (x, y) = v.legend().position(200, 120);
        #[allow(clippy::cast_sign_loss)]
        #[allow(clippy::cast_possible_truncation)]
        let corner = frame.get_pixel(x as u32, y as u32);
        assert_eq!(corner, &Rgb([255, 255, 255]));
    }

    #[test]
    fn all_zero_map_is_refused() {
        let camera = CameraParameters::new(0.1, 500.0, 16).unwrap();
        let map = DisparityMap::new(DisparityField::zeros(10, 10));
        assert!(Viewer::new(camera, map, &LegendConfig::default(), OverlayConfig::default()).is_err());
    }
}
