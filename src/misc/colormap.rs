// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Color maps turning 8 bits intensities into RGB colors.

use crate::error::{DepthError, Result};

/// Available color maps.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Colormap {
    /// Blue, cyan, yellow, red. The classic look of disparity maps.
    Jet,
    /// Perceptually uniform dark blue to yellow.
    Viridis,
}

impl Default for Colormap {
    fn default() -> Self {
        Colormap::Jet
    }
}

impl std::str::FromStr for Colormap {
    type Err = DepthError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "jet" => Ok(Colormap::Jet),
            "viridis" => Ok(Colormap::Viridis),
            _ => Err(DepthError::invalid_argument(
                "colormap",
                s,
                "expected jet or viridis",
            )),
        }
    }
}

impl Colormap {
    /// Color of an intensity.
    pub fn color(self, intensity: u8) -> (u8, u8, u8) {
        match self {
            Colormap::Jet => jet(intensity),
            Colormap::Viridis => viridis(intensity),
        }
    }

    /// The 256 colors of the map.
    pub fn table(self) -> Vec<(u8, u8, u8)> {
        (0..=255).map(|i| self.color(i)).collect()
    }
}

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
fn to_u8(v: f32) -> u8 {
    (255.0 * v.max(0.0).min(1.0)).round() as u8
}

/// Piecewise linear jet: each channel is a trapezoid along the range.
fn jet(intensity: u8) -> (u8, u8, u8) {
    let x = f32::from(intensity) / 255.0;
    let channel = |center: f32| 1.5 - (4.0 * x - center).abs();
    (to_u8(channel(3.0)), to_u8(channel(2.0)), to_u8(channel(1.0)))
}

/// Samples of viridis every 32 intensities (the last one at 255).
const VIRIDIS_ANCHORS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
fn viridis(intensity: u8) -> (u8, u8, u8) {
    let position = f32::from(intensity) * 8.0 / 255.0;
    let i = (position.floor() as usize).min(7);
    let t = position - i as f32;
    let (a, b) = (VIRIDIS_ANCHORS[i], VIRIDIS_ANCHORS[i + 1]);
    let lerp = |u: u8, v: u8| (f32::from(u) + t * (f32::from(v) - f32::from(u))).round() as u8;
    (lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jet_extremes() {
        assert_eq!(Colormap::Jet.color(0), (0, 0, 128));
        assert_eq!(Colormap::Jet.color(255), (128, 0, 0));
        let (r, g, b) = Colormap::Jet.color(128);
        assert!(g > 250 && r > 120 && r < 135 && b > 120 && b < 135);
    }

    #[test]
    fn viridis_extremes() {
        assert_eq!(Colormap::Viridis.color(0), VIRIDIS_ANCHORS[0]);
        assert_eq!(Colormap::Viridis.color(255), VIRIDIS_ANCHORS[8]);
    }

    #[test]
    fn table_has_256_entries() {
        assert_eq!(Colormap::Viridis.table().len(), 256);
    }

    #[test]
    fn parse() {
        assert_eq!("viridis".parse::<Colormap>().unwrap(), Colormap::Viridis);
        assert!("rainbow".parse::<Colormap>().is_err());
    }
}
