// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Core functionalities: depth conversion, region averages, legend and selection.

pub mod camera;
pub mod disparity;
pub mod interaction;
pub mod legend;
pub mod region;
