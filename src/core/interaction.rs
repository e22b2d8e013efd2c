// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mouse driven rectangle selection.
//!
//! The selection is a two states machine:
//!
//! ```text
//! Idle --press--> Dragging --move--> Dragging --release--> Idle
//! ```
//!
//! A release while dragging completes a selection, exactly once.

use crate::core::region::Region;
use crate::misc::type_aliases::Pixel;

/// Mouse events as seen by the selection.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum MouseEvent {
    /// Left button went down.
    Press(Pixel),
    /// Cursor moved, button state unchanged.
    Move(Pixel),
    /// Left button went up.
    Release(Pixel),
}

/// State of the selection.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum DragState {
    /// No button pressed.
    Idle,
    /// Button pressed at `start`.
    Dragging {
        /// Position of the press.
        start: Pixel,
    },
}

/// Rectangle selection driven by mouse events.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Selection {
    state: DragState,
    region: Option<Region>,
    cursor: Option<Pixel>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    /// Idle selection without any rectangle.
    pub fn new() -> Selection {
        Selection {
            state: DragState::Idle,
            region: None,
            cursor: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Rectangle being dragged, or the last completed one.
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    /// Last known cursor position.
    pub fn cursor(&self) -> Option<Pixel> {
        self.cursor
    }

    /// Forget the cursor, when it leaves the image.
    pub fn cursor_left(&mut self) {
        self.cursor = None;
    }

    /// Apply one event.
    ///
    /// Returns the completed region when the event ends a drag.
    pub fn handle(&mut self, event: MouseEvent) -> Option<Region> {
        match (self.state, event) {
            (_, MouseEvent::Press(p)) => {
                self.cursor = Some(p);
                self.state = DragState::Dragging { start: p };
                self.region = Some(Region::empty_at(p));
                tracing::debug!(x = p.x, y = p.y, "selection started");
                None
            }
            (DragState::Dragging { start }, MouseEvent::Move(p)) => {
                self.cursor = Some(p);
                self.region = Some(Region::from_corners(start, p));
                None
            }
            (DragState::Dragging { start }, MouseEvent::Release(p)) => {
                self.cursor = Some(p);
                self.state = DragState::Idle;
                let region = Region::from_corners(start, p);
                self.region = Some(region);
                tracing::debug!(?region, "selection completed");
                Some(region)
            }
            (DragState::Idle, MouseEvent::Move(p)) | (DragState::Idle, MouseEvent::Release(p)) => {
                self.cursor = Some(p);
                None
            }
        }
    }
}

/// Turn polled mouse states into events.
///
/// Windows that only expose the current cursor position and button state
/// are polled once per frame, this tracks the previous poll to emit
/// the press and release transitions.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct MousePoller {
    was_down: bool,
    last_position: Option<Pixel>,
}

impl MousePoller {
    /// Events between the previous poll and this one.
    ///
    /// Only button state is sampled, so a press and release both happening
    /// between two polls are not seen.
    pub fn poll(&mut self, position: Pixel, is_down: bool) -> Option<MouseEvent> {
        let moved = self.last_position != Some(position);
        let event = match (self.was_down, is_down) {
            (false, true) => Some(MouseEvent::Press(position)),
            (true, false) => Some(MouseEvent::Release(position)),
            _ if moved => Some(MouseEvent::Move(position)),
            _ => None,
        };
        self.was_down = is_down;
        self.last_position = Some(position);
        event
    }
}

// TESTS #############################################################
