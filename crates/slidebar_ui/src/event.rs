use serde::{Deserialize, Serialize};

use crate::geometry::Dimensions;
use crate::state::StepDirection;

/// The part of the scrollbar a pointer event landed on.
///
/// The host hit-tests its own visual structure and reports the innermost part:
/// a press on the handle is `Handle`, never `Track`, even though the handle sits
/// inside the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    /// The draggable handle
    Handle,
    /// The track background around the handle
    Track,
    /// The step-up control
    StepUp,
    /// The step-down control
    StepDown,
}

impl PointerTarget {
    /// Step direction for the step controls
    pub fn step_direction(self) -> Option<StepDirection> {
        match self {
            PointerTarget::StepUp => Some(StepDirection::Up),
            PointerTarget::StepDown => Some(StepDirection::Down),
            PointerTarget::Handle | PointerTarget::Track => None,
        }
    }

    pub fn is_step_control(self) -> bool {
        self.step_direction().is_some()
    }
}

/// Normalized input delivered by the host.
///
/// Positions are vertical coordinates in track space (0 = track top).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Pointer pressed on a scrollbar part.
    PointerDown {
        target: PointerTarget,
        position: f32,
    },
    /// Pointer moved anywhere in the document.
    PointerMove { position: f32 },
    /// Pointer released anywhere in the document.
    PointerUp,
    /// Pointer entered a scrollbar part.
    PointerEnter { target: PointerTarget },
    /// Pointer left a scrollbar part.
    PointerLeave { target: PointerTarget },
    /// Container or content size changed.
    Resize { dimensions: Dimensions },
}
