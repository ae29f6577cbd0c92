//! Handle geometry calculation
//!
//! Pure functions turning container/content/track sizes into a handle length
//! and travel range, and mapping a handle offset to a content scroll offset.
//! Nothing here holds state.

use serde::{Deserialize, Serialize};

use crate::error::ScrollbarError;

/// Sizes reported by the host, in content units (e.g. pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Visible height of the container
    pub container_height: f32,
    /// Total height of the scrolled content
    pub content_height: f32,
    /// Height of the handle track (container minus any step controls)
    pub track_height: f32,
}

impl Dimensions {
    /// Create dimensions where the track spans the whole container
    pub fn new(container_height: f32, content_height: f32) -> Self {
        Self {
            container_height,
            content_height,
            track_height: container_height,
        }
    }

    /// Set a track height different from the container height
    pub fn with_track_height(mut self, track_height: f32) -> Self {
        self.track_height = track_height;
        self
    }

    /// Whether the content overflows the container
    pub fn needs_scrollbar(&self) -> bool {
        self.content_height > self.container_height
    }

    /// Reject negative, non-finite, or zero-content dimensions
    pub fn validate(&self) -> Result<(), ScrollbarError> {
        for (name, value) in [
            ("container_height", self.container_height),
            ("content_height", self.content_height),
            ("track_height", self.track_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScrollbarError::InvalidDimension { name, value });
            }
        }
        if self.content_height <= 0.0 {
            return Err(ScrollbarError::NonPositiveContent {
                value: self.content_height,
            });
        }
        Ok(())
    }
}

/// Valid handle offsets, `[min, max]` with `min <= max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelRange {
    /// Topmost handle offset
    pub min: f32,
    /// Bottommost handle offset
    pub max: f32,
}

impl TravelRange {
    /// Create a range, swapping the bounds if given in the wrong order
    pub fn new(min: f32, max: f32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// A range that allows only a single offset
    pub fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Length of the range
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Whether the range allows exactly one offset
    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0.0
    }

    /// Whether `value` lies within `[min, max]`
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Handle length and travel range derived from [`Dimensions`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleGeometry {
    /// Handle length along the track
    pub handle_height: f32,
    /// Offsets the handle top may take
    pub range: TravelRange,
}

impl HandleGeometry {
    /// Compute geometry for the given dimensions and minimum handle length
    pub fn from_dimensions(dimensions: &Dimensions, min_height: f32) -> Self {
        compute_handle_geometry(
            dimensions.container_height,
            dimensions.content_height,
            dimensions.track_height,
            min_height,
        )
    }
}

// =============================================================================
// Geometry Calculation
// =============================================================================

/// Calculate handle length and travel range.
///
/// The handle covers the visible fraction of the content, scaled to the track,
/// but never less than `min_height`. When that floor would make the handle
/// longer than the track, the handle fills the track and the range collapses
/// to `[0, 0]`.
pub fn compute_handle_geometry(
    container_height: f32,
    content_height: f32,
    track_height: f32,
    min_height: f32,
) -> HandleGeometry {
    let track_height = track_height.max(0.0);

    // Nothing to scale against; the handle fills the track
    if content_height <= 0.0 {
        return HandleGeometry {
            handle_height: track_height,
            range: TravelRange::fixed(0.0),
        };
    }

    let handle_height = (container_height * track_height / content_height).max(min_height);
    if handle_height > track_height {
        return HandleGeometry {
            handle_height: track_height,
            range: TravelRange::fixed(0.0),
        };
    }

    HandleGeometry {
        handle_height,
        range: TravelRange::new(0.0, track_height - handle_height),
    }
}

// =============================================================================
// Clamping
// =============================================================================

/// Clamp a value into a range.
///
/// Total: NaN maps to `range.min` so it never reaches the renderer.
pub fn clamp(value: f32, range: TravelRange) -> f32 {
    if value.is_nan() || value < range.min {
        range.min
    } else if value > range.max {
        range.max
    } else {
        value
    }
}

// =============================================================================
// Scroll Offset from Handle Offset
// =============================================================================

/// Map a handle offset linearly onto `[0, content_height - container_height]`.
///
/// Returns 0 for a degenerate range.
pub fn proportional_scroll(
    handle_offset: f32,
    range: TravelRange,
    content_height: f32,
    container_height: f32,
) -> f32 {
    if range.is_degenerate() {
        return 0.0;
    }

    let ratio = ((handle_offset - range.min) / range.span()).clamp(0.0, 1.0);
    let max_scroll = (content_height - container_height).max(0.0);
    ratio * max_scroll
}
