//! Centralized constants for slidebar_ui
//!
//! Default option values for the scrollbar and the fixed paging fraction.

use std::time::Duration;

// =============================================================================
// Handle
// =============================================================================

/// Default floor for the handle length
pub const HANDLE_MIN_HEIGHT: f32 = 30.0;

/// Fraction of the remaining travel covered by one click on the track
pub const PAGE_FRACTION: f32 = 0.5;

// =============================================================================
// Step Controls
// =============================================================================

/// Default interval between repeated steps while a step control is held (ms)
pub const ARROW_SCROLL_SPEED_MS: u64 = 100;

/// Default interval between repeated steps while a step control is held
pub const ARROW_SCROLL_SPEED: Duration = Duration::from_millis(ARROW_SCROLL_SPEED_MS);

/// Default handle distance covered by one step
pub const ARROW_SCROLL_DISTANCE: f32 = 10.0;
