//! slidebar_ui - A styled replacement for a platform scrollbar
//!
//! The crate computes handle length and travel range from the content-to-viewport
//! ratio, and drives the handle from drag, track-click paging, and held step
//! controls. Presentation and input delivery belong to the host: it implements
//! [`ScrollbarRenderer`] and feeds normalized pointer events into a [`Scrollbar`].

mod config;
mod constants;
mod controller;
mod error;
mod event;
mod geometry;
mod renderer;
mod scrollbar;
mod state;

pub use config::ScrollbarConfig;
pub use constants::{ARROW_SCROLL_DISTANCE, ARROW_SCROLL_SPEED, HANDLE_MIN_HEIGHT, PAGE_FRACTION};
pub use controller::{HandleController, OffsetChange};
pub use error::ScrollbarError;
pub use event::{Event, PointerTarget};
pub use geometry::{
    clamp, compute_handle_geometry, proportional_scroll, Dimensions, HandleGeometry, TravelRange,
};
pub use renderer::{CommandBuffer, RenderCommand, ScrollbarRenderer};
pub use scrollbar::Scrollbar;
pub use state::{DragState, Gesture, StepDirection, StepTimer};

// Hosts schedule step polling with the same clock the widget uses
pub use web_time::Instant;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::ScrollbarConfig;
    pub use crate::event::{Event, PointerTarget};
    pub use crate::geometry::Dimensions;
    pub use crate::renderer::{CommandBuffer, ScrollbarRenderer};
    pub use crate::scrollbar::Scrollbar;
    pub use crate::Instant;
}
