//! Attached scrollbar instance.
//!
//! [`Scrollbar`] connects host input to the [`HandleController`] and pushes every
//! committed offset to the renderer as a handle position plus a content scroll
//! position, always as a pair.
//!
//! While a drag or step gesture is active the scrollbar holds a pointer capture:
//! moves and releases anywhere in the document are routed to it, so a release
//! outside the scrollbar still ends the gesture.

use web_time::Instant;

use crate::config::ScrollbarConfig;
use crate::controller::{HandleController, OffsetChange};
use crate::error::ScrollbarError;
use crate::event::{Event, PointerTarget};
use crate::geometry::Dimensions;
use crate::renderer::ScrollbarRenderer;

/// A scrollbar attached to a host container.
pub struct Scrollbar<R: ScrollbarRenderer> {
    renderer: R,
    controller: HandleController,
    attached: bool,
}

impl<R: ScrollbarRenderer> Scrollbar<R> {
    /// Attach a scrollbar, or return `None` when none is needed or the input is invalid.
    pub fn attach(renderer: R, dimensions: Dimensions, config: ScrollbarConfig) -> Option<Self> {
        match Self::try_attach(renderer, dimensions, config) {
            Ok(scrollbar) => Some(scrollbar),
            Err(e @ ScrollbarError::ContentFits { .. }) => {
                log::debug!("Scrollbar not attached: {}", e);
                None
            }
            Err(e) => {
                log::warn!("Scrollbar not attached: {}", e);
                None
            }
        }
    }

    /// Attach a scrollbar, reporting why it was rejected.
    pub fn try_attach(
        mut renderer: R,
        dimensions: Dimensions,
        config: ScrollbarConfig,
    ) -> Result<Self, ScrollbarError> {
        let controller = HandleController::new(dimensions, config)?;

        let geometry = controller.geometry();
        log::debug!(
            "Scrollbar attached: handle {:.1}, range [{:.1}, {:.1}]",
            geometry.handle_height,
            geometry.range.min,
            geometry.range.max
        );
        renderer.set_handle_length(geometry.handle_height);

        let mut scrollbar = Self {
            renderer,
            controller,
            attached: true,
        };
        scrollbar.apply(scrollbar.controller.current());
        Ok(scrollbar)
    }

    /// Release the pointer capture and any step timer. Later input is ignored.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.end_gesture();
        self.attached = false;
        log::debug!("Scrollbar detached");
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether a gesture currently captures document-wide moves and releases
    pub fn has_capture(&self) -> bool {
        self.attached && !self.controller.gesture().is_idle()
    }

    pub fn controller(&self) -> &HandleController {
        &self.controller
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Give the renderer back to the host
    pub fn into_renderer(mut self) -> R {
        self.detach();
        self.renderer
    }

    fn apply(&mut self, change: OffsetChange) {
        self.renderer.set_handle_position(change.handle_offset);
        self.renderer.set_content_scroll_position(change.scroll_offset);
    }

    /// End the active gesture, clearing drag feedback if it was a drag
    fn end_gesture(&mut self) -> bool {
        let was_dragging = self.controller.is_dragging();
        let ended = self.controller.release();
        if was_dragging {
            self.renderer.set_drag_visual(false);
        }
        ended
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Dispatch a normalized host event.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> Result<(), ScrollbarError> {
        match *event {
            Event::PointerDown { target, position } => self.on_pointer_down(target, position, now),
            Event::PointerMove { position } => self.on_pointer_move(position),
            Event::PointerUp => self.on_pointer_up(),
            Event::PointerEnter { target } => self.on_pointer_enter(target),
            Event::PointerLeave { target } => self.on_pointer_leave(target),
            Event::Resize { dimensions } => return self.on_resize(dimensions),
        }
        Ok(())
    }

    /// Pointer pressed on a scrollbar part.
    ///
    /// Handle starts a drag, track pages toward the pointer, step controls
    /// start repeated stepping.
    pub fn on_pointer_down(&mut self, target: PointerTarget, position: f32, now: Instant) {
        if !self.attached {
            return;
        }

        match target {
            PointerTarget::Handle => {
                self.controller.start_drag(position);
                self.renderer.set_drag_visual(true);
            }
            PointerTarget::Track => {
                self.end_gesture();
                let change = self.controller.page_toward(position);
                self.apply(change);
            }
            PointerTarget::StepUp | PointerTarget::StepDown => {
                if self.controller.is_dragging() {
                    self.end_gesture();
                }
                if let Some(direction) = target.step_direction() {
                    let change = self.controller.step_start(direction, now);
                    self.apply(change);
                }
            }
        }
    }

    /// Pointer moved; only a captured drag reacts.
    pub fn on_pointer_move(&mut self, position: f32) {
        if !self.has_capture() {
            return;
        }
        if let Some(change) = self.controller.drag_to(position) {
            self.apply(change);
        }
    }

    /// Pointer released anywhere; ends the captured gesture.
    pub fn on_pointer_up(&mut self) {
        if !self.has_capture() {
            return;
        }
        self.end_gesture();
    }

    /// Hover feedback for the handle and step controls.
    ///
    /// Step controls don't light up while the handle is being dragged.
    pub fn on_pointer_enter(&mut self, target: PointerTarget) {
        self.set_hover(target, true);
    }

    pub fn on_pointer_leave(&mut self, target: PointerTarget) {
        self.set_hover(target, false);
    }

    fn set_hover(&mut self, target: PointerTarget, hovered: bool) {
        if !self.attached || target == PointerTarget::Track {
            return;
        }
        if target.is_step_control() && self.controller.is_dragging() {
            return;
        }
        self.renderer.set_hover_visual(target, hovered);
    }

    /// Recompute geometry for new dimensions.
    ///
    /// Rejected dimensions leave the scrollbar unchanged.
    pub fn on_resize(&mut self, dimensions: Dimensions) -> Result<(), ScrollbarError> {
        if !self.attached {
            return Ok(());
        }

        let change = self.controller.resize(dimensions).map_err(|e| {
            log::warn!("Scrollbar resize rejected: {}", e);
            e
        })?;
        self.renderer
            .set_handle_length(self.controller.geometry().handle_height);
        if let Some(change) = change {
            self.apply(change);
        }
        Ok(())
    }

    // =========================================================================
    // Step Timer
    // =========================================================================

    /// Apply the steps that came due by `now`. Returns how many were applied.
    pub fn poll(&mut self, now: Instant) -> usize {
        if !self.attached {
            return 0;
        }
        let changes = self.controller.poll(now);
        for change in &changes {
            self.apply(*change);
        }
        changes.len()
    }

    /// When the host should call [`Self::poll`] next, if stepping
    pub fn next_step_deadline(&self) -> Option<Instant> {
        if !self.attached {
            return None;
        }
        self.controller.next_step_deadline()
    }
}
