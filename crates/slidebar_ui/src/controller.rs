//! Handle position state machine.
//!
//! [`HandleController`] owns the handle offset and the active gesture. Every
//! command that moves the handle returns an [`OffsetChange`] carrying both the
//! new handle offset and the matching content scroll offset, so the two are
//! always applied together.

use web_time::Instant;

use crate::config::ScrollbarConfig;
use crate::constants::PAGE_FRACTION;
use crate::error::ScrollbarError;
use crate::geometry::{clamp, proportional_scroll, Dimensions, HandleGeometry};
use crate::state::{DragState, Gesture, StepDirection, StepTimer};

/// A committed handle move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetChange {
    /// New handle top within the track
    pub handle_offset: f32,
    /// Content scroll position matching the handle offset
    pub scroll_offset: f32,
}

/// Owns the handle offset and drives it from drag, paging, and stepping commands.
///
/// Drag and step are mutually exclusive: starting one force-stops the other.
#[derive(Debug, Clone)]
pub struct HandleController {
    dimensions: Dimensions,
    geometry: HandleGeometry,
    config: ScrollbarConfig,
    offset: f32,
    gesture: Gesture,
}

impl HandleController {
    /// Create a controller at offset 0.
    ///
    /// Fails if the dimensions or config are invalid, or if the content fits in
    /// the container.
    pub fn new(dimensions: Dimensions, config: ScrollbarConfig) -> Result<Self, ScrollbarError> {
        config.validate()?;
        check_dimensions(&dimensions)?;

        let geometry = HandleGeometry::from_dimensions(&dimensions, config.handle_min_height);
        Ok(Self {
            dimensions,
            geometry,
            config,
            offset: geometry.range.min,
            gesture: Gesture::Idle,
        })
    }

    /// Current handle offset
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Content scroll position for the current handle offset
    pub fn scroll_offset(&self) -> f32 {
        proportional_scroll(
            self.offset,
            self.geometry.range,
            self.dimensions.content_height,
            self.dimensions.container_height,
        )
    }

    pub fn geometry(&self) -> &HandleGeometry {
        &self.geometry
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn config(&self) -> &ScrollbarConfig {
        &self.config
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn is_stepping(&self) -> bool {
        self.gesture.is_stepping()
    }

    /// The current offset as a change notification
    pub fn current(&self) -> OffsetChange {
        OffsetChange {
            handle_offset: self.offset,
            scroll_offset: self.scroll_offset(),
        }
    }

    /// Clamp and store a new offset. All offset writes go through here.
    fn commit(&mut self, proposed: f32) -> OffsetChange {
        self.offset = clamp(proposed, self.geometry.range);
        let change = self.current();
        log::trace!(
            "Scrollbar: handle at {:.1}, content scrolled to {:.1}",
            change.handle_offset,
            change.scroll_offset
        );
        change
    }

    // =========================================================================
    // Dragging
    // =========================================================================

    /// Begin dragging the handle from `pointer`. Stops any active stepping.
    pub fn start_drag(&mut self, pointer: f32) {
        if self.step_stop() {
            log::debug!("Scrollbar: stepping stopped by drag start");
        }
        self.gesture = Gesture::Dragging(DragState::new(self.offset, pointer));
        log::debug!("Scrollbar: drag started at offset {:.1}", self.offset);
    }

    /// Move the dragged handle so it follows the pointer.
    ///
    /// Returns `None` when no drag is active.
    pub fn drag_to(&mut self, pointer: f32) -> Option<OffsetChange> {
        let proposed = self.gesture.drag()?.proposed_offset(pointer);
        Some(self.commit(proposed))
    }

    /// Finish the drag, keeping the handle where it is.
    ///
    /// Returns whether a drag was active.
    pub fn end_drag(&mut self) -> bool {
        if !self.gesture.is_dragging() {
            return false;
        }
        self.gesture = Gesture::Idle;
        log::debug!("Scrollbar: drag ended at offset {:.1}", self.offset);
        true
    }

    // =========================================================================
    // Paging
    // =========================================================================

    /// Move the handle halfway toward the end of the track the pointer is on.
    ///
    /// A pointer below the handle top pages down, anything else pages up.
    pub fn page_toward(&mut self, pointer: f32) -> OffsetChange {
        self.release();

        let range = self.geometry.range;
        let proposed = if self.offset < pointer {
            self.offset + (range.max - self.offset) * PAGE_FRACTION
        } else {
            self.offset - (self.offset - range.min) * PAGE_FRACTION
        };
        log::debug!(
            "Scrollbar: paging {} from {:.1}",
            if proposed >= self.offset { "down" } else { "up" },
            self.offset
        );
        self.commit(proposed)
    }

    // =========================================================================
    // Stepping
    // =========================================================================

    /// Move the handle by one step.
    pub fn step(&mut self, direction: StepDirection) -> OffsetChange {
        let proposed = self.offset + direction.sign() * self.config.arrow_scroll_distance;
        self.commit(proposed)
    }

    /// Start repeated stepping: one step now, then one per interval via [`Self::poll`].
    ///
    /// Ends any active drag first.
    pub fn step_start(&mut self, direction: StepDirection, now: Instant) -> OffsetChange {
        if self.end_drag() {
            log::debug!("Scrollbar: drag ended by step start");
        }
        self.gesture =
            Gesture::Stepping(StepTimer::start(direction, self.config.arrow_scroll_speed, now));
        log::debug!("Scrollbar: stepping {:?}", direction);
        self.step(direction)
    }

    /// Apply every step that came due by `now`, one change per step.
    ///
    /// Once the handle reaches the end of the track in the step direction the
    /// remaining due steps can't move it, so they are dropped and the timer
    /// resumes from the first deadline after `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<OffsetChange> {
        let mut changes = Vec::new();
        while let Gesture::Stepping(timer) = &mut self.gesture {
            if !timer.take_due(now) {
                break;
            }
            let direction = timer.direction();
            changes.push(self.step(direction));

            if self.at_track_end(direction) {
                if let Gesture::Stepping(timer) = &mut self.gesture {
                    timer.skip_due(now);
                }
                break;
            }
        }
        changes
    }

    fn at_track_end(&self, direction: StepDirection) -> bool {
        let range = self.geometry.range;
        match direction {
            StepDirection::Up => self.offset <= range.min,
            StepDirection::Down => self.offset >= range.max,
        }
    }

    /// When the next step is due, if stepping
    pub fn next_step_deadline(&self) -> Option<Instant> {
        self.gesture.step_timer().and_then(StepTimer::next_tick)
    }

    /// Stop repeated stepping.
    ///
    /// Returns whether stepping was active.
    pub fn step_stop(&mut self) -> bool {
        if !self.gesture.is_stepping() {
            return false;
        }
        self.gesture = Gesture::Idle;
        log::debug!("Scrollbar: stepping stopped at offset {:.1}", self.offset);
        true
    }

    /// End whatever gesture is active. A release with nothing active is a no-op.
    ///
    /// Returns whether a gesture was ended.
    pub fn release(&mut self) -> bool {
        self.end_drag() || self.step_stop()
    }

    // =========================================================================
    // Resizing
    // =========================================================================

    /// Recompute geometry for new dimensions.
    ///
    /// Invalid dimensions (or content that now fits) leave the controller
    /// unchanged. Returns a change when the handle had to be reclamped or the
    /// matching scroll position moved.
    pub fn resize(&mut self, dimensions: Dimensions) -> Result<Option<OffsetChange>, ScrollbarError> {
        check_dimensions(&dimensions)?;

        let previous = self.current();
        self.dimensions = dimensions;
        self.geometry = HandleGeometry::from_dimensions(&dimensions, self.config.handle_min_height);
        log::debug!(
            "Scrollbar: resized, handle {:.1}, range [{:.1}, {:.1}]",
            self.geometry.handle_height,
            self.geometry.range.min,
            self.geometry.range.max
        );

        if !self.geometry.range.contains(self.offset) {
            return Ok(Some(self.commit(self.offset)));
        }
        let current = self.current();
        if current != previous {
            Ok(Some(current))
        } else {
            Ok(None)
        }
    }
}

fn check_dimensions(dimensions: &Dimensions) -> Result<(), ScrollbarError> {
    dimensions.validate()?;
    if !dimensions.needs_scrollbar() {
        return Err(ScrollbarError::ContentFits {
            content: dimensions.content_height,
            container: dimensions.container_height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn controller() -> HandleController {
        // handle 40, range [0, 160]
        HandleController::new(Dimensions::new(200.0, 1000.0), ScrollbarConfig::default()).unwrap()
    }

    fn assert_in_range(controller: &HandleController) {
        let range = controller.geometry().range;
        assert!(
            range.contains(controller.offset()),
            "offset {} outside [{}, {}]",
            controller.offset(),
            range.min,
            range.max
        );
    }

    #[test]
    fn test_new_starts_at_zero() {
        let c = controller();
        assert_eq!(c.offset(), 0.0);
        assert_eq!(c.scroll_offset(), 0.0);
        assert!(c.gesture().is_idle());
    }

    #[test]
    fn test_new_rejects_fitting_content() {
        let result = HandleController::new(Dimensions::new(200.0, 150.0), ScrollbarConfig::default());
        assert!(matches!(result, Err(ScrollbarError::ContentFits { .. })));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = ScrollbarConfig::new().arrow_scroll_distance(-5.0);
        let result = HandleController::new(Dimensions::new(200.0, 1000.0), config);
        assert!(matches!(result, Err(ScrollbarError::InvalidConfig { .. })));
    }

    #[test]
    fn test_drag_follows_pointer() {
        let mut c = controller();
        c.start_drag(100.0);
        let change = c.drag_to(130.0).unwrap();
        assert!((change.handle_offset - 30.0).abs() < 0.001);
        assert!((change.scroll_offset - 150.0).abs() < 0.001);
        assert!(c.end_drag());
        assert!((c.offset() - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_drag_clamps_huge_deltas() {
        let mut c = controller();
        c.start_drag(0.0);
        for pointer in [1e7, -1e7, 161.0, -0.5, 80.0] {
            c.drag_to(pointer);
            assert_in_range(&c);
        }
        c.drag_to(1e7);
        assert!((c.offset() - 160.0).abs() < 0.001);
        c.drag_to(-1e7);
        assert!((c.offset() - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_drag_round_trip_restores_offset() {
        let mut c = controller();
        c.start_drag(10.0);
        c.drag_to(60.0);
        c.end_drag();
        let before = c.offset();

        c.start_drag(300.0);
        c.drag_to(250.0);
        c.drag_to(9999.0);
        c.drag_to(300.0);
        c.end_drag();
        assert!((c.offset() - before).abs() < 0.001);
    }

    #[test]
    fn test_second_drag_starts_from_committed_offset() {
        let mut c = controller();
        c.start_drag(0.0);
        c.drag_to(50.0);
        c.end_drag();

        c.start_drag(500.0);
        let change = c.drag_to(510.0).unwrap();
        assert!((change.handle_offset - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_drag_to_without_drag_is_ignored() {
        let mut c = controller();
        assert!(c.drag_to(80.0).is_none());
        assert_eq!(c.offset(), 0.0);
        assert!(!c.end_drag());
    }

    #[test]
    fn test_page_toward_direction() {
        let mut c = controller();
        c.start_drag(0.0);
        c.drag_to(50.0);
        c.end_drag();

        // Pointer below the handle top pages toward range.max
        let down = c.clone().page_toward(80.0);
        assert!((down.handle_offset - 105.0).abs() < 0.001);

        // Pointer above pages toward range.min
        let up = c.page_toward(20.0);
        assert!((up.handle_offset - 25.0).abs() < 0.001);
    }

    #[test]
    fn test_page_at_handle_top_pages_up() {
        let mut c = controller();
        c.start_drag(0.0);
        c.drag_to(40.0);
        c.end_drag();
        let change = c.page_toward(40.0);
        assert!((change.handle_offset - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_repeated_paging_stays_in_range() {
        let mut c = controller();
        for _ in 0..50 {
            c.page_toward(1e6);
            assert_in_range(&c);
        }
        assert!(c.offset() <= 160.0);
        for _ in 0..50 {
            c.page_toward(-1e6);
            assert_in_range(&c);
        }
        assert!(c.offset() >= 0.0);
    }

    #[test]
    fn test_step_start_moves_immediately() {
        let mut c = controller();
        let now = Instant::now();
        let change = c.step_start(StepDirection::Down, now);
        assert!((change.handle_offset - 10.0).abs() < 0.001);
        assert!(c.is_stepping());
        assert_eq!(c.next_step_deadline(), Some(now + Duration::from_millis(100)));
    }

    #[test]
    fn test_stepping_down_clamps_at_range_max() {
        let mut c = controller();
        let start = Instant::now();
        c.step_start(StepDirection::Down, start);
        // 19 more ticks: 20 steps of 10 would reach 200. The 15th reaches the
        // end of the track and the rest are dropped.
        let changes = c.poll(start + Duration::from_millis(19 * 100));
        assert_eq!(changes.len(), 15);
        assert!((c.offset() - 160.0).abs() < 0.001);
        assert_eq!(c.next_step_deadline(), Some(start + Duration::from_millis(2000)));
        for change in changes {
            assert!(change.handle_offset <= 160.0);
        }
    }

    #[test]
    fn test_stepping_up_clamps_at_range_min() {
        let mut c = controller();
        let start = Instant::now();
        c.step_start(StepDirection::Up, start);
        c.poll(start + Duration::from_secs(5));
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn test_late_poll_stops_at_track_end() {
        let config = ScrollbarConfig::new().arrow_scroll_speed(Duration::from_millis(1));
        let mut c = HandleController::new(Dimensions::new(200.0, 1000.0), config).unwrap();
        let start = Instant::now();
        c.step_start(StepDirection::Down, start);

        let now = start + Duration::from_secs(600);
        let changes = c.poll(now);
        assert_eq!(changes.len(), 15);
        assert!((c.offset() - 160.0).abs() < 0.001);

        // Timer keeps running from the first deadline after the gap
        assert!(c.is_stepping());
        assert_eq!(c.next_step_deadline(), Some(now + Duration::from_millis(1)));
        assert_eq!(c.poll(now + Duration::from_millis(5)).len(), 1);
    }

    #[test]
    fn test_huge_step_interval_does_not_panic() {
        let config = ScrollbarConfig::new().arrow_scroll_speed(Duration::MAX);
        assert!(config.validate().is_ok());
        let mut c = HandleController::new(Dimensions::new(200.0, 1000.0), config).unwrap();
        let start = Instant::now();

        let change = c.step_start(StepDirection::Down, start);
        assert!((change.handle_offset - 10.0).abs() < 0.001);
        assert!(c.next_step_deadline().is_none());
        assert!(c.poll(start + Duration::from_secs(3600)).is_empty());
        assert!(c.step_stop());
    }

    #[test]
    fn test_drag_keeps_anchors_across_resize() {
        let mut c = controller();
        c.start_drag(0.0);
        c.drag_to(100.0);
        c.end_drag();

        // Anchors: offset 100, pointer 50
        c.start_drag(50.0);
        // handle 100, range [0, 100]
        c.resize(Dimensions::new(200.0, 400.0)).unwrap();
        assert!(c.is_dragging());

        let change = c.drag_to(80.0).unwrap();
        assert!((change.handle_offset - 100.0).abs() < 0.001);
        let change = c.drag_to(20.0).unwrap();
        assert!((change.handle_offset - 70.0).abs() < 0.001);
        assert!((change.scroll_offset - 140.0).abs() < 0.001);
    }

    #[test]
    fn test_poll_before_due_does_nothing() {
        let mut c = controller();
        let start = Instant::now();
        c.step_start(StepDirection::Down, start);
        assert!(c.poll(start + Duration::from_millis(50)).is_empty());
        assert!((c.offset() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_step_stop_cancels_timer() {
        let mut c = controller();
        let start = Instant::now();
        c.step_start(StepDirection::Down, start);
        assert!(c.step_stop());
        assert!(c.poll(start + Duration::from_secs(1)).is_empty());
        assert!(c.next_step_deadline().is_none());
        assert!((c.offset() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_release_stops_stepping() {
        let mut c = controller();
        let start = Instant::now();
        c.step_start(StepDirection::Down, start);
        assert!(c.release());
        assert!(c.gesture().is_idle());
        assert!(!c.release());
    }

    #[test]
    fn test_drag_start_stops_stepping() {
        let mut c = controller();
        let start = Instant::now();
        c.step_start(StepDirection::Down, start);
        c.start_drag(0.0);
        assert!(c.is_dragging());
        assert!(c.poll(start + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_step_start_ends_drag() {
        let mut c = controller();
        c.start_drag(0.0);
        c.drag_to(30.0);
        let change = c.step_start(StepDirection::Down, Instant::now());
        assert!(!c.is_dragging());
        assert!((change.handle_offset - 40.0).abs() < 0.001);
        assert!(c.drag_to(1000.0).is_none());
    }

    #[test]
    fn test_resize_reclamps_offset() {
        let mut c = controller();
        c.start_drag(0.0);
        c.drag_to(150.0);
        c.end_drag();

        // handle 100, range [0, 100]
        let change = c.resize(Dimensions::new(200.0, 400.0)).unwrap().unwrap();
        assert!((change.handle_offset - 100.0).abs() < 0.001);
        assert!((change.scroll_offset - 200.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_rejection_keeps_geometry() {
        let mut c = controller();
        let before = *c.geometry();
        assert!(c.resize(Dimensions::new(200.0, 100.0)).is_err());
        assert!(c.resize(Dimensions::new(-200.0, 1000.0)).is_err());
        assert_eq!(*c.geometry(), before);
        assert_eq!(c.dimensions().content_height, 1000.0);
    }

    #[test]
    fn test_resize_without_change() {
        let mut c = controller();
        assert!(c.resize(Dimensions::new(200.0, 1000.0)).unwrap().is_none());
    }

    #[test]
    fn test_degenerate_geometry_pins_handle() {
        let config = ScrollbarConfig::new().handle_min_height(500.0);
        let mut c = HandleController::new(Dimensions::new(200.0, 1000.0), config).unwrap();
        assert!((c.geometry().handle_height - 200.0).abs() < 0.001);

        c.start_drag(0.0);
        let change = c.drag_to(100.0).unwrap();
        assert_eq!(change.handle_offset, 0.0);
        assert_eq!(change.scroll_offset, 0.0);
        assert_eq!(c.page_toward(150.0).handle_offset, 0.0);
    }
}
