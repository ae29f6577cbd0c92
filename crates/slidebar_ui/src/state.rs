//! Interaction state for the scrollbar handle

use std::time::Duration;

use web_time::Instant;

/// Anchors captured when a handle drag starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Handle offset at gesture start
    pub anchor_offset: f32,
    /// Pointer position at gesture start
    pub anchor_pointer: f32,
}

impl DragState {
    pub fn new(anchor_offset: f32, anchor_pointer: f32) -> Self {
        Self {
            anchor_offset,
            anchor_pointer,
        }
    }

    /// Unclamped handle offset for the given pointer position
    pub fn proposed_offset(&self, pointer: f32) -> f32 {
        self.anchor_offset + (pointer - self.anchor_pointer)
    }
}

/// Direction of a step control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    /// Toward the start of the content (-1)
    Up,
    /// Toward the end of the content (+1)
    Down,
}

impl StepDirection {
    /// -1.0 for up, +1.0 for down
    pub fn sign(self) -> f32 {
        match self {
            StepDirection::Up => -1.0,
            StepDirection::Down => 1.0,
        }
    }
}

/// Repeating step action while a step control is held.
///
/// Owned by the controller; dropping it cancels the repetition. A deadline past
/// the end of the clock's range means the next repeat is never due.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTimer {
    direction: StepDirection,
    interval: Duration,
    next_tick: Option<Instant>,
}

impl StepTimer {
    /// Smallest accepted interval, so a zero interval can't spin forever
    const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Start a timer whose first repeat is due one interval after `now`
    pub fn start(direction: StepDirection, interval: Duration, now: Instant) -> Self {
        let interval = interval.max(Self::MIN_INTERVAL);
        Self {
            direction,
            interval,
            next_tick: now.checked_add(interval),
        }
    }

    pub fn direction(&self) -> StepDirection {
        self.direction
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next repeat is due, if ever
    pub fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Consume one due repeat, if `now` has reached it
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(next) if now >= next => {
                self.next_tick = next.checked_add(self.interval);
                true
            }
            _ => false,
        }
    }

    /// Drop every repeat due by `now`, moving the deadline to the first one after it
    pub fn skip_due(&mut self, now: Instant) {
        let Some(next) = self.next_tick else {
            return;
        };
        if now < next {
            return;
        }
        let behind = now.duration_since(next).as_nanos() / self.interval.as_nanos() + 1;
        self.next_tick = u32::try_from(behind)
            .ok()
            .and_then(|count| self.interval.checked_mul(count))
            .and_then(|skip| next.checked_add(skip));
    }
}

/// The single gesture a scrollbar can be driving at a time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Handle is being dragged
    Dragging(DragState),
    /// A step control is held
    Stepping(StepTimer),
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Gesture::Dragging(_))
    }

    pub fn is_stepping(&self) -> bool {
        matches!(self, Gesture::Stepping(_))
    }

    /// Drag anchors, if dragging
    pub fn drag(&self) -> Option<&DragState> {
        match self {
            Gesture::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    /// Step timer, if stepping
    pub fn step_timer(&self) -> Option<&StepTimer> {
        match self {
            Gesture::Stepping(timer) => Some(timer),
            _ => None,
        }
    }
}
