//! Scripted input sessions.
//!
//! A session describes the container/content sizes and a timeline of host input
//! events. Replaying it drives a real [`Scrollbar`] on a simulated clock and
//! returns every renderer call in order, which makes interaction sequences easy
//! to inspect and to check in tests.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use slidebar_ui::{
    CommandBuffer, Dimensions, Event, Instant, RenderCommand, Scrollbar, ScrollbarConfig,
    ScrollbarError,
};
use thiserror::Error;

/// A host event at a point on the session timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Milliseconds since the session started
    pub at_ms: u64,
    /// The event delivered at that time
    pub event: Event,
}

/// A recorded interaction with a single scrollbar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Sizes reported when the scrollbar is attached
    pub dimensions: Dimensions,
    /// Events in non-decreasing time order
    #[serde(default)]
    pub events: Vec<TimedEvent>,
    /// Keep the clock running until this time after the last event
    #[serde(default)]
    pub until_ms: Option<u64>,
}

impl Session {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            events: Vec::new(),
            until_ms: None,
        }
    }

    /// Append an event at the given time.
    pub fn push(&mut self, at_ms: u64, event: Event) {
        self.events.push(TimedEvent { at_ms, event });
    }

    /// Keep stepping timers running until the given time.
    pub fn with_until(mut self, until_ms: u64) -> Self {
        self.until_ms = Some(until_ms);
        self
    }

    /// Deserialize a session from JSON.
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a session from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that event times never go backwards.
    pub fn validate(&self) -> Result<(), SessionError> {
        let mut previous = 0;
        for (index, entry) in self.events.iter().enumerate() {
            if entry.at_ms < previous {
                return Err(SessionError::OutOfOrder {
                    index,
                    at_ms: entry.at_ms,
                    previous,
                });
            }
            previous = entry.at_ms;
        }
        Ok(())
    }

    /// Replay the session and return the renderer calls it produced.
    ///
    /// Before each event, steps that came due on the simulated clock are applied,
    /// exactly as a host polling between input events would. A rejected resize is
    /// logged and the replay continues.
    pub fn replay(&self, config: &ScrollbarConfig) -> Result<Vec<RenderCommand>, SessionError> {
        self.validate()?;

        let mut scrollbar =
            Scrollbar::try_attach(CommandBuffer::new(), self.dimensions, config.clone())?;
        let start = Instant::now();

        for entry in &self.events {
            let now = start + Duration::from_millis(entry.at_ms);
            scrollbar.poll(now);
            if let Err(e) = scrollbar.handle_event(&entry.event, now) {
                log::warn!("Event at {} ms rejected: {}", entry.at_ms, e);
            }
        }

        if let Some(until_ms) = self.until_ms {
            scrollbar.poll(start + Duration::from_millis(until_ms));
        }

        log::info!("Replayed {} events", self.events.len());
        Ok(scrollbar.into_renderer().take())
    }
}

/// Errors that can occur when loading or replaying a session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// JSON parsing error
    #[error("Failed to parse session: {0}")]
    Parse(#[from] serde_json::Error),

    /// I/O error when reading the session
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Event times go backwards
    #[error("Event {index} at {at_ms} ms comes before the previous event at {previous} ms")]
    OutOfOrder {
        /// Position of the offending event
        index: usize,
        /// Its time
        at_ms: u64,
        /// Time of the event before it
        previous: u64,
    },

    /// The scrollbar could not be attached
    #[error("Scrollbar not attached: {0}")]
    Attach(#[from] ScrollbarError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidebar_ui::PointerTarget;

    fn session() -> Session {
        Session::new(Dimensions::new(200.0, 1000.0))
    }

    fn handle_positions(commands: &[RenderCommand]) -> Vec<f32> {
        commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::HandlePosition(offset) => Some(*offset),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_replay_drag() {
        let mut session = session();
        session.push(
            0,
            Event::PointerDown {
                target: PointerTarget::Handle,
                position: 5.0,
            },
        );
        session.push(10, Event::PointerMove { position: 45.0 });
        session.push(20, Event::PointerMove { position: 5.0 });
        session.push(30, Event::PointerUp);

        let commands = session.replay(&ScrollbarConfig::default()).unwrap();
        assert_eq!(commands[0], RenderCommand::HandleLength(40.0));
        assert_eq!(handle_positions(&commands), vec![0.0, 40.0, 0.0]);
        assert_eq!(commands.last(), Some(&RenderCommand::Drag(false)));
    }

    #[test]
    fn test_replay_held_step_control() {
        let mut session = session();
        session.push(
            0,
            Event::PointerDown {
                target: PointerTarget::StepDown,
                position: 195.0,
            },
        );
        session.push(250, Event::PointerUp);
        let session = session.with_until(2000);

        let commands = session.replay(&ScrollbarConfig::default()).unwrap();
        // Immediate step, then ticks at 100 and 200 ms, nothing after release
        assert_eq!(handle_positions(&commands), vec![0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_replay_step_runs_until_end_of_timeline() {
        let mut session = session();
        session.push(
            0,
            Event::PointerDown {
                target: PointerTarget::StepDown,
                position: 195.0,
            },
        );
        let session = session.with_until(5000);

        let commands = session.replay(&ScrollbarConfig::default()).unwrap();
        let positions = handle_positions(&commands);
        assert_eq!(positions.last(), Some(&160.0));
        assert!(positions.iter().all(|offset| (0.0..=160.0).contains(offset)));
    }

    #[test]
    fn test_replay_rejects_out_of_order_events() {
        let mut session = session();
        session.push(100, Event::PointerUp);
        session.push(50, Event::PointerUp);
        assert!(matches!(
            session.replay(&ScrollbarConfig::default()),
            Err(SessionError::OutOfOrder { index: 1, .. })
        ));
    }

    #[test]
    fn test_replay_content_fits() {
        let session = Session::new(Dimensions::new(200.0, 150.0));
        assert!(matches!(
            session.replay(&ScrollbarConfig::default()),
            Err(SessionError::Attach(ScrollbarError::ContentFits { .. }))
        ));
    }

    #[test]
    fn test_replay_continues_after_rejected_resize() {
        let mut session = session();
        session.push(
            0,
            Event::Resize {
                dimensions: Dimensions::new(200.0, 100.0),
            },
        );
        session.push(
            10,
            Event::PointerDown {
                target: PointerTarget::Track,
                position: 150.0,
            },
        );
        let commands = session.replay(&ScrollbarConfig::default()).unwrap();
        assert_eq!(handle_positions(&commands), vec![0.0, 80.0]);
    }

    #[test]
    fn test_session_from_json() {
        let json = r#"{
            "dimensions": { "container_height": 200, "content_height": 1000, "track_height": 180 },
            "events": [
                { "at_ms": 0, "event": { "type": "pointer_enter", "target": "handle" } },
                { "at_ms": 5, "event": { "type": "pointer_down", "target": "track", "position": 120 } }
            ]
        }"#;
        let session = Session::from_json(json).unwrap();
        assert_eq!(session.events.len(), 2);
        assert_eq!(session.dimensions.track_height, 180.0);
        assert!(session.until_ms.is_none());

        let commands = session.replay(&ScrollbarConfig::default()).unwrap();
        assert!(commands.contains(&RenderCommand::Hover {
            target: PointerTarget::Handle,
            hovered: true
        }));
    }
}
