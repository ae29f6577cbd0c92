//! Scrollbar configuration.
//!
//! Centralizes the tunable options of a scrollbar instance. Values can be set
//! through the builder methods or deserialized from a config file; missing
//! fields fall back to the crate defaults (30 px handle floor, 100 ms step
//! interval, 10 px step distance).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{ARROW_SCROLL_DISTANCE, ARROW_SCROLL_SPEED, HANDLE_MIN_HEIGHT};
use crate::error::ScrollbarError;

/// Options recognized by [`crate::Scrollbar::attach`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollbarConfig {
    /// Minimum handle length (the handle never shrinks below this unless the
    /// track itself is shorter)
    pub handle_min_height: f32,
    /// Interval between repeated steps while a step control is held
    #[serde(rename = "arrow_scroll_speed_ms", with = "duration_ms")]
    pub arrow_scroll_speed: Duration,
    /// Handle distance covered by one step
    pub arrow_scroll_distance: f32,
}

impl Default for ScrollbarConfig {
    fn default() -> Self {
        Self {
            handle_min_height: HANDLE_MIN_HEIGHT,
            arrow_scroll_speed: ARROW_SCROLL_SPEED,
            arrow_scroll_distance: ARROW_SCROLL_DISTANCE,
        }
    }
}

impl ScrollbarConfig {
    /// Create a new scrollbar configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum handle length.
    pub fn handle_min_height(mut self, height: f32) -> Self {
        self.handle_min_height = height;
        self
    }

    /// Set the step repeat interval.
    pub fn arrow_scroll_speed(mut self, interval: Duration) -> Self {
        self.arrow_scroll_speed = interval;
        self
    }

    /// Set the distance covered by one step.
    pub fn arrow_scroll_distance(mut self, distance: f32) -> Self {
        self.arrow_scroll_distance = distance;
        self
    }

    /// Check that every option is usable.
    pub fn validate(&self) -> Result<(), ScrollbarError> {
        if !self.handle_min_height.is_finite() || self.handle_min_height < 0.0 {
            return Err(ScrollbarError::InvalidConfig {
                message: format!(
                    "handle_min_height must be a finite non-negative number, got {}",
                    self.handle_min_height
                ),
            });
        }
        if self.arrow_scroll_speed.is_zero() {
            return Err(ScrollbarError::InvalidConfig {
                message: "arrow_scroll_speed must be greater than zero".to_string(),
            });
        }
        if !self.arrow_scroll_distance.is_finite() || self.arrow_scroll_distance <= 0.0 {
            return Err(ScrollbarError::InvalidConfig {
                message: format!(
                    "arrow_scroll_distance must be a finite positive number, got {}",
                    self.arrow_scroll_distance
                ),
            });
        }
        Ok(())
    }
}

/// Serialize a `Duration` as whole milliseconds.
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
