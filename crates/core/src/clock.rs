//! Gravity clock - turns elapsed wall time into fixed-rate ticks
//!
//! The clock fires once every `1000 / speed` milliseconds. Pausing disarms it, so
//! elapsed time is simply not counted; nothing is polled while disarmed. Changing
//! the speed swaps the interval but keeps the carried remainder, so a speed
//! change never drops or duplicates a tick.

use crate::types::BASE_SPEED;

/// Convert a speed in ticks per second to a tick interval in milliseconds
pub fn interval_for_speed(speed: f32) -> u32 {
    ((1000.0 / speed).round() as u32).max(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravityClock {
    interval_ms: u32,
    carry_ms: u32,
    armed: bool,
}

impl GravityClock {
    /// Armed clock at `speed` with nothing accumulated
    pub fn new(speed: f32) -> Self {
        Self {
            interval_ms: interval_for_speed(speed),
            carry_ms: 0,
            armed: true,
        }
    }

    /// Start over at `speed`: drop any carried time and arm
    pub fn restart(&mut self, speed: f32) {
        *self = Self::new(speed);
    }

    /// Swap the interval, keeping the carried time
    pub fn set_speed(&mut self, speed: f32) {
        self.interval_ms = interval_for_speed(speed);
    }

    /// Stop counting time
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Resume counting from where the clock was disarmed
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Add elapsed time; ignored while disarmed
    pub fn accumulate(&mut self, elapsed_ms: u32) {
        if self.armed {
            self.carry_ms = self.carry_ms.saturating_add(elapsed_ms);
        }
    }

    /// Consume one due tick, if any
    pub fn take_due(&mut self) -> bool {
        if !self.armed || self.carry_ms < self.interval_ms {
            return false;
        }
        self.carry_ms -= self.interval_ms;
        true
    }
}

impl Default for GravityClock {
    fn default() -> Self {
        Self::new(BASE_SPEED)
    }
}
