//! Fixed-interval tick accumulator
//!
//! Converts variable frame time into a whole number of fixed steps.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickClock {
    interval: f64,
    accumulated: f64,
}

impl TickClock {
    /// Non-positive intervals are treated as a single step per advance
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            accumulated: 0.0,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Time carried over towards the next step
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Add elapsed time, returns how many whole steps are now due
    pub fn advance(&mut self, dt: f64) -> u32 {
        if self.interval <= 0.0 {
            return 1;
        }
        self.accumulated += dt.max(0.0);
        // tolerance keeps 1.0 / 0.2 from landing on 4.999
        let steps = (self.accumulated / self.interval + 1e-4).floor();
        self.accumulated = (self.accumulated - steps * self.interval).max(0.0);
        steps as u32
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = TickClock::new(0.2);
        assert_eq!(clock.advance(0.1), 0);
        assert_eq!(clock.advance(0.15), 1);
        assert!((clock.accumulated() - 0.05).abs() < 1e-5);
    }

    #[test]
    fn test_large_frame_yields_many_steps() {
        let mut clock = TickClock::new(0.2);
        assert_eq!(clock.advance(1.0), 5);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut clock = TickClock::new(0.2);
        assert_eq!(clock.advance(-3.0), 0);
        assert_eq!(clock.accumulated(), 0.0);
    }
}
