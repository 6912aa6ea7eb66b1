use std::time::Duration;

/// Accumulates frame deltas and fires once per movement interval
///
/// Leftover time past the interval is dropped when a tick fires, so movement
/// speed follows the frame pacing rather than a strict fixed timestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickClock {
    interval: Duration,
    accumulated: Duration,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    /// Add one frame's elapsed time; returns true when a tick is due
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.accumulated = self.accumulated.saturating_add(delta);
        if self.accumulated > self.interval {
            self.accumulated = Duration::ZERO;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_fires_only_past_interval() {
        let mut clock = TickClock::new(Duration::from_millis(100));

        assert!(!clock.advance(Duration::from_millis(60)));
        assert!(!clock.advance(Duration::from_millis(40))); // exactly 100: not yet
        assert!(clock.advance(Duration::from_millis(1)));
    }

    #[test]
    fn test_leftover_is_discarded() {
        let mut clock = TickClock::new(Duration::from_millis(100));

        assert!(clock.advance(Duration::from_millis(250)));
        // A 250 ms stall produces one tick, not two
        assert!(!clock.advance(Duration::from_millis(50)));
    }

    #[test]
    fn test_frame_pacing() {
        let mut clock = TickClock::new(Duration::from_millis(100));
        let ticks = (0..70).filter(|_| clock.advance(FRAME)).count();

        // 16 ms frames reach 112 ms on every seventh frame
        assert_eq!(ticks, 10);
    }

    #[test]
    fn test_reset() {
        let mut clock = TickClock::new(Duration::from_millis(100));
        clock.advance(Duration::from_millis(90));
        clock.reset();
        assert!(!clock.advance(Duration::from_millis(90)));
        assert_eq!(clock.interval(), Duration::from_millis(100));
    }
}
