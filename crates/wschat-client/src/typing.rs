//! Typing detector.
//!
//! Turns raw keystroke activity into two discrete protocol events: `true`
//! once per burst (rising edge) and `false` after a quiet period. The caller
//! supplies the clock so the detector itself is a plain state machine.

use tokio::time::{Duration, Instant};

use crate::config::TypingSection;

#[derive(Debug)]
pub struct TypingDetector {
    is_typing: bool,
    last_activity: Instant,
    idle_timeout: Duration,
    poll_interval: Duration,
}

impl TypingDetector {
    pub fn new(poll_interval: Duration, idle_timeout: Duration) -> Self {
        Self {
            is_typing: false,
            last_activity: Instant::now(),
            idle_timeout,
            poll_interval,
        }
    }

    pub fn from_config(cfg: &TypingSection) -> Self {
        Self::new(cfg.poll_interval(), cfg.idle_timeout())
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    /// Period of the timer that should call [`TypingDetector::poll`].
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Record a keystroke. Returns `Some(true)` on the rising edge only.
    ///
    /// Activity is stamped on the rising edge, so the quiet period is
    /// measured from the first keystroke of a burst.
    pub fn on_keystroke(&mut self, now: Instant) -> Option<bool> {
        if self.is_typing {
            return None;
        }
        self.is_typing = true;
        self.last_activity = now;
        Some(true)
    }

    /// Timer tick. Returns `Some(false)` once the quiet period is exceeded.
    pub fn poll(&mut self, now: Instant) -> Option<bool> {
        if !self.is_typing {
            return None;
        }
        if now.saturating_duration_since(self.last_activity) > self.idle_timeout {
            self.is_typing = false;
            return Some(false);
        }
        None
    }

    /// Forget any burst in progress (session torn down).
    pub fn reset(&mut self) {
        self.is_typing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> TypingDetector {
        TypingDetector::new(Duration::from_millis(500), Duration::from_millis(2500))
    }

    #[test]
    fn rising_edge_only() {
        let mut d = detector();
        let t0 = Instant::now();
        assert_eq!(d.on_keystroke(t0), Some(true));
        assert_eq!(d.on_keystroke(t0 + Duration::from_millis(100)), None);
        assert_eq!(d.on_keystroke(t0 + Duration::from_millis(200)), None);
        assert!(d.is_typing());
    }

    #[test]
    fn stops_once_after_quiet_period() {
        let mut d = detector();
        let t0 = Instant::now();
        d.on_keystroke(t0);

        assert_eq!(d.poll(t0 + Duration::from_millis(2000)), None);
        // exactly at the threshold is not "exceeded"
        assert_eq!(d.poll(t0 + Duration::from_millis(2500)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(3000)), Some(false));
        assert_eq!(d.poll(t0 + Duration::from_millis(3500)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(9000)), None);
    }

    #[test]
    fn quiet_period_runs_from_first_keystroke() {
        let mut d = detector();
        let t0 = Instant::now();
        assert_eq!(d.on_keystroke(t0), Some(true));
        assert_eq!(d.on_keystroke(t0 + Duration::from_millis(1000)), None);
        assert_eq!(d.on_keystroke(t0 + Duration::from_millis(2000)), None);

        assert_eq!(d.poll(t0 + Duration::from_millis(2500)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(2600)), Some(false));
        assert_eq!(d.on_keystroke(t0 + Duration::from_millis(2700)), Some(true));
        assert_eq!(d.poll(t0 + Duration::from_millis(5000)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(5300)), Some(false));
    }

    #[test]
    fn reset_drops_burst() {
        let mut d = detector();
        let t0 = Instant::now();
        d.on_keystroke(t0);
        d.reset();
        assert_eq!(d.poll(t0 + Duration::from_secs(10)), None);
        assert_eq!(d.on_keystroke(t0 + Duration::from_secs(11)), Some(true));
    }
}
