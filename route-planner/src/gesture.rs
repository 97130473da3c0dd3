use directions::Coordinate;

pub const DEFAULT_HOLD_MS: f64 = 500.0;

/// Tells a deliberate press-and-hold apart from the start of a pan. A press only turns into a
/// tap if the pointer stays down and still for the whole dwell time. Timestamps come from the
/// caller (`performance.now()` in the browser).
#[derive(Clone, PartialEq, Debug)]
pub struct PressGesture {
    hold_ms: f64,
    pending: Option<Press>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
struct Press {
    at: Coordinate,
    started_ms: f64,
}

impl PressGesture {
    pub fn new(hold_ms: f64) -> Self {
        Self {
            hold_ms,
            pending: None,
        }
    }

    pub fn hold_ms(&self) -> f64 {
        self.hold_ms
    }

    pub fn set_hold_ms(&mut self, hold_ms: f64) {
        self.hold_ms = hold_ms;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts timing a new press, forgetting any earlier one
    pub fn press(&mut self, at: Coordinate, now_ms: f64) {
        self.pending = Some(Press {
            at,
            started_ms: now_ms,
        });
    }

    /// The pointer moved or the map started dragging
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Called when the host's dwell timer fires. Returns the tapped point once the press has
    /// been held long enough.
    pub fn elapsed(&mut self, now_ms: f64) -> Option<Coordinate> {
        let press = self.pending?;
        if now_ms - press.started_ms < self.hold_ms {
            return None;
        }
        self.pending = None;
        Some(press.at)
    }

    /// Releasing early cancels the press. Releasing after the dwell confirms it, in case the
    /// timer hasn't fired yet.
    pub fn release(&mut self, now_ms: f64) -> Option<Coordinate> {
        let confirmed = self.elapsed(now_ms);
        self.pending = None;
        confirmed
    }
}

impl Default for PressGesture {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt() -> Coordinate {
        Coordinate::new(51.5, -0.12).unwrap()
    }

    #[test]
    fn test_hold_confirms_once() {
        let mut gesture = PressGesture::default();
        gesture.press(pt(), 1000.0);
        assert_eq!(gesture.elapsed(1499.0), None);
        assert!(gesture.is_pending());
        assert_eq!(gesture.elapsed(1500.0), Some(pt()));
        assert!(!gesture.is_pending());
        // The release after a confirmed hold doesn't tap again
        assert_eq!(gesture.release(1600.0), None);
    }

    #[test]
    fn test_early_release_cancels() {
        let mut gesture = PressGesture::default();
        gesture.press(pt(), 0.0);
        assert_eq!(gesture.release(200.0), None);
        // Even if the timer fires late, nothing happens
        assert_eq!(gesture.elapsed(600.0), None);
    }

    #[test]
    fn test_late_release_confirms() {
        let mut gesture = PressGesture::new(300.0);
        gesture.press(pt(), 0.0);
        assert_eq!(gesture.release(350.0), Some(pt()));
    }

    #[test]
    fn test_cancel() {
        let mut gesture = PressGesture::default();
        gesture.press(pt(), 0.0);
        gesture.cancel();
        assert_eq!(gesture.elapsed(10_000.0), None);
        assert_eq!(gesture.release(10_000.0), None);
    }

    #[test]
    fn test_new_press_restarts_timer() {
        let mut gesture = PressGesture::default();
        let other = Coordinate::new(48.85, 2.35).unwrap();
        gesture.press(pt(), 0.0);
        gesture.press(other, 400.0);
        assert_eq!(gesture.elapsed(500.0), None);
        assert_eq!(gesture.elapsed(900.0), Some(other));
    }
}
