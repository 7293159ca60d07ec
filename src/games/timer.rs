//! Virtual-time timers owned by a game instance.
//!
//! Games never hold JS timer handles. The animation-frame loop passes the
//! current `performance.now()` into `advance`, and each game drains what is
//! due from its own `Schedule`/`Interval`. Dropping or replacing the game
//! drops its timers with it, so a restarted game can never be touched by a
//! callback that belonged to the previous one.

/// One-shot delayed events.
#[derive(Debug, Clone)]
pub struct Schedule<E> {
    pending: Vec<(f64, E)>,
}

impl<E> Default for Schedule<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<E> Schedule<E> {
    pub fn after(&mut self, now: f64, delay_ms: f64, event: E) {
        self.pending.push((now + delay_ms, event));
    }

    /// Remove and return every event due at `now`, earliest first. Events
    /// with the same due time come out in scheduling order.
    pub fn due(&mut self, now: f64) -> Vec<E> {
        let mut ready = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].0 <= now {
                ready.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        ready.sort_by(|a, b| a.0.total_cmp(&b.0));
        ready.into_iter().map(|(_, e)| e).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Oldest firing an `Interval` still replays after a stalled frame, such as
/// a hidden tab; earlier ones are skipped.
pub const MAX_CATCH_UP_MS: f64 = 1000.0;

/// Repeating timer with a fixed period. Stopped intervals never fire again.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period_ms: f64,
    next_at: Option<f64>,
}

impl Interval {
    /// First firing is one full period after `start`.
    pub fn new(period_ms: f64, start: f64) -> Self {
        Self {
            period_ms,
            next_at: Some(start + period_ms),
        }
    }

    pub fn running(&self) -> bool {
        self.next_at.is_some()
    }

    pub fn stop(&mut self) {
        self.next_at = None;
    }

    /// Firing times up to and including `now`, in order.
    pub fn drain(&mut self, now: f64) -> Vec<f64> {
        let mut fired = Vec::new();
        if self.period_ms <= 0.0 {
            return fired;
        }
        if let Some(at) = self.next_at {
            let backlog = now - MAX_CATCH_UP_MS - at;
            if backlog > 0.0 {
                let skipped = (backlog / self.period_ms).ceil();
                self.next_at = Some(at + skipped * self.period_ms);
            }
        }
        while let Some(at) = self.next_at {
            if at > now {
                break;
            }
            fired.push(at);
            self.next_at = Some(at + self.period_ms);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_releases_in_due_order() {
        let mut s = Schedule::default();
        s.after(0.0, 300.0, "late");
        s.after(0.0, 100.0, "early");
        s.after(50.0, 50.0, "tie");
        assert!(s.due(99.0).is_empty());
        assert_eq!(s.due(100.0), vec!["early", "tie"]);
        assert!(!s.is_empty());
        assert_eq!(s.due(1_000.0), vec!["late"]);
        assert!(s.is_empty());
    }

    #[test]
    fn cleared_schedule_never_fires() {
        let mut s = Schedule::default();
        s.after(0.0, 10.0, ());
        s.clear();
        assert!(s.due(100.0).is_empty());
    }

    #[test]
    fn interval_catches_up_after_long_frames() {
        let mut i = Interval::new(20.0, 0.0);
        assert!(i.drain(19.0).is_empty());
        assert_eq!(i.drain(65.0), vec![20.0, 40.0, 60.0]);
        assert_eq!(i.drain(80.0), vec![80.0]);
    }

    #[test]
    fn long_stall_replays_only_the_last_second() {
        let mut spawner = Interval::new(1_000.0, 0.0);
        assert_eq!(spawner.drain(60_000.0), vec![59_000.0, 60_000.0]);
        assert_eq!(spawner.drain(61_000.0), vec![61_000.0]);

        let mut ticker = Interval::new(20.0, 0.0);
        let fired = ticker.drain(60_000.0);
        assert_eq!(fired.len(), 51);
        assert_eq!(fired.first(), Some(&59_000.0));
    }

    #[test]
    fn stopped_interval_is_silent() {
        let mut i = Interval::new(1_000.0, 0.0);
        i.stop();
        assert!(!i.running());
        assert!(i.drain(10_000.0).is_empty());
    }
}
