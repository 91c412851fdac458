//! Cooperative software timers and the display window check.
//!
//! The scheduler never receives callbacks; it polls. A [`Ticker`] is a
//! deadline that the scheduler checks once per poll with [`fire`], so every
//! effect of a period elapsing happens inside the scheduler's own dispatch,
//! on its own thread. Periods that pass while the scheduler is blocked
//! (scroll renders, readout holds) collapse into a single fire.
//!
//! [`fire`]: Ticker::fire

/// A periodic software timer, polled rather than callback-driven.
///
/// # Example
///
/// ```
/// use rs_matrixclock::timer::Ticker;
///
/// let mut tick = Ticker::default();
/// tick.attach_ms(500, 0);
///
/// assert!(!tick.fire(499));
/// assert!(tick.fire(500));
/// assert!(!tick.fire(999));
/// assert!(tick.fire(1000));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Ticker {
    period_ms: u64,
    deadline: Option<u64>,
}

impl Ticker {
    /// Creates a detached ticker.
    pub const fn new() -> Self {
        Self {
            period_ms: 0,
            deadline: None,
        }
    }

    /// Arms the ticker with a period in milliseconds, first firing one
    /// period from `now_ms`. Re-attaching replaces any previous schedule.
    pub fn attach_ms(&mut self, period_ms: u64, now_ms: u64) {
        self.period_ms = period_ms;
        self.deadline = Some(now_ms + period_ms);
    }

    /// Arms the ticker with a period in seconds.
    pub fn attach_secs(&mut self, period_secs: u64, now_ms: u64) {
        self.attach_ms(period_secs * 1000, now_ms);
    }

    /// Disarms the ticker. A detached ticker never fires.
    pub fn detach(&mut self) {
        self.deadline = None;
    }

    /// True while the ticker has a pending deadline.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Checks the deadline against `now_ms`.
    ///
    /// Returns true at most once per period; on fire the ticker re-arms one
    /// period from `now_ms`, so time lost to blocking work is not made up
    /// with burst fires.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = Some(now_ms + self.period_ms);
                true
            }
            _ => false,
        }
    }
}

/// Half-open display window test: is `hour` inside `[start_hour, end_hour)`?
///
/// A window with `start_hour > end_hour` wraps past midnight. Equal start
/// and end is an empty window.
///
/// # Examples
///
/// ```
/// use rs_matrixclock::timer::display_window_contains;
///
/// // Daytime window 06:00..23:00
/// assert!(display_window_contains(6, 23, 12));
/// assert!(!display_window_contains(6, 23, 23));
/// assert!(!display_window_contains(6, 23, 5));
///
/// // Overnight window 22:00..06:00
/// assert!(display_window_contains(22, 6, 23));
/// assert!(display_window_contains(22, 6, 2));
/// assert!(!display_window_contains(22, 6, 12));
/// ```
pub fn display_window_contains(start_hour: u8, end_hour: u8, hour: u8) -> bool {
    if start_hour == end_hour {
        false
    } else if start_hour < end_hour {
        hour >= start_hour && hour < end_hour
    } else {
        hour >= start_hour || hour < end_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Ticker Tests
    // =========================================================================

    #[test]
    fn detached_ticker_never_fires() {
        let mut tick = Ticker::new();
        assert!(!tick.is_armed());
        assert!(!tick.fire(0));
        assert!(!tick.fire(u64::MAX));
    }

    #[test]
    fn fires_once_per_period() {
        let mut tick = Ticker::new();
        tick.attach_ms(500, 0);

        assert!(!tick.fire(0));
        assert!(!tick.fire(499));
        assert!(tick.fire(500));
        assert!(!tick.fire(500));
        assert!(!tick.fire(999));
        assert!(tick.fire(1000));
    }

    #[test]
    fn missed_periods_collapse_into_one_fire() {
        let mut tick = Ticker::new();
        tick.attach_ms(500, 0);

        // Three periods pass while the caller was busy.
        assert!(tick.fire(1700));
        // Re-armed from the observed time, not from the missed deadlines.
        assert!(!tick.fire(2199));
        assert!(tick.fire(2200));
    }

    #[test]
    fn detach_stops_firing() {
        let mut tick = Ticker::new();
        tick.attach_ms(100, 0);
        assert!(tick.fire(100));

        tick.detach();
        assert!(!tick.is_armed());
        assert!(!tick.fire(10_000));
    }

    #[test]
    fn reattach_replaces_schedule() {
        let mut tick = Ticker::new();
        tick.attach_ms(100, 0);
        tick.attach_ms(1000, 0);

        assert!(!tick.fire(100));
        assert!(tick.fire(1000));
    }

    #[test]
    fn attach_secs_scales_to_millis() {
        let mut tick = Ticker::new();
        tick.attach_secs(60, 0);
        assert!(!tick.fire(59_999));
        assert!(tick.fire(60_000));
    }

    // =========================================================================
    // Display Window Tests
    // =========================================================================

    #[test]
    fn window_daytime() {
        assert!(display_window_contains(6, 23, 6));
        assert!(display_window_contains(6, 23, 12));
        assert!(display_window_contains(6, 23, 22));
        assert!(!display_window_contains(6, 23, 23));
        assert!(!display_window_contains(6, 23, 5));
        assert!(!display_window_contains(6, 23, 0));
    }

    #[test]
    fn window_overnight_wrap() {
        assert!(display_window_contains(22, 6, 22));
        assert!(display_window_contains(22, 6, 23));
        assert!(display_window_contains(22, 6, 0));
        assert!(display_window_contains(22, 6, 5));
        assert!(!display_window_contains(22, 6, 6));
        assert!(!display_window_contains(22, 6, 12));
    }

    #[test]
    fn window_empty_when_equal() {
        for hour in 0..24 {
            assert!(!display_window_contains(7, 7, hour));
        }
    }
}
