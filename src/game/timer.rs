use std::time::{Duration, Instant};

/// A source of the current time.  The application uses [`SystemClock`];
/// tests drive time by hand.
pub(crate) trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// The schedule for game ticks.
///
/// While armed, a tick is due every `period`.  Pausing cancels the deadline
/// and remembers how much of the current period was left, so that nothing
/// can fire while paused and resuming neither skips nor repeats a tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TickTimer {
    period: Duration,
    state: TimerState,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum TimerState {
    Stopped,
    Armed { due: Instant },
    Suspended { remaining: Duration },
}

impl TickTimer {
    pub(crate) fn new(period: Duration) -> TickTimer {
        TickTimer {
            period,
            state: TimerState::Stopped,
        }
    }

    pub(crate) fn period(&self) -> Duration {
        self.period
    }

    /// Change the tick period.  An armed deadline is moved so that it falls
    /// one new period after the tick it was scheduled from.
    pub(crate) fn set_period(&mut self, period: Duration) {
        if let TimerState::Armed { due } = self.state {
            if let Some(scheduled_from) = due.checked_sub(self.period) {
                self.state = TimerState::Armed {
                    due: scheduled_from + period,
                };
            }
        }
        self.period = period;
    }

    /// Arm the timer so that the first tick is due one period from `now`
    pub(crate) fn start(&mut self, now: Instant) {
        self.state = TimerState::Armed {
            due: now + self.period,
        };
    }

    /// Suspend the timer, remembering the time left until the next tick
    pub(crate) fn pause(&mut self, now: Instant) {
        if let TimerState::Armed { due } = self.state {
            self.state = TimerState::Suspended {
                remaining: due.saturating_duration_since(now),
            };
        }
    }

    /// Re-arm a paused timer with whatever was left of its period
    pub(crate) fn resume(&mut self, now: Instant) {
        if let TimerState::Suspended { remaining } = self.state {
            self.state = TimerState::Armed {
                due: now + remaining,
            };
        }
    }

    pub(crate) fn cancel(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// How long until the next tick is due, or `None` if the timer is not
    /// armed
    pub(crate) fn time_until_due(&self, now: Instant) -> Option<Duration> {
        match self.state {
            TimerState::Armed { due } => Some(due.saturating_duration_since(now)),
            _ => None,
        }
    }

    /// If a tick is due at `now`, consume it, schedule the next one, and
    /// return `true`.
    ///
    /// The next deadline is one period after the one just consumed, keeping
    /// the cadence steady; if the caller has fallen more than a whole period
    /// behind, the schedule restarts from `now` rather than firing a burst of
    /// overdue ticks.
    pub(crate) fn fire_if_due(&mut self, now: Instant) -> bool {
        let TimerState::Armed { due } = self.state else {
            return false;
        };
        if now < due {
            return false;
        }
        let mut next = due + self.period;
        if next <= now {
            next = now + self.period;
        }
        self.state = TimerState::Armed { due: next };
        true
    }
}
