//! Tick scheduling
use crate::consts::MAX_CATCH_UP_TICKS;
use std::fmt;
use std::time::{Duration, Instant};

/// A source of periodic ticks.
///
/// The game loop asks how long it may wait for input
/// ([`until_next()`][Scheduler::until_next]) and then how many ticks have
/// come due ([`due_ticks()`][Scheduler::due_ticks]).  Nothing is ever called
/// back, so a cancelled scheduler can never deliver a stale tick.
pub(crate) trait Scheduler: fmt::Debug {
    /// Begin ticking once per `period`, replacing any previous schedule.
    /// The first tick comes due one period from now.
    fn start(&mut self, period: Duration);

    /// Stop ticking.  Ticks that came due but were not yet collected are
    /// discarded.
    fn cancel(&mut self);

    fn is_active(&self) -> bool;

    /// Return the number of ticks that have come due since the last call,
    /// each elapsed period counted at most once
    fn due_ticks(&mut self) -> u32;

    /// Time remaining until the next tick, or `None` if not ticking
    fn until_next(&self) -> Option<Duration>;
}

/// A [`Scheduler`] driven by the system's monotonic clock
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct IntervalTimer {
    schedule: Option<Schedule>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Schedule {
    period: Duration,
    next_tick: Instant,
}

impl IntervalTimer {
    pub(crate) fn new() -> IntervalTimer {
        IntervalTimer::default()
    }

    fn start_at(&mut self, period: Duration, now: Instant) {
        self.schedule = Some(Schedule {
            period,
            next_tick: now + period,
        });
    }

    fn due_ticks_at(&mut self, now: Instant) -> u32 {
        let Some(ref mut sched) = self.schedule else {
            return 0;
        };
        let mut due = 0;
        // The deadline moves in whole periods, so late polls don't shift the
        // cadence.
        while sched.next_tick <= now {
            if due == MAX_CATCH_UP_TICKS {
                log::debug!("Tick schedule fell behind; skipping missed ticks");
                sched.next_tick = now + sched.period;
                break;
            }
            sched.next_tick += sched.period;
            due += 1;
        }
        due
    }

    fn until_next_at(&self, now: Instant) -> Option<Duration> {
        self.schedule
            .map(|sched| sched.next_tick.saturating_duration_since(now))
    }
}

impl Scheduler for IntervalTimer {
    fn start(&mut self, period: Duration) {
        self.start_at(period, Instant::now());
    }

    fn cancel(&mut self) {
        self.schedule = None;
    }

    fn is_active(&self) -> bool {
        self.schedule.is_some()
    }

    fn due_ticks(&mut self) -> u32 {
        self.due_ticks_at(Instant::now())
    }

    fn until_next(&self) -> Option<Duration> {
        self.until_next_at(Instant::now())
    }
}

/// A [`Scheduler`] whose ticks are released by hand, for deterministic
/// tests
#[cfg(test)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ManualScheduler {
    pub(crate) period: Option<Duration>,
    pub(crate) pending: u32,
    pub(crate) starts: u32,
}

#[cfg(test)]
impl ManualScheduler {
    /// Let `n` periods elapse
    pub(crate) fn fire(&mut self, n: u32) {
        if self.period.is_some() {
            self.pending += n;
        }
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn start(&mut self, period: Duration) {
        self.period = Some(period);
        self.pending = 0;
        self.starts += 1;
    }

    fn cancel(&mut self) {
        self.period = None;
        self.pending = 0;
    }

    fn is_active(&self) -> bool {
        self.period.is_some()
    }

    fn due_ticks(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }

    fn until_next(&self) -> Option<Duration> {
        self.period
    }
}
