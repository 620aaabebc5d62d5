//! Deferred actions owned by the player.
//!
//! Every pending timer lives in one registry so a single call to
//! [`TimerRegistry::clear_all`] tears all of them down on episode switch or
//! unmount. Timers are one-shot; arming a kind that is already pending
//! replaces its deadline.

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Press held long enough to start the speed boost
    LongPress,
    /// Lone tap waiting to see whether a second tap follows
    SingleTap,
    /// Inactivity timeout for the controls chrome
    ControlsHide,
    /// Seek indicator decay after the last double tap
    SeekIndicator,
}

impl TimerKind {
    pub const ALL: [TimerKind; 4] = [
        TimerKind::LongPress,
        TimerKind::SingleTap,
        TimerKind::ControlsHide,
        TimerKind::SeekIndicator,
    ];

    fn slot(self) -> usize {
        match self {
            TimerKind::LongPress => 0,
            TimerKind::SingleTap => 1,
            TimerKind::ControlsHide => 2,
            TimerKind::SeekIndicator => 3,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct TimerRegistry {
    deadlines: [Option<Instant>; 4],
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, kind: TimerKind, deadline: Instant) {
        self.deadlines[kind.slot()] = Some(deadline);
    }

    /// Returns whether a pending timer was cancelled.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.deadlines[kind.slot()].take().is_some()
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<Instant> {
        self.deadlines[kind.slot()]
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.deadline(kind).is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.iter().flatten().min().copied()
    }

    /// Remove and return the earliest timer whose deadline is at or before
    /// `now`. Call repeatedly to drain in deadline order.
    pub fn pop_expired(&mut self, now: Instant) -> Option<TimerKind> {
        let kind = TimerKind::ALL
            .into_iter()
            .filter_map(|kind| {
                self.deadline(kind)
                    .filter(|deadline| *deadline <= now)
                    .map(|deadline| (deadline, kind))
            })
            .min_by_key(|(deadline, _)| *deadline)
            .map(|(_, kind)| kind)?;
        self.cancel(kind);
        Some(kind)
    }

    pub fn pending(&self) -> usize {
        self.deadlines.iter().flatten().count()
    }

    pub fn clear_all(&mut self) {
        let cleared = self.pending();
        self.deadlines = [None; 4];
        if cleared > 0 {
            log::debug!("[Player] Cleared {cleared} pending timer(s)");
        }
    }
}
