use std::time::{Duration, Instant};

use super::timers::{TimerKind, TimerRegistry};

/// Visibility of the controls chrome.
///
/// Shown on any interaction and hidden once the inactivity timer fires,
/// unless a list panel is open or playback is paused at that moment.
#[derive(Debug, Clone)]
pub struct ControlsVisibility {
    visible: bool,
    hide_after: Duration,
}

impl ControlsVisibility {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            visible: true,
            hide_after,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the controls and restart the inactivity window.
    pub fn reset_timer(&mut self, timers: &mut TimerRegistry, now: Instant) {
        self.visible = true;
        timers.arm(TimerKind::ControlsHide, now + self.hide_after);
    }

    pub fn hide(&mut self, timers: &mut TimerRegistry) {
        self.visible = false;
        timers.cancel(TimerKind::ControlsHide);
    }

    /// Inactivity timer fired. Returns whether the controls were hidden.
    pub fn on_timer(&mut self, list_open: bool, is_playing: bool) -> bool {
        if list_open || !is_playing {
            return false;
        }
        self.visible = false;
        true
    }
}
