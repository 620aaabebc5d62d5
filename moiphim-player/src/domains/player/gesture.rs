//! Pointer gesture interpretation for the video surface.
//!
//! Two independent machines run side by side:
//!
//! - press: `Idle -> LongPressArmed -> LongPressActive -> Idle`. A press held
//!   past the long-press delay becomes a speed boost that ends on release.
//! - tap: `Idle -> ArmedSingle -> Idle`. A tap arms a delayed single-tap
//!   action; a second tap inside the double-tap window cancels it and fires
//!   a double tap instead, so one physical double tap never yields a single.
//!
//! The interpreter only decides *what* happened. The controller applies the
//! resulting [`GestureAction`] to the session and controls.

use std::time::Instant;

use super::config::PlayerConfig;
use super::timers::{TimerKind, TimerRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapZone {
    Left,
    Center,
    Right,
}

impl TapZone {
    pub fn classify(x: f32, width: f32, left: f32, right: f32) -> Self {
        if width <= 0.0 {
            return TapZone::Center;
        }
        let fraction = x / width;
        if fraction < left {
            TapZone::Left
        } else if fraction > right {
            TapZone::Right
        } else {
            TapZone::Center
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekSide {
    Rewind,
    Forward,
}

/// Cumulative "-15s" / "+30s" badge shown after double taps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekIndicator {
    pub side: SeekSide,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressPhase {
    Idle,
    LongPressArmed { origin: Point },
    LongPressActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapPhase {
    Idle,
    ArmedSingle { last_tap: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAction {
    SingleTap,
    DoubleTap(TapZone),
    LongPressStart,
    LongPressEnd,
}

#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    config: PlayerConfig,
    press: PressPhase,
    tap: TapPhase,
    indicator: Option<SeekIndicator>,
}

impl GestureInterpreter {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            press: PressPhase::Idle,
            tap: TapPhase::Idle,
            indicator: None,
        }
    }

    pub fn press_phase(&self) -> PressPhase {
        self.press
    }

    pub fn tap_phase(&self) -> TapPhase {
        self.tap
    }

    pub fn is_long_pressing(&self) -> bool {
        self.press == PressPhase::LongPressActive
    }

    pub fn seek_indicator(&self) -> Option<SeekIndicator> {
        self.indicator
    }

    pub fn pointer_down(&mut self, at: Point, now: Instant, timers: &mut TimerRegistry) {
        if self.is_long_pressing() {
            return;
        }
        self.press = PressPhase::LongPressArmed { origin: at };
        timers.arm(TimerKind::LongPress, now + self.config.long_press);
    }

    pub fn pointer_up(
        &mut self,
        at: Point,
        width: f32,
        now: Instant,
        timers: &mut TimerRegistry,
    ) -> Option<GestureAction> {
        timers.cancel(TimerKind::LongPress);

        let origin = match std::mem::replace(&mut self.press, PressPhase::Idle) {
            PressPhase::LongPressActive => return Some(GestureAction::LongPressEnd),
            PressPhase::LongPressArmed { origin } => origin,
            PressPhase::Idle => return None,
        };

        if origin.distance(at) > self.config.tap_slop_px {
            log::trace!("[Player] Pointer moved too far, treating as drag");
            return None;
        }

        let tap = self.tap;
        match tap {
            TapPhase::ArmedSingle { last_tap }
                if now.saturating_duration_since(last_tap) < self.config.double_tap_window =>
            {
                timers.cancel(TimerKind::SingleTap);
                self.tap = TapPhase::Idle;

                let zone = TapZone::classify(
                    at.x,
                    width,
                    self.config.left_zone,
                    self.config.right_zone,
                );
                match zone {
                    TapZone::Left => self.bump_indicator(SeekSide::Rewind, now, timers),
                    TapZone::Right => self.bump_indicator(SeekSide::Forward, now, timers),
                    TapZone::Center => {}
                }
                Some(GestureAction::DoubleTap(zone))
            }
            _ => {
                self.tap = TapPhase::ArmedSingle { last_tap: now };
                timers.arm(TimerKind::SingleTap, now + self.config.single_tap_delay);
                None
            }
        }
    }

    /// Pointer left the surface or the press was interrupted.
    pub fn pointer_cancel(&mut self, timers: &mut TimerRegistry) -> Option<GestureAction> {
        timers.cancel(TimerKind::LongPress);
        match std::mem::replace(&mut self.press, PressPhase::Idle) {
            PressPhase::LongPressActive => Some(GestureAction::LongPressEnd),
            _ => None,
        }
    }

    pub fn on_long_press_timer(&mut self) -> Option<GestureAction> {
        match self.press {
            PressPhase::LongPressArmed { .. } => {
                self.press = PressPhase::LongPressActive;
                Some(GestureAction::LongPressStart)
            }
            _ => None,
        }
    }

    pub fn on_single_tap_timer(&mut self) -> Option<GestureAction> {
        match self.tap {
            TapPhase::ArmedSingle { .. } => {
                self.tap = TapPhase::Idle;
                Some(GestureAction::SingleTap)
            }
            TapPhase::Idle => None,
        }
    }

    pub fn on_indicator_timer(&mut self) {
        self.indicator = None;
    }

    /// Drop all gesture state. Timers are cleared by the caller's registry
    /// teardown. Returns whether a speed boost was active.
    pub fn reset(&mut self) -> bool {
        let was_boosting = self.is_long_pressing();
        self.press = PressPhase::Idle;
        self.tap = TapPhase::Idle;
        self.indicator = None;
        was_boosting
    }

    fn bump_indicator(&mut self, side: SeekSide, now: Instant, timers: &mut TimerRegistry) {
        let carried = match self.indicator {
            Some(indicator) if indicator.side == side => indicator.amount,
            _ => 0.0,
        };
        self.indicator = Some(SeekIndicator {
            side,
            amount: carried + self.config.indicator_step_secs,
        });
        timers.arm(TimerKind::SeekIndicator, now + self.config.indicator_decay);
    }
}
