//! Resolved timing and distance settings for the playback controller
//!
//! Built from [`RuntimeConfig`] once at construction so the hot paths read
//! plain fields instead of re-resolving overrides.

use std::time::Duration;

use crate::infra::runtime_config::RuntimeConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerConfig {
    pub long_press: Duration,
    pub double_tap_window: Duration,
    pub single_tap_delay: Duration,
    pub tap_slop_px: f32,
    /// Rewind zone is `x < left_zone * width`.
    pub left_zone: f32,
    /// Fast-forward zone is `x > right_zone * width`.
    pub right_zone: f32,
    pub boost_rate: f64,
    pub gesture_jump_secs: f64,
    pub button_jump_secs: f64,
    pub indicator_step_secs: f64,
    pub indicator_decay: Duration,
    pub controls_hide_after: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::from_runtime_config(&RuntimeConfig::default())
    }
}

impl PlayerConfig {
    pub fn from_runtime_config(rc: &RuntimeConfig) -> Self {
        let (left_zone, right_zone) = rc.tap_zones();
        Self {
            long_press: Duration::from_millis(rc.long_press_ms()),
            double_tap_window: Duration::from_millis(rc.double_tap_window_ms()),
            single_tap_delay: Duration::from_millis(rc.single_tap_delay_ms()),
            tap_slop_px: rc.tap_slop_px(),
            left_zone,
            right_zone,
            boost_rate: rc.boost_rate(),
            gesture_jump_secs: rc.gesture_jump_secs(),
            button_jump_secs: rc.button_jump_secs(),
            indicator_step_secs: rc.indicator_step_secs(),
            indicator_decay: Duration::from_millis(rc.indicator_decay_ms()),
            controls_hide_after: Duration::from_millis(rc.controls_hide_ms()),
        }
    }
}
