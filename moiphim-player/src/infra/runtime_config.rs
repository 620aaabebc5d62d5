//! Runtime configuration for user-adjustable constants
//!
//! This module provides a RuntimeConfig struct with Option<T> fields that override
//! the default constants. Accessor methods fall back to constants when None.

use serde::{Deserialize, Serialize};

use crate::infra::constants::{controls, gestures, playback, seeking};

/// Runtime configuration with optional overrides for constants.
/// Fields are None by default, falling back to compiled constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    // ========== GESTURES ==========
    /// Hold time before the speed boost kicks in (ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_press_ms: Option<u64>,
    /// Max gap between two taps of a double tap (ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_tap_window_ms: Option<u64>,
    /// Delay before a lone tap is acted on (ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_tap_delay_ms: Option<u64>,
    /// Max pointer travel for a tap (px)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tap_slop_px: Option<f32>,
    /// Left rewind zone boundary (fraction of width)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_zone_fraction: Option<f32>,
    /// Right fast-forward zone boundary (fraction of width)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_zone_fraction: Option<f32>,
    /// Rate applied while long-pressing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost_rate: Option<f64>,

    // ========== SEEKING ==========
    /// Seconds jumped by a double tap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gesture_jump_secs: Option<f64>,
    /// Seconds jumped by the skip buttons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_jump_secs: Option<f64>,
    /// Seconds added to the indicator per double tap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator_step_secs: Option<f64>,
    /// Indicator lifetime after the last double tap (ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator_decay_ms: Option<u64>,

    // ========== CONTROLS ==========
    /// Inactivity before controls hide (ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls_hide_ms: Option<u64>,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every override set on `other` onto `self`.
    pub fn merge(&mut self, other: &RuntimeConfig) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field;
                })*
            };
        }
        take!(
            long_press_ms,
            double_tap_window_ms,
            single_tap_delay_ms,
            tap_slop_px,
            left_zone_fraction,
            right_zone_fraction,
            boost_rate,
            gesture_jump_secs,
            button_jump_secs,
            indicator_step_secs,
            indicator_decay_ms,
            controls_hide_ms,
        );
    }

    // ========== GESTURES ==========

    pub fn long_press_ms(&self) -> u64 {
        self.long_press_ms
            .unwrap_or(gestures::LONG_PRESS_MS)
            .max(1)
    }

    pub fn double_tap_window_ms(&self) -> u64 {
        self.double_tap_window_ms
            .unwrap_or(gestures::DOUBLE_TAP_WINDOW_MS)
            .max(1)
    }

    pub fn single_tap_delay_ms(&self) -> u64 {
        self.single_tap_delay_ms
            .unwrap_or(gestures::SINGLE_TAP_DELAY_MS)
            .max(1)
    }

    pub fn tap_slop_px(&self) -> f32 {
        self.tap_slop_px
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(gestures::TAP_SLOP_PX)
    }

    /// Zone boundaries as `(left, right)`. An override pair that does not
    /// satisfy `0 <= left <= right <= 1` falls back to the defaults.
    pub fn tap_zones(&self) -> (f32, f32) {
        let left = self
            .left_zone_fraction
            .unwrap_or(gestures::LEFT_ZONE_FRACTION);
        let right = self
            .right_zone_fraction
            .unwrap_or(gestures::RIGHT_ZONE_FRACTION);
        if (0.0..=1.0).contains(&left)
            && (0.0..=1.0).contains(&right)
            && left <= right
        {
            (left, right)
        } else {
            log::warn!(
                "[Config] Ignoring invalid tap zones ({left}, {right})"
            );
            (gestures::LEFT_ZONE_FRACTION, gestures::RIGHT_ZONE_FRACTION)
        }
    }

    /// Only rates the speed menu offers are accepted.
    pub fn boost_rate(&self) -> f64 {
        self.boost_rate
            .filter(|rate| playback::is_allowed_rate(*rate))
            .unwrap_or(playback::BOOST_RATE)
    }

    // ========== SEEKING ==========

    pub fn gesture_jump_secs(&self) -> f64 {
        positive_or(self.gesture_jump_secs, seeking::GESTURE_JUMP_SECS)
    }

    pub fn button_jump_secs(&self) -> f64 {
        positive_or(self.button_jump_secs, seeking::BUTTON_JUMP_SECS)
    }

    pub fn indicator_step_secs(&self) -> f64 {
        positive_or(self.indicator_step_secs, seeking::INDICATOR_STEP_SECS)
    }

    pub fn indicator_decay_ms(&self) -> u64 {
        self.indicator_decay_ms
            .unwrap_or(seeking::INDICATOR_DECAY_MS)
            .max(1)
    }

    // ========== CONTROLS ==========

    pub fn controls_hide_ms(&self) -> u64 {
        self.controls_hide_ms
            .unwrap_or(controls::HIDE_AFTER_MS)
            .max(1)
    }
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(default)
}
