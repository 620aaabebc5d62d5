pub mod gestures {
    /// Hold time before a press turns into the 2x speed boost
    pub const LONG_PRESS_MS: u64 = 500;
    /// Two taps closer together than this are a double tap
    pub const DOUBLE_TAP_WINDOW_MS: u64 = 300;
    /// How long a lone tap waits for a second one before acting
    pub const SINGLE_TAP_DELAY_MS: u64 = 300;
    /// Pointer travel beyond this is a drag, not a tap
    pub const TAP_SLOP_PX: f32 = 10.0;
    /// Taps left of this fraction of the width rewind
    pub const LEFT_ZONE_FRACTION: f32 = 0.35;
    /// Taps right of this fraction of the width fast-forward
    pub const RIGHT_ZONE_FRACTION: f32 = 0.65;
}

pub mod seeking {
    pub const GESTURE_JUMP_SECS: f64 = 10.0;
    pub const BUTTON_JUMP_SECS: f64 = 15.0;
    /// Amount the seek indicator grows per double tap on the same side.
    /// Deliberately differs from the gesture jump.
    pub const INDICATOR_STEP_SECS: f64 = 15.0;
    pub const INDICATOR_DECAY_MS: u64 = 800;
}

pub mod controls {
    /// Inactivity before the chrome hides while playing
    pub const HIDE_AFTER_MS: u64 = 3000;
}

pub mod playback {
    pub const ALLOWED_RATES: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];
    pub const NORMAL_RATE: f64 = 1.0;
    pub const BOOST_RATE: f64 = 2.0;

    /// Membership test against [`ALLOWED_RATES`].
    pub fn is_allowed_rate(rate: f64) -> bool {
        ALLOWED_RATES.iter().any(|r| (r - rate).abs() < 1e-9)
    }
}
