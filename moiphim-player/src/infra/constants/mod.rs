//! Constants module for centralized configuration values

pub mod player;

// Re-export commonly used items
pub use player::{controls, gestures, playback, seeking};
