//! Player domain
//!
//! Contains the playback controller and the state machines it coordinates.

pub mod config;
pub mod controller;
pub mod controls;
pub mod gesture;
pub mod messages;
pub mod overlay;
pub mod session;
pub mod source;
pub mod timers;
pub mod update;
pub mod view;

pub use config::PlayerConfig;
pub use controller::{MountOptions, PlayerController, Viewport};
pub use gesture::Point;
pub use overlay::Panel;
pub use session::{PlaybackState, RenderPathKind};
