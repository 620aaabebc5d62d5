//! MoiPhim player library
//!
//! Headless controller for the full-screen playback experience: gesture
//! interpretation, controls visibility, overlay panels, episode/server
//! selection and the native/embedded playback session. The shell feeds it
//! [`PlayerMessage`]s and renders the [`PlayerView`] it returns.
//!
//! Notes
//! - Public items are subject to change while the player stabilizes.
//! - Most consumers drive the controller through [`runtime::spawn_player`];
//!   [`PlayerController`] is exposed directly for testing and embedding.

pub mod domains;
pub mod error;
pub mod infra;
pub mod runtime;

pub use domains::player::controller::{MountOptions, PlayerController};
pub use domains::player::messages::{BackendEvent, Key, Notice, PlayerEvent, PlayerMessage};
pub use domains::player::session::{BackendFactory, MountToken, PlaybackBackend, ProgressReport};
pub use domains::player::view::PlayerView;
pub use error::{ConfigError, PlayerError};
