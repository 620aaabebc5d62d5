//! Player focused snapshot of the types surface.
//! Prefer importing from this module in presentation layers.

pub use super::error::{ModelError, Result as ModelResult};
pub use super::movie::{Episode, Movie, Server};
#[cfg(feature = "serde")]
pub use super::response::DetailsPayload;
pub use super::source::PlayableSource;
