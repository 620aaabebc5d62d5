//! Core data model definitions shared across MoiPhim crates.
#![allow(missing_docs)]

pub mod error;
pub mod movie;
pub mod prelude;
#[cfg(feature = "serde")]
pub mod response;
pub mod source;

pub use error::{ModelError, Result as ModelResult};
pub use movie::{Episode, Movie, Server};
#[cfg(feature = "serde")]
pub use response::{DetailsPayload, MovieDetailsResponse, ResponseStatus, V1DetailsResponse};
pub use source::{PlayableSource, parse_link};
