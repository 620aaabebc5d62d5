//! Catalog API response envelopes and their normalization into [`Movie`].
//!
//! Two shapes exist upstream:
//! - `/phim/{slug}` returns `movie` and `episodes` side by side, and the movie
//!   itself usually carries no episode list.
//! - `/v1/api/phim/{slug}` wraps everything in `data.item`.

use serde::Deserialize;

use crate::error::{ModelError, Result};
use crate::movie::{Movie, Server};

/// Upstream reports status as either a boolean or `"success"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ResponseStatus {
    Flag(bool),
    Text(String),
}

impl ResponseStatus {
    pub fn is_ok(&self) -> bool {
        match self {
            ResponseStatus::Flag(ok) => *ok,
            ResponseStatus::Text(text) => {
                text.eq_ignore_ascii_case("success")
                    || text.eq_ignore_ascii_case("true")
            }
        }
    }
}

impl Default for ResponseStatus {
    // A missing status is not a failure; only an explicit false is.
    fn default() -> Self {
        ResponseStatus::Flag(true)
    }
}

/// Payload of the classic `/phim/{slug}` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieDetailsResponse {
    #[serde(default)]
    pub status: ResponseStatus,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub movie: Option<Movie>,
    #[serde(default)]
    pub episodes: Option<Vec<Server>>,
}

impl MovieDetailsResponse {
    pub fn normalize(self) -> Result<Movie> {
        let mut movie = match self.movie {
            Some(movie) if self.status.is_ok() => movie,
            _ => {
                return Err(ModelError::NotFound(
                    self.msg.unwrap_or_else(|| "no movie in payload".into()),
                ));
            }
        };

        if movie.episodes.is_empty()
            && let Some(servers) = self.episodes
        {
            movie.episodes = servers;
        }

        Ok(movie)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct V1Data {
    pub item: Movie,
}

/// Payload of the `/v1/api/phim/{slug}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct V1DetailsResponse {
    #[serde(default)]
    pub status: ResponseStatus,
    #[serde(default)]
    pub message: Option<String>,
    pub data: V1Data,
}

impl V1DetailsResponse {
    pub fn normalize(self) -> Result<Movie> {
        if !self.status.is_ok() {
            return Err(ModelError::NotFound(
                self.message.unwrap_or_else(|| "request failed".into()),
            ));
        }
        Ok(self.data.item)
    }
}

/// Either envelope, detected by shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DetailsPayload {
    V1(V1DetailsResponse),
    Classic(MovieDetailsResponse),
}

impl DetailsPayload {
    pub fn normalize(self) -> Result<Movie> {
        match self {
            DetailsPayload::V1(resp) => resp.normalize(),
            DetailsPayload::Classic(resp) => resp.normalize(),
        }
    }
}
