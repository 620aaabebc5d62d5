//! Movie record as consumed by the player.
//!
//! Field names follow the upstream catalog API so the structs deserialize
//! straight from its JSON. Only the fields the player reads are modeled;
//! everything else on the wire is ignored.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::source::PlayableSource;

/// One playable unit within a server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Episode {
    /// Display label, e.g. `"Full"` or `"12"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slug: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub filename: String,
    /// HLS playlist URL
    #[cfg_attr(feature = "serde", serde(default))]
    pub link_m3u8: Option<String>,
    /// Embeddable page URL used when the native path is not wanted
    #[cfg_attr(feature = "serde", serde(default))]
    pub link_embed: Option<String>,
}

impl Episode {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            ..Default::default()
        }
    }

    pub fn with_m3u8(mut self, link: impl Into<String>) -> Self {
        self.link_m3u8 = Some(link.into());
        self
    }

    pub fn with_embed(mut self, link: impl Into<String>) -> Self {
        self.link_embed = Some(link.into());
        self
    }

    /// HLS link, `None` when missing or blank.
    pub fn hls_link(&self) -> Option<&str> {
        non_blank(self.link_m3u8.as_deref())
    }

    /// Embed link, `None` when missing or blank.
    pub fn embed_link(&self) -> Option<&str> {
        non_blank(self.link_embed.as_deref())
    }

    pub fn has_playable_link(&self) -> bool {
        self.hls_link().is_some() || self.embed_link().is_some()
    }

    /// Single-part titles are labelled "Full" upstream.
    pub fn is_full_feature(&self) -> bool {
        self.name.trim().eq_ignore_ascii_case("full")
    }

    /// Native source for this episode, if the HLS link parses.
    pub fn native_source(&self) -> Option<PlayableSource> {
        PlayableSource::hls(self.hls_link()?)
    }

    /// Embed source for this episode, if the embed link parses.
    pub fn embed_source(&self) -> Option<PlayableSource> {
        PlayableSource::embed(self.embed_link()?)
    }

    /// Preferred source: HLS first, embed second.
    pub fn source(&self) -> Option<PlayableSource> {
        self.native_source().or_else(|| self.embed_source())
    }
}

fn non_blank(link: Option<&str>) -> Option<&str> {
    link.map(str::trim).filter(|l| !l.is_empty())
}

/// One streaming backend offering the movie's episodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Server {
    #[cfg_attr(feature = "serde", serde(default))]
    pub server_name: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "server_data", default)
    )]
    pub episodes: Vec<Episode>,
}

impl Server {
    pub fn new(server_name: impl Into<String>, episodes: Vec<Episode>) -> Self {
        Self {
            server_name: server_name.into(),
            episodes,
        }
    }

    pub fn episode(&self, index: usize) -> Option<&Episode> {
        self.episodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

/// Normalized movie record handed to the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Movie {
    #[cfg_attr(feature = "serde", serde(rename = "_id", default))]
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slug: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub origin_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster_url: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub thumb_url: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub year: Option<u32>,
    /// Ordered server list; order is the server identity.
    #[cfg_attr(feature = "serde", serde(default))]
    pub episodes: Vec<Server>,
}

impl Movie {
    pub fn new(name: impl Into<String>, slug: impl Into<String>, servers: Vec<Server>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            episodes: servers,
            ..Default::default()
        }
    }

    pub fn servers(&self) -> &[Server] {
        &self.episodes
    }

    pub fn server(&self, index: usize) -> Option<&Server> {
        self.episodes.get(index)
    }

    /// Path of the movie's details page on the site.
    pub fn details_path(&self) -> String {
        format!("/phim/{}", self.slug)
    }
}
