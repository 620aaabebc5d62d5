use log::warn;
use url::Url;

use crate::error::Result;

/// A resolved, parsed playback source for one episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayableSource {
    /// HLS playlist, played through the in-app player
    Hls(Url),
    /// Opaque embed page, played inside a frame
    Embed(Url),
}

impl PlayableSource {
    pub fn hls(link: &str) -> Option<Self> {
        parse_or_warn(link, "m3u8").map(PlayableSource::Hls)
    }

    pub fn embed(link: &str) -> Option<Self> {
        parse_or_warn(link, "embed").map(PlayableSource::Embed)
    }

    pub fn url(&self) -> &Url {
        match self {
            PlayableSource::Hls(url) | PlayableSource::Embed(url) => url,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, PlayableSource::Hls(_))
    }
}

impl std::fmt::Display for PlayableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayableSource::Hls(url) => write!(f, "Hls({url})"),
            PlayableSource::Embed(url) => write!(f, "Embed({url})"),
        }
    }
}

/// Parse a link field from the catalog API.
pub fn parse_link(link: &str) -> Result<Url> {
    Ok(Url::parse(link.trim())?)
}

fn parse_or_warn(link: &str, kind: &str) -> Option<Url> {
    match parse_link(link) {
        Ok(url) => Some(url),
        Err(err) => {
            warn!("Ignoring unparsable {kind} link {link:?}: {err}");
            None
        }
    }
}
