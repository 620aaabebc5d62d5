//! Render-ready snapshot of the player.
//!
//! The shell draws whatever [`PlayerView`] says; it never reads controller
//! internals directly.

use super::controller::PlayerController;
use super::gesture::{SeekIndicator, SeekSide};
use super::overlay::Panel;
use super::session::{PlaybackState, RenderPath};
use crate::infra::constants::playback;

pub const BRAND: &str = "MOIPHIM";
pub const EMBED_NOTICE: &str = "Playing through the server's own player. Use its controls to seek.";

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub brand: &'static str,
    pub title: String,
    /// Hidden for single-episode "Full" titles
    pub episode_label: Option<String>,
    pub screen: Screen,
    pub controls_visible: bool,
    pub cursor_hidden: bool,
    pub is_playing: bool,
    pub is_buffering: bool,
    pub seek_bar: Option<SeekBarView>,
    pub seek_indicator: Option<SeekIndicatorView>,
    /// "2x" badge while long-pressing
    pub speed_boost: bool,
    pub playback_rate: f64,
    pub has_next: bool,
    pub has_previous: bool,
    pub episode_panel: Option<Vec<PanelItem>>,
    pub server_panel: Option<Vec<PanelItem>>,
    pub settings_panel: Option<Vec<SpeedOption>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Native { state: PlaybackState },
    Embed { url: String, notice: &'static str },
    /// No playable episode; the only way out is back to the details page
    EpisodeNotFound { details_path: String },
    /// Native playback failed; offers a retry
    SourceError { detail: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeekBarView {
    pub fraction: f64,
    pub loaded_fraction: f64,
    pub elapsed: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeekIndicatorView {
    pub side: SeekSide,
    pub label: String,
}

impl From<SeekIndicator> for SeekIndicatorView {
    fn from(indicator: SeekIndicator) -> Self {
        let sign = match indicator.side {
            SeekSide::Rewind => '-',
            SeekSide::Forward => '+',
        };
        Self {
            side: indicator.side,
            label: format!("{sign}{}s", indicator.amount.round() as i64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelItem {
    pub index: usize,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedOption {
    pub rate: f64,
    pub label: String,
    pub active: bool,
}

impl PlayerController {
    pub fn view(&self) -> PlayerView {
        let session = &self.session;
        let selection = self.selector.selection();
        let episode = self.selector.current_episode();

        let screen = match (session.render_path(), session.state()) {
            (Some(RenderPath::Native(_)), PlaybackState::Error(detail)) => {
                Screen::SourceError {
                    detail: detail.clone(),
                }
            }
            (Some(RenderPath::Native(_)), state) => Screen::Native {
                state: state.clone(),
            },
            (Some(RenderPath::EmbedFallback(url)), _) => Screen::Embed {
                url: url.to_string(),
                notice: EMBED_NOTICE,
            },
            (None, _) => Screen::EpisodeNotFound {
                details_path: self.details_path.clone(),
            },
        };
        let is_embed = matches!(screen, Screen::Embed { .. });

        let seek_bar = (session.is_native() && session.duration() > 0.0)
            .then(|| {
                let fraction = session.displayed_fraction();
                SeekBarView {
                    fraction,
                    loaded_fraction: session.loaded_fraction(),
                    elapsed: format_time(fraction * session.duration()),
                    total: format_time(session.duration()),
                }
            });

        let episode_panel = self.panels.is_open(Panel::Episodes).then(|| {
            self.selector
                .episodes()
                .iter()
                .enumerate()
                .map(|(index, ep)| PanelItem {
                    index,
                    label: ep.name.clone(),
                    active: index == selection.episode_index,
                })
                .collect()
        });

        let server_panel = self.panels.is_open(Panel::Servers).then(|| {
            self.selector
                .servers()
                .iter()
                .enumerate()
                .map(|(index, server)| PanelItem {
                    index,
                    label: server.server_name.clone(),
                    active: index == selection.server_index,
                })
                .collect()
        });

        let settings_panel = self.panels.is_open(Panel::Settings).then(|| {
            playback::ALLOWED_RATES
                .iter()
                .map(|&rate| SpeedOption {
                    rate,
                    label: speed_label(rate),
                    active: (rate - session.playback_rate()).abs() < 1e-9,
                })
                .collect()
        });

        let controls_visible = self.controls.is_visible();

        PlayerView {
            brand: BRAND,
            title: self.title.clone(),
            episode_label: episode
                .filter(|ep| !ep.is_full_feature())
                .map(|ep| format!("Episode {}", ep.name)),
            screen,
            controls_visible,
            cursor_hidden: !controls_visible && !is_embed,
            is_playing: session.is_playing(),
            is_buffering: session.is_buffering(),
            seek_bar,
            seek_indicator: self.gestures.seek_indicator().map(Into::into),
            speed_boost: self.gestures.is_long_pressing(),
            playback_rate: session.playback_rate(),
            has_next: self.selector.has_next(),
            has_previous: self.selector.has_previous(),
            episode_panel,
            server_panel,
            settings_panel,
        }
    }
}

fn speed_label(rate: f64) -> String {
    if (rate - playback::NORMAL_RATE).abs() < 1e-9 {
        "Normal".to_string()
    } else {
        format!("{rate}x")
    }
}

/// `h:mm:ss` past the hour, `m:ss` below it. Invalid input shows `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}
