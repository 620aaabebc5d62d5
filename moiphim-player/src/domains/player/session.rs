//! Playback session: lifecycle, progress, seeking and rate for the episode
//! currently mounted.
//!
//! Commands go to the backend immediately. Lifecycle state only moves when
//! the backend reports the matching event, so `state` always reflects what
//! the backend last said rather than what was last asked of it.

use std::fmt;

use moiphim_model::{Episode, PlayableSource};
use url::Url;

use crate::error::{PlayerError, Result};
use crate::infra::constants::playback;

/// Native video capability for one mounted source.
///
/// A backend is created per mount and torn down when the episode changes,
/// the render path switches or the player unmounts.
pub trait PlaybackBackend: Send + fmt::Debug {
    fn load(&mut self, url: &Url) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn seek_to(&mut self, seconds: f64) -> Result<()>;
    fn seek_to_fraction(&mut self, fraction: f64) -> Result<()>;
    fn set_rate(&mut self, rate: f64) -> Result<()>;
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    fn teardown(&mut self);
}

pub trait BackendFactory: Send {
    /// Events produced by the returned backend must carry `token`.
    fn create(&mut self, token: MountToken) -> Box<dyn PlaybackBackend>;
}

impl<F> BackendFactory for F
where
    F: FnMut(MountToken) -> Box<dyn PlaybackBackend> + Send,
{
    fn create(&mut self, token: MountToken) -> Box<dyn PlaybackBackend> {
        self(token)
    }
}

/// Identifies one native mount; events from older mounts are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MountToken(pub u64);

impl fmt::Display for MountToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
    Ended,
    Error(String),
}

impl PlaybackState {
    fn accepts_transport(&self) -> bool {
        matches!(
            self,
            PlaybackState::Ready
                | PlaybackState::Playing
                | PlaybackState::Paused
                | PlaybackState::Ended
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressReport {
    pub played_seconds: f64,
    pub loaded_fraction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPathKind {
    Native,
    EmbedFallback,
}

#[derive(Debug)]
pub struct NativeHandle {
    token: MountToken,
    source: Url,
    backend: Box<dyn PlaybackBackend>,
}

impl NativeHandle {
    pub fn token(&self) -> MountToken {
        self.token
    }

    pub fn source(&self) -> &Url {
        &self.source
    }
}

#[derive(Debug)]
pub enum RenderPath {
    Native(NativeHandle),
    EmbedFallback(Url),
}

impl RenderPath {
    pub fn kind(&self) -> RenderPathKind {
        match self {
            RenderPath::Native(_) => RenderPathKind::Native,
            RenderPath::EmbedFallback(_) => RenderPathKind::EmbedFallback,
        }
    }
}

#[derive(Debug)]
pub struct PlaybackSession {
    state: PlaybackState,
    render: Option<RenderPath>,
    is_playing: bool,
    playback_rate: f64,
    duration: f64,
    played_seconds: f64,
    played_fraction: f64,
    loaded_fraction: f64,
    is_seeking: bool,
    seek_preview: Option<f64>,
    is_buffering: bool,
    /// Backend reported `Play` before the source was ready
    played_while_loading: bool,
    next_token: u64,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Idle,
            render: None,
            is_playing: true,
            playback_rate: playback::NORMAL_RATE,
            duration: 0.0,
            played_seconds: 0.0,
            played_fraction: 0.0,
            loaded_fraction: 0.0,
            is_seeking: false,
            seek_preview: None,
            is_buffering: false,
            played_while_loading: false,
            next_token: 0,
        }
    }

    /// Starting rate for the first mount. Unknown rates are ignored.
    pub fn with_rate(mut self, rate: f64) -> Self {
        if playback::is_allowed_rate(rate) {
            self.playback_rate = rate;
        }
        self
    }

    // ---- accessors ----

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn played_seconds(&self) -> f64 {
        self.played_seconds
    }

    pub fn played_fraction(&self) -> f64 {
        self.played_fraction
    }

    /// Fraction the seek bar shows: the drag preview while seeking.
    pub fn displayed_fraction(&self) -> f64 {
        self.seek_preview.unwrap_or(self.played_fraction)
    }

    pub fn loaded_fraction(&self) -> f64 {
        self.loaded_fraction
    }

    pub fn is_seeking(&self) -> bool {
        self.is_seeking
    }

    pub fn is_buffering(&self) -> bool {
        self.is_buffering
    }

    pub fn render_path(&self) -> Option<&RenderPath> {
        self.render.as_ref()
    }

    pub fn render_kind(&self) -> Option<RenderPathKind> {
        self.render.as_ref().map(RenderPath::kind)
    }

    pub fn is_native(&self) -> bool {
        self.render_kind() == Some(RenderPathKind::Native)
    }

    pub fn current_token(&self) -> Option<MountToken> {
        match &self.render {
            Some(RenderPath::Native(handle)) => Some(handle.token),
            _ => None,
        }
    }

    pub fn embed_url(&self) -> Option<&Url> {
        match &self.render {
            Some(RenderPath::EmbedFallback(url)) => Some(url),
            _ => None,
        }
    }

    // ---- mounting ----

    /// Mount `episode`, preferring the native HLS path. Any previous handle
    /// is torn down first and progress starts over.
    pub fn mount(
        &mut self,
        episode: Option<&Episode>,
        factory: &mut dyn BackendFactory,
    ) -> Result<RenderPathKind> {
        self.teardown();
        self.reset_progress();
        self.is_playing = true;

        let episode =
            episode.ok_or_else(|| PlayerError::MissingSource("the selected episode".into()))?;

        if let Some(PlayableSource::Hls(url)) = episode.native_source() {
            self.mount_native(url, factory);
            return Ok(RenderPathKind::Native);
        }

        self.mount_embed(episode)
    }

    /// Switch to the embedded player for the same episode.
    pub fn use_embed_fallback(&mut self, episode: Option<&Episode>) -> Result<RenderPathKind> {
        let episode =
            episode.ok_or_else(|| PlayerError::MissingSource("the selected episode".into()))?;
        if episode.embed_link().is_none() {
            return Err(PlayerError::MissingSource(format!(
                "an embed link on episode {}",
                episode.name
            )));
        }
        self.teardown();
        self.reset_progress();
        self.mount_embed(episode)
    }

    /// Rebuild the native handle, e.g. after a fatal backend error.
    pub fn reload(
        &mut self,
        episode: Option<&Episode>,
        factory: &mut dyn BackendFactory,
    ) -> Result<RenderPathKind> {
        let url = match episode.and_then(Episode::native_source) {
            Some(PlayableSource::Hls(url)) => url,
            _ => {
                return Err(PlayerError::MissingSource("an HLS link to reload".into()));
            }
        };
        self.teardown();
        self.reset_progress();
        self.is_playing = true;
        self.mount_native(url, factory);
        Ok(RenderPathKind::Native)
    }

    /// Release the backend. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if let Some(RenderPath::Native(mut handle)) = self.render.take() {
            log::debug!("[Player] Tearing down {}", handle.token);
            handle.backend.teardown();
        }
        self.state = PlaybackState::Idle;
        self.is_seeking = false;
        self.seek_preview = None;
        self.is_buffering = false;
        self.played_while_loading = false;
    }

    fn mount_native(&mut self, url: Url, factory: &mut dyn BackendFactory) {
        self.next_token += 1;
        let token = MountToken(self.next_token);
        let mut backend = factory.create(token);
        log::info!("[Player] Loading {url} ({token})");

        self.state = match backend.load(&url) {
            Ok(()) => PlaybackState::Loading,
            Err(err) => {
                log::error!("[Player] Failed to load {url}: {err}");
                PlaybackState::Error(err.to_string())
            }
        };
        if let Err(err) = backend.set_rate(self.playback_rate) {
            log::warn!("[Player] Could not apply rate {}: {err}", self.playback_rate);
        }

        self.render = Some(RenderPath::Native(NativeHandle {
            token,
            source: url,
            backend,
        }));
    }

    fn mount_embed(&mut self, episode: &Episode) -> Result<RenderPathKind> {
        match episode.embed_source() {
            Some(PlayableSource::Embed(url)) => {
                log::info!("[Player] Using embedded player {url}");
                self.render = Some(RenderPath::EmbedFallback(url));
                self.state = PlaybackState::Idle;
                Ok(RenderPathKind::EmbedFallback)
            }
            _ => Err(PlayerError::MissingSource(format!(
                "episode {}",
                episode.name
            ))),
        }
    }

    fn reset_progress(&mut self) {
        self.duration = 0.0;
        self.played_seconds = 0.0;
        self.played_fraction = 0.0;
        self.loaded_fraction = 0.0;
        self.is_seeking = false;
        self.seek_preview = None;
        self.is_buffering = false;
        self.played_while_loading = false;
    }

    fn backend(&mut self, command: &'static str) -> Result<&mut dyn PlaybackBackend> {
        match &mut self.render {
            Some(RenderPath::Native(handle)) => Ok(handle.backend.as_mut()),
            Some(RenderPath::EmbedFallback(_)) => Err(PlayerError::EmbedOnly(command)),
            None => Err(PlayerError::MissingSource(format!(
                "a mounted source to {command}"
            ))),
        }
    }

    // ---- commands ----

    pub fn toggle_play(&mut self) -> Result<()> {
        self.is_playing = !self.is_playing;
        self.apply_play_intent()
    }

    pub fn play(&mut self) -> Result<()> {
        self.is_playing = true;
        self.apply_play_intent()
    }

    pub fn pause(&mut self) -> Result<()> {
        self.is_playing = false;
        self.apply_play_intent()
    }

    /// Push the current play/pause intent to the backend. While loading the
    /// intent is held until the source is ready.
    pub fn apply_play_intent(&mut self) -> Result<()> {
        if !self.state.accepts_transport() && self.is_native() {
            return Ok(());
        }
        let playing = self.is_playing;
        let backend = self.backend(if playing { "play" } else { "pause" })?;
        if playing { backend.play() } else { backend.pause() }
    }

    pub fn begin_seek(&mut self) -> Result<()> {
        self.backend("seek")?;
        self.is_seeking = true;
        self.seek_preview = Some(self.played_fraction);
        Ok(())
    }

    pub fn update_seek_preview(&mut self, fraction: f64) {
        if self.is_seeking {
            self.seek_preview = Some(clamp_fraction(fraction));
        }
    }

    /// Commit a drag on the seek bar. Seeking ends even if the backend
    /// rejects the command.
    pub fn commit_seek(&mut self, fraction: f64) -> Result<()> {
        let fraction = clamp_fraction(fraction);
        self.is_seeking = false;
        self.seek_preview = None;

        self.backend("seek")?.seek_to_fraction(fraction)?;
        self.played_fraction = fraction;
        self.played_seconds = fraction * self.duration;
        Ok(())
    }

    /// Relative seek clamped to `[0, duration]`. Returns the target time, or
    /// `None` while the duration is still unknown.
    pub fn jump(&mut self, delta_seconds: f64) -> Result<Option<f64>> {
        let duration = self.duration;
        let backend = self.backend("seek")?;
        if duration <= 0.0 {
            log::debug!("[Player] Ignoring jump before duration is known");
            return Ok(None);
        }
        let current = backend.current_time();
        let current = if current.is_finite() { current } else { 0.0 };
        let target = (current + delta_seconds).clamp(0.0, duration);
        backend.seek_to(target)?;
        Ok(Some(target))
    }

    /// Returns `false` for rates outside the allowed set. The rate is kept
    /// on the embed path and applied when a native source mounts.
    pub fn set_playback_rate(&mut self, rate: f64) -> Result<bool> {
        if !playback::is_allowed_rate(rate) {
            log::debug!("[Player] Ignoring unsupported rate {rate}");
            return Ok(false);
        }
        self.playback_rate = rate;
        if self.is_native() {
            self.backend("rate")?.set_rate(rate)?;
        }
        Ok(true)
    }

    /// Drop a temporary rate without telling the backend, for use right
    /// before teardown.
    pub fn reset_rate(&mut self) {
        self.playback_rate = playback::NORMAL_RATE;
    }

    // ---- backend events ----

    /// Returns `true` when this moved the session out of Loading. A `Play`
    /// reported while loading takes effect here, after Ready.
    pub fn on_duration(&mut self, duration: f64) -> bool {
        if !(duration.is_finite() && duration > 0.0) {
            return false;
        }
        self.duration = duration;
        if self.played_seconds > 0.0 {
            self.played_fraction = clamp_fraction(self.played_seconds / duration);
        }
        if self.state != PlaybackState::Loading {
            return false;
        }
        self.state = if std::mem::take(&mut self.played_while_loading) {
            PlaybackState::Playing
        } else {
            PlaybackState::Ready
        };
        true
    }

    /// Ready callback: read the duration from the backend.
    pub fn on_ready(&mut self) -> bool {
        let duration = match &self.render {
            Some(RenderPath::Native(handle)) => handle.backend.duration(),
            _ => return false,
        };
        self.on_duration(duration)
    }

    /// Returns whether `is_playing` changed. While loading only the intent
    /// is recorded; the state moves once the duration is known.
    pub fn on_play(&mut self) -> bool {
        match self.state {
            PlaybackState::Error(_) | PlaybackState::Idle => return false,
            PlaybackState::Loading => self.played_while_loading = true,
            _ => self.state = PlaybackState::Playing,
        }
        self.is_buffering = false;
        !std::mem::replace(&mut self.is_playing, true)
    }

    /// Returns whether `is_playing` changed.
    pub fn on_pause(&mut self) -> bool {
        match self.state {
            PlaybackState::Playing => self.state = PlaybackState::Paused,
            PlaybackState::Loading => self.played_while_loading = false,
            _ => {}
        }
        std::mem::replace(&mut self.is_playing, false)
    }

    pub fn on_waiting(&mut self) {
        if self.is_native() {
            self.is_buffering = true;
        }
    }

    /// Progress is discarded while the user drags the seek bar.
    pub fn on_progress(&mut self, report: ProgressReport) -> bool {
        self.loaded_fraction = clamp_fraction(report.loaded_fraction);
        if self.is_seeking {
            return false;
        }

        if self.duration <= 0.0
            && let Some(RenderPath::Native(handle)) = &self.render
        {
            let duration = handle.backend.duration();
            if duration.is_finite() && duration > 0.0 {
                self.duration = duration;
            }
        }

        self.played_seconds = report.played_seconds.max(0.0);
        self.played_fraction = if self.duration > 0.0 {
            clamp_fraction(self.played_seconds / self.duration)
        } else {
            0.0
        };
        self.is_buffering = false;
        true
    }

    pub fn on_ended(&mut self) {
        self.state = PlaybackState::Ended;
        self.is_playing = false;
        self.is_buffering = false;
    }

    /// Returns whether the session entered the error state.
    pub fn on_error(&mut self, detail: String) -> bool {
        if !matches!(
            self.state,
            PlaybackState::Loading
                | PlaybackState::Ready
                | PlaybackState::Playing
                | PlaybackState::Paused
        ) {
            return false;
        }
        self.state = PlaybackState::Error(detail);
        self.is_seeking = false;
        self.seek_preview = None;
        self.is_buffering = false;
        true
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
