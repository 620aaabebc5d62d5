//! Top-level playback controller.
//!
//! Owns every piece of player state for one mounted movie and is the only
//! place that wires them together: selection changes remount the session,
//! gestures drive the session and controls, and all deferred work goes
//! through the shared [`TimerRegistry`].

use std::fmt;
use std::time::Instant;

use moiphim_model::Movie;

use super::config::PlayerConfig;
use super::controls::ControlsVisibility;
use super::gesture::GestureInterpreter;
use super::messages::{Notice, PlayerEvent};
use super::overlay::OverlayPanels;
use super::session::{BackendFactory, PlaybackSession, PlaybackState};
use super::source::{Selection, SelectionOutcome, SourceSelector};
use super::timers::{TimerKind, TimerRegistry};
use crate::error::PlayerError;
use crate::infra::config::Config;
use crate::infra::constants::playback;
use crate::infra::time::{SystemTimeProvider, TimeProvider};

/// Starting position inside the movie's server/episode list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MountOptions {
    pub initial_server_index: usize,
    pub initial_episode_index: usize,
}

impl MountOptions {
    pub fn at(server: usize, episode: usize) -> Self {
        Self {
            initial_server_index: server,
            initial_episode_index: episode,
        }
    }
}

/// Size of the video surface, used to place taps in zones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

pub struct PlayerController {
    pub(super) title: String,
    pub(super) slug: String,
    pub(super) details_path: String,
    pub(super) config: PlayerConfig,
    pub(super) selector: SourceSelector,
    pub(super) session: PlaybackSession,
    pub(super) gestures: GestureInterpreter,
    pub(super) controls: ControlsVisibility,
    pub(super) panels: OverlayPanels,
    pub(super) timers: TimerRegistry,
    pub(super) viewport: Viewport,
    pub(super) clock: Box<dyn TimeProvider>,
    pub(super) factory: Box<dyn BackendFactory>,
    pub(super) mounted: bool,
}

impl fmt::Debug for PlayerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerController")
            .field("slug", &self.slug)
            .field("selection", &self.selector.selection())
            .field("session", &self.session)
            .field("panels", &self.panels)
            .field("timers", &self.timers)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl PlayerController {
    pub fn new(
        movie: Movie,
        options: MountOptions,
        factory: impl BackendFactory + 'static,
    ) -> Self {
        let config = PlayerConfig::default();
        let details_path = movie.details_path();
        let Movie {
            name, slug, episodes, ..
        } = movie;

        Self {
            title: name,
            slug,
            details_path,
            config,
            selector: SourceSelector::new(
                episodes,
                options.initial_server_index,
                options.initial_episode_index,
            ),
            session: PlaybackSession::new(),
            gestures: GestureInterpreter::new(config),
            controls: ControlsVisibility::new(config.controls_hide_after),
            panels: OverlayPanels::new(),
            timers: TimerRegistry::new(),
            viewport: Viewport::default(),
            clock: Box::new(SystemTimeProvider),
            factory: Box::new(factory),
            mounted: false,
        }
    }

    /// Build a controller with the user's saved settings applied.
    pub fn from_config(
        movie: Movie,
        options: MountOptions,
        factory: impl BackendFactory + 'static,
        config: &Config,
    ) -> Self {
        let controller = Self::new(movie, options, factory)
            .with_config(PlayerConfig::from_runtime_config(&config.player));
        match config.playback_rate {
            Some(rate) => controller.with_playback_rate(rate),
            None => controller,
        }
    }

    pub fn with_config(mut self, config: PlayerConfig) -> Self {
        self.config = config;
        self.gestures = GestureInterpreter::new(config);
        self.controls = ControlsVisibility::new(config.controls_hide_after);
        self
    }

    pub fn with_clock(mut self, clock: impl TimeProvider) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_playback_rate(mut self, rate: f64) -> Self {
        if !playback::is_allowed_rate(rate) {
            log::warn!("[Player] Ignoring configured playback rate {rate}");
        }
        self.session = std::mem::take(&mut self.session).with_rate(rate);
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    /// Load the initial episode and start the controls timer.
    pub fn mount(&mut self) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        if self.mounted {
            log::warn!("[Player] mount() called twice for {}", self.slug);
            return events;
        }
        self.mounted = true;
        log::info!(
            "[Player] Mounting {} at {:?}",
            self.slug,
            self.selector.selection()
        );

        self.load_current(&mut events);
        let now = self.clock.now();
        self.controls.reset_timer(&mut self.timers, now);
        events
    }

    /// Cancel every timer and release the backend. No commands are issued
    /// afterwards and further messages are ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.timers.clear_all();
        if self.gestures.reset() {
            self.session.reset_rate();
        }
        self.panels.close_all();
        self.session.teardown();
        self.mounted = false;
        log::info!("[Player] Unmounted {}", self.slug);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Earliest pending timer, for the driver to sleep until.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.mounted {
            self.timers.next_deadline()
        } else {
            None
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn selection(&self) -> Selection {
        self.selector.selection()
    }

    pub fn selector(&self) -> &SourceSelector {
        &self.selector
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn gestures(&self) -> &GestureInterpreter {
        &self.gestures
    }

    pub fn panels(&self) -> &OverlayPanels {
        &self.panels
    }

    pub fn timers(&self) -> &TimerRegistry {
        &self.timers
    }

    pub fn controls_visible(&self) -> bool {
        self.controls.is_visible()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // ---- internal wiring shared with update.rs ----

    pub(super) fn fire_due_timers(&mut self, now: Instant) {
        while let Some(kind) = self.timers.pop_expired(now) {
            log::trace!("[Player] Timer fired: {kind:?}");
            match kind {
                TimerKind::LongPress => {
                    if self.gestures.on_long_press_timer().is_some() {
                        log::debug!("[Player] Long press: boosting playback");
                        self.apply_rate(self.config.boost_rate);
                    }
                }
                TimerKind::SingleTap => {
                    if self.gestures.on_single_tap_timer().is_some() {
                        self.on_single_tap(now);
                    }
                }
                TimerKind::ControlsHide => {
                    self.controls.on_timer(self.panels.list_open(), self.session.is_playing());
                }
                TimerKind::SeekIndicator => self.gestures.on_indicator_timer(),
            }
        }
    }

    fn on_single_tap(&mut self, now: Instant) {
        if self.panels.list_open() {
            log::debug!("[Player] Single tap ignored while a list is open");
        } else if self.controls.is_visible() {
            self.controls.hide(&mut self.timers);
        } else {
            self.controls.reset_timer(&mut self.timers, now);
        }
    }

    /// Move to the next episode, or report that there is none.
    pub(super) fn advance(&mut self, now: Instant, events: &mut Vec<PlayerEvent>) {
        match self.selector.next_episode() {
            SelectionOutcome::Changed(selection) => {
                self.switch_source(selection, now, events);
            }
            SelectionOutcome::EndOfContent => {
                log::info!("[Player] Reached the last episode of {}", self.slug);
                events.push(PlayerEvent::Notice(Notice::LastEpisode));
            }
            SelectionOutcome::Unchanged => {}
        }
    }

    /// Tear everything down and mount the newly selected episode.
    pub(super) fn switch_source(
        &mut self,
        selection: Selection,
        now: Instant,
        events: &mut Vec<PlayerEvent>,
    ) {
        self.timers.clear_all();
        if self.gestures.reset() {
            self.apply_rate(playback::NORMAL_RATE);
        }

        log::info!(
            "[Player] Switching to server {} episode {}",
            selection.server_index,
            selection.episode_index
        );
        self.load_current(events);
        self.controls.reset_timer(&mut self.timers, now);

        events.push(PlayerEvent::SourceChanged {
            server_index: selection.server_index,
            episode_index: selection.episode_index,
        });
    }

    pub(super) fn load_current(&mut self, events: &mut Vec<PlayerEvent>) {
        let episode = self.selector.current_episode();
        match self.session.mount(episode, self.factory.as_mut()) {
            Ok(kind) => {
                log::debug!("[Player] Mounted via {kind:?}");
                self.report_load_failure(events);
            }
            Err(err) => log::warn!("[Player] {err}"),
        }
    }

    pub(super) fn report_load_failure(&self, events: &mut Vec<PlayerEvent>) {
        if let PlaybackState::Error(detail) = self.session.state() {
            events.push(PlayerEvent::PlaybackError(detail.clone()));
        }
    }

    pub(super) fn apply_rate(&mut self, rate: f64) {
        match self.session.set_playback_rate(rate) {
            Ok(true) => log::debug!("[Player] Playback rate {rate}"),
            Ok(false) => {}
            Err(err) => log_command_error("set rate", err),
        }
    }
}

/// Commands the embedded player cannot take are expected and only traced.
pub(super) fn log_command_error(what: &str, err: PlayerError) {
    match err {
        PlayerError::EmbedOnly(_) => log::debug!("[Player] {what}: {err}"),
        other => log::warn!("[Player] {what} failed: {other}"),
    }
}
