//! Test harness for driving a [`PlayerController`] on a virtual clock
//!
//! Each harness owns a controller wired to a recording backend and a
//! virtual time provider, so timer-dependent behavior can be stepped
//! deterministically.

#![allow(dead_code)]

use moiphim_model::{Episode, Movie, Server};
use moiphim_player::domains::player::Point;
use moiphim_player::infra::testing::{RecordingFactory, fixtures};
use moiphim_player::infra::time::VirtualTimeProvider;
use moiphim_player::{
    BackendEvent, MountOptions, MountToken, PlayerController, PlayerEvent,
    PlayerMessage,
};

pub const WIDTH: f32 = 1000.0;
pub const HEIGHT: f32 = 600.0;

/// Press-to-release time used for ordinary taps
pub const TAP_MS: u64 = 40;

pub struct Harness {
    pub controller: PlayerController,
    pub factory: RecordingFactory,
    pub clock: VirtualTimeProvider,
    pub mount_events: Vec<PlayerEvent>,
}

impl Harness {
    pub fn new(movie: Movie, options: MountOptions) -> Self {
        Self::with_controller(|factory| {
            PlayerController::new(movie, options, factory)
        })
    }

    pub fn with_controller(build: impl FnOnce(RecordingFactory) -> PlayerController) -> Self {
        let factory = RecordingFactory::new();
        let clock = VirtualTimeProvider::new();
        let mut controller = build(factory.clone())
            .with_clock(clock.clone())
            .with_viewport(WIDTH, HEIGHT);
        let mount_events = controller.mount();
        Self {
            controller,
            factory,
            clock,
            mount_events,
        }
    }

    /// Three-episode series mounted on its first episode.
    pub fn series() -> Self {
        Self::new(fixtures::series_movie(), MountOptions::default())
    }

    /// Series mounted and reported ready with `duration` seconds, playing.
    pub fn playing(duration: f64) -> Self {
        let mut harness = Self::series();
        harness.ready(duration);
        harness
    }

    pub fn send(&mut self, message: PlayerMessage) -> Vec<PlayerEvent> {
        self.controller.update(message)
    }

    /// Move the clock forward and let due timers fire.
    pub fn advance_ms(&mut self, millis: u64) -> Vec<PlayerEvent> {
        self.clock.advance_ms(millis);
        self.controller.tick()
    }

    pub fn token(&self) -> MountToken {
        self.controller
            .session()
            .current_token()
            .expect("native source mounted")
    }

    pub fn backend(&mut self, event: BackendEvent) -> Vec<PlayerEvent> {
        let token = self.token();
        self.send(PlayerMessage::Backend(token, event))
    }

    pub fn ready(&mut self, duration: f64) -> Vec<PlayerEvent> {
        let mut events = self.backend(BackendEvent::DurationKnown(duration));
        events.extend(self.backend(BackendEvent::Play));
        events
    }

    pub fn press(&mut self, x: f32) -> Vec<PlayerEvent> {
        self.send(PlayerMessage::PointerDown(Point::new(x, HEIGHT / 2.0)))
    }

    pub fn release(&mut self, x: f32) -> Vec<PlayerEvent> {
        self.send(PlayerMessage::PointerUp(Point::new(x, HEIGHT / 2.0)))
    }

    /// Quick tap at `x`; takes [`TAP_MS`] of virtual time without firing
    /// timers in between.
    pub fn tap(&mut self, x: f32) -> Vec<PlayerEvent> {
        let mut events = self.press(x);
        self.clock.advance_ms(TAP_MS);
        events.extend(self.release(x));
        events
    }

    /// Two taps at `x` whose releases are `gap_ms` apart.
    pub fn double_tap(&mut self, x: f32, gap_ms: u64) -> Vec<PlayerEvent> {
        let mut events = self.tap(x);
        self.clock.advance_ms(gap_ms.saturating_sub(TAP_MS));
        events.extend(self.tap(x));
        events
    }

    pub fn controls_visible(&self) -> bool {
        self.controller.controls_visible()
    }
}

/// Movie whose only episode has no usable link.
pub fn broken_movie() -> Movie {
    Movie::new(
        "Phim Hong",
        "phim-hong",
        vec![Server::new(
            "Vietsub #1",
            vec![Episode::new("1", "tap-1").with_m3u8("  ")],
        )],
    )
}
