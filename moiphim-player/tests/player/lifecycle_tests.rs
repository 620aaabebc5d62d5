// Mount, progress reporting, seeking, shell events and unmount.

use crate::common::Harness;
use moiphim_player::domains::player::PlaybackState;
use moiphim_player::domains::player::view::{SeekBarView, Screen};
use moiphim_player::infra::config::Config;
use moiphim_player::infra::runtime_config::RuntimeConfig;
use moiphim_player::infra::testing::{BackendCall, RecordingFactory, fixtures};
use moiphim_player::{
    BackendEvent, MountOptions, PlayerController, PlayerEvent, PlayerMessage,
    ProgressReport,
};

#[test]
fn mount_loads_first_native_source() {
    let h = Harness::series();
    assert!(h.mount_events.is_empty());
    assert!(h.controller.is_mounted());
    assert_eq!(
        h.factory.calls(),
        vec![
            BackendCall::Load("https://cdn.example/series/1/index.m3u8".into()),
            BackendCall::SetRate(1.0),
        ]
    );

    let view = h.controller.view();
    assert_eq!(view.brand, "MOIPHIM");
    assert_eq!(view.title, "Phim Bo");
    assert_eq!(view.episode_label.as_deref(), Some("Episode 1"));
    assert_eq!(
        view.screen,
        Screen::Native {
            state: PlaybackState::Loading
        }
    );
    assert!(view.seek_bar.is_none());
    assert!(view.has_next);
    assert!(!view.has_previous);
}

#[test]
fn duration_makes_the_source_ready_and_starts_playback() {
    let mut h = Harness::series();
    let events = h.backend(BackendEvent::DurationKnown(600.0));
    assert_eq!(events, vec![PlayerEvent::Ready { duration: 600.0 }]);
    assert_eq!(h.factory.calls().last(), Some(&BackendCall::Play));

    // A repeated duration report is not a second Ready.
    assert!(h.backend(BackendEvent::DurationKnown(600.0)).is_empty());

    h.backend(BackendEvent::Start);
    h.backend(BackendEvent::Play);
    assert_eq!(h.controller.session().state(), &PlaybackState::Playing);
}

#[test]
fn early_play_report_still_announces_ready() {
    let mut h = Harness::series();
    assert!(h.backend(BackendEvent::Play).is_empty());
    assert_eq!(h.controller.session().state(), &PlaybackState::Loading);

    let events = h.backend(BackendEvent::DurationKnown(100.0));
    assert_eq!(events, vec![PlayerEvent::Ready { duration: 100.0 }]);
    assert_eq!(h.controller.session().state(), &PlaybackState::Playing);
}

#[test]
fn paused_intent_survives_loading() {
    let mut h = Harness::series();
    h.send(PlayerMessage::PlayPause);
    assert_eq!(h.factory.calls().len(), 2);

    h.backend(BackendEvent::DurationKnown(600.0));
    assert_eq!(h.factory.calls().last(), Some(&BackendCall::Pause));
    assert!(!h.controller.view().is_playing);
}

#[test]
fn progress_reports_time_and_fills_seek_bar() {
    let mut h = Harness::playing(600.0);
    let events = h.backend(BackendEvent::Progress(ProgressReport {
        played_seconds: 90.0,
        loaded_fraction: 0.3,
    }));
    assert_eq!(
        events,
        vec![PlayerEvent::TimeUpdate {
            played_seconds: 90.0,
            played_fraction: 0.15
        }]
    );
    assert_eq!(
        h.controller.view().seek_bar,
        Some(SeekBarView {
            fraction: 0.15,
            loaded_fraction: 0.3,
            elapsed: "1:30".into(),
            total: "10:00".into(),
        })
    );
}

#[test]
fn waiting_shows_buffering_until_progress() {
    let mut h = Harness::playing(600.0);
    h.backend(BackendEvent::Waiting);
    assert!(h.controller.view().is_buffering);

    h.backend(BackendEvent::Progress(ProgressReport {
        played_seconds: 1.0,
        loaded_fraction: 0.1,
    }));
    assert!(!h.controller.view().is_buffering);
}

#[test]
fn seek_bar_drag_previews_then_commits() {
    let mut h = Harness::playing(600.0);
    h.backend(BackendEvent::Progress(ProgressReport {
        played_seconds: 60.0,
        loaded_fraction: 0.2,
    }));

    h.send(PlayerMessage::SeekBarPressed);
    h.send(PlayerMessage::SeekBarMoved(0.5));
    let events = h.backend(BackendEvent::Progress(ProgressReport {
        played_seconds: 61.0,
        loaded_fraction: 0.2,
    }));
    assert!(events.is_empty());

    let bar = h.controller.view().seek_bar.expect("seek bar");
    assert_eq!(bar.fraction, 0.5);
    assert_eq!(bar.elapsed, "5:00");

    h.send(PlayerMessage::SeekBarReleased(0.5));
    assert!(!h.controller.session().is_seeking());
    assert_eq!(
        h.factory.calls().last(),
        Some(&BackendCall::SeekToFraction(0.5))
    );
    assert_eq!(h.controller.session().played_seconds(), 300.0);
}

#[test]
fn transport_buttons_jump_fifteen_seconds() {
    let mut h = Harness::playing(600.0);
    h.factory.set_current_time(100.0);
    h.send(PlayerMessage::SkipForward);
    assert_eq!(h.factory.calls().last(), Some(&BackendCall::SeekTo(115.0)));

    h.factory.set_current_time(10.0);
    h.send(PlayerMessage::SkipBackward);
    assert_eq!(h.factory.calls().last(), Some(&BackendCall::SeekTo(0.0)));
}

#[test]
fn feature_film_hides_episode_label() {
    let h = Harness::new(fixtures::feature_movie(), MountOptions::default());
    let view = h.controller.view();
    assert!(view.episode_label.is_none());
    assert!(!view.has_next);
}

#[test]
fn navigate_back_and_fullscreen_go_to_the_shell() {
    let mut h = Harness::series();
    assert_eq!(
        h.send(PlayerMessage::NavigateBack),
        vec![PlayerEvent::NavigateBack {
            slug: "phim-bo".into(),
            path: "/phim/phim-bo".into()
        }]
    );
    assert_eq!(
        h.send(PlayerMessage::ToggleFullscreen),
        vec![PlayerEvent::ToggleFullscreen]
    );
    assert!(
        h.send(PlayerMessage::FullscreenFailed("denied".into()))
            .is_empty()
    );
}

#[test]
fn unmount_cancels_timers_and_releases_backend() {
    let mut h = Harness::playing(600.0);
    h.press(500.0);
    assert!(h.controller.timers().pending() >= 2);

    h.send(PlayerMessage::Unmount);
    assert!(!h.controller.is_mounted());
    assert_eq!(h.controller.timers().pending(), 0);
    assert_eq!(h.controller.next_deadline(), None);
    assert_eq!(h.factory.calls().last(), Some(&BackendCall::Teardown));

    let recorded = h.factory.calls().len();
    assert!(h.send(PlayerMessage::PlayPause).is_empty());
    assert!(h.advance_ms(5000).is_empty());
    assert_eq!(h.factory.calls().len(), recorded);
}

#[test]
fn unmount_during_long_press_drops_the_boost() {
    let mut h = Harness::playing(600.0);
    h.press(500.0);
    h.advance_ms(500);
    assert_eq!(h.controller.session().playback_rate(), 2.0);
    h.factory.clear_calls();

    h.send(PlayerMessage::Unmount);
    assert_eq!(h.controller.session().playback_rate(), 1.0);
    assert!(!h.controller.view().speed_boost);
    assert_eq!(h.factory.calls(), vec![BackendCall::Teardown]);
}

#[test]
fn saved_settings_apply_at_mount() {
    let config = Config {
        playback_rate: Some(1.5),
        player: RuntimeConfig {
            controls_hide_ms: Some(1000),
            ..RuntimeConfig::default()
        },
    };
    let mut h = Harness::with_controller(|factory: RecordingFactory| {
        PlayerController::from_config(
            fixtures::series_movie(),
            MountOptions::default(),
            factory,
            &config,
        )
    });
    assert_eq!(h.factory.calls().last(), Some(&BackendCall::SetRate(1.5)));

    h.ready(600.0);
    h.advance_ms(999);
    assert!(h.controls_visible());
    h.advance_ms(1);
    assert!(!h.controls_visible());
}
