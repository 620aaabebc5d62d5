// Server/episode selection, auto-advance and render path handling.

use crate::common::{Harness, broken_movie};
use moiphim_model::Movie;
use moiphim_player::domains::player::view::Screen;
use moiphim_player::domains::player::{PlaybackState, Point, RenderPathKind};
use moiphim_player::domains::player::timers::TimerKind;
use moiphim_player::infra::testing::{BackendCall, fixtures};
use moiphim_player::{
    BackendEvent, MountOptions, Notice, PlayerEvent, PlayerMessage,
    ProgressReport,
};

#[test]
fn selecting_a_server_restarts_at_its_first_episode() {
    let mut h = Harness::new(fixtures::series_movie(), MountOptions::at(0, 2));
    let old = h.token();

    let events = h.send(PlayerMessage::SelectServer(1));
    assert_eq!(
        events,
        vec![PlayerEvent::SourceChanged {
            server_index: 1,
            episode_index: 0
        }]
    );
    assert_eq!(h.factory.calls_for(old).last(), Some(&BackendCall::Teardown));
    // Second server's episode only has an embed link.
    assert_eq!(
        h.controller.session().render_kind(),
        Some(RenderPathKind::EmbedFallback)
    );
}

#[test]
fn selecting_an_episode_remounts_and_resets_progress() {
    let mut h = Harness::playing(100.0);
    h.backend(BackendEvent::Progress(ProgressReport {
        played_seconds: 60.0,
        loaded_fraction: 0.9,
    }));
    h.send(PlayerMessage::PlayPause);
    assert!(h.controller.session().played_fraction() > 0.0);

    h.send(PlayerMessage::ToggleEpisodePanel);
    let events = h.send(PlayerMessage::SelectEpisode(2));
    assert_eq!(
        events,
        vec![PlayerEvent::SourceChanged {
            server_index: 0,
            episode_index: 2
        }]
    );

    let session = h.controller.session();
    assert_eq!(session.played_fraction(), 0.0);
    assert_eq!(session.duration(), 0.0);
    assert!(session.is_playing());
    assert_eq!(session.state(), &PlaybackState::Loading);
    assert_eq!(h.factory.mounts(), 2);
    assert!(h.controller.view().episode_panel.is_none());
}

#[test]
fn out_of_range_selection_is_ignored() {
    let mut h = Harness::series();
    assert!(h.send(PlayerMessage::SelectEpisode(9)).is_empty());
    assert!(h.send(PlayerMessage::SelectServer(9)).is_empty());
    assert_eq!(h.factory.mounts(), 1);
}

#[test]
fn switching_source_clears_pending_timers() {
    let mut h = Harness::playing(100.0);
    h.tap(500.0);
    h.send(PlayerMessage::PointerDown(Point::new(10.0, 10.0)));
    assert!(h.controller.timers().is_armed(TimerKind::SingleTap));
    assert!(h.controller.timers().is_armed(TimerKind::LongPress));

    h.send(PlayerMessage::NextEpisode);
    let timers = h.controller.timers();
    assert!(!timers.is_armed(TimerKind::SingleTap));
    assert!(!timers.is_armed(TimerKind::LongPress));
    // Only the fresh inactivity window remains.
    assert_eq!(timers.pending(), 1);
    assert!(timers.is_armed(TimerKind::ControlsHide));
}

#[test]
fn switching_source_mid_boost_restores_normal_rate() {
    let mut h = Harness::playing(100.0);
    h.press(500.0);
    h.advance_ms(500);
    assert_eq!(h.controller.session().playback_rate(), 2.0);

    h.send(PlayerMessage::NextEpisode);
    assert_eq!(h.controller.session().playback_rate(), 1.0);
    assert!(!h.controller.view().speed_boost);
    assert_eq!(
        h.factory.calls_for(h.token()).last(),
        Some(&BackendCall::SetRate(1.0))
    );
}

#[test]
fn ended_advances_to_next_episode() {
    let mut h = Harness::playing(100.0);
    let events = h.backend(BackendEvent::Ended);
    assert_eq!(
        events,
        vec![
            PlayerEvent::Ended,
            PlayerEvent::SourceChanged {
                server_index: 0,
                episode_index: 1
            }
        ]
    );
    assert_eq!(h.controller.selection().episode_index, 1);
}

#[test]
fn ended_on_last_episode_raises_notice() {
    let mut h = Harness::new(fixtures::series_movie(), MountOptions::at(0, 2));
    h.ready(100.0);

    let events = h.backend(BackendEvent::Ended);
    assert_eq!(
        events,
        vec![PlayerEvent::Ended, PlayerEvent::Notice(Notice::LastEpisode)]
    );
    assert_eq!(h.controller.selection().episode_index, 2);
    assert_eq!(h.factory.mounts(), 1);

    let events = h.send(PlayerMessage::NextEpisode);
    assert_eq!(events, vec![PlayerEvent::Notice(Notice::LastEpisode)]);
}

#[test]
fn previous_episode_stops_at_first() {
    let mut h = Harness::new(fixtures::series_movie(), MountOptions::at(0, 1));
    assert_eq!(h.send(PlayerMessage::PreviousEpisode).len(), 1);
    assert!(h.send(PlayerMessage::PreviousEpisode).is_empty());
    assert_eq!(h.controller.selection().episode_index, 0);
}

#[test]
fn events_from_a_replaced_backend_are_dropped() {
    let mut h = Harness::playing(100.0);
    let old = h.token();
    h.send(PlayerMessage::NextEpisode);

    let events = h.send(PlayerMessage::Backend(old, BackendEvent::Error("late failure".into())));
    assert!(events.is_empty());
    assert_eq!(h.controller.session().state(), &PlaybackState::Loading);

    let events = h.send(PlayerMessage::Backend(old, BackendEvent::Ended));
    assert!(events.is_empty());
    assert_eq!(h.controller.selection().episode_index, 1);
}

#[test]
fn playback_error_shows_source_error_and_reload_retries() {
    let mut h = Harness::playing(100.0);
    let events = h.backend(BackendEvent::Error("fragLoadError".into()));
    assert_eq!(
        events,
        vec![PlayerEvent::PlaybackError("fragLoadError".into())]
    );
    assert_eq!(
        h.controller.view().screen,
        Screen::SourceError {
            detail: "fragLoadError".into()
        }
    );

    let old = h.token();
    h.send(PlayerMessage::Reload);
    assert_ne!(h.token(), old);
    assert_eq!(
        h.controller.view().screen,
        Screen::Native {
            state: PlaybackState::Loading
        }
    );
}

#[test]
fn failed_load_is_reported_on_switch() {
    let mut h = Harness::series();
    h.factory.fail_next_load("403");
    let events = h.send(PlayerMessage::SelectEpisode(1));
    assert!(events.contains(&PlayerEvent::PlaybackError("Playback backend error: 403".into())));
}

#[test]
fn embed_fallback_is_manual_and_disables_seeking() {
    let mut h = Harness::playing(100.0);
    h.send(PlayerMessage::UseEmbedFallback);

    let view = h.controller.view();
    match &view.screen {
        Screen::Embed { url, .. } => {
            assert_eq!(url, "https://player.example/e/series-1")
        }
        other => panic!("expected embed screen, got {other:?}"),
    }
    assert!(view.seek_bar.is_none());
    assert!(!view.cursor_hidden);

    h.factory.clear_calls();
    h.send(PlayerMessage::SkipForward);
    h.send(PlayerMessage::SeekBarPressed);
    h.send(PlayerMessage::SeekBarReleased(0.5));
    assert!(h.factory.calls().is_empty());

    // Retry goes back to the native path.
    h.send(PlayerMessage::Reload);
    assert_eq!(
        h.controller.session().render_kind(),
        Some(RenderPathKind::Native)
    );
}

#[test]
fn missing_source_offers_only_the_way_back() {
    let mut h = Harness::new(broken_movie(), MountOptions::default());
    assert_eq!(h.factory.mounts(), 0);
    assert_eq!(
        h.controller.view().screen,
        Screen::EpisodeNotFound {
            details_path: "/phim/phim-hong".into()
        }
    );

    // Transport is a no-op rather than a crash.
    assert!(h.send(PlayerMessage::PlayPause).is_empty());
    assert!(h.send(PlayerMessage::SkipForward).is_empty());

    assert_eq!(
        h.send(PlayerMessage::NavigateBack),
        vec![PlayerEvent::NavigateBack {
            slug: "phim-hong".into(),
            path: "/phim/phim-hong".into()
        }]
    );
}

#[test]
fn empty_catalog_is_episode_not_found() {
    let h = Harness::new(Movie::new("Trong", "trong", Vec::new()), MountOptions::default());
    assert!(matches!(
        h.controller.view().screen,
        Screen::EpisodeNotFound { .. }
    ));
    assert!(h.controller.view().episode_label.is_none());
}

#[test]
fn out_of_range_initial_indices_fall_back_to_first_episode() {
    let h = Harness::new(fixtures::series_movie(), MountOptions::at(5, 7));
    assert_eq!(h.controller.selection(), Default::default());
    assert_eq!(h.factory.mounts(), 1);
}
