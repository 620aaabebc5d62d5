// Controls visibility: inactivity hiding, panel pinning and keyboard input.

use crate::common::Harness;
use moiphim_player::domains::player::Panel;
use moiphim_player::domains::player::timers::TimerKind;
use moiphim_player::infra::testing::BackendCall;
use moiphim_player::{BackendEvent, Key, PlayerMessage};

#[test]
fn controls_hide_after_three_seconds_of_playback() {
    let mut h = Harness::playing(100.0);
    assert!(h.controls_visible());

    h.advance_ms(2999);
    assert!(h.controls_visible());
    h.advance_ms(1);
    assert!(!h.controls_visible());
    assert!(h.controller.view().cursor_hidden);
}

#[test]
fn controls_stay_while_paused() {
    let mut h = Harness::playing(100.0);
    h.send(PlayerMessage::PlayPause);
    h.backend(BackendEvent::Pause);
    assert!(!h.controller.session().is_playing());

    h.advance_ms(10_000);
    assert!(h.controls_visible());
}

#[test]
fn any_interaction_restarts_the_window() {
    let mut h = Harness::playing(100.0);
    h.advance_ms(2000);
    h.send(PlayerMessage::MouseMoved);

    h.advance_ms(2999);
    assert!(h.controls_visible());
    h.advance_ms(1);
    assert!(!h.controls_visible());

    h.send(PlayerMessage::MouseMoved);
    assert!(h.controls_visible());
}

#[test]
fn open_list_panel_pins_controls_until_closed() {
    let mut h = Harness::playing(100.0);
    h.advance_ms(1000);
    h.send(PlayerMessage::ToggleServerPanel);

    h.advance_ms(9000);
    assert!(h.controls_visible());

    h.send(PlayerMessage::ClosePanel(Panel::Servers));
    h.advance_ms(2999);
    assert!(h.controls_visible());
    h.advance_ms(1);
    assert!(!h.controls_visible());
}

#[test]
fn settings_panel_does_not_pin_controls() {
    let mut h = Harness::playing(100.0);
    h.send(PlayerMessage::ToggleSettingsPanel);
    h.advance_ms(3000);
    assert!(!h.controls_visible());
    assert!(h.controller.panels().is_open(Panel::Settings));
}

#[test]
fn space_toggles_playback_other_keys_only_show_controls() {
    let mut h = Harness::playing(100.0);
    h.advance_ms(3000);
    assert!(!h.controls_visible());

    h.send(PlayerMessage::KeyPressed(Key::Other("ArrowLeft".into())));
    assert!(h.controls_visible());
    assert!(h.controller.session().is_playing());

    h.send(PlayerMessage::KeyPressed(Key::Space));
    assert!(!h.controller.session().is_playing());
    assert_eq!(h.factory.calls().last(), Some(&BackendCall::Pause));

    h.send(PlayerMessage::KeyPressed(Key::parse(" ")));
    assert!(h.controller.session().is_playing());
    assert_eq!(h.factory.calls().last(), Some(&BackendCall::Play));
}

#[test]
fn resuming_from_backend_restarts_hide_timer() {
    let mut h = Harness::playing(100.0);
    h.backend(BackendEvent::Pause);
    h.advance_ms(5000);
    assert!(h.controls_visible());

    h.backend(BackendEvent::Play);
    assert!(h.controller.timers().is_armed(TimerKind::ControlsHide));
    h.advance_ms(3000);
    assert!(!h.controls_visible());
}

#[test]
fn opening_one_list_closes_the_other() {
    let mut h = Harness::playing(100.0);
    h.send(PlayerMessage::ToggleEpisodePanel);
    h.send(PlayerMessage::ToggleServerPanel);

    let view = h.controller.view();
    assert!(view.episode_panel.is_none());
    let servers = view.server_panel.expect("server panel open");
    assert_eq!(servers.len(), 2);
    assert!(servers[0].active);
}

#[test]
fn choosing_a_speed_applies_it_and_closes_settings() {
    let mut h = Harness::playing(100.0);
    h.send(PlayerMessage::ToggleSettingsPanel);
    let options = h.controller.view().settings_panel.expect("settings open");
    assert_eq!(options.len(), 6);
    assert!(options.iter().any(|o| o.active && o.rate == 1.0));

    h.send(PlayerMessage::SetPlaybackSpeed(1.25));
    assert!(!h.controller.panels().is_open(Panel::Settings));
    assert_eq!(h.controller.session().playback_rate(), 1.25);
    assert_eq!(h.factory.calls().last(), Some(&BackendCall::SetRate(1.25)));
}

#[test]
fn unsupported_speed_is_ignored() {
    let mut h = Harness::playing(100.0);
    h.factory.clear_calls();
    h.send(PlayerMessage::SetPlaybackSpeed(3.0));
    assert_eq!(h.controller.session().playback_rate(), 1.0);
    assert!(h.factory.calls().is_empty());
}
