use std::time::Instant;

use super::controller::{PlayerController, Viewport, log_command_error};
use super::gesture::{GestureAction, TapZone};
use super::messages::{BackendEvent, Key, PlayerEvent, PlayerMessage};
use super::overlay::Panel;
use super::source::SelectionOutcome;
use crate::infra::constants::playback;

impl PlayerController {
    /// Handle one message. Timers that came due since the last call fire
    /// first, in deadline order, so input never overtakes a pending timer.
    pub fn update(&mut self, message: PlayerMessage) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        if !self.mounted {
            log::trace!("[Player] Ignoring {message:?} while unmounted");
            return events;
        }

        let now = self.clock.now();
        self.fire_due_timers(now);

        match message {
            // Gestures
            PlayerMessage::PointerDown(at) => {
                self.gestures.pointer_down(at, now, &mut self.timers);
            }
            PlayerMessage::PointerUp(at) => {
                if let Some(action) = self.gestures.pointer_up(
                    at,
                    self.viewport.width,
                    now,
                    &mut self.timers,
                ) {
                    self.apply_gesture(action, now);
                }
            }
            PlayerMessage::PointerCancel => {
                if let Some(action) = self.gestures.pointer_cancel(&mut self.timers)
                {
                    self.apply_gesture(action, now);
                }
            }
            PlayerMessage::MouseMoved => self.touch(now),
            PlayerMessage::KeyPressed(Key::Space) => self.toggle_play(now),
            PlayerMessage::KeyPressed(Key::Other(_)) => self.touch(now),
            PlayerMessage::Resized { width, height } => {
                if width > 0.0 && height > 0.0 {
                    self.viewport = Viewport { width, height };
                }
            }

            // Playback control
            PlayerMessage::PlayPause => self.toggle_play(now),
            PlayerMessage::SkipBackward => {
                self.jump(-self.config.button_jump_secs);
                self.touch(now);
            }
            PlayerMessage::SkipForward => {
                self.jump(self.config.button_jump_secs);
                self.touch(now);
            }
            PlayerMessage::SetPlaybackSpeed(rate) => {
                self.apply_rate(rate);
                self.panels.close(Panel::Settings);
                self.touch(now);
            }

            // Seeking
            PlayerMessage::SeekBarPressed => {
                if let Err(err) = self.session.begin_seek() {
                    log_command_error("begin seek", err);
                }
                self.touch(now);
            }
            PlayerMessage::SeekBarMoved(fraction) => {
                self.session.update_seek_preview(fraction);
                self.touch(now);
            }
            PlayerMessage::SeekBarReleased(fraction) => {
                if let Err(err) = self.session.commit_seek(fraction) {
                    log_command_error("seek", err);
                }
                self.touch(now);
            }

            // Episodes and servers
            PlayerMessage::NextEpisode => {
                self.advance(now, &mut events);
                self.touch(now);
            }
            PlayerMessage::PreviousEpisode => {
                let outcome = self.selector.previous_episode();
                self.apply_selection(outcome, now, &mut events);
            }
            PlayerMessage::SelectEpisode(index) => {
                self.panels.close(Panel::Episodes);
                let outcome = self.selector.select_episode(index);
                self.apply_selection(outcome, now, &mut events);
            }
            PlayerMessage::SelectServer(index) => {
                self.panels.close(Panel::Servers);
                let outcome = self.selector.select_server(index);
                self.apply_selection(outcome, now, &mut events);
            }

            // Overlay panels
            PlayerMessage::ToggleEpisodePanel => {
                self.panels.toggle(Panel::Episodes);
                self.touch(now);
            }
            PlayerMessage::ToggleServerPanel => {
                self.panels.toggle(Panel::Servers);
                self.touch(now);
            }
            PlayerMessage::ToggleSettingsPanel => {
                self.panels.toggle(Panel::Settings);
                self.touch(now);
            }
            PlayerMessage::ClosePanel(panel) => {
                self.panels.close(panel);
                self.touch(now);
            }

            // Render path
            PlayerMessage::UseEmbedFallback => {
                let episode = self.selector.current_episode();
                match self.session.use_embed_fallback(episode) {
                    Ok(_) => log::info!("[Player] Switched to embedded player"),
                    Err(err) => log::warn!("[Player] Embed fallback: {err}"),
                }
                self.touch(now);
            }
            PlayerMessage::Reload => {
                let episode = self.selector.current_episode();
                match self.session.reload(episode, self.factory.as_mut()) {
                    Ok(_) => self.report_load_failure(&mut events),
                    Err(err) => log::warn!("[Player] Reload: {err}"),
                }
                self.touch(now);
            }

            // Shell
            PlayerMessage::NavigateBack => {
                events.push(PlayerEvent::NavigateBack {
                    slug: self.slug.clone(),
                    path: self.details_path.clone(),
                });
            }
            PlayerMessage::ToggleFullscreen => {
                events.push(PlayerEvent::ToggleFullscreen);
                self.touch(now);
            }
            PlayerMessage::FullscreenFailed(reason) => {
                log::error!("[Player] Fullscreen request failed: {reason}");
            }

            PlayerMessage::Backend(token, event) => {
                if self.session.current_token() == Some(token) {
                    self.on_backend_event(event, now, &mut events);
                } else {
                    log::debug!("[Player] Dropping {event:?} from stale {token}");
                }
            }

            PlayerMessage::Tick => {}
            PlayerMessage::Unmount => self.unmount(),
        }

        events
    }

    /// Fire due timers without any other input.
    pub fn tick(&mut self) -> Vec<PlayerEvent> {
        self.update(PlayerMessage::Tick)
    }

    fn on_backend_event(
        &mut self,
        event: BackendEvent,
        now: Instant,
        events: &mut Vec<PlayerEvent>,
    ) {
        match event {
            BackendEvent::Ready => {
                if self.session.on_ready() {
                    self.on_became_ready(events);
                }
            }
            BackendEvent::DurationKnown(duration) => {
                if self.session.on_duration(duration) {
                    self.on_became_ready(events);
                }
            }
            BackendEvent::Start => log::info!("[Player] Playback started"),
            BackendEvent::Play => {
                if self.session.on_play() {
                    self.touch(now);
                }
            }
            BackendEvent::Pause => {
                if self.session.on_pause() {
                    self.touch(now);
                }
            }
            BackendEvent::Waiting => self.session.on_waiting(),
            BackendEvent::Progress(report) => {
                if self.session.on_progress(report) {
                    events.push(PlayerEvent::TimeUpdate {
                        played_seconds: self.session.played_seconds(),
                        played_fraction: self.session.played_fraction(),
                    });
                }
            }
            BackendEvent::Ended => {
                self.session.on_ended();
                events.push(PlayerEvent::Ended);
                self.advance(now, events);
            }
            BackendEvent::Error(detail) => {
                log::error!("[Player] Playback error: {detail}");
                if self.session.on_error(detail.clone()) {
                    events.push(PlayerEvent::PlaybackError(detail));
                }
            }
        }
    }

    /// Source is ready: report the duration and honour the play intent.
    fn on_became_ready(&mut self, events: &mut Vec<PlayerEvent>) {
        events.push(PlayerEvent::Ready {
            duration: self.session.duration(),
        });
        if let Err(err) = self.session.apply_play_intent() {
            log_command_error("auto-play", err);
        }
    }

    fn apply_gesture(&mut self, action: GestureAction, now: Instant) {
        match action {
            GestureAction::DoubleTap(TapZone::Left) => {
                self.jump(-self.config.gesture_jump_secs);
            }
            GestureAction::DoubleTap(TapZone::Right) => {
                self.jump(self.config.gesture_jump_secs);
            }
            GestureAction::DoubleTap(TapZone::Center) => self.toggle_play(now),
            GestureAction::LongPressEnd => {
                log::debug!("[Player] Long press released");
                self.apply_rate(playback::NORMAL_RATE);
            }
            // Both arrive through timers, never from a pointer event.
            GestureAction::SingleTap | GestureAction::LongPressStart => {}
        }
    }

    fn apply_selection(
        &mut self,
        outcome: SelectionOutcome,
        now: Instant,
        events: &mut Vec<PlayerEvent>,
    ) {
        match outcome {
            SelectionOutcome::Changed(selection) => {
                self.switch_source(selection, now, events);
            }
            SelectionOutcome::Unchanged | SelectionOutcome::EndOfContent => {
                self.touch(now);
            }
        }
    }

    fn toggle_play(&mut self, now: Instant) {
        if let Err(err) = self.session.toggle_play() {
            log_command_error("toggle play", err);
        }
        self.touch(now);
    }

    fn jump(&mut self, delta: f64) {
        match self.session.jump(delta) {
            Ok(Some(target)) => log::debug!("[Player] Jumped {delta:+}s to {target:.1}s"),
            Ok(None) => {}
            Err(err) => log_command_error("jump", err),
        }
    }

    /// Any explicit interaction shows the controls and restarts the
    /// inactivity window.
    fn touch(&mut self, now: Instant) {
        self.controls.reset_timer(&mut self.timers, now);
    }
}
