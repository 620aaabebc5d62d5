//! Clock-driven stand-in for a native video backend.
//!
//! Reports a fixed duration shortly after `load`, then emits progress once
//! a second while playing and `Ended` when the position reaches the end.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use url::Url;

use moiphim_player::runtime::PlayerSender;
use moiphim_player::{
    BackendEvent, BackendFactory, MountToken, PlaybackBackend, PlayerError,
    ProgressReport,
};

const LOAD_LATENCY: Duration = Duration::from_millis(150);
const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct SimulatedFactory {
    sender: PlayerSender,
    duration: f64,
}

impl SimulatedFactory {
    pub fn new(sender: PlayerSender, duration: f64) -> Self {
        Self { sender, duration }
    }
}

impl BackendFactory for SimulatedFactory {
    fn create(&mut self, token: MountToken) -> Box<dyn PlaybackBackend> {
        Box::new(SimulatedBackend {
            token,
            sender: self.sender.clone(),
            clock: Arc::new(Mutex::new(Playhead {
                position: 0.0,
                rate: 1.0,
                since: None,
                duration: self.duration,
            })),
            tasks: Vec::new(),
            started: false,
        })
    }
}

#[derive(Debug)]
struct Playhead {
    position: f64,
    rate: f64,
    /// Set while playing
    since: Option<Instant>,
    duration: f64,
}

impl Playhead {
    fn now(&self) -> f64 {
        let running = self
            .since
            .map_or(0.0, |since| since.elapsed().as_secs_f64() * self.rate);
        (self.position + running).min(self.duration)
    }

    fn settle(&mut self) {
        self.position = self.now();
        if self.since.is_some() {
            self.since = Some(Instant::now());
        }
    }
}

#[derive(Debug)]
struct SimulatedBackend {
    token: MountToken,
    sender: PlayerSender,
    clock: Arc<Mutex<Playhead>>,
    tasks: Vec<JoinHandle<()>>,
    started: bool,
}

impl SimulatedBackend {
    fn emit(&self, event: BackendEvent) {
        self.sender.backend(self.token, event);
    }

    fn stop_ticker(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl PlaybackBackend for SimulatedBackend {
    fn load(&mut self, url: &Url) -> Result<(), PlayerError> {
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(PlayerError::Backend(format!(
                "unsupported scheme {}",
                url.scheme()
            )));
        }
        let sender = self.sender.clone();
        let token = self.token;
        let duration = self.clock.lock().duration;
        self.tasks.push(tokio::spawn(async move {
            tokio::time::sleep(LOAD_LATENCY).await;
            sender.backend(token, BackendEvent::DurationKnown(duration));
            sender.backend(token, BackendEvent::Ready);
        }));
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        {
            let mut clock = self.clock.lock();
            if clock.since.is_some() {
                return Ok(());
            }
            clock.since = Some(Instant::now());
        }
        if !self.started {
            self.started = true;
            self.emit(BackendEvent::Start);
        }
        self.emit(BackendEvent::Play);

        let sender = self.sender.clone();
        let token = self.token;
        let clock = Arc::clone(&self.clock);
        self.tasks.push(tokio::spawn(async move {
            let mut interval = tokio::time::interval(PROGRESS_INTERVAL);
            loop {
                interval.tick().await;
                let (position, duration) = {
                    let clock = clock.lock();
                    (clock.now(), clock.duration)
                };
                sender.backend(
                    token,
                    BackendEvent::Progress(ProgressReport {
                        played_seconds: position,
                        loaded_fraction: 1.0,
                    }),
                );
                if position >= duration {
                    sender.backend(token, BackendEvent::Ended);
                    break;
                }
            }
        }));
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        {
            let mut clock = self.clock.lock();
            clock.settle();
            clock.since = None;
        }
        self.stop_ticker();
        self.emit(BackendEvent::Pause);
        Ok(())
    }

    fn seek_to(&mut self, seconds: f64) -> Result<(), PlayerError> {
        let mut clock = self.clock.lock();
        clock.settle();
        clock.position = seconds.clamp(0.0, clock.duration);
        Ok(())
    }

    fn seek_to_fraction(&mut self, fraction: f64) -> Result<(), PlayerError> {
        let duration = self.clock.lock().duration;
        self.seek_to(fraction * duration)
    }

    fn set_rate(&mut self, rate: f64) -> Result<(), PlayerError> {
        let mut clock = self.clock.lock();
        clock.settle();
        clock.rate = rate;
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.clock.lock().now()
    }

    fn duration(&self) -> f64 {
        self.clock.lock().duration
    }

    fn teardown(&mut self) {
        self.stop_ticker();
        self.clock.lock().since = None;
    }
}
