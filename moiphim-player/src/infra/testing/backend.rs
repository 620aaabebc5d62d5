//! Recording playback backend
//!
//! Every command is appended to a shared log so tests can assert on the exact
//! sequence the controller issued. Time and duration are set by the test.

use std::sync::Arc;

use parking_lot::Mutex;
use url::Url;

use crate::domains::player::session::{BackendFactory, MountToken, PlaybackBackend};
use crate::error::{PlayerError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Load(String),
    Play,
    Pause,
    SeekTo(f64),
    SeekToFraction(f64),
    SetRate(f64),
    Teardown,
}

/// State shared between a factory and every backend it created.
#[derive(Debug, Default)]
pub struct BackendProbe {
    pub calls: Vec<(MountToken, BackendCall)>,
    pub mounts: Vec<MountToken>,
    pub current_time: f64,
    pub duration: f64,
    pub fail_next_load: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    probe: Arc<Mutex<BackendProbe>>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self) -> Arc<Mutex<BackendProbe>> {
        Arc::clone(&self.probe)
    }

    /// All calls across mounts, oldest first.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.probe
            .lock()
            .calls
            .iter()
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub fn calls_for(&self, token: MountToken) -> Vec<BackendCall> {
        self.probe
            .lock()
            .calls
            .iter()
            .filter(|(t, _)| *t == token)
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub fn clear_calls(&self) {
        self.probe.lock().calls.clear();
    }

    pub fn mounts(&self) -> usize {
        self.probe.lock().mounts.len()
    }

    pub fn last_mount(&self) -> Option<MountToken> {
        self.probe.lock().mounts.last().copied()
    }

    pub fn set_current_time(&self, seconds: f64) {
        self.probe.lock().current_time = seconds;
    }

    pub fn set_duration(&self, seconds: f64) {
        self.probe.lock().duration = seconds;
    }

    pub fn fail_next_load(&self, reason: impl Into<String>) {
        self.probe.lock().fail_next_load = Some(reason.into());
    }
}

impl BackendFactory for RecordingFactory {
    fn create(&mut self, token: MountToken) -> Box<dyn PlaybackBackend> {
        self.probe.lock().mounts.push(token);
        Box::new(RecordingBackend {
            token,
            probe: Arc::clone(&self.probe),
            torn_down: false,
        })
    }
}

#[derive(Debug)]
pub struct RecordingBackend {
    token: MountToken,
    probe: Arc<Mutex<BackendProbe>>,
    torn_down: bool,
}

impl RecordingBackend {
    fn record(&self, call: BackendCall) -> Result<()> {
        if self.torn_down {
            return Err(PlayerError::Backend(format!(
                "{} used after teardown",
                self.token
            )));
        }
        self.probe.lock().calls.push((self.token, call));
        Ok(())
    }
}

impl PlaybackBackend for RecordingBackend {
    fn load(&mut self, url: &Url) -> Result<()> {
        self.record(BackendCall::Load(url.to_string()))?;
        match self.probe.lock().fail_next_load.take() {
            Some(reason) => Err(PlayerError::Backend(reason)),
            None => Ok(()),
        }
    }

    fn play(&mut self) -> Result<()> {
        self.record(BackendCall::Play)
    }

    fn pause(&mut self) -> Result<()> {
        self.record(BackendCall::Pause)
    }

    fn seek_to(&mut self, seconds: f64) -> Result<()> {
        self.record(BackendCall::SeekTo(seconds))
    }

    fn seek_to_fraction(&mut self, fraction: f64) -> Result<()> {
        self.record(BackendCall::SeekToFraction(fraction))
    }

    fn set_rate(&mut self, rate: f64) -> Result<()> {
        self.record(BackendCall::SetRate(rate))
    }

    fn current_time(&self) -> f64 {
        self.probe.lock().current_time
    }

    fn duration(&self) -> f64 {
        self.probe.lock().duration
    }

    fn teardown(&mut self) {
        if !self.torn_down {
            self.probe.lock().calls.push((self.token, BackendCall::Teardown));
            self.torn_down = true;
        }
    }
}
