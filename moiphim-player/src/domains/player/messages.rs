use super::gesture::Point;
use super::overlay::Panel;
use super::session::{MountToken, ProgressReport};

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerMessage {
    // Pointer input on the video surface (chrome is filtered by the shell)
    PointerDown(Point),
    PointerUp(Point),
    PointerCancel,
    MouseMoved,
    KeyPressed(Key),
    Resized { width: f32, height: f32 },

    // Playback control
    PlayPause,
    SkipBackward, // -15s
    SkipForward,  // +15s
    SetPlaybackSpeed(f64),

    // Seeking
    SeekBarPressed,
    SeekBarMoved(f64),
    SeekBarReleased(f64),

    // Episodes and servers
    NextEpisode,
    PreviousEpisode,
    SelectEpisode(usize),
    SelectServer(usize),

    // Overlay panels
    ToggleEpisodePanel,
    ToggleServerPanel,
    ToggleSettingsPanel,
    ClosePanel(Panel),

    // Render path
    UseEmbedFallback,
    Reload,

    // Shell
    NavigateBack,
    ToggleFullscreen,
    FullscreenFailed(String),

    // Backend callbacks, tagged with the mount they belong to
    Backend(MountToken, BackendEvent),

    // Fires due timers without any other input
    Tick,
    Unmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Space,
    Other(String),
}

impl Key {
    pub fn parse(name: &str) -> Self {
        match name {
            " " | "space" | "Space" => Key::Space,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Callbacks a playback backend reports for the source it was created for.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    Ready,
    Start,
    Play,
    Pause,
    Waiting,
    Ended,
    DurationKnown(f64),
    Progress(ProgressReport),
    Error(String),
}

/// Output of the controller for the surrounding page shell.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    SourceChanged {
        server_index: usize,
        episode_index: usize,
    },
    Ready {
        duration: f64,
    },
    TimeUpdate {
        played_seconds: f64,
        played_fraction: f64,
    },
    Ended,
    PlaybackError(String),
    Notice(Notice),
    /// Leave the player for the movie's details page
    NavigateBack {
        slug: String,
        path: String,
    },
    ToggleFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Auto-advance or "next" requested past the final episode
    LastEpisode,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::LastEpisode => write!(f, "This is the last episode"),
        }
    }
}
