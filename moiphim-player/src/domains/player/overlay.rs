//! Overlay panel coordination.
//!
//! At most one of the episode and server lists is open at a time; opening
//! one closes the other. The settings panel is independent of both.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Episodes,
    Servers,
    Settings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayPanels {
    episodes: bool,
    servers: bool,
    settings: bool,
}

impl OverlayPanels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, panel: Panel) {
        match panel {
            Panel::Episodes => {
                self.episodes = !self.episodes;
                if self.episodes {
                    self.servers = false;
                }
            }
            Panel::Servers => {
                self.servers = !self.servers;
                if self.servers {
                    self.episodes = false;
                }
            }
            Panel::Settings => self.settings = !self.settings,
        }
    }

    pub fn close(&mut self, panel: Panel) {
        match panel {
            Panel::Episodes => self.episodes = false,
            Panel::Servers => self.servers = false,
            Panel::Settings => self.settings = false,
        }
    }

    pub fn close_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self, panel: Panel) -> bool {
        match panel {
            Panel::Episodes => self.episodes,
            Panel::Servers => self.servers,
            Panel::Settings => self.settings,
        }
    }

    /// Episode or server list open. These keep the controls pinned and
    /// swallow single taps; the settings panel does neither.
    pub fn list_open(&self) -> bool {
        self.episodes || self.servers
    }
}
