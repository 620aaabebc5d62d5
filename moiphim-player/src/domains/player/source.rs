//! Server and episode selection.
//!
//! Owns the movie's server list and the `(server, episode)` cursor. Any
//! successful move reports [`SelectionOutcome::Changed`]; the controller
//! reacts by tearing down the old session and mounting the new episode.

use moiphim_model::{Episode, Server};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub server_index: usize,
    pub episode_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Changed(Selection),
    /// Out-of-range request, nothing moved
    Unchanged,
    /// Advance past the last episode of the current server
    EndOfContent,
}

#[derive(Debug, Clone, Default)]
pub struct SourceSelector {
    servers: Vec<Server>,
    selection: Selection,
}

impl SourceSelector {
    /// Out-of-range starting indices fall back to 0.
    pub fn new(servers: Vec<Server>, initial_server: usize, initial_episode: usize) -> Self {
        let server_index = if initial_server < servers.len() {
            initial_server
        } else {
            if initial_server != 0 {
                log::warn!(
                    "[Player] Initial server {initial_server} out of range ({} servers), using 0",
                    servers.len()
                );
            }
            0
        };

        let episode_count = servers.get(server_index).map_or(0, Server::len);
        let episode_index = if initial_episode < episode_count {
            initial_episode
        } else {
            if initial_episode != 0 {
                log::warn!(
                    "[Player] Initial episode {initial_episode} out of range ({episode_count} episodes), using 0"
                );
            }
            0
        };

        Self {
            servers,
            selection: Selection {
                server_index,
                episode_index,
            },
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn current_server(&self) -> Option<&Server> {
        self.servers.get(self.selection.server_index)
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.current_server()?.episode(self.selection.episode_index)
    }

    /// Episodes of the current server, for the episode panel.
    pub fn episodes(&self) -> &[Episode] {
        self.current_server()
            .map(|server| server.episodes.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_next(&self) -> bool {
        self.selection.episode_index + 1 < self.episodes().len()
    }

    pub fn has_previous(&self) -> bool {
        self.selection.episode_index > 0 && !self.episodes().is_empty()
    }

    pub fn select_episode(&mut self, index: usize) -> SelectionOutcome {
        if index >= self.episodes().len() {
            log::debug!("[Player] Ignoring episode selection {index}");
            return SelectionOutcome::Unchanged;
        }
        self.selection.episode_index = index;
        SelectionOutcome::Changed(self.selection)
    }

    /// Switching servers always restarts at the server's first episode.
    pub fn select_server(&mut self, index: usize) -> SelectionOutcome {
        if index >= self.servers.len() {
            log::debug!("[Player] Ignoring server selection {index}");
            return SelectionOutcome::Unchanged;
        }
        self.selection = Selection {
            server_index: index,
            episode_index: 0,
        };
        SelectionOutcome::Changed(self.selection)
    }

    pub fn next_episode(&mut self) -> SelectionOutcome {
        if !self.has_next() {
            return SelectionOutcome::EndOfContent;
        }
        self.selection.episode_index += 1;
        SelectionOutcome::Changed(self.selection)
    }

    pub fn previous_episode(&mut self) -> SelectionOutcome {
        if !self.has_previous() {
            return SelectionOutcome::Unchanged;
        }
        self.selection.episode_index -= 1;
        SelectionOutcome::Changed(self.selection)
    }
}
