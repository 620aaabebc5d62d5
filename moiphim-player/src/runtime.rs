//! Tokio event loop for a mounted [`PlayerController`].
//!
//! One task owns the controller. It waits on either the next inbound message
//! or the earliest pending timer deadline, whichever comes first, so timers
//! fire without the shell having to poll. Unmounting (explicitly, or by
//! dropping the [`PlayerHandle`]) tears the controller down and ends the task.

use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle};
use tokio::time;

use crate::domains::player::controller::PlayerController;
use crate::domains::player::messages::{BackendEvent, PlayerEvent, PlayerMessage};
use crate::domains::player::session::MountToken;
use crate::domains::player::view::PlayerView;

#[derive(Debug)]
enum Envelope {
    Message(PlayerMessage),
    View(oneshot::Sender<PlayerView>),
}

/// Cloneable sender into a player's inbox.
///
/// Backends keep one to report their events; the shell uses one for input.
#[derive(Debug, Clone)]
pub struct PlayerSender {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl PlayerSender {
    /// Returns `false` once the player task has ended.
    pub fn send(&self, message: PlayerMessage) -> bool {
        self.tx.send(Envelope::Message(message)).is_ok()
    }

    pub fn backend(&self, token: MountToken, event: BackendEvent) -> bool {
        self.send(PlayerMessage::Backend(token, event))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Debug)]
pub struct PlayerInbox {
    rx: mpsc::UnboundedReceiver<Envelope>,
}

/// Create the inbox first so backend factories can hold a sender before the
/// controller exists.
pub fn channel() -> (PlayerSender, PlayerInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (PlayerSender { tx }, PlayerInbox { rx })
}

/// Sends `Unmount` when dropped, so a forgotten handle still tears the
/// player down.
#[derive(Debug)]
struct UnmountOnDrop(PlayerSender);

impl Drop for UnmountOnDrop {
    fn drop(&mut self) {
        self.0.send(PlayerMessage::Unmount);
    }
}

#[derive(Debug)]
pub struct PlayerHandle {
    sender: UnmountOnDrop,
    join: JoinHandle<PlayerController>,
}

impl PlayerHandle {
    pub fn sender(&self) -> PlayerSender {
        self.sender.0.clone()
    }

    pub fn send(&self, message: PlayerMessage) -> bool {
        self.sender.0.send(message)
    }

    /// Current view, or `None` if the player task has ended.
    pub async fn view(&self) -> Option<PlayerView> {
        let (reply, response) = oneshot::channel();
        self.sender.0.tx.send(Envelope::View(reply)).ok()?;
        response.await.ok()
    }

    /// Unmount and wait for the task, handing back the torn-down controller.
    pub async fn unmount(self) -> Result<PlayerController, JoinError> {
        let PlayerHandle { sender, join } = self;
        drop(sender);
        join.await
    }
}

/// Start the player task. The controller is mounted first if the caller
/// has not already done so.
pub fn spawn_player(
    controller: PlayerController,
    sender: PlayerSender,
    inbox: PlayerInbox,
) -> (PlayerHandle, mpsc::UnboundedReceiver<PlayerEvent>) {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let join = tokio::spawn(run(controller, inbox, events_tx));
    (
        PlayerHandle {
            sender: UnmountOnDrop(sender),
            join,
        },
        events_rx,
    )
}

async fn run(
    mut controller: PlayerController,
    mut inbox: PlayerInbox,
    events: mpsc::UnboundedSender<PlayerEvent>,
) -> PlayerController {
    let forward = |batch: Vec<PlayerEvent>| {
        for event in batch {
            // Nobody listening is fine; the player keeps running.
            let _ = events.send(event);
        }
    };

    if !controller.is_mounted() {
        forward(controller.mount());
    }

    loop {
        let deadline = controller.next_deadline();
        let next_timer = async move {
            match deadline {
                Some(at) => time::sleep_until(time::Instant::from_std(at)).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            envelope = inbox.rx.recv() => match envelope {
                Some(Envelope::Message(PlayerMessage::Unmount)) | None => break,
                Some(Envelope::Message(message)) => forward(controller.update(message)),
                Some(Envelope::View(reply)) => {
                    // A deadline may be due alongside the request.
                    forward(controller.tick());
                    let _ = reply.send(controller.view());
                }
            },
            () = next_timer => forward(controller.tick()),
        }
    }

    controller.unmount();
    log::debug!("[Player] Driver stopped");
    controller
}
