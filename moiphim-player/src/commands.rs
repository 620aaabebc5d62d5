//! Line commands understood by the demo binary.

use anyhow::{Context, bail};

use moiphim_player::domains::player::{Panel, Point};
use moiphim_player::{Key, PlayerMessage};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Send(Vec<PlayerMessage>),
    Hold { at: Point, millis: u64 },
    Wait(u64),
    View,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  tap X Y            quick tap at (X, Y)
  hold X Y MS        press at (X, Y) for MS milliseconds
  wait MS            let MS milliseconds pass
  play | pause       toggle playback
  seek F             drag the seek bar to fraction F (0..1)
  jump back|fwd      skip 15 seconds
  next | prev        change episode
  episode N          pick episode N (0-based)
  server N           pick server N (0-based)
  rate R             set playback speed
  panel episodes|servers|settings
  close episodes|servers|settings
  key NAME           press a key (space toggles play)
  embed | reload     switch render path
  fullscreen | back
  view | help | quit";

pub fn parse(line: &str) -> anyhow::Result<Command> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Send(Vec::new()));
    };
    let args: Vec<&str> = words.collect();

    let send = |message| Ok(Command::Send(vec![message]));
    match (head, args.as_slice()) {
        ("tap", [x, y]) => {
            let at = point(x, y)?;
            Ok(Command::Send(vec![
                PlayerMessage::PointerDown(at),
                PlayerMessage::PointerUp(at),
            ]))
        }
        ("hold", [x, y, ms]) => Ok(Command::Hold {
            at: point(x, y)?,
            millis: ms.parse().context("hold duration")?,
        }),
        ("wait", [ms]) => Ok(Command::Wait(ms.parse().context("wait duration")?)),
        ("play" | "pause", []) => send(PlayerMessage::PlayPause),
        ("seek", [fraction]) => {
            let fraction: f64 = fraction.parse().context("seek fraction")?;
            Ok(Command::Send(vec![
                PlayerMessage::SeekBarPressed,
                PlayerMessage::SeekBarMoved(fraction),
                PlayerMessage::SeekBarReleased(fraction),
            ]))
        }
        ("jump", ["back"]) => send(PlayerMessage::SkipBackward),
        ("jump", ["fwd"]) => send(PlayerMessage::SkipForward),
        ("next", []) => send(PlayerMessage::NextEpisode),
        ("prev", []) => send(PlayerMessage::PreviousEpisode),
        ("episode", [n]) => send(PlayerMessage::SelectEpisode(n.parse().context("episode index")?)),
        ("server", [n]) => send(PlayerMessage::SelectServer(n.parse().context("server index")?)),
        ("rate", [rate]) => send(PlayerMessage::SetPlaybackSpeed(
            rate.parse().context("playback rate")?,
        )),
        ("panel", [name]) => send(match panel(name)? {
            Panel::Episodes => PlayerMessage::ToggleEpisodePanel,
            Panel::Servers => PlayerMessage::ToggleServerPanel,
            Panel::Settings => PlayerMessage::ToggleSettingsPanel,
        }),
        ("close", [name]) => send(PlayerMessage::ClosePanel(panel(name)?)),
        ("key", [name]) => send(PlayerMessage::KeyPressed(Key::parse(name))),
        ("embed", []) => send(PlayerMessage::UseEmbedFallback),
        ("reload", []) => send(PlayerMessage::Reload),
        ("fullscreen", []) => send(PlayerMessage::ToggleFullscreen),
        ("back", []) => send(PlayerMessage::NavigateBack),
        ("view", []) => Ok(Command::View),
        ("help", []) => Ok(Command::Help),
        ("quit" | "exit", []) => Ok(Command::Quit),
        _ => bail!("unrecognized command: {line:?} (try `help`)"),
    }
}

fn point(x: &str, y: &str) -> anyhow::Result<Point> {
    Ok(Point::new(
        x.parse().context("x coordinate")?,
        y.parse().context("y coordinate")?,
    ))
}

fn panel(name: &str) -> anyhow::Result<Panel> {
    match name {
        "episodes" => Ok(Panel::Episodes),
        "servers" => Ok(Panel::Servers),
        "settings" => Ok(Panel::Settings),
        other => bail!("unknown panel {other:?}"),
    }
}
