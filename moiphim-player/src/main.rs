mod commands;
mod simulated;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use env_logger::{Builder, Target};
use log::LevelFilter;
use tokio::io::{AsyncBufReadExt, BufReader};

use moiphim_model::prelude::{DetailsPayload, Movie};
use moiphim_player::infra::config::Config;
use moiphim_player::infra::testing::fixtures;
use moiphim_player::runtime::{self, PlayerHandle};
use moiphim_player::{MountOptions, PlayerController, PlayerMessage};

use commands::Command;
use simulated::SimulatedFactory;

/// Length of every simulated episode, in seconds
const SIMULATED_DURATION: f64 = 24.0 * 60.0;

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("moiphim_player", LevelFilter::Debug)
        .init();
}

/// Accepts either API envelope or a bare movie object.
fn load_movie(path: &Path) -> anyhow::Result<Movie> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    if let Ok(payload) = serde_json::from_str::<DetailsPayload>(&content) {
        return payload.normalize().context("normalizing movie payload");
    }
    serde_json::from_str::<Movie>(&content)
        .with_context(|| format!("parsing {} as a movie", path.display()))
}

fn parse_index(arg: Option<&String>, name: &str) -> anyhow::Result<usize> {
    match arg {
        Some(raw) => raw.parse().with_context(|| format!("invalid {name}")),
        None => Ok(0),
    }
}

async fn print_view(handle: &PlayerHandle) {
    match handle.view().await {
        Some(view) => println!("{view:#?}"),
        None => println!("player stopped"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    // moiphim-player [--config FILE] [movie.json] [server] [episode]
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = match args.iter().position(|arg| arg == "--config") {
        Some(at) => {
            let path = args
                .get(at + 1)
                .map(PathBuf::from)
                .context("--config needs a file path")?;
            args.drain(at..=at + 1);
            Some(path)
        }
        None => None,
    };
    let mut config = match &config_path {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load(),
    };
    let movie = match args.first() {
        Some(path) => load_movie(Path::new(path))?,
        None => fixtures::series_movie(),
    };
    let options = MountOptions::at(
        parse_index(args.get(1), "server index")?,
        parse_index(args.get(2), "episode index")?,
    );

    let (sender, inbox) = runtime::channel();
    let factory = SimulatedFactory::new(sender.clone(), SIMULATED_DURATION);
    let controller = PlayerController::from_config(movie, options, factory, &config);
    let (handle, mut events) = runtime::spawn_player(controller, sender, inbox);

    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            println!("event: {event:?}");
        }
    });

    println!("{}", commands::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match commands::parse(&line) {
            Ok(Command::Send(messages)) => {
                for message in messages {
                    handle.send(message);
                }
            }
            Ok(Command::Hold { at, millis }) => {
                handle.send(PlayerMessage::PointerDown(at));
                tokio::time::sleep(Duration::from_millis(millis)).await;
                handle.send(PlayerMessage::PointerUp(at));
            }
            Ok(Command::Wait(millis)) => {
                tokio::time::sleep(Duration::from_millis(millis)).await;
            }
            Ok(Command::View) => print_view(&handle).await,
            Ok(Command::Help) => println!("{}", commands::HELP),
            Ok(Command::Quit) => break,
            Err(err) => eprintln!("{err:#}"),
        }
    }

    let controller = handle.unmount().await?;
    log::info!("[Player] Exited from {:?}", controller.selection());

    let rate = controller.session().playback_rate();
    if config.playback_rate != Some(rate) {
        config.playback_rate = Some(rate);
        let saved = match &config_path {
            Some(path) => config.save_to(path),
            None => config.save(),
        };
        if let Err(err) = saved {
            log::warn!("[Config] Could not remember playback rate: {err}");
        }
    }
    Ok(())
}
