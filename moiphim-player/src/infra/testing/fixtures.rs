//! Sample catalog data shared by tests and the demo binary.

use moiphim_model::{Episode, Movie, Server};

fn episode(n: usize) -> Episode {
    Episode::new(n.to_string(), format!("tap-{n}"))
        .with_m3u8(format!("https://cdn.example/series/{n}/index.m3u8"))
        .with_embed(format!("https://player.example/e/series-{n}"))
}

/// Three-episode series on two servers. The second server carries one
/// embed-only episode.
pub fn series_movie() -> Movie {
    Movie::new(
        "Phim Bo",
        "phim-bo",
        vec![
            Server::new("Vietsub #1", (1..=3).map(episode).collect()),
            Server::new(
                "Thuyet minh",
                vec![
                    Episode::new("1", "tap-1")
                        .with_embed("https://player.example/e/tm-1"),
                ],
            ),
        ],
    )
}

/// Single "Full" episode, as upstream labels feature films.
pub fn feature_movie() -> Movie {
    Movie::new(
        "Phim Le",
        "phim-le",
        vec![Server::new(
            "Vietsub #1",
            vec![
                Episode::new("Full", "full")
                    .with_m3u8("https://cdn.example/feature/index.m3u8"),
            ],
        )],
    )
}
