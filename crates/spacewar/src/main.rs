//! Space War
//!
//! Headless arena run: fighters circle a planet, shooting each other and
//! the enemy waves crossing the level, until the configured frame count is
//! reached.
//!
//! Usage: `spacewar [config.toml]`

mod components;
mod config;
mod game;
mod guns;
mod path;
mod waves;

use log::{error, info};
use war_engine::config::Config;
use war_engine::foundation::logging;

use crate::config::GameConfig;
use crate::game::Game;

fn main() {
    logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::load_from_file(&path) {
            Ok(config) => {
                info!("Loaded configuration from {path}");
                config
            }
            Err(e) => {
                error!("Failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let mut game = match Game::new(config) {
        Ok(game) => game,
        Err(e) => {
            error!("Failed to build level: {e}");
            std::process::exit(1);
        }
    };

    game.spawn_scenario();
    let summary = game.run();

    info!(
        "Finished {} frames: {} shots, {} hits, {} contacts, {} of {} fighters alive, {} entities left",
        summary.frames,
        summary.shots_fired,
        summary.hits,
        summary.contacts,
        summary.fighters_alive,
        game.fighters().len(),
        game.world().len()
    );
    info!(
        "Enemies: {} spawned, {} shot down, {} escaped, {} still in play",
        summary.enemies_spawned,
        summary.enemies_destroyed,
        summary.enemies_escaped,
        game.enemies().len()
    );
}
