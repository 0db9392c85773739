//! Game configuration
//!
//! Loaded from a TOML (or RON) file passed on the command line. Every section
//! and field is optional; missing values fall back to the defaults below.

use serde::{Deserialize, Serialize};
use war_engine::config::Config;
use war_engine::core::config::{CollisionConfig, LevelDimensions};

use crate::guns::GunKind;

/// Top-level game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Level layout
    pub level: LevelConfig,

    /// Collision grid tuning
    pub collision: CollisionConfig,

    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Enemy waves
    pub waves: WaveConfig,
}

impl Config for GameConfig {}

/// Tile-map level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Tile rows
    pub rows: u32,

    /// Tile columns
    pub cols: u32,

    /// Tile edge length in pixels
    pub tile_size: f32,
}

impl LevelConfig {
    /// Pixel dimensions of the level
    pub fn dimensions(&self) -> LevelDimensions {
        LevelDimensions::from_tiles(self.rows, self.cols, self.tile_size)
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 30,
            tile_size: 32.0,
        }
    }
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Fighter count in the arena
    pub fighter_count: u32,

    /// Fighter speed in pixels per second
    pub ship_speed: f32,

    /// Fighter collision radius
    pub ship_radius: f32,

    /// Fighter starting health
    pub ship_health: f32,

    /// Bullet speed in pixels per second
    pub bullet_speed: f32,

    /// Bullet collision radius
    pub bullet_radius: f32,

    /// Health removed per bullet hit
    pub bullet_damage: f32,

    /// How far a gun looks for targets
    pub gun_range: f32,

    /// Seconds between shots
    pub gun_cooldown: f32,

    /// Distance ahead of the ship where bullets spawn
    pub fire_offset: f32,

    /// Radius of the central planet
    pub planet_radius: f32,

    /// Frames to simulate in a headless run
    pub frames: u32,

    /// Guns handed out to fighters in spawn order, cycling
    pub loadout: Vec<GunKind>,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            fighter_count: 4,
            ship_speed: 80.0,
            ship_radius: 10.0,
            ship_health: 60.0,
            bullet_speed: 250.0,
            bullet_radius: 3.0,
            bullet_damage: 10.0,
            gun_range: 300.0,
            gun_cooldown: 0.2,
            fire_offset: 16.0,
            planet_radius: 48.0,
            frames: 600,
            loadout: vec![GunKind::PeaShooter, GunKind::TriGun, GunKind::Sniper, GunKind::DeathBlossom],
        }
    }
}

/// Enemy wave configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Enemies per wave; zero turns waves off
    pub enemies_per_wave: u32,

    /// Seconds between enemies within a wave
    pub spawn_interval: f32,

    /// Seconds between the end of one wave and the start of the next
    pub wave_interval: f32,

    /// Enemy speed in pixels per second
    pub enemy_speed: f32,

    /// Enemy collision radius
    pub enemy_radius: f32,

    /// Enemy starting health
    pub enemy_health: f32,

    /// Waypoints enemies fly through, as `[x, y]` pairs
    pub path: Vec<[f32; 2]>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            enemies_per_wave: 10,
            spawn_interval: 1.0,
            wave_interval: 10.0,
            enemy_speed: 50.0,
            enemy_radius: 10.0,
            enemy_health: 60.0,
            path: vec![[0.0, 100.0], [200.0, 100.0], [200.0, 300.0], [600.0, 100.0]],
        }
    }
}
