//! Enemy waves
//!
//! A wave releases its enemies one at a time, `spawn_interval` seconds
//! apart. Once the last one is out the spawner waits `wave_interval`
//! seconds and starts the next wave.

use log::info;

use crate::config::WaveConfig;

/// Timer counting down from a fixed duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    duration: f32,
    remaining: f32,
}

impl Countdown {
    /// Started countdown of `duration` seconds
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: duration,
        }
    }

    /// Advance by `dt`; returns true once the time is up
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.is_done()
    }

    /// Whether the time is up
    pub fn is_done(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Start over from the full duration
    pub fn restart(&mut self) {
        self.remaining = self.duration;
    }
}

/// Decides when the next enemy enters
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSpawner {
    per_wave: u32,
    left_to_spawn: u32,
    spawn: Countdown,
    next_wave: Countdown,
    wave: u32,
}

impl WaveSpawner {
    /// Spawner whose first wave starts right away
    pub fn new(config: &WaveConfig) -> Self {
        Self {
            per_wave: config.enemies_per_wave,
            left_to_spawn: config.enemies_per_wave,
            spawn: Countdown::new(config.spawn_interval),
            next_wave: Countdown::new(config.wave_interval),
            wave: 1,
        }
    }

    /// Current wave number, starting at 1
    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Enemies still to come in this wave
    pub fn left_to_spawn(&self) -> u32 {
        self.left_to_spawn
    }

    /// Advance by `dt`; returns true when an enemy should enter now
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.left_to_spawn > 0 {
            if self.spawn.update(dt) {
                self.spawn.restart();
                self.left_to_spawn -= 1;
                return true;
            }
        } else if self.per_wave > 0 && self.next_wave.update(dt) {
            self.next_wave.restart();
            self.left_to_spawn = self.per_wave;
            self.wave += 1;
            info!("Wave {} incoming: {} enemies", self.wave, self.per_wave);
        }
        false
    }
}
