//! Fighter guns
//!
//! Every gun shares the same cooldown timer and fires a fan of
//! `multiplier` bullets, each rotated `spread` degrees from the last. The
//! [`GunKind`] presets fill in the fan shape and timing.

use nalgebra::Rotation2;
use serde::{Deserialize, Serialize};
use war_engine::foundation::math::Vec2;

use crate::config::GameplayConfig;

/// Sniper seconds between shots
const SNIPER_COOLDOWN: f32 = 2.5;
/// Sniper bullet speed in pixels per second
const SNIPER_BULLET_SPEED: f32 = 120.0;
/// Extra muzzle distance for the sniper's longer barrel
const SNIPER_EXTRA_OFFSET: f32 = 10.0;

/// Gun presets a fighter can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GunKind {
    /// One fast bullet at the nearest target
    PeaShooter,
    /// One slow bullet with a long cooldown
    Sniper,
    /// Three bullets 5 degrees apart
    TriGun,
    /// Two bullets fired forward and backward along the ship's heading
    DeathBlossom,
}

/// Auto-firing gun
#[derive(Debug, Clone, PartialEq)]
pub struct Gun {
    /// Seconds between shots
    pub cooldown: f32,
    /// Seconds until the next shot
    pub timer: f32,
    /// Target search radius
    pub range: f32,
    /// Bullet speed in pixels per second
    pub bullet_speed: f32,
    /// Damage per bullet
    pub damage: f32,
    /// Spawn distance ahead of the ship
    pub fire_offset: f32,
    /// Bullets per shot
    pub multiplier: u32,
    /// Angle of the first bullet from the aim direction, in degrees
    pub start_angle: f32,
    /// Angle between consecutive bullets, in degrees
    pub spread: f32,
    /// Fires along the owner's heading instead of at a target
    pub directional: bool,
}

impl Gun {
    /// Single-shot gun tuned by the gameplay settings
    pub fn pea_shooter(gameplay: &GameplayConfig) -> Self {
        Self {
            cooldown: gameplay.gun_cooldown,
            timer: gameplay.gun_cooldown,
            range: gameplay.gun_range,
            bullet_speed: gameplay.bullet_speed,
            damage: gameplay.bullet_damage,
            fire_offset: gameplay.ship_radius + gameplay.bullet_radius + gameplay.fire_offset,
            multiplier: 1,
            start_angle: 0.0,
            spread: 0.0,
            directional: false,
        }
    }

    /// Slow, infrequent single shot
    pub fn sniper(gameplay: &GameplayConfig) -> Self {
        let base = Self::pea_shooter(gameplay);
        Self {
            cooldown: SNIPER_COOLDOWN,
            timer: SNIPER_COOLDOWN,
            bullet_speed: SNIPER_BULLET_SPEED,
            fire_offset: base.fire_offset + SNIPER_EXTRA_OFFSET,
            ..base
        }
    }

    /// Pea shooter firing a three-bullet fan
    pub fn tri_gun(gameplay: &GameplayConfig) -> Self {
        Self {
            multiplier: 3,
            start_angle: -5.0,
            spread: 5.0,
            ..Self::pea_shooter(gameplay)
        }
    }

    /// Pea shooter firing fore and aft along the ship's heading
    pub fn death_blossom(gameplay: &GameplayConfig) -> Self {
        Self {
            multiplier: 2,
            spread: 180.0,
            directional: true,
            ..Self::pea_shooter(gameplay)
        }
    }

    /// Build the preset for `kind`
    pub fn from_kind(kind: GunKind, gameplay: &GameplayConfig) -> Self {
        match kind {
            GunKind::PeaShooter => Self::pea_shooter(gameplay),
            GunKind::Sniper => Self::sniper(gameplay),
            GunKind::TriGun => Self::tri_gun(gameplay),
            GunKind::DeathBlossom => Self::death_blossom(gameplay),
        }
    }

    /// Count down by `dt`; returns true when a shot is due and resets the timer
    pub fn tick(&mut self, dt: f32) -> bool {
        self.timer -= dt;
        if self.timer > 0.0 {
            return false;
        }
        self.timer += self.cooldown;
        if self.timer < 0.0 {
            self.timer = 0.0;
        }
        true
    }

    /// Spawn position and velocity of each bullet fired from `from` along `direction`
    ///
    /// Empty when `direction` has no length.
    pub fn volley(&self, from: Vec2, direction: Vec2) -> Vec<(Vec2, Vec2)> {
        let Some(direction) = direction.try_normalize(f32::EPSILON) else {
            return Vec::new();
        };
        (0..self.multiplier)
            .map(|i| {
                let angle = (self.start_angle + self.spread * i as f32).to_radians();
                let heading = Rotation2::new(angle) * direction;
                (from + heading * self.fire_offset, heading * self.bullet_speed)
            })
            .collect()
    }

    /// Bullets fired from `from` toward `target`
    pub fn aim(&self, from: Vec2, target: Vec2) -> Vec<(Vec2, Vec2)> {
        self.volley(from, target - from)
    }
}
