//! Headless arena simulation
//!
//! Fighters fly around a planet inside a bordered level while waves of
//! enemies fly an invasion path across it. Every gun shoots at the nearest
//! live fighter or enemy in range. All movement and hit detection goes
//! through the engine's collision world.

use log::{debug, info, trace, warn};
use war_engine::ecs::components::Body;
use war_engine::ecs::{EntityId, World};
use war_engine::foundation::math::{utils, Vec2};
use war_engine::physics::{CollideBehavior, Contact};
use war_engine::CollisionResult;

use crate::components::Actor;
use crate::config::GameConfig;
use crate::guns::{Gun, GunKind};
use crate::path::InvadePath;
use crate::waves::WaveSpawner;

/// Fixed simulation step
pub const FRAME_TIME: f32 = 1.0 / 60.0;

/// Border circle radius as a multiple of the longer level side
const BORDER_SCALE: f32 = 64.0;

/// Totals reported at the end of a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Frames simulated
    pub frames: u32,
    /// Bullets spawned
    pub shots_fired: u32,
    /// Bullet hits on fighters and enemies
    pub hits: u32,
    /// Fighters still flying
    pub fighters_alive: u32,
    /// Contacts dispatched across all frames
    pub contacts: u64,
    /// Enemies that entered the level
    pub enemies_spawned: u32,
    /// Enemies shot down
    pub enemies_destroyed: u32,
    /// Enemies that reached the end of the path
    pub enemies_escaped: u32,
}

/// The arena
pub struct Game {
    config: GameConfig,
    world: World<Actor>,
    path: InvadePath,
    waves: Option<WaveSpawner>,
    fighters: Vec<EntityId>,
    enemies: Vec<EntityId>,
    summary: Summary,
}

impl Game {
    /// Build an empty arena sized to the configured level
    pub fn new(config: GameConfig) -> CollisionResult<Self> {
        let world = World::new(config.level.dimensions(), config.collision)?;
        let path = InvadePath::from_pairs(&config.waves.path);
        Ok(Self {
            config,
            world,
            path,
            waves: None,
            fighters: Vec::new(),
            enemies: Vec::new(),
            summary: Summary::default(),
        })
    }

    /// The collision world
    pub fn world(&self) -> &World<Actor> {
        &self.world
    }

    /// Fighters spawned so far, alive or not
    pub fn fighters(&self) -> &[EntityId] {
        &self.fighters
    }

    /// Enemies currently in the level
    pub fn enemies(&self) -> &[EntityId] {
        &self.enemies
    }

    /// Spawn borders, a central planet and the configured fighters, then start the waves
    pub fn spawn_scenario(&mut self) {
        let level = self.world.system().level();
        let center = Vec2::new(level.width / 2.0, level.height / 2.0);

        self.spawn_borders();
        self.spawn_planet(center, self.config.gameplay.planet_radius);

        // Fighters start evenly spaced on a ring around the planet, flying tangentially
        let count = self.config.gameplay.fighter_count.max(1);
        let ring = utils::lerp(self.config.gameplay.planet_radius, level.width.min(level.height) / 2.0, 0.6);
        for i in 0..count {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            let offset = Vec2::new(angle.cos(), angle.sin());
            let heading = Vec2::new(-offset.y, offset.x);
            self.spawn_fighter(center + offset * ring, heading * self.config.gameplay.ship_speed);
        }
        info!("Scenario spawned with {count} fighters");
        self.start_waves();
    }

    /// Start releasing enemy waves along the configured path
    pub fn start_waves(&mut self) {
        if self.path.is_empty() {
            warn!("Invasion path is empty; no waves will spawn");
            return;
        }
        let waves = &self.config.waves;
        info!(
            "Wave 1 incoming: {} enemies along a {}-point path",
            waves.enemies_per_wave,
            self.path.len()
        );
        self.waves = Some(WaveSpawner::new(waves));
    }

    /// Add a fighter armed with the next gun in the loadout
    pub fn spawn_fighter(&mut self, position: Vec2, velocity: Vec2) -> EntityId {
        let gameplay = &self.config.gameplay;
        let kind = gameplay
            .loadout
            .iter()
            .cycle()
            .nth(self.fighters.len())
            .copied()
            .unwrap_or(GunKind::PeaShooter);
        let gun = Gun::from_kind(kind, gameplay);
        let body = Body::new(position.x, position.y, gameplay.ship_radius).with_velocity(velocity);
        let id = self
            .world
            .spawn(body, CollideBehavior::Active, Actor::fighter(gameplay.ship_health, gun));
        self.fighters.push(id);
        debug!("{id:?} spawned with {kind:?}");
        id
    }

    /// Add an enemy at the start of the invasion path
    pub fn spawn_enemy(&mut self) -> Option<EntityId> {
        let start = self.path.start()?;
        let waves = &self.config.waves;
        let id = self.world.spawn(
            Body::new(start.x, start.y, waves.enemy_radius),
            CollideBehavior::ReceiveOnly,
            Actor::enemy(waves.enemy_health, waves.enemy_speed),
        );
        self.enemies.push(id);
        self.summary.enemies_spawned += 1;
        trace!("{id:?} entered at ({}, {})", start.x, start.y);
        Some(id)
    }

    /// Add a static planet
    pub fn spawn_planet(&mut self, position: Vec2, radius: f32) -> EntityId {
        self.world.spawn(
            Body::new(position.x, position.y, radius),
            CollideBehavior::ReceiveOnly,
            Actor::Planet,
        )
    }

    /// Add four static borders hugging the level edges
    ///
    /// Each border is a circle far larger than the level. Its rim passes
    /// through both corners of its edge and bows into the level by a couple
    /// of pixels at most, so it only occupies the outermost row or column.
    pub fn spawn_borders(&mut self) {
        let level = self.world.system().level();
        let radius = BORDER_SCALE * level.width.max(level.height);
        // Center distance from an edge of half-length `half` so the rim meets its corners
        let inset = |half: f32| (radius * radius - half * half).sqrt();
        let (mid_x, mid_y) = (level.width / 2.0, level.height / 2.0);
        let centers = [
            Vec2::new(-inset(mid_y), mid_y),
            Vec2::new(level.width + inset(mid_y), mid_y),
            Vec2::new(mid_x, -inset(mid_x)),
            Vec2::new(mid_x, level.height + inset(mid_x)),
        ];
        for center in centers {
            self.world
                .spawn(Body::new(center.x, center.y, radius), CollideBehavior::ReceiveOnly, Actor::Border);
        }
    }

    /// Point every live enemy at its next waypoint; enemies out of path are disabled
    fn steer_enemies(&mut self, dt: f32) {
        for &id in &self.enemies {
            let Some(position) = self.world.get(id).filter(|body| body.enabled).map(|body| body.position) else {
                continue;
            };
            let Some(Actor::Enemy { follower, .. }) = self.world.data_mut(id) else {
                continue;
            };
            let velocity = follower.steer(&self.path, position, dt);
            let Some(body) = self.world.get_mut(id) else {
                continue;
            };
            match velocity {
                Some(velocity) => body.velocity = velocity,
                None => {
                    body.velocity = Vec2::zeros();
                    body.disable();
                    debug!("{id:?} reached the end of the path");
                }
            }
        }
    }

    /// Fire every ready gun
    ///
    /// Directional guns fire along the fighter's heading. The rest fire at
    /// the nearest live fighter or enemy in range other than the shooter.
    fn fire_guns(&mut self, dt: f32) {
        let mut shots = Vec::new();
        for &id in &self.fighters {
            let Some(body) = self.world.get(id).filter(|body| body.enabled).copied() else {
                continue;
            };
            let Some(Actor::Fighter { gun, .. }) = self.world.data_mut(id) else {
                continue;
            };
            if !gun.tick(dt) {
                continue;
            }
            let gun = gun.clone();

            let volley = if gun.directional {
                gun.volley(body.position, body.velocity)
            } else {
                let target = self
                    .world
                    .entities_within_radius(body.x(), body.y(), gun.range)
                    .into_iter()
                    .filter(|&other| other != id)
                    .find(|&other| self.world.data(other).is_some_and(Actor::is_target));
                let Some(target) = target.and_then(|target| self.world.get(target)) else {
                    continue;
                };
                gun.aim(body.position, target.position)
            };
            shots.extend(
                volley
                    .into_iter()
                    .map(|(position, velocity)| (id, position, velocity, gun.damage)),
            );
        }

        let radius = self.config.gameplay.bullet_radius;
        for (owner, position, velocity, damage) in shots {
            let bullet = Body::new(position.x, position.y, radius).with_velocity(velocity);
            let id = self.world.spawn(bullet, CollideBehavior::Active, Actor::bullet(owner, damage));
            debug!("{owner:?} fired {id:?}");
            self.summary.shots_fired += 1;
        }
    }

    /// Count bullet hits among this frame's contacts
    fn tally(&mut self, contacts: &[Contact]) {
        for contact in contacts {
            let pair = (self.world.data(contact.entity), self.world.data(contact.other));
            let hit = match pair {
                (Some(Actor::Bullet { owner, .. }), Some(Actor::Fighter { .. })) => *owner != contact.other,
                (Some(Actor::Fighter { .. }), Some(Actor::Bullet { owner, .. })) => *owner != contact.entity,
                (Some(Actor::Bullet { .. }), Some(Actor::Enemy { .. }))
                | (Some(Actor::Enemy { .. }), Some(Actor::Bullet { .. })) => true,
                _ => false,
            };
            if hit {
                self.summary.hits += 1;
            }
        }
        self.summary.contacts += contacts.len() as u64;
    }

    /// Remove bullets that hit something or left the level, and enemies
    /// that were shot down or reached the end of the path
    fn sweep(&mut self) {
        let level = self.world.system().level();
        let mut expired = Vec::new();
        for (id, body) in self.world.iter() {
            let Some(actor) = self.world.data(id) else {
                continue;
            };
            match actor {
                Actor::Bullet { .. } => {
                    let outside = body.x() < 0.0
                        || body.y() < 0.0
                        || body.x() > level.width
                        || body.y() > level.height;
                    if actor.is_spent_bullet() || outside {
                        expired.push(id);
                    }
                }
                Actor::Enemy { health, follower } => {
                    if follower.reached() {
                        self.summary.enemies_escaped += 1;
                        expired.push(id);
                    } else if *health <= 0.0 {
                        self.summary.enemies_destroyed += 1;
                        expired.push(id);
                    }
                }
                _ => {}
            }
        }

        for id in expired {
            self.world.despawn(id);
        }
        self.enemies.retain(|&id| self.world.contains(id));
    }

    /// Advance one frame
    pub fn step(&mut self, dt: f32) {
        if let Some(waves) = self.waves.as_mut() {
            if waves.tick(dt) {
                let (wave, left) = (waves.wave(), waves.left_to_spawn());
                if let Some(id) = self.spawn_enemy() {
                    debug!("{id:?} joins wave {wave}, {left} more to come");
                }
            }
        }
        self.steer_enemies(dt);
        self.fire_guns(dt);
        let contacts = self.world.update(dt);
        self.tally(&contacts);
        self.sweep();
        self.summary.frames += 1;
    }

    /// Live fighters
    pub fn fighters_alive(&self) -> u32 {
        self.fighters
            .iter()
            .filter(|&&id| self.world.data(id).is_some_and(Actor::is_live_fighter))
            .count() as u32
    }

    /// Run the configured number of frames and report totals
    pub fn run(&mut self) -> Summary {
        for frame in 0..self.config.gameplay.frames {
            self.step(FRAME_TIME);
            if frame % 60 == 59 {
                debug!(
                    "t={:.1}s, {} fighters alive, {} enemies in play",
                    (frame + 1) as f32 * FRAME_TIME,
                    self.fighters_alive(),
                    self.enemies.len()
                );
            }
        }
        self.summary()
    }

    /// Totals so far
    pub fn summary(&self) -> Summary {
        Summary {
            fighters_alive: self.fighters_alive(),
            ..self.summary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use war_engine::spatial::{Cell, CellIndex};

    use crate::config::LevelConfig;

    fn small_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.level = LevelConfig {
            rows: 10,
            cols: 10,
            tile_size: 32.0,
        };
        config.collision.cell_size = 32.0;
        config
    }

    #[test]
    fn test_borders_sit_on_outer_cells() {
        let mut game = Game::new(small_config()).unwrap();
        game.spawn_borders();
        game.world.update(0.0);

        let grid = game.world.system().grid();
        for i in 0..10 {
            assert_eq!(grid.cell_at(i, 0).unwrap().len(), if i == 0 || i == 9 { 2 } else { 1 });
            assert_eq!(grid.cell_at(i, 5).unwrap().len(), if i == 0 || i == 9 { 1 } else { 0 });
        }
    }

    #[test]
    fn test_border_keeps_fighter_inside() {
        let mut game = Game::new(small_config()).unwrap();
        game.spawn_borders();
        let fighter = game.spawn_fighter(Vec2::new(160.0, 160.0), Vec2::new(-200.0, 0.0));

        for _ in 0..120 {
            game.step(FRAME_TIME);
        }
        let body = game.world.get(fighter).unwrap();
        assert!(body.left() >= -1.0, "fighter escaped to x={}", body.x());
        assert!(body.velocity.x > 0.0);
    }

    #[test]
    fn test_border_keeps_fighter_out_of_corners() {
        let mut config = small_config();
        config.gameplay.loadout = vec![GunKind::PeaShooter];
        let mut game = Game::new(config).unwrap();
        game.spawn_borders();
        let low = game.spawn_fighter(Vec2::new(48.0, 48.0), Vec2::new(-200.0, -200.0));
        let high = game.spawn_fighter(Vec2::new(272.0, 272.0), Vec2::new(200.0, 200.0));

        for frame in 0..120 {
            game.step(FRAME_TIME);
            let body = game.world.get(low).unwrap();
            assert!(body.left() >= -1.0 && body.top() >= -1.0, "frame {frame}: escaped to {:?}", body.position);
            let body = game.world.get(high).unwrap();
            assert!(body.right() <= 321.0 && body.bottom() <= 321.0, "frame {frame}: escaped to {:?}", body.position);
        }
    }

    #[test]
    fn test_fighter_shoots_nearest_target() {
        let mut config = small_config();
        config.gameplay.gun_cooldown = 0.1;
        config.gameplay.bullet_damage = 100.0;
        config.gameplay.loadout = vec![GunKind::PeaShooter];
        let mut game = Game::new(config).unwrap();
        let shooter = game.spawn_fighter(Vec2::new(60.0, 160.0), Vec2::zeros());
        let target = game.spawn_fighter(Vec2::new(200.0, 160.0), Vec2::zeros());

        for _ in 0..60 {
            game.step(FRAME_TIME);
        }

        let summary = game.summary();
        assert!(summary.shots_fired >= 1);
        assert!(summary.hits >= 1);
        assert_eq!(summary.fighters_alive, 0);
        assert!(!game.world.get(target).unwrap().enabled);
        assert!(!game.world.get(shooter).unwrap().enabled);
    }

    #[test]
    fn test_spent_bullets_are_removed() {
        let mut game = Game::new(small_config()).unwrap();
        game.spawn_planet(Vec2::new(200.0, 160.0), 20.0);
        let owner = game.spawn_fighter(Vec2::new(40.0, 40.0), Vec2::zeros());
        game.world.spawn(
            Body::new(100.0, 160.0, 3.0).with_velocity(Vec2::new(300.0, 0.0)),
            CollideBehavior::Active,
            Actor::bullet(owner, 10.0),
        );

        for _ in 0..30 {
            game.step(FRAME_TIME);
        }
        let bullets = game
            .world
            .iter()
            .filter(|&(id, _)| matches!(game.world.data(id), Some(Actor::Bullet { .. })))
            .count();
        assert_eq!(bullets, 0);
    }

    #[test]
    fn test_scenario_runs() {
        let mut config = small_config();
        config.gameplay.frames = 120;
        config.gameplay.planet_radius = 24.0;
        let mut game = Game::new(config).unwrap();
        game.spawn_scenario();
        assert_eq!(game.fighters().len(), 4);

        let summary = game.run();
        assert_eq!(summary.frames, 120);
        assert!(summary.fighters_alive <= 4);
    }

    fn wave_config() -> GameConfig {
        let mut config = small_config();
        config.waves.enemies_per_wave = 3;
        config.waves.spawn_interval = 0.25;
        config.waves.wave_interval = 100.0;
        config.waves.enemy_speed = 120.0;
        config.waves.path = vec![[16.0, 48.0], [200.0, 48.0], [200.0, 250.0], [40.0, 250.0]];
        config
    }

    #[test]
    fn test_enemy_occupancy_follows_path() {
        let mut game = Game::new(wave_config()).unwrap();
        game.start_waves();

        let mut layouts = HashSet::new();
        for frame in 0..400 {
            game.step(FRAME_TIME);
            let grid = game.world.system().grid();
            for &id in game.enemies() {
                let body = game.world.get(id).unwrap();
                assert!(body.enabled);
                let expected: Vec<CellIndex> = grid.cells_overlapping(&body.bounds()).into_iter().map(Cell::index).collect();
                let occupied = grid.occupancy(id);
                assert_eq!(occupied, expected, "frame {frame}: {id:?} at {:?}", body.position);
                layouts.insert(occupied);
            }
        }

        assert!(layouts.len() > 10, "enemies barely moved");
        let summary = game.summary();
        assert_eq!(summary.enemies_spawned, 3);
        assert_eq!(summary.enemies_escaped, 3);
        assert!(game.enemies().is_empty());
        assert!(game.world.is_empty());
    }

    #[test]
    fn test_fighter_shoots_down_enemy() {
        let mut config = wave_config();
        config.waves.enemies_per_wave = 1;
        config.waves.enemy_speed = 10.0;
        config.waves.path = vec![[16.0, 48.0], [300.0, 48.0]];
        config.gameplay.bullet_damage = 100.0;
        config.gameplay.loadout = vec![GunKind::PeaShooter];
        let mut game = Game::new(config).unwrap();
        let fighter = game.spawn_fighter(Vec2::new(100.0, 160.0), Vec2::zeros());
        game.start_waves();

        for _ in 0..240 {
            game.step(FRAME_TIME);
        }

        let summary = game.summary();
        assert_eq!(summary.enemies_spawned, 1);
        assert_eq!(summary.enemies_destroyed, 1);
        assert_eq!(summary.enemies_escaped, 0);
        assert!(summary.hits >= 1);
        assert!(game.enemies().is_empty());
        assert!(game.world.get(fighter).unwrap().enabled);
    }

    #[test]
    fn test_loadout_cycles_through_fighters() {
        let mut config = small_config();
        config.gameplay.loadout = vec![GunKind::Sniper, GunKind::TriGun];
        let mut game = Game::new(config).unwrap();
        for i in 0..3 {
            game.spawn_fighter(Vec2::new(40.0 + 80.0 * i as f32, 40.0), Vec2::zeros());
        }
        let kinds: Vec<(f32, u32)> = game
            .fighters()
            .iter()
            .map(|&id| match game.world.data(id) {
                Some(Actor::Fighter { gun, .. }) => (gun.bullet_speed, gun.multiplier),
                _ => panic!("not a fighter"),
            })
            .collect();

        let gameplay = &game.config.gameplay;
        let sniper = Gun::sniper(gameplay);
        let tri = Gun::tri_gun(gameplay);
        assert_eq!(
            kinds,
            vec![
                (sniper.bullet_speed, 1),
                (tri.bullet_speed, 3),
                (sniper.bullet_speed, 1)
            ]
        );
    }

    #[test]
    fn test_death_blossom_fires_without_target() {
        let mut config = small_config();
        config.gameplay.loadout = vec![GunKind::DeathBlossom];
        config.gameplay.gun_cooldown = 0.1;
        let mut game = Game::new(config).unwrap();
        game.spawn_fighter(Vec2::new(160.0, 160.0), Vec2::new(0.0, 20.0));

        for _ in 0..7 {
            game.step(FRAME_TIME);
        }
        assert_eq!(game.summary().shots_fired, 2);
    }
}
