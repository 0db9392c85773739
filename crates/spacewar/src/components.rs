//! Game-specific components

use war_engine::ecs::components::{Body, CollisionResponse};
use war_engine::ecs::EntityId;
use war_engine::foundation::math::{utils, Vec2};
use war_engine::physics::Contact;

use crate::guns::Gun;
use crate::path::PathFollower;

/// Gameplay payload carried by every entity in the arena
#[derive(Debug, Clone)]
pub enum Actor {
    /// Armed ship
    Fighter {
        /// Remaining health; the fighter is disabled at zero
        health: f32,
        /// Auto-firing gun
        gun: Gun,
    },

    /// Solid obstacle fighters bounce off
    Planet,

    /// Edge of the level
    Border,

    /// Invader flying along the wave path; fighters bounce off it
    Enemy {
        /// Remaining health; the enemy is disabled at zero
        health: f32,
        /// Progress along the path
        follower: PathFollower,
    },

    /// Projectile fired by `owner`
    Bullet {
        /// Health removed from a fighter on hit
        damage: f32,
        /// Fighter that fired it; bullets pass through their owner
        owner: EntityId,
        /// Cleared on the first hit
        alive: bool,
    },
}

impl Actor {
    /// A fighter with full health
    pub fn fighter(health: f32, gun: Gun) -> Self {
        Self::Fighter { health, gun }
    }

    /// A live bullet
    pub fn bullet(owner: EntityId, damage: f32) -> Self {
        Self::Bullet {
            damage,
            owner,
            alive: true,
        }
    }

    /// A fresh enemy at the start of its path
    pub fn enemy(health: f32, speed: f32) -> Self {
        Self::Enemy {
            health,
            follower: PathFollower::new(speed),
        }
    }

    /// Whether this is a fighter with health left
    pub fn is_live_fighter(&self) -> bool {
        matches!(self, Self::Fighter { health, .. } if *health > 0.0)
    }

    /// Whether guns should aim at this: a live fighter or a live enemy
    pub fn is_target(&self) -> bool {
        match self {
            Self::Fighter { health, .. } | Self::Enemy { health, .. } => *health > 0.0,
            _ => false,
        }
    }

    /// Whether this is a bullet that has already hit something
    pub fn is_spent_bullet(&self) -> bool {
        matches!(self, Self::Bullet { alive: false, .. })
    }
}

/// Back out of an obstacle and reflect velocity off its surface
fn bounce(body: &mut Body, push: Vec2) {
    body.position += push;
    let normal = utils::normalize_or(push, Vec2::zeros());
    let along = body.velocity.dot(&normal);
    if along < 0.0 {
        body.velocity -= normal * (2.0 * along);
    }
}

impl CollisionResponse for Actor {
    fn on_collision(&mut self, body: &mut Body, other: Option<&Self>, contact: &Contact) {
        match (self, other) {
            (Self::Fighter { .. }, Some(Self::Planet | Self::Border | Self::Enemy { .. })) => {
                bounce(body, contact.push)
            }
            (Self::Fighter { .. }, Some(Self::Fighter { .. })) => bounce(body, contact.push * 0.5),
            (Self::Fighter { health, .. }, Some(Self::Bullet { damage, owner, .. })) => {
                if *owner == contact.entity || *health <= 0.0 {
                    return;
                }
                *health = (*health - damage).max(0.0);
                log::debug!("{:?} hit for {damage}, {health} left", contact.entity);
                if *health == 0.0 {
                    log::info!("{:?} destroyed by {owner:?}", contact.entity);
                    body.disable();
                }
            }
            (Self::Enemy { health, .. }, Some(Self::Bullet { damage, .. })) => {
                if *health <= 0.0 {
                    return;
                }
                *health = (*health - damage).max(0.0);
                if *health == 0.0 {
                    log::info!("{:?} shot down", contact.entity);
                    body.disable();
                }
            }
            (Self::Bullet { owner, alive, .. }, Some(other)) => {
                let hit = match other {
                    Self::Fighter { .. } => *owner != contact.other,
                    Self::Planet | Self::Border | Self::Enemy { .. } => true,
                    Self::Bullet { .. } => false,
                };
                if hit && *alive {
                    *alive = false;
                    body.disable();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use war_engine::foundation::collections::EntityMap;

    use crate::config::GameplayConfig;

    fn ids() -> (EntityId, EntityId) {
        let mut map: EntityMap<()> = EntityMap::with_key();
        (map.insert(()), map.insert(()))
    }

    fn gun() -> Gun {
        Gun::pea_shooter(&GameplayConfig::default())
    }

    #[test]
    fn test_fighter_bounces_off_planet() {
        let (ship, planet) = ids();
        let mut fighter = Actor::fighter(60.0, gun());
        let mut body = Body::new(10.0, 0.0, 5.0).with_velocity(Vec2::new(-30.0, 10.0));
        let contact = Contact::new(ship, planet, Vec2::new(2.0, 0.0));

        fighter.on_collision(&mut body, Some(&Actor::Planet), &contact);
        assert_relative_eq!(body.position, Vec2::new(12.0, 0.0));
        assert_relative_eq!(body.velocity, Vec2::new(30.0, 10.0));
    }

    #[test]
    fn test_bullet_damages_and_destroys_fighter() {
        let (ship, shooter) = ids();
        let mut fighter = Actor::fighter(30.0, gun());
        let mut body = Body::new(0.0, 0.0, 5.0);
        let bullet = Actor::bullet(shooter, 20.0);
        let contact = Contact::new(ship, shooter, Vec2::new(1.0, 0.0));

        fighter.on_collision(&mut body, Some(&bullet), &contact);
        assert!(fighter.is_live_fighter());
        assert!(body.enabled);

        fighter.on_collision(&mut body, Some(&bullet), &contact);
        assert!(!fighter.is_live_fighter());
        assert!(!body.enabled);
    }

    #[test]
    fn test_bullet_ignores_its_owner() {
        let (ship, bullet_id) = ids();
        let mut bullet = Actor::bullet(ship, 20.0);
        let mut body = Body::new(0.0, 0.0, 2.0);
        let contact = Contact::new(bullet_id, ship, Vec2::new(1.0, 0.0));

        bullet.on_collision(&mut body, Some(&Actor::fighter(60.0, gun())), &contact);
        assert!(!bullet.is_spent_bullet());
        assert!(body.enabled);

        bullet.on_collision(&mut body, Some(&Actor::Border), &contact);
        assert!(bullet.is_spent_bullet());
        assert!(!body.enabled);
    }

    #[test]
    fn test_bullet_wears_down_enemy() {
        let (enemy_id, shooter) = ids();
        let mut enemy = Actor::enemy(30.0, 50.0);
        let mut body = Body::new(0.0, 0.0, 10.0);
        let bullet = Actor::bullet(shooter, 20.0);
        let contact = Contact::new(enemy_id, shooter, Vec2::new(1.0, 0.0));
        assert!(enemy.is_target());

        enemy.on_collision(&mut body, Some(&bullet), &contact);
        assert!(enemy.is_target());
        assert!(body.enabled);
        // Enemies are never pushed around
        assert_relative_eq!(body.position, Vec2::zeros());

        enemy.on_collision(&mut body, Some(&bullet), &contact);
        assert!(!enemy.is_target());
        assert!(!body.enabled);
    }

    #[test]
    fn test_bullet_is_spent_on_enemy() {
        let (bullet_id, enemy_id) = ids();
        let mut bullet = Actor::bullet(enemy_id, 20.0);
        let mut body = Body::new(0.0, 0.0, 2.0);
        let contact = Contact::new(bullet_id, enemy_id, Vec2::new(1.0, 0.0));

        bullet.on_collision(&mut body, Some(&Actor::enemy(60.0, 50.0)), &contact);
        assert!(bullet.is_spent_bullet());
    }
}
