//! Membership properties checked over a sweep of positions

use crate::core::config::{CollisionConfig, LevelDimensions};
use crate::ecs::components::{Body, CollideComponent};
use crate::ecs::EntityId;
use crate::foundation::math::Vec2;
use crate::physics::{CollideBehavior, CollisionSystem};
use crate::spatial::{Cell, CellIndex};
use slotmap::SlotMap;

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_system() -> CollisionSystem {
        CollisionSystem::new(LevelDimensions::new(320.0, 320.0), CollisionConfig::new(32.0)).unwrap()
    }

    fn positions() -> Vec<(f32, f32)> {
        let mut out = Vec::new();
        for i in 0..=20 {
            for j in 0..=20 {
                out.push((i as f32 * 16.0, j as f32 * 16.0));
            }
        }
        out
    }

    #[test]
    fn test_receive_only_occupies_overlapping_cells() {
        let mut system = create_test_system();
        let mut bodies: SlotMap<EntityId, Body> = SlotMap::with_key();

        for (x, y) in positions() {
            let id = bodies.insert(Body::new(x, y, 23.0));
            let mut component = CollideComponent::new(id, CollideBehavior::ReceiveOnly);
            component.register(&mut system, &bodies[id]);

            let expected: Vec<CellIndex> = system
                .relevant_cells(&bodies[id])
                .into_iter()
                .map(Cell::index)
                .collect();
            assert_eq!(system.grid().occupancy(id), expected, "at ({x}, {y})");

            component.unregister(&mut system);
        }
        assert_eq!(system.grid().entity_count(), 0);
    }

    #[test]
    fn test_single_cell_mover_tracks_center() {
        let mut system = create_test_system();
        let mut bodies: SlotMap<EntityId, Body> = SlotMap::with_key();
        let id = bodies.insert(Body::new(0.0, 0.0, 6.0));
        let mut component = CollideComponent::new(id, CollideBehavior::Active);
        component.register(&mut system, &bodies[id]);

        let mut previous = (0.0, 0.0);
        for (x, y) in positions() {
            let delta = Vec2::new(x - previous.0, y - previous.1);
            component.move_by(&mut system, &mut bodies, delta);
            previous = (x, y);

            let occupied = system.grid().occupancy(id);
            assert_eq!(occupied.len(), 1, "at ({x}, {y})");
            let owner = system.grid().cell_for_point(bodies[id].x(), bodies[id].y()).unwrap();
            assert_eq!(occupied[0], owner.index());
        }
    }

    #[test]
    fn test_far_edge_maps_to_last_column() {
        let mut system = create_test_system();
        let mut bodies: SlotMap<EntityId, Body> = SlotMap::with_key();
        let id = bodies.insert(Body::new(310.0, 310.0, 10.0));
        let mut component = CollideComponent::new(id, CollideBehavior::ReceiveOnly);
        component.register(&mut system, &bodies[id]);

        assert_eq!(bodies[id].right(), 320.0);
        assert_eq!(system.grid().occupancy(id), vec![CellIndex::new(9, 9)]);
        assert_eq!(system.grid().cell_for_point(320.0, 320.0).unwrap().index(), CellIndex::new(9, 9));
    }

    #[test]
    fn test_register_twice_matches_once() {
        let mut system = create_test_system();
        let mut bodies: SlotMap<EntityId, Body> = SlotMap::with_key();
        let id = bodies.insert(Body::new(64.0, 64.0, 40.0));
        let mut component = CollideComponent::new(id, CollideBehavior::ReceiveOnly);

        component.register(&mut system, &bodies[id]);
        let once: Vec<usize> = system.grid().cells().map(Cell::len).collect();
        component.register(&mut system, &bodies[id]);
        let twice: Vec<usize> = system.grid().cells().map(Cell::len).collect();
        assert_eq!(once, twice);
    }
}
