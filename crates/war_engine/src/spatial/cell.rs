//! A single bucket of the collision grid

use crate::ecs::components::BodyLookup;
use crate::ecs::EntityId;
use crate::physics::collision::Circle;
use crate::physics::Contact;

/// Row/column address of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex {
    /// Row, counted from the top of the level
    pub row: usize,
    /// Column, counted from the left of the level
    pub col: usize,
}

impl CellIndex {
    /// Create a cell index
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The set of entities currently registered in one grid cell
///
/// Membership is unique. A cell knows nothing about its neighbors.
#[derive(Debug, Clone)]
pub struct Cell {
    index: CellIndex,
    entities: Vec<EntityId>,
}

impl Cell {
    /// Create an empty cell
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            index: CellIndex::new(row, col),
            entities: Vec::new(),
        }
    }

    /// Address of this cell
    pub fn index(&self) -> CellIndex {
        self.index
    }

    /// Row of this cell
    pub fn row(&self) -> usize {
        self.index.row
    }

    /// Column of this cell
    pub fn col(&self) -> usize {
        self.index.col
    }

    /// Entities currently in this cell
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Whether `entity` is registered here
    pub fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains(&entity)
    }

    /// Number of entities in this cell
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the cell is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Insert `entity`; returns false if it was already present
    pub(crate) fn add(&mut self, entity: EntityId) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Remove `entity`; returns false if it was not present
    ///
    /// Keeps the remaining order so iteration stays reproducible.
    pub(crate) fn remove(&mut self, entity: EntityId) -> bool {
        match self.entities.iter().position(|&e| e == entity) {
            Some(position) => {
                self.entities.remove(position);
                true
            }
            None => false,
        }
    }

    /// Test `entity` (occupying `circle`) against every other member
    ///
    /// Members already present in `contacts` are skipped, so a caller can
    /// sweep several cells without reporting a pair twice. Disabled members
    /// that have not been unregistered yet are ignored.
    pub fn collide<L: BodyLookup + ?Sized>(
        &self,
        entity: EntityId,
        circle: &Circle,
        bodies: &L,
        contacts: &mut Vec<Contact>,
    ) {
        for &other in &self.entities {
            if other == entity || contacts.iter().any(|c| c.other == other) {
                continue;
            }
            let Some(body) = bodies.body(other) else {
                continue;
            };
            if !body.enabled {
                continue;
            }
            let other_circle = body.circle();
            if circle.intersects(&other_circle) {
                contacts.push(Contact::new(entity, other, circle.push_vector(&other_circle)));
            }
        }
    }
}
