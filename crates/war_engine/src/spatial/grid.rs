//! Uniform collision grid
//!
//! The level is cut into square cells of `cell_size` pixels. A world
//! coordinate `v` maps to grid index `floor(v / cell_size)`; indices outside
//! `[0, rows) x [0, cols)` resolve to "no cell" rather than failing.
//!
//! Single-cell entities live in the cell holding their center. Multi-cell
//! entities live in every cell their bounds overlap. Either way the owning
//! [`CollideComponent`] keeps the list of cells it was placed in, so removal
//! never depends on where the entity happens to be at that moment.

use std::collections::HashSet;

use log::{debug, info, trace};

use crate::core::config::{CollisionConfig, LevelDimensions};
use crate::ecs::components::{Body, BodyLookup, CollideComponent};
use crate::ecs::EntityId;
use crate::error::CollisionResult;
use crate::foundation::math::Vec2;
use crate::physics::behavior::Occupancy;
use crate::physics::collision::Bounds;
use crate::physics::Contact;
use crate::spatial::cell::{Cell, CellIndex};

/// Fixed-size 2D array of [`Cell`]s laid over a level
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    width: f32,
    height: f32,
    rows: usize,
    cols: usize,
    /// Row-major: `row * cols + col`
    cells: Vec<Cell>,
}

impl SpatialGrid {
    /// Allocate `ceil(height / cell_size)` rows by `ceil(width / cell_size)` columns
    ///
    /// Fails with a configuration error if the cell size or the level
    /// dimensions are not positive.
    pub fn new(level: LevelDimensions, cell_size: f32) -> CollisionResult<Self> {
        CollisionConfig::new(cell_size).validate()?;
        level.validate()?;

        let rows = ((level.height / cell_size).ceil() as usize).max(1);
        let cols = ((level.width / cell_size).ceil() as usize).max(1);
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(row, col)))
            .collect();

        info!(
            "Collision grid {}x{} cells of {} px over a {}x{} level",
            rows, cols, cell_size, level.width, level.height
        );

        Ok(Self {
            cell_size,
            width: level.width,
            height: level.height,
            rows,
            cols,
            cells,
        })
    }

    /// Build a grid from a [`CollisionConfig`]
    pub fn from_config(level: LevelDimensions, config: &CollisionConfig) -> CollisionResult<Self> {
        Self::new(level, config.cell_size)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Edge length of a cell in pixels
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// All cells, row-major
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    // ---- Index math -------------------------------------------------------

    /// Raw grid index of a world coordinate
    fn grid_value(&self, raw: f32) -> i64 {
        if raw.is_nan() {
            return i64::MIN;
        }
        (raw / self.cell_size).floor() as i64
    }

    /// A coordinate lying exactly on the far edge of the level belongs to
    /// the last row/column rather than one past it
    fn edge_index(index: i64, raw: f32, extent: f32, count: usize) -> i64 {
        if index == count as i64 && raw <= extent {
            index - 1
        } else {
            index
        }
    }

    fn col_of(&self, x: f32) -> i64 {
        Self::edge_index(self.grid_value(x), x, self.width, self.cols)
    }

    fn row_of(&self, y: f32) -> i64 {
        Self::edge_index(self.grid_value(y), y, self.height, self.rows)
    }

    /// Index span of `[min, max]` along one axis
    ///
    /// The lower end only takes the far-edge clamp when the whole span sits
    /// on that edge, so bounds lying past the level stay off the grid.
    fn span(&self, min: f32, max: f32, extent: f32, count: usize) -> (i64, i64) {
        let high = Self::edge_index(self.grid_value(max), max, extent, count);
        let low = self.grid_value(min);
        let low = if max <= extent {
            Self::edge_index(low, min, extent, count)
        } else {
            low
        };
        (low, high)
    }

    fn slot(&self, row: i64, col: i64) -> Option<usize> {
        let row = usize::try_from(row).ok().filter(|&r| r < self.rows)?;
        let col = usize::try_from(col).ok().filter(|&c| c < self.cols)?;
        Some(row * self.cols + col)
    }

    fn cell_mut(&mut self, index: CellIndex) -> Option<&mut Cell> {
        let slot = self.slot(index.row as i64, index.col as i64)?;
        self.cells.get_mut(slot)
    }

    // ---- Lookups ----------------------------------------------------------

    /// Bounds-checked lookup; out-of-range indices yield `None`
    pub fn cell_at(&self, row: i64, col: i64) -> Option<&Cell> {
        self.slot(row, col).map(|slot| &self.cells[slot])
    }

    /// Cell addressed by `index`, if it lies on this grid
    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        self.cell_at(index.row as i64, index.col as i64)
    }

    /// The cell owning a world point
    pub fn cell_for_point(&self, x: f32, y: f32) -> Option<&Cell> {
        self.cell_at(self.row_of(y), self.col_of(x))
    }

    fn owning_index(&self, position: Vec2) -> Option<CellIndex> {
        self.cell_for_point(position.x, position.y).map(Cell::index)
    }

    /// Every existing cell in the inclusive index range, skipping invalid indices
    pub fn cells_in_range(&self, min_row: i64, min_col: i64, max_row: i64, max_col: i64) -> Vec<&Cell> {
        let min_row = min_row.max(0);
        let min_col = min_col.max(0);
        let max_row = max_row.min(self.rows as i64 - 1);
        let max_col = max_col.min(self.cols as i64 - 1);
        if min_row > max_row || min_col > max_col {
            return Vec::new();
        }

        let mut result = Vec::with_capacity(((max_row - min_row + 1) * (max_col - min_col + 1)) as usize);
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                if let Some(cell) = self.cell_at(row, col) {
                    result.push(cell);
                }
            }
        }
        result
    }

    /// Every cell whose index falls inside the bounds' index range
    pub fn cells_overlapping(&self, bounds: &Bounds) -> Vec<&Cell> {
        let (min_row, max_row) = self.span(bounds.top, bounds.bottom, self.height, self.rows);
        let (min_col, max_col) = self.span(bounds.left, bounds.right, self.width, self.cols);
        self.cells_in_range(min_row, min_col, max_row, max_col)
    }

    /// Coarse radius query: the block of cells within `floor(radius / cell_size)`
    /// cells of the one containing `(x, y)`
    ///
    /// This is cell-granular, not a geometric circle. Callers that care about
    /// exact distance must post-filter the members.
    pub fn cells_within_radius(&self, x: f32, y: f32, radius: f32) -> Vec<&Cell> {
        let center_col = self.col_of(x);
        let center_row = self.row_of(y);
        let range = self.grid_value(radius).max(0);

        self.cells_in_range(
            center_row.saturating_sub(range),
            center_col.saturating_sub(range),
            center_row.saturating_add(range),
            center_col.saturating_add(range),
        )
    }

    /// Cells an entity's bounds currently overlap
    pub fn relevant_cells(&self, body: &Body) -> Vec<&Cell> {
        self.cells_overlapping(&body.bounds())
    }

    fn overlapping_indices(&self, bounds: &Bounds) -> Vec<CellIndex> {
        self.cells_overlapping(bounds).into_iter().map(Cell::index).collect()
    }

    /// Cell to the left of `index`
    pub fn left_of(&self, index: CellIndex) -> Option<&Cell> {
        self.cell_at(index.row as i64, index.col as i64 - 1)
    }

    /// Cell to the right of `index`
    pub fn right_of(&self, index: CellIndex) -> Option<&Cell> {
        self.cell_at(index.row as i64, index.col as i64 + 1)
    }

    /// Cell above `index`
    pub fn above(&self, index: CellIndex) -> Option<&Cell> {
        self.cell_at(index.row as i64 - 1, index.col as i64)
    }

    /// Cell below `index`
    pub fn below(&self, index: CellIndex) -> Option<&Cell> {
        self.cell_at(index.row as i64 + 1, index.col as i64)
    }

    /// Indices of every cell listing `entity`
    pub fn occupancy(&self, entity: EntityId) -> Vec<CellIndex> {
        self.cells
            .iter()
            .filter(|cell| cell.contains(entity))
            .map(Cell::index)
            .collect()
    }

    /// Number of distinct entities on the grid
    pub fn entity_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|cell| cell.entities().iter().copied())
            .collect::<HashSet<_>>()
            .len()
    }

    // ---- Membership -------------------------------------------------------

    /// Insert an entity according to its behavior
    pub fn add(&mut self, component: &mut CollideComponent, body: &Body) {
        let entity = component.entity();
        debug_assert!(
            component.cells().is_empty(),
            "{entity:?} added to the grid while still occupying {:?}",
            component.cells()
        );

        let indices = match component.behavior().occupancy() {
            None => return,
            Some(Occupancy::MultiCell) => self.overlapping_indices(&body.bounds()),
            Some(Occupancy::SingleCell) => self.owning_index(body.position).into_iter().collect(),
        };

        for &index in &indices {
            if let Some(cell) = self.cell_mut(index) {
                cell.add(entity);
            }
        }
        debug!("{entity:?} added to {} cell(s)", indices.len());
        component.set_cells(indices);
    }

    /// Take `entity` out of a cell it was recorded in
    ///
    /// A record pointing at a cell that does not list the entity means the
    /// grid and the component have drifted apart.
    fn evict(&mut self, entity: EntityId, index: CellIndex) {
        let held = self.cell_mut(index).is_some_and(|cell| cell.remove(entity));
        debug_assert!(held, "{entity:?} recorded in {index:?} but not listed there");
    }

    /// Remove an entity from every cell it was recorded in
    pub fn remove(&mut self, component: &mut CollideComponent) {
        let entity = component.entity();
        let indices = component.take_cells();
        for &index in &indices {
            self.evict(entity, index);
        }
        debug!("{entity:?} removed from {} cell(s)", indices.len());
    }

    /// Re-bucket an entity after its position (or size) changed
    pub fn reseat(&mut self, component: &mut CollideComponent, body: &Body) {
        let entity = component.entity();
        let target: Vec<CellIndex> = match component.behavior().occupancy() {
            None => return,
            Some(Occupancy::MultiCell) => self.overlapping_indices(&body.bounds()),
            Some(Occupancy::SingleCell) => {
                debug_assert!(
                    component.cells().len() <= 1,
                    "single-cell {entity:?} recorded in {} cells",
                    component.cells().len()
                );
                self.owning_index(body.position).into_iter().collect()
            }
        };

        if target.as_slice() == component.cells() {
            return;
        }

        let previous = component.take_cells();
        for &index in previous.iter().filter(|index| !target.contains(index)) {
            self.evict(entity, index);
        }
        for index in target.iter().filter(|index| !previous.contains(index)) {
            if let Some(cell) = self.cell_mut(*index) {
                cell.add(entity);
            }
        }
        trace!("{entity:?} reseated {:?} -> {:?}", previous, target);
        component.set_cells(target);
    }

    /// Broad phase for one entity
    ///
    /// Sweeps every cell overlapping the entity's current bounds and runs the
    /// circle-circle narrow phase against their members. Each other entity is
    /// reported at most once, from the point of view of `component`'s entity.
    pub fn collide<L: BodyLookup + ?Sized>(&self, component: &CollideComponent, bodies: &L) -> Vec<Contact> {
        let entity = component.entity();
        let Some(body) = bodies.body(entity) else {
            return Vec::new();
        };
        let circle = body.circle();

        let mut contacts = Vec::new();
        for cell in self.cells_overlapping(&body.bounds()) {
            cell.collide(entity, &circle, bodies, &mut contacts);
        }
        contacts
    }
}
