#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative spatial registry for the Meadow simulation.
//!
//! The [`Grid`] owns every entity and is the single source of truth for which
//! entity occupies which cell. Each cell holds at most one entity and every
//! registered entity lies inside the grid rectangle. Entities are stored in
//! identifier order, which is insertion order; that order drives
//! [`Grid::entities`] and breaks ties in [`Grid::find_nearest`].

use std::collections::BTreeMap;

use meadow_core::{EntityId, EntityKind, GridError, Position, EMPTY_GLYPH};

mod entity;
pub mod navigation;

pub use entity::{
    Body, Entity, Vitals, DEFAULT_GRASS_NUTRITION, DEFAULT_HERBIVORE_HIT_POINTS,
    DEFAULT_PREDATOR_ATTACK, DEFAULT_PREDATOR_HIT_POINTS, DEFAULT_SPEED,
};

/// Bounded two-dimensional registry mapping cells to at most one entity.
#[derive(Clone, Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    entities: BTreeMap<EntityId, Entity>,
    occupancy: OccupancyGrid,
    next_id: u32,
}

impl Grid {
    /// Creates an empty grid spanning `width` columns and `height` rows.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            entities: BTreeMap::new(),
            occupancy: OccupancyGrid::new(width, height),
            next_id: 0,
        }
    }

    /// Number of columns spanned by the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows spanned by the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Registers the entity at its own position and returns the identifier assigned to it.
    ///
    /// Fails without touching the grid when the position is outside the
    /// rectangle or already holds an entity.
    pub fn add(&mut self, entity: Entity) -> Result<EntityId, GridError> {
        let position = entity.position();
        let Some(index) = self.occupancy.index(position) else {
            return Err(GridError::OutOfBounds(position));
        };
        if self.occupancy.occupant_at(index).is_some() {
            return Err(GridError::OccupiedCell(position));
        }

        let id = EntityId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.occupancy.occupy(index, id);
        tracing::trace!(id = id.get(), kind = ?entity.kind(), %position, "entity added");
        let _ = self.entities.insert(id, entity);
        Ok(id)
    }

    /// Unregisters the entity, returning it when it was present.
    ///
    /// Removing an identifier that is not registered is a no-op, which lets
    /// deferred cleanup run after an entity was already removed.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        if let Some(index) = self.occupancy.index(entity.position()) {
            if self.occupancy.occupant_at(index) == Some(id) {
                self.occupancy.vacate(index);
            }
        }
        tracing::trace!(id = id.get(), kind = ?entity.kind(), position = %entity.position(), "entity removed");
        Some(entity)
    }

    /// Relocates the entity to `to`, reporting whether it moved.
    ///
    /// Unknown identifiers, out-of-bounds destinations and occupied
    /// destinations leave the grid untouched and return `false`.
    pub fn move_entity(&mut self, id: EntityId, to: Position) -> bool {
        let Some(to_index) = self.occupancy.index(to) else {
            return false;
        };
        if self.occupancy.occupant_at(to_index).is_some() {
            return false;
        }
        let Some(entity) = self.entities.get_mut(&id) else {
            return false;
        };

        if let Some(from_index) = self.occupancy.index(entity.position()) {
            self.occupancy.vacate(from_index);
        }
        self.occupancy.occupy(to_index, id);
        entity.relocate(to);
        true
    }

    /// Reports whether the position lies inside the grid rectangle.
    #[must_use]
    pub fn is_inside(&self, position: Position) -> bool {
        self.occupancy.index(position).is_some()
    }

    /// Reports whether no entity occupies the position.
    ///
    /// Bounds are not checked: positions outside the grid hold nothing.
    #[must_use]
    pub fn is_empty(&self, position: Position) -> bool {
        self.occupant(position).is_none()
    }

    /// Returns the entity occupying the position, if any.
    #[must_use]
    pub fn occupant(&self, position: Position) -> Option<EntityId> {
        self.occupancy
            .index(position)
            .and_then(|index| self.occupancy.occupant_at(index))
    }

    /// Returns the registered entity with the provided identifier.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Returns mutable access to the registered entity with the provided identifier.
    ///
    /// The entity's position cannot be changed through this reference.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Number of registered entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// In-bounds orthogonal neighbours of the position, ordered up, down, left, right.
    #[must_use]
    pub fn neighbors(&self, position: Position) -> Neighbors {
        let mut neighbors = Neighbors::default();
        for candidate in [
            position.offset(0, -1),
            position.offset(0, 1),
            position.offset(-1, 0),
            position.offset(1, 0),
        ] {
            if self.is_inside(candidate) {
                neighbors.push(candidate);
            }
        }
        neighbors
    }

    /// Finds the entity matching `predicate` with the smallest Manhattan distance to `start`.
    ///
    /// Ties go to the entity registered first.
    pub fn find_nearest<P>(&self, start: Position, mut predicate: P) -> Option<EntityId>
    where
        P: FnMut(&Entity) -> bool,
    {
        let mut nearest: Option<(u32, EntityId)> = None;
        for (&id, entity) in &self.entities {
            if !predicate(entity) {
                continue;
            }
            let distance = start.manhattan_distance(entity.position());
            if nearest.map_or(true, |(best, _)| distance < best) {
                nearest = Some((distance, id));
            }
        }
        nearest.map(|(_, id)| id)
    }

    /// Finds the nearest entity of the provided kind.
    pub fn find_nearest_kind(&self, start: Position, kind: EntityKind) -> Option<EntityId> {
        self.find_nearest(start, |entity| entity.kind() == kind)
    }

    /// Produces a row-major textual rendering with one glyph per cell.
    #[must_use]
    pub fn render(&self) -> String {
        let mut rows = Vec::with_capacity(usize::try_from(self.height).unwrap_or(0));
        for y in 0..self.height {
            let mut row = String::new();
            for x in 0..self.width {
                let position = Position::new(to_coord(x), to_coord(y));
                let glyph = self
                    .occupant(position)
                    .and_then(|id| self.entities.get(&id))
                    .map_or(EMPTY_GLYPH, Entity::glyph);
                row.push_str(glyph);
            }
            rows.push(row);
        }
        rows.join("\n")
    }

    /// Captures a snapshot of every registered entity in insertion order.
    #[must_use]
    pub fn entities(&self) -> EntityView {
        EntityView {
            snapshots: self
                .entities
                .iter()
                .map(|(&id, entity)| EntitySnapshot {
                    id,
                    position: entity.position(),
                    kind: entity.kind(),
                    hit_points: entity.vitals().map(Vitals::hit_points),
                })
                .collect(),
        }
    }

    /// Identifiers of every registered entity in insertion order.
    ///
    /// The list is owned, so callers may remove entities while walking it.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    /// Iterator over registered entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(&id, entity)| (id, entity))
    }

    /// Iterator over every in-bounds position in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let width = self.width;
        (0..self.height)
            .flat_map(move |y| (0..width).map(move |x| Position::new(to_coord(x), to_coord(y))))
    }
}

/// Read-only snapshot describing all entities on the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Iterator over the captured snapshots in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the snapshot holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single entity's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntitySnapshot {
    /// Identifier assigned to the entity.
    pub id: EntityId,
    /// Cell the entity occupies.
    pub position: Position,
    /// Kind of the entity.
    pub kind: EntityKind,
    /// Remaining hit-points for creatures.
    pub hit_points: Option<i32>,
}

/// Up to four orthogonal neighbours of a cell.
#[derive(Clone, Debug, Default)]
pub struct Neighbors {
    buffer: [Option<Position>; 4],
    len: usize,
    cursor: usize,
}

impl Neighbors {
    fn push(&mut self, position: Position) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(position);
            self.len += 1;
        }
    }
}

impl Iterator for Neighbors {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}

#[derive(Clone, Debug)]
struct OccupancyGrid {
    width: u32,
    height: u32,
    cells: Vec<Option<EntityId>>,
}

impl OccupancyGrid {
    fn new(width: u32, height: u32) -> Self {
        let capacity_u64 = u64::from(width) * u64::from(height);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            width,
            height,
            cells: vec![None; capacity],
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        let x = u32::try_from(position.x()).ok()?;
        let y = u32::try_from(position.y()).ok()?;
        if x < self.width && y < self.height {
            let row = usize::try_from(y).ok()?;
            let column = usize::try_from(x).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    fn occupant_at(&self, index: usize) -> Option<EntityId> {
        self.cells.get(index).copied().flatten()
    }

    fn occupy(&mut self, index: usize, id: EntityId) {
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = Some(id);
        }
    }

    fn vacate(&mut self, index: usize) {
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = None;
        }
    }
}

fn to_coord(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
