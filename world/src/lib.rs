#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! ECS substrate for the serpent game.
//!
//! The [`World`] composes the entity registry, one strongly-typed component
//! store per kind, and the ordered system pipeline that mutates the stores
//! once per tick. Component kinds form a closed set known at compile time,
//! so every lookup resolves through a typed store without runtime type
//! dispatch. Systems communicate with the session exclusively through the
//! world: intent arrives through the queued-direction slot and results leave
//! through the per-tick event buffer.

use std::{fmt, time::Duration};

use serpent_core::{
    ComponentKind, Direction, EntityId, Event, Food, GameError, GameState, Grid, Position, Score,
    Snake, Velocity,
};

mod storage;

pub use storage::ComponentStore;

/// Behavior unit invoked once per tick against the shared component stores.
///
/// Systems hold no game state beyond transient per-tick intent; everything
/// durable lives in the world's component stores.
pub trait System: fmt::Debug {
    /// Runs the system against the world for one tick.
    ///
    /// The `dt` value is the logical tick duration; current systems pass it
    /// through unused.
    fn update(&mut self, world: &mut World, dt: Duration) -> Result<(), GameError>;
}

/// Compile-time binding from a component record to its typed store.
pub trait Component: Sized {
    /// Discriminant naming this component kind.
    const KIND: ComponentKind;

    /// Borrows the world's store holding this component kind.
    fn store(world: &World) -> &ComponentStore<Self>;

    /// Mutably borrows the world's store holding this component kind.
    fn store_mut(world: &mut World) -> &mut ComponentStore<Self>;
}

// One impl per kind keeps the set closed; adding a kind means adding a store
// field alongside a new invocation here.
macro_rules! impl_component {
    ($component:ty, $kind:ident, $field:ident) => {
        impl Component for $component {
            const KIND: ComponentKind = ComponentKind::$kind;

            fn store(world: &World) -> &ComponentStore<Self> {
                &world.$field
            }

            fn store_mut(world: &mut World) -> &mut ComponentStore<Self> {
                &mut world.$field
            }
        }
    };
}

impl_component!(Position, Position, positions);
impl_component!(Velocity, Velocity, velocities);
impl_component!(Snake, Snake, snakes);
impl_component!(Food, Food, foods);
impl_component!(Score, Score, scores);
impl_component!(Grid, Grid, grids);
impl_component!(GameState, GameState, game_states);

/// Allocates entity identifiers and aggregates attached component kinds.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    next: u32,
    entries: Vec<(EntityId, Vec<ComponentKind>)>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next identifier; identifiers are never reused.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId::new(self.next);
        self.next = self.next.saturating_add(1);
        self.entries.push((id, Vec::new()));
        id
    }

    /// Records that the entity carries a component of the provided kind.
    pub fn record(&mut self, entity: EntityId, kind: ComponentKind) {
        if let Some((_, kinds)) = self.entries.iter_mut().find(|(id, _)| *id == entity) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
            return;
        }
        self.entries.push((entity, vec![kind]));
    }

    /// Component kinds attached to the entity, in attachment order.
    #[must_use]
    pub fn kinds_of(&self, entity: EntityId) -> &[ComponentKind] {
        self.entries
            .iter()
            .find(|(id, _)| *id == entity)
            .map_or(&[], |(_, kinds)| kinds.as_slice())
    }
}

/// Composes the entity registry, the typed component stores, and the ordered
/// system pipeline that mutates them once per tick.
#[derive(Debug, Default)]
pub struct World {
    registry: EntityRegistry,
    positions: ComponentStore<Position>,
    velocities: ComponentStore<Velocity>,
    snakes: ComponentStore<Snake>,
    foods: ComponentStore<Food>,
    scores: ComponentStore<Score>,
    grids: ComponentStore<Grid>,
    game_states: ComponentStore<GameState>,
    systems: Vec<Box<dyn System>>,
    pending_direction: Option<Direction>,
    events: Vec<Event>,
}

impl World {
    /// Creates an empty world with no entities or systems.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh entity identifier; identifiers are never reused.
    pub fn create_entity(&mut self) -> EntityId {
        self.registry.allocate()
    }

    /// Attaches a component to the entity, overwriting any existing value of
    /// the same kind.
    pub fn attach<C: Component>(&mut self, entity: EntityId, component: C) {
        self.registry.record(entity, C::KIND);
        C::store_mut(self).insert(entity, component);
    }

    /// Looks up a component on the entity, yielding absence as `None`.
    #[must_use]
    pub fn get<C: Component>(&self, entity: EntityId) -> Option<&C> {
        C::store(self).get(entity)
    }

    /// Looks up a component the caller requires, failing loudly when absent.
    pub fn component<C: Component>(&self, entity: EntityId) -> Result<&C, GameError> {
        C::store(self).get(entity).ok_or(GameError::MissingComponent {
            entity,
            kind: C::KIND,
        })
    }

    /// Mutable counterpart of [`World::component`].
    pub fn component_mut<C: Component>(&mut self, entity: EntityId) -> Result<&mut C, GameError> {
        C::store_mut(self)
            .get_mut(entity)
            .ok_or(GameError::MissingComponent {
                entity,
                kind: C::KIND,
            })
    }

    /// Entities carrying the component kind, in store insertion order.
    ///
    /// The order is stable and used only for iteration, never for game
    /// semantics.
    #[must_use]
    pub fn entities_with<C: Component>(&self) -> Vec<EntityId> {
        C::store(self).entities().collect()
    }

    /// Component kinds attached to the entity, in attachment order.
    #[must_use]
    pub fn kinds_of(&self, entity: EntityId) -> &[ComponentKind] {
        self.registry.kinds_of(entity)
    }

    /// Appends a system to the pipeline.
    ///
    /// Systems run in registration order on every tick. The pipeline is
    /// wired once at session construction and never mutated during a tick.
    pub fn add_system(&mut self, system: Box<dyn System>) {
        self.systems.push(system);
    }

    /// Runs every system once, in registration order, as a single
    /// synchronous tick.
    ///
    /// The first system error aborts the remainder of the tick and surfaces
    /// to the caller. The pipeline is detached while it runs, so systems
    /// cannot add or remove systems mid-tick.
    pub fn update(&mut self, dt: Duration) -> Result<(), GameError> {
        let mut systems = std::mem::take(&mut self.systems);
        let mut outcome = Ok(());
        for system in &mut systems {
            outcome = system.update(self, dt);
            if outcome.is_err() {
                break;
            }
        }
        self.systems = systems;
        outcome
    }

    /// Queues a heading change for the next tick.
    ///
    /// Only one change is recorded between ticks; the last value queued
    /// before the tick wins.
    pub fn queue_direction(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    /// Consumes the queued heading change, clearing the slot.
    pub fn take_queued_direction(&mut self) -> Option<Direction> {
        self.pending_direction.take()
    }

    /// Records an event for the session to dispatch after the tick.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Drains the events recorded since the previous drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

/// Query functions that provide read-only access to a game entity's state.
pub mod query {
    use serpent_core::{Food, GameError, GameState, Grid, Position, Score, Snake};

    use super::{EntityId, World};

    /// Ordered body cells of the entity's snake, head first.
    pub fn snake_cells(world: &World, entity: EntityId) -> Result<Vec<Position>, GameError> {
        Ok(world.component::<Snake>(entity)?.cells().collect())
    }

    /// Cell currently holding the entity's food pellet.
    pub fn food_cell(world: &World, entity: EntityId) -> Result<Position, GameError> {
        Ok(world.component::<Food>(entity)?.position())
    }

    /// Current score value of the entity.
    pub fn score_value(world: &World, entity: EntityId) -> Result<u32, GameError> {
        Ok(world.component::<Score>(entity)?.value())
    }

    /// Reports whether the entity's game reached its terminal state.
    pub fn is_game_over(world: &World, entity: EntityId) -> Result<bool, GameError> {
        Ok(world.component::<GameState>(entity)?.is_game_over())
    }

    /// Width and height of the entity's playing field.
    pub fn grid_dimensions(world: &World, entity: EntityId) -> Result<(u32, u32), GameError> {
        let grid = world.component::<Grid>(entity)?;
        Ok((grid.width(), grid.height()))
    }
}
