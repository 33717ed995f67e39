#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the serpent workspace.
//!
//! This crate defines the data records that the ECS substrate stores and the
//! systems mutate: entity identifiers, grid geometry, the component records
//! of the snake game, the events drained by the session after each tick, and
//! the error taxonomy surfaced by required-component lookups.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier assigned to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Cardinal headings available to a snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Returns the 180-degree opposite of the heading.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u32,
    y: u32,
}

impl Position {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

/// Closed set of component kinds known to the substrate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Grid-relative placement record.
    Position,
    /// Current heading of a moving entity.
    Velocity,
    /// Ordered snake body with pending growth.
    Snake,
    /// Cell occupied by the food pellet.
    Food,
    /// Pellets eaten during the session.
    Score,
    /// Toroidal playing field dimensions.
    Grid,
    /// Terminal flag of the session.
    GameState,
}

/// Current heading applied to an entity when movement runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Velocity {
    direction: Direction,
}

impl Velocity {
    /// Creates a velocity with the provided initial heading.
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self { direction }
    }

    /// Heading the entity travels along on the next movement step.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Adopts a new heading. Turn validity is enforced by the input system.
    pub fn turn(&mut self, direction: Direction) {
        self.direction = direction;
    }
}

/// Ordered snake body, head first, plus growth waiting to be applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
    growth_pending: u32,
}

impl Snake {
    /// Creates a snake whose body is the single provided head cell.
    #[must_use]
    pub fn with_head(head: Position) -> Self {
        Self::from_cells([head])
    }

    /// Creates a snake from explicit body cells ordered head first.
    #[must_use]
    pub fn from_cells(cells: impl IntoIterator<Item = Position>) -> Self {
        Self {
            body: cells.into_iter().collect(),
            growth_pending: 0,
        }
    }

    /// Cell currently occupied by the head, if the body is non-empty.
    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    /// Iterates the body cells in order, head first.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Number of cells currently occupied by the body.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Reports whether the body holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Units of growth waiting to be consumed by future movement.
    #[must_use]
    pub const fn growth_pending(&self) -> u32 {
        self.growth_pending
    }

    /// Queues one unit of growth for the next advance.
    pub fn grow(&mut self) {
        self.growth_pending = self.growth_pending.saturating_add(1);
    }

    /// Moves the head onto the provided cell.
    ///
    /// Pending growth is consumed instead of removing the tail, so this is
    /// the only operation that changes the body length.
    pub fn advance(&mut self, new_head: Position) {
        self.body.push_front(new_head);
        if self.growth_pending > 0 {
            self.growth_pending -= 1;
        } else {
            let _ = self.body.pop_back();
        }
    }

    /// Reports whether any body cell occupies the provided cell.
    #[must_use]
    pub fn occupies(&self, cell: Position) -> bool {
        self.body.contains(&cell)
    }

    /// Reports whether the head cell appears again later in the body.
    #[must_use]
    pub fn is_self_colliding(&self) -> bool {
        match self.head() {
            Some(head) => self.body.iter().skip(1).any(|cell| *cell == head),
            None => false,
        }
    }
}

/// Cell currently holding the food pellet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    /// Creates food located at the provided cell.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self { position }
    }

    /// Cell currently holding the food pellet.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Moves the food pellet to the provided cell.
    pub fn relocate(&mut self, position: Position) {
        self.position = position;
    }
}

/// Number of pellets eaten during the session; never decreases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    value: u32,
}

impl Score {
    /// Creates a zeroed score.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Current score value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Increments the score by one, returning the new value.
    pub fn increment(&mut self) -> u32 {
        self.value = self.value.saturating_add(1);
        self.value
    }
}

/// Describes the toroidal playing field. Immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    /// Creates a new grid description.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells contained in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Steps the provided cell one unit along the heading, wrapping each
    /// axis independently at the grid bounds.
    #[must_use]
    pub fn step(&self, cell: Position, direction: Direction) -> Position {
        if self.width == 0 || self.height == 0 {
            return cell;
        }

        let width = u64::from(self.width);
        let height = u64::from(self.height);
        let x = u64::from(cell.x());
        let y = u64::from(cell.y());

        let (x, y) = match direction {
            Direction::Up => (x, (y + height - 1) % height),
            Direction::Down => (x, (y + 1) % height),
            Direction::Left => ((x + width - 1) % width, y),
            Direction::Right => ((x + 1) % width, y),
        };

        Position::new(x as u32, y as u32)
    }
}

/// Terminal flag of a session; once raised it never resets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    is_game_over: bool,
}

impl GameState {
    /// Creates a fresh state with the game still running.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            is_game_over: false,
        }
    }

    /// Reports whether the game reached its terminal state.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Marks the game as over, reporting whether this call performed the
    /// transition.
    pub fn end(&mut self) -> bool {
        let was_over = self.is_game_over;
        self.is_game_over = true;
        !was_over
    }
}

/// Events broadcast by systems for the session to dispatch after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the score increased.
    ScoreChanged {
        /// Score value after the increment.
        value: u32,
    },
    /// Announces that the game reached its terminal state.
    GameOver,
}

/// Errors surfaced by the substrate and the session.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// A system required a component kind the entity does not carry.
    ///
    /// The game entity's shape is fixed at construction, so this is a
    /// programming-error-level fault rather than a recoverable condition.
    #[error("entity {entity:?} is missing required component {kind:?}")]
    MissingComponent {
        /// Entity the lookup targeted.
        entity: EntityId,
        /// Component kind that was absent.
        kind: ComponentKind,
    },
    /// A session was requested with a degenerate playing field.
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    InvalidGrid {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
}
