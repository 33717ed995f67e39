use std::time::Duration;

use serpent_core::{
    Direction, EntityId, Event, Food, GameState, Grid, Position, Score, Snake, Velocity,
};
use serpent_system_collision::Collision;
use serpent_system_movement::Movement;
use serpent_world::{query, World};

const TICK: Duration = Duration::from_millis(100);

fn pipeline_world(
    grid: Grid,
    snake: Snake,
    heading: Direction,
    food: Position,
) -> (World, EntityId) {
    let mut world = World::new();
    let entity = world.create_entity();
    world.attach(entity, grid);
    world.attach(entity, snake);
    world.attach(entity, Velocity::new(heading));
    world.attach(entity, Food::at(food));
    world.attach(entity, Score::new());
    world.attach(entity, GameState::new());
    world.add_system(Box::new(Movement::new()));
    world.add_system(Box::new(Collision::new(0x1234_5678)));
    (world, entity)
}

#[test]
fn moving_onto_food_scores_and_grows_one_tick_later() {
    let (mut world, entity) = pipeline_world(
        Grid::new(5, 5),
        Snake::with_head(Position::new(1, 1)),
        Direction::Right,
        Position::new(2, 1),
    );

    world.update(TICK).expect("tick");

    let cells = query::snake_cells(&world, entity).expect("snake");
    assert_eq!(cells, vec![Position::new(2, 1)]);
    assert_eq!(query::score_value(&world, entity), Ok(1));

    let food = query::food_cell(&world, entity).expect("food");
    assert_ne!(food, Position::new(2, 1));
    assert_ne!(food, Position::new(1, 1));

    assert_eq!(world.drain_events(), vec![Event::ScoreChanged { value: 1 }]);

    // Growth lands exactly one tick after eating.
    world.update(TICK).expect("tick");
    assert_eq!(query::snake_cells(&world, entity).expect("snake").len(), 2);
}

#[test]
fn self_collision_persists_without_refiring() {
    // Head at (2, 2) steps down into (2, 3), which stays in the body after
    // the tail cell (1, 3) is removed.
    let snake = Snake::from_cells([
        Position::new(2, 2),
        Position::new(3, 2),
        Position::new(3, 3),
        Position::new(2, 3),
        Position::new(1, 3),
    ]);
    let (mut world, entity) = pipeline_world(
        Grid::new(5, 5),
        snake,
        Direction::Down,
        Position::new(0, 0),
    );

    world.update(TICK).expect("tick");

    assert_eq!(query::is_game_over(&world, entity), Ok(true));
    assert_eq!(world.drain_events(), vec![Event::GameOver]);

    world.update(TICK).expect("tick");

    assert_eq!(query::is_game_over(&world, entity), Ok(true));
    assert!(world.drain_events().is_empty());
}
