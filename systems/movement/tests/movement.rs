use std::time::Duration;

use serpent_core::{Direction, EntityId, Grid, Position, Snake, Velocity};
use serpent_system_input::Input;
use serpent_system_movement::Movement;
use serpent_world::World;

fn pipeline_world(head: Position, direction: Direction) -> (World, EntityId) {
    let mut world = World::new();
    let entity = world.create_entity();
    world.attach(entity, Grid::new(5, 5));
    world.attach(entity, Snake::with_head(head));
    world.attach(entity, Velocity::new(direction));
    world.add_system(Box::new(Input::new()));
    world.add_system(Box::new(Movement::new()));
    (world, entity)
}

fn body(world: &World, entity: EntityId) -> Vec<Position> {
    world
        .component::<Snake>(entity)
        .expect("snake")
        .cells()
        .collect()
}

#[test]
fn queued_turn_applies_before_movement() {
    let (mut world, entity) = pipeline_world(Position::new(2, 2), Direction::Right);
    world.queue_direction(Direction::Down);

    world.update(Duration::from_millis(100)).expect("tick");

    assert_eq!(body(&world, entity), vec![Position::new(2, 3)]);
}

#[test]
fn reverse_turn_is_ignored_by_the_pipeline() {
    let (mut world, entity) = pipeline_world(Position::new(2, 2), Direction::Right);
    world.queue_direction(Direction::Left);

    world.update(Duration::from_millis(100)).expect("tick");

    assert_eq!(body(&world, entity), vec![Position::new(3, 2)]);
}

#[test]
fn body_length_is_preserved_across_plain_ticks() {
    let (mut world, entity) = pipeline_world(Position::new(2, 2), Direction::Right);

    for _ in 0..12 {
        world.update(Duration::from_millis(100)).expect("tick");
    }

    let cells = body(&world, entity);
    assert_eq!(cells.len(), 1);
    assert!(cells[0].x() < 5 && cells[0].y() < 5);
}
