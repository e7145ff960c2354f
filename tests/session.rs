use maze_chase::engine::{GameEngine, GameEngineOptions};
use maze_chase::entity::{Entity, Steering};
use maze_chase::ghosts::{chase_goal, ChaseContext, GhostGroup};
use maze_chase::maze::MazeLayout;
use maze_chase::rng::Rng;
use maze_chase::types::{AgentClass, Direction, GhostKind, Mode, RuntimeEvent};
use maze_chase::vector::Vector2;

#[test]
fn manual_session_eats_pellets_along_the_bottom_corridor() {
    let mut engine = GameEngine::new(11, GameEngineOptions::default()).expect("mazes load");
    assert!(engine.is_paused());
    engine.toggle_pause();

    let mut eaten = 0;
    for _ in 0..60 {
        engine.step(1.0 / 60.0, Direction::Left);
        eaten += engine
            .build_snapshot(true)
            .events
            .iter()
            .filter(|e| matches!(e, RuntimeEvent::PelletEaten { .. }))
            .count();
    }
    assert!(eaten > 0);
    assert_eq!(engine.score(), eaten as u32 * 10);
    assert_eq!(engine.pellets_left(), 244 - eaten);
    assert_eq!(engine.main_mode(), Mode::Scatter);
}

#[test]
fn scatter_turns_to_chase_after_seven_seconds() {
    let layout = MazeLayout::for_level(0);
    let mut nodes = layout.build_nodes().expect("maze builds");
    let home = nodes.home().expect("home");
    let spawn = layout.node_at(&nodes, layout.spawn_tile()).expect("spawn");
    let mut ghosts = GhostGroup::new(spawn, home, &nodes);
    ghosts.set_spawn_node(spawn);
    let mut rng = Rng::new(3);
    let pacman = Vector2::new(16.0, 512.0);

    for _ in 0..27 {
        ghosts.update(0.25, pacman, Direction::Left, &mut nodes, &mut rng);
    }
    assert_eq!(ghosts.main_mode().mode(), Mode::Scatter);
    ghosts.update(0.25, pacman, Direction::Left, &mut nodes, &mut rng);
    assert_eq!(ghosts.main_mode().mode(), Mode::Chase);
    for ghost in ghosts.iter() {
        assert_eq!(ghost.mode.current(), Mode::Chase);
    }
}

#[test]
fn ghost_on_the_portal_row_comes_out_the_other_side() {
    let layout = MazeLayout::for_level(0);
    let nodes = layout.build_nodes().expect("maze builds");
    let left = nodes.node_from_tiles(0.0, 17.0).expect("left portal");
    let right = nodes.node_from_tiles(27.0, 17.0).expect("right portal");
    let inner = nodes.node_from_tiles(6.0, 17.0).expect("tunnel mouth");

    let mut ghost = Entity::new(AgentClass::Blinky, inner, &nodes);
    ghost.steering = Steering::GoalSeeking;
    ghost.goal = Vector2::new(0.0, 272.0);
    ghost.direction = Direction::Left;
    ghost.target = left;
    ghost.position = Vector2::new(2.0, 272.0);
    let mut rng = Rng::new(1);

    assert!(ghost.update(0.05, &nodes, &mut rng));
    assert_eq!(ghost.node, right);
    assert_eq!(ghost.position, nodes.position(right));
    assert_eq!(ghost.direction, Direction::Left);
}

#[test]
fn inky_targets_the_mirrored_point() {
    let ctx = ChaseContext {
        pacman_position: Vector2::new(50.0, 100.0),
        pacman_direction: Direction::Right,
        blinky_position: Vector2::new(100.0, 100.0),
    };
    assert_eq!(
        chase_goal(GhostKind::Inky, Vector2::ZERO, &ctx),
        Vector2::new(64.0, 100.0)
    );
}

#[test]
fn snapshots_serialize_with_tagged_events() {
    let mut engine = GameEngine::new(8, GameEngineOptions::default()).expect("mazes load");
    let snapshot = engine.build_snapshot(true);
    let value = serde_json::to_value(&snapshot).expect("serialize");
    assert_eq!(value["events"][0]["type"], "level_started");
    assert_eq!(value["events"][0]["maze"], "maze1");
    assert_eq!(value["pelletsLeft"], 244);
    assert_eq!(value["ghosts"].as_array().map(Vec::len), Some(4));
}
