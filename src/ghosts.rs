use tracing::debug;

use crate::constants::{
    BASE_SPEED, CLYDE_SHY_TILES, FREIGHT_SPEED, GHOST_BASE_POINTS, INKY_LOOKAHEAD_TILES, NCOLS,
    NROWS, PINKY_LOOKAHEAD_TILES, SPAWN_SPEED, TILE_HEIGHT, TILE_WIDTH,
};
use crate::entity::{Entity, Steering};
use crate::graph::{NodeGroup, NodeId};
use crate::modes::{MainMode, ModeController};
use crate::rng::Rng;
use crate::types::{Direction, GhostKind, GhostView, Mode};
use crate::vector::Vector2;

#[derive(Clone, Copy, Debug)]
pub struct ChaseContext {
    pub pacman_position: Vector2,
    pub pacman_direction: Direction,
    pub blinky_position: Vector2,
}

pub fn scatter_goal(kind: GhostKind) -> Vector2 {
    let max_x = (NCOLS * TILE_WIDTH) as f64;
    let max_y = (NROWS * TILE_HEIGHT) as f64;
    match kind {
        GhostKind::Blinky => Vector2::ZERO,
        GhostKind::Pinky => Vector2::new(max_x, 0.0),
        GhostKind::Inky => Vector2::new(max_x, max_y),
        GhostKind::Clyde => Vector2::new(0.0, max_y),
    }
}

fn ahead_of_pacman(ctx: &ChaseContext, tiles: f64) -> Vector2 {
    ctx.pacman_position + ctx.pacman_direction.vector() * (TILE_WIDTH as f64 * tiles)
}

pub fn chase_goal(kind: GhostKind, position: Vector2, ctx: &ChaseContext) -> Vector2 {
    match kind {
        GhostKind::Blinky => ctx.pacman_position,
        GhostKind::Pinky => ahead_of_pacman(ctx, PINKY_LOOKAHEAD_TILES),
        GhostKind::Inky => {
            let pivot = ahead_of_pacman(ctx, INKY_LOOKAHEAD_TILES);
            ctx.blinky_position + (pivot - ctx.blinky_position) * 2.0
        }
        GhostKind::Clyde => {
            let shy = CLYDE_SHY_TILES * TILE_WIDTH as f64;
            if position.distance_squared(ctx.pacman_position) <= shy * shy {
                scatter_goal(kind)
            } else {
                ahead_of_pacman(ctx, PINKY_LOOKAHEAD_TILES)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ghost {
    pub entity: Entity,
    pub kind: GhostKind,
    pub points: u32,
    pub mode: ModeController,
    pub home_node: NodeId,
    pub spawn_node: NodeId,
}

impl Ghost {
    pub fn new(
        kind: GhostKind,
        node: NodeId,
        home_node: NodeId,
        nodes: &NodeGroup,
        main: &MainMode,
    ) -> Self {
        let mut entity = Entity::new(kind.class(), node, nodes);
        entity.steering = Steering::GoalSeeking;
        Self {
            entity,
            kind,
            points: GHOST_BASE_POINTS,
            mode: ModeController::new(main),
            home_node,
            spawn_node: node,
        }
    }

    pub fn update(
        &mut self,
        dt: f64,
        main: &MainMode,
        ctx: &ChaseContext,
        nodes: &mut NodeGroup,
        rng: &mut Rng,
    ) {
        let at_spawn = self.entity.node == self.spawn_node;
        if self.mode.update(dt, main, at_spawn) {
            self.normal_mode(nodes);
        }
        match self.mode.current() {
            Mode::Scatter => self.entity.goal = scatter_goal(self.kind),
            Mode::Chase => self.entity.goal = chase_goal(self.kind, self.entity.position, ctx),
            Mode::Freight | Mode::Spawn => {}
        }
        self.entity.update(dt, nodes, rng);
    }

    pub fn start_freight(&mut self) {
        self.mode.set_freight_mode();
        if self.mode.current() == Mode::Freight {
            self.entity.set_speed(FREIGHT_SPEED);
            self.entity.steering = Steering::Random;
        }
    }

    pub fn start_spawn(&mut self, nodes: &mut NodeGroup) {
        self.mode.set_spawn_mode();
        if self.mode.current() != Mode::Spawn {
            return;
        }
        self.entity.set_speed(SPAWN_SPEED);
        self.entity.steering = Steering::GoalSeeking;
        self.entity.goal = nodes.position(self.spawn_node);
        nodes
            .node_mut(self.home_node)
            .allow_access(Direction::Down, self.entity.class);
        debug!(ghost = ?self.kind, "returning to spawn");
    }

    pub fn normal_mode(&mut self, nodes: &mut NodeGroup) {
        self.entity.set_speed(BASE_SPEED);
        self.entity.steering = Steering::GoalSeeking;
        nodes
            .node_mut(self.home_node)
            .deny_access(Direction::Down, self.entity.class);
        debug!(ghost = ?self.kind, mode = ?self.mode.current(), "back to normal");
    }

    pub fn reset(&mut self, main: &MainMode, nodes: &mut NodeGroup) {
        self.entity.reset(nodes);
        self.points = GHOST_BASE_POINTS;
        self.mode.reset(main);
        self.normal_mode(nodes);
    }

    pub fn view(&self) -> GhostView {
        GhostView {
            kind: self.kind,
            x: self.entity.position.x,
            y: self.entity.position.y,
            direction: self.entity.direction,
            mode: self.mode.current(),
            points: self.points,
            visible: self.entity.visible,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GhostGroup {
    main: MainMode,
    ghosts: Vec<Ghost>,
}

impl GhostGroup {
    pub fn new(node: NodeId, home_node: NodeId, nodes: &NodeGroup) -> Self {
        let main = MainMode::new();
        let ghosts = GhostKind::ALL
            .into_iter()
            .map(|kind| Ghost::new(kind, node, home_node, nodes, &main))
            .collect();
        Self { main, ghosts }
    }

    pub fn main_mode(&self) -> &MainMode {
        &self.main
    }

    // Inky reads Blinky's position from this same frame.
    pub fn update(
        &mut self,
        dt: f64,
        pacman_position: Vector2,
        pacman_direction: Direction,
        nodes: &mut NodeGroup,
        rng: &mut Rng,
    ) {
        self.main.update(dt);
        for idx in 0..self.ghosts.len() {
            let ctx = ChaseContext {
                pacman_position,
                pacman_direction,
                blinky_position: self.get(GhostKind::Blinky).entity.position,
            };
            self.ghosts[idx].update(dt, &self.main, &ctx, nodes, rng);
        }
    }

    pub fn start_freight(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.start_freight();
        }
        self.reset_points();
    }

    pub fn set_spawn_node(&mut self, node: NodeId) {
        for ghost in &mut self.ghosts {
            ghost.spawn_node = node;
        }
    }

    pub fn update_points(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.points *= 2;
        }
    }

    pub fn reset_points(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.points = GHOST_BASE_POINTS;
        }
    }

    pub fn hide(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.entity.visible = false;
        }
    }

    pub fn show(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.entity.visible = true;
        }
    }

    pub fn reset(&mut self, nodes: &mut NodeGroup) {
        for ghost in &mut self.ghosts {
            ghost.reset(&self.main, nodes);
        }
    }

    pub fn get(&self, kind: GhostKind) -> &Ghost {
        &self.ghosts[kind as usize]
    }

    pub fn get_mut(&mut self, kind: GhostKind) -> &mut Ghost {
        &mut self.ghosts[kind as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ghost> {
        self.ghosts.iter()
    }
}
