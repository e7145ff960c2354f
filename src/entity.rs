use serde::Serialize;
use tracing::debug;

use crate::constants::{scaled_speed, BASE_SPEED, COLLIDE_RADIUS, TILE_WIDTH};
use crate::graph::{NodeGroup, NodeId};
use crate::rng::Rng;
use crate::types::{AgentClass, Direction};
use crate::vector::Vector2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Steering {
    Random,
    GoalSeeking,
    External,
}

#[derive(Clone, Copy, Debug)]
pub struct SteeringContext {
    pub node_position: Vector2,
    pub goal: Vector2,
    pub intent: Direction,
}

impl Steering {
    pub fn choose(
        self,
        candidates: &[Direction],
        ctx: &SteeringContext,
        rng: &mut Rng,
    ) -> Direction {
        match self {
            Steering::Random => rng.pick(candidates).unwrap_or(Direction::Stop),
            Steering::GoalSeeking => goal_direction(candidates, ctx.node_position, ctx.goal),
            Steering::External => ctx.intent,
        }
    }
}

// First minimum in candidate order wins ties.
pub fn goal_direction(
    candidates: &[Direction],
    node_position: Vector2,
    goal: Vector2,
) -> Direction {
    let mut best = Direction::Stop;
    let mut best_distance = f64::INFINITY;
    for direction in candidates {
        let probe = node_position + direction.vector() * TILE_WIDTH as f64;
        let distance = probe.distance_squared(goal);
        if distance < best_distance {
            best_distance = distance;
            best = *direction;
        }
    }
    best
}

pub fn collides(a: Vector2, radius_a: f64, b: Vector2, radius_b: f64) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) <= reach * reach
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub class: AgentClass,
    pub node: NodeId,
    pub start_node: NodeId,
    pub target: NodeId,
    pub position: Vector2,
    pub direction: Direction,
    pub speed: f64,
    pub collide_radius: f64,
    pub visible: bool,
    pub disable_portal: bool,
    pub goal: Vector2,
    pub steering: Steering,
}

impl Entity {
    pub fn new(class: AgentClass, node: NodeId, nodes: &NodeGroup) -> Self {
        Self {
            class,
            node,
            start_node: node,
            target: node,
            position: nodes.position(node),
            direction: Direction::Stop,
            speed: scaled_speed(BASE_SPEED),
            collide_radius: COLLIDE_RADIUS,
            visible: true,
            disable_portal: false,
            goal: Vector2::ZERO,
            steering: Steering::Random,
        }
    }

    pub fn set_position(&mut self, nodes: &NodeGroup) {
        self.position = nodes.position(self.node);
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = scaled_speed(speed);
    }

    pub fn set_start_node(&mut self, node: NodeId, nodes: &NodeGroup) {
        self.node = node;
        self.start_node = node;
        self.target = node;
        self.set_position(nodes);
    }

    pub fn set_between_nodes(&mut self, direction: Direction, nodes: &NodeGroup) {
        if let Some(neighbor) = nodes.neighbor(self.node, direction) {
            self.target = neighbor;
            let midpoint = nodes.position(self.node) + nodes.position(neighbor);
            self.position = midpoint * 0.5;
        }
    }

    pub fn reset(&mut self, nodes: &NodeGroup) {
        self.set_start_node(self.start_node, nodes);
        self.direction = Direction::Stop;
        self.set_speed(BASE_SPEED);
        self.visible = true;
    }

    pub fn valid_direction(&self, direction: Direction, nodes: &NodeGroup) -> bool {
        if direction == Direction::Stop {
            return false;
        }
        let node = nodes.node(self.node);
        node.can_access(direction, self.class) && node.neighbor(direction).is_some()
    }

    pub fn new_target(&self, direction: Direction, nodes: &NodeGroup) -> NodeId {
        if self.valid_direction(direction, nodes) {
            if let Some(neighbor) = nodes.neighbor(self.node, direction) {
                return neighbor;
            }
        }
        self.node
    }

    pub fn overshot_target(&self, nodes: &NodeGroup) -> bool {
        let origin = nodes.position(self.node);
        let node_to_target = nodes.position(self.target).distance_squared(origin);
        let node_to_self = self.position.distance_squared(origin);
        node_to_self >= node_to_target
    }

    pub fn reverse_direction(&mut self) {
        self.direction = -self.direction;
        std::mem::swap(&mut self.node, &mut self.target);
    }

    pub fn is_opposite(&self, direction: Direction) -> bool {
        direction != Direction::Stop && direction == -self.direction
    }

    // Straight back only when nothing else is open.
    pub fn valid_directions(&self, nodes: &NodeGroup) -> Vec<Direction> {
        let back = -self.direction;
        let mut directions: Vec<Direction> = Direction::CARDINAL
            .into_iter()
            .filter(|dir| self.valid_direction(*dir, nodes) && *dir != back)
            .collect();
        if directions.is_empty() {
            directions.push(back);
        }
        directions
    }

    pub fn advance(&mut self, dt: f64) {
        self.position += self.direction.vector() * self.speed * dt;
    }

    pub fn follow_portal(&mut self, nodes: &NodeGroup) {
        if self.disable_portal {
            return;
        }
        if let Some(paired) = nodes.neighbor(self.node, Direction::Portal) {
            debug!(class = ?self.class, from = ?self.node, to = ?paired, "portal");
            self.node = paired;
            self.set_position(nodes);
        }
    }

    pub fn steering_context(&self, nodes: &NodeGroup, intent: Direction) -> SteeringContext {
        SteeringContext {
            node_position: nodes.position(self.node),
            goal: self.goal,
            intent,
        }
    }

    pub fn update(&mut self, dt: f64, nodes: &NodeGroup, rng: &mut Rng) -> bool {
        self.advance(dt);
        if !self.overshot_target(nodes) {
            return false;
        }
        self.node = self.target;
        self.follow_portal(nodes);
        let directions = self.valid_directions(nodes);
        let ctx = self.steering_context(nodes, Direction::Stop);
        let direction = self.steering.choose(&directions, &ctx, rng);
        self.target = self.new_target(direction, nodes);
        if self.target != self.node {
            self.direction = direction;
        } else {
            self.target = self.new_target(self.direction, nodes);
        }
        self.set_position(nodes);
        true
    }

    pub fn collide_check(&self, position: Vector2, collide_radius: f64) -> bool {
        collides(self.position, self.collide_radius, position, collide_radius)
    }
}
