use crate::entity::{collides, Entity, Steering};
use crate::ghosts::Ghost;
use crate::graph::{NodeGroup, NodeId};
use crate::pellets::PelletGroup;
use crate::rng::Rng;
use crate::types::{AgentClass, Direction, PacmanView};

#[derive(Clone, Debug)]
pub struct Pacman {
    pub entity: Entity,
    pub alive: bool,
}

impl Pacman {
    pub fn new(node: NodeId, nodes: &NodeGroup) -> Self {
        let mut entity = Entity::new(AgentClass::Pacman, node, nodes);
        entity.steering = Steering::External;
        entity.direction = Direction::Left;
        entity.set_between_nodes(Direction::Left, nodes);
        Self {
            entity,
            alive: true,
        }
    }

    pub fn reset(&mut self, nodes: &NodeGroup) {
        self.entity.reset(nodes);
        self.entity.direction = Direction::Left;
        self.entity.set_between_nodes(Direction::Left, nodes);
        self.alive = true;
    }

    pub fn die(&mut self) {
        self.alive = false;
        self.entity.direction = Direction::Stop;
    }

    pub fn update(&mut self, dt: f64, nodes: &NodeGroup, intent: Direction, rng: &mut Rng) {
        let entity = &mut self.entity;
        entity.advance(dt);
        if !entity.overshot_target(nodes) {
            // Reversing is the one turn allowed between nodes.
            if entity.is_opposite(intent) {
                entity.reverse_direction();
            }
            return;
        }
        entity.node = entity.target;
        entity.follow_portal(nodes);
        let ctx = entity.steering_context(nodes, intent);
        let direction = entity.steering.choose(&Direction::CARDINAL, &ctx, rng);
        entity.target = entity.new_target(direction, nodes);
        if entity.target != entity.node {
            entity.direction = direction;
        } else {
            entity.target = entity.new_target(entity.direction, nodes);
        }
        if entity.target == entity.node {
            entity.direction = Direction::Stop;
        }
        entity.set_position(nodes);
    }

    pub fn eat_pellets(&self, pellets: &PelletGroup) -> Option<usize> {
        pellets.find_colliding(self.entity.position, self.entity.collide_radius)
    }

    pub fn collide_ghost(&self, ghost: &Ghost) -> bool {
        self.collide_check(&ghost.entity)
    }

    pub fn collide_check(&self, other: &Entity) -> bool {
        collides(
            self.entity.position,
            self.entity.collide_radius,
            other.position,
            other.collide_radius,
        )
    }

    pub fn view(&self) -> PacmanView {
        PacmanView {
            x: self.entity.position.x,
            y: self.entity.position.y,
            direction: self.entity.direction,
            alive: self.alive,
            visible: self.entity.visible,
        }
    }
}
