use crate::constants::{fruit_points, FRUIT_LIFESPAN_SECS};
use crate::entity::Entity;
use crate::graph::{NodeGroup, NodeId};
use crate::types::{AgentClass, Direction, FruitView};

#[derive(Clone, Debug)]
pub struct Fruit {
    pub entity: Entity,
    pub points: u32,
    pub destroy: bool,
    timer: f64,
}

impl Fruit {
    pub fn new(node: NodeId, level: u32, nodes: &NodeGroup) -> Self {
        let mut entity = Entity::new(AgentClass::Fruit, node, nodes);
        entity.set_between_nodes(Direction::Right, nodes);
        Self {
            entity,
            points: fruit_points(level),
            destroy: false,
            timer: 0.0,
        }
    }

    pub fn update(&mut self, dt: f64) {
        self.timer += dt;
        if self.timer >= FRUIT_LIFESPAN_SECS {
            self.destroy = true;
        }
    }

    pub fn time_left(&self) -> f64 {
        (FRUIT_LIFESPAN_SECS - self.timer).max(0.0)
    }

    pub fn view(&self) -> FruitView {
        FruitView {
            x: self.entity.position.x,
            y: self.entity.position.y,
            points: self.points,
            time_left: self.time_left(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2;

    #[test]
    fn fruit_sits_between_nodes_and_expires() {
        let nodes = NodeGroup::from_grid(&["+.+"]).expect("grid");
        let node = nodes.node_from_tiles(0.0, 0.0).expect("node");
        let mut fruit = Fruit::new(node, 2, &nodes);
        assert_eq!(fruit.points, 140);
        assert_eq!(fruit.entity.position, Vector2::new(16.0, 0.0));

        fruit.update(4.5);
        assert!(!fruit.destroy);
        assert_eq!(fruit.time_left(), 0.5);
        fruit.update(0.5);
        assert!(fruit.destroy);
        assert_eq!(fruit.view().time_left, 0.0);
    }
}
