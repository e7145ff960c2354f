use tracing::debug;

use crate::error::MazeError;
use crate::fruit::Fruit;
use crate::ghosts::GhostGroup;
use crate::graph::{NodeGroup, NodeId};
use crate::maze::MazeLayout;
use crate::pacman::Pacman;
use crate::pellets::PelletGroup;
use crate::types::{AgentClass, Direction, GhostKind};

#[derive(Clone, Debug)]
pub(super) struct Level {
    pub layout: &'static MazeLayout,
    pub nodes: NodeGroup,
    pub pellets: PelletGroup,
    pub pacman: Pacman,
    pub ghosts: GhostGroup,
    pub fruit: Option<Fruit>,
    pub fruit_node: NodeId,
}

impl Level {
    pub fn load(layout: &'static MazeLayout) -> Result<Self, MazeError> {
        let mut nodes = layout.build_nodes()?;
        let pellets = PelletGroup::from_grid(layout.grid)?;
        let home = nodes.home().ok_or(MazeError::MissingHome)?;

        let pacman = Pacman::new(layout.node_at(&nodes, layout.pacman_start)?, &nodes);
        let spawn = layout.node_at(&nodes, layout.spawn_tile())?;
        let mut ghosts = GhostGroup::new(spawn, home, &nodes);
        for kind in GhostKind::ALL {
            let start = layout.node_at(&nodes, layout.ghost_start_tile(kind.class()))?;
            ghosts.get_mut(kind).entity.set_start_node(start, &nodes);
        }
        ghosts.set_spawn_node(spawn);

        let ghost_classes: Vec<AgentClass> = GhostKind::ALL.iter().map(|k| k.class()).collect();
        nodes.deny_home_access(AgentClass::Pacman)?;
        nodes.deny_home_access_list(&ghost_classes)?;
        let inky_start = ghosts.get(GhostKind::Inky).entity.start_node;
        nodes
            .node_mut(inky_start)
            .deny_access(Direction::Right, AgentClass::Inky);
        let clyde_start = ghosts.get(GhostKind::Clyde).entity.start_node;
        nodes
            .node_mut(clyde_start)
            .deny_access(Direction::Left, AgentClass::Clyde);
        layout.deny_ghosts_access(&ghost_classes, &mut nodes);

        let fruit_node = layout.node_at(&nodes, layout.fruit_start)?;
        debug!(maze = layout.name, pellets = pellets.len(), "level loaded");
        Ok(Self {
            layout,
            nodes,
            pellets,
            pacman,
            ghosts,
            fruit: None,
            fruit_node,
        })
    }

    pub fn release_direction(kind: GhostKind) -> Option<Direction> {
        match kind {
            GhostKind::Inky => Some(Direction::Right),
            GhostKind::Clyde => Some(Direction::Left),
            GhostKind::Blinky | GhostKind::Pinky => None,
        }
    }

    pub fn release(&mut self, kind: GhostKind) {
        let Some(direction) = Self::release_direction(kind) else {
            return;
        };
        let start = self.ghosts.get(kind).entity.start_node;
        self.nodes
            .node_mut(start)
            .allow_access(direction, kind.class());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mode;

    #[test]
    fn both_mazes_load() {
        for layout in MazeLayout::all() {
            let level = Level::load(layout).expect("level loads");
            assert_eq!(level.pellets.len(), 244);
            assert!(level.fruit.is_none());
            for ghost in level.ghosts.iter() {
                assert_eq!(ghost.mode.current(), Mode::Scatter);
                assert_eq!(ghost.entity.node, ghost.entity.start_node);
            }
        }
    }

    #[test]
    fn home_is_closed_to_everyone_going_down() {
        let level = Level::load(MazeLayout::for_level(0)).expect("level loads");
        let home = level.nodes.home().expect("home");
        for class in AgentClass::ALL.iter().filter(|c| **c != AgentClass::Fruit) {
            assert!(!level.nodes.node(home).can_access(Direction::Down, *class));
        }
    }

    #[test]
    fn inky_is_held_until_released() {
        let mut level = Level::load(MazeLayout::for_level(0)).expect("level loads");
        let start = level.ghosts.get(GhostKind::Inky).entity.start_node;
        assert!(!level
            .nodes
            .node(start)
            .can_access(Direction::Right, AgentClass::Inky));
        level.release(GhostKind::Inky);
        assert!(level
            .nodes
            .node(start)
            .can_access(Direction::Right, AgentClass::Inky));
        level.release(GhostKind::Blinky);
    }
}
