use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::constants::tile_to_pixel_key;
use crate::error::MazeError;
use crate::types::{AgentClass, Direction};
use crate::vector::Vector2;

pub const NODE_SYMBOLS: [char; 3] = ['+', 'P', 'n'];
pub const PATH_SYMBOLS: [char; 4] = ['.', '-', '|', 'p'];

const HOME_TEMPLATE: [&str; 5] = ["XX+XX", "XX.XX", "+X.X+", "+.+.+", "+XXX+"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessSet(u8);

impl AccessSet {
    pub fn all() -> Self {
        Self(
            AgentClass::ALL
                .iter()
                .fold(0, |bits, class| bits | class.bit()),
        )
    }

    pub fn contains(self, class: AgentClass) -> bool {
        self.0 & class.bit() != 0
    }

    pub fn insert(&mut self, class: AgentClass) {
        self.0 |= class.bit();
    }

    pub fn remove(&mut self, class: AgentClass) {
        self.0 &= !class.bit();
    }
}

impl Default for AccessSet {
    fn default() -> Self {
        Self::all()
    }
}

fn neighbor_slot(direction: Direction) -> Option<usize> {
    match direction {
        Direction::Up => Some(0),
        Direction::Down => Some(1),
        Direction::Left => Some(2),
        Direction::Right => Some(3),
        Direction::Portal => Some(4),
        Direction::Stop => None,
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub position: Vector2,
    key: (i32, i32),
    neighbors: [Option<NodeId>; 5],
    access: [AccessSet; 4],
}

impl Node {
    fn new(key: (i32, i32)) -> Self {
        Self {
            position: Vector2::new(key.0 as f64, key.1 as f64),
            key,
            neighbors: [None; 5],
            access: [AccessSet::all(); 4],
        }
    }

    pub fn key(&self) -> (i32, i32) {
        self.key
    }

    pub fn neighbor(&self, direction: Direction) -> Option<NodeId> {
        neighbor_slot(direction).and_then(|slot| self.neighbors[slot])
    }

    fn set_neighbor(&mut self, direction: Direction, node: NodeId) {
        if let Some(slot) = neighbor_slot(direction) {
            self.neighbors[slot] = Some(node);
        }
    }

    // Portal links carry no access list.
    pub fn can_access(&self, direction: Direction, class: AgentClass) -> bool {
        match direction {
            Direction::Portal => true,
            Direction::Stop => false,
            _ => neighbor_slot(direction)
                .map(|slot| self.access[slot].contains(class))
                .unwrap_or(false),
        }
    }

    pub fn deny_access(&mut self, direction: Direction, class: AgentClass) {
        if let Some(set) = self.access_mut(direction) {
            set.remove(class);
        }
    }

    pub fn allow_access(&mut self, direction: Direction, class: AgentClass) {
        if let Some(set) = self.access_mut(direction) {
            set.insert(class);
        }
    }

    fn access_mut(&mut self, direction: Direction) -> Option<&mut AccessSet> {
        if !direction.is_cardinal() {
            return None;
        }
        neighbor_slot(direction).map(|slot| &mut self.access[slot])
    }
}

#[derive(Clone, Debug, Default)]
pub struct NodeGroup {
    nodes: Vec<Node>,
    lut: HashMap<(i32, i32), NodeId>,
    home: Option<NodeId>,
}

impl NodeGroup {
    pub fn from_grid<S: AsRef<str>>(rows: &[S]) -> Result<Self, MazeError> {
        let data = parse_grid(rows)?;
        let mut group = Self::default();
        group.create_node_table(&data, 0.0, 0.0);
        group.connect_horizontally(&data, 0.0, 0.0);
        group.connect_vertically(&data, 0.0, 0.0);
        Ok(group)
    }

    fn create_node_table(&mut self, data: &[Vec<char>], xoffset: f64, yoffset: f64) {
        for (row, line) in data.iter().enumerate() {
            for (col, symbol) in line.iter().enumerate() {
                if NODE_SYMBOLS.contains(symbol) {
                    let key = tile_to_pixel_key(col as f64 + xoffset, row as f64 + yoffset);
                    self.insert_node(key);
                }
            }
        }
    }

    fn insert_node(&mut self, key: (i32, i32)) -> NodeId {
        if let Some(id) = self.lut.get(&key) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(key));
        self.lut.insert(key, id);
        id
    }

    fn connect_horizontally(&mut self, data: &[Vec<char>], xoffset: f64, yoffset: f64) {
        for (row, line) in data.iter().enumerate() {
            let mut previous: Option<NodeId> = None;
            for (col, symbol) in line.iter().enumerate() {
                if NODE_SYMBOLS.contains(symbol) {
                    let current = self.node_from_tiles(col as f64 + xoffset, row as f64 + yoffset);
                    if let (Some(left), Some(right)) = (previous, current) {
                        self.connect(left, right, Direction::Right);
                    }
                    previous = current;
                } else if !PATH_SYMBOLS.contains(symbol) {
                    previous = None;
                }
            }
        }
    }

    fn connect_vertically(&mut self, data: &[Vec<char>], xoffset: f64, yoffset: f64) {
        let width = data.first().map(Vec::len).unwrap_or(0);
        for col in 0..width {
            let mut previous: Option<NodeId> = None;
            for (row, line) in data.iter().enumerate() {
                let symbol = line[col];
                if NODE_SYMBOLS.contains(&symbol) {
                    let current = self.node_from_tiles(col as f64 + xoffset, row as f64 + yoffset);
                    if let (Some(upper), Some(lower)) = (previous, current) {
                        self.connect(upper, lower, Direction::Down);
                    }
                    previous = current;
                } else if !PATH_SYMBOLS.contains(&symbol) {
                    previous = None;
                }
            }
        }
    }

    pub fn connect(&mut self, a: NodeId, b: NodeId, direction: Direction) {
        if direction == Direction::Stop {
            return;
        }
        self.nodes[a.0].set_neighbor(direction, b);
        self.nodes[b.0].set_neighbor(direction.reversed(), a);
    }

    pub fn set_portal_pair(&mut self, first: (f64, f64), second: (f64, f64)) {
        match (
            self.node_from_tiles(first.0, first.1),
            self.node_from_tiles(second.0, second.1),
        ) {
            (Some(a), Some(b)) => self.connect(a, b, Direction::Portal),
            _ => debug!(?first, ?second, "portal pair skipped, tile is not a node"),
        }
    }

    pub fn create_home_nodes(&mut self, xoffset: f64, yoffset: f64) -> Result<NodeId, MazeError> {
        let data = parse_grid(&HOME_TEMPLATE)?;
        self.create_node_table(&data, xoffset, yoffset);
        self.connect_horizontally(&data, xoffset, yoffset);
        self.connect_vertically(&data, xoffset, yoffset);
        let home = self
            .node_from_tiles(xoffset + 2.0, yoffset)
            .ok_or(MazeError::MissingNode {
                col: xoffset + 2.0,
                row: yoffset,
            })?;
        self.home = Some(home);
        Ok(home)
    }

    pub fn connect_home_nodes(
        &mut self,
        home: NodeId,
        other: (f64, f64),
        direction: Direction,
    ) -> Result<(), MazeError> {
        let other = self
            .node_from_tiles(other.0, other.1)
            .ok_or(MazeError::MissingNode {
                col: other.0,
                row: other.1,
            })?;
        self.connect(home, other, direction);
        Ok(())
    }

    pub fn node_from_pixels(&self, x: i32, y: i32) -> Option<NodeId> {
        self.lut.get(&(x, y)).copied()
    }

    pub fn node_from_tiles(&self, col: f64, row: f64) -> Option<NodeId> {
        let (x, y) = tile_to_pixel_key(col, row);
        self.node_from_pixels(x, y)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn position(&self, id: NodeId) -> Vector2 {
        self.nodes[id.0].position
    }

    pub fn neighbor(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        self.nodes[id.0].neighbor(direction)
    }

    pub fn home(&self) -> Option<NodeId> {
        self.home
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx), node))
    }

    pub fn deny_access(&mut self, col: f64, row: f64, direction: Direction, class: AgentClass) {
        if let Some(id) = self.node_from_tiles(col, row) {
            self.nodes[id.0].deny_access(direction, class);
        }
    }

    pub fn allow_access(&mut self, col: f64, row: f64, direction: Direction, class: AgentClass) {
        if let Some(id) = self.node_from_tiles(col, row) {
            self.nodes[id.0].allow_access(direction, class);
        }
    }

    pub fn deny_access_list(
        &mut self,
        col: f64,
        row: f64,
        direction: Direction,
        classes: &[AgentClass],
    ) {
        for class in classes {
            self.deny_access(col, row, direction, *class);
        }
    }

    pub fn deny_home_access(&mut self, class: AgentClass) -> Result<(), MazeError> {
        let home = self.home.ok_or(MazeError::MissingHome)?;
        self.nodes[home.0].deny_access(Direction::Down, class);
        Ok(())
    }

    pub fn allow_home_access(&mut self, class: AgentClass) -> Result<(), MazeError> {
        let home = self.home.ok_or(MazeError::MissingHome)?;
        self.nodes[home.0].allow_access(Direction::Down, class);
        Ok(())
    }

    pub fn deny_home_access_list(&mut self, classes: &[AgentClass]) -> Result<(), MazeError> {
        for class in classes {
            self.deny_home_access(*class)?;
        }
        Ok(())
    }
}

pub(crate) fn parse_grid<S: AsRef<str>>(rows: &[S]) -> Result<Vec<Vec<char>>, MazeError> {
    let data: Vec<Vec<char>> = rows
        .iter()
        .map(|row| row.as_ref().chars().filter(|c| !c.is_whitespace()).collect())
        .collect();
    let expected = data.first().map(Vec::len).ok_or(MazeError::EmptyGrid)?;
    if expected == 0 {
        return Err(MazeError::EmptyGrid);
    }
    for (row, line) in data.iter().enumerate() {
        if line.len() != expected {
            return Err(MazeError::NonRectangular {
                row,
                expected,
                found: line.len(),
            });
        }
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::MazeLayout;

    fn square() -> NodeGroup {
        NodeGroup::from_grid(&["+..+", ".XX.", "+..+"]).expect("valid grid")
    }

    fn assert_links_are_mutual(group: &NodeGroup) {
        for (id, node) in group.iter() {
            for dir in Direction::CARDINAL {
                if let Some(other) = node.neighbor(dir) {
                    assert_eq!(
                        group.neighbor(other, dir.reversed()),
                        Some(id),
                        "link {:?} from {:?} is one-way",
                        dir,
                        node.key()
                    );
                }
            }
        }
    }

    #[test]
    fn grid_scan_links_nodes_through_path_tiles() {
        let group = square();
        assert_eq!(group.len(), 4);
        let top_left = group.node_from_tiles(0.0, 0.0).expect("node");
        let top_right = group.node_from_tiles(3.0, 0.0).expect("node");
        let bottom_left = group.node_from_tiles(0.0, 2.0).expect("node");
        assert_eq!(group.neighbor(top_left, Direction::Right), Some(top_right));
        assert_eq!(group.neighbor(top_left, Direction::Down), Some(bottom_left));
        assert_eq!(group.neighbor(top_left, Direction::Up), None);
        assert_eq!(group.position(top_right), Vector2::new(48.0, 0.0));
        assert_links_are_mutual(&group);
    }

    #[test]
    fn unknown_symbol_breaks_a_run() {
        let group = NodeGroup::from_grid(&["+.X.+"]).expect("valid grid");
        let left = group.node_from_tiles(0.0, 0.0).expect("node");
        assert_eq!(group.neighbor(left, Direction::Right), None);
    }

    #[test]
    fn ragged_grid_is_rejected() {
        let err = NodeGroup::from_grid(&["+..+", "+."]).expect_err("ragged");
        assert_eq!(
            err,
            MazeError::NonRectangular {
                row: 1,
                expected: 4,
                found: 2
            }
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            NodeGroup::from_grid(&empty).expect_err("empty"),
            MazeError::EmptyGrid
        );
    }

    #[test]
    fn portal_pair_with_unknown_tile_is_ignored() {
        let mut group = square();
        group.set_portal_pair((0.0, 0.0), (9.0, 9.0));
        let top_left = group.node_from_tiles(0.0, 0.0).expect("node");
        assert_eq!(group.neighbor(top_left, Direction::Portal), None);

        group.set_portal_pair((0.0, 0.0), (3.0, 2.0));
        let bottom_right = group.node_from_tiles(3.0, 2.0).expect("node");
        assert_eq!(group.neighbor(top_left, Direction::Portal), Some(bottom_right));
        assert_eq!(group.neighbor(bottom_right, Direction::Portal), Some(top_left));
    }

    #[test]
    fn lookups_miss_without_failing() {
        let group = square();
        assert_eq!(group.node_from_tiles(1.0, 0.0), None);
        assert_eq!(group.node_from_pixels(5, 5), None);
        assert_eq!(group.node_from_pixels(48, 32), group.node_from_tiles(3.0, 2.0));
    }

    #[test]
    fn access_changes_are_idempotent() {
        let mut group = square();
        let id = group.node_from_tiles(0.0, 0.0).expect("node");
        group.deny_access(0.0, 0.0, Direction::Right, AgentClass::Blinky);
        group.deny_access(0.0, 0.0, Direction::Right, AgentClass::Blinky);
        assert!(!group.node(id).can_access(Direction::Right, AgentClass::Blinky));
        assert!(group.node(id).can_access(Direction::Right, AgentClass::Pacman));
        group.allow_access(0.0, 0.0, Direction::Right, AgentClass::Blinky);
        group.allow_access(0.0, 0.0, Direction::Right, AgentClass::Blinky);
        assert!(group.node(id).can_access(Direction::Right, AgentClass::Blinky));
        assert!(group.node(id).can_access(Direction::Portal, AgentClass::Blinky));
        assert!(!group.node(id).can_access(Direction::Stop, AgentClass::Blinky));
    }

    #[test]
    fn home_template_is_grafted_at_half_tile_offset() {
        let mut group = square();
        let home = group.create_home_nodes(11.5, 14.0).expect("home");
        assert_eq!(group.node(home).key(), (216, 224));
        let spawn = group.node_from_tiles(13.5, 17.0).expect("spawn node");
        assert_eq!(group.neighbor(home, Direction::Down), Some(spawn));
        let left = group.node_from_tiles(11.5, 17.0).expect("left bay");
        assert_eq!(group.neighbor(spawn, Direction::Left), Some(left));
        assert_eq!(group.len(), 4 + 8);
        assert_links_are_mutual(&group);
    }

    #[test]
    fn home_access_requires_home_nodes() {
        let mut group = square();
        assert_eq!(
            group.deny_home_access(AgentClass::Pacman),
            Err(MazeError::MissingHome)
        );
        let home = group.create_home_nodes(0.0, 4.0).expect("home");
        group
            .deny_home_access_list(&[AgentClass::Pacman, AgentClass::Inky])
            .expect("home exists");
        assert!(!group.node(home).can_access(Direction::Down, AgentClass::Inky));
        group
            .allow_home_access(AgentClass::Inky)
            .expect("home exists");
        assert!(group.node(home).can_access(Direction::Down, AgentClass::Inky));
        assert!(!group.node(home).can_access(Direction::Down, AgentClass::Pacman));
    }

    #[test]
    fn full_mazes_keep_links_mutual() {
        for level in 0..2 {
            let layout = MazeLayout::for_level(level);
            let mut group = NodeGroup::from_grid(layout.grid).expect("maze grid");
            layout.set_portal_pairs(&mut group);
            layout.connect_home_nodes(&mut group).expect("home wiring");
            assert_links_are_mutual(&group);
        }
    }

    #[test]
    fn handed_out_ids_always_resolve() {
        let layout = MazeLayout::for_level(1);
        let group = layout.build_nodes().expect("maze builds");
        for (id, node) in group.iter() {
            assert!(id.0 < group.len());
            assert_eq!(group.node_from_pixels(node.key().0, node.key().1), Some(id));
            for dir in [
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right,
                Direction::Portal,
            ] {
                if let Some(other) = node.neighbor(dir) {
                    assert_eq!(group.position(other), group.node(other).position);
                }
            }
        }
    }
}
