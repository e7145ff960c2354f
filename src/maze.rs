use tracing::debug;

use crate::error::MazeError;
use crate::graph::{NodeGroup, NodeId};
use crate::types::{AgentClass, Direction};

// `+` `P` `n` are nodes, `.` `p` `-` `|` are paths, anything else is wall.
const MAZE1_GRID: [&str; 36] = [
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "X+....+.....+XX+.....+....+X",
    "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
    "XpXXXX.XXXXX.XX.XXXXX.XXXXpX",
    "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
    "X+....+..+..+..+..+..+....+X",
    "X.XXXX.XX.XXXXXXXX.XX.XXXX.X",
    "X.XXXX.XX.XXXXXXXX.XX.XXXX.X",
    "X+....+XX+..+XX+..+XX+....+X",
    "XXXXXX.XXXXX|XX|XXXXX.XXXXXX",
    "XXXXXX.XXXXX|XX|XXXXX.XXXXXX",
    "XXXXXX.XXn--nXXn--nXX.XXXXXX",
    "XXXXXX.XX|XXXXXXXX|XX.XXXXXX",
    "XXXXXX.XX|XXXXXXXX|XX.XXXXXX",
    "n-----+--nXXXXXXXXn--+-----n",
    "XXXXXX.XX|XXXXXXXX|XX.XXXXXX",
    "XXXXXX.XX|XXXXXXXX|XX.XXXXXX",
    "XXXXXX.XXn--------nXX.XXXXXX",
    "XXXXXX.XX|XXXXXXXX|XX.XXXXXX",
    "XXXXXX.XX|XXXXXXXX|XX.XXXXXX",
    "X+....+..+..+XX+..+..+....+X",
    "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
    "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
    "XP.+XX+..+..+--+..+..+XX+.PX",
    "XXX.XX.XX.XXXXXXXX.XX.XX.XXX",
    "XXX.XX.XX.XXXXXXXX.XX.XX.XXX",
    "X+.+..+XX+..+XX+..+XX+..+.+X",
    "X.XXXXXXXXXX.XX.XXXXXXXXXX.X",
    "X.XXXXXXXXXX.XX.XXXXXXXXXX.X",
    "X+..........+..+..........+X",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
];

const MAZE2_GRID: [&str; 36] = [
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "n+....+.....+XX+.....+....+n",
    "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
    "XpXXXX.XXXXX.XX.XXXXX.XXXXpX",
    "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
    "X+....+..+..+..+..+..+....+X",
    "X.XXXX.XX.XXXXXXXX.XX.XXXX.X",
    "X.XXXX.XX.XXXXXXXX.XX.XXXX.X",
    "X+....+XX+..+XX+..+XX+....+X",
    "XXXXXX.XX|XXXXXXXX|XX.XXXXXX",
    "XXXXXX.XX|XXXXXXXX|XX.XXXXXX",
    "XXXXXX.XXnXXXXXXXXnXX.XXXXXX",
    "XXXXXX.XX|XXXXXXXX|XX.XXXXXX",
    "XXXXXX.XX|XXXXXXXX|XX.XXXXXX",
    "XXXXXX+--nXXXXXXXXn--+XXXXXX",
    "XXXXXX.XX|XXXXXXXX|XX.XXXXXX",
    "XXXXXX.XX|XXXXXXXX|XX.XXXXXX",
    "XXXXXX.XXn-n----n-nXX.XXXXXX",
    "XXXXXX.XX|X|XXXX|X|XX.XXXXXX",
    "XXXXXX.XX|X|XXXX|X|XX.XXXXXX",
    "X+....+..+.++XX++.+..+....+X",
    "X.XXXX.XXXX.XXXX.XXXX.XXXX.X",
    "X.XXXX.XXXX.XXXX.XXXX.XXXX.X",
    "nP.+XX+..+.+.--.+.+..+XX+.Pn",
    "XXX.XX.XX.XXXXXXXX.XX.XX.XXX",
    "XXX.XX.XX.XXXXXXXX.XX.XX.XXX",
    "X+.+..+XX+..+XX+..+XX+..+.+X",
    "X.XXXXXXXXXX.XX.XXXXXXXXXX.X",
    "X.XXXXXXXXXX.XX.XXXXXXXXXX.X",
    "X+..........+..+..........+X",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
];

type Tile = (f64, f64);

#[derive(Clone, Debug)]
pub struct MazeLayout {
    pub name: &'static str,
    pub grid: &'static [&'static str],
    pub portal_pairs: &'static [(Tile, Tile)],
    pub home_offset: Tile,
    pub home_connect_left: Tile,
    pub home_connect_right: Tile,
    pub pacman_start: Tile,
    pub fruit_start: Tile,
    pub ghost_deny_up: &'static [Tile],
}

static MAZES: [MazeLayout; 2] = [
    MazeLayout {
        name: "maze1",
        grid: &MAZE1_GRID,
        portal_pairs: &[((0.0, 17.0), (27.0, 17.0))],
        home_offset: (11.5, 14.0),
        home_connect_left: (12.0, 14.0),
        home_connect_right: (15.0, 14.0),
        pacman_start: (15.0, 26.0),
        fruit_start: (9.0, 20.0),
        ghost_deny_up: &[(12.0, 14.0), (15.0, 14.0), (12.0, 26.0), (15.0, 26.0)],
    },
    MazeLayout {
        name: "maze2",
        grid: &MAZE2_GRID,
        portal_pairs: &[((0.0, 4.0), (27.0, 4.0)), ((0.0, 26.0), (27.0, 26.0))],
        home_offset: (11.5, 14.0),
        home_connect_left: (9.0, 14.0),
        home_connect_right: (18.0, 14.0),
        pacman_start: (16.0, 26.0),
        fruit_start: (11.0, 20.0),
        ghost_deny_up: &[(9.0, 14.0), (18.0, 14.0), (11.0, 23.0), (16.0, 23.0)],
    },
];

impl MazeLayout {
    pub fn all() -> &'static [MazeLayout] {
        &MAZES
    }

    pub fn for_level(level: u32) -> &'static MazeLayout {
        &MAZES[level as usize % MAZES.len()]
    }

    pub fn add_offset(&self, col: f64, row: f64) -> Tile {
        (col + self.home_offset.0, row + self.home_offset.1)
    }

    pub fn spawn_tile(&self) -> Tile {
        self.add_offset(2.0, 3.0)
    }

    pub fn ghost_start_tile(&self, class: AgentClass) -> Tile {
        match class {
            AgentClass::Blinky => self.add_offset(2.0, 0.0),
            AgentClass::Inky => self.add_offset(0.0, 3.0),
            AgentClass::Clyde => self.add_offset(4.0, 3.0),
            _ => self.spawn_tile(),
        }
    }

    pub fn set_portal_pairs(&self, nodes: &mut NodeGroup) {
        for (first, second) in self.portal_pairs {
            nodes.set_portal_pair(*first, *second);
        }
    }

    pub fn connect_home_nodes(&self, nodes: &mut NodeGroup) -> Result<NodeId, MazeError> {
        let home = nodes.create_home_nodes(self.home_offset.0, self.home_offset.1)?;
        nodes.connect_home_nodes(home, self.home_connect_left, Direction::Left)?;
        nodes.connect_home_nodes(home, self.home_connect_right, Direction::Right)?;
        Ok(home)
    }

    pub fn deny_ghosts_access(&self, ghosts: &[AgentClass], nodes: &mut NodeGroup) {
        let (spawn_col, spawn_row) = self.spawn_tile();
        nodes.deny_access_list(spawn_col, spawn_row, Direction::Left, ghosts);
        nodes.deny_access_list(spawn_col, spawn_row, Direction::Right, ghosts);
        for (col, row) in self.ghost_deny_up {
            nodes.deny_access_list(*col, *row, Direction::Up, ghosts);
        }
    }

    pub fn build_nodes(&self) -> Result<NodeGroup, MazeError> {
        let mut nodes = NodeGroup::from_grid(self.grid)?;
        self.set_portal_pairs(&mut nodes);
        self.connect_home_nodes(&mut nodes)?;
        debug!(maze = self.name, nodes = nodes.len(), "maze graph built");
        Ok(nodes)
    }

    pub fn node_at(&self, nodes: &NodeGroup, tile: Tile) -> Result<NodeId, MazeError> {
        nodes.node_from_tiles(tile.0, tile.1).ok_or(MazeError::MissingNode {
            col: tile.0,
            row: tile.1,
        })
    }
}
