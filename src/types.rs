use std::ops::Neg;

use serde::Serialize;

use crate::vector::Vector2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Stop,
    Up,
    Down,
    Left,
    Right,
    Portal,
}

impl Direction {
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn code(self) -> i8 {
        match self {
            Direction::Stop => 0,
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::Left => 2,
            Direction::Right => -2,
            Direction::Portal => 3,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(Direction::Stop),
            1 => Some(Direction::Up),
            -1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            -2 => Some(Direction::Right),
            3 => Some(Direction::Portal),
            _ => None,
        }
    }

    pub fn reversed(self) -> Self {
        // Portal has no geometric inverse.
        Self::from_code(-self.code()).unwrap_or(self)
    }

    pub fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::Up | Direction::Down | Direction::Left | Direction::Right
        )
    }

    pub fn vector(self) -> Vector2 {
        match self {
            Direction::Up => Vector2::new(0.0, -1.0),
            Direction::Down => Vector2::new(0.0, 1.0),
            Direction::Left => Vector2::new(-1.0, 0.0),
            Direction::Right => Vector2::new(1.0, 0.0),
            Direction::Stop | Direction::Portal => Vector2::ZERO,
        }
    }
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Direction {
        self.reversed()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentClass {
    Pacman,
    Blinky,
    Pinky,
    Inky,
    Clyde,
    Fruit,
}

impl AgentClass {
    pub const ALL: [AgentClass; 6] = [
        AgentClass::Pacman,
        AgentClass::Blinky,
        AgentClass::Pinky,
        AgentClass::Inky,
        AgentClass::Clyde,
        AgentClass::Fruit,
    ];

    pub(crate) fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostKind {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostKind {
    pub const ALL: [GhostKind; 4] = [
        GhostKind::Blinky,
        GhostKind::Pinky,
        GhostKind::Inky,
        GhostKind::Clyde,
    ];

    pub fn class(self) -> AgentClass {
        match self {
            GhostKind::Blinky => AgentClass::Blinky,
            GhostKind::Pinky => AgentClass::Pinky,
            GhostKind::Inky => AgentClass::Inky,
            GhostKind::Clyde => AgentClass::Clyde,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Scatter,
    Chase,
    Freight,
    Spawn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PelletKind {
    Normal,
    Power,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuntimeEvent {
    LevelStarted {
        level: u32,
        maze: String,
    },
    PelletEaten {
        kind: PelletKind,
        x: f64,
        y: f64,
        points: u32,
    },
    GhostReleased {
        ghost: GhostKind,
    },
    GhostEaten {
        ghost: GhostKind,
        points: u32,
    },
    PlayerCaught {
        ghost: GhostKind,
        #[serde(rename = "livesLeft")]
        lives_left: u32,
    },
    FruitSpawned {
        x: f64,
        y: f64,
        points: u32,
    },
    FruitEaten {
        points: u32,
    },
    FruitExpired,
    LevelCleared {
        level: u32,
    },
    GameOver {
        score: u32,
        #[serde(rename = "highScore")]
        high_score: u32,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct PacmanView {
    pub x: f64,
    pub y: f64,
    pub direction: Direction,
    pub alive: bool,
    pub visible: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct GhostView {
    pub kind: GhostKind,
    pub x: f64,
    pub y: f64,
    pub direction: Direction,
    pub mode: Mode,
    pub points: u32,
    pub visible: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct FruitView {
    pub x: f64,
    pub y: f64,
    pub points: u32,
    #[serde(rename = "timeLeft")]
    pub time_left: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    #[serde(rename = "elapsedSecs")]
    pub elapsed_secs: f64,
    pub level: u32,
    pub lives: u32,
    pub score: u32,
    #[serde(rename = "highScore")]
    pub high_score: u32,
    pub paused: bool,
    #[serde(rename = "pelletsLeft")]
    pub pellets_left: usize,
    #[serde(rename = "mainMode")]
    pub main_mode: Mode,
    pub pacman: PacmanView,
    pub ghosts: Vec<GhostView>,
    pub fruit: Option<FruitView>,
    pub events: Vec<RuntimeEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_reverses_cardinal_directions() {
        assert_eq!(-Direction::Up, Direction::Down);
        assert_eq!(-Direction::Left, Direction::Right);
        assert_eq!(-Direction::Stop, Direction::Stop);
        assert_eq!(-Direction::Portal, Direction::Portal);
        for dir in Direction::CARDINAL {
            assert_eq!(dir.code(), -(-dir).code());
        }
    }

    #[test]
    fn codes_round_trip() {
        for code in [-2, -1, 0, 1, 2, 3] {
            let dir = Direction::from_code(code).expect("known code");
            assert_eq!(dir.code(), code);
        }
        assert_eq!(Direction::from_code(4), None);
    }

    #[test]
    fn agent_class_bits_are_distinct() {
        let mut seen = 0u8;
        for class in AgentClass::ALL {
            assert_eq!(seen & class.bit(), 0);
            seen |= class.bit();
        }
    }
}
