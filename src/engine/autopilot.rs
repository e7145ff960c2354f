use crate::graph::NodeGroup;
use crate::pacman::Pacman;
use crate::rng::Rng;
use crate::types::{AgentClass, Direction};

const THINK_MIN_SECS: f64 = 0.25;
const THINK_MAX_SECS: f64 = 0.75;
const KEEP_HEADING_CHANCE: f64 = 0.6;

#[derive(Clone, Debug)]
pub(super) struct Autopilot {
    think_in: f64,
    heading: Direction,
}

impl Autopilot {
    pub fn new() -> Self {
        Self {
            think_in: 0.0,
            heading: Direction::Left,
        }
    }

    pub fn intent(
        &mut self,
        dt: f64,
        pacman: &Pacman,
        nodes: &NodeGroup,
        rng: &mut Rng,
    ) -> Direction {
        self.think_in -= dt;
        if self.think_in > 0.0 {
            return self.heading;
        }
        self.think_in = rng.range(THINK_MIN_SECS, THINK_MAX_SECS);

        // Decide for the node Pac-Man is heading into.
        let upcoming = nodes.node(pacman.entity.target);
        let open: Vec<Direction> = Direction::CARDINAL
            .into_iter()
            .filter(|dir| {
                upcoming.neighbor(*dir).is_some() && upcoming.can_access(*dir, AgentClass::Pacman)
            })
            .collect();
        if open.contains(&self.heading) && rng.bool(KEEP_HEADING_CHANCE) {
            return self.heading;
        }
        self.heading = rng.pick(&open).unwrap_or(Direction::Stop);
        self.heading
    }
}
