use tracing::debug;

use crate::constants::{CHASE_SECS, FREIGHT_SECS, SCATTER_SECS};
use crate::types::Mode;

#[derive(Clone, Debug)]
pub struct MainMode {
    mode: Mode,
    timer: f64,
    time: f64,
}

impl Default for MainMode {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMode {
    pub fn new() -> Self {
        Self {
            mode: Mode::Scatter,
            timer: 0.0,
            time: SCATTER_SECS,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn timer(&self) -> f64 {
        self.timer
    }

    pub fn update(&mut self, dt: f64) {
        self.timer += dt;
        if self.timer >= self.time {
            match self.mode {
                Mode::Scatter => self.chase(),
                _ => self.scatter(),
            }
        }
    }

    fn scatter(&mut self) {
        self.mode = Mode::Scatter;
        self.time = SCATTER_SECS;
        self.timer = 0.0;
        debug!("main mode -> scatter");
    }

    fn chase(&mut self) {
        self.mode = Mode::Chase;
        self.time = CHASE_SECS;
        self.timer = 0.0;
        debug!("main mode -> chase");
    }
}

#[derive(Clone, Debug)]
pub struct ModeController {
    current: Mode,
    timer: f64,
    time: Option<f64>,
}

impl ModeController {
    pub fn new(main: &MainMode) -> Self {
        Self {
            current: main.mode(),
            timer: 0.0,
            time: None,
        }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    pub fn freight_left(&self) -> Option<f64> {
        self.time.map(|time| (time - self.timer).max(0.0))
    }

    // True when the ghost goes back to normal speed and steering.
    pub fn update(&mut self, dt: f64, main: &MainMode, at_spawn: bool) -> bool {
        let mut reverted = false;
        match self.current {
            Mode::Freight => {
                self.timer += dt;
                if self.time.is_some_and(|time| self.timer >= time) {
                    self.time = None;
                    self.current = main.mode();
                    reverted = true;
                }
            }
            Mode::Scatter | Mode::Chase => self.current = main.mode(),
            Mode::Spawn => {}
        }
        if self.current == Mode::Spawn && at_spawn {
            self.current = main.mode();
            reverted = true;
        }
        reverted
    }

    pub fn set_freight_mode(&mut self) {
        match self.current {
            Mode::Scatter | Mode::Chase => {
                self.timer = 0.0;
                self.time = Some(FREIGHT_SECS);
                self.current = Mode::Freight;
            }
            Mode::Freight => self.timer = 0.0,
            Mode::Spawn => {}
        }
    }

    pub fn set_spawn_mode(&mut self) {
        if self.current == Mode::Freight {
            self.time = None;
            self.current = Mode::Spawn;
        }
    }

    pub fn reset(&mut self, main: &MainMode) {
        *self = Self::new(main);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_mode_cycles_scatter_and_chase() {
        let mut main = MainMode::new();
        // 0.25 is exact in binary, so sums land on whole seconds.
        for _ in 0..27 {
            main.update(0.25);
        }
        assert_eq!(main.mode(), Mode::Scatter);
        main.update(0.25);
        assert_eq!(main.mode(), Mode::Chase);
        assert_eq!(main.timer(), 0.0);

        for _ in 0..79 {
            main.update(0.25);
        }
        assert_eq!(main.mode(), Mode::Chase);
        main.update(0.25);
        assert_eq!(main.mode(), Mode::Scatter);

        for _ in 0..28 {
            main.update(0.25);
        }
        assert_eq!(main.mode(), Mode::Chase);
    }

    #[test]
    fn controller_tracks_main_mode_live() {
        let mut main = MainMode::new();
        let mut controller = ModeController::new(&main);
        main.update(7.0);
        assert!(!controller.update(0.0, &main, false));
        assert_eq!(controller.current(), Mode::Chase);
    }

    #[test]
    fn freight_refreshes_instead_of_stacking() {
        let main = MainMode::new();
        let mut controller = ModeController::new(&main);
        controller.set_freight_mode();
        assert!(!controller.update(3.0, &main, false));
        controller.set_freight_mode();

        for _ in 0..27 {
            assert!(!controller.update(0.25, &main, false));
            assert_eq!(controller.current(), Mode::Freight);
        }
        assert!(controller.update(0.25, &main, false));
        assert_eq!(controller.current(), Mode::Scatter);
        assert_eq!(controller.freight_left(), None);
    }

    #[test]
    fn spawn_only_follows_freight_and_ends_at_spawn_node() {
        let main = MainMode::new();
        let mut controller = ModeController::new(&main);
        controller.set_spawn_mode();
        assert_eq!(controller.current(), Mode::Scatter);

        controller.set_freight_mode();
        controller.set_spawn_mode();
        assert_eq!(controller.current(), Mode::Spawn);
        controller.set_freight_mode();
        assert_eq!(controller.current(), Mode::Spawn);

        assert!(!controller.update(30.0, &main, false));
        assert_eq!(controller.current(), Mode::Spawn);
        assert!(controller.update(0.1, &main, true));
        assert_eq!(controller.current(), Mode::Scatter);
    }
}
