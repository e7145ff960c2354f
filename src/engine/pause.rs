#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum AfterPause {
    ShowEntities,
    ResetLevel,
    RestartGame,
    NextLevel,
}

#[derive(Clone, Debug)]
pub(super) struct Pause {
    pub paused: bool,
    timer: f64,
    pause_time: Option<f64>,
    action: Option<AfterPause>,
}

impl Pause {
    pub fn new(paused: bool) -> Self {
        Self {
            paused,
            timer: 0.0,
            pause_time: None,
            action: None,
        }
    }

    pub fn update(&mut self, dt: f64) -> Option<AfterPause> {
        let pause_time = self.pause_time?;
        self.timer += dt;
        if self.timer < pause_time {
            return None;
        }
        self.timer = 0.0;
        self.paused = false;
        self.pause_time = None;
        self.action.take()
    }

    pub fn set_timed(&mut self, pause_time: f64, action: AfterPause) {
        self.timer = 0.0;
        self.pause_time = Some(pause_time);
        self.action = Some(action);
        self.paused = true;
    }

    pub fn toggle(&mut self) {
        self.timer = 0.0;
        self.pause_time = None;
        self.action = None;
        self.paused = !self.paused;
    }

    pub fn is_timed(&self) -> bool {
        self.pause_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_pause_fires_once() {
        let mut pause = Pause::new(false);
        pause.set_timed(1.0, AfterPause::ShowEntities);
        assert!(pause.paused);
        assert_eq!(pause.update(0.5), None);
        assert_eq!(pause.update(0.5), Some(AfterPause::ShowEntities));
        assert!(!pause.paused);
        assert_eq!(pause.update(5.0), None);
    }

    #[test]
    fn toggle_never_expires() {
        let mut pause = Pause::new(true);
        pause.toggle();
        assert!(!pause.paused);
        pause.toggle();
        assert!(pause.paused);
        assert!(!pause.is_timed());
        assert_eq!(pause.update(100.0), None);
        assert!(pause.paused);
    }
}
