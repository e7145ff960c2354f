use tracing::{debug, info};

use crate::constants::{
    CLYDE_RELEASE_PELLETS, DEATH_PAUSE_SECS, FRUIT_SPAWN_THRESHOLDS, GHOST_EATEN_PAUSE_SECS,
    INKY_RELEASE_PELLETS, LEVEL_CLEAR_PAUSE_SECS, STARTING_LIVES,
};
use crate::error::MazeError;
use crate::fruit::Fruit;
use crate::ghosts::Ghost;
use crate::maze::MazeLayout;
use crate::pacman::Pacman;
use crate::rng::Rng;
use crate::types::{Direction, GhostKind, Mode, PelletKind, RuntimeEvent, Snapshot};

mod autopilot;
mod level;
mod pause;

use self::autopilot::Autopilot;
use self::level::Level;
use self::pause::{AfterPause, Pause};

#[derive(Clone, Debug)]
pub struct GameEngineOptions {
    pub lives: u32,
    pub start_paused: bool,
    pub autopilot: bool,
    pub start_level: u32,
}

impl Default for GameEngineOptions {
    fn default() -> Self {
        Self {
            lives: STARTING_LIVES,
            start_paused: true,
            autopilot: false,
            start_level: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameEngine {
    pub seed: u32,
    pub options: GameEngineOptions,

    rng: Rng,
    templates: Vec<Level>,
    stage: Level,
    pause: Pause,
    autopilot: Autopilot,
    events: Vec<RuntimeEvent>,

    level: u32,
    lives: u32,
    score: u32,
    high_score: u32,
    tick_counter: u64,
    elapsed_secs: f64,
}

impl GameEngine {
    pub fn new(seed: u32, options: GameEngineOptions) -> Result<Self, MazeError> {
        let templates = MazeLayout::all()
            .iter()
            .map(Level::load)
            .collect::<Result<Vec<_>, _>>()?;
        let level = options.start_level;
        let stage = templates[level as usize % templates.len()].clone();
        let mut engine = Self {
            seed,
            rng: Rng::new(seed),
            templates,
            stage,
            pause: Pause::new(options.start_paused),
            autopilot: Autopilot::new(),
            events: Vec::new(),
            level,
            lives: options.lives,
            score: 0,
            high_score: 0,
            tick_counter: 0,
            elapsed_secs: 0.0,
            options,
        };
        engine.announce_level();
        Ok(engine)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_paused(&self) -> bool {
        self.pause.paused
    }

    pub fn maze_name(&self) -> &'static str {
        self.stage.layout.name
    }

    pub fn pellets_left(&self) -> usize {
        self.stage.pellets.len()
    }

    pub fn main_mode(&self) -> Mode {
        self.stage.ghosts.main_mode().mode()
    }

    pub fn pacman(&self) -> &Pacman {
        &self.stage.pacman
    }

    pub fn ghost(&self, kind: GhostKind) -> &Ghost {
        self.stage.ghosts.get(kind)
    }

    pub fn fruit(&self) -> Option<&Fruit> {
        self.stage.fruit.as_ref()
    }

    pub fn toggle_pause(&mut self) {
        if !self.stage.pacman.alive || self.pause.is_timed() {
            return;
        }
        self.pause.toggle();
        if !self.pause.paused {
            self.show_entities();
        }
    }

    pub fn step(&mut self, dt: f64, intent: Direction) {
        self.tick_counter += 1;
        self.elapsed_secs += dt;
        let intent = if self.options.autopilot {
            self.autopilot
                .intent(dt, &self.stage.pacman, &self.stage.nodes, &mut self.rng)
        } else {
            intent
        };

        self.stage.pellets.update(dt);
        if !self.pause.paused {
            let pacman_position = self.stage.pacman.entity.position;
            let pacman_direction = self.stage.pacman.entity.direction;
            self.stage.ghosts.update(
                dt,
                pacman_position,
                pacman_direction,
                &mut self.stage.nodes,
                &mut self.rng,
            );
            if let Some(fruit) = self.stage.fruit.as_mut() {
                fruit.update(dt);
            }
            self.check_pellet_events();
            if !self.pause.paused {
                self.check_ghost_events();
            }
            self.check_fruit_events();
        }
        if self.stage.pacman.alive && !self.pause.paused {
            self.stage
                .pacman
                .update(dt, &self.stage.nodes, intent, &mut self.rng);
        }
        if let Some(action) = self.pause.update(dt) {
            self.run_after_pause(action);
        }
    }

    pub fn build_snapshot(&mut self, include_events: bool) -> Snapshot {
        let snapshot = Snapshot {
            tick: self.tick_counter,
            elapsed_secs: self.elapsed_secs,
            level: self.level,
            lives: self.lives,
            score: self.score,
            high_score: self.high_score,
            paused: self.pause.paused,
            pellets_left: self.stage.pellets.len(),
            main_mode: self.main_mode(),
            pacman: self.stage.pacman.view(),
            ghosts: self.stage.ghosts.iter().map(Ghost::view).collect(),
            fruit: self.stage.fruit.as_ref().map(Fruit::view),
            events: if include_events {
                self.events.clone()
            } else {
                Vec::new()
            },
        };
        if include_events {
            self.events.clear();
        }
        snapshot
    }

    fn announce_level(&mut self) {
        info!(level = self.level, maze = self.stage.layout.name, "level started");
        self.events.push(RuntimeEvent::LevelStarted {
            level: self.level,
            maze: self.stage.layout.name.to_string(),
        });
    }

    fn load_stage(&mut self) {
        self.stage = self.templates[self.level as usize % self.templates.len()].clone();
        self.pause.paused = self.options.start_paused;
        self.announce_level();
    }

    fn check_pellet_events(&mut self) {
        let Some(index) = self.stage.pacman.eat_pellets(&self.stage.pellets) else {
            return;
        };
        let Some(pellet) = self.stage.pellets.eat(index) else {
            return;
        };
        self.update_score(pellet.points);
        self.events.push(RuntimeEvent::PelletEaten {
            kind: pellet.kind,
            x: pellet.position.x,
            y: pellet.position.y,
            points: pellet.points,
        });

        let eaten = self.stage.pellets.num_eaten;
        if eaten == INKY_RELEASE_PELLETS {
            self.release_ghost(GhostKind::Inky);
        }
        if eaten == CLYDE_RELEASE_PELLETS {
            self.release_ghost(GhostKind::Clyde);
        }
        if FRUIT_SPAWN_THRESHOLDS.contains(&eaten) && self.stage.fruit.is_none() {
            self.spawn_fruit();
        }
        if pellet.kind == PelletKind::Power {
            debug!("power pellet eaten");
            self.stage.ghosts.start_freight();
        }
        if self.stage.pellets.is_empty() {
            info!(level = self.level, score = self.score, "level cleared");
            self.events
                .push(RuntimeEvent::LevelCleared { level: self.level });
            self.hide_entities();
            self.pause
                .set_timed(LEVEL_CLEAR_PAUSE_SECS, AfterPause::NextLevel);
        }
    }

    fn check_ghost_events(&mut self) {
        for kind in GhostKind::ALL {
            let ghost = self.stage.ghosts.get(kind);
            let hit = self.stage.pacman.collide_ghost(ghost);
            let mode = ghost.mode.current();
            if !hit {
                continue;
            }
            match mode {
                Mode::Freight => {
                    self.eat_ghost(kind);
                    return;
                }
                Mode::Spawn => {}
                Mode::Scatter | Mode::Chase => {
                    if self.stage.pacman.alive {
                        self.catch_pacman(kind);
                        return;
                    }
                }
            }
        }
    }

    fn check_fruit_events(&mut self) {
        let (eaten, expired, points) = match &self.stage.fruit {
            Some(fruit) => (
                self.stage.pacman.collide_check(&fruit.entity),
                fruit.destroy,
                fruit.points,
            ),
            None => return,
        };
        if eaten {
            self.update_score(points);
            self.events.push(RuntimeEvent::FruitEaten { points });
            self.stage.fruit = None;
        } else if expired {
            self.events.push(RuntimeEvent::FruitExpired);
            self.stage.fruit = None;
        }
    }

    fn release_ghost(&mut self, kind: GhostKind) {
        self.stage.release(kind);
        debug!(ghost = ?kind, "ghost released");
        self.events.push(RuntimeEvent::GhostReleased { ghost: kind });
    }

    fn spawn_fruit(&mut self) {
        let fruit = Fruit::new(self.stage.fruit_node, self.level, &self.stage.nodes);
        self.events.push(RuntimeEvent::FruitSpawned {
            x: fruit.entity.position.x,
            y: fruit.entity.position.y,
            points: fruit.points,
        });
        self.stage.fruit = Some(fruit);
    }

    fn eat_ghost(&mut self, kind: GhostKind) {
        let points = self.stage.ghosts.get(kind).points;
        self.update_score(points);
        self.events.push(RuntimeEvent::GhostEaten {
            ghost: kind,
            points,
        });
        self.stage.pacman.entity.visible = false;
        self.stage.ghosts.get_mut(kind).entity.visible = false;
        self.stage.ghosts.update_points();
        self.pause
            .set_timed(GHOST_EATEN_PAUSE_SECS, AfterPause::ShowEntities);
        self.stage
            .ghosts
            .get_mut(kind)
            .start_spawn(&mut self.stage.nodes);
    }

    fn catch_pacman(&mut self, kind: GhostKind) {
        self.lives = self.lives.saturating_sub(1);
        self.stage.pacman.die();
        self.stage.ghosts.hide();
        info!(ghost = ?kind, lives = self.lives, "pacman caught");
        self.events.push(RuntimeEvent::PlayerCaught {
            ghost: kind,
            lives_left: self.lives,
        });
        if self.lives == 0 {
            self.high_score = self.high_score.max(self.score);
            info!(score = self.score, high_score = self.high_score, "game over");
            self.events.push(RuntimeEvent::GameOver {
                score: self.score,
                high_score: self.high_score,
            });
            self.pause.set_timed(DEATH_PAUSE_SECS, AfterPause::RestartGame);
        } else {
            self.pause.set_timed(DEATH_PAUSE_SECS, AfterPause::ResetLevel);
        }
    }

    fn run_after_pause(&mut self, action: AfterPause) {
        match action {
            AfterPause::ShowEntities => self.show_entities(),
            AfterPause::ResetLevel => self.reset_level(),
            AfterPause::RestartGame => self.restart_game(),
            AfterPause::NextLevel => self.next_level(),
        }
    }

    fn next_level(&mut self) {
        self.level += 1;
        self.load_stage();
    }

    fn restart_game(&mut self) {
        self.lives = self.options.lives;
        self.level = self.options.start_level;
        self.score = 0;
        self.load_stage();
    }

    fn reset_level(&mut self) {
        self.pause.paused = self.options.start_paused;
        self.stage.pacman.reset(&self.stage.nodes);
        self.stage.ghosts.reset(&mut self.stage.nodes);
        self.stage.fruit = None;
    }

    fn show_entities(&mut self) {
        self.stage.pacman.entity.visible = true;
        self.stage.ghosts.show();
    }

    fn hide_entities(&mut self) {
        self.stage.pacman.entity.visible = false;
        self.stage.ghosts.hide();
    }

    fn update_score(&mut self, points: u32) {
        self.score += points;
    }
}
