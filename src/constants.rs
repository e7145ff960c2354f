pub const TILE_WIDTH: i32 = 16;
pub const TILE_HEIGHT: i32 = 16;
pub const NROWS: i32 = 36;
pub const NCOLS: i32 = 28;
pub const SCREEN_WIDTH: i32 = NCOLS * TILE_WIDTH;
pub const SCREEN_HEIGHT: i32 = NROWS * TILE_HEIGHT;

pub const SCATTER_SECS: f64 = 7.0;
pub const CHASE_SECS: f64 = 20.0;
pub const FREIGHT_SECS: f64 = 7.0;

pub const BASE_SPEED: f64 = 100.0;
pub const FREIGHT_SPEED: f64 = 50.0;
pub const SPAWN_SPEED: f64 = 150.0;

pub const COLLIDE_RADIUS: f64 = 5.0;

pub const PELLET_POINTS: u32 = 10;
pub const POWER_PELLET_POINTS: u32 = 50;
pub const POWER_PELLET_FLASH_SECS: f64 = 0.2;

pub const GHOST_BASE_POINTS: u32 = 200;
pub const PINKY_LOOKAHEAD_TILES: f64 = 4.0;
pub const INKY_LOOKAHEAD_TILES: f64 = 2.0;
pub const CLYDE_SHY_TILES: f64 = 8.0;

pub const FRUIT_LIFESPAN_SECS: f64 = 5.0;
pub const FRUIT_SPAWN_THRESHOLDS: [u32; 2] = [50, 140];

pub const INKY_RELEASE_PELLETS: u32 = 30;
pub const CLYDE_RELEASE_PELLETS: u32 = 70;

pub const STARTING_LIVES: u32 = 8;
pub const GHOST_EATEN_PAUSE_SECS: f64 = 1.0;
pub const DEATH_PAUSE_SECS: f64 = 3.0;
pub const LEVEL_CLEAR_PAUSE_SECS: f64 = 3.0;

pub fn scaled_speed(speed: f64) -> f64 {
    speed * TILE_WIDTH as f64 / 16.0
}

pub fn fruit_points(level: u32) -> u32 {
    100 + level * 20
}

pub fn pellet_collide_radius() -> f64 {
    2.0 * TILE_WIDTH as f64 / 16.0
}

pub fn tile_to_pixel_key(col: f64, row: f64) -> (i32, i32) {
    (
        (col * TILE_WIDTH as f64).round() as i32,
        (row * TILE_HEIGHT as f64).round() as i32,
    )
}
