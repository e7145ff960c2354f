use crate::constants::{
    pellet_collide_radius, POWER_PELLET_FLASH_SECS, POWER_PELLET_POINTS, PELLET_POINTS,
    TILE_HEIGHT, TILE_WIDTH,
};
use crate::entity::collides;
use crate::error::MazeError;
use crate::graph::parse_grid;
use crate::types::PelletKind;
use crate::vector::Vector2;

#[derive(Clone, Debug)]
pub struct Pellet {
    pub kind: PelletKind,
    pub position: Vector2,
    pub collide_radius: f64,
    pub points: u32,
    pub visible: bool,
    timer: f64,
}

impl Pellet {
    pub fn new(kind: PelletKind, row: usize, col: usize) -> Self {
        let points = match kind {
            PelletKind::Normal => PELLET_POINTS,
            PelletKind::Power => POWER_PELLET_POINTS,
        };
        Self {
            kind,
            position: Vector2::new(
                (col as i32 * TILE_WIDTH) as f64,
                (row as i32 * TILE_HEIGHT) as f64,
            ),
            collide_radius: pellet_collide_radius(),
            points,
            visible: true,
            timer: 0.0,
        }
    }

    pub fn update(&mut self, dt: f64) {
        if self.kind != PelletKind::Power {
            return;
        }
        self.timer += dt;
        if self.timer >= POWER_PELLET_FLASH_SECS {
            self.visible = !self.visible;
            self.timer = 0.0;
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PelletGroup {
    pellets: Vec<Pellet>,
    pub num_eaten: u32,
}

impl PelletGroup {
    pub fn from_grid<S: AsRef<str>>(rows: &[S]) -> Result<Self, MazeError> {
        let data = parse_grid(rows)?;
        let mut pellets = Vec::new();
        for (row, line) in data.iter().enumerate() {
            for (col, symbol) in line.iter().enumerate() {
                match symbol {
                    '.' | '+' => pellets.push(Pellet::new(PelletKind::Normal, row, col)),
                    'P' | 'p' => pellets.push(Pellet::new(PelletKind::Power, row, col)),
                    _ => {}
                }
            }
        }
        Ok(Self {
            pellets,
            num_eaten: 0,
        })
    }

    pub fn update(&mut self, dt: f64) {
        for pellet in &mut self.pellets {
            pellet.update(dt);
        }
    }

    pub fn find_colliding(&self, position: Vector2, collide_radius: f64) -> Option<usize> {
        self.pellets.iter().position(|pellet| {
            collides(
                position,
                collide_radius,
                pellet.position,
                pellet.collide_radius,
            )
        })
    }

    pub fn eat(&mut self, index: usize) -> Option<Pellet> {
        if index >= self.pellets.len() {
            return None;
        }
        self.num_eaten += 1;
        Some(self.pellets.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.pellets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pellets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pellet> {
        self.pellets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::MazeLayout;

    #[test]
    fn pellets_follow_grid_symbols() {
        let group = PelletGroup::from_grid(&["+.-|", "XPpn"]).expect("grid");
        let kinds: Vec<PelletKind> = group.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PelletKind::Normal,
                PelletKind::Normal,
                PelletKind::Power,
                PelletKind::Power
            ]
        );
        let power = group.iter().nth(2).expect("power pellet");
        assert_eq!(power.position, Vector2::new(16.0, 16.0));
        assert_eq!(power.points, 50);
    }

    #[test]
    fn classic_maze_has_full_pellet_count() {
        let group = PelletGroup::from_grid(MazeLayout::for_level(0).grid).expect("grid");
        assert_eq!(group.len(), 244);
        assert_eq!(
            group.iter().filter(|p| p.kind == PelletKind::Power).count(),
            4
        );
    }

    #[test]
    fn power_pellets_flash() {
        let mut group = PelletGroup::from_grid(&["+P"]).expect("grid");
        group.update(0.25);
        let visible: Vec<bool> = group.iter().map(|p| p.visible).collect();
        assert_eq!(visible, vec![true, false]);
        group.update(0.25);
        assert!(group.iter().all(|p| p.visible));
    }

    #[test]
    fn eating_counts_and_empties() {
        let mut group = PelletGroup::from_grid(&["+X+"]).expect("grid");
        let hit = group.find_colliding(Vector2::new(33.0, 0.0), 5.0);
        assert_eq!(hit, Some(1));
        assert!(group.find_colliding(Vector2::new(16.0, 0.0), 5.0).is_none());
        assert!(group.eat(1).is_some());
        assert!(group.eat(4).is_none());
        assert!(group.eat(0).is_some());
        assert_eq!(group.num_eaten, 2);
        assert!(group.is_empty());
    }
}
