use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum VectorError {
    #[error("vector division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MazeError {
    #[error("maze grid has no rows")]
    EmptyGrid,
    #[error("maze row {row} has {found} tiles, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("no node at tile ({col}, {row})")]
    MissingNode { col: f64, row: f64 },
    #[error("home nodes have not been created")]
    MissingHome,
}
