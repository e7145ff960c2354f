pub mod constants;
pub mod engine;
pub mod entity;
pub mod error;
pub mod fruit;
pub mod ghosts;
pub mod graph;
pub mod maze;
pub mod modes;
pub mod pacman;
pub mod pellets;
pub mod rng;
pub mod types;
pub mod vector;
