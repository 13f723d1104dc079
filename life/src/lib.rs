mod grid;
pub mod patterns;
pub mod render;
pub mod simulation;

#[cfg(test)]
mod tests;

pub use crate::{
    grid::Grid,
    patterns::{Category, Pattern},
    simulation::{CancelToken, Phase, Run, Simulation, Snapshot},
};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    },
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("probability must be between 0 and 1, got {0}")]
    InvalidProbability(f64),
    #[error("unknown pattern {0:?}")]
    NotFound(String),
    #[error("no grid yet, reset the simulation first")]
    Uninitialized,
    #[error("simulation is stopped, resume or reset it first")]
    Stopped,
    #[error("{0}")]
    Parse(String),
}
