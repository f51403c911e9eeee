// src/utils/mod.rs

pub mod linear_algebra;

// Re-export the solver seam for easier access
pub use linear_algebra::{DenseLuSolver, LinearSolver};
