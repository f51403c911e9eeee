// src/fdm/mod.rs

pub mod solver;

pub use solver::{FdmSolver, PdeKind, SourceTerm};
