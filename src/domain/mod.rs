// src/domain/mod.rs

pub mod boundary;

pub use boundary::{BoundaryCondition, DirichletRectangle, Domain};
