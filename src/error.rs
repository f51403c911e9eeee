// src/error.rs
//! Error type shared by every module of the crate.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type FdmResult<T> = Result<T, FdmError>;

/// Configuration and numerical failures raised while building or solving a problem.
#[derive(Error, Debug)]
pub enum FdmError {
    /// The operator expression has no terms, so the PDE type is undetermined.
    #[error("operator expression is empty, nothing to assemble")]
    EmptyExpression,

    /// Grid sizes must be at least one interior point in each direction.
    #[error("invalid grid: nx = {nx}, ny = {ny}")]
    InvalidGrid { nx: usize, ny: usize },

    /// Grid spacing must be strictly positive.
    #[error("invalid spacing for {operator}: {name} = {value}")]
    InvalidSpacing {
        operator: &'static str,
        name: &'static str,
        value: f64,
    },

    /// An operator's spacing disagrees with the grid it is solved on.
    #[error("inconsistent spacing for {operator}: {name} = {value}, grid spacing is {expected}")]
    InconsistentSpacing {
        operator: &'static str,
        name: &'static str,
        value: f64,
        expected: f64,
    },

    /// Domain corners must describe a rectangle with positive extent.
    #[error("invalid domain: lower = ({}, {}), upper = ({}, {})", lower[0], lower[1], upper[0], upper[1])]
    InvalidDomain { lower: [f64; 2], upper: [f64; 2] },

    /// An interior grid point is not inside the domain.
    #[error("grid point ({x}, {y}) lies outside the domain")]
    OutsideDomain { x: f64, y: f64 },

    /// A stencil reached a point that is neither an unknown nor on the boundary.
    #[error("no boundary value available at ({x}, {y})")]
    MissingBoundaryValue { x: f64, y: f64 },

    /// A stencil references a time level the scheme cannot provide.
    #[error("invalid stencil: {0}")]
    InvalidStencil(String),

    /// The assembled system could not be solved.
    #[error("singular linear system of size {size}")]
    SingularSystem { size: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
