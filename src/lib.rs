// src/lib.rs
//! Finite-difference toolkit for PDEs on rectangular domains.
//!
//! A PDE is written as a sum of [`DifferentialOperator`]s collected in an
//! [`OperatorExpression`]. The [`FdmSolver`] classifies the expression as
//! steady or time-dependent, assembles the stencils into a linear system with
//! Dirichlet values eliminated to the right-hand side, and solves it.

pub mod diff_operators;
pub mod domain;
pub mod error;
pub mod fdm;
pub mod input;
pub mod utils;

pub use diff_operators::{DifferentialOperator, Offset, OperatorExpression, Stencil, TimeLevel};
pub use domain::{BoundaryCondition, DirichletRectangle, Domain};
pub use error::{FdmError, FdmResult};
pub use fdm::{FdmSolver, PdeKind, SourceTerm};
pub use input::{parse_problem_deck, ProblemDeck};
pub use utils::{DenseLuSolver, LinearSolver};
