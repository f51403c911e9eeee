// src/diff_operators/mod.rs

pub mod expression;
pub mod library;
pub mod operator;
pub mod stencil;

// Re-export the building blocks for easier access
pub use expression::OperatorExpression;
pub use library::{
    d2dx, d2dx_scaled, d2dy, d2dy_scaled, ddt, ddt_scaled, ddx, ddx_scaled, ddy, ddy_scaled,
    laplacian2d, laplacian2d_scaled, td_d2dx, td_d2dx_scaled, td_d2dy, td_d2dy_scaled,
};
pub use operator::{DifferentialOperator, TimeLevel};
pub use stencil::{Offset, Stencil};
