// src/input/input_deck.rs
use nalgebra::Vector2;
use serde::Deserialize;

use crate::diff_operators::{
    d2dx_scaled, d2dy_scaled, ddt_scaled, ddx_scaled, ddy_scaled, laplacian2d_scaled,
    td_d2dx_scaled, td_d2dy_scaled, DifferentialOperator, OperatorExpression,
};
use crate::domain::{DirichletRectangle, Domain};
use crate::error::{FdmError, FdmResult};
use crate::fdm::FdmSolver;

fn default_coefficient() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GridSettings {
    pub nx: usize,                     // Interior points along x
    pub ny: usize,                     // Interior points along y (time levels for time-dependent problems)
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DomainSettings {
    pub lower: [f64; 2],               // Lower-left corner
    pub upper: [f64; 2],               // Upper-right corner
}

/// One operator term of the problem, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperatorSpec {
    Ddx {
        spacing: f64,
        #[serde(default = "default_coefficient")]
        coefficient: f64,
    },
    Ddy {
        spacing: f64,
        #[serde(default = "default_coefficient")]
        coefficient: f64,
    },
    D2dx {
        spacing: f64,
        #[serde(default = "default_coefficient")]
        coefficient: f64,
    },
    D2dy {
        spacing: f64,
        #[serde(default = "default_coefficient")]
        coefficient: f64,
    },
    Laplacian2d {
        dx: f64,
        dy: f64,
        #[serde(default = "default_coefficient")]
        coefficient: f64,
    },
    Ddt {
        spacing: f64,
        #[serde(default = "default_coefficient")]
        coefficient: f64,
    },
    TdD2dx {
        spacing: f64,
        #[serde(default = "default_coefficient")]
        coefficient: f64,
    },
    TdD2dy {
        spacing: f64,
        #[serde(default = "default_coefficient")]
        coefficient: f64,
    },
}

impl OperatorSpec {
    pub fn name(&self) -> &'static str {
        match self {
            OperatorSpec::Ddx { .. } => "ddx",
            OperatorSpec::Ddy { .. } => "ddy",
            OperatorSpec::D2dx { .. } => "d2dx",
            OperatorSpec::D2dy { .. } => "d2dy",
            OperatorSpec::Laplacian2d { .. } => "laplacian2d",
            OperatorSpec::Ddt { .. } => "ddt",
            OperatorSpec::TdD2dx { .. } => "td_d2dx",
            OperatorSpec::TdD2dy { .. } => "td_d2dy",
        }
    }

    /// Spacings named by this term as `(field, axis, value)`; axis 0 is x,
    /// axis 1 is y (time for `ddt`).
    fn spacings(&self) -> Vec<(&'static str, usize, f64)> {
        match *self {
            OperatorSpec::Laplacian2d { dx, dy, .. } => vec![("dx", 0, dx), ("dy", 1, dy)],
            OperatorSpec::Ddx { spacing, .. }
            | OperatorSpec::D2dx { spacing, .. }
            | OperatorSpec::TdD2dx { spacing, .. }
            | OperatorSpec::TdD2dy { spacing, .. } => vec![("spacing", 0, spacing)],
            OperatorSpec::Ddy { spacing, .. }
            | OperatorSpec::D2dy { spacing, .. }
            | OperatorSpec::Ddt { spacing, .. } => vec![("spacing", 1, spacing)],
        }
    }

    /// Checks that every spacing is finite and strictly positive.
    pub fn validate(&self) -> FdmResult<()> {
        for (name, _, value) in self.spacings() {
            if !(value.is_finite() && value > 0.0) {
                return Err(FdmError::InvalidSpacing {
                    operator: self.name(),
                    name,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Checks that every spacing equals the grid spacing along its axis,
    /// within a relative tolerance of `1e-9`.
    pub fn validate_against_grid(&self, grid_spacing: [f64; 2]) -> FdmResult<()> {
        for (name, axis, value) in self.spacings() {
            let expected = grid_spacing[axis];
            if (value - expected).abs() > 1e-9 * expected {
                return Err(FdmError::InconsistentSpacing {
                    operator: self.name(),
                    name,
                    value,
                    expected,
                });
            }
        }
        Ok(())
    }

    pub fn build(&self) -> DifferentialOperator {
        match *self {
            OperatorSpec::Ddx { spacing, coefficient } => ddx_scaled(spacing, coefficient),
            OperatorSpec::Ddy { spacing, coefficient } => ddy_scaled(spacing, coefficient),
            OperatorSpec::D2dx { spacing, coefficient } => d2dx_scaled(spacing, coefficient),
            OperatorSpec::D2dy { spacing, coefficient } => d2dy_scaled(spacing, coefficient),
            OperatorSpec::Laplacian2d { dx, dy, coefficient } => laplacian2d_scaled(dx, dy, coefficient),
            OperatorSpec::Ddt { spacing, coefficient } => ddt_scaled(spacing, coefficient),
            OperatorSpec::TdD2dx { spacing, coefficient } => td_d2dx_scaled(spacing, coefficient),
            OperatorSpec::TdD2dy { spacing, coefficient } => td_d2dy_scaled(spacing, coefficient),
        }
    }
}

/// Problem description read from YAML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProblemDeck {
    pub grid: GridSettings,
    pub domain: DomainSettings,
    #[serde(default)]
    pub boundary_value: f64,           // Constant Dirichlet value on every edge
    #[serde(default)]
    pub source: f64,                   // Constant source term f_s
    pub operators: Vec<OperatorSpec>,
}

impl ProblemDeck {
    pub fn from_yaml_str(contents: &str) -> FdmResult<Self> {
        let deck: ProblemDeck = serde_yaml::from_str(contents)?;
        Ok(deck)
    }

    /// Reports the first configuration error in the deck.
    pub fn validate(&self) -> FdmResult<()> {
        let GridSettings { nx, ny } = self.grid;
        if nx == 0 || ny == 0 {
            return Err(FdmError::InvalidGrid { nx, ny });
        }
        self.domain()?;
        if self.operators.is_empty() {
            return Err(FdmError::EmptyExpression);
        }
        self.operators.iter().try_for_each(OperatorSpec::validate)?;
        let grid_spacing = self.grid_spacing()?;
        self.operators
            .iter()
            .try_for_each(|spec| spec.validate_against_grid(grid_spacing))
    }

    /// Grid spacing `[hx, hy]` implied by the domain and the interior point counts.
    pub fn grid_spacing(&self) -> FdmResult<[f64; 2]> {
        let extent = self.domain()?.extent();
        Ok([
            extent[0] / (self.grid.nx + 1) as f64,
            extent[1] / (self.grid.ny + 1) as f64,
        ])
    }

    pub fn domain(&self) -> FdmResult<Domain> {
        let DomainSettings { lower, upper } = self.domain;
        Domain::new(Vector2::new(lower[0], lower[1]), Vector2::new(upper[0], upper[1]))
    }

    pub fn expression(&self) -> FdmResult<OperatorExpression> {
        self.operators
            .iter()
            .map(|spec| spec.validate().map(|_| spec.build()))
            .collect::<FdmResult<Vec<_>>>()
            .map(OperatorExpression::new)
    }

    /// Builds a solver with constant Dirichlet data on every edge of the domain.
    pub fn build_solver(&self) -> FdmResult<FdmSolver> {
        self.validate()?;
        let boundary_value = self.boundary_value;
        let source = self.source;
        let boundary = DirichletRectangle::on_edges(self.domain()?, move |_, _| boundary_value);
        Ok(FdmSolver::new(self.expression()?, move |_, _| source, boundary))
    }
}
