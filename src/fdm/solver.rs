// src/fdm/solver.rs

use log::{debug, trace, warn};
use nalgebra::{DMatrix, DVector};

use crate::diff_operators::{DifferentialOperator, OperatorExpression, Stencil, TimeLevel};
use crate::domain::BoundaryCondition;
use crate::error::{FdmError, FdmResult};
use crate::utils::{DenseLuSolver, LinearSolver};

/// Source term `f_s(x, y)` on the right-hand side of the PDE.
pub type SourceTerm = Box<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// Classification of the PDE held by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdeKind {
    /// No operator terms yet.
    Undetermined,
    /// Elliptic problem solved in one system over the whole grid.
    Steady,
    /// Every term carries an implicit/explicit split.
    FullyTimeDependent,
    /// Time-dependent terms mixed with steady ones, which are applied on the new level.
    Mixed,
}

impl PdeKind {
    pub fn classify(expression: &OperatorExpression) -> Self {
        if expression.is_empty() {
            PdeKind::Undetermined
        } else if !expression.any_time_dependent() {
            PdeKind::Steady
        } else if expression.all_time_dependent() {
            PdeKind::FullyTimeDependent
        } else {
            PdeKind::Mixed
        }
    }
}

/// Uniform interior grid over the domain of the boundary condition.
///
/// Index 0 and `n + 1` in each direction are the domain edges; unknowns are
/// `1..=nx` by `1..=ny`.
#[derive(Debug, Clone, Copy)]
struct Grid {
    nx: usize,
    ny: usize,
    hx: f64,
    hy: f64,
    x0: f64,
    y0: f64,
}

impl Grid {
    fn x(&self, i: i64) -> f64 {
        self.x0 + i as f64 * self.hx
    }

    fn y(&self, j: i64) -> f64 {
        self.y0 + j as f64 * self.hy
    }

    fn is_interior_x(&self, i: i64) -> bool {
        i >= 1 && i <= self.nx as i64
    }

    fn is_interior(&self, i: i64, j: i64) -> bool {
        self.is_interior_x(i) && j >= 1 && j <= self.ny as i64
    }

    /// Row-major unknown index of interior point `(i, j)`.
    fn index(&self, i: i64, j: i64) -> usize {
        (j as usize - 1) * self.nx + (i as usize - 1)
    }
}

/// Finite-difference solver for an operator expression with Dirichlet data.
pub struct FdmSolver {
    expression: OperatorExpression,
    kind: PdeKind,
    source: SourceTerm,
    boundary: Box<dyn BoundaryCondition + Send + Sync>,
    linear_solver: Box<dyn LinearSolver + Send + Sync>,
}

impl FdmSolver {
    /// Creates a solver backed by a dense LU solve.
    ///
    /// # Arguments
    ///
    /// * `expression` - Operator terms of the PDE, may be empty and set later.
    /// * `source` - Source term `f_s(x, y)`.
    /// * `boundary` - Boundary condition providing the domain and Dirichlet values.
    pub fn new<F, B>(expression: OperatorExpression, source: F, boundary: B) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
        B: BoundaryCondition + Send + Sync + 'static,
    {
        Self::with_linear_solver(expression, source, boundary, DenseLuSolver)
    }

    /// Creates a solver with an injected linear-solve collaborator.
    pub fn with_linear_solver<F, B, S>(
        expression: OperatorExpression,
        source: F,
        boundary: B,
        linear_solver: S,
    ) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
        B: BoundaryCondition + Send + Sync + 'static,
        S: LinearSolver + Send + Sync + 'static,
    {
        let kind = PdeKind::classify(&expression);
        debug!("fdm solver created with {} terms, classified as {:?}", expression.len(), kind);
        FdmSolver {
            expression,
            kind,
            source: Box::new(source),
            boundary: Box::new(boundary),
            linear_solver: Box::new(linear_solver),
        }
    }

    /// Replaces the operator expression and reclassifies the PDE.
    pub fn set_expression(&mut self, expression: OperatorExpression) {
        self.kind = PdeKind::classify(&expression);
        debug!("operator expression replaced ({} terms), classified as {:?}", expression.len(), self.kind);
        self.expression = expression;
    }

    pub fn expression(&self) -> &OperatorExpression {
        &self.expression
    }

    pub fn kind(&self) -> PdeKind {
        self.kind
    }

    pub fn is_time_dependent(&self) -> bool {
        self.expression.any_time_dependent()
    }

    pub fn all_ops_are_time_dependent(&self) -> bool {
        self.expression.all_time_dependent()
    }

    /// Solves the PDE on an `nx × ny` interior grid.
    ///
    /// For time-dependent problems the y axis is time: the bottom edge holds
    /// the initial condition and each interior row is one time level.
    ///
    /// # Returns
    ///
    /// * `Ok(u)` with `u[(i - 1, j - 1)]` the value at interior point `(i, j)`.
    /// * `Err` on an empty expression, an invalid grid, boundary queries the
    ///   condition cannot answer, or a singular system.
    pub fn solve(&self, nx: usize, ny: usize) -> FdmResult<DMatrix<f64>> {
        if nx == 0 || ny == 0 {
            return Err(FdmError::InvalidGrid { nx, ny });
        }
        let grid = self.grid(nx, ny);
        debug!(
            "solving {:?} problem on {}x{} grid (hx = {:.4e}, hy = {:.4e})",
            self.kind, nx, ny, grid.hx, grid.hy
        );

        match self.kind {
            PdeKind::Undetermined => Err(FdmError::EmptyExpression),
            PdeKind::Steady => {
                self.check_interior(&grid)?;
                self.solve_steady(&grid)
            }
            PdeKind::FullyTimeDependent | PdeKind::Mixed => {
                self.check_interior(&grid)?;
                self.solve_time_dependent(&grid)
            }
        }
    }

    fn grid(&self, nx: usize, ny: usize) -> Grid {
        let domain = self.boundary.domain();
        let extent = domain.extent();
        Grid {
            nx,
            ny,
            hx: extent[0] / (nx + 1) as f64,
            hy: extent[1] / (ny + 1) as f64,
            x0: domain.lower[0],
            y0: domain.lower[1],
        }
    }

    fn check_interior(&self, grid: &Grid) -> FdmResult<()> {
        for j in 1..=grid.ny as i64 {
            for i in 1..=grid.nx as i64 {
                let (x, y) = (grid.x(i), grid.y(j));
                if !self.boundary.in_domain(x, y) {
                    return Err(FdmError::OutsideDomain { x, y });
                }
            }
        }
        Ok(())
    }

    fn boundary_value(&self, grid: &Grid, i: i64, j: i64) -> FdmResult<f64> {
        let (x, y) = (grid.x(i), grid.y(j));
        if self.boundary.on_boundary(x, y) {
            Ok(self.boundary.boundary_value(x, y))
        } else {
            Err(FdmError::MissingBoundaryValue { x, y })
        }
    }

    fn linear_solve(&self, matrix: &DMatrix<f64>, rhs: &DVector<f64>) -> FdmResult<DVector<f64>> {
        self.linear_solver.solve(matrix, rhs).map_err(|err| {
            warn!("linear solve failed: {}", err);
            err
        })
    }

    fn solve_steady(&self, grid: &Grid) -> FdmResult<DMatrix<f64>> {
        let size = grid.nx * grid.ny;
        let mut matrix = DMatrix::zeros(size, size);
        let mut rhs = DVector::zeros(size);
        let stencils: Vec<Stencil> = self
            .expression
            .iter()
            .filter_map(|op| op.stencil_for(TimeLevel::New))
            .collect();

        for j in 1..=grid.ny as i64 {
            for i in 1..=grid.nx as i64 {
                let row = grid.index(i, j);
                rhs[row] = (self.source)(grid.x(i), grid.y(j));
                for stencil in &stencils {
                    for &(offset, weight) in stencil.entries() {
                        let (ni, nj) = (i + offset.di as i64, j + offset.dj as i64);
                        if grid.is_interior(ni, nj) {
                            matrix[(row, grid.index(ni, nj))] += weight;
                        } else {
                            rhs[row] -= weight * self.boundary_value(grid, ni, nj)?;
                        }
                    }
                }
            }
        }

        let u = self.linear_solve(&matrix, &rhs)?;
        Ok(DMatrix::from_fn(grid.nx, grid.ny, |i, j| u[j * grid.nx + i]))
    }

    /// Stencils applied when advancing one time level, with offsets `(di, dt)`
    /// where `dt = 1` is the level being solved for.
    fn marching_stencils(&self) -> FdmResult<Vec<Stencil>> {
        let mut stencils = Vec::with_capacity(2 * self.expression.len());
        for op in &self.expression {
            match op {
                DifferentialOperator::Steady { .. } => {
                    if let Some(stencil) = op.stencil_for(TimeLevel::New) {
                        let folded = stencil.shifted(0, 1);
                        check_time_reach(&folded, 1, "steady term on the new level")?;
                        stencils.push(folded);
                    }
                }
                DifferentialOperator::TimeDependent { .. } => {
                    if let Some(implicit) = op.stencil_for(TimeLevel::New) {
                        check_time_reach(&implicit, 1, "implicit stencil")?;
                        stencils.push(implicit);
                    }
                    if let Some(explicit) = op.stencil_for(TimeLevel::Previous) {
                        check_time_reach(&explicit, 0, "explicit stencil")?;
                        stencils.push(explicit);
                    }
                }
            }
        }
        Ok(stencils)
    }

    fn solve_time_dependent(&self, grid: &Grid) -> FdmResult<DMatrix<f64>> {
        let stencils = self.marching_stencils()?;
        let nx = grid.nx;
        let mut levels: Vec<DVector<f64>> = Vec::with_capacity(grid.ny);

        for j in 1..=grid.ny as i64 {
            let mut matrix = DMatrix::zeros(nx, nx);
            let mut rhs = DVector::zeros(nx);

            for i in 1..=nx as i64 {
                let row = i as usize - 1;
                rhs[row] = (self.source)(grid.x(i), grid.y(j));
                for stencil in &stencils {
                    for &(offset, weight) in stencil.entries() {
                        let ni = i + offset.di as i64;
                        let level = j - 1 + offset.dj as i64;
                        if level == j && grid.is_interior_x(ni) {
                            matrix[(row, ni as usize - 1)] += weight;
                        } else if level >= 1 && level < j && grid.is_interior_x(ni) {
                            rhs[row] -= weight * levels[level as usize - 1][ni as usize - 1];
                        } else {
                            rhs[row] -= weight * self.boundary_value(grid, ni, level)?;
                        }
                    }
                }
            }

            let u = self.linear_solve(&matrix, &rhs)?;
            trace!("time level {} solved, max |u| = {:.6e}", j, u.amax());
            levels.push(u);
        }

        Ok(DMatrix::from_fn(nx, grid.ny, |i, j| levels[j][i]))
    }
}

/// Rejects stencils reaching past `max_dt` or before the current level.
fn check_time_reach(stencil: &Stencil, max_dt: i32, what: &str) -> FdmResult<()> {
    match (stencil.min_time_offset(), stencil.max_time_offset()) {
        (Some(lo), Some(hi)) if lo < 0 || hi > max_dt => Err(FdmError::InvalidStencil(format!(
            "{} reaches time offsets {}..={}, allowed 0..={}",
            what, lo, hi, max_dt
        ))),
        _ => Ok(()),
    }
}

impl std::fmt::Debug for FdmSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FdmSolver")
            .field("expression", &self.expression)
            .field("kind", &self.kind)
            .field("domain", self.boundary.domain())
            .finish_non_exhaustive()
    }
}
