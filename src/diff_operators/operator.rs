// src/diff_operators/operator.rs

use crate::diff_operators::stencil::Stencil;

/// Time level a stencil is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLevel {
    /// Level being solved for: contributes to the coefficient matrix.
    New,
    /// Already known level: contributes to the right-hand side.
    Previous,
}

/// A differential operator term of a PDE.
///
/// Stencils are stored unscaled; [`DifferentialOperator::stencil_for`] applies
/// the coefficient.
#[derive(Debug, Clone, PartialEq)]
pub enum DifferentialOperator {
    /// Operator with a single stencil that does not depend on time.
    Steady { stencil: Stencil, coefficient: f64 },
    /// Operator split between the new time level (`implicit`) and the
    /// previous one (`explicit`). A missing explicit stencil means the term
    /// has no previous-level contribution.
    TimeDependent {
        implicit: Stencil,
        explicit: Option<Stencil>,
        coefficient: f64,
    },
}

impl DifferentialOperator {
    pub fn steady(stencil: Stencil, coefficient: f64) -> Self {
        DifferentialOperator::Steady { stencil, coefficient }
    }

    pub fn time_dependent(implicit: Stencil, explicit: Option<Stencil>, coefficient: f64) -> Self {
        DifferentialOperator::TimeDependent {
            implicit,
            explicit,
            coefficient,
        }
    }

    pub fn coefficient(&self) -> f64 {
        match self {
            DifferentialOperator::Steady { coefficient, .. }
            | DifferentialOperator::TimeDependent { coefficient, .. } => *coefficient,
        }
    }

    pub fn is_time_dependent(&self) -> bool {
        matches!(self, DifferentialOperator::TimeDependent { .. })
    }

    /// Unscaled implicit stencil. A steady operator's single stencil counts as implicit.
    pub fn implicit_stencil(&self) -> &Stencil {
        match self {
            DifferentialOperator::Steady { stencil, .. } => stencil,
            DifferentialOperator::TimeDependent { implicit, .. } => implicit,
        }
    }

    /// Unscaled explicit stencil, `None` for steady operators or when absent.
    pub fn explicit_stencil(&self) -> Option<&Stencil> {
        match self {
            DifferentialOperator::Steady { .. } => None,
            DifferentialOperator::TimeDependent { explicit, .. } => explicit.as_ref(),
        }
    }

    /// Stencil contributing at `level`, scaled by the coefficient.
    pub fn stencil_for(&self, level: TimeLevel) -> Option<Stencil> {
        let stencil = match level {
            TimeLevel::New => Some(self.implicit_stencil()),
            TimeLevel::Previous => self.explicit_stencil(),
        };
        stencil.map(|s| s.scaled(self.coefficient()))
    }
}
