// src/utils/linear_algebra.rs

use nalgebra::{DMatrix, DVector};

use crate::error::{FdmError, FdmResult};

/// Linear-solve collaborator used by the FDM solver.
pub trait LinearSolver {
    /// Solves `matrix * x = rhs` for `x`.
    ///
    /// # Arguments
    ///
    /// * `matrix` - Square coefficient matrix.
    /// * `rhs` - Right-hand side vector with as many rows as `matrix`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` with the solution vector.
    /// * `Err(FdmError::SingularSystem)` if the system has no unique solution.
    fn solve(&self, matrix: &DMatrix<f64>, rhs: &DVector<f64>) -> FdmResult<DVector<f64>>;
}

/// Dense LU decomposition with partial pivoting.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseLuSolver;

impl LinearSolver for DenseLuSolver {
    fn solve(&self, matrix: &DMatrix<f64>, rhs: &DVector<f64>) -> FdmResult<DVector<f64>> {
        let size = rhs.len();
        if !matrix.is_square() || matrix.nrows() != size {
            return Err(FdmError::SingularSystem { size });
        }
        let solution = matrix
            .clone()
            .lu()
            .solve(rhs)
            .ok_or(FdmError::SingularSystem { size })?;
        // LU only reports exact zero pivots
        if solution.iter().any(|v| !v.is_finite()) {
            return Err(FdmError::SingularSystem { size });
        }
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_lu_tridiagonal() {
        let matrix = DMatrix::from_row_slice(3, 3, &[
             2.0, -1.0,  0.0,
            -1.0,  2.0, -1.0,
             0.0, -1.0,  2.0,
        ]);
        let rhs = DVector::from_vec(vec![1.0, 0.0, 1.0]);
        let x = DenseLuSolver.solve(&matrix, &rhs).unwrap();

        for i in 0..3 {
            assert!((x[i] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_dense_lu_singular() {
        let matrix = DMatrix::from_row_slice(2, 2, &[
            1.0, 2.0,
            2.0, 4.0,
        ]);
        let rhs = DVector::from_vec(vec![1.0, 1.0]);
        let result = DenseLuSolver.solve(&matrix, &rhs);
        assert!(matches!(result, Err(FdmError::SingularSystem { size: 2 })));
    }

    #[test]
    fn test_dense_lu_shape_mismatch() {
        let matrix = DMatrix::<f64>::identity(2, 2);
        let rhs = DVector::from_vec(vec![1.0, 1.0, 1.0]);
        assert!(DenseLuSolver.solve(&matrix, &rhs).is_err());
    }
}
