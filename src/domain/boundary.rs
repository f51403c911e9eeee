// src/domain/boundary.rs

use nalgebra::Vector2;

use crate::error::{FdmError, FdmResult};

/// Axis-aligned rectangle given by its lower-left and upper-right corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub lower: Vector2<f64>,
    pub upper: Vector2<f64>,
}

impl Domain {
    /// Creates a domain, rejecting corners that do not span a positive area.
    pub fn new(lower: Vector2<f64>, upper: Vector2<f64>) -> FdmResult<Self> {
        let valid = lower.iter().chain(upper.iter()).all(|v| v.is_finite())
            && upper[0] > lower[0]
            && upper[1] > lower[1];
        if !valid {
            return Err(FdmError::InvalidDomain {
                lower: [lower[0], lower[1]],
                upper: [upper[0], upper[1]],
            });
        }
        Ok(Domain { lower, upper })
    }

    pub fn unit_square() -> Self {
        Domain {
            lower: Vector2::new(0.0, 0.0),
            upper: Vector2::new(1.0, 1.0),
        }
    }

    pub fn extent(&self) -> Vector2<f64> {
        self.upper - self.lower
    }
}

/// Boundary-condition collaborator queried by the solver.
pub trait BoundaryCondition {
    /// True for points strictly inside the domain.
    fn in_domain(&self, x: f64, y: f64) -> bool;
    /// True for points where a boundary value is prescribed.
    fn on_boundary(&self, x: f64, y: f64) -> bool;
    /// Prescribed value at a boundary point.
    fn boundary_value(&self, x: f64, y: f64) -> f64;
    fn domain(&self) -> &Domain;
}

type PointPredicate = Box<dyn Fn(f64, f64) -> bool + Send + Sync>;
type PointFunction = Box<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// Dirichlet condition on a rectangle.
pub struct DirichletRectangle {
    in_domain: PointPredicate,
    on_boundary: PointPredicate,
    value: PointFunction,
    domain: Domain,
}

impl DirichletRectangle {
    /// Builds a condition from explicit membership tests and a value function.
    pub fn new<D, B, V>(in_domain: D, on_boundary: B, value: V, domain: Domain) -> Self
    where
        D: Fn(f64, f64) -> bool + Send + Sync + 'static,
        B: Fn(f64, f64) -> bool + Send + Sync + 'static,
        V: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        DirichletRectangle {
            in_domain: Box::new(in_domain),
            on_boundary: Box::new(on_boundary),
            value: Box::new(value),
            domain,
        }
    }

    /// Builds a condition whose boundary is the four edges of `domain`.
    ///
    /// Edge tests use a tolerance of `1e-10` times the domain extent.
    pub fn on_edges<V>(domain: Domain, value: V) -> Self
    where
        V: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        let extent = domain.extent();
        let tol_x = 1e-10 * extent[0];
        let tol_y = 1e-10 * extent[1];
        let (lower, upper) = (domain.lower, domain.upper);

        let in_domain = move |x: f64, y: f64| {
            x > lower[0] + tol_x && x < upper[0] - tol_x && y > lower[1] + tol_y && y < upper[1] - tol_y
        };
        let on_boundary = move |x: f64, y: f64| {
            let within_x = x >= lower[0] - tol_x && x <= upper[0] + tol_x;
            let within_y = y >= lower[1] - tol_y && y <= upper[1] + tol_y;
            let on_vertical = (x - lower[0]).abs() <= tol_x || (x - upper[0]).abs() <= tol_x;
            let on_horizontal = (y - lower[1]).abs() <= tol_y || (y - upper[1]).abs() <= tol_y;
            (on_vertical && within_y) || (on_horizontal && within_x)
        };
        DirichletRectangle::new(in_domain, on_boundary, value, domain)
    }
}

impl BoundaryCondition for DirichletRectangle {
    fn in_domain(&self, x: f64, y: f64) -> bool {
        (self.in_domain)(x, y)
    }

    fn on_boundary(&self, x: f64, y: f64) -> bool {
        (self.on_boundary)(x, y)
    }

    fn boundary_value(&self, x: f64, y: f64) -> f64 {
        (self.value)(x, y)
    }

    fn domain(&self) -> &Domain {
        &self.domain
    }
}

impl std::fmt::Debug for DirichletRectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirichletRectangle")
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}
