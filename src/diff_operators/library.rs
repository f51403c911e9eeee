// src/diff_operators/library.rs
//
// Central-difference operators. Offsets are `(di, dj)`; for time-dependent
// operators `dj = 1` is the new time level and `dj = 0` the current one.

use crate::diff_operators::operator::DifferentialOperator;
use crate::diff_operators::stencil::Stencil;

/// First derivative along x, central difference.
pub fn ddx(dx: f64) -> DifferentialOperator {
    ddx_scaled(dx, 1.0)
}

pub fn ddx_scaled(dx: f64, coefficient: f64) -> DifferentialOperator {
    let w = 1.0 / (2.0 * dx);
    DifferentialOperator::steady(Stencil::new([((-1, 0), -w), ((1, 0), w)]), coefficient)
}

/// First derivative along y, central difference.
pub fn ddy(dy: f64) -> DifferentialOperator {
    ddy_scaled(dy, 1.0)
}

pub fn ddy_scaled(dy: f64, coefficient: f64) -> DifferentialOperator {
    let w = 1.0 / (2.0 * dy);
    DifferentialOperator::steady(Stencil::new([((0, -1), -w), ((0, 1), w)]), coefficient)
}

/// Second derivative along x: `{-1: 1/h², 0: -2/h², +1: 1/h²}`.
pub fn d2dx(dx: f64) -> DifferentialOperator {
    d2dx_scaled(dx, 1.0)
}

pub fn d2dx_scaled(dx: f64, coefficient: f64) -> DifferentialOperator {
    let w = 1.0 / (dx * dx);
    DifferentialOperator::steady(
        Stencil::new([((-1, 0), w), ((0, 0), -2.0 * w), ((1, 0), w)]),
        coefficient,
    )
}

/// Second derivative along y.
pub fn d2dy(dy: f64) -> DifferentialOperator {
    d2dy_scaled(dy, 1.0)
}

pub fn d2dy_scaled(dy: f64, coefficient: f64) -> DifferentialOperator {
    let w = 1.0 / (dy * dy);
    DifferentialOperator::steady(
        Stencil::new([((0, -1), w), ((0, 0), -2.0 * w), ((0, 1), w)]),
        coefficient,
    )
}

/// Five-point Laplacian.
pub fn laplacian2d(dx: f64, dy: f64) -> DifferentialOperator {
    laplacian2d_scaled(dx, dy, 1.0)
}

pub fn laplacian2d_scaled(dx: f64, dy: f64, coefficient: f64) -> DifferentialOperator {
    let wx = 1.0 / (dx * dx);
    let wy = 1.0 / (dy * dy);
    DifferentialOperator::steady(
        Stencil::new([
            ((-1, 0), wx),
            ((1, 0), wx),
            ((0, 0), -2.0 * (wx + wy)),
            ((0, -1), wy),
            ((0, 1), wy),
        ]),
        coefficient,
    )
}

/// Forward difference in time: new level in the implicit stencil, current
/// level in the explicit one.
pub fn ddt(dt: f64) -> DifferentialOperator {
    ddt_scaled(dt, 1.0)
}

pub fn ddt_scaled(dt: f64, coefficient: f64) -> DifferentialOperator {
    let w = 1.0 / dt;
    DifferentialOperator::time_dependent(
        Stencil::new([((0, 1), w)]),
        Some(Stencil::new([((0, 0), -w)])),
        coefficient,
    )
}

/// Crank–Nicolson second derivative along x: half the second difference on
/// the new level (implicit), half on the current level (explicit).
pub fn td_d2dx(dx: f64) -> DifferentialOperator {
    td_d2dx_scaled(dx, 1.0)
}

pub fn td_d2dx_scaled(dx: f64, coefficient: f64) -> DifferentialOperator {
    DifferentialOperator::time_dependent(
        half_second_difference(dx, 1),
        Some(half_second_difference(dx, 0)),
        coefficient,
    )
}

/// Time-centred second derivative with both levels held in the implicit
/// stencil and no explicit part.
///
/// Despite the name, the stencil differentiates along x with spacing `dy`;
/// the y axis is the time axis for time-dependent problems. The result equals
/// [`td_d2dx`] with the same spacing.
pub fn td_d2dy(dy: f64) -> DifferentialOperator {
    td_d2dy_scaled(dy, 1.0)
}

pub fn td_d2dy_scaled(dy: f64, coefficient: f64) -> DifferentialOperator {
    let new = half_second_difference(dy, 1);
    let current = half_second_difference(dy, 0);
    let implicit = Stencil::new(new.entries().iter().chain(current.entries()).copied());
    DifferentialOperator::time_dependent(implicit, None, coefficient)
}

fn half_second_difference(h: f64, level: i32) -> Stencil {
    let w = 1.0 / (h * h);
    Stencil::new([((-1, level), 0.5 * w), ((0, level), -w), ((1, level), 0.5 * w)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff_operators::operator::TimeLevel;
    use crate::diff_operators::stencil::Offset;
    use proptest::prelude::*;

    fn weight_at(stencil: &Stencil, offset: (i32, i32)) -> f64 {
        stencil
            .entries()
            .iter()
            .find(|(o, _)| *o == Offset::from(offset))
            .map(|&(_, w)| w)
            .unwrap_or(0.0)
    }

    #[test]
    fn test_steady_operators_are_not_time_dependent() {
        for op in [ddx(0.1), ddy(0.1), d2dx(0.1), d2dy(0.1), laplacian2d(0.1, 0.2)] {
            assert!(!op.is_time_dependent());
        }
    }

    #[test]
    fn test_time_operators_are_time_dependent() {
        for op in [ddt(0.1), td_d2dx(0.1), td_d2dy(0.1)] {
            assert!(op.is_time_dependent());
        }
    }

    #[test]
    fn test_d2dx_weights() {
        let s = d2dx_scaled(0.5, 2.0).stencil_for(TimeLevel::New).unwrap();
        assert!((weight_at(&s, (-1, 0)) - 8.0).abs() < 1e-12);
        assert!((weight_at(&s, (0, 0)) + 16.0).abs() < 1e-12);
        assert!((weight_at(&s, (1, 0)) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_laplacian_weights() {
        let s = laplacian2d(0.5, 0.25).stencil_for(TimeLevel::New).unwrap();
        assert_eq!(s.len(), 5);
        assert!((weight_at(&s, (1, 0)) - 4.0).abs() < 1e-12);
        assert!((weight_at(&s, (0, 1)) - 16.0).abs() < 1e-12);
        assert!((weight_at(&s, (0, 0)) + 40.0).abs() < 1e-12);
        assert!(s.weight_sum().abs() < 1e-12);
    }

    #[test]
    fn test_ddx_of_linear_function_is_slope() {
        let h = 0.2;
        let s = ddx(h).stencil_for(TimeLevel::New).unwrap();
        let value = s.evaluate(|o| 3.0 * (1.0 + o.di as f64 * h) - 2.0);
        assert!((value - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_ddt_split() {
        let op = ddt_scaled(0.25, 2.0);
        let implicit = op.stencil_for(TimeLevel::New).unwrap();
        let explicit = op.stencil_for(TimeLevel::Previous).unwrap();
        assert_eq!(implicit.entries(), &[(Offset::new(0, 1), 8.0)]);
        assert_eq!(explicit.entries(), &[(Offset::new(0, 0), -8.0)]);
    }

    #[test]
    fn test_td_d2dx_split_levels() {
        let dx = 0.1;
        let op = td_d2dx_scaled(dx, -1.0);
        let implicit = op.stencil_for(TimeLevel::New).unwrap();
        let explicit = op.stencil_for(TimeLevel::Previous).unwrap();

        assert_eq!(implicit.min_time_offset(), Some(1));
        assert_eq!(explicit.max_time_offset(), Some(0));
        assert!((weight_at(&implicit, (-1, 1)) + 1.0 / (2.0 * dx * dx)).abs() < 1e-9);
        assert!((weight_at(&implicit, (0, 1)) - 1.0 / (dx * dx)).abs() < 1e-9);
        assert!((weight_at(&explicit, (1, 0)) + 1.0 / (2.0 * dx * dx)).abs() < 1e-9);
    }

    #[test]
    fn test_td_d2dy_holds_both_levels_implicitly() {
        let op = td_d2dy(0.5);
        assert!(op.explicit_stencil().is_none());
        let implicit = op.implicit_stencil();
        assert_eq!(implicit.len(), 6);
        assert_eq!(implicit.max_time_offset(), Some(1));
        assert_eq!(implicit.min_time_offset(), Some(0));
        assert!((weight_at(implicit, (0, 0)) + 4.0).abs() < 1e-12);
        assert!((weight_at(implicit, (0, 1)) + 4.0).abs() < 1e-12);
    }

    /// Sum of the implicit and explicit parts, both scaled.
    fn both_levels(op: &DifferentialOperator) -> Vec<Stencil> {
        [TimeLevel::New, TimeLevel::Previous]
            .into_iter()
            .filter_map(|level| op.stencil_for(level))
            .collect()
    }

    proptest! {
        #[test]
        fn second_derivatives_annihilate_lines(
            h in 1e-3f64..10.0,
            k in 1e-3f64..10.0,
            a in -100.0f64..100.0,
            b in -100.0f64..100.0,
            c in -100.0f64..100.0,
            x0 in -10.0f64..10.0,
            y0 in -10.0f64..10.0,
        ) {
            // time-dependent stencils use dj as a time level, the line does not vary in time
            let line = |o: Offset| a * (x0 + o.di as f64 * h) + c;
            let plane = |o: Offset| a * (x0 + o.di as f64 * h) + b * (y0 + o.dj as f64 * k) + c;
            let scale = (a.abs() * (x0.abs() + h) + b.abs() * (y0.abs() + k) + c.abs() + 1.0)
                * (1.0 / (h * h) + 1.0 / (k * k));

            let d2 = d2dx_scaled(h, 1.0).stencil_for(TimeLevel::New).unwrap();
            prop_assert!(d2.evaluate(line).abs() <= 1e-12 * scale);

            let laplacian = laplacian2d_scaled(h, k, 1.0).stencil_for(TimeLevel::New).unwrap();
            prop_assert!(laplacian.evaluate(plane).abs() <= 1e-12 * scale);

            for op in [td_d2dx_scaled(h, 1.0), td_d2dy_scaled(h, 1.0)] {
                let total: f64 = both_levels(&op).iter().map(|s| s.evaluate(line)).sum();
                prop_assert!(total.abs() <= 1e-12 * scale);
            }
        }
    }
}
