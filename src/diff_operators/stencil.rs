// src/diff_operators/stencil.rs

/// Grid offset of a stencil entry relative to the evaluation point.
///
/// `di` moves along x. `dj` moves along y for steady operators and selects the
/// time level for time-dependent ones (`1` is the new level, `0` the current one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub di: i32,
    pub dj: i32,
}

impl Offset {
    pub const fn new(di: i32, dj: i32) -> Self {
        Offset { di, dj }
    }

    /// Offset along x only, for one-dimensional stencils.
    pub const fn along_x(di: i32) -> Self {
        Offset { di, dj: 0 }
    }
}

impl From<(i32, i32)> for Offset {
    fn from((di, dj): (i32, i32)) -> Self {
        Offset::new(di, dj)
    }
}

impl From<i32> for Offset {
    fn from(di: i32) -> Self {
        Offset::along_x(di)
    }
}

/// Finite-difference stencil: ordered `(offset, weight)` pairs with unique offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct Stencil {
    entries: Vec<(Offset, f64)>,
}

impl Stencil {
    /// Builds a stencil from `(offset, weight)` pairs.
    ///
    /// A repeated offset is merged into its first occurrence by summing the
    /// weights, so the entry order of first appearances is preserved.
    pub fn new<O, I>(entries: I) -> Self
    where
        O: Into<Offset>,
        I: IntoIterator<Item = (O, f64)>,
    {
        let mut merged: Vec<(Offset, f64)> = Vec::new();
        for (offset, weight) in entries {
            let offset = offset.into();
            match merged.iter_mut().find(|(o, _)| *o == offset) {
                Some((_, w)) => *w += weight,
                None => merged.push((offset, weight)),
            }
        }
        Stencil { entries: merged }
    }

    pub fn entries(&self) -> &[(Offset, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy with every weight multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Stencil {
        Stencil {
            entries: self.entries.iter().map(|&(o, w)| (o, w * factor)).collect(),
        }
    }

    /// Returns a copy with every offset moved by `(di, dj)`.
    pub fn shifted(&self, di: i32, dj: i32) -> Stencil {
        Stencil {
            entries: self
                .entries
                .iter()
                .map(|&(o, w)| (Offset::new(o.di + di, o.dj + dj), w))
                .collect(),
        }
    }

    /// Weighted sum of `sample` over the stencil offsets.
    ///
    /// # Arguments
    ///
    /// * `sample` - Value of the grid function at a given offset.
    pub fn evaluate<F>(&self, sample: F) -> f64
    where
        F: Fn(Offset) -> f64,
    {
        self.entries.iter().map(|&(o, w)| w * sample(o)).sum()
    }

    pub fn weight_sum(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w).sum()
    }

    /// Largest `dj` among the entries, `None` for an empty stencil.
    pub fn max_time_offset(&self) -> Option<i32> {
        self.entries.iter().map(|(o, _)| o.dj).max()
    }

    pub fn min_time_offset(&self) -> Option<i32> {
        self.entries.iter().map(|(o, _)| o.dj).min()
    }
}
