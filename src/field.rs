//! Transmission fields and the pointwise algebra used to compose them.
//!
//! Every mask value lives in `[0, 1]`: 1 is fully transmissive, 0 fully
//! obstructed, and intermediate values appear only at anti-aliased edges.
//! The three scalar operators below are the single place where that algebra
//! is defined; the [Field] combinators and the composite apertures in
//! [crate::core] both go through them.

use crate::error::{ApertureError, ApertureResult};

/// Set intersection (logical AND) of two transmissive regions.
#[must_use] pub fn intersect(a: f64, b: f64) -> f64 {
    a * b
}

/// Set complement: transmissive wherever `a` is not.
#[must_use] pub fn complement(a: f64) -> f64 {
    1.0 - a
}

/// Union of two regions that are known not to overlap.
///
/// Only meaningful when at most one operand is nonzero at any point.
#[must_use] pub fn disjoint_union(a: f64, b: f64) -> f64 {
    a + b
}

/// Transmission value per grid point, aligned positionally with the
/// [crate::Grid] it was evaluated on.
#[derive(Debug,Clone,PartialEq)]
pub struct Field {
    values: Vec<f64>,
}

impl Field {
    pub fn new(values: Vec<f64>) -> Self {
        Self {values}
    }
    /// A field of `len` points, all with the same value.
    pub fn constant(value: f64, len: usize) -> Self {
        Self {values: vec![value; len]}
    }
    pub fn values(&self) -> &[f64] {
        &self.values
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn zip_with(&self, other: &Self, op: fn(f64, f64) -> f64) -> ApertureResult<Self> {
        if self.len() != other.len() {
            return Err(ApertureError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(Self {
            values: self.values.iter()
            .zip(other.values.iter())
            .map(|(&a, &b)| op(a, b))
            .collect()
        })
    }

    /// Pointwise [intersect] of two fields sampled on the same grid.
    pub fn intersect(&self, other: &Self) -> ApertureResult<Self> {
        self.zip_with(other, intersect)
    }
    /// Pointwise [complement] of the field.
    pub fn complement(&self) -> Self {
        Self {
            values: self.values.iter().map(|&a| complement(a)).collect()
        }
    }
    /// Pointwise [disjoint_union] of two fields sampled on the same grid.
    pub fn disjoint_union(&self, other: &Self) -> ApertureResult<Self> {
        self.zip_with(other, disjoint_union)
    }
    /// Pointwise [disjoint_union] of any number of fields.
    ///
    /// An empty slice has no grid to align with and yields an empty field.
    pub fn disjoint_union_all(fields: &[Self]) -> ApertureResult<Self> {
        let Some((first, rest)) = fields.split_first() else {
            return Ok(Self::new(vec![]));
        };
        rest.iter().try_fold(first.clone(), |acc, f| acc.disjoint_union(f))
    }

    /// Mean transmission over the grid, i.e. the transmissive fraction of
    /// the sampled area for a binary mask.
    pub fn fill_factor(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
    /// Largest value in the field, or 0 for an empty field.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
    /// Number of points with any transmission at all.
    pub fn count_nonzero(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0.0).count()
    }
}

impl From<Vec<f64>> for Field {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}
