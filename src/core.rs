use crate::field::{self, Field};
use crate::geometry::{Grid, Vec2D};
use rayon::prelude::*;
use std::sync::Arc;

/// Any type that implements [Aperture] is a transmission mask over the
/// pupil plane, and can be *sampled* at a single point or *evaluated* over a
/// whole [Grid].
///
/// Primitive shapes (see [crate::primitives]), spider vanes (see
/// [crate::spiders]), and composed pupils all implement [Aperture], so they
/// are interchangeable wherever a mask is expected. An [Aperture] captures
/// its geometric parameters when it is constructed and holds no mutable
/// state, so evaluating it twice on the same grid gives identical fields
/// and evaluating it from many threads at once needs no synchronisation.
///
/// A mask that should block light where it is "true" (a spider vane, a bump
/// cover) is still an [Aperture]; the caller turns it into an obstruction by
/// wrapping it in a [Complement].
pub trait Aperture: Send + Sync {
    /// Transmission at point `p`, in `[0, 1]`.
    fn sample(&self, p: &Vec2D) -> f64;

    /// Evaluate the [Aperture] at every point of `grid`.
    ///
    /// Points are sampled in parallel, but the returned [Field] is always in
    /// grid order.
    fn evaluate(&self, grid: &Grid) -> Field {
        grid.points()
        .par_iter()
        .map(|p| self.sample(p))
        .collect::<Vec<f64>>()
        .into()
    }

    /// Move the [Aperture] behind a shared, reference counted handle.
    fn shared(self) -> ApertureRef where Self: Sized + 'static {
        Arc::new(self)
    }
}

/// Shared handle to any [Aperture].
///
/// Cloning an [ApertureRef] shares the same immutable mask; no deep copy is
/// made.
pub type ApertureRef = Arc<dyn Aperture>;

/// Closure adapter: any `Fn(&Vec2D) -> f64` is an [Aperture].
/// ```
/// use pupilgen::{Aperture, Vec2D};
/// let half_plane = pupilgen::from_fn(|p: &Vec2D| if p.x >= 0.0 {1.0} else {0.0});
/// assert_eq!(half_plane.sample(&Vec2D::new(1.0, 0.0)), 1.0);
/// assert_eq!(half_plane.sample(&Vec2D::new(-1.0, 0.0)), 0.0);
/// ```
pub struct FnAperture<F> {
    func: F,
}

/// Wrap a closure as an [Aperture].
pub fn from_fn<F>(func: F) -> FnAperture<F>
where F: Fn(&Vec2D) -> f64 + Send + Sync
{
    FnAperture {func}
}

impl<F> Aperture for FnAperture<F>
where F: Fn(&Vec2D) -> f64 + Send + Sync
{
    fn sample(&self, p: &Vec2D) -> f64 {
        (self.func)(p)
    }
}

/// Intersection of the transmissive regions of several [Aperture]s.
///
/// The sample is the product of the factors' samples, so it is 1 only
/// where every factor transmits. The order of the factors does not affect
/// the result. An empty [Intersection] transmits everywhere.
pub struct Intersection {
    factors: Vec<ApertureRef>,
}

impl Intersection {
    pub fn new(factors: Vec<ApertureRef>) -> Self {
        Self {factors}
    }
    pub fn factors(&self) -> &[ApertureRef] {
        &self.factors
    }
}

impl Aperture for Intersection {
    fn sample(&self, p: &Vec2D) -> f64 {
        self.factors
        .iter()
        .fold(1.0, |acc, a| field::intersect(acc, a.sample(p)))
    }
}

/// Complement of an [Aperture]: transmits wherever the inner mask does not.
pub struct Complement {
    inner: ApertureRef,
}

impl Complement {
    pub fn new(inner: ApertureRef) -> Self {
        Self {inner}
    }
}

impl Aperture for Complement {
    fn sample(&self, p: &Vec2D) -> f64 {
        field::complement(self.inner.sample(p))
    }
}

/// Union of [Aperture]s that never overlap, e.g., the segments of a
/// segmented primary mirror.
///
/// The parts are summed, so the result is only a valid transmission if at
/// most one part is nonzero at any point. Samples are accumulated point by
/// point, so no per-part [Field] is held during evaluation.
pub struct DisjointUnion {
    parts: Vec<ApertureRef>,
}

impl DisjointUnion {
    pub fn new(parts: Vec<ApertureRef>) -> Self {
        Self {parts}
    }
    pub fn parts(&self) -> &[ApertureRef] {
        &self.parts
    }
}

impl Aperture for DisjointUnion {
    fn sample(&self, p: &Vec2D) -> f64 {
        self.parts
        .iter()
        .fold(0.0, |acc, a| field::disjoint_union(acc, a.sample(p)))
    }
}
