use std::ops;
use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

/// 2D geometric vector in the pupil plane.
///
/// This struct is used for defining displacements, coordinates, and directions
/// in the pupil plane, e.g., segment centres, spider anchors, and the sample
/// points of a [Grid].
/// # Examples
/// ```
/// let a = pupilgen::Vec2D::new(3.0, 4.0);
/// assert_eq!(a.norm(),5.0);
/// let b = &a * 2.0;
/// assert_eq!(b.norm(),10.0);
/// let e_x = pupilgen::Vec2D::x_unit();
/// let e_y = pupilgen::Vec2D::y_unit();
/// assert_eq!(e_x.dot(&e_y), 0.0);
/// assert_eq!(e_x.dot(&e_x), 1.0);
/// assert_eq!(e_x.dot(&a), 3.0);
/// assert_eq!((e_x / 2.0).x, 0.5);
/// ```
#[derive(Debug,Clone,PartialEq,Default,Serialize,Deserialize)]
pub struct Vec2D {
    pub x: f64,
    pub y: f64,
}

impl Vec2D {
    /// Create a new [Vec2D] from the coordinates in the pupil plane.
    pub fn new(x: f64, y: f64) -> Self {
        Self {x,y}
    }
    /// The origin of the pupil plane.
    pub fn origin() -> Self {
        Self {x:0.0, y:0.0}
    }
    /// Unit vector along the x-axis.
    pub fn x_unit() -> Self {
        Self {x:1.0, y:0.0}
    }
    /// Unit vector along the y-axis.
    pub fn y_unit() -> Self {
        Self {x:0.0, y:1.0}
    }
    /// Create a [Vec2D] from polar coordinates, `theta` in radians measured
    /// counter-clockwise from the x-axis.
    /// ```
    /// let v = pupilgen::Vec2D::from_polar(2.0, std::f64::consts::FRAC_PI_2);
    /// assert!(v.x.abs() < 1e-15);
    /// assert_eq!(v.y, 2.0);
    /// ```
    pub fn from_polar(radius: f64, theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self {x: radius*c, y: radius*s}
    }
    /// The `(radius, theta)` polar form of the [Vec2D].
    pub fn polar(&self) -> (f64, f64) {
        (self.x.hypot(self.y), self.y.atan2(self.x))
    }
    /// Euclidean norm of the [Vec2D].
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
    /// Squared Euclidean norm of the [Vec2D].
    pub fn norm2(&self) -> f64 {
        self.x*self.x + self.y*self.y
    }
    /// Dot product with another [Vec2D].
    pub fn dot(&self, other: &Self) -> f64 {
        self.x*other.x+self.y*other.y
    }
    /// Rotate the [Vec2D] counter-clockwise about the origin by `angle` radians.
    pub fn rotated(&self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            x: c*self.x - s*self.y,
            y: s*self.x + c*self.y,
        }
    }
    /// Express `self` in a frame whose origin sits at `origin` and whose
    /// x-axis points along `orientation` (radians).
    pub fn to_local(&self, origin: &Self, orientation: f64) -> Self {
        (self - origin).rotated(-orientation)
    }
    /// Uniformly spaced points between two [Vec2D]s.
    ///
    /// The points are the centres of `npoints` equal intervals, so neither
    /// end point is included.
    pub fn linspace(a: &Self, b: &Self, npoints: u32) -> Vec<Self> {
        (0..npoints)
        .map(|u| (u as f64 / npoints as f64) + 1.0/ (2.0 * npoints as f64))
        .map(|t| (1.0-t)*a + t*b)
        .collect()
    }
}

impl_op_ex!(- |a:&Vec2D| -> Vec2D {
    Vec2D::new(-a.x, -a.y)
});

impl_op_ex_commutative!(/ |a:&Vec2D,b:&f64| -> Vec2D {
    Vec2D {
        x: a.x / b,
        y: a.y / b,
    }
});
impl_op_ex_commutative!(* |a:&Vec2D,b:&f64| -> Vec2D {
    Vec2D {
        x: a.x * b,
        y: a.y * b,
    }
});
impl_op_ex!(+ |a:&Vec2D,b:&Vec2D| -> Vec2D {
    Vec2D {
        x: a.x + b.x,
        y: a.y + b.y,
    }
});
impl_op_ex!(- |a:&Vec2D,b:&Vec2D| -> Vec2D {
    Vec2D {
        x: a.x - b.x,
        y: a.y - b.y,
    }
});

impl AbsDiffEq for Vec2D {
    type Epsilon = f64;
    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}


/// Ordered set of sample points in the pupil plane.
///
/// A [Grid] is never mutated after construction; the affine operations
/// return new grids. Every [crate::Field] produced by evaluating an
/// [crate::Aperture] on a grid is aligned positionally with its points.
/// # Examples
/// ```
/// // 4x4 pixel-centred samples over a 2 metre square
/// let grid = pupilgen::Grid::regular(4, 2.0);
/// assert_eq!(grid.len(), 16);
/// assert_eq!(grid.x()[0], -0.75);
/// assert_eq!(grid.y()[0], -0.75);
/// let shifted = grid.shifted(&pupilgen::Vec2D::new(0.75, 0.75));
/// assert_eq!(shifted.points()[0], pupilgen::Vec2D::origin());
/// ```
#[derive(Debug,Clone,PartialEq)]
pub struct Grid {
    points: Vec<Vec2D>,
}

impl Grid {
    /// Create a [Grid] from an arbitrary list of points.
    pub fn new(points: Vec<Vec2D>) -> Self {
        Self {points}
    }
    /// Square grid of `n x n` pixel-centred samples spanning `diameter` in
    /// both axes and centred on the optical axis. Points are ordered with
    /// y as the outer (slow) index and x as the inner (fast) index.
    pub fn regular(n: u32, diameter: f64) -> Self {
        let r = diameter / 2.0;
        let xx = Vec2D::linspace(
            &Vec2D::new(-r, 0.0),
            &Vec2D::new( r, 0.0),
            n,
        );
        let yy = Vec2D::linspace(
            &Vec2D::new(0.0, -r),
            &Vec2D::new(0.0,  r),
            n,
        );
        let points = yy.iter()
        .flat_map(|y|
            xx.iter().map(move |x| x+y)
        ).collect();
        Self {points}
    }
    /// Borrow the sample points.
    pub fn points(&self) -> &[Vec2D] {
        &self.points
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    /// x-coordinate of every point, in grid order.
    pub fn x(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }
    /// y-coordinate of every point, in grid order.
    pub fn y(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
    /// New [Grid] with every point displaced by `shift`.
    pub fn shifted(&self, shift: &Vec2D) -> Self {
        Self {
            points: self.points.iter().map(|p| p + shift).collect()
        }
    }
    /// New [Grid] with every point rotated counter-clockwise about the
    /// origin by `angle` radians.
    pub fn rotated(&self, angle: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| p.rotated(angle)).collect()
        }
    }
    /// New [Grid] with every coordinate multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| p * factor).collect()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq};
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn linspace() {
        let a = Vec2D::new(1.0,2.0);
        let b = Vec2D::new(3.0,0.0);
        let ls = Vec2D::linspace(&a,&b,3);
        assert_abs_diff_eq!(ls[1].x, 2.0);
        assert_abs_diff_eq!(ls[1].y, 1.0);
    }

    #[test]
    fn norms() {
        let v = Vec2D::new(3.0, -4.0);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(v.norm2(), 25.0);
        assert_eq!(v.dot(&Vec2D::x_unit()), 3.0);
    }

    #[test]
    fn rotation_quarter_turn() {
        let a = Vec2D::x_unit().rotated(FRAC_PI_2);
        assert_abs_diff_eq!(a, Vec2D::y_unit(), epsilon = 1e-15);
        let b = Vec2D::new(1.0, 1.0).rotated(PI);
        assert_abs_diff_eq!(b, Vec2D::new(-1.0, -1.0), epsilon = 1e-15);
    }

    #[test]
    fn local_frame() {
        // a point one metre along a vane pointing at +y from (1, 1)
        let p = Vec2D::new(1.0, 2.0);
        let local = p.to_local(&Vec2D::new(1.0, 1.0), FRAC_PI_2);
        assert_abs_diff_eq!(local, Vec2D::x_unit(), epsilon = 1e-15);
    }

    #[test]
    fn regular_grid_is_centred() {
        let grid = Grid::regular(8, 4.0);
        assert_eq!(grid.len(), 64);
        let sx: f64 = grid.x().iter().sum();
        let sy: f64 = grid.y().iter().sum();
        assert_abs_diff_eq!(sx, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sy, 0.0, epsilon = 1e-12);
        // x is the fast index
        assert_abs_diff_eq!(grid.points()[1].x - grid.points()[0].x, 0.5);
        assert_abs_diff_eq!(grid.points()[1].y, grid.points()[0].y);
    }

    #[test]
    fn grid_operations_do_not_mutate() {
        let grid = Grid::regular(3, 3.0);
        let before = grid.clone();
        let _ = grid.rotated(1.0).shifted(&Vec2D::new(2.0, 0.0)).scaled(0.5);
        assert_eq!(grid, before);
    }

    #[test]
    fn grid_rotate_then_shift() {
        let grid = Grid::new(vec![Vec2D::x_unit()]);
        let moved = grid.rotated(FRAC_PI_2).shifted(&Vec2D::new(1.0, 0.0));
        assert_abs_diff_eq!(moved.points()[0], Vec2D::new(1.0, 1.0), epsilon = 1e-15);
    }

    proptest! {
        #[test]
        fn polar_round_trip(x in -10.0f64..10.0, y in -10.0f64..10.0) {
            let v = Vec2D::new(x, y);
            let (r, theta) = v.polar();
            let w = Vec2D::from_polar(r, theta);
            prop_assert!((w.x - x).abs() < 1e-12);
            prop_assert!((w.y - y).abs() < 1e-12);
        }

        #[test]
        fn rotation_preserves_norm(x in -10.0f64..10.0, y in -10.0f64..10.0, a in -7.0f64..7.0) {
            let v = Vec2D::new(x, y);
            prop_assert!((v.rotated(a).norm() - v.norm()).abs() < 1e-12);
        }
    }
}
