//! Primitive shape predicates.
//!
//! Each primitive is a binary mask: 1 inside the shape, 0 outside. Shapes
//! with a non-positive size are degenerate and transmit nowhere.
//!
//! `angle` arguments of the ellipse and polygon rotate the *sampling frame*,
//! so a shape built with `angle = -theta` appears rotated by `+theta`.

use crate::core::Aperture;
use crate::geometry::Vec2D;
use std::f64::consts::PI;

fn indicator(inside: bool) -> f64 {
    if inside {1.0} else {0.0}
}

/// Filled circle of a given diameter.
#[derive(Debug,Clone)]
pub struct CircularAperture {
    diameter: f64,
    center: Vec2D,
}

impl CircularAperture {
    pub fn new(diameter: f64, center: Vec2D) -> Self {
        Self {diameter, center}
    }
}

impl Aperture for CircularAperture {
    fn sample(&self, p: &Vec2D) -> f64 {
        if self.diameter <= 0.0 {
            return 0.0;
        }
        indicator((p - &self.center).norm2() <= (self.diameter / 2.0).powi(2))
    }
}

/// Annulus centred on the optical axis: transmits inside the outer diameter
/// and outside the central obscuration.
#[derive(Debug,Clone)]
pub struct ObstructedCircularAperture {
    diameter: f64,
    /// inner radius divided by outer radius
    obscuration_ratio: f64,
}

impl ObstructedCircularAperture {
    pub fn new(diameter: f64, obscuration_ratio: f64) -> Self {
        Self {diameter, obscuration_ratio}
    }
}

impl Aperture for ObstructedCircularAperture {
    fn sample(&self, p: &Vec2D) -> f64 {
        if self.diameter <= 0.0 {
            return 0.0;
        }
        let r2 = p.norm2();
        let outer = self.diameter / 2.0;
        let inner = outer * self.obscuration_ratio;
        indicator(r2 <= outer.powi(2) && r2 > inner.powi(2))
    }
}

/// Filled ellipse with full axis lengths `diameters` along its local axes.
#[derive(Debug,Clone)]
pub struct EllipticalAperture {
    diameters: [f64; 2],
    center: Vec2D,
    angle: f64,
}

impl EllipticalAperture {
    pub fn new(diameters: [f64; 2], center: Vec2D, angle: f64) -> Self {
        Self {diameters, center, angle}
    }
}

impl Aperture for EllipticalAperture {
    fn sample(&self, p: &Vec2D) -> f64 {
        let [dx, dy] = self.diameters;
        if dx <= 0.0 || dy <= 0.0 {
            return 0.0;
        }
        let local = (p - &self.center).rotated(self.angle);
        indicator((local.x / (dx / 2.0)).powi(2) + (local.y / (dy / 2.0)).powi(2) <= 1.0)
    }
}

/// Regular polygon given by its number of sides and the diameter of its
/// circumscribed circle. With `angle = 0` the first vertex lies on the
/// local x-axis.
#[derive(Debug,Clone)]
pub struct RegularPolygonAperture {
    num_sides: u32,
    circum_diameter: f64,
    angle: f64,
    center: Vec2D,
}

impl RegularPolygonAperture {
    pub fn new(num_sides: u32, circum_diameter: f64, angle: f64, center: Vec2D) -> Self {
        Self {num_sides, circum_diameter, angle, center}
    }
}

impl Aperture for RegularPolygonAperture {
    fn sample(&self, p: &Vec2D) -> f64 {
        if self.num_sides < 3 || self.circum_diameter <= 0.0 {
            return 0.0;
        }
        let n = f64::from(self.num_sides);
        let apothem = self.circum_diameter / 2.0 * (PI / n).cos();
        let local = (p - &self.center).rotated(self.angle);
        // edge normals sit halfway between consecutive vertices
        let inside = (0..self.num_sides)
        .map(|k| PI / n + 2.0 * PI * f64::from(k) / n)
        .all(|phi| local.dot(&Vec2D::from_polar(1.0, phi)) <= apothem);
        indicator(inside)
    }
}

/// Half-infinite straight bar of a given width, starting at `anchor` and
/// running along `orientation` (radians, counter-clockwise from +x).
///
/// This is an obstruction predicate: it is 1 *on* the bar. Wrap it in a
/// [crate::Complement] to use it as a spider.
#[derive(Debug,Clone)]
pub struct SpiderRay {
    anchor: Vec2D,
    orientation: f64,
    width: f64,
}

impl SpiderRay {
    pub fn new(anchor: Vec2D, orientation: f64, width: f64) -> Self {
        Self {anchor, orientation, width}
    }
    pub fn anchor(&self) -> &Vec2D {
        &self.anchor
    }
    pub fn orientation(&self) -> f64 {
        self.orientation
    }
    pub fn width(&self) -> f64 {
        self.width
    }
}

impl Aperture for SpiderRay {
    fn sample(&self, p: &Vec2D) -> f64 {
        let local = p.to_local(&self.anchor, self.orientation);
        indicator(local.x >= 0.0 && local.y.abs() <= self.width / 2.0)
    }
}
