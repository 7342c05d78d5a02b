//! Spider vanes and truss legs.
//!
//! Everything built here is an *obstruction* predicate (1 on the vane); the
//! pupil builders complement each vane before intersecting it with the rest
//! of the pupil.

use crate::core::Aperture;
use crate::geometry::Vec2D;
use crate::primitives::SpiderRay;
use crate::utils::symmetric_angles;
use log::trace;
use std::f64::consts::{FRAC_PI_4, PI};

/// Tapering strut: a wedge starting at `start` with full width `width`,
/// whose half-width grows by `tan(divergence)` per unit length along
/// `orientation`.
#[derive(Debug,Clone)]
pub struct DivergingVane {
    start: Vec2D,
    width: f64,
    divergence: f64,
    orientation: f64,
}

impl DivergingVane {
    pub fn new(start: Vec2D, width: f64, divergence: f64, orientation: f64) -> Self {
        Self {start, width, divergence, orientation}
    }
    pub fn start(&self) -> &Vec2D {
        &self.start
    }
    pub fn width(&self) -> f64 {
        self.width
    }
    pub fn orientation(&self) -> f64 {
        self.orientation
    }
}

impl Aperture for DivergingVane {
    fn sample(&self, p: &Vec2D) -> f64 {
        let local = p.to_local(&self.start, self.orientation);
        let half_width = self.divergence.tan() * local.x.abs() + self.width / 2.0;
        if local.x >= 0.0 && local.y.abs() < half_width {1.0} else {0.0}
    }
}

/// Four straight vanes in two mirrored pairs.
///
/// The first pair starts at `offset` with `widths[0]`; the second starts at
/// `-offset` with `widths[1]`. Vane `i` has its anchor moved by
/// `corrections[i]`, then runs towards the point of the pupil rim (radius
/// `rim_radius`) at 45, 135, -45 and -135 degrees respectively. Since the
/// anchors are off-axis, the vanes are not quite diagonal.
pub fn mirrored_vane_pairs(
    offset: &Vec2D,
    corrections: &[Vec2D; 4],
    widths: [f64; 2],
    rim_radius: f64,
) -> [SpiderRay; 4] {
    let layout = [
        (offset.clone(), FRAC_PI_4, widths[0]),
        (offset.clone(), PI - FRAC_PI_4, widths[0]),
        (-offset, -FRAC_PI_4, widths[1]),
        (-offset, FRAC_PI_4 - PI, widths[1]),
    ];
    std::array::from_fn(|i| {
        let (anchor, rim_angle, width) = &layout[i];
        let anchor = anchor + &corrections[i];
        let rim = Vec2D::from_polar(rim_radius, *rim_angle);
        let (_, orientation) = (&rim - &anchor).polar();
        trace!(
            "straight vane at ({:.4}, {:.4}), {:.2} deg, width {:.4}",
            anchor.x, anchor.y, orientation.to_degrees(), width
        );
        SpiderRay::new(anchor, orientation, *width)
    })
}

/// Geometry of a truss with one attachment point per leg group, all
/// lengths in the same unit as the pupil it obstructs and all angles in
/// radians.
#[derive(Debug,Clone,PartialEq)]
pub struct TrussParams {
    /// number of attachment points around the optical axis
    pub num_attachments: u32,
    /// polar angle of the first attachment point
    pub start_angle: f64,
    /// distance of the attachment points from the optical axis
    pub attachment_radius: f64,
    /// angle between each leg of a pair and the radial line through its attachment
    pub leg_angle: f64,
    pub leg_width: f64,
    pub leg_divergence: f64,
    /// distance of the brace's start from the optical axis
    pub brace_radius: f64,
    /// polar angle of the brace's start relative to its attachment point
    pub brace_angle_offset: f64,
    /// direction of the brace relative to the radial line through its attachment
    pub brace_orientation: f64,
    pub brace_width: f64,
    pub brace_divergence: f64,
}

/// Legs of a truss: at every attachment point, a pair of legs leaves at
/// `±leg_angle` about the radial direction, and a single brace starts at
/// `brace_radius` and `brace_angle_offset` from the attachment and runs
/// along `brace_orientation`.
///
/// The leg pairs come first, in attachment order, followed by the braces.
pub fn truss_legs(truss: &TrussParams) -> Vec<DivergingVane> {
    let angles: Vec<f64> = symmetric_angles(truss.num_attachments, truss.start_angle).collect();
    let pairs = angles.iter().flat_map(|&theta| {
        let start = Vec2D::from_polar(truss.attachment_radius, theta);
        [-truss.leg_angle, truss.leg_angle].map(|side| {
            DivergingVane::new(
                start.clone(),
                truss.leg_width,
                truss.leg_divergence,
                theta + side,
            )
        })
    });
    let braces = angles.iter().map(|&theta| {
        DivergingVane::new(
            Vec2D::from_polar(truss.brace_radius, theta + truss.brace_angle_offset),
            truss.brace_width,
            truss.brace_divergence,
            theta + truss.brace_orientation,
        )
    });
    let legs: Vec<DivergingVane> = pairs.chain(braces).collect();
    for leg in &legs {
        trace!(
            "truss leg at ({:.4}, {:.4}), {:.1} deg, width {:.4}",
            leg.start.x, leg.start.y, leg.orientation.to_degrees(), leg.width
        );
    }
    legs
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq};

    fn truss() -> TrussParams {
        TrussParams {
            num_attachments: 3,
            start_angle: 90f64.to_radians(),
            attachment_radius: 2.0,
            leg_angle: 15f64.to_radians(),
            leg_width: 0.1,
            leg_divergence: 0.5f64.to_radians(),
            brace_radius: 2.8,
            brace_angle_offset: 60f64.to_radians(),
            brace_orientation: 60f64.to_radians(),
            brace_width: 0.3,
            brace_divergence: 1f64.to_radians(),
        }
    }

    fn no_corrections() -> [Vec2D; 4] {
        [Vec2D::origin(), Vec2D::origin(), Vec2D::origin(), Vec2D::origin()]
    }

    #[test]
    fn diverging_vane_widens() {
        let v = DivergingVane::new(Vec2D::origin(), 0.2, 10f64.to_radians(), 0.0);
        // at the start only the start width is blocked
        assert_eq!(v.sample(&Vec2D::new(0.0, 0.09)), 1.0);
        assert_eq!(v.sample(&Vec2D::new(0.0, 0.2)), 0.0);
        // 1 unit along, half-width is tan(10 deg) + 0.1 ~ 0.276
        assert_eq!(v.sample(&Vec2D::new(1.0, 0.25)), 1.0);
        assert_eq!(v.sample(&Vec2D::new(1.0, -0.25)), 1.0);
        assert_eq!(v.sample(&Vec2D::new(1.0, 0.3)), 0.0);
        // nothing behind the start
        assert_eq!(v.sample(&Vec2D::new(-1.0, 0.0)), 0.0);
    }

    #[test]
    fn diverging_vane_orientation() {
        let v = DivergingVane::new(Vec2D::new(1.0, 1.0), 0.1, 0.0, PI);
        assert_eq!(v.sample(&Vec2D::new(-3.0, 1.0)), 1.0);
        assert_eq!(v.sample(&Vec2D::new(3.0, 1.0)), 0.0);
    }

    #[test]
    fn mirrored_pairs_layout() {
        let offset = Vec2D::new(0.0, 0.34);
        let vanes = mirrored_vane_pairs(&offset, &no_corrections(), [0.1, 0.2], 3.25);
        assert_abs_diff_eq!(*vanes[0].anchor(), offset);
        assert_abs_diff_eq!(*vanes[2].anchor(), -&offset);
        // aimed from the anchor at the rim point on the diagonal
        let e = 3.25 / 2f64.sqrt();
        let tilt = (e - 0.34).atan2(e).to_degrees();
        assert_abs_diff_eq!(vanes[0].orientation().to_degrees(), tilt, epsilon = 1e-12);
        assert_abs_diff_eq!(vanes[1].orientation().to_degrees(), 180.0 - tilt, epsilon = 1e-12);
        assert_abs_diff_eq!(vanes[2].orientation().to_degrees(), -tilt, epsilon = 1e-12);
        assert_abs_diff_eq!(vanes[3].orientation().to_degrees(), tilt - 180.0, epsilon = 1e-12);
        assert_eq!(vanes[1].width(), 0.1);
        assert_eq!(vanes[3].width(), 0.2);
        assert_eq!(vanes[0].sample(&Vec2D::new(e, e)), 1.0);
        assert_eq!(vanes[1].sample(&Vec2D::new(-e, e)), 1.0);
        assert_eq!(vanes[2].sample(&Vec2D::new(e, -e)), 1.0);
        assert_eq!(vanes[3].sample(&Vec2D::new(-e, -e)), 1.0);
        // off the vane: this point is on the 45 degree line through the anchor
        assert_eq!(vanes[0].sample(&Vec2D::new(2.0, 2.34)), 0.0);
        assert_eq!(vanes[0].sample(&Vec2D::new(-2.0, 2.34)), 0.0);
    }

    #[test]
    fn corrections_move_anchors() {
        let offset = Vec2D::new(0.0, 0.34);
        let corrections = [
            Vec2D::new(0.01, 0.0),
            Vec2D::new(0.0, 0.02),
            Vec2D::new(-0.03, 0.0),
            Vec2D::new(0.0, -0.04),
        ];
        let vanes = mirrored_vane_pairs(&offset, &corrections, [0.1, 0.1], 3.25);
        assert_abs_diff_eq!(*vanes[0].anchor(), Vec2D::new(0.01, 0.34));
        assert_abs_diff_eq!(*vanes[1].anchor(), Vec2D::new(0.0, 0.36), epsilon = 1e-15);
        assert_abs_diff_eq!(*vanes[2].anchor(), Vec2D::new(-0.03, -0.34));
        assert_abs_diff_eq!(*vanes[3].anchor(), Vec2D::new(0.0, -0.38), epsilon = 1e-15);
        // corrected anchors still aim at their rim points
        let e = 3.25 / 2f64.sqrt();
        assert_eq!(vanes[0].sample(&Vec2D::new(e, e)), 1.0);
        assert_eq!(vanes[3].sample(&Vec2D::new(-e, -e)), 1.0);
    }

    #[test]
    fn vane_direction_is_scale_free() {
        let offset = Vec2D::new(0.0, 0.34);
        let metres = mirrored_vane_pairs(&offset, &no_corrections(), [0.1, 0.1], 3.25);
        let unit = mirrored_vane_pairs(&(&offset / 6.5), &no_corrections(), [0.1, 0.1], 0.5);
        for (m, u) in metres.iter().zip(unit.iter()) {
            assert_abs_diff_eq!(m.orientation(), u.orientation(), epsilon = 1e-12);
        }
    }

    #[test]
    fn truss_has_three_leg_pairs_and_three_braces() {
        let legs = truss_legs(&truss());
        assert_eq!(legs.len(), 9);
        assert!(legs[..6].iter().all(|l| l.width() == 0.1));
        assert!(legs[6..].iter().all(|l| l.width() == 0.3));
        // first attachment point is on +y, its legs are symmetric about it
        assert_abs_diff_eq!(*legs[0].start(), Vec2D::new(0.0, 2.0), epsilon = 1e-12);
        assert_abs_diff_eq!(legs[0].orientation().to_degrees(), 75.0, epsilon = 1e-12);
        assert_abs_diff_eq!(legs[1].orientation().to_degrees(), 105.0, epsilon = 1e-12);
        // this brace runs radially at 150 degrees
        assert_abs_diff_eq!(legs[6].orientation().to_degrees(), 150.0, epsilon = 1e-12);
        assert_abs_diff_eq!(legs[6].start().norm(), 2.8, epsilon = 1e-12);
    }

    #[test]
    fn brace_direction_is_independent_of_its_start() {
        let params = TrussParams {
            brace_angle_offset: 2f64.to_radians(),
            brace_orientation: 100f64.to_radians(),
            ..truss()
        };
        let legs = truss_legs(&params);
        let brace = &legs[6];
        assert_abs_diff_eq!(brace.start().polar().1.to_degrees(), 92.0, epsilon = 1e-12);
        assert_abs_diff_eq!(brace.orientation().to_degrees(), 190.0, epsilon = 1e-12);
    }

    #[test]
    fn truss_is_three_fold_symmetric() {
        let legs = truss_legs(&truss());
        let rot = 120f64.to_radians();
        let p = Vec2D::new(0.3, 3.0);
        let hits = |q: &Vec2D| legs.iter().map(|l| l.sample(q)).sum::<f64>();
        assert_eq!(hits(&p), hits(&p.rotated(rot)));
        assert_eq!(hits(&p), hits(&p.rotated(2.0 * rot)));
    }
}
