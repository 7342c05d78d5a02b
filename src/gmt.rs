//! Segmented primary mirror of the Giant Magellan Telescope.
//!
//! The pupil is one on-axis circular segment (with its central hole and the
//! shadow of the secondary-mirror truss) surrounded by off-axis segments.
//! Each off-axis segment is tilted towards the optical axis, so in
//! projection it is an ellipse, foreshortened along the radial direction.
//!
//! Segments never overlap, so the full pupil is their sum. Individual
//! segment masks can be kept, e.g., to apply independent piston errors in
//! a co-phasing simulation.
//! # Examples
//! ```
//! use pupilgen::{Aperture, Grid, Vec2D};
//! let gmt = pupilgen::make_gmt_aperture(true, true, true, 1.0, 1.0, 1.0);
//! let segments = gmt.segments().unwrap();
//! assert_eq!(segments.len(), 7);
//! // the optical axis falls in the hole of the central segment
//! assert_eq!(gmt.sample(&Vec2D::origin()), 0.0);
//! let grid = Grid::regular(64, 1.0);
//! let per_segment = gmt.evaluate_segments(&grid).unwrap();
//! assert!(per_segment.iter().all(|f| f.count_nonzero() > 0));
//! ```

use crate::config::GmtConfig;
use crate::core::{Aperture, ApertureRef, Complement, DisjointUnion, Intersection};
use crate::field::Field;
use crate::geometry::{Grid, Vec2D};
use crate::params::GmtParams;
use crate::primitives::{EllipticalAperture, ObstructedCircularAperture, RegularPolygonAperture};
use crate::spiders::truss_legs;
use crate::utils::symmetric_angles;
use log::debug;

/// Options for [make_gmt_aperture_with].
///
/// `undersize`, `spider_width` and `truss_oversize` are multipliers on the
/// segment diameters, the truss leg widths and the truss attachment plate
/// respectively; the defaults of 1 reproduce the reference geometry. They
/// are not checked: a zero or negative value gives a degenerate pupil.
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GmtOptions {
    pub normalized: bool,
    pub with_spiders: bool,
    pub return_segments: bool,
    pub undersize: f64,
    pub spider_width: f64,
    pub truss_oversize: f64,
}

impl Default for GmtOptions {
    fn default() -> Self {
        Self {
            normalized: false,
            with_spiders: true,
            return_segments: false,
            undersize: 1.0,
            spider_width: 1.0,
            truss_oversize: 1.0,
        }
    }
}

/// Composite pupil plus, when requested, its individual segments.
///
/// Segment 0 is the on-axis segment; the off-axis segments follow
/// counter-clockwise from the +x axis. The segment handles share the masks
/// used inside the composite.
pub struct SegmentedPupil {
    aperture: ApertureRef,
    segments: Option<Vec<ApertureRef>>,
}

impl SegmentedPupil {
    /// The full pupil.
    pub fn aperture(&self) -> &ApertureRef {
        &self.aperture
    }
    /// The individual segments, if they were requested.
    pub fn segments(&self) -> Option<&[ApertureRef]> {
        self.segments.as_deref()
    }
    pub fn into_parts(self) -> (ApertureRef, Option<Vec<ApertureRef>>) {
        (self.aperture, self.segments)
    }
    /// Evaluate every segment on `grid`, if the segments were requested.
    pub fn evaluate_segments(&self, grid: &Grid) -> Option<Vec<Field>> {
        self.segments.as_ref().map(|segments|
            segments.iter().map(|s| s.evaluate(grid)).collect()
        )
    }
}

impl Aperture for SegmentedPupil {
    fn sample(&self, p: &Vec2D) -> f64 {
        self.aperture.sample(p)
    }
    fn evaluate(&self, grid: &Grid) -> Field {
        self.aperture.evaluate(grid)
    }
}

/// GMT pupil with the reference architecture constants.
///
/// Lengths are in metres (25.448 m pupil) unless `normalized`.
pub fn make_gmt_aperture(
    normalized: bool,
    with_spiders: bool,
    return_segments: bool,
    undersize: f64,
    spider_width: f64,
    truss_oversize: f64,
) -> SegmentedPupil {
    make_gmt_aperture_with(
        &GmtConfig::default(),
        &GmtOptions {
            normalized,
            with_spiders,
            return_segments,
            undersize,
            spider_width,
            truss_oversize,
        },
    )
}

/// GMT-like segmented pupil from an arbitrary [GmtConfig].
pub fn make_gmt_aperture_with(config: &GmtConfig, options: &GmtOptions) -> SegmentedPupil {
    debug_assert!(config.validate().is_ok(), "invalid GMT config: {config:?}");
    let params = GmtParams::derive(config, options);
    debug!(
        "GMT pupil: on-axis {:.4}, off-axis {:.4}, segment distance {:.4}, spiders {}",
        params.on_axis_size, params.off_axis_size, params.segment_distance, options.with_spiders
    );
    let mut segments = vec![central_segment(&params, options.with_spiders)];
    segments.extend(off_axis_segments(&params));

    let (aperture, segments) = if options.return_segments {
        (DisjointUnion::new(segments.clone()).shared(), Some(segments))
    } else {
        (DisjointUnion::new(segments).shared(), None)
    };
    SegmentedPupil {aperture, segments}
}

fn central_segment(params: &GmtParams, with_spiders: bool) -> ApertureRef {
    let disk = ObstructedCircularAperture::new(
        params.on_axis_size,
        params.central_hole_ratio,
    ).shared();
    if !with_spiders {
        return disk;
    }
    let mut factors = vec![disk];
    factors.extend(
        truss_legs(&params.truss)
        .into_iter()
        .map(|leg| Complement::new(leg.shared()).shared())
    );
    let plate = &params.attachment;
    let plate = RegularPolygonAperture::new(
        plate.num_sides,
        plate.circum_diameter,
        plate.angle,
        Vec2D::origin(),
    ).shared();
    factors.push(Complement::new(plate).shared());
    Intersection::new(factors).shared()
}

fn off_axis_segments(params: &GmtParams) -> Vec<ApertureRef> {
    let radial = params.off_axis_size * params.off_axis_tilt.cos();
    symmetric_angles(params.num_off_axis, 0.0)
    .map(|theta| {
        let center = Vec2D::from_polar(params.segment_distance, theta);
        // frame rotation of -theta turns the short axis to face the optical axis
        EllipticalAperture::new(
            [radial, params.off_axis_size],
            center,
            -theta,
        ).shared()
    })
    .collect()
}
