//! Instrument metrology constants.
//!
//! Each telescope is described by one configuration struct holding the raw
//! constants it was measured with, in the units they were measured in. The
//! conversion to pupil-scale geometry happens in [crate::params]; nothing in
//! here is pre-scaled.
//!
//! Configs serialise with serde, so fitted values (e.g., the straight-vane
//! corrections) can be supplied from JSON without touching the code:
//! ```
//! let json = r#"{
//!     "pupil_diameter": 6.5,
//!     "reference_diameter": 9e-3,
//!     "mask_inner_diameter": 2.79e-3,
//!     "mask_outer_diameter": 8.604e-3,
//!     "spider_widths": [1.917e-4, 1.917e-4],
//!     "spider_offset": {"x": 0.0, "y": 0.34},
//!     "spider_corrections": [
//!         {"x": 0.004, "y": 0.0}, {"x": -0.004, "y": 0.0},
//!         {"x": 0.0, "y": 0.0}, {"x": 0.0, "y": 0.0}
//!     ],
//!     "bump": null
//! }"#;
//! let config = pupilgen::MagellanMaskConfig::from_json(json).unwrap();
//! assert_eq!(config.spider_corrections[0].x, 0.004);
//! ```

use crate::error::{check_non_negative, check_positive, check_ratio, ApertureError, ApertureResult};
use crate::geometry::Vec2D;
use serde::{Deserialize, Serialize};

/// Circular cover over a physical feature of the optic, measured on the
/// mask photograph.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct BumpConfig {
    /// diameter of the cover, metres at mask scale
    pub diameter: f64,
    /// centre of the cover, metres at mask scale, in the photograph frame
    pub position: Vec2D,
    /// rotation (degrees) from the photograph frame to the pupil frame,
    /// fitted so the cover sits on its support vane
    pub frame_rotation_deg: f64,
}

/// Magellan pupil-plane mask, as used in the MagAO-X coronagraph.
///
/// Mask dimensions were read off calibration photographs of a mask whose
/// pupil image is `reference_diameter` across; they are magnified to the
/// 6.5 m primary by `pupil_diameter / reference_diameter`. The spider offset
/// and corrections are already in pupil-scale metres.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct MagellanMaskConfig {
    /// physical diameter of the telescope pupil, metres
    pub pupil_diameter: f64,
    /// diameter of the pupil image on the mask, metres
    pub reference_diameter: f64,
    /// central obscuration diameter on the mask, metres at mask scale
    pub mask_inner_diameter: f64,
    /// outer diameter of the mask opening, metres at mask scale
    pub mask_outer_diameter: f64,
    /// widths of the `+offset` and `-offset` vane pairs, metres at mask scale
    pub spider_widths: [f64; 2],
    /// start point of the first vane pair, metres at pupil scale
    pub spider_offset: Vec2D,
    /// per-vane anchor corrections fitted against calibration images,
    /// metres at pupil scale
    pub spider_corrections: [Vec2D; 4],
    pub bump: Option<BumpConfig>,
}

impl MagellanMaskConfig {
    /// The MagAO-X bump mask: a slightly undersized Lyot stop with narrow
    /// vanes and a small cover over the primary mirror bump.
    pub fn bump_mask() -> Self {
        Self {
            pupil_diameter: 6.5,
            reference_diameter: 9e-3,
            mask_inner_diameter: 2.79e-3,
            mask_outer_diameter: 8.604e-3,
            spider_widths: [0.1917e-3, 0.1917e-3],
            spider_offset: Vec2D::new(0.0, 0.34),
            spider_corrections: Default::default(),
            bump: Some(BumpConfig {
                diameter: 0.5742e-3,
                position: Vec2D::new(2.853e-3, -0.6705e-3),
                frame_rotation_deg: 38.7747,
            }),
        }
    }

    /// The MagAO-X large Lyot stop: larger central obscuration, double
    /// width vanes and a double size bump cover.
    pub fn large_lyot_stop() -> Self {
        Self {
            pupil_diameter: 6.5,
            reference_diameter: 9e-3,
            mask_inner_diameter: 3.60017e-3,
            mask_outer_diameter: 8.02356e-3,
            spider_widths: [0.3830e-3, 0.3830e-3],
            spider_offset: Vec2D::new(0.0, 0.34),
            spider_corrections: Default::default(),
            bump: Some(BumpConfig {
                diameter: 1.149e-3,
                position: Vec2D::new(2.853e-3, -0.6705e-3),
                frame_rotation_deg: 38.7747,
            }),
        }
    }

    /// Magnification from mask scale to pupil scale.
    pub fn magnification(&self) -> f64 {
        self.pupil_diameter / self.reference_diameter
    }

    pub fn validate(&self) -> ApertureResult<()> {
        check_positive("pupil_diameter", self.pupil_diameter)?;
        check_positive("reference_diameter", self.reference_diameter)?;
        check_positive("mask_outer_diameter", self.mask_outer_diameter)?;
        check_ratio(
            "mask_inner_diameter / mask_outer_diameter",
            self.mask_inner_diameter / self.mask_outer_diameter,
        )?;
        for w in self.spider_widths {
            check_non_negative("spider_widths", w)?;
        }
        if let Some(bump) = &self.bump {
            check_non_negative("bump.diameter", bump.diameter)?;
        }
        Ok(())
    }

    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> ApertureResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Truss supporting the secondary mirror above the central segment, in
/// pupil-scale metres and degrees.
///
/// The defaults are fitted to the measured GMT truss shadow polygon: a
/// triangular hub whose vertices carry the attachments, a pair of tapering
/// legs leaving each vertex almost tangentially, and one straight brace
/// per vertex. The shadow's frame is turned by -30 degrees so that its
/// off-axis segments fall on ours, which start on the +x axis.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct TrussConfig {
    pub num_attachments: u32,
    /// polar angle of the first attachment point
    pub start_angle_deg: f64,
    /// root of each leg pair, just inside the hub vertex
    pub attachment_radius: f64,
    /// angle of each leg of a pair either side of the radial line
    pub leg_angle_deg: f64,
    /// leg width at the root
    pub leg_width: f64,
    /// half-angle by which a leg widens; 0.118 m at the root, 0.244 m at the rim
    pub leg_divergence_deg: f64,
    pub brace_radius: f64,
    /// polar angle of the brace root relative to its attachment point
    pub brace_angle_offset_deg: f64,
    /// brace direction relative to the radial line through its attachment
    pub brace_orientation_deg: f64,
    pub brace_width: f64,
    /// the brace has parallel edges
    pub brace_divergence_deg: f64,
    /// sides of the hub plate joining the truss at the attachments
    pub attachment_sides: u32,
    /// circumscribed diameter of that plate
    pub attachment_diameter: f64,
}

impl Default for TrussConfig {
    fn default() -> Self {
        Self {
            num_attachments: 3,
            start_angle_deg: 30.0,
            attachment_radius: 2.392,
            leg_angle_deg: 80.17,
            leg_width: 0.118,
            leg_divergence_deg: 1.2,
            brace_radius: 2.405,
            brace_angle_offset_deg: 1.88,
            brace_orientation_deg: 101.17,
            brace_width: 0.114,
            brace_divergence_deg: 0.0,
            attachment_sides: 3,
            attachment_diameter: 4.929,
        }
    }
}

/// Giant Magellan Telescope primary: one on-axis circular segment and
/// `num_off_axis_segments` tilted off-axis segments, from the GMT
/// architecture documents. Lengths in metres, angles in degrees.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct GmtConfig {
    pub pupil_diameter: f64,
    /// clear aperture of the on-axis segment
    pub on_axis_segment_size: f64,
    /// clear aperture of an off-axis segment, before projection
    pub off_axis_segment_size: f64,
    /// gap between neighbouring segments along the line joining them
    pub segment_gap: f64,
    /// tilt of the off-axis segments towards the optical axis
    pub off_axis_tilt_deg: f64,
    pub num_off_axis_segments: u32,
    /// diameter of the hole in the on-axis segment
    pub central_hole_diameter: f64,
    pub truss: TrussConfig,
}

impl Default for GmtConfig {
    fn default() -> Self {
        Self {
            pupil_diameter: 25.448,
            on_axis_segment_size: 8.365,
            off_axis_segment_size: 8.417,
            segment_gap: 0.359,
            off_axis_tilt_deg: 13.522,
            num_off_axis_segments: 6,
            central_hole_diameter: 3.495,
            truss: TrussConfig::default(),
        }
    }
}

impl GmtConfig {
    pub fn validate(&self) -> ApertureResult<()> {
        check_positive("pupil_diameter", self.pupil_diameter)?;
        check_positive("on_axis_segment_size", self.on_axis_segment_size)?;
        check_positive("off_axis_segment_size", self.off_axis_segment_size)?;
        check_non_negative("segment_gap", self.segment_gap)?;
        check_ratio(
            "central_hole_diameter / on_axis_segment_size",
            self.central_hole_diameter / self.on_axis_segment_size,
        )?;
        if !(0.0..90.0).contains(&self.off_axis_tilt_deg) {
            return Err(ApertureError::InvalidParameter {
                name: "off_axis_tilt_deg",
                value: self.off_axis_tilt_deg,
                reason: "must lie in [0, 90)",
            });
        }
        let t = &self.truss;
        check_non_negative("truss.leg_width", t.leg_width)?;
        check_non_negative("truss.brace_width", t.brace_width)?;
        check_non_negative("truss.attachment_radius", t.attachment_radius)?;
        check_non_negative("truss.brace_radius", t.brace_radius)?;
        check_non_negative("truss.attachment_diameter", t.attachment_diameter)?;
        Ok(())
    }

    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> ApertureResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
