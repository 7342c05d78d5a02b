//! Parameter derivation: from instrument metrology to pupil geometry.
//!
//! Every derived parameter set is in a single unit, either metres at pupil
//! scale or, when `normalized` is requested, fractions of the pupil
//! diameter. Normalisation is applied to the complete set in one step.

use crate::config::{GmtConfig, MagellanMaskConfig};
use crate::geometry::Vec2D;
use crate::gmt::GmtOptions;
use crate::spiders::TrussParams;
use std::f64::consts::FRAC_PI_2;

/// Circular cover position and size in the pupil frame.
#[derive(Debug,Clone,PartialEq)]
pub struct BumpParams {
    pub diameter: f64,
    pub center: Vec2D,
}

/// Resolved geometry of a Magellan pupil-plane mask.
#[derive(Debug,Clone,PartialEq)]
pub struct MagellanMaskParams {
    /// 6.5 m, or 1 when normalized
    pub pupil_diameter: f64,
    /// outer diameter of the transmissive annulus
    pub outer_diameter: f64,
    /// inner radius over outer radius of the annulus
    pub obscuration_ratio: f64,
    pub spider_widths: [f64; 2],
    pub spider_offset: Vec2D,
    pub spider_corrections: [Vec2D; 4],
    pub bump: Option<BumpParams>,
}

impl MagellanMaskParams {
    pub fn derive(config: &MagellanMaskConfig, normalized: bool) -> Self {
        let mag = config.magnification();
        let bump = config.bump.as_ref().map(|b| {
            // rotate the photograph frame onto the pupil frame
            let (radius, theta) = (&b.position * mag).polar();
            let theta = theta - b.frame_rotation_deg.to_radians() + FRAC_PI_2;
            BumpParams {
                diameter: b.diameter * mag,
                center: Vec2D::from_polar(radius, theta),
            }
        });
        let params = Self {
            pupil_diameter: config.pupil_diameter,
            outer_diameter: config.mask_outer_diameter * mag,
            obscuration_ratio: config.mask_inner_diameter / config.mask_outer_diameter,
            spider_widths: config.spider_widths.map(|w| w * mag),
            spider_offset: config.spider_offset.clone(),
            spider_corrections: config.spider_corrections.clone(),
            bump,
        };
        if normalized {
            params.normalized()
        } else {
            params
        }
    }

    /// Same geometry with every length divided by the pupil diameter.
    fn normalized(self) -> Self {
        let d = self.pupil_diameter;
        Self {
            pupil_diameter: 1.0,
            outer_diameter: self.outer_diameter / d,
            obscuration_ratio: self.obscuration_ratio,
            spider_widths: self.spider_widths.map(|w| w / d),
            spider_offset: self.spider_offset / d,
            spider_corrections: self.spider_corrections.map(|c| c / d),
            bump: self.bump.map(|b| BumpParams {
                diameter: b.diameter / d,
                center: b.center / d,
            }),
        }
    }
}

/// Polygonal plate covering the truss attachments.
#[derive(Debug,Clone,PartialEq)]
pub struct AttachmentParams {
    pub num_sides: u32,
    pub circum_diameter: f64,
    /// sampling-frame rotation that puts a vertex on each attachment point
    pub angle: f64,
}

/// Resolved geometry of the segmented GMT primary.
#[derive(Debug,Clone,PartialEq)]
pub struct GmtParams {
    /// 25.448 m, or 1 when normalized
    pub pupil_diameter: f64,
    /// undersized diameter of the on-axis segment
    pub on_axis_size: f64,
    /// undersized diameter of an off-axis segment, before projection
    pub off_axis_size: f64,
    /// distance from the optical axis to each off-axis segment centre
    pub segment_distance: f64,
    /// radians
    pub off_axis_tilt: f64,
    pub num_off_axis: u32,
    /// hole diameter over on-axis segment diameter
    pub central_hole_ratio: f64,
    pub truss: TrussParams,
    pub attachment: AttachmentParams,
}

impl GmtParams {
    pub fn derive(config: &GmtConfig, options: &GmtOptions) -> Self {
        let off_axis_tilt = config.off_axis_tilt_deg.to_radians();
        let on_axis_size = config.on_axis_segment_size * options.undersize;
        let off_axis_size = config.off_axis_segment_size * options.undersize;
        // placement keeps the as-designed spacing while the segments shrink
        let segment_distance = (on_axis_size / 2.0
            + off_axis_size * off_axis_tilt.cos() / 2.0
            + config.segment_gap) / options.undersize;
        let t = &config.truss;
        let start_angle = t.start_angle_deg.to_radians();
        let params = Self {
            pupil_diameter: config.pupil_diameter,
            on_axis_size,
            off_axis_size,
            segment_distance,
            off_axis_tilt,
            num_off_axis: config.num_off_axis_segments,
            central_hole_ratio: config.central_hole_diameter / on_axis_size,
            truss: TrussParams {
                num_attachments: t.num_attachments,
                start_angle,
                attachment_radius: t.attachment_radius,
                leg_angle: t.leg_angle_deg.to_radians(),
                leg_width: t.leg_width * options.spider_width,
                leg_divergence: t.leg_divergence_deg.to_radians(),
                brace_radius: t.brace_radius,
                brace_angle_offset: t.brace_angle_offset_deg.to_radians(),
                brace_orientation: t.brace_orientation_deg.to_radians(),
                brace_width: t.brace_width * options.spider_width,
                brace_divergence: t.brace_divergence_deg.to_radians(),
            },
            attachment: AttachmentParams {
                num_sides: t.attachment_sides,
                circum_diameter: t.attachment_diameter * options.truss_oversize,
                angle: -start_angle,
            },
        };
        if options.normalized {
            params.normalized()
        } else {
            params
        }
    }

    /// Same geometry with every length divided by the pupil diameter.
    fn normalized(self) -> Self {
        let d = self.pupil_diameter;
        Self {
            pupil_diameter: 1.0,
            on_axis_size: self.on_axis_size / d,
            off_axis_size: self.off_axis_size / d,
            segment_distance: self.segment_distance / d,
            truss: TrussParams {
                attachment_radius: self.truss.attachment_radius / d,
                leg_width: self.truss.leg_width / d,
                brace_radius: self.truss.brace_radius / d,
                brace_width: self.truss.brace_width / d,
                ..self.truss
            },
            attachment: AttachmentParams {
                circum_diameter: self.attachment.circum_diameter / d,
                ..self.attachment
            },
            ..self
        }
    }
}
