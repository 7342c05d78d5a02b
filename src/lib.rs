//! # pupilgen
//! `pupilgen` - Telescope pupil and Lyot-stop masks in Rust.
//!
//! Masks are built by combining simple shapes (disks, ellipses, polygons and
//! spider vanes) with a small pointwise algebra: intersection by
//! multiplication, complement by `1 - mask`, and disjoint union by
//! summation. Every mask implements the [Aperture] trait and can be sampled
//! at a single [Vec2D] or evaluated over a whole [Grid].
//!
//! Three instrument pupils are provided:
//!  - [make_magaox_bump_mask] and [make_magaox_large_lyot_stop], the
//!    MagAO-X pupil-plane masks for the 6.5 m Magellan telescope, and
//!  - [make_gmt_aperture], the seven-segment Giant Magellan Telescope
//!    primary, optionally with its individual segments.
//!
//! Instrument constants live in [MagellanMaskConfig] and [GmtConfig];
//! [make_magellan_mask] and [make_gmt_aperture_with] build masks from any
//! such config.
//!
//! # Examples
//! ```
//! use pupilgen::{Aperture, Grid};
//! let grid = Grid::regular(128, 1.0);
//! let gmt = pupilgen::make_gmt_aperture(true, true, false, 1.0, 1.0, 1.0);
//! let pupil = gmt.evaluate(&grid);
//! assert_eq!(pupil.len(), grid.len());
//! assert!(pupil.max() <= 1.0);
//! ```

#[macro_use]
extern crate impl_ops;

mod config;
mod core;
mod error;
mod field;
mod geometry;
mod gmt;
mod magellan;
mod params;
mod spiders;
mod utils;
pub mod primitives;

pub use crate::config::{BumpConfig, GmtConfig, MagellanMaskConfig, TrussConfig};
pub use crate::core::{
    from_fn, Aperture, ApertureRef, Complement, DisjointUnion, FnAperture, Intersection,
};
pub use crate::error::{ApertureError, ApertureResult};
pub use crate::field::{complement, disjoint_union, intersect, Field};
pub use crate::geometry::{Grid, Vec2D};
pub use crate::gmt::{make_gmt_aperture, make_gmt_aperture_with, GmtOptions, SegmentedPupil};
pub use crate::magellan::{make_magaox_bump_mask, make_magaox_large_lyot_stop, make_magellan_mask};
pub use crate::params::{AttachmentParams, BumpParams, GmtParams, MagellanMaskParams};
pub use crate::spiders::{mirrored_vane_pairs, truss_legs, DivergingVane, TrussParams};
pub use crate::utils::*;
