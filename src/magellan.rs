//! Magellan pupil-plane masks for the MagAO-X coronagraph.
//!
//! A mask is the intersection of a centrally obscured disk with the
//! complement of each spider vane and of the bump cover:
//! ```txt
//! disk * (1 - vane_1) * (1 - vane_2) * (1 - vane_3) * (1 - vane_4) * (1 - bump)
//! ```
//! # Examples
//! ```
//! use pupilgen::{Aperture, Grid, Vec2D};
//! let mask = pupilgen::make_magaox_bump_mask(false, true);
//! // inside the central obscuration
//! assert_eq!(mask.sample(&Vec2D::origin()), 0.0);
//! // on the annulus, between the lower vanes
//! assert_eq!(mask.sample(&Vec2D::new(0.0, -2.0)), 1.0);
//! let field = mask.evaluate(&Grid::regular(64, 6.5));
//! assert!(field.fill_factor() > 0.5);
//! ```

use crate::config::MagellanMaskConfig;
use crate::core::{Aperture, ApertureRef, Complement, Intersection};
use crate::params::MagellanMaskParams;
use crate::primitives::{CircularAperture, ObstructedCircularAperture};
use crate::spiders::mirrored_vane_pairs;
use log::debug;

/// Build the mask described by `config`.
///
/// With `normalized` the pupil diameter is 1 and every other length is a
/// fraction of it; otherwise lengths are in metres. Without `with_spiders`
/// the result is the bare obscured disk: no vanes and no bump cover.
pub fn make_magellan_mask(
    config: &MagellanMaskConfig,
    normalized: bool,
    with_spiders: bool,
) -> ApertureRef {
    debug_assert!(config.validate().is_ok(), "invalid Magellan mask config: {config:?}");
    let params = MagellanMaskParams::derive(config, normalized);
    debug!(
        "Magellan mask: outer diameter {:.4}, obscuration {:.4}, spiders {}",
        params.outer_diameter, params.obscuration_ratio, with_spiders
    );
    let pupil = ObstructedCircularAperture::new(
        params.outer_diameter,
        params.obscuration_ratio,
    ).shared();
    if !with_spiders {
        return pupil;
    }

    let vanes = mirrored_vane_pairs(
        &params.spider_offset,
        &params.spider_corrections,
        params.spider_widths,
        params.pupil_diameter / 2.0,
    );
    let mut factors = vec![pupil];
    factors.extend(
        vanes.into_iter().map(|v| Complement::new(v.shared()).shared())
    );
    if let Some(bump) = params.bump {
        debug!(
            "bump cover at ({:.4}, {:.4}), diameter {:.4}",
            bump.center.x, bump.center.y, bump.diameter
        );
        let cover = CircularAperture::new(bump.diameter, bump.center).shared();
        factors.push(Complement::new(cover).shared());
    }
    Intersection::new(factors).shared()
}

/// MagAO-X bump mask, 6.5 m across unless `normalized`.
pub fn make_magaox_bump_mask(normalized: bool, with_spiders: bool) -> ApertureRef {
    make_magellan_mask(&MagellanMaskConfig::bump_mask(), normalized, with_spiders)
}

/// MagAO-X large Lyot stop, 6.5 m across unless `normalized`.
pub fn make_magaox_large_lyot_stop(normalized: bool, with_spiders: bool) -> ApertureRef {
    make_magellan_mask(&MagellanMaskConfig::large_lyot_stop(), normalized, with_spiders)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BumpConfig;
    use crate::geometry::{Grid, Vec2D};
    use crate::params::MagellanMaskParams;

    fn bump_center(config: &MagellanMaskConfig) -> Vec2D {
        MagellanMaskParams::derive(config, false).bump.unwrap().center
    }

    #[test]
    fn vanes_obstruct() {
        let with = make_magaox_bump_mask(false, true);
        let without = make_magaox_bump_mask(false, false);
        // along the vane from (0, 0.34) to the rim point at 45 degrees
        let anchor = Vec2D::new(0.0, 0.34);
        let e = 6.5 / (2.0 * 2f64.sqrt());
        let rim = Vec2D::new(e, e);
        for t in [0.5, 0.7, 0.9] {
            let p = (1.0 - t) * &anchor + t * &rim;
            assert_eq!(with.sample(&p), 0.0, "{p:?} is not under the vane");
            assert_eq!(without.sample(&p), 1.0);
        }
        // the lower pair mirrors it
        let p = Vec2D::new(-2.068, -2.102);
        assert_eq!(with.sample(&p), 0.0);
    }

    #[test]
    fn normalized_vanes_follow_the_same_lines() {
        let mask = make_magaox_large_lyot_stop(true, true);
        let e = 1.0 / (2.0 * 2f64.sqrt());
        let anchor = Vec2D::new(0.0, 0.34 / 6.5);
        let p = 0.2 * &anchor + 0.8 * &Vec2D::new(-e, e);
        assert_eq!(mask.sample(&p), 0.0);
    }

    #[test]
    fn bump_is_covered() {
        let config = MagellanMaskConfig::bump_mask();
        let c = bump_center(&config);
        assert_eq!(make_magellan_mask(&config, false, true).sample(&c), 0.0);
        assert_eq!(make_magellan_mask(&config, false, false).sample(&c), 1.0);
    }

    #[test]
    fn lyot_stop_is_smaller_than_bump_mask() {
        let grid = Grid::regular(128, 6.6);
        let lyot = make_magaox_large_lyot_stop(false, true).evaluate(&grid);
        let bump = make_magaox_bump_mask(false, true).evaluate(&grid);
        assert!(lyot.fill_factor() < bump.fill_factor());
        assert!(lyot.fill_factor() > 0.0);
    }

    #[test]
    fn zero_size_bump_is_no_bump() {
        let mut zero = MagellanMaskConfig::bump_mask();
        zero.bump = Some(BumpConfig {
            diameter: 0.0,
            ..zero.bump.clone().unwrap()
        });
        let mut none = MagellanMaskConfig::bump_mask();
        none.bump = None;
        let grid = Grid::regular(96, 6.6);
        assert_eq!(
            make_magellan_mask(&zero, false, true).evaluate(&grid),
            make_magellan_mask(&none, false, true).evaluate(&grid),
        );
    }

    #[test]
    fn normalized_mask_matches_scaled_grid() {
        let grid = Grid::regular(101, 7.0);
        let metres = make_magaox_large_lyot_stop(false, true).evaluate(&grid);
        let unit = make_magaox_large_lyot_stop(true, true).evaluate(&grid.scaled(1.0 / 6.5));
        let mismatches = metres.values().iter()
        .zip(unit.values())
        .filter(|(a, b)| a != b)
        .count();
        assert!(mismatches <= grid.len() / 1000, "{mismatches} points differ");
    }
}
