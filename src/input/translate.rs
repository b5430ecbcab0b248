//! Rotation-aware coordinate translation
//!
//! Converts an element's application-space position into device screen
//! coordinates given the current bounds snapshot. Each rotation branch uses a
//! different mix of the application-space `y` and the alternate vertical
//! coordinate `alt_y`; the asymmetry is intentional and must not be "fixed".

use crate::driver::traits::{Bounds, Rotation};

/// Translate an application-space position into device screen coordinates
///
/// `alt_y` is the alternate vertical coordinate the driver reports alongside
/// the application-space `y`; which of the two feeds the vertical axis depends
/// on the rotation branch.
pub fn translate(x: f64, y: f64, alt_y: f64, bounds: &Bounds) -> (i64, i64) {
    let width = bounds.width as f64;
    let height = bounds.height as f64;
    let offset_x = bounds.offset_x as f64;
    let offset_y = bounds.offset_y as f64;

    let (screen_x, screen_y) = match bounds.rotation {
        Rotation::Portrait => (x + offset_x, alt_y + offset_y),
        Rotation::Landscape => (x + offset_y, height - y + offset_x),
        Rotation::PortraitFlipped => (width - x + offset_x, height - alt_y + offset_y),
        Rotation::LandscapeFlipped => (alt_y + offset_x, width - x + offset_y),
    };

    (screen_x.round() as i64, screen_y.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(width: i64, height: i64, offset_x: i64, offset_y: i64, rotation: Rotation) -> Bounds {
        Bounds {
            left: offset_x,
            top: offset_y,
            right: offset_x + width,
            bottom: offset_y + height,
            width,
            height,
            offset_x,
            offset_y,
            rotation,
        }
    }

    #[test]
    fn test_portrait_applies_offsets() {
        let b = bounds(1080, 1920, 10, 20, Rotation::Portrait);
        assert_eq!(translate(5.0, 5.0, 5.0, &b), (15, 25));
    }

    #[test]
    fn test_portrait_uses_alt_y_not_y() {
        let b = bounds(1080, 1920, 0, 0, Rotation::Portrait);
        // y is ignored in the portrait branch
        assert_eq!(translate(40.0, 999.0, 60.0, &b), (40, 60));
    }

    #[test]
    fn test_landscape_flips_vertical_from_y() {
        let b = bounds(1920, 100, 5, 7, Rotation::Landscape);
        // screen_x = x + offset_y, screen_y = height - y + offset_x
        assert_eq!(translate(10.0, 20.0, 999.0, &b), (17, 85));
    }

    #[test]
    fn test_portrait_flipped_mirrors_both_axes() {
        let b = bounds(100, 200, 0, 0, Rotation::PortraitFlipped);
        assert_eq!(translate(10.0, 0.0, 10.0, &b), (90, 190));
    }

    #[test]
    fn test_landscape_flipped_swaps_axes() {
        let b = bounds(100, 200, 5, 7, Rotation::LandscapeFlipped);
        // screen_x = alt_y + offset_x, screen_y = width - x + offset_y
        assert_eq!(translate(10.0, 0.0, 30.0, &b), (35, 97));
    }

    #[test]
    fn test_unknown_rotation_code_falls_back_to_portrait() {
        let b = bounds(1080, 1920, 10, 20, Rotation::from_code(7));
        assert_eq!(b.rotation, Rotation::Portrait);
        assert_eq!(translate(5.0, 5.0, 5.0, &b), (15, 25));
    }

    #[test]
    fn test_rounding() {
        let b = bounds(1080, 1920, 0, 0, Rotation::Portrait);
        assert_eq!(translate(10.6, 0.0, 20.4, &b), (11, 20));
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0), Rotation::Portrait);
        assert_eq!(Rotation::from_degrees(90), Rotation::Landscape);
        assert_eq!(Rotation::from_degrees(180), Rotation::PortraitFlipped);
        assert_eq!(Rotation::from_degrees(270), Rotation::LandscapeFlipped);
        assert_eq!(Rotation::from_degrees(45), Rotation::Portrait);
    }

    #[test]
    fn test_bounds_from_rect() {
        let b = Bounds::from_rect(100, 50, 1180, 1970, Rotation::Landscape);
        assert_eq!(b.width, 1080);
        assert_eq!(b.height, 1920);
        assert_eq!(b.offset_x, 100);
        assert_eq!(b.offset_y, 50);
    }
}
