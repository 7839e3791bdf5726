//! Pure geometry for fitting a source image into requested dimensions.
//!
//! The `ratio` branch implements the fit-by-dominant-axis rule: a source that
//! is relatively wider than the target ratio fixes the height and derives the
//! width, otherwise the width is fixed and the height derived. A caller that
//! supplies only a `width` keeps the width authoritative even for a wide
//! source; the documented vectors in the tests below pin this down.

use serde::{Deserialize, Serialize};

/// Fixed height used by the ratio branch when no `height` option is given.
const DEFAULT_FIXED_HEIGHT: u32 = 400;
/// Fixed width used by the ratio branch when no `width` option is given.
const DEFAULT_FIXED_WIDTH: u32 = 600;

/// Requested image dimensions, straight from placeholder options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGeometry {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub ratio: Option<(u32, u32)>,
}

/// Final pixel dimensions for an embedded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedGeometry {
    pub width: u32,
    pub height: u32,
}

/// Resolve requested options against the source's natural pixel size.
pub fn resolve(
    options: &ImageGeometry,
    natural_width: u32,
    natural_height: u32,
) -> ResolvedGeometry {
    if let Some((rw, rh)) = options.ratio.filter(|(rw, rh)| *rw > 0 && *rh > 0) {
        // nw/nh > rw/rh, in integer form
        let source_wider =
            (natural_width as u64) * (rh as u64) > (natural_height as u64) * (rw as u64);
        let height_authoritative =
            source_wider && !(options.height.is_none() && options.width.is_some());
        if height_authoritative {
            let height = options.height.unwrap_or(DEFAULT_FIXED_HEIGHT);
            let width = (height as f64 * rw as f64 / rh as f64) as u32;
            return ResolvedGeometry { width, height };
        }
        let width = options.width.unwrap_or(DEFAULT_FIXED_WIDTH);
        let height = (width as f64 * rh as f64 / rw as f64) as u32;
        return ResolvedGeometry { width, height };
    }

    match (options.width, options.height) {
        (Some(width), Some(height)) => ResolvedGeometry { width, height },
        (Some(width), None) => {
            let mut height = scaled(natural_height, width, natural_width);
            if width <= natural_width {
                height = height.min(natural_height);
            }
            ResolvedGeometry { width, height }
        }
        (None, Some(height)) => {
            let mut width = scaled(natural_width, height, natural_height);
            if height <= natural_height {
                width = width.min(natural_width);
            }
            ResolvedGeometry { width, height }
        }
        (None, None) => ResolvedGeometry {
            width: natural_width,
            height: natural_height,
        },
    }
}

fn scaled(natural_other: u32, requested: u32, natural_same: u32) -> u32 {
    if natural_same == 0 {
        return natural_other;
    }
    (natural_other as f64 * requested as f64 / natural_same as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom(width: Option<u32>, height: Option<u32>, ratio: Option<(u32, u32)>) -> ImageGeometry {
        ImageGeometry {
            width,
            height,
            ratio,
        }
    }

    #[test]
    fn ratio_with_explicit_width_is_width_authoritative() {
        let resolved = resolve(&geom(Some(800), None, Some((16, 9))), 1000, 500);
        assert_eq!(resolved.width, 800);
        assert_eq!(resolved.height, 450); // 800 * 9 / 16
    }

    #[test]
    fn ratio_with_explicit_height_on_wide_source_is_height_authoritative() {
        let resolved = resolve(&geom(None, Some(400), Some((16, 9))), 2000, 500);
        assert_eq!(resolved.height, 400);
        assert_eq!(resolved.width, 711); // 400 * 16 / 9, truncated
    }

    #[test]
    fn ratio_defaults_when_no_dimension_supplied() {
        // Wide source, no options: fixed height of 400.
        let resolved = resolve(&geom(None, None, Some((16, 9))), 2000, 500);
        assert_eq!(resolved.height, 400);
        assert_eq!(resolved.width, 711);
        // Tall source: fixed width of 600.
        let resolved = resolve(&geom(None, None, Some((16, 9))), 500, 2000);
        assert_eq!(resolved.width, 600);
        assert_eq!(resolved.height, 337); // 600 * 9 / 16
    }

    #[test]
    fn both_dimensions_apply_without_preserving_aspect() {
        let resolved = resolve(&geom(Some(300), Some(100), None), 1000, 1000);
        assert_eq!(resolved.width, 300);
        assert_eq!(resolved.height, 100);
    }

    #[test]
    fn single_dimension_scales_proportionally() {
        let resolved = resolve(&geom(Some(500), None, None), 1000, 400);
        assert_eq!(resolved.width, 500);
        assert_eq!(resolved.height, 200);

        let resolved = resolve(&geom(None, Some(200), None), 1000, 400);
        assert_eq!(resolved.height, 200);
        assert_eq!(resolved.width, 500);
    }

    #[test]
    fn no_options_uses_natural_size() {
        let resolved = resolve(&geom(None, None, None), 640, 480);
        assert_eq!(resolved.width, 640);
        assert_eq!(resolved.height, 480);
    }

    #[test]
    fn zero_natural_size_does_not_divide() {
        let resolved = resolve(&geom(Some(100), None, None), 0, 0);
        assert_eq!(resolved.width, 100);
        assert_eq!(resolved.height, 0);
    }
}
