use serde::{Deserialize, Serialize};

use crate::shared::point::Point;

/// A face bounding box in normalized image coordinates.
///
/// Every component lives in `[0, 1]`; the origin is the image corner the
/// geometry provider uses as its own origin, so no axis flipping happens here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when every component is finite and within `[0, 1]` and the box
    /// ends inside the image.
    pub fn is_normalized(&self) -> bool {
        // Slack for rounding in `x + width`, e.g. 0.7 + 0.3
        const EDGE_TOLERANCE: f64 = 1e-9;
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
            && self.x + self.width <= 1.0 + EDGE_TOLERANCE
            && self.y + self.height <= 1.0 + EDGE_TOLERANCE
    }

    /// Picks the candidate with the largest area.
    ///
    /// Ties resolve to the first maximal candidate in input order, so the
    /// choice is stable for identical provider output.
    pub fn largest(regions: &[Region]) -> Option<&Region> {
        regions.iter().fold(None, |best: Option<&Region>, candidate| match best {
            Some(b) if candidate.area() > b.area() => Some(candidate),
            Some(b) => Some(b),
            None => Some(candidate),
        })
    }

    /// Maps a point expressed relative to this region into the region's
    /// enclosing coordinate space: `local * size + origin`.
    pub fn to_enclosing(&self, local: Point) -> Point {
        Point::new(
            local.x * self.width + self.x,
            local.y * self.height + self.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn region(x: f64, y: f64, w: f64, h: f64) -> Region {
        Region::new(x, y, w, h)
    }

    // ── Area ─────────────────────────────────────────────────────────

    #[test]
    fn test_area() {
        assert_relative_eq!(region(0.1, 0.1, 0.5, 0.4).area(), 0.2);
    }

    #[test]
    fn test_area_degenerate() {
        assert_relative_eq!(region(0.1, 0.1, 0.0, 0.4).area(), 0.0);
    }

    // ── Largest ──────────────────────────────────────────────────────

    #[test]
    fn test_largest_empty() {
        assert!(Region::largest(&[]).is_none());
    }

    #[test]
    fn test_largest_single() {
        let regions = vec![region(0.2, 0.2, 0.1, 0.1)];
        assert_eq!(Region::largest(&regions), Some(&regions[0]));
    }

    #[test]
    fn test_largest_picks_max_area() {
        let regions = vec![
            region(0.0, 0.0, 0.1, 0.1),
            region(0.5, 0.5, 0.3, 0.3),
            region(0.2, 0.2, 0.2, 0.2),
        ];
        assert_eq!(Region::largest(&regions), Some(&regions[1]));
    }

    #[test]
    fn test_largest_tie_keeps_first() {
        // Same area (0.06), different shapes and positions
        let regions = vec![
            region(0.1, 0.1, 0.2, 0.3),
            region(0.5, 0.5, 0.3, 0.2),
        ];
        for _ in 0..3 {
            assert_eq!(Region::largest(&regions), Some(&regions[0]));
        }
    }

    #[test]
    fn test_largest_tie_after_smaller_keeps_first_maximal() {
        let regions = vec![
            region(0.0, 0.0, 0.1, 0.1),
            region(0.1, 0.1, 0.4, 0.4),
            region(0.5, 0.5, 0.4, 0.4),
        ];
        assert_eq!(Region::largest(&regions), Some(&regions[1]));
    }

    // ── Normalization ────────────────────────────────────────────────

    #[rstest]
    #[case::inside(region(0.1, 0.2, 0.3, 0.4), true)]
    #[case::full_image(region(0.0, 0.0, 1.0, 1.0), true)]
    #[case::negative_origin(region(-0.1, 0.2, 0.3, 0.4), false)]
    #[case::oversized(region(0.1, 0.2, 1.3, 0.4), false)]
    #[case::touches_right_edge(region(0.7, 0.2, 0.3, 0.4), true)]
    #[case::extends_past_right_edge(region(0.5, 0.2, 0.8, 0.4), false)]
    #[case::extends_past_bottom_edge(region(0.1, 0.9, 0.3, 0.4), false)]
    #[case::nan(region(f64::NAN, 0.2, 0.3, 0.4), false)]
    #[case::infinite(region(0.1, f64::INFINITY, 0.3, 0.4), false)]
    fn test_is_normalized(#[case] r: Region, #[case] expected: bool) {
        assert_eq!(r.is_normalized(), expected);
    }

    // ── Coordinate mapping ───────────────────────────────────────────

    #[test]
    fn test_to_enclosing_origin_maps_to_region_origin() {
        let r = region(0.25, 0.5, 0.5, 0.25);
        let p = r.to_enclosing(Point::new(0.0, 0.0));
        assert_relative_eq!(p.x, 0.25);
        assert_relative_eq!(p.y, 0.5);
    }

    #[test]
    fn test_to_enclosing_scales_by_size() {
        // x = 0.5 * 0.5 + 0.25 = 0.5, y = 1.0 * 0.25 + 0.5 = 0.75
        let r = region(0.25, 0.5, 0.5, 0.25);
        let p = r.to_enclosing(Point::new(0.5, 1.0));
        assert_relative_eq!(p.x, 0.5);
        assert_relative_eq!(p.y, 0.75);
    }
}
