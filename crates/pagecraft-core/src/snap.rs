//! Alignment snapping and guide lines for dragged elements.

use crate::element::ElementId;
use crate::page::Page;
use kurbo::{Point, Rect};

/// Default snap distance in page pixels.
pub const SNAP_THRESHOLD: f64 = 5.0;

/// Slack for floating point comparisons against the threshold and for
/// deciding whether two lines coincide.
const EPSILON: f64 = 1e-6;

/// Guide lines to draw while dragging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentGuides {
    /// Y coordinates of horizontal guides, ascending.
    pub horizontal: Vec<f64>,
    /// X coordinates of vertical guides, ascending.
    pub vertical: Vec<f64>,
}

impl AlignmentGuides {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    pub fn clear(&mut self) {
        self.horizontal.clear();
        self.vertical.clear();
    }
}

/// Result of a snap operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    /// Top-left corner of the moving element after snapping.
    pub position: Point,
    pub snapped_x: bool,
    pub snapped_y: bool,
    pub guides: AlignmentGuides,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(position: Point) -> Self {
        Self {
            position,
            snapped_x: false,
            snapped_y: false,
            guides: AlignmentGuides::default(),
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Left, centre and right (or top, centre and bottom) of a span.
fn lines(min: f64, max: f64) -> [f64; 3] {
    [min, (min + max) / 2.0, max]
}

/// Offset that moves the nearest moving line onto a reference line, if any
/// pair is within `threshold`.
fn nearest_offset(moving: &[f64; 3], references: &[f64], threshold: f64) -> Option<f64> {
    let mut best: Option<f64> = None;
    for &reference in references {
        for &line in moving {
            let offset = reference - line;
            if offset.abs() <= threshold + EPSILON
                && best.is_none_or(|current| offset.abs() < current.abs())
            {
                best = Some(offset);
            }
        }
    }
    best
}

/// Reference lines that coincide with one of the moving lines.
fn matching_guides(moving: &[f64; 3], references: &[f64]) -> Vec<f64> {
    let mut guides: Vec<f64> = references
        .iter()
        .copied()
        .filter(|reference| moving.iter().any(|line| (line - reference).abs() <= EPSILON))
        .collect();
    guides.sort_by(f64::total_cmp);
    guides.dedup_by(|a, b| (*a - *b).abs() <= EPSILON);
    guides
}

/// Snap a moving rectangle against reference rectangles and the page bounds.
///
/// Each axis snaps independently to the closest reference line within
/// `threshold`. Every reference line that the snapped rectangle lines up with
/// yields a guide.
pub fn snap_rect(moving: Rect, references: &[Rect], page_bounds: Rect, threshold: f64) -> SnapResult {
    if !moving.is_finite() {
        return SnapResult::none(moving.origin());
    }
    let threshold = if threshold.is_finite() { threshold.max(0.0) } else { 0.0 };

    let mut xs: Vec<f64> = Vec::with_capacity((references.len() + 1) * 3);
    let mut ys: Vec<f64> = Vec::with_capacity((references.len() + 1) * 3);
    for rect in references.iter().chain(std::iter::once(&page_bounds)) {
        if !rect.is_finite() {
            continue;
        }
        xs.extend(lines(rect.x0, rect.x1));
        ys.extend(lines(rect.y0, rect.y1));
    }

    let offset_x = nearest_offset(&lines(moving.x0, moving.x1), &xs, threshold);
    let offset_y = nearest_offset(&lines(moving.y0, moving.y1), &ys, threshold);

    let snapped = Rect::new(
        moving.x0 + offset_x.unwrap_or(0.0),
        moving.y0 + offset_y.unwrap_or(0.0),
        moving.x1 + offset_x.unwrap_or(0.0),
        moving.y1 + offset_y.unwrap_or(0.0),
    );

    SnapResult {
        position: snapped.origin(),
        snapped_x: offset_x.is_some(),
        snapped_y: offset_y.is_some(),
        guides: AlignmentGuides {
            vertical: matching_guides(&lines(snapped.x0, snapped.x1), &xs),
            horizontal: matching_guides(&lines(snapped.y0, snapped.y1), &ys),
        },
    }
}

/// Snap against every element of `page` except `exclude` (usually the
/// elements being dragged), plus the page bounds.
pub fn snap_to_page(page: &Page, exclude: &[ElementId], moving: Rect, threshold: f64) -> SnapResult {
    let references: Vec<Rect> = page
        .elements()
        .iter()
        .filter(|e| !exclude.contains(&e.id()))
        .filter_map(|e| e.world_rect())
        .collect();
    snap_rect(moving, &references, page.bounds(), threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: Rect = Rect::new(0.0, 0.0, 1000.0, 1000.0);

    #[test]
    fn test_snaps_at_threshold() {
        let reference = Rect::new(100.0, 300.0, 200.0, 400.0);
        // Left edge 5px right of the reference's right edge.
        let moving = Rect::new(205.0, 500.0, 255.0, 540.0);
        let result = snap_rect(moving, &[reference], PAGE, SNAP_THRESHOLD);
        assert!(result.snapped_x);
        assert_eq!(result.position.x, 200.0);
        assert_eq!(result.guides.vertical, vec![200.0]);
    }

    #[test]
    fn test_no_snap_beyond_threshold() {
        let reference = Rect::new(100.0, 300.0, 200.0, 400.0);
        let moving = Rect::new(206.0, 500.0, 256.0, 540.0);
        let result = snap_rect(moving, &[reference], PAGE, SNAP_THRESHOLD);
        assert!(!result.snapped_x);
        assert_eq!(result.position.x, 206.0);
        assert!(result.guides.vertical.is_empty());
    }

    #[test]
    fn test_snaps_centers_and_both_axes() {
        let reference = Rect::new(100.0, 100.0, 200.0, 200.0);
        // Centre x is 2px from 150, top is 3px from 200.
        let moving = Rect::new(127.0, 197.0, 177.0, 247.0);
        let result = snap_rect(moving, &[reference], PAGE, SNAP_THRESHOLD);
        assert_eq!(result.position, Point::new(125.0, 200.0));
        assert_eq!(result.guides.vertical, vec![150.0]);
        assert_eq!(result.guides.horizontal, vec![200.0]);
    }

    #[test]
    fn test_snaps_to_page_bounds() {
        let moving = Rect::new(3.0, 497.0, 53.0, 503.0);
        let result = snap_rect(moving, &[], PAGE, SNAP_THRESHOLD);
        assert_eq!(result.position, Point::new(0.0, 497.0));
        assert_eq!(result.guides.vertical, vec![0.0]);
        // Centre y 500 already coincides with the page centre.
        assert_eq!(result.guides.horizontal, vec![500.0]);
    }

    #[test]
    fn test_guides_are_deduplicated() {
        let a = Rect::new(100.0, 100.0, 200.0, 200.0);
        let b = Rect::new(100.0, 600.0, 300.0, 700.0);
        let moving = Rect::new(102.0, 400.0, 152.0, 450.0);
        let result = snap_rect(moving, &[a, b], PAGE, SNAP_THRESHOLD);
        assert_eq!(result.position.x, 100.0);
        // Both references share x = 100; the right edge also meets a's centre.
        assert_eq!(result.guides.vertical, vec![100.0, 150.0]);
    }

    #[test]
    fn test_non_finite_input() {
        let moving = Rect::new(f64::NAN, 0.0, 10.0, 10.0);
        let result = snap_rect(moving, &[], PAGE, SNAP_THRESHOLD);
        assert!(!result.is_snapped());
        assert!(result.guides.is_empty());
    }
}
