//! Rectangle helpers shared by selection, snapping and resizing.

use kurbo::{Point, Rect};

/// Rectangle spanned by two arbitrary corners, with `x0 <= x1` and `y0 <= y1`.
pub fn normalize_rect(a: Point, b: Point) -> Rect {
    Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

/// Open-interval intersection: rectangles that only share an edge or a
/// corner do not intersect.
pub fn intersects_open(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// Smallest rectangle containing every rectangle in `rects`.
pub fn union_all(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|acc, rect| acc.union(rect))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_any_corner_order() {
        let expected = Rect::new(0.0, 0.0, 15.0, 15.0);
        assert_eq!(normalize_rect(Point::new(15.0, 15.0), Point::ZERO), expected);
        assert_eq!(normalize_rect(Point::new(0.0, 15.0), Point::new(15.0, 0.0)), expected);
    }

    #[test]
    fn test_open_interval_overlap() {
        let element = Rect::new(10.0, 10.0, 30.0, 30.0);
        assert!(intersects_open(Rect::new(0.0, 0.0, 15.0, 15.0), element));
        assert!(!intersects_open(Rect::new(30.0, 30.0, 40.0, 40.0), element));
        assert!(!intersects_open(Rect::new(30.0, 0.0, 40.0, 40.0), element));
    }

    #[test]
    fn test_zero_area_marquee_inside_element() {
        let element = Rect::new(10.0, 10.0, 30.0, 30.0);
        let point = Rect::new(20.0, 20.0, 20.0, 20.0);
        assert!(intersects_open(point, element));
    }

    #[test]
    fn test_union_all() {
        assert_eq!(union_all(Vec::new()), None);
        let union = union_all([Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(5.0, -2.0, 6.0, 0.0)]);
        assert_eq!(union, Some(Rect::new(0.0, -2.0, 6.0, 1.0)));
    }
}
