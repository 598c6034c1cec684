//! Axis-aligned rectangle geometry and overlap detection
//!
//! Every entity in the arena is a plain rectangle, so this is the only
//! collision primitive the simulation needs.

use glam::Vec2;

/// An axis-aligned rectangle (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn translate(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}

/// Check whether two rectangles overlap
///
/// Edges that merely touch do not count as overlapping.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 4.0, 4.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_translate_keeps_size() {
        let r = Rect::new(10.0, 20.0, 4.0, 8.0).translate(Vec2::new(0.0, -5.0));
        assert_eq!(r, Rect::new(10.0, 15.0, 4.0, 8.0));
    }

    #[test]
    fn test_center() {
        let r = Rect::new(400.0, 500.0, 30.0, 30.0);
        assert_eq!(r.center(), Vec2::new(415.0, 515.0));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            0.5f32..200.0,
            0.5f32..200.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn rect_overlaps_itself(a in rect_strategy()) {
            prop_assert!(overlaps(&a, &a));
        }

        #[test]
        fn separated_rects_do_not_overlap(
            a in rect_strategy(),
            b in rect_strategy(),
            gap in 0.01f32..50.0,
            horizontal in any::<bool>(),
        ) {
            // Shift b so it starts past the far edge of a on one axis
            let moved = if horizontal {
                b.translate(Vec2::new(a.x + a.w + gap - b.x, 0.0))
            } else {
                b.translate(Vec2::new(0.0, a.y + a.h + gap - b.y))
            };
            prop_assert!(!overlaps(&a, &moved));
            prop_assert!(!overlaps(&moved, &a));
        }
    }
}
