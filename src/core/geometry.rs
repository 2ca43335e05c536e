//=========================================================================
// Geometry
//=========================================================================
//
// Integer rectangles and the centering rule used to place media on a
// drawable surface.
//
// Centering:
//   delta   = screen extent - media extent      (per axis)
//   leading = delta / 2                         (truncates toward zero)
//   screen.offset += leading
//   screen.extent -= leading
//
// The far edge keeps the remainder, so an odd delta puts the extra pixel
// on the trailing side. Negative deltas (media larger than the surface)
// follow the same arithmetic.
//
//=========================================================================

//=== Rect ================================================================

/// Axis-aligned integer rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle anchored at the origin.
    pub const fn from_size(w: i32, h: i32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

//=== Margins =============================================================

/// How a size delta is split between the leading and trailing edge of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub leading: i32,
    pub trailing: i32,
}

/// Splits `delta` so that `leading + trailing == delta` and the leading
/// side gets `delta / 2` (truncated toward zero).
pub fn split_margin(delta: i32) -> Margins {
    let leading = delta / 2;
    Margins {
        leading,
        trailing: delta - leading,
    }
}

//=== Centering ===========================================================

/// Computes the source and destination rectangles that center `media`
/// inside `screen`.
///
/// The media rectangle is returned untouched. The screen rectangle is
/// shifted by the leading margin on each axis and shrunk by the same
/// amount, leaving the remainder on the trailing edge.
pub fn centered_boundary_rects(media: Rect, screen: Rect) -> (Rect, Rect) {
    let mut screen = screen;

    let vertical = split_margin(screen.h - media.h);
    screen.y += vertical.leading;
    screen.h -= vertical.leading;

    let horizontal = split_margin(screen.w - media.w);
    screen.x += horizontal.leading;
    screen.w -= horizontal.leading;

    (media, screen)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_deltas_center_exactly() {
        let (media, screen) =
            centered_boundary_rects(Rect::from_size(40, 30), Rect::from_size(100, 60));

        assert_eq!(media, Rect::from_size(40, 30), "Media rect must not move");
        assert_eq!((screen.x, screen.y), (30, 15));
        assert_eq!(screen.w, 100 - 30);
        assert_eq!(screen.h, 60 - 15);
    }

    #[test]
    fn odd_delta_leaves_remainder_on_trailing_edge() {
        let (_, screen) =
            centered_boundary_rects(Rect::from_size(40, 30), Rect::from_size(101, 60));

        assert_eq!(screen.x, 30);
        assert_eq!(screen.w, 71);

        let margins = split_margin(101 - 40);
        assert_eq!(margins, Margins { leading: 30, trailing: 31 });
    }

    #[test]
    fn trailing_margin_matches_delta_minus_leading() {
        for delta in [-61, -60, -1, 0, 1, 30, 61] {
            let margins = split_margin(delta);
            assert_eq!(margins.leading + margins.trailing, delta);
            assert_eq!(margins.leading, delta / 2);
        }
    }

    #[test]
    fn negative_delta_truncates_toward_zero() {
        // Media wider than the surface: 40 - 101 = -61, -61 / 2 = -30.
        let (_, screen) =
            centered_boundary_rects(Rect::from_size(101, 30), Rect::from_size(40, 30));

        assert_eq!(screen.x, -30);
        assert_eq!(screen.w, 70);
        assert_eq!((screen.y, screen.h), (0, 30), "Equal heights stay put");
    }

    #[test]
    fn offset_screen_rect_is_shifted_not_replaced() {
        let (_, screen) =
            centered_boundary_rects(Rect::from_size(10, 10), Rect::new(5, 7, 30, 20));

        assert_eq!(screen, Rect::new(15, 12, 20, 15));
    }

    #[test]
    fn empty_rect_detection() {
        assert!(Rect::from_size(0, 10).is_empty());
        assert!(Rect::from_size(10, -1).is_empty());
        assert!(!Rect::from_size(1, 1).is_empty());
    }
}
