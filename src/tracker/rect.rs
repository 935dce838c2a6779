/// Bounding box representation with format conversion utilities.
///
/// Boxes are stored in TLWH form (Top-Left X, Top-Left Y, Width, Height)
/// and can be built from the TLBR corners (top-left x/y, bottom-right x/y)
/// produced by most detection backends.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Get the centroid: the center rounded to integer pixel coordinates.
    ///
    /// Degenerate boxes (zero or negative width/height) still yield a
    /// centroid; no validation happens here.
    #[inline]
    pub fn centroid(&self) -> Point {
        let (cx, cy) = self.center();
        Point {
            x: cx.round() as i32,
            y: cy.round() as i32,
        }
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Integer 2D point, the unit of position the tracker works in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);

        // TLWH
        assert_eq!(rect.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);

        // TLBR
        assert_eq!(rect.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn test_from_tlbr() {
        let rect = Rect::from_tlbr(10.0, 20.0, 40.0, 60.0);
        assert_eq!(rect.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_centroid_rounds_midpoint() {
        // center (25.0, 40.0)
        let rect = Rect::from_tlbr(10.0, 20.0, 40.0, 60.0);
        assert_eq!(rect.centroid(), Point::new(25, 40));

        // center (10.5, 10.5) rounds to (11, 11)
        let rect = Rect::from_tlbr(10.0, 10.0, 11.0, 11.0);
        assert_eq!(rect.centroid(), Point::new(11, 11));
    }

    #[test]
    fn test_centroid_degenerate_box() {
        // zero-area box
        let rect = Rect::from_tlbr(5.0, 5.0, 5.0, 5.0);
        assert_eq!(rect.centroid(), Point::new(5, 5));

        // inverted corners still produce the midpoint
        let rect = Rect::from_tlbr(10.0, 10.0, 0.0, 0.0);
        assert_eq!(rect.centroid(), Point::new(5, 5));
        assert!(rect.area() > 0.0); // both sides negative
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_relative_eq!(a.distance(b), 5.0);
        assert_relative_eq!(b.distance(a), 5.0);
        assert_relative_eq!(a.distance(a), 0.0);
    }
}
