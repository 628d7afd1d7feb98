use crate::core::data::point::Point;

/// Axis-aligned square drawn over one orbit point, in window pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MarkerRect {
    pub top_left: Point,
    pub size: u32,
}

impl MarkerRect {
    /// Centres a `size`-pixel square on `(x, y)`.
    #[must_use]
    pub fn centred_on(x: f64, y: f64, size: u32) -> Self {
        let half = f64::from(size) / 2.0;

        Self {
            top_left: Point {
                x: (x - half) as i32,
                y: (y - half) as i32,
            },
            size,
        }
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let size = i64::from(self.size);
        let dx = i64::from(point.x) - i64::from(self.top_left.x);
        let dy = i64::from(point.y) - i64::from(self.top_left.y);

        (0..size).contains(&dx) && (0..size).contains(&dy)
    }
}

/// Screen-space projection of one orbit, ready for drawing over the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectoryOverlay {
    /// Orbit points in order; everything after the first is clamped to the window.
    pub polyline: Vec<Point>,
    /// One marker per orbit point that landed inside the window, start excluded.
    pub markers: Vec<MarkerRect>,
    pub start_marker: MarkerRect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_centred() {
        let marker = MarkerRect::centred_on(10.0, 20.0, 4);

        assert_eq!(marker.top_left, Point { x: 8, y: 18 });
        assert!(marker.contains(Point { x: 10, y: 20 }));
        assert!(marker.contains(Point { x: 8, y: 18 }));
        assert!(!marker.contains(Point { x: 12, y: 20 }));
    }
}
