//! Geometric primitives for layout and line styling.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation between two points.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Split into an `nrows` x `ncols` grid of equal cells, row-major.
    #[must_use]
    pub fn grid(&self, nrows: usize, ncols: usize) -> Vec<Rect> {
        if nrows == 0 || ncols == 0 {
            return Vec::new();
        }
        let cw = self.width / ncols as f32;
        let ch = self.height / nrows as f32;
        (0..nrows)
            .flat_map(|r| {
                (0..ncols).map(move |c| {
                    Rect::new(self.x + c as f32 * cw, self.y + r as f32 * ch, cw, ch)
                })
            })
            .collect()
    }
}

/// Break a polyline into dashes.
///
/// Lengths in `pattern` alternate on/off and are measured along `screen`, the
/// polyline in pixel space. The emitted pieces are built from `data`, the same
/// polyline in any affinely related space, so they can be drawn in chart
/// coordinates. An empty pattern returns the whole polyline as one piece.
#[must_use]
pub fn dash_polyline(screen: &[Point], data: &[Point], pattern: &[f32]) -> Vec<Vec<Point>> {
    let n = screen.len().min(data.len());
    if n < 2 {
        return Vec::new();
    }
    if pattern.is_empty() || pattern.iter().all(|p| *p <= 0.0) {
        return vec![data[..n].to_vec()];
    }

    let mut pieces = Vec::new();
    let mut current: Vec<Point> = vec![data[0]];
    let mut slot = 0;
    let mut left = pattern[0].max(f32::EPSILON);
    let mut on = true;

    for i in 0..n - 1 {
        let seg_len = screen[i].distance(screen[i + 1]);
        let mut t = 0.0;
        let mut remaining = seg_len;

        while remaining > left {
            t += left / seg_len;
            remaining -= left;
            let p = data[i].lerp(data[i + 1], t);
            if on {
                current.push(p);
                pieces.push(std::mem::take(&mut current));
            } else {
                current = vec![p];
            }
            on = !on;
            slot = (slot + 1) % pattern.len();
            left = pattern[slot].max(f32::EPSILON);
        }

        left -= remaining;
        if on {
            current.push(data[i + 1]);
        }
    }

    if on && current.len() >= 2 {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert!((p1.distance(p2) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_point_lerp() {
        let mid = Point::new(0.0, 0.0).lerp(Point::new(10.0, 10.0), 0.5);
        assert!((mid.x - 5.0).abs() < 0.001);
        assert!((mid.y - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_rect_grid_row_major() {
        let cells = Rect::new(0.0, 0.0, 200.0, 100.0).grid(2, 2);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[1], Rect::new(100.0, 0.0, 100.0, 50.0));
        assert_eq!(cells[2], Rect::new(0.0, 50.0, 100.0, 50.0));
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).grid(0, 3).is_empty());
    }

    #[test]
    fn test_dash_solid_pattern() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let pieces = dash_polyline(&pts, &pts, &[]);
        assert_eq!(pieces, vec![pts]);
    }

    #[test]
    fn test_dash_even_pattern() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let pieces = dash_polyline(&pts, &pts, &[2.0, 2.0]);
        // on [0,2], [4,6], [8,10]
        assert_eq!(pieces.len(), 3);
        assert!((pieces[1][0].x - 4.0).abs() < 1e-4);
        assert!((pieces[1][1].x - 6.0).abs() < 1e-4);
        assert!((pieces[2].last().unwrap().x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_dash_maps_into_data_space() {
        let screen = vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        let data = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let pieces = dash_polyline(&screen, &data, &[25.0, 25.0]);
        assert_eq!(pieces.len(), 2);
        assert!((pieces[0][1].x - 0.25).abs() < 1e-4);
        assert!((pieces[1][0].x - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_dash_spans_vertices() {
        // Dash starting on the first segment continues through the corner
        let pts = vec![Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(3.0, 3.0)];
        let pieces = dash_polyline(&pts, &pts, &[4.0, 10.0]);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].len(), 3);
        assert!((pieces[0][2].y - 1.0).abs() < 1e-4);
    }
}
