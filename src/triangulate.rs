//! Delaunay triangulation of scattered points (Bowyer–Watson).
//!
//! Surfaces are built from unordered `(x, y)` samples, so the samples are
//! triangulated in the plane and each triangle is lifted to its `z` values.

/// Super-triangle size relative to the bounding box.
const SUPER_SCALE: f64 = 100.0;

#[derive(Debug, Clone, Copy)]
struct Tri {
    v: [usize; 3],
    cx: f64,
    cy: f64,
    r2: f64,
}

impl Tri {
    /// `None` when the vertices are collinear within `tolerance` (in squared
    /// coordinate units).
    fn new(v: [usize; 3], pts: &[(f64, f64)], tolerance: f64) -> Option<Self> {
        let (ax, ay) = pts[v[0]];
        let (bx, by) = pts[v[1]];
        let (cx, cy) = pts[v[2]];
        let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
        if d.abs() <= tolerance {
            return None;
        }
        let a2 = ax * ax + ay * ay;
        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;
        let ux = (a2 * (by - cy) + b2 * (cy - ay) + c2 * (ay - by)) / d;
        let uy = (a2 * (cx - bx) + b2 * (ax - cx) + c2 * (bx - ax)) / d;
        let r2 = (ax - ux).powi(2) + (ay - uy).powi(2);
        Some(Self { v, cx: ux, cy: uy, r2 })
    }

    fn circumcircle_contains(&self, (x, y): (f64, f64)) -> bool {
        let d2 = (x - self.cx).powi(2) + (y - self.cy).powi(2);
        d2 < self.r2 * (1.0 + 1e-12)
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.v;
        [(a, b), (b, c), (c, a)]
    }
}

fn same_edge(a: (usize, usize), b: (usize, usize)) -> bool {
    (a.0 == b.0 && a.1 == b.1) || (a.0 == b.1 && a.1 == b.0)
}

/// Triangulate `points`, returning index triples into `points`.
///
/// Non-finite and repeated points are skipped. Fewer than three distinct points,
/// or points that all lie on one line, give no triangles.
#[must_use]
pub fn triangulate(points: &[(f32, f32)]) -> Vec<[usize; 3]> {
    // distinct finite points with their original indices
    let mut originals: Vec<usize> = Vec::with_capacity(points.len());
    let mut pts: Vec<(f64, f64)> = Vec::with_capacity(points.len() + 3);
    for (i, &(x, y)) in points.iter().enumerate() {
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        let p = (f64::from(x), f64::from(y));
        if pts.contains(&p) {
            continue;
        }
        originals.push(i);
        pts.push(p);
    }

    let n = pts.len();
    if n < 3 || all_collinear(&pts) {
        return Vec::new();
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for &(x, y) in &pts {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    let span = (max_x - min_x).max(max_y - min_y);
    let tolerance = f64::EPSILON * span * span;
    let (mid_x, mid_y) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
    pts.push((mid_x - SUPER_SCALE * span, mid_y - SUPER_SCALE * span));
    pts.push((mid_x, mid_y + SUPER_SCALE * span));
    pts.push((mid_x + SUPER_SCALE * span, mid_y - SUPER_SCALE * span));

    let Some(root) = Tri::new([n, n + 1, n + 2], &pts, tolerance) else {
        return Vec::new();
    };
    let mut tris = vec![root];

    for i in 0..n {
        let p = pts[i];
        let (bad, good): (Vec<Tri>, Vec<Tri>) =
            tris.into_iter().partition(|t| t.circumcircle_contains(p));
        tris = good;

        let mut boundary: Vec<(usize, usize)> = Vec::new();
        for (k, t) in bad.iter().enumerate() {
            for edge in t.edges() {
                let shared = bad
                    .iter()
                    .enumerate()
                    .any(|(j, o)| j != k && o.edges().iter().any(|e| same_edge(*e, edge)));
                if !shared {
                    boundary.push(edge);
                }
            }
        }

        for (a, b) in boundary {
            if let Some(t) = Tri::new([a, b, i], &pts, tolerance) {
                tris.push(t);
            }
        }
    }

    tris.into_iter()
        .filter(|t| t.v.iter().all(|&v| v < n))
        .map(|t| t.v.map(|v| originals[v]))
        .collect()
}

fn all_collinear(pts: &[(f64, f64)]) -> bool {
    let (ax, ay) = pts[0];
    let (bx, by) = pts[1];
    let scale = pts
        .iter()
        .map(|&(x, y)| (x - ax).abs().max((y - ay).abs()))
        .fold(0.0_f64, f64::max)
        .max(f64::MIN_POSITIVE);
    pts[2..].iter().all(|&(cx, cy)| {
        let cross = (bx - ax) * (cy - ay) - (by - ay) * (cx - ax);
        cross.abs() <= 1e-9 * scale * scale
    })
}
