//! Curve and outline tessellation
//!
//! Pure geometry: everything here produces points that `Graphics` then
//! transforms and hands to macroquad as lines and triangles.

use std::f32::consts::TAU;
use macroquad::prelude::{vec2, Vec2};

/// Point on a cubic bezier at parameter t
pub fn bezier_point(a: f32, b: f32, c: f32, d: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * a + 3.0 * u * u * t * b + 3.0 * u * t * t * c + t * t * t * d
}

/// Derivative of the cubic bezier at parameter t
pub fn bezier_tangent(a: f32, b: f32, c: f32, d: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * (b - a) + 6.0 * u * t * (c - b) + 3.0 * t * t * (d - c)
}

/// Point on a Catmull-Rom segment between `b` and `c`.
///
/// `a` and `d` are the neighbouring control points. `tightness` 0 gives the
/// classic Catmull-Rom curve, 1 straight lines.
pub fn curve_point(a: f32, b: f32, c: f32, d: f32, t: f32, tightness: f32) -> f32 {
    let s = (1.0 - tightness) * 0.5;
    let m1 = s * (c - a);
    let m2 = s * (d - b);
    let t2 = t * t;
    let t3 = t2 * t;
    (2.0 * t3 - 3.0 * t2 + 1.0) * b + (t3 - 2.0 * t2 + t) * m1 + (-2.0 * t3 + 3.0 * t2) * c + (t3 - t2) * m2
}

/// Sample a cubic bezier into `segments + 1` points
pub fn bezier_points(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            vec2(bezier_point(p0.x, p1.x, p2.x, p3.x, t), bezier_point(p0.y, p1.y, p2.y, p3.y, t))
        })
        .collect()
}

/// Sample a Catmull-Rom segment (drawn between p1 and p2)
pub fn curve_points(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, segments: usize, tightness: f32) -> Vec<Vec2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            vec2(
                curve_point(p0.x, p1.x, p2.x, p3.x, t, tightness),
                curve_point(p0.y, p1.y, p2.y, p3.y, t, tightness),
            )
        })
        .collect()
}

/// Segment count that keeps an ellipse smooth without wasting triangles
pub fn ellipse_segments(rx: f32, ry: f32) -> usize {
    let r = rx.abs().max(ry.abs());
    ((r * 0.75).sqrt() * 6.0).clamp(12.0, 128.0) as usize
}

/// Closed outline of an ellipse centred at (cx, cy); first point not repeated
pub fn ellipse_points(cx: f32, cy: f32, rx: f32, ry: f32, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let a = i as f32 / segments as f32 * TAU;
            vec2(cx + rx * a.cos(), cy + ry * a.sin())
        })
        .collect()
}

/// Points along an elliptical arc from `start` to `stop` radians inclusive.
/// Angles grow clockwise on screen (y down). Sweeps longer than a full turn
/// are clamped to one turn.
pub fn arc_points(cx: f32, cy: f32, rx: f32, ry: f32, start: f32, stop: f32, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(1);
    let sweep = (stop - start).clamp(0.0, TAU);
    (0..=segments)
        .map(|i| {
            let a = start + sweep * i as f32 / segments as f32;
            vec2(cx + rx * a.cos(), cy + ry * a.sin())
        })
        .collect()
}

/// Twice the signed area; positive when the outline turns counter-clockwise
/// in a y-up frame
pub fn signed_area2(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n).map(|i| points[i].perp_dot(points[(i + 1) % n])).sum()
}

fn turn(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - b)
}

/// Every corner turns the same way (straight corners allowed)
pub fn is_convex(points: &[Vec2]) -> bool {
    let n = points.len();
    let mut sign = 0.0f32;
    for i in 0..n {
        let t = turn(points[i], points[(i + 1) % n], points[(i + 2) % n]);
        if t.abs() <= f32::EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = t.signum();
        } else if t.signum() != sign {
            return false;
        }
    }
    true
}

/// Fan from the first vertex; correct for convex outlines only
pub fn fan_triangles(points: &[Vec2]) -> Vec<[Vec2; 3]> {
    if points.len() < 3 {
        return Vec::new();
    }
    (1..points.len() - 1).map(|i| [points[0], points[i], points[i + 1]]).collect()
}

fn inside_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = turn(a, b, p);
    let d2 = turn(b, c, p);
    let d3 = turn(c, a, p);
    d1 > 0.0 && d2 > 0.0 && d3 > 0.0
}

/// Triangulate a simple polygon of either winding. Convex outlines take the
/// fan; anything else is ear-clipped. A self-intersecting remainder that has
/// no ear left is fanned.
pub fn polygon_triangles(points: &[Vec2]) -> Vec<[Vec2; 3]> {
    if points.len() < 3 {
        return Vec::new();
    }
    if is_convex(points) {
        return fan_triangles(points);
    }

    // Work counter-clockwise so ears are the corners with a positive turn
    let mut ring: Vec<usize> = (0..points.len()).collect();
    if signed_area2(points) < 0.0 {
        ring.reverse();
    }

    let mut triangles = Vec::with_capacity(points.len() - 2);
    while ring.len() > 3 {
        let n = ring.len();
        let ear = (0..n).find(|&i| {
            let (a, b, c) = (points[ring[(i + n - 1) % n]], points[ring[i]], points[ring[(i + 1) % n]]);
            turn(a, b, c) > 0.0
                && ring
                    .iter()
                    .map(|&j| points[j])
                    .filter(|p| *p != a && *p != b && *p != c)
                    .all(|p| !inside_triangle(p, a, b, c))
        });
        let Some(i) = ear else {
            let rest: Vec<Vec2> = ring.iter().map(|&j| points[j]).collect();
            triangles.extend(fan_triangles(&rest));
            return triangles;
        };
        triangles.push([points[ring[(i + n - 1) % n]], points[ring[i]], points[ring[(i + 1) % n]]]);
        ring.remove(i);
    }
    triangles.push([points[ring[0]], points[ring[1]], points[ring[2]]]);
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bezier_endpoints() {
        assert_eq!(bezier_point(1.0, 5.0, 7.0, 9.0, 0.0), 1.0);
        assert!((bezier_point(1.0, 5.0, 7.0, 9.0, 1.0) - 9.0).abs() < 1e-5);
        // straight-line control points give a linear curve
        assert!((bezier_point(0.0, 1.0, 2.0, 3.0, 0.5) - 1.5).abs() < 1e-5);
        assert!((bezier_tangent(0.0, 1.0, 2.0, 3.0, 0.3) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_curve_passes_through_inner_points() {
        assert!((curve_point(0.0, 10.0, 20.0, 40.0, 0.0, 0.0) - 10.0).abs() < 1e-5);
        assert!((curve_point(0.0, 10.0, 20.0, 40.0, 1.0, 0.0) - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_full_tightness_is_straight() {
        let mid = curve_point(-100.0, 0.0, 10.0, 500.0, 0.5, 1.0);
        assert!((mid - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_arc_is_clamped_to_one_turn() {
        let pts = arc_points(0.0, 0.0, 1.0, 1.0, 0.0, 100.0, 4);
        assert_eq!(pts.len(), 5);
        let last = pts[4];
        assert!((last - vec2(1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_fan_triangle_count() {
        let pts = ellipse_points(0.0, 0.0, 5.0, 5.0, 12);
        assert!(is_convex(&pts));
        assert_eq!(polygon_triangles(&pts).len(), 10);
        assert!(polygon_triangles(&pts[..2]).is_empty());
    }

    /// Even-odd ray cast
    fn contains(outline: &[Vec2], p: Vec2) -> bool {
        let mut inside = false;
        let n = outline.len();
        for i in 0..n {
            let (a, b) = (outline[i], outline[(i + 1) % n]);
            if (a.y > p.y) != (b.y > p.y) && p.x < a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x) {
                inside = !inside;
            }
        }
        inside
    }

    fn star(points: usize, outer: f32, inner: f32) -> Vec<Vec2> {
        (0..points * 2)
            .map(|i| {
                let r = if i % 2 == 0 { outer } else { inner };
                let a = i as f32 * std::f32::consts::PI / points as f32 - std::f32::consts::FRAC_PI_2;
                vec2(r * a.cos(), r * a.sin())
            })
            .collect()
    }

    fn assert_fills_outline(outline: &[Vec2]) {
        let tris = polygon_triangles(outline);
        assert_eq!(tris.len(), outline.len() - 2);
        for [a, b, c] in &tris {
            let centroid = (*a + *b + *c) / 3.0;
            assert!(contains(outline, centroid), "centroid {centroid:?} outside");
        }
        let covered: f32 = tris.iter().map(|[a, b, c]| signed_area2(&[*a, *b, *c]).abs()).sum();
        let area = signed_area2(outline).abs();
        assert!((covered - area).abs() < area * 1e-4);
    }

    #[test]
    fn test_star_stays_inside_its_edges() {
        let outline = star(5, 40.0, 16.0);
        assert!(!is_convex(&outline));
        assert_fills_outline(&outline);
    }

    #[test]
    fn test_l_shape_either_winding() {
        let mut outline = vec![
            vec2(0.0, 0.0),
            vec2(30.0, 0.0),
            vec2(30.0, 10.0),
            vec2(10.0, 10.0),
            vec2(10.0, 30.0),
            vec2(0.0, 30.0),
        ];
        assert_fills_outline(&outline);
        outline.reverse();
        assert_fills_outline(&outline);
    }
}
