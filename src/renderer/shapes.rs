//! Shape generation for 2D primitives
//!
//! Every function appends triangle-list vertices in screen space.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Filled axis-aligned rectangle
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    let max = min + size;
    out.extend_from_slice(&[
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]);
}

/// Filled ellipse with a radial color gradient (center color -> edge color)
pub fn ellipse(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radii: Vec2,
    center_color: [f32; 4],
    edge_color: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(3);
    for i in 0..segments {
        let a0 = i as f32 / segments as f32 * TAU;
        let a1 = (i + 1) as f32 / segments as f32 * TAU;
        let p0 = center + Vec2::new(a0.cos(), a0.sin()) * radii;
        let p1 = center + Vec2::new(a1.cos(), a1.sin()) * radii;
        out.push(Vertex::new(center.x, center.y, center_color));
        out.push(Vertex::new(p0.x, p0.y, edge_color));
        out.push(Vertex::new(p1.x, p1.y, edge_color));
    }
}

/// Filled circle with a radial gradient
pub fn circle(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    center_color: [f32; 4],
    edge_color: [f32; 4],
    segments: u32,
) {
    ellipse(out, center, Vec2::splat(radius), center_color, edge_color, segments);
}

/// Circular outline of the given stroke width
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    width: f32,
    color: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(3);
    let inner = (radius - width / 2.0).max(0.0);
    let outer = radius + width / 2.0;
    for i in 0..segments {
        let a0 = i as f32 / segments as f32 * TAU;
        let a1 = (i + 1) as f32 / segments as f32 * TAU;
        let d0 = Vec2::new(a0.cos(), a0.sin());
        let d1 = Vec2::new(a1.cos(), a1.sin());
        let (i0, o0) = (center + d0 * inner, center + d0 * outer);
        let (i1, o1) = (center + d1 * inner, center + d1 * outer);
        out.extend_from_slice(&[
            Vertex::new(i0.x, i0.y, color),
            Vertex::new(o0.x, o0.y, color),
            Vertex::new(o1.x, o1.y, color),
            Vertex::new(i0.x, i0.y, color),
            Vertex::new(o1.x, o1.y, color),
            Vertex::new(i1.x, i1.y, color),
        ]);
    }
}

/// Thick line segment as a quad
pub fn line(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    let (a, b, c, d) = (from + perp, from - perp, to + perp, to - perp);
    out.extend_from_slice(&[
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]);
}
