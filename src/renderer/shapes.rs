//! Shape generation for 2D primitives
//!
//! Every function appends triangles (three vertices each) to `out`.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Segments used for circles of the given pixel radius
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 0.75) as u32).clamp(12, 64)
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Ring (circle outline) of the given stroke width, centered on `radius`
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    width: f32,
    color: [f32; 4],
    segments: u32,
) {
    let inner_radius = (radius - width / 2.0).max(0.0);
    let outer_radius = radius + width / 2.0;
    out.reserve((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let (dir1, dir2) = (Vec2::from_angle(theta1), Vec2::from_angle(theta2));

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        quad(out, inner1, outer1, inner2, outer2, color);
    }
}

/// Filled axis-aligned rectangle
pub fn rect(out: &mut Vec<Vertex>, origin: Vec2, size: Vec2, color: [f32; 4]) {
    let max = origin + size;
    quad(
        out,
        origin,
        Vec2::new(max.x, origin.y),
        Vec2::new(origin.x, max.y),
        max,
        color,
    );
}

/// Rectangle outline with the stroke centered on the edges
pub fn rect_outline(out: &mut Vec<Vertex>, origin: Vec2, size: Vec2, width: f32, color: [f32; 4]) {
    let max = origin + size;
    let corners = [
        origin,
        Vec2::new(max.x, origin.y),
        max,
        Vec2::new(origin.x, max.y),
    ];
    for i in 0..4 {
        line(out, corners[i], corners[(i + 1) % 4], width, color);
    }
}

/// Thick line segment
pub fn line(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    // Perpendicular for width
    let perp = dir.perp() * (width / 2.0);
    quad(out, from + perp, from - perp, to + perp, to - perp, color);
}

/// Two triangles: (a, b, c) and (c, b, d)
fn quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));

    out.push(Vertex::new(c.x, c.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(d.x, d.y, color));
}
