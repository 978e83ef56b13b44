//! Shape generation for growth marks

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::palette::Rgba;
use crate::sim::{Dot, Mark};

/// Triangles per leaf dot
pub const DOT_SEGMENTS: u32 = 12;

/// Generate vertices for a stroked line segment (a quad, two triangles)
pub fn segment(start: Vec2, end: Vec2, width: f32, color: Rgba) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_segment(&mut vertices, start, end, width, color);
    vertices
}

fn push_segment(vertices: &mut Vec<Vertex>, start: Vec2, end: Vec2, width: f32, color: Rgba) {
    let dir = (end - start).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = start + perp;
    let b1 = start - perp;
    let a2 = end + perp;
    let b2 = end - perp;

    vertices.push(Vertex::new(a1.x, a1.y, color));
    vertices.push(Vertex::new(b1.x, b1.y, color));
    vertices.push(Vertex::new(a2.x, a2.y, color));

    vertices.push(Vertex::new(a2.x, a2.y, color));
    vertices.push(Vertex::new(b1.x, b1.y, color));
    vertices.push(Vertex::new(b2.x, b2.y, color));
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    push_circle(&mut vertices, center, radius, color, segments);
    vertices
}

fn push_circle(vertices: &mut Vec<Vertex>, center: Vec2, radius: f32, color: Rgba, segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Tessellate one frame's marks, in draw order
///
/// A segment's tip leaf is drawn right after the segment so it sits on top.
pub fn tessellate(marks: &[Mark]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(marks.len() * 6);
    for mark in marks {
        match mark {
            Mark::Segment {
                start,
                end,
                width,
                color,
                tip,
            } => {
                push_segment(&mut vertices, *start, *end, *width, *color);
                if let Some(dot) = tip {
                    push_dot(&mut vertices, dot);
                }
            }
            Mark::Dot(dot) => push_dot(&mut vertices, dot),
        }
    }
    vertices
}

fn push_dot(vertices: &mut Vec<Vertex>, dot: &Dot) {
    push_circle(vertices, dot.center, dot.radius, dot.color, DOT_SEGMENTS);
}
