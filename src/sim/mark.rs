//! Draw descriptors emitted by the growth tick
//!
//! The engine never draws. Each tick yields marks that a renderer turns into
//! pixels (see `crate::renderer`).

use glam::Vec2;

use crate::palette::Rgba;

/// Filled circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

/// One visible element for the current tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mark {
    /// Branch segment, with a leaf at the end while the branch is still growing
    Segment {
        start: Vec2,
        end: Vec2,
        width: f32,
        color: Rgba,
        tip: Option<Dot>,
    },
    /// Bud or leaf
    Dot(Dot),
}
