//! Transform stack for bracket nesting during one symbol's expansion

use super::transform::TransformId;

/// Stack element: where to continue from, pending rotation, nesting depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformFrame {
    pub transform: TransformId,
    /// Radians not yet applied to any activated symbol
    pub rotation: f32,
    /// Global bracket depth (carried across generations through symbol ages)
    pub depth: u32,
}

/// Stack seeded with one frame that can never be popped
///
/// A stray `]` is counted and ignored instead of emptying the stack, so an
/// expansion always ends on a frame it can link from.
#[derive(Debug, Clone)]
pub struct TransformStack {
    base: TransformFrame,
    nested: Vec<TransformFrame>,
    pushes: u32,
    pops: u32,
    stray_pops: u32,
}

impl TransformStack {
    pub fn new(seed: TransformFrame) -> Self {
        Self {
            base: seed,
            nested: Vec::new(),
            pushes: 0,
            pops: 0,
            stray_pops: 0,
        }
    }

    pub fn top(&self) -> &TransformFrame {
        self.nested.last().unwrap_or(&self.base)
    }

    pub fn top_mut(&mut self) -> &mut TransformFrame {
        match self.nested.last_mut() {
            Some(frame) => frame,
            None => &mut self.base,
        }
    }

    pub fn replace_top(&mut self, frame: TransformFrame) {
        *self.top_mut() = frame;
    }

    /// Duplicate the top frame one level deeper; returns the new depth
    pub fn push(&mut self) -> u32 {
        let top = *self.top();
        let depth = top.depth + 1;
        self.nested.push(TransformFrame { depth, ..top });
        self.pushes += 1;
        depth
    }

    /// Drop the top frame; false (and nothing popped) for an unmatched `]`
    pub fn pop(&mut self) -> bool {
        if self.nested.pop().is_some() {
            self.pops += 1;
            true
        } else {
            self.stray_pops += 1;
            false
        }
    }

    /// Number of frames, including the seed
    pub fn len(&self) -> usize {
        1 + self.nested.len()
    }

    /// True when no bracket is open
    pub fn is_outer(&self) -> bool {
        self.nested.is_empty()
    }

    pub fn pushes(&self) -> u32 {
        self.pushes
    }

    pub fn pops(&self) -> u32 {
        self.pops
    }

    pub fn stray_pops(&self) -> u32 {
        self.stray_pops
    }

    /// Brackets still open
    pub fn unclosed(&self) -> usize {
        self.nested.len()
    }
}
