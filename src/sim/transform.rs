//! Spatial transforms and the arena that owns them
//!
//! Transforms are shared across symbol boundaries: a symbol's entry transform
//! is the exit transform of whatever precedes it (or of the ancestor at its
//! branch point). Every transform lives in a [`TransformArena`] owned by the
//! L-system and is addressed through a [`TransformId`] handle.

use std::ops::{Index, IndexMut};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sentence::Sentence;

/// Position, heading and growth-front flags at one point of the structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    /// Unit heading
    pub direction: Vec2,
    /// True once this node and every ancestor have finished growing
    pub start_growth: bool,
    /// True while the immediately preceding node is still extending
    pub growing_previous: bool,
}

impl Transform {
    pub fn new(position: Vec2, direction: Vec2) -> Self {
        Self {
            position,
            direction,
            start_growth: false,
            growing_previous: false,
        }
    }

    /// Root transform of a plant: pointing up, growth already allowed
    pub fn root(position: Vec2) -> Self {
        Self {
            start_growth: true,
            ..Self::new(position, Vec2::Y)
        }
    }
}

/// Handle to a transform slot in a [`TransformArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransformId(u32);

impl TransformId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owner of every transform of one L-system
#[derive(Debug, Clone, Default)]
pub struct TransformArena {
    slots: Vec<Transform>,
}

impl TransformArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a transform and return its handle
    pub fn alloc(&mut self, transform: Transform) -> TransformId {
        let id = TransformId(self.slots.len() as u32);
        self.slots.push(transform);
        id
    }

    pub fn get(&self, id: TransformId) -> Option<&Transform> {
        self.slots.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop slots no symbol of `sentence` refers to and renumber the rest
    ///
    /// Rewriting orphans the exit slot of every chain terminator (it adopts
    /// the slot of the symbol it replaced). Returns the number of freed slots.
    pub fn compact(&mut self, sentence: &mut Sentence) -> usize {
        let mut remap: Vec<Option<TransformId>> = vec![None; self.slots.len()];
        let mut slots = Vec::with_capacity(self.slots.len());

        for symbol in sentence.iter_mut() {
            for handle in [&mut symbol.transform_in, &mut symbol.transform_out] {
                let old = handle.index();
                let id = *remap[old].get_or_insert_with(|| {
                    slots.push(self.slots[old]);
                    TransformId(slots.len() as u32 - 1)
                });
                *handle = id;
            }
        }

        let freed = self.slots.len() - slots.len();
        self.slots = slots;
        freed
    }
}

impl Index<TransformId> for TransformArena {
    type Output = Transform;

    fn index(&self, id: TransformId) -> &Transform {
        &self.slots[id.index()]
    }
}

impl IndexMut<TransformId> for TransformArena {
    fn index_mut(&mut self, id: TransformId) -> &mut Transform {
        &mut self.slots[id.index()]
    }
}
