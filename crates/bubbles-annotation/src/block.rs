use crate::registry::AnnotationSet;
use bubbles_core::BlockId;
use serde::{Deserialize, Serialize};

/// Block-level state the annotations read and mutate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockFlags {
    pub editable: bool,
    pub rendered: bool,
    /// Watch logging is on.
    pub watch: bool,
    /// Watch log prints newest entries first.
    pub order: bool,
    /// Drop the next write to the Watch annotation. Set when a Watch is
    /// seeded from a Do It, whose first result would otherwise be logged twice.
    pub watch_ignore: bool,
    /// A Do It evaluation has been requested for this block.
    pub doit: bool,
}

impl Default for BlockFlags {
    fn default() -> Self {
        Self {
            editable: true,
            rendered: true,
            watch: false,
            order: false,
            watch_ignore: false,
            doit: false,
        }
    }
}

#[derive(Debug)]
pub struct BlockState {
    id: BlockId,
    pub flags: BlockFlags,
    pub(crate) annotations: AnnotationSet,
}

impl BlockState {
    pub fn new(id: BlockId, flags: BlockFlags) -> Self {
        Self {
            id,
            flags,
            annotations: AnnotationSet::default(),
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }
}

/// Layout side of the editor: re-renders a block whose icon row changed.
pub trait BlockRenderer {
    fn render(&mut self, block: &BlockState);
    fn bump_neighbours(&mut self, block: BlockId);
}
