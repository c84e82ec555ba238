use serde::{Deserialize, Serialize};
use std::fmt;

pub mod command;
pub mod kind;

pub use command::Command;
pub use kind::{AnnotationKind, KindConversionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub i64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Width and height of an annotation panel, in workspace units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleSize {
    pub width: f32,
    pub height: f32,
}

impl BubbleSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for BubbleSize {
    fn default() -> Self {
        Self::new(160.0, 80.0)
    }
}

/// Screen point a panel is anchored to (the block icon position).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
