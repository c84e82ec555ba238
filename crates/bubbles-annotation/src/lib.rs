//! Text annotations ("bubbles") attached to blocks of a visual block editor.
//!
//! A block carries at most one annotation per [`AnnotationKind`]: a plain
//! comment, a watch log, a do-it console or a generated-code viewer. Each one
//! is either collapsed to an icon or expanded into an editable panel hosted
//! by a [`BubbleShell`]. Per-kind behaviour sits behind [`KindPolicy`].
//!
//! The rest of the editor goes through the registry pair
//! [`Workspace::get_text`] / [`Workspace::set_text_or_delete`].

pub mod block;
pub mod dispatch;
pub mod error;
pub mod headless;
pub mod policy;
pub mod producer;
pub mod registry;
pub mod settings;
pub mod shell;
pub mod widget;
pub mod workspace;

pub use block::{BlockFlags, BlockRenderer, BlockState};
pub use dispatch::CommandContext;
pub use error::AnnotationError;
pub use policy::KindPolicy;
pub use producer::{CodeProducer, ExecutionChannel, GeneratedCode};
pub use registry::{AnnotationSet, normalize_text};
pub use settings::AnnotationSettings;
pub use shell::{
    BubbleShell, ButtonSpec, EditorContent, EditorGeometry, PanelHandle, TextDirection,
};
pub use widget::Annotation;
pub use workspace::{Services, Workspace};

pub use bubbles_core::{AnnotationKind, BlockId, BubbleSize, Command, Point};

#[cfg(test)]
mod tests;
