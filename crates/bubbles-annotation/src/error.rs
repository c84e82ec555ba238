use bubbles_core::{AnnotationKind, BlockId, Command, KindConversionError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotationError {
    #[error("Unknown block: {0}")]
    UnknownBlock(BlockId),
    #[error("Block already exists: {0}")]
    DuplicateBlock(BlockId),
    #[error("No {kind} annotation on block {block}")]
    NoAnnotation { block: BlockId, kind: AnnotationKind },
    #[error("{kind} annotations have no {command} command")]
    UnsupportedCommand {
        kind: AnnotationKind,
        command: Command,
    },
    #[error("Code producer returned nothing for block {0}")]
    EmptyGeneratedCode(BlockId),
    #[error("Settings error: {0}")]
    Settings(String),
    #[error(transparent)]
    Kind(#[from] KindConversionError),
}
