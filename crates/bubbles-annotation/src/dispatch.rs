//! Button command dispatch.
//!
//! [`CommandContext`] is the narrow view of the workspace a policy gets while
//! a command runs: one block, its flags, its annotations and the collaborators.

use crate::block::BlockFlags;
use crate::error::AnnotationError;
use crate::policy::KindPolicy;
use crate::workspace::Workspace;
use bubbles_core::{AnnotationKind, BlockId, Command};

pub struct CommandContext<'a> {
    workspace: &'a mut Workspace,
    block: BlockId,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(workspace: &'a mut Workspace, block: BlockId) -> Self {
        Self { workspace, block }
    }

    pub fn block(&self) -> BlockId {
        self.block
    }

    pub fn flags_mut(&mut self) -> Result<&mut BlockFlags, AnnotationError> {
        self.workspace.flags_mut(self.block)
    }

    /// Normalized registry text.
    pub fn text(&self, kind: AnnotationKind) -> Result<String, AnnotationError> {
        self.workspace.get_text(self.block, kind)
    }

    pub fn set_text_or_delete(
        &mut self,
        kind: AnnotationKind,
        text: Option<&str>,
    ) -> Result<bool, AnnotationError> {
        self.workspace.set_text_or_delete(self.block, kind, text)
    }

    /// Raw widget text, untrimmed.
    pub fn annotation_text(&self, kind: AnnotationKind) -> Result<String, AnnotationError> {
        self.workspace.annotation_text(self.block, kind)
    }

    pub fn set_annotation_text(
        &mut self,
        kind: AnnotationKind,
        text: &str,
    ) -> Result<(), AnnotationError> {
        self.workspace.set_annotation_text(self.block, kind, text)
    }

    pub fn set_visible(&mut self, kind: AnnotationKind, visible: bool) -> Result<(), AnnotationError> {
        self.workspace.set_visible(self.block, kind, visible)
    }

    pub fn set_comment_text(&mut self, text: Option<&str>) -> Result<(), AnnotationError> {
        self.workspace.set_comment_text(self.block, text)
    }

    pub fn relabel(&mut self, kind: AnnotationKind, command: Command) -> Result<(), AnnotationError> {
        self.workspace.relabel(self.block, kind, command)
    }

    pub fn separator(&self) -> String {
        self.workspace.settings().separator.clone()
    }

    pub fn generate_code(&self) -> Result<String, AnnotationError> {
        self.workspace.generate_code(self.block)
    }

    pub fn submit(&mut self, code: &str) -> Result<(), AnnotationError> {
        self.workspace.submit_code(self.block, code)
    }
}

/// Run `command` for the annotation governed by `policy`.
pub fn dispatch(
    policy: &dyn KindPolicy,
    command: Command,
    cx: &mut CommandContext<'_>,
) -> Result<(), AnnotationError> {
    if !policy.supports(command) {
        return Err(AnnotationError::UnsupportedCommand {
            kind: policy.kind(),
            command,
        });
    }
    match command {
        Command::Remove => policy.remove(cx),
        Command::Hide => cx.set_visible(policy.kind(), false),
        Command::Clear => cx.set_annotation_text(policy.kind(), ""),
        other => policy.run(other, cx),
    }
}
