//! Per-kind behaviour: which buttons a panel shows and what the kind-specific
//! commands do. Shared behaviour (hide, clear) lives in [`crate::dispatch`].

use crate::block::BlockFlags;
use crate::dispatch::CommandContext;
use crate::error::AnnotationError;
use crate::shell::ButtonSpec;
use bubbles_core::command::{logging_label, order_label, remove_label};
use bubbles_core::{AnnotationKind, Command};
use std::fmt::Debug;

pub trait KindPolicy: Debug + Sync {
    fn kind(&self) -> AnnotationKind;

    /// Commands wired to buttons, in display order.
    fn commands(&self) -> &'static [Command];

    fn label(&self, command: Command, flags: &BlockFlags) -> &'static str {
        match command {
            Command::Remove => remove_label(self.kind()),
            Command::Hide => "Hide",
            Command::Clear => "Clear",
            Command::ToggleLogging => logging_label(flags.watch),
            Command::ReverseOrder => order_label(flags.order),
            Command::Reevaluate => "Do It Again",
            Command::Regenerate => "Regenerate",
        }
    }

    fn buttons(&self, flags: &BlockFlags) -> Vec<ButtonSpec> {
        self.commands()
            .iter()
            .map(|&command| ButtonSpec {
                command,
                label: self.label(command, flags).to_string(),
            })
            .collect()
    }

    fn supports(&self, command: Command) -> bool {
        self.commands().contains(&command)
    }

    /// Runs just before an editable panel is built.
    fn on_panel_open(&self, _flags: &mut BlockFlags) {}

    /// Whether a registry write should reach the annotation text.
    fn accept_write(&self, _flags: &mut BlockFlags) -> bool {
        true
    }

    fn remove(&self, cx: &mut CommandContext<'_>) -> Result<(), AnnotationError> {
        cx.set_text_or_delete(self.kind(), None).map(|_| ())
    }

    /// Commands beyond remove/hide/clear.
    fn run(&self, command: Command, _cx: &mut CommandContext<'_>) -> Result<(), AnnotationError> {
        Err(AnnotationError::UnsupportedCommand {
            kind: self.kind(),
            command,
        })
    }
}

const BASE_COMMANDS: [Command; 3] = [Command::Remove, Command::Hide, Command::Clear];

pub fn for_kind(kind: AnnotationKind) -> &'static dyn KindPolicy {
    match kind {
        AnnotationKind::Comment => &CommentPolicy,
        AnnotationKind::Watch => &WatchPolicy,
        AnnotationKind::DoIt => &DoItPolicy,
        AnnotationKind::Yail => &YailPolicy,
    }
}

#[derive(Debug)]
pub struct CommentPolicy;

impl KindPolicy for CommentPolicy {
    fn kind(&self) -> AnnotationKind {
        AnnotationKind::Comment
    }

    fn commands(&self) -> &'static [Command] {
        &BASE_COMMANDS
    }

    fn remove(&self, cx: &mut CommandContext<'_>) -> Result<(), AnnotationError> {
        cx.set_comment_text(None)
    }
}

#[derive(Debug)]
pub struct WatchPolicy;

impl WatchPolicy {
    fn toggle_logging(&self, cx: &mut CommandContext<'_>) -> Result<(), AnnotationError> {
        let flags = cx.flags_mut()?;
        if flags.watch {
            flags.watch = false;
            let newest_first = flags.order;
            let text = cx.text(AnnotationKind::Watch)?;
            let separator = cx.separator();
            let logged = if newest_first {
                format!("{separator}\n{text}")
            } else {
                format!("{text}\n{separator}")
            };
            cx.set_text_or_delete(AnnotationKind::Watch, Some(&logged))?;
        } else {
            flags.watch = true;
        }
        cx.relabel(AnnotationKind::Watch, Command::ToggleLogging)
    }

    fn reverse_order(&self, cx: &mut CommandContext<'_>) -> Result<(), AnnotationError> {
        let flags = cx.flags_mut()?;
        flags.order = !flags.order;
        let text = cx.annotation_text(AnnotationKind::Watch)?;
        cx.set_annotation_text(AnnotationKind::Watch, &reverse_lines(&text))?;
        cx.relabel(AnnotationKind::Watch, Command::ReverseOrder)
    }
}

impl KindPolicy for WatchPolicy {
    fn kind(&self) -> AnnotationKind {
        AnnotationKind::Watch
    }

    fn commands(&self) -> &'static [Command] {
        &[
            Command::Remove,
            Command::Hide,
            Command::Clear,
            Command::ToggleLogging,
            Command::ReverseOrder,
        ]
    }

    fn on_panel_open(&self, flags: &mut BlockFlags) {
        flags.order = true;
    }

    fn accept_write(&self, flags: &mut BlockFlags) -> bool {
        if flags.watch_ignore {
            flags.watch_ignore = false;
            return false;
        }
        true
    }

    fn remove(&self, cx: &mut CommandContext<'_>) -> Result<(), AnnotationError> {
        cx.flags_mut()?.watch = false;
        cx.set_text_or_delete(AnnotationKind::Watch, None).map(|_| ())
    }

    fn run(&self, command: Command, cx: &mut CommandContext<'_>) -> Result<(), AnnotationError> {
        match command {
            Command::ToggleLogging => self.toggle_logging(cx),
            Command::ReverseOrder => self.reverse_order(cx),
            _ => Err(AnnotationError::UnsupportedCommand {
                kind: self.kind(),
                command,
            }),
        }
    }
}

#[derive(Debug)]
pub struct DoItPolicy;

impl KindPolicy for DoItPolicy {
    fn kind(&self) -> AnnotationKind {
        AnnotationKind::DoIt
    }

    fn commands(&self) -> &'static [Command] {
        &[
            Command::Remove,
            Command::Hide,
            Command::Clear,
            Command::Reevaluate,
        ]
    }

    fn run(&self, command: Command, cx: &mut CommandContext<'_>) -> Result<(), AnnotationError> {
        if command != Command::Reevaluate {
            return Err(AnnotationError::UnsupportedCommand {
                kind: self.kind(),
                command,
            });
        }
        cx.flags_mut()?.doit = true;
        let code = cx.generate_code()?;
        cx.submit(&code)
    }
}

#[derive(Debug)]
pub struct YailPolicy;

impl KindPolicy for YailPolicy {
    fn kind(&self) -> AnnotationKind {
        AnnotationKind::Yail
    }

    fn commands(&self) -> &'static [Command] {
        &[
            Command::Remove,
            Command::Hide,
            Command::Clear,
            Command::Regenerate,
        ]
    }

    fn run(&self, command: Command, cx: &mut CommandContext<'_>) -> Result<(), AnnotationError> {
        if command != Command::Regenerate {
            return Err(AnnotationError::UnsupportedCommand {
                kind: self.kind(),
                command,
            });
        }
        let code = cx.generate_code()?;
        cx.set_annotation_text(AnnotationKind::Yail, &code)
    }
}

/// Reverse the order of newline-separated lines: the first line becomes last.
pub fn reverse_lines(text: &str) -> String {
    text.split('\n').rev().collect::<Vec<_>>().join("\n")
}
