//! A single annotation on a block and its collapsed/expanded state machine.
//!
//! While collapsed the annotation owns its text and size. While expanded the
//! shell's panel owns them; [`Annotation::text`] and friends read whichever
//! side is authoritative, so callers never need to know the state.

use crate::block::BlockFlags;
use crate::policy::{self, KindPolicy};
use crate::settings::AnnotationSettings;
use crate::shell::{BubbleShell, EditorContent, EditorGeometry, PanelHandle};
use bubbles_core::{AnnotationKind, BubbleSize, Command, Point};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
enum View {
    Collapsed { text: String, size: BubbleSize },
    Expanded { panel: PanelHandle },
    /// Shown for blocks the user may not edit. Text stays buffered here and
    /// writes are mirrored into the panel.
    ReadOnly {
        panel: PanelHandle,
        text: String,
        size: BubbleSize,
    },
}

impl View {
    fn panel(&self) -> Option<PanelHandle> {
        match self {
            View::Collapsed { .. } => None,
            View::Expanded { panel } | View::ReadOnly { panel, .. } => Some(*panel),
        }
    }
}

/// Result of a visibility request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Shown { editable: bool },
    Hidden,
}

#[derive(Debug)]
pub struct Annotation {
    policy: &'static dyn KindPolicy,
    view: View,
    anchor: Point,
}

impl Annotation {
    pub(crate) fn new(kind: AnnotationKind, size: BubbleSize) -> Self {
        Self {
            policy: policy::for_kind(kind),
            view: View::Collapsed {
                text: String::new(),
                size,
            },
            anchor: Point::default(),
        }
    }

    pub fn kind(&self) -> AnnotationKind {
        self.policy.kind()
    }

    pub(crate) fn policy(&self) -> &'static dyn KindPolicy {
        self.policy
    }

    pub fn is_visible(&self) -> bool {
        self.view.panel().is_some()
    }

    /// True only while an editable panel is open.
    pub fn is_editing(&self) -> bool {
        matches!(self.view, View::Expanded { .. })
    }

    pub fn panel(&self) -> Option<PanelHandle> {
        self.view.panel()
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub(crate) fn set_anchor(&mut self, anchor: Point) {
        self.anchor = anchor;
    }

    pub fn text(&self, shell: &dyn BubbleShell) -> String {
        match &self.view {
            View::Collapsed { text, .. } | View::ReadOnly { text, .. } => text.clone(),
            View::Expanded { panel } => shell.text(*panel).unwrap_or_else(|| {
                warn!(kind = %self.kind(), ?panel, "Panel vanished from shell, reading empty text");
                String::new()
            }),
        }
    }

    pub(crate) fn set_text(&mut self, shell: &mut dyn BubbleShell, new_text: &str) {
        match &mut self.view {
            View::Collapsed { text, .. } => *text = new_text.to_string(),
            View::ReadOnly { panel, text, .. } => {
                *text = new_text.to_string();
                shell.set_text(*panel, new_text);
            }
            View::Expanded { panel } => shell.set_text(*panel, new_text),
        }
    }

    pub fn size(&self, shell: &dyn BubbleShell) -> BubbleSize {
        match &self.view {
            View::Collapsed { size, .. } | View::ReadOnly { size, .. } => *size,
            View::Expanded { panel } => shell.size(*panel).unwrap_or_default(),
        }
    }

    pub(crate) fn set_size(&mut self, shell: &mut dyn BubbleShell, new_size: BubbleSize) {
        match &mut self.view {
            View::Collapsed { size, .. } | View::ReadOnly { size, .. } => *size = new_size,
            View::Expanded { panel } => shell.set_size(*panel, new_size),
        }
    }

    /// Show or hide the panel. Text and size survive the switch verbatim.
    pub(crate) fn set_visible(
        &mut self,
        visible: bool,
        flags: &mut BlockFlags,
        shell: &mut dyn BubbleShell,
        settings: &AnnotationSettings,
    ) -> Transition {
        if visible == self.is_visible() {
            return Transition::Unchanged;
        }
        if !flags.editable && !self.is_editing() {
            return self.set_read_only_visible(visible, shell);
        }

        let text = self.text(shell);
        let size = self.size(shell);
        if let Some(panel) = self.view.panel() {
            shell.dispose(panel);
        }

        if visible {
            self.policy.on_panel_open(flags);
            let content = EditorContent {
                buttons: self.policy.buttons(flags),
                text,
                direction: settings.text_direction(),
            };
            let panel = shell.create(self.anchor, size, content);
            let (border, button_row) = (settings.border_width, settings.button_row_height);
            shell.register_resize_callback(
                panel,
                Box::new(move |size| EditorGeometry::fit(size, border, button_row)),
            );
            shell.set_size(panel, size);
            self.view = View::Expanded { panel };
            debug!(kind = %self.kind(), ?panel, "Annotation panel opened");
            Transition::Shown { editable: true }
        } else {
            self.view = View::Collapsed { text, size };
            debug!(kind = %self.kind(), "Annotation panel closed");
            Transition::Hidden
        }
    }

    fn set_read_only_visible(&mut self, visible: bool, shell: &mut dyn BubbleShell) -> Transition {
        let text = self.text(shell);
        let size = self.size(shell);
        if visible {
            let panel = shell.create_read_only(self.anchor, &text);
            self.view = View::ReadOnly { panel, text, size };
            debug!(kind = %self.kind(), ?panel, "Read-only annotation panel opened");
            Transition::Shown { editable: false }
        } else {
            if let Some(panel) = self.view.panel() {
                shell.dispose(panel);
            }
            self.view = View::Collapsed { text, size };
            Transition::Hidden
        }
    }

    pub(crate) fn focus(&self, shell: &mut dyn BubbleShell) {
        if let View::Expanded { panel } = self.view {
            shell.promote_to_front(panel);
        }
    }

    pub(crate) fn relabel(&self, shell: &mut dyn BubbleShell, command: Command, flags: &BlockFlags) {
        if let View::Expanded { panel } = self.view {
            shell.set_button_label(panel, command, self.policy.label(command, flags));
        }
    }

    pub(crate) fn dispose(self, shell: &mut dyn BubbleShell) {
        if let Some(panel) = self.view.panel() {
            shell.dispose(panel);
        }
    }
}
