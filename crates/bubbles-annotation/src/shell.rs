//! Contract with the floating panel ("bubble shell") that hosts an expanded
//! annotation. The shell owns drawing, dragging and the live text area; the
//! annotation only drives it through [`BubbleShell`].

use bubbles_core::{BubbleSize, Command, Point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonSpec {
    pub command: Command,
    pub label: String,
}

/// Initial content of an editable panel: a row of buttons above a text area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorContent {
    pub buttons: Vec<ButtonSpec>,
    pub text: String,
    pub direction: TextDirection,
}

/// Sizes the shell should apply to the panel's content after a resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EditorGeometry {
    /// The box holding the buttons and the text area.
    pub content: BubbleSize,
    pub text_area: BubbleSize,
}

impl EditorGeometry {
    /// Fit the editor inside a panel of `size`, leaving `border` on each side
    /// and `button_row` above the text area.
    pub fn fit(size: BubbleSize, border: f32, button_row: f32) -> Self {
        let inner_width = (size.width - 2.0 * border).max(0.0);
        let inner_height = (size.height - 2.0 * border).max(0.0);
        Self {
            content: BubbleSize::new(inner_width, inner_height),
            text_area: BubbleSize::new(inner_width, (inner_height - button_row).max(0.0)),
        }
    }
}

/// Called by the shell whenever the user resizes a panel.
pub type ResizeCallback = Box<dyn Fn(BubbleSize) -> EditorGeometry>;

pub trait BubbleShell {
    /// Open an editable panel anchored at `anchor`.
    fn create(&mut self, anchor: Point, size: BubbleSize, content: EditorContent) -> PanelHandle;

    /// Open a non-editable, warning-style panel showing `text`.
    fn create_read_only(&mut self, anchor: Point, text: &str) -> PanelHandle;

    fn dispose(&mut self, handle: PanelHandle);

    fn size(&self, handle: PanelHandle) -> Option<BubbleSize>;

    fn set_size(&mut self, handle: PanelHandle, size: BubbleSize);

    fn register_resize_callback(&mut self, handle: PanelHandle, callback: ResizeCallback);

    fn promote_to_front(&mut self, handle: PanelHandle);

    /// Current contents of the panel's text area.
    fn text(&self, handle: PanelHandle) -> Option<String>;

    fn set_text(&mut self, handle: PanelHandle, text: &str);

    fn set_button_label(&mut self, handle: PanelHandle, command: Command, label: &str);
}
