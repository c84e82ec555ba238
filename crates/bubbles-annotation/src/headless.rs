//! In-memory collaborators for running annotations without a UI: tests,
//! scripted replays, headless tooling. Handles are cheap clones sharing state,
//! so a caller can keep one to inspect what the workspace did.

use crate::block::{BlockRenderer, BlockState};
use crate::workspace::{Services, Workspace};
use crate::producer::{CodeProducer, ExecutionChannel, GeneratedCode};
use crate::settings::AnnotationSettings;
use crate::shell::{
    BubbleShell, ButtonSpec, EditorContent, EditorGeometry, PanelHandle, ResizeCallback,
    TextDirection,
};
use bubbles_core::{BlockId, BubbleSize, Command, Point};
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRecord {
    pub anchor: Point,
    pub size: BubbleSize,
    pub text: String,
    pub buttons: Vec<ButtonSpec>,
    pub direction: TextDirection,
    pub editable: bool,
    /// Higher is closer to the front.
    pub z_order: u64,
    /// Last geometry returned by the resize callback.
    pub geometry: Option<EditorGeometry>,
}

#[derive(Default)]
struct ShellState {
    next_id: u64,
    next_z: u64,
    panels: HashMap<PanelHandle, PanelRecord>,
    callbacks: HashMap<PanelHandle, ResizeCallback>,
    created: usize,
    disposed: usize,
}

impl ShellState {
    fn open(&mut self, record: PanelRecord) -> PanelHandle {
        self.next_id += 1;
        self.next_z += 1;
        self.created += 1;
        let handle = PanelHandle(self.next_id);
        self.panels.insert(
            handle,
            PanelRecord {
                z_order: self.next_z,
                ..record
            },
        );
        handle
    }

    fn resize(&mut self, handle: PanelHandle, size: BubbleSize) {
        let geometry = self.callbacks.get(&handle).map(|callback| callback(size));
        if let Some(panel) = self.panels.get_mut(&handle) {
            panel.size = size;
            if geometry.is_some() {
                panel.geometry = geometry;
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryShell {
    inner: Rc<RefCell<ShellState>>,
}

impl InMemoryShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_panels(&self) -> usize {
        self.inner.borrow().panels.len()
    }

    pub fn created_count(&self) -> usize {
        self.inner.borrow().created
    }

    pub fn disposed_count(&self) -> usize {
        self.inner.borrow().disposed
    }

    pub fn panel(&self, handle: PanelHandle) -> Option<PanelRecord> {
        self.inner.borrow().panels.get(&handle).cloned()
    }

    pub fn front_most(&self) -> Option<PanelHandle> {
        self.inner
            .borrow()
            .panels
            .iter()
            .max_by_key(|(_, panel)| panel.z_order)
            .map(|(handle, _)| *handle)
    }

    /// Simulate the user typing into a panel's text area.
    pub fn user_type(&self, handle: PanelHandle, text: &str) {
        if let Some(panel) = self.inner.borrow_mut().panels.get_mut(&handle) {
            panel.text = text.to_string();
        }
    }

    /// Simulate the user dragging a panel's resize handle.
    pub fn user_resize(&self, handle: PanelHandle, size: BubbleSize) {
        self.inner.borrow_mut().resize(handle, size);
    }
}

impl BubbleShell for InMemoryShell {
    fn create(&mut self, anchor: Point, size: BubbleSize, content: EditorContent) -> PanelHandle {
        self.inner.borrow_mut().open(PanelRecord {
            anchor,
            size,
            text: content.text,
            buttons: content.buttons,
            direction: content.direction,
            editable: true,
            z_order: 0,
            geometry: None,
        })
    }

    fn create_read_only(&mut self, anchor: Point, text: &str) -> PanelHandle {
        self.inner.borrow_mut().open(PanelRecord {
            anchor,
            size: BubbleSize::default(),
            text: text.to_string(),
            buttons: Vec::new(),
            direction: TextDirection::default(),
            editable: false,
            z_order: 0,
            geometry: None,
        })
    }

    fn dispose(&mut self, handle: PanelHandle) {
        let mut state = self.inner.borrow_mut();
        state.callbacks.remove(&handle);
        if state.panels.remove(&handle).is_some() {
            state.disposed += 1;
        }
    }

    fn size(&self, handle: PanelHandle) -> Option<BubbleSize> {
        self.inner.borrow().panels.get(&handle).map(|panel| panel.size)
    }

    fn set_size(&mut self, handle: PanelHandle, size: BubbleSize) {
        self.inner.borrow_mut().resize(handle, size);
    }

    fn register_resize_callback(&mut self, handle: PanelHandle, callback: ResizeCallback) {
        self.inner.borrow_mut().callbacks.insert(handle, callback);
    }

    fn promote_to_front(&mut self, handle: PanelHandle) {
        let mut state = self.inner.borrow_mut();
        state.next_z += 1;
        let z = state.next_z;
        if let Some(panel) = state.panels.get_mut(&handle) {
            panel.z_order = z;
        }
    }

    fn text(&self, handle: PanelHandle) -> Option<String> {
        self.inner
            .borrow()
            .panels
            .get(&handle)
            .map(|panel| panel.text.clone())
    }

    fn set_text(&mut self, handle: PanelHandle, text: &str) {
        self.user_type(handle, text);
    }

    fn set_button_label(&mut self, handle: PanelHandle, command: Command, label: &str) {
        let mut state = self.inner.borrow_mut();
        let Some(panel) = state.panels.get_mut(&handle) else {
            return;
        };
        if let Some(button) = panel.buttons.iter_mut().find(|b| b.command == command) {
            button.label = label.to_string();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderCall {
    Render { block: BlockId, annotations: usize },
    BumpNeighbours { block: BlockId },
}

#[derive(Clone, Default)]
pub struct RecordingRenderer {
    calls: Rc<RefCell<Vec<RenderCall>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.borrow().clone()
    }
}

impl BlockRenderer for RecordingRenderer {
    fn render(&mut self, block: &BlockState) {
        self.calls.borrow_mut().push(RenderCall::Render {
            block: block.id(),
            annotations: block.annotations().len(),
        });
    }

    fn bump_neighbours(&mut self, block: BlockId) {
        self.calls
            .borrow_mut()
            .push(RenderCall::BumpNeighbours { block });
    }
}

/// Code producer answering from a fixed table.
#[derive(Clone, Default)]
pub struct StaticCodeProducer {
    codes: Rc<RefCell<HashMap<BlockId, GeneratedCode>>>,
    calls: Rc<Cell<usize>>,
}

impl StaticCodeProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_code(&self, block: BlockId, code: impl Into<GeneratedCode>) {
        self.codes.borrow_mut().insert(block, code.into());
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl CodeProducer for StaticCodeProducer {
    fn block_to_code(&self, block: &BlockState) -> GeneratedCode {
        self.calls.set(self.calls.get() + 1);
        self.codes
            .borrow()
            .get(&block.id())
            .cloned()
            .unwrap_or_else(|| GeneratedCode::Single(String::new()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub block: BlockId,
    pub code: String,
}

/// Execution channel that queues submissions on a crossbeam channel.
#[derive(Clone)]
pub struct ChannelSink {
    tx: Sender<Submission>,
    rx: Receiver<Submission>,
}

impl Default for ChannelSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelSink {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn receiver(&self) -> Receiver<Submission> {
        self.rx.clone()
    }

    pub fn drain(&self) -> Vec<Submission> {
        self.rx.try_iter().collect()
    }
}

impl ExecutionChannel for ChannelSink {
    fn submit(&mut self, code: &str, block: BlockId) {
        let _ = self.tx.send(Submission {
            block,
            code: code.to_string(),
        });
    }
}

/// A [`Workspace`] wired to in-memory collaborators, with handles kept for
/// inspection.
pub struct HeadlessWorkspace {
    pub workspace: Workspace,
    pub shell: InMemoryShell,
    pub renderer: RecordingRenderer,
    pub producer: StaticCodeProducer,
    pub sink: ChannelSink,
}

impl HeadlessWorkspace {
    pub fn new(settings: AnnotationSettings) -> Self {
        let shell = InMemoryShell::new();
        let renderer = RecordingRenderer::new();
        let producer = StaticCodeProducer::new();
        let sink = ChannelSink::new();
        let workspace = Workspace::new(
            Services {
                shell: Box::new(shell.clone()),
                renderer: Box::new(renderer.clone()),
                producer: Box::new(producer.clone()),
                channel: Box::new(sink.clone()),
            },
            settings,
        );
        Self {
            workspace,
            shell,
            renderer,
            producer,
            sink,
        }
    }
}
