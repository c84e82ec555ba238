use bubbles_core::{AnnotationKind, BlockId};
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

pub mod telemetry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // ========================================================================
    // Annotation lifecycle
    // ========================================================================
    AnnotationCreated {
        block: BlockId,
        kind: AnnotationKind,
    },
    AnnotationDisposed {
        block: BlockId,
        kind: AnnotationKind,
    },

    // ========================================================================
    // Panel visibility
    // ========================================================================
    AnnotationShown {
        block: BlockId,
        kind: AnnotationKind,
        /// False when the block is not editable and a warning-style panel was used.
        editable: bool,
    },
    AnnotationHidden {
        block: BlockId,
        kind: AnnotationKind,
    },

    // ========================================================================
    // Block side effects
    // ========================================================================
    /// The block's footprint changed; it was re-rendered and neighbours bumped.
    BlockRelayout {
        block: BlockId,
    },
    /// Generated code for the block was handed to the execution channel.
    CodeSubmitted {
        block: BlockId,
        code: String,
    },
}

#[derive(Clone)]
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<Event> {
        self.rx.clone()
    }

    pub fn publish(&self, event: Event) {
        let _ = self.tx.send(event);
    }

    /// Drain everything currently queued.
    pub fn drain(&self) -> Vec<Event> {
        self.rx.try_iter().collect()
    }

    /// Dispatch all pending events to a listener.
    /// This is useful for processing events in the UI loop.
    pub fn dispatch_to<L: EventListener>(&self, listener: &mut L) {
        while let Ok(event) = self.rx.try_recv() {
            listener.handle_event(&event);
        }
    }
}

/// Trait for components that respond to events.
/// Implement this to receive events from the EventBus.
pub trait EventListener {
    fn handle_event(&mut self, event: &Event);
}
