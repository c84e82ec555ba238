use crate::block::{BlockFlags, BlockRenderer, BlockState};
use crate::dispatch::{self, CommandContext};
use crate::error::AnnotationError;
use crate::producer::{CodeProducer, ExecutionChannel};
use crate::settings::AnnotationSettings;
use crate::shell::BubbleShell;
use crate::widget::{Annotation, Transition};
use bubbles_core::{AnnotationKind, BlockId, BubbleSize, Command, Point};
use bubbles_events::telemetry::{CommandRecord, CommandSpan};
use bubbles_events::{Event, EventBus};
use std::collections::HashMap;
use tracing::{debug, info};

/// Collaborators the annotations drive but do not own.
pub struct Services {
    pub shell: Box<dyn BubbleShell>,
    pub renderer: Box<dyn BlockRenderer>,
    pub producer: Box<dyn CodeProducer>,
    pub channel: Box<dyn ExecutionChannel>,
}

#[derive(Clone, Default)]
pub(crate) struct EventSink(Option<EventBus>);

impl EventSink {
    pub(crate) fn publish(&self, event: Event) {
        if let Some(bus) = &self.0 {
            bus.publish(event);
        }
    }
}

/// The blocks of one editor workspace and their annotations.
///
/// All calls run on the UI thread in response to a single user event, so
/// there is no interior locking.
pub struct Workspace {
    blocks: HashMap<BlockId, BlockState>,
    services: Services,
    settings: AnnotationSettings,
    events: EventSink,
    command_log: Vec<CommandRecord>,
}

impl Workspace {
    pub fn new(services: Services, settings: AnnotationSettings) -> Self {
        Self {
            blocks: HashMap::new(),
            services,
            settings,
            events: EventSink::default(),
            command_log: Vec::new(),
        }
    }

    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.attach_event_bus(bus);
        self
    }

    pub fn attach_event_bus(&mut self, bus: EventBus) {
        self.events = EventSink(Some(bus));
    }

    pub fn settings(&self) -> &AnnotationSettings {
        &self.settings
    }

    pub(crate) fn shell(&self) -> &dyn BubbleShell {
        self.services.shell.as_ref()
    }

    pub fn add_block(&mut self, id: BlockId, flags: BlockFlags) -> Result<(), AnnotationError> {
        if self.blocks.contains_key(&id) {
            return Err(AnnotationError::DuplicateBlock(id));
        }
        self.blocks.insert(id, BlockState::new(id, flags));
        Ok(())
    }

    /// Destroy a block. Its annotations are disposed first, closing any open panel.
    pub fn remove_block(&mut self, id: BlockId) -> Result<BlockFlags, AnnotationError> {
        let mut state = self
            .blocks
            .remove(&id)
            .ok_or(AnnotationError::UnknownBlock(id))?;
        for annotation in state.annotations.drain() {
            let kind = annotation.kind();
            annotation.dispose(self.services.shell.as_mut());
            self.events.publish(Event::AnnotationDisposed { block: id, kind });
        }
        info!(block = %id, "Block removed");
        Ok(state.flags)
    }

    pub fn block(&self, id: BlockId) -> Option<&BlockState> {
        self.blocks.get(&id)
    }

    pub fn block_ids(&self) -> Vec<BlockId> {
        let mut ids: Vec<_> = self.blocks.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn flags_mut(&mut self, id: BlockId) -> Result<&mut BlockFlags, AnnotationError> {
        self.blocks
            .get_mut(&id)
            .map(|state| &mut state.flags)
            .ok_or(AnnotationError::UnknownBlock(id))
    }

    pub(crate) fn split_mut(
        &mut self,
        id: BlockId,
    ) -> Result<(&mut BlockState, &mut Services, &EventSink), AnnotationError> {
        let state = self
            .blocks
            .get_mut(&id)
            .ok_or(AnnotationError::UnknownBlock(id))?;
        Ok((state, &mut self.services, &self.events))
    }

    fn annotation(&self, block: BlockId, kind: AnnotationKind) -> Result<&Annotation, AnnotationError> {
        self.block(block)
            .ok_or(AnnotationError::UnknownBlock(block))?
            .annotations
            .get(kind)
            .ok_or(AnnotationError::NoAnnotation { block, kind })
    }

    pub fn has_annotation(&self, block: BlockId, kind: AnnotationKind) -> bool {
        self.annotation(block, kind).is_ok()
    }

    /// Raw text of an annotation, as the user sees it.
    pub fn annotation_text(&self, block: BlockId, kind: AnnotationKind) -> Result<String, AnnotationError> {
        Ok(self.annotation(block, kind)?.text(self.shell()))
    }

    pub fn set_annotation_text(
        &mut self,
        block: BlockId,
        kind: AnnotationKind,
        text: &str,
    ) -> Result<(), AnnotationError> {
        let (state, services, _) = self.split_mut(block)?;
        let annotation = state
            .annotations
            .get_mut(kind)
            .ok_or(AnnotationError::NoAnnotation { block, kind })?;
        annotation.set_text(services.shell.as_mut(), text);
        Ok(())
    }

    pub fn annotation_size(&self, block: BlockId, kind: AnnotationKind) -> Result<BubbleSize, AnnotationError> {
        Ok(self.annotation(block, kind)?.size(self.shell()))
    }

    pub fn set_annotation_size(
        &mut self,
        block: BlockId,
        kind: AnnotationKind,
        size: BubbleSize,
    ) -> Result<(), AnnotationError> {
        let (state, services, _) = self.split_mut(block)?;
        let annotation = state
            .annotations
            .get_mut(kind)
            .ok_or(AnnotationError::NoAnnotation { block, kind })?;
        annotation.set_size(services.shell.as_mut(), size);
        Ok(())
    }

    pub fn is_visible(&self, block: BlockId, kind: AnnotationKind) -> Result<bool, AnnotationError> {
        Ok(self.annotation(block, kind)?.is_visible())
    }

    pub fn set_visible(
        &mut self,
        block: BlockId,
        kind: AnnotationKind,
        visible: bool,
    ) -> Result<(), AnnotationError> {
        let settings = self.settings.clone();
        let (state, services, events) = self.split_mut(block)?;
        let annotation = state
            .annotations
            .get_mut(kind)
            .ok_or(AnnotationError::NoAnnotation { block, kind })?;
        match annotation.set_visible(visible, &mut state.flags, services.shell.as_mut(), &settings) {
            Transition::Unchanged => {}
            Transition::Shown { editable } => {
                events.publish(Event::AnnotationShown {
                    block,
                    kind,
                    editable,
                })
            }
            Transition::Hidden => events.publish(Event::AnnotationHidden { block, kind }),
        }
        Ok(())
    }

    /// Icon click.
    pub fn toggle_visible(&mut self, block: BlockId, kind: AnnotationKind) -> Result<(), AnnotationError> {
        let visible = self.is_visible(block, kind)?;
        self.set_visible(block, kind, !visible)
    }

    /// Where new panels for this annotation are anchored; reported by the renderer.
    pub fn set_icon_anchor(
        &mut self,
        block: BlockId,
        kind: AnnotationKind,
        anchor: Point,
    ) -> Result<(), AnnotationError> {
        let (state, _, _) = self.split_mut(block)?;
        state
            .annotations
            .get_mut(kind)
            .ok_or(AnnotationError::NoAnnotation { block, kind })?
            .set_anchor(anchor);
        Ok(())
    }

    /// Pointer release inside the text area: bring the panel to the front.
    pub fn focus(&mut self, block: BlockId, kind: AnnotationKind) -> Result<(), AnnotationError> {
        let (state, services, _) = self.split_mut(block)?;
        state
            .annotations
            .get(kind)
            .ok_or(AnnotationError::NoAnnotation { block, kind })?
            .focus(services.shell.as_mut());
        Ok(())
    }

    /// Change editability and rebuild every open panel in the matching mode.
    pub fn update_editable(&mut self, block: BlockId, editable: bool) -> Result<(), AnnotationError> {
        self.flags_mut(block)?.editable = editable;
        let open: Vec<AnnotationKind> = self
            .block(block)
            .map(|state| {
                state
                    .annotations
                    .kinds()
                    .filter(|&kind| {
                        state
                            .annotations
                            .get(kind)
                            .is_some_and(Annotation::is_visible)
                    })
                    .collect()
            })
            .unwrap_or_default();
        for kind in open {
            self.set_visible(block, kind, false)?;
            self.set_visible(block, kind, true)?;
        }
        Ok(())
    }

    pub(crate) fn relabel(
        &mut self,
        block: BlockId,
        kind: AnnotationKind,
        command: Command,
    ) -> Result<(), AnnotationError> {
        let (state, services, _) = self.split_mut(block)?;
        let annotation = state
            .annotations
            .get(kind)
            .ok_or(AnnotationError::NoAnnotation { block, kind })?;
        annotation.relabel(services.shell.as_mut(), command, &state.flags);
        Ok(())
    }

    pub(crate) fn generate_code(&self, block: BlockId) -> Result<String, AnnotationError> {
        let state = self.block(block).ok_or(AnnotationError::UnknownBlock(block))?;
        self.services
            .producer
            .block_to_code(state)
            .into_primary()
            .ok_or(AnnotationError::EmptyGeneratedCode(block))
    }

    pub(crate) fn submit_code(&mut self, block: BlockId, code: &str) -> Result<(), AnnotationError> {
        if !self.blocks.contains_key(&block) {
            return Err(AnnotationError::UnknownBlock(block));
        }
        debug!(%block, bytes = code.len(), "Submitting generated code");
        self.services.channel.submit(code, block);
        self.events.publish(Event::CodeSubmitted {
            block,
            code: code.to_string(),
        });
        Ok(())
    }

    /// Run a panel button command. The outcome is logged and appended to
    /// [`Workspace::command_log`].
    pub fn run_command(
        &mut self,
        block: BlockId,
        kind: AnnotationKind,
        command: Command,
    ) -> Result<(), AnnotationError> {
        let span = CommandSpan::start(block, kind, command);

        let policy = self.annotation(block, kind).map(Annotation::policy);
        let result = policy.and_then(|policy| {
            let mut cx = CommandContext::new(self, block);
            dispatch::dispatch(policy, command, &mut cx)
        });

        let record = match &result {
            Ok(()) => span.succeed(),
            Err(error) => span.fail(error),
        };
        self.command_log.push(record);
        result
    }

    /// Every command run so far, oldest first.
    pub fn command_log(&self) -> &[CommandRecord] {
        &self.command_log
    }
}
