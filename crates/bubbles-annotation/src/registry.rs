//! Per-block annotation registry.
//!
//! Each block owns an [`AnnotationSet`] with at most one annotation per kind.
//! Everything outside this crate reads and writes annotations through
//! [`Workspace::get_text`] and [`Workspace::set_text_or_delete`].

use crate::error::AnnotationError;
use crate::widget::Annotation;
use crate::workspace::Workspace;
use bubbles_core::{AnnotationKind, BlockId};
use bubbles_events::Event;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct AnnotationSet {
    entries: BTreeMap<AnnotationKind, Annotation>,
}

impl AnnotationSet {
    pub fn get(&self, kind: AnnotationKind) -> Option<&Annotation> {
        self.entries.get(&kind)
    }

    pub(crate) fn get_mut(&mut self, kind: AnnotationKind) -> Option<&mut Annotation> {
        self.entries.get_mut(&kind)
    }

    pub fn contains(&self, kind: AnnotationKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = AnnotationKind> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn get_or_create(
        &mut self,
        kind: AnnotationKind,
        create: impl FnOnce() -> Annotation,
    ) -> (&mut Annotation, bool) {
        let created = !self.entries.contains_key(&kind);
        (self.entries.entry(kind).or_insert_with(create), created)
    }

    pub(crate) fn remove(&mut self, kind: AnnotationKind) -> Option<Annotation> {
        self.entries.remove(&kind)
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = Annotation> + '_ {
        std::mem::take(&mut self.entries).into_values()
    }
}

/// Drop trailing whitespace and spaces that sit right before a newline.
pub fn normalize_text(text: &str) -> String {
    text.trim_end()
        .split('\n')
        .map(|line| line.trim_end_matches(' '))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Workspace {
    /// Text of the `kind` annotation on `block`, normalized; `""` if there is none.
    pub fn get_text(&self, block: BlockId, kind: AnnotationKind) -> Result<String, AnnotationError> {
        let state = self.block(block).ok_or(AnnotationError::UnknownBlock(block))?;
        Ok(state
            .annotations
            .get(kind)
            .map(|annotation| normalize_text(&annotation.text(self.shell())))
            .unwrap_or_default())
    }

    /// Set the text of the `kind` annotation on `block`, creating it if needed,
    /// or delete it when `text` is `None`. Returns whether the annotation
    /// appeared or disappeared.
    pub fn set_text_or_delete(
        &mut self,
        block: BlockId,
        kind: AnnotationKind,
        text: Option<&str>,
    ) -> Result<bool, AnnotationError> {
        let default_size = self.settings().default_size;
        let (state, services, events) = self.split_mut(block)?;

        let changed = match text {
            Some(text) => {
                let (annotation, created) = state
                    .annotations
                    .get_or_create(kind, || Annotation::new(kind, default_size));
                if annotation.policy().accept_write(&mut state.flags) {
                    annotation.set_text(services.shell.as_mut(), text);
                } else {
                    debug!(%block, %kind, "Ignored first watch write after do-it");
                }
                if created {
                    info!(%block, %kind, "Annotation created");
                    events.publish(Event::AnnotationCreated { block, kind });
                }
                created
            }
            None => match state.annotations.remove(kind) {
                Some(annotation) => {
                    annotation.dispose(services.shell.as_mut());
                    info!(%block, %kind, "Annotation disposed");
                    events.publish(Event::AnnotationDisposed { block, kind });
                    true
                }
                None => false,
            },
        };

        if changed && state.flags.rendered {
            // The icon row changed, so the block changed shape.
            services.renderer.render(state);
            services.renderer.bump_neighbours(block);
            events.publish(Event::BlockRelayout { block });
        }
        Ok(changed)
    }

    /// The block's comment, if it has one.
    pub fn comment_text(&self, block: BlockId) -> Result<Option<String>, AnnotationError> {
        let state = self.block(block).ok_or(AnnotationError::UnknownBlock(block))?;
        Ok(state
            .annotations
            .get(AnnotationKind::Comment)
            .map(|annotation| annotation.text(self.shell())))
    }

    pub fn set_comment_text(
        &mut self,
        block: BlockId,
        text: Option<&str>,
    ) -> Result<(), AnnotationError> {
        self.set_text_or_delete(block, AnnotationKind::Comment, text)
            .map(|_| ())
    }
}
