//! Button command telemetry. Every command run against an annotation gets a
//! correlation id, a start line and a closing line under [`TELEMETRY_TARGET`],
//! and leaves behind a [`CommandRecord`] the editor can keep or report.

use bubbles_core::{AnnotationKind, BlockId, Command};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

pub const TELEMETRY_TARGET: &str = "bubbles::events::telemetry";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandOutcome {
    Succeeded,
    Failed { reason: String },
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// What happened when a button command ran on one annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub correlation_id: Uuid,
    pub block: BlockId,
    pub kind: AnnotationKind,
    pub command: Command,
    pub outcome: CommandOutcome,
    pub duration_ms: u128,
}

/// A command that has started but not finished yet.
#[derive(Debug)]
pub struct CommandSpan {
    correlation_id: Uuid,
    block: BlockId,
    kind: AnnotationKind,
    command: Command,
    started: Instant,
}

impl CommandSpan {
    pub fn start(block: BlockId, kind: AnnotationKind, command: Command) -> Self {
        let span = Self {
            correlation_id: Uuid::new_v4(),
            block,
            kind,
            command,
            started: Instant::now(),
        };
        info!(
            target: TELEMETRY_TARGET,
            correlation_id = %span.correlation_id,
            %block,
            %kind,
            command = command.name(),
            "command_start"
        );
        span
    }

    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    pub fn succeed(self) -> CommandRecord {
        let record = self.into_record(CommandOutcome::Succeeded);
        info!(
            target: TELEMETRY_TARGET,
            correlation_id = %record.correlation_id,
            block = %record.block,
            kind = %record.kind,
            command = record.command.name(),
            duration_ms = record.duration_ms as u64,
            "command_success"
        );
        record
    }

    pub fn fail(self, reason: impl fmt::Display) -> CommandRecord {
        let record = self.into_record(CommandOutcome::Failed {
            reason: reason.to_string(),
        });
        error!(
            target: TELEMETRY_TARGET,
            correlation_id = %record.correlation_id,
            block = %record.block,
            kind = %record.kind,
            command = record.command.name(),
            error = %reason,
            "command_failure"
        );
        record
    }

    fn into_record(self, outcome: CommandOutcome) -> CommandRecord {
        CommandRecord {
            correlation_id: self.correlation_id,
            block: self.block,
            kind: self.kind,
            command: self.command,
            outcome,
            duration_ms: self.started.elapsed().as_millis(),
        }
    }
}
