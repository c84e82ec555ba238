use anyhow::{Context, Result, bail};
use bubbles_annotation::headless::{HeadlessWorkspace, Submission};
use bubbles_annotation::{AnnotationSettings, BlockFlags, GeneratedCode};
use bubbles_core::{AnnotationKind, BlockId, BubbleSize, Command};
use bubbles_events::telemetry::CommandRecord;
use bubbles_events::{Event, EventBus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct BlockSpec {
    pub id: BlockId,
    #[serde(default)]
    pub flags: BlockFlags,
    /// What the code generator returns for this block.
    pub code: Option<GeneratedCode>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    SetText { block: BlockId, kind: String, text: String },
    Delete { block: BlockId, kind: String },
    Show { block: BlockId, kind: String },
    Hide { block: BlockId, kind: String },
    Toggle { block: BlockId, kind: String },
    /// Replace the text of an open panel, as if typed by the user.
    Type { block: BlockId, kind: String, text: String },
    Resize { block: BlockId, kind: String, width: f32, height: f32 },
    Command { block: BlockId, kind: String, command: Command },
    SetEditable { block: BlockId, editable: bool },
    RemoveBlock { block: BlockId },
}

#[derive(Debug, Serialize)]
pub struct AnnotationReport {
    pub kind: AnnotationKind,
    pub tag: char,
    pub text: String,
    pub visible: bool,
    pub size: BubbleSize,
}

#[derive(Debug, Serialize)]
pub struct BlockReport {
    pub id: BlockId,
    pub flags: BlockFlags,
    pub annotations: Vec<AnnotationReport>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub blocks: Vec<BlockReport>,
    pub submissions: Vec<Submission>,
    pub events: Vec<Event>,
    /// One record per button command, failures included.
    pub commands: Vec<CommandRecord>,
    pub failed_steps: Vec<String>,
}

fn parse_kind(tag: &str) -> Result<AnnotationKind> {
    tag.parse()
        .with_context(|| format!("bad annotation kind {tag:?}"))
}

fn apply(headless: &mut HeadlessWorkspace, step: &Step) -> Result<()> {
    let ws = &mut headless.workspace;
    match step {
        Step::SetText { block, kind, text } => {
            ws.set_text_or_delete(*block, parse_kind(kind)?, Some(text))?;
        }
        Step::Delete { block, kind } => {
            ws.set_text_or_delete(*block, parse_kind(kind)?, None)?;
        }
        Step::Show { block, kind } => ws.set_visible(*block, parse_kind(kind)?, true)?,
        Step::Hide { block, kind } => ws.set_visible(*block, parse_kind(kind)?, false)?,
        Step::Toggle { block, kind } => ws.toggle_visible(*block, parse_kind(kind)?)?,
        Step::Type { block, kind, text } => {
            let kind = parse_kind(kind)?;
            let panel = ws
                .block(*block)
                .and_then(|state| state.annotations().get(kind))
                .and_then(|annotation| annotation.panel());
            let Some(panel) = panel else {
                bail!("no open {kind} panel on block {block}");
            };
            headless.shell.user_type(panel, text);
            ws.focus(*block, kind)?;
        }
        Step::Resize {
            block,
            kind,
            width,
            height,
        } => {
            ws.set_annotation_size(*block, parse_kind(kind)?, BubbleSize::new(*width, *height))?;
        }
        Step::Command {
            block,
            kind,
            command,
        } => ws.run_command(*block, parse_kind(kind)?, *command)?,
        Step::SetEditable { block, editable } => ws.update_editable(*block, *editable)?,
        Step::RemoveBlock { block } => {
            ws.remove_block(*block)?;
        }
    }
    Ok(())
}

/// Run `script` against headless collaborators and report the final state.
pub fn replay(script: &Script, settings: AnnotationSettings, keep_going: bool) -> Result<Report> {
    let mut headless = HeadlessWorkspace::new(settings);
    let bus = EventBus::new();
    headless.workspace.attach_event_bus(bus.clone());

    for spec in &script.blocks {
        headless.workspace.add_block(spec.id, spec.flags.clone())?;
        if let Some(code) = &spec.code {
            headless.producer.set_code(spec.id, code.clone());
        }
    }

    let mut failed_steps = Vec::new();
    for (index, step) in script.steps.iter().enumerate() {
        tracing::debug!(index, ?step, "Applying step");
        if let Err(e) = apply(&mut headless, step) {
            if !keep_going {
                return Err(e.context(format!("step {index} failed")));
            }
            tracing::warn!(index, error = %e, "Step failed, continuing");
            failed_steps.push(format!("step {index}: {e:#}"));
        }
    }

    let ws = &headless.workspace;
    let mut blocks = Vec::new();
    for id in ws.block_ids() {
        let Some(state) = ws.block(id) else { continue };
        let mut annotations = Vec::new();
        for kind in state.annotations().kinds() {
            annotations.push(AnnotationReport {
                kind,
                tag: kind.tag(),
                text: ws.annotation_text(id, kind)?,
                visible: ws.is_visible(id, kind)?,
                size: ws.annotation_size(id, kind)?,
            });
        }
        blocks.push(BlockReport {
            id,
            flags: state.flags.clone(),
            annotations,
        });
    }

    Ok(Report {
        blocks,
        submissions: headless.sink.drain(),
        events: bus.drain(),
        commands: ws.command_log().to_vec(),
        failed_steps,
    })
}
