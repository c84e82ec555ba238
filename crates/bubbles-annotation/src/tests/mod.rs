use crate::headless::{HeadlessWorkspace, RenderCall, Submission};
use crate::{AnnotationError, AnnotationKind, AnnotationSettings, BlockFlags, BlockId, BubbleSize, Command};
use bubbles_events::telemetry::CommandOutcome;
use bubbles_events::{Event, EventBus};

const BLOCK: BlockId = BlockId(1);

fn setup() -> HeadlessWorkspace {
    setup_with(BlockFlags::default())
}

fn setup_with(flags: BlockFlags) -> HeadlessWorkspace {
    let mut headless = HeadlessWorkspace::new(AnnotationSettings::default());
    headless.workspace.add_block(BLOCK, flags).unwrap();
    headless
}

fn button_label(headless: &HeadlessWorkspace, kind: AnnotationKind, command: Command) -> String {
    let ws = &headless.workspace;
    let panel = ws.block(BLOCK).unwrap().annotations().get(kind).unwrap().panel().unwrap();
    headless
        .shell
        .panel(panel)
        .unwrap()
        .buttons
        .into_iter()
        .find(|button| button.command == command)
        .map(|button| button.label)
        .unwrap()
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_missing_annotation_reads_empty_and_delete_is_no_op() -> Result<(), AnnotationError> {
    let mut h = setup();

    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::Watch)?, "");
    assert!(!h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Watch, None)?);
    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::Watch)?, "");
    assert!(h.renderer.calls().is_empty());
    Ok(())
}

#[test]
fn test_repeated_writes_reuse_one_annotation() -> Result<(), AnnotationError> {
    let mut h = setup();

    assert!(h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Comment, Some("hello"))?);
    h.workspace.set_visible(BLOCK, AnnotationKind::Comment, true)?;
    let panel = h.workspace.block(BLOCK).unwrap().annotations().get(AnnotationKind::Comment).unwrap().panel();

    assert!(!h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Comment, Some("world"))?);
    let annotations = h.workspace.block(BLOCK).unwrap().annotations();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations.get(AnnotationKind::Comment).unwrap().panel(), panel);
    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::Comment)?, "world");
    assert_eq!(h.shell.created_count(), 1);
    Ok(())
}

#[test]
fn test_presence_change_relayouts_rendered_block() -> Result<(), AnnotationError> {
    let mut h = setup();

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Yail, Some("(x)"))?;
    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Yail, Some("(y)"))?;
    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Yail, None)?;

    assert_eq!(
        h.renderer.calls(),
        vec![
            RenderCall::Render { block: BLOCK, annotations: 1 },
            RenderCall::BumpNeighbours { block: BLOCK },
            RenderCall::Render { block: BLOCK, annotations: 0 },
            RenderCall::BumpNeighbours { block: BLOCK },
        ]
    );
    Ok(())
}

#[test]
fn test_unrendered_block_is_not_relaid_out() -> Result<(), AnnotationError> {
    let mut h = setup_with(BlockFlags {
        rendered: false,
        ..BlockFlags::default()
    });

    assert!(h.workspace.set_text_or_delete(BLOCK, AnnotationKind::DoIt, Some("1"))?);
    assert!(h.renderer.calls().is_empty());
    Ok(())
}

#[test]
fn test_get_text_is_normalized() -> Result<(), AnnotationError> {
    let mut h = setup();

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Comment, Some("one  \ntwo \n\n"))?;
    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::Comment)?, "one\ntwo");
    assert_eq!(h.workspace.annotation_text(BLOCK, AnnotationKind::Comment)?, "one  \ntwo \n\n");
    Ok(())
}

#[test]
fn test_last_write_wins_in_either_state() -> Result<(), AnnotationError> {
    let mut h = setup();

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::DoIt, Some("first"))?;
    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::DoIt, Some("second"))?;
    assert_eq!(h.workspace.annotation_text(BLOCK, AnnotationKind::DoIt)?, "second");

    h.workspace.set_visible(BLOCK, AnnotationKind::DoIt, true)?;
    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::DoIt, Some("third"))?;
    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::DoIt, Some("fourth"))?;
    assert_eq!(h.workspace.annotation_text(BLOCK, AnnotationKind::DoIt)?, "fourth");
    Ok(())
}

#[test]
fn test_watch_ignore_suppresses_exactly_one_write() -> Result<(), AnnotationError> {
    let mut h = setup_with(BlockFlags {
        watch_ignore: true,
        ..BlockFlags::default()
    });

    assert!(h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Watch, Some("x"))?);
    assert!(h.workspace.has_annotation(BLOCK, AnnotationKind::Watch));
    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::Watch)?, "");
    assert!(!h.workspace.block(BLOCK).unwrap().flags.watch_ignore);

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Watch, Some("y"))?;
    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::Watch)?, "y");
    Ok(())
}

#[test]
fn test_watch_ignore_does_not_touch_other_kinds() -> Result<(), AnnotationError> {
    let mut h = setup_with(BlockFlags {
        watch_ignore: true,
        ..BlockFlags::default()
    });

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::DoIt, Some("42"))?;
    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::DoIt)?, "42");
    assert!(h.workspace.block(BLOCK).unwrap().flags.watch_ignore);
    Ok(())
}

#[test]
fn test_unknown_block_is_an_error() {
    let mut h = setup();
    let missing = BlockId(404);

    assert_eq!(
        h.workspace.get_text(missing, AnnotationKind::Comment),
        Err(AnnotationError::UnknownBlock(missing))
    );
    assert_eq!(
        h.workspace.set_text_or_delete(missing, AnnotationKind::Comment, Some("x")),
        Err(AnnotationError::UnknownBlock(missing))
    );
    assert_eq!(
        h.workspace.add_block(BLOCK, BlockFlags::default()),
        Err(AnnotationError::DuplicateBlock(BLOCK))
    );
}

// ============================================================================
// Visibility
// ============================================================================

#[test]
fn test_panel_round_trip_keeps_text_and_size() -> Result<(), AnnotationError> {
    let mut h = setup();
    let size = BubbleSize::new(222.0, 111.0);

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Yail, Some("(define x 1)"))?;
    h.workspace.set_annotation_size(BLOCK, AnnotationKind::Yail, size)?;
    h.workspace.toggle_visible(BLOCK, AnnotationKind::Yail)?;
    assert!(h.workspace.is_visible(BLOCK, AnnotationKind::Yail)?);
    h.workspace.toggle_visible(BLOCK, AnnotationKind::Yail)?;
    assert!(!h.workspace.is_visible(BLOCK, AnnotationKind::Yail)?);

    assert_eq!(h.workspace.annotation_text(BLOCK, AnnotationKind::Yail)?, "(define x 1)");
    assert_eq!(h.workspace.annotation_size(BLOCK, AnnotationKind::Yail)?, size);
    assert_eq!(h.shell.open_panels(), 0);
    Ok(())
}

#[test]
fn test_update_editable_rebuilds_open_panels_read_only() -> Result<(), AnnotationError> {
    let mut h = setup();

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Comment, Some("note"))?;
    h.workspace.set_visible(BLOCK, AnnotationKind::Comment, true)?;
    h.workspace.update_editable(BLOCK, false)?;

    let annotation = h.workspace.block(BLOCK).unwrap().annotations().get(AnnotationKind::Comment).unwrap();
    assert!(annotation.is_visible());
    assert!(!annotation.is_editing());
    let record = h.shell.panel(annotation.panel().unwrap()).unwrap();
    assert!(!record.editable);
    assert_eq!(record.text, "note");
    assert_eq!(h.shell.open_panels(), 1);

    h.workspace.update_editable(BLOCK, true)?;
    let annotation = h.workspace.block(BLOCK).unwrap().annotations().get(AnnotationKind::Comment).unwrap();
    assert!(annotation.is_editing());
    Ok(())
}

#[test]
fn test_focus_promotes_panel() -> Result<(), AnnotationError> {
    let mut h = setup();

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Comment, Some("a"))?;
    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Yail, Some("b"))?;
    h.workspace.set_visible(BLOCK, AnnotationKind::Comment, true)?;
    h.workspace.set_visible(BLOCK, AnnotationKind::Yail, true)?;
    let comment_panel = h.workspace.block(BLOCK).unwrap().annotations().get(AnnotationKind::Comment).unwrap().panel();

    h.workspace.focus(BLOCK, AnnotationKind::Comment)?;
    assert_eq!(h.shell.front_most(), comment_panel);
    Ok(())
}

#[test]
fn test_panel_opens_at_icon_anchor() -> Result<(), AnnotationError> {
    let mut h = setup();
    let anchor = crate::Point::new(40.0, 12.0);

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Comment, Some("a"))?;
    h.workspace.set_icon_anchor(BLOCK, AnnotationKind::Comment, anchor)?;
    h.workspace.set_visible(BLOCK, AnnotationKind::Comment, true)?;

    let panel = h.workspace.block(BLOCK).unwrap().annotations().get(AnnotationKind::Comment).unwrap().panel().unwrap();
    assert_eq!(h.shell.panel(panel).unwrap().anchor, anchor);
    Ok(())
}

#[test]
fn test_remove_block_disposes_annotations() -> Result<(), AnnotationError> {
    let mut h = setup();

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Comment, Some("a"))?;
    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Watch, Some("b"))?;
    h.workspace.set_visible(BLOCK, AnnotationKind::Watch, true)?;

    h.workspace.remove_block(BLOCK)?;
    assert_eq!(h.shell.open_panels(), 0);
    assert!(h.workspace.block(BLOCK).is_none());
    assert!(h.workspace.block_ids().is_empty());
    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_toggle_logging_appends_separator() -> Result<(), AnnotationError> {
    let mut h = setup_with(BlockFlags {
        watch: true,
        order: false,
        ..BlockFlags::default()
    });

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Watch, Some("a\nb"))?;
    h.workspace.run_command(BLOCK, AnnotationKind::Watch, Command::ToggleLogging)?;

    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::Watch)?, "a\nb\n------");
    assert!(!h.workspace.block(BLOCK).unwrap().flags.watch);
    Ok(())
}

#[test]
fn test_toggle_logging_prepends_separator_when_newest_first() -> Result<(), AnnotationError> {
    let mut h = setup_with(BlockFlags {
        watch: true,
        order: true,
        ..BlockFlags::default()
    });

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Watch, Some("a\nb"))?;
    h.workspace.run_command(BLOCK, AnnotationKind::Watch, Command::ToggleLogging)?;

    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::Watch)?, "------\na\nb");
    Ok(())
}

#[test]
fn test_toggle_logging_turns_back_on_and_relabels() -> Result<(), AnnotationError> {
    let mut h = setup_with(BlockFlags {
        watch: true,
        ..BlockFlags::default()
    });

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Watch, Some("1"))?;
    h.workspace.set_visible(BLOCK, AnnotationKind::Watch, true)?;
    assert_eq!(button_label(&h, AnnotationKind::Watch, Command::ToggleLogging), "Turn Watch Off");

    h.workspace.run_command(BLOCK, AnnotationKind::Watch, Command::ToggleLogging)?;
    assert_eq!(button_label(&h, AnnotationKind::Watch, Command::ToggleLogging), "Turn Watch On");

    h.workspace.run_command(BLOCK, AnnotationKind::Watch, Command::ToggleLogging)?;
    assert!(h.workspace.block(BLOCK).unwrap().flags.watch);
    assert_eq!(button_label(&h, AnnotationKind::Watch, Command::ToggleLogging), "Turn Watch Off");
    // Opening the panel switched the log to newest-first, so the separator went on top.
    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::Watch)?, "------\n1");
    Ok(())
}

#[test]
fn test_reverse_order_reverses_existing_lines() -> Result<(), AnnotationError> {
    let mut h = setup();

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Watch, Some("1\n2\n3"))?;
    h.workspace.run_command(BLOCK, AnnotationKind::Watch, Command::ReverseOrder)?;

    assert_eq!(h.workspace.annotation_text(BLOCK, AnnotationKind::Watch)?, "3\n2\n1");
    assert!(h.workspace.block(BLOCK).unwrap().flags.order);
    Ok(())
}

#[test]
fn test_reverse_order_flips_label_on_open_panel() -> Result<(), AnnotationError> {
    let mut h = setup();

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Watch, Some("old\nnew"))?;
    h.workspace.set_visible(BLOCK, AnnotationKind::Watch, true)?;
    assert!(h.workspace.block(BLOCK).unwrap().flags.order);
    assert_eq!(button_label(&h, AnnotationKind::Watch, Command::ReverseOrder), "Print From Bottom");

    h.workspace.run_command(BLOCK, AnnotationKind::Watch, Command::ReverseOrder)?;
    assert!(!h.workspace.block(BLOCK).unwrap().flags.order);
    assert_eq!(button_label(&h, AnnotationKind::Watch, Command::ReverseOrder), "Print From Top");
    assert_eq!(h.workspace.annotation_text(BLOCK, AnnotationKind::Watch)?, "new\nold");
    Ok(())
}

#[test]
fn test_reevaluate_submits_first_generated_entry() -> Result<(), AnnotationError> {
    let mut h = setup();
    h.producer
        .set_code(BLOCK, vec!["(+ 1 2)".to_string(), "ORDER_NONE".to_string()]);

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::DoIt, Some("3"))?;
    h.workspace.run_command(BLOCK, AnnotationKind::DoIt, Command::Reevaluate)?;

    assert_eq!(h.producer.calls(), 1);
    assert_eq!(
        h.sink.drain(),
        vec![Submission {
            block: BLOCK,
            code: "(+ 1 2)".to_string()
        }]
    );
    assert!(h.workspace.block(BLOCK).unwrap().flags.doit);
    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::DoIt)?, "3");
    Ok(())
}

#[test]
fn test_reevaluate_forwards_single_string_verbatim() -> Result<(), AnnotationError> {
    let mut h = setup();
    h.producer.set_code(BLOCK, "(call-component-method 'Button1 'Click)  ");

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::DoIt, Some(""))?;
    h.workspace.run_command(BLOCK, AnnotationKind::DoIt, Command::Reevaluate)?;

    let submitted = h.sink.drain();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].code, "(call-component-method 'Button1 'Click)  ");
    Ok(())
}

#[test]
fn test_reevaluate_with_empty_code_submits_nothing() -> Result<(), AnnotationError> {
    let mut h = setup();
    h.producer.set_code(BLOCK, Vec::<String>::new());

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::DoIt, Some(""))?;
    assert_eq!(
        h.workspace.run_command(BLOCK, AnnotationKind::DoIt, Command::Reevaluate),
        Err(AnnotationError::EmptyGeneratedCode(BLOCK))
    );
    assert!(h.sink.drain().is_empty());
    Ok(())
}

#[test]
fn test_regenerate_displays_code_without_submitting() -> Result<(), AnnotationError> {
    let mut h = setup();
    h.producer
        .set_code(BLOCK, vec!["(get-var g$x)".to_string(), "0".to_string()]);

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Yail, Some("stale"))?;
    h.workspace.set_visible(BLOCK, AnnotationKind::Yail, true)?;
    h.workspace.run_command(BLOCK, AnnotationKind::Yail, Command::Regenerate)?;

    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::Yail)?, "(get-var g$x)");
    assert_eq!(h.producer.calls(), 1);
    assert!(h.sink.drain().is_empty());
    Ok(())
}

#[test]
fn test_remove_comment_clears_comment_slot() -> Result<(), AnnotationError> {
    let mut h = setup();

    h.workspace.set_comment_text(BLOCK, Some("why this block exists"))?;
    assert_eq!(
        h.workspace.comment_text(BLOCK)?.as_deref(),
        Some("why this block exists")
    );
    h.workspace.set_visible(BLOCK, AnnotationKind::Comment, true)?;

    h.workspace.run_command(BLOCK, AnnotationKind::Comment, Command::Remove)?;
    assert_eq!(h.workspace.comment_text(BLOCK)?, None);
    assert!(!h.workspace.has_annotation(BLOCK, AnnotationKind::Comment));
    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::Comment)?, "");
    assert_eq!(h.shell.open_panels(), 0);
    Ok(())
}

#[test]
fn test_remove_watch_stops_logging() -> Result<(), AnnotationError> {
    let mut h = setup_with(BlockFlags {
        watch: true,
        ..BlockFlags::default()
    });

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Watch, Some("1\n2"))?;
    h.workspace.run_command(BLOCK, AnnotationKind::Watch, Command::Remove)?;

    assert!(!h.workspace.block(BLOCK).unwrap().flags.watch);
    assert!(!h.workspace.has_annotation(BLOCK, AnnotationKind::Watch));
    Ok(())
}

#[test]
fn test_remove_do_it_and_yail_go_through_registry() -> Result<(), AnnotationError> {
    let mut h = setup();

    for kind in [AnnotationKind::DoIt, AnnotationKind::Yail] {
        h.workspace.set_text_or_delete(BLOCK, kind, Some("x"))?;
        h.workspace.run_command(BLOCK, kind, Command::Remove)?;
        assert!(!h.workspace.has_annotation(BLOCK, kind));
    }
    let relayouts = h
        .renderer
        .calls()
        .into_iter()
        .filter(|call| matches!(call, RenderCall::BumpNeighbours { .. }))
        .count();
    assert_eq!(relayouts, 4);
    Ok(())
}

#[test]
fn test_clear_and_hide_apply_to_every_kind() -> Result<(), AnnotationError> {
    let mut h = setup();

    for kind in AnnotationKind::ALL {
        h.workspace.set_text_or_delete(BLOCK, kind, Some("text"))?;
        h.workspace.set_visible(BLOCK, kind, true)?;

        h.workspace.run_command(BLOCK, kind, Command::Clear)?;
        assert_eq!(h.workspace.annotation_text(BLOCK, kind)?, "");
        assert!(h.workspace.has_annotation(BLOCK, kind));

        h.workspace.run_command(BLOCK, kind, Command::Hide)?;
        assert!(!h.workspace.is_visible(BLOCK, kind)?);
    }
    assert_eq!(h.shell.open_panels(), 0);
    Ok(())
}

#[test]
fn test_commands_outside_kind_are_rejected() -> Result<(), AnnotationError> {
    let mut h = setup();

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Comment, Some("x"))?;
    assert_eq!(
        h.workspace.run_command(BLOCK, AnnotationKind::Comment, Command::ToggleLogging),
        Err(AnnotationError::UnsupportedCommand {
            kind: AnnotationKind::Comment,
            command: Command::ToggleLogging
        })
    );
    assert_eq!(
        h.workspace.run_command(BLOCK, AnnotationKind::Watch, Command::Clear),
        Err(AnnotationError::NoAnnotation {
            block: BLOCK,
            kind: AnnotationKind::Watch
        })
    );
    assert_eq!(h.producer.calls(), 0);
    Ok(())
}

#[test]
fn test_events_follow_annotation_lifecycle() -> Result<(), AnnotationError> {
    let mut h = setup();
    let bus = EventBus::new();
    h.workspace.attach_event_bus(bus.clone());
    h.producer.set_code(BLOCK, "(foo)");

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::DoIt, Some("1"))?;
    h.workspace.set_visible(BLOCK, AnnotationKind::DoIt, true)?;
    h.workspace.run_command(BLOCK, AnnotationKind::DoIt, Command::Reevaluate)?;
    h.workspace.run_command(BLOCK, AnnotationKind::DoIt, Command::Remove)?;

    let kind = AnnotationKind::DoIt;
    assert_eq!(
        bus.drain(),
        vec![
            Event::AnnotationCreated { block: BLOCK, kind },
            Event::BlockRelayout { block: BLOCK },
            Event::AnnotationShown {
                block: BLOCK,
                kind,
                editable: true
            },
            Event::CodeSubmitted {
                block: BLOCK,
                code: "(foo)".to_string()
            },
            Event::AnnotationDisposed { block: BLOCK, kind },
            Event::BlockRelayout { block: BLOCK },
        ]
    );
    Ok(())
}

#[test]
fn test_read_only_panel_follows_registry_writes() -> Result<(), AnnotationError> {
    let mut h = setup_with(BlockFlags {
        editable: false,
        ..BlockFlags::default()
    });

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Watch, Some("1"))?;
    h.workspace.set_visible(BLOCK, AnnotationKind::Watch, true)?;
    let panel = h.workspace.block(BLOCK).unwrap().annotations().get(AnnotationKind::Watch).unwrap().panel().unwrap();
    assert!(!h.shell.panel(panel).unwrap().editable);

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Watch, Some("1\n2"))?;
    assert_eq!(h.shell.panel(panel).unwrap().text, "1\n2");
    assert_eq!(h.workspace.get_text(BLOCK, AnnotationKind::Watch)?, "1\n2");
    Ok(())
}

// ============================================================================
// Command log
// ============================================================================

#[test]
fn test_command_log_records_each_command() -> Result<(), AnnotationError> {
    let mut h = setup();

    h.workspace.set_text_or_delete(BLOCK, AnnotationKind::Yail, Some("old"))?;
    h.producer.set_code(BLOCK, "(new)");
    h.workspace.run_command(BLOCK, AnnotationKind::Yail, Command::Regenerate)?;
    assert!(h.workspace.run_command(BLOCK, AnnotationKind::Yail, Command::Reevaluate).is_err());

    let log = h.workspace.command_log();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].block, BLOCK);
    assert_eq!(log[0].kind, AnnotationKind::Yail);
    assert_eq!(log[0].command, Command::Regenerate);
    assert!(log[0].outcome.is_success());
    assert_eq!(log[1].command, Command::Reevaluate);
    assert_eq!(
        log[1].outcome,
        CommandOutcome::Failed {
            reason: AnnotationError::UnsupportedCommand {
                kind: AnnotationKind::Yail,
                command: Command::Reevaluate
            }
            .to_string()
        }
    );
    assert_ne!(log[0].correlation_id, log[1].correlation_id);
    Ok(())
}
