use super::prompt::PromptKind;
use crate::canvas::color::{GREEN, RED};
use crate::canvas::{CellBuffer, FULL_BLOCK, PixelView, Resolution};
use crate::config::{ExportConfig, KeybindingsConfig};
use crate::input::events::{Buttons, Key, MouseButton};
use crate::input::modifiers::Modifiers;
use crate::input::painter::Painter;
use crate::input::tool::ToolKind;
use crate::util::Pos;

fn create_test_painter() -> Painter {
    let keybindings = KeybindingsConfig::default();
    let action_map = keybindings.build_action_map().unwrap();

    Painter::with_defaults(
        CellBuffer::new(10, 10),
        RED,
        Resolution::Full,
        true, // show_status_bar
        ExportConfig::default(),
        action_map,
    )
}

fn key(painter: &mut Painter, key: Key) {
    painter.on_key_press(key, Modifiers::NONE);
}

fn is_set(painter: &mut Painter, res: Resolution, pos: Pos) -> bool {
    PixelView::new(&mut painter.buffer, res, RED).is_set(pos)
}

#[test]
fn initial_state_is_paint_full_clean() {
    let painter = create_test_painter();
    assert_eq!(painter.active_kind(), ToolKind::Paint);
    assert_eq!(painter.resolution, Resolution::Full);
    assert_eq!(painter.pos, Pos::new(0, 0));
    assert!(!painter.dirty);
    assert!(painter.prompt.is_none());
}

#[test]
fn arrow_keys_move_and_clamp() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Left);
    key(&mut painter, Key::Up);
    assert_eq!(painter.pos, Pos::new(0, 0));

    for _ in 0..5 {
        key(&mut painter, Key::Right);
    }
    assert_eq!(painter.pos, Pos::new(5, 0));

    for _ in 0..20 {
        key(&mut painter, Key::Right);
    }
    assert_eq!(painter.pos, Pos::new(9, 0));
}

#[test]
fn resolution_switch_preserves_cell_and_resets_offset() {
    let mut painter = create_test_painter();
    for _ in 0..5 {
        key(&mut painter, Key::Right);
    }
    assert_eq!(painter.pos, Pos::new(5, 0));

    key(&mut painter, Key::Char('3')); // quarter
    assert_eq!(painter.resolution, Resolution::Quarter);
    assert_eq!(painter.cell_position(), Pos::new(5, 0));
    assert_eq!(painter.sub_cell_offset(), Pos::new(0, 0));

    // Committing addresses only the cursor's sub-pixel, not the whole cell.
    key(&mut painter, Key::Space);
    assert!(is_set(&mut painter, Resolution::Quarter, Pos::new(10, 0)));
    assert!(!is_set(&mut painter, Resolution::Quarter, Pos::new(11, 0)));
    assert!(!is_set(&mut painter, Resolution::Quarter, Pos::new(10, 1)));
    assert_eq!(painter.buffer.get(Pos::new(5, 0)).ch, '▘');
}

#[test]
fn toggle_pixel_key_pairs_back_to_original() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Space);
    assert!(is_set(&mut painter, Resolution::Full, Pos::new(0, 0)));
    key(&mut painter, Key::Space);
    assert!(!is_set(&mut painter, Resolution::Full, Pos::new(0, 0)));
}

#[test]
fn committing_marks_the_session_dirty() {
    let mut painter = create_test_painter();
    assert!(!painter.dirty);
    key(&mut painter, Key::Space);
    assert!(painter.dirty);
}

#[test]
fn drag_stroke_undoes_in_one_step() {
    let mut painter = create_test_painter();
    painter.on_mouse_press(MouseButton::Left, Pos::new(2, 2));
    painter.on_mouse_motion(Pos::new(2, 3), Buttons::LEFT);
    painter.on_mouse_motion(Pos::new(2, 4), Buttons::LEFT);
    painter.on_mouse_release(MouseButton::Left, Pos::new(2, 4));

    for y in 2..5 {
        assert!(is_set(&mut painter, Resolution::Full, Pos::new(2, y)));
    }
    assert_eq!(painter.buffer.undo_depth(), 1);

    key(&mut painter, Key::Char('u'));
    for y in 2..5 {
        assert!(!is_set(&mut painter, Resolution::Full, Pos::new(2, y)), "y = {y}");
    }
}

#[test]
fn duplicate_motion_events_commit_once() {
    let mut painter = create_test_painter();
    painter.on_mouse_press(MouseButton::Left, Pos::new(3, 3));
    let revision = painter.buffer.revision();

    painter.on_mouse_motion(Pos::new(3, 3), Buttons::LEFT);
    painter.on_mouse_motion(Pos::new(3, 3), Buttons::LEFT);
    assert_eq!(painter.buffer.revision(), revision);

    painter.on_mouse_release(MouseButton::Left, Pos::new(3, 3));
}

#[test]
fn motion_without_buttons_moves_without_committing() {
    let mut painter = create_test_painter();
    painter.on_mouse_motion(Pos::new(4, 4), Buttons::empty());
    assert_eq!(painter.pos, Pos::new(4, 4));
    assert!(!is_set(&mut painter, Resolution::Full, Pos::new(4, 4)));
    assert!(!painter.dirty);
}

#[test]
fn continuous_painting_paints_an_undoable_trail() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Char('x'));
    key(&mut painter, Key::Right);
    key(&mut painter, Key::Right);
    key(&mut painter, Key::Down);
    key(&mut painter, Key::Char('x'));

    assert!(is_set(&mut painter, Resolution::Full, Pos::new(0, 0)));
    assert!(is_set(&mut painter, Resolution::Full, Pos::new(1, 0)));
    assert!(is_set(&mut painter, Resolution::Full, Pos::new(2, 0)));
    // The position we stopped at has not been committed.
    assert!(!is_set(&mut painter, Resolution::Full, Pos::new(2, 1)));

    // The whole trail is one stroke.
    assert_eq!(painter.buffer.undo_depth(), 1);
    key(&mut painter, Key::Char('u'));
    assert!(!is_set(&mut painter, Resolution::Full, Pos::new(0, 0)));
    assert!(!is_set(&mut painter, Resolution::Full, Pos::new(1, 0)));
}

#[test]
fn connect_line_interpolates_from_the_anchor() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Space); // anchor at (0, 0)
    for _ in 0..6 {
        key(&mut painter, Key::Right);
    }
    key(&mut painter, Key::Char('v'));

    for x in 0..=6 {
        assert!(is_set(&mut painter, Resolution::Full, Pos::new(x, 0)), "x = {x}");
    }
}

#[test]
fn erase_tool_clears_on_click() {
    let mut painter = create_test_painter();
    painter.on_mouse_press(MouseButton::Left, Pos::new(5, 5));
    painter.on_mouse_release(MouseButton::Left, Pos::new(5, 5));
    assert!(is_set(&mut painter, Resolution::Full, Pos::new(5, 5)));

    key(&mut painter, Key::Char('e'));
    assert_eq!(painter.active_kind(), ToolKind::Erase);
    painter.on_mouse_press(MouseButton::Left, Pos::new(5, 5));
    painter.on_mouse_release(MouseButton::Left, Pos::new(5, 5));
    assert!(!is_set(&mut painter, Resolution::Full, Pos::new(5, 5)));
}

#[test]
fn tool_switch_is_refused_during_an_open_stroke() {
    let mut painter = create_test_painter();
    painter.on_mouse_press(MouseButton::Left, Pos::new(1, 1));
    painter.on_key_press(Key::Char('e'), Modifiers::NONE);
    assert_eq!(painter.active_kind(), ToolKind::Paint);

    painter.on_mouse_release(MouseButton::Left, Pos::new(1, 1));
    painter.on_key_press(Key::Char('e'), Modifiers::NONE);
    assert_eq!(painter.active_kind(), ToolKind::Erase);
}

#[test]
fn save_key_opens_prompt_and_escape_cancels_cleanly() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Space);
    let revision = painter.buffer.revision();

    key(&mut painter, Key::Char('s'));
    let prompt = painter.prompt.as_ref().expect("prompt should be open");
    assert_eq!(prompt.kind, PromptKind::SaveFilename);
    assert!(!prompt.buffer.is_empty(), "default filename offered");

    // While the prompt is open, keys feed it instead of the tool.
    key(&mut painter, Key::Char('x'));
    assert_eq!(painter.buffer.revision(), revision);

    key(&mut painter, Key::Escape);
    assert!(painter.prompt.is_none());
    assert_eq!(painter.buffer.revision(), revision);
    assert!(painter.dirty, "cancel keeps prior state, including dirty");
}

#[test]
fn color_prompt_sets_foreground() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Char('c'));
    for c in "green".chars() {
        key(&mut painter, Key::Char(c));
    }
    key(&mut painter, Key::Return);
    assert_eq!(painter.fg, GREEN);
}

#[test]
fn invalid_color_literal_is_reported_and_ignored() {
    let mut painter = create_test_painter();
    let original = painter.fg;
    key(&mut painter, Key::Char('c'));
    for c in "blurple".chars() {
        key(&mut painter, Key::Char(c));
    }
    key(&mut painter, Key::Return);

    assert_eq!(painter.fg, original);
    assert!(
        painter
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("invalid color"))
    );
}

#[test]
fn single_letter_color_shortcut_works_in_prompt() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Char('c'));
    key(&mut painter, Key::Char('g'));
    key(&mut painter, Key::Return);
    assert_eq!(painter.fg, GREEN);
}

#[test]
fn quit_is_immediate_when_clean() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Char('q'));
    assert!(painter.should_exit);
}

#[test]
fn quit_requires_confirmation_when_dirty() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Space);
    key(&mut painter, Key::Char('q'));
    assert!(!painter.should_exit);
    assert!(matches!(
        painter.prompt.as_ref().map(|p| p.kind),
        Some(PromptKind::ConfirmQuit)
    ));

    key(&mut painter, Key::Char('n'));
    assert!(!painter.should_exit);
    assert!(painter.prompt.is_none());

    key(&mut painter, Key::Char('q'));
    key(&mut painter, Key::Char('y'));
    assert!(painter.should_exit);
}

#[test]
fn path_type_types_instead_of_triggering_actions() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Char('t'));
    assert_eq!(painter.active_kind(), ToolKind::PathType);

    // 'q' is bound to quit, but with the path tool active it types.
    key(&mut painter, Key::Char('q'));
    assert!(!painter.should_exit);
    assert_eq!(painter.buffer.get(Pos::new(0, 0)).ch, 'q');
}

#[test]
fn path_type_escape_returns_to_paint_and_marks_dirty() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Char('t'));
    key(&mut painter, Key::Char('a'));
    key(&mut painter, Key::Escape);

    assert_eq!(painter.active_kind(), ToolKind::Paint);
    assert!(painter.dirty);
}

#[test]
fn path_type_backspace_restores_the_previous_glyph() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Char('t'));
    key(&mut painter, Key::Char('a'));
    key(&mut painter, Key::Char('b'));
    assert_eq!(painter.buffer.get(Pos::new(1, 0)).ch, 'b');

    key(&mut painter, Key::Backspace);
    assert_eq!(painter.buffer.get(Pos::new(1, 0)).ch, ' ');
}

#[test]
fn flood_fill_fills_the_enclosed_region_as_one_group() {
    let mut painter = create_test_painter();
    // Wall splitting the canvas at x = 4.
    for y in 0..10 {
        painter
            .buffer
            .put(Pos::new(4, y), crate::canvas::Cell::glyph(FULL_BLOCK, RED));
    }
    let depth = painter.buffer.undo_depth();

    // Move to the left of the wall and fill.
    painter.on_mouse_motion(Pos::new(1, 1), Buttons::empty());
    key(&mut painter, Key::Char('f'));

    assert_eq!(painter.buffer.get(Pos::new(0, 0)).ch, FULL_BLOCK);
    assert_eq!(painter.buffer.get(Pos::new(3, 9)).ch, FULL_BLOCK);
    assert!(painter.buffer.get(Pos::new(5, 5)).is_blank());
    assert_eq!(painter.buffer.undo_depth(), depth + 1);

    key(&mut painter, Key::Char('u'));
    assert!(painter.buffer.get(Pos::new(0, 0)).is_blank());
}

#[test]
fn double_click_retracts_the_single_click_and_fills() {
    let mut painter = create_test_painter();
    painter.on_mouse_press(MouseButton::Left, Pos::new(3, 3));
    painter.on_mouse_release(MouseButton::Left, Pos::new(3, 3));
    painter.on_mouse_double_click(Pos::new(3, 3));

    // The whole blank canvas was one region.
    assert_eq!(painter.buffer.get(Pos::new(0, 0)).ch, FULL_BLOCK);
    assert_eq!(painter.buffer.get(Pos::new(9, 9)).ch, FULL_BLOCK);
}

#[test]
fn ui_toggles_flip_flags() {
    let mut painter = create_test_painter();
    assert!(painter.show_status_bar);
    key(&mut painter, Key::F12);
    assert!(!painter.show_status_bar);

    assert!(!painter.show_help);
    key(&mut painter, Key::F10);
    assert!(painter.show_help);
}

#[test]
fn undo_with_empty_history_reports_instead_of_failing() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Char('u'));
    assert_eq!(painter.status_message.as_deref(), Some("nothing to undo"));
}

#[test]
fn redo_reapplies_an_undone_commit() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Space);
    key(&mut painter, Key::Char('u'));
    assert!(!is_set(&mut painter, Resolution::Full, Pos::new(0, 0)));
    key(&mut painter, Key::Char('r'));
    assert!(is_set(&mut painter, Resolution::Full, Pos::new(0, 0)));
}

#[test]
fn clear_canvas_blanks_everything_in_one_group() {
    let mut painter = create_test_painter();
    key(&mut painter, Key::Space);
    key(&mut painter, Key::Right);
    key(&mut painter, Key::Space);

    painter.on_key_press(Key::Char('e'), Modifiers::CTRL);
    assert!(painter.buffer.get(Pos::new(0, 0)).is_blank());
    assert!(painter.buffer.get(Pos::new(1, 0)).is_blank());

    key(&mut painter, Key::Char('u'));
    assert!(!painter.buffer.get(Pos::new(0, 0)).is_blank());
}
