//! Viewport tests - scroll-follow, paging, resize

mod common;

use common::{cursor, press, press_char, test_editor, type_keys};
use jk::keymap::KeyCode;

fn numbered_lines(count: usize) -> String {
    (0..count)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn first_visible(editor: &jk::Editor) -> usize {
    editor
        .current_view()
        .unwrap()
        .buffer
        .viewport
        .first_visible_line
}

#[test]
fn test_short_viewport_follows_clamped_cursor() {
    let mut editor = test_editor("one\ntwo\nthree", 0, 0);
    // Two rows, one of them the status line
    editor.resize(2);

    type_keys(&mut editor, "jjjjj");

    assert_eq!(cursor(&editor), (2, 0));
    let viewport = editor.current_view().unwrap().buffer.viewport;
    assert!(viewport.is_visible(2));
    assert_eq!(viewport.first_visible_line, 2);
}

#[test]
fn test_scroll_down_minimal() {
    let mut editor = test_editor(&numbered_lines(50), 0, 0);
    editor.resize(11);

    for _ in 0..9 {
        press_char(&mut editor, 'j');
    }
    assert_eq!(first_visible(&editor), 0);

    press_char(&mut editor, 'j');
    assert_eq!(cursor(&editor).0, 10);
    assert_eq!(first_visible(&editor), 1);
}

#[test]
fn test_scroll_up_minimal() {
    let mut editor = test_editor(&numbered_lines(50), 0, 0);
    editor.resize(11);
    press_char(&mut editor, 'G');
    assert_eq!(first_visible(&editor), 40);

    for _ in 0..10 {
        press_char(&mut editor, 'k');
    }
    assert_eq!(cursor(&editor).0, 39);
    assert_eq!(first_visible(&editor), 39);
}

#[test]
fn test_page_down_and_up() {
    let mut editor = test_editor(&numbered_lines(50), 0, 0);
    editor.resize(11);

    press(&mut editor, KeyCode::PageDown);
    assert_eq!(cursor(&editor).0, 10);
    assert!(editor.current_view().unwrap().buffer.viewport.is_visible(10));

    press(&mut editor, KeyCode::PageUp);
    assert_eq!(cursor(&editor).0, 0);
    assert_eq!(first_visible(&editor), 0);
}

#[test]
fn test_page_down_clamps_at_end() {
    let mut editor = test_editor(&numbered_lines(15), 0, 0);
    editor.resize(11);
    press(&mut editor, KeyCode::PageDown);
    press(&mut editor, KeyCode::PageDown);
    assert_eq!(cursor(&editor).0, 14);
}

#[test]
fn test_resize_keeps_cursor_visible() {
    let mut editor = test_editor(&numbered_lines(50), 30, 0);
    editor.resize(40);
    editor.resize(5);
    let viewport = editor.current_view().unwrap().buffer.viewport;
    assert!(viewport.is_visible(30));
}

#[test]
fn test_visible_lines_strip_newlines() {
    let mut editor = test_editor("a\nb\nc\nd", 0, 0);
    editor.resize(3);
    let lines = editor.current_view().unwrap().visible_lines();
    let rendered: Vec<(usize, &[u8])> = lines.iter().map(|(n, l)| (*n, &**l)).collect();
    assert_eq!(rendered, vec![(0, &b"a"[..]), (1, &b"b"[..])]);
}
