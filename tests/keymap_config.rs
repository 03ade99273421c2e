//! User keymap and config files layered over the defaults

mod common;

use std::fs;

use common::{buffer_to_string, cursor, mode_name, press_char};
use jk::config::EditorConfig;
use jk::keymap::{load_modes, Command, Keystroke};
use jk::model::Editor;

fn editor_from_keymap(yaml: &str) -> Editor {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    fs::write(&path, yaml).unwrap();

    let modes = load_modes(Some(&path));
    let mut editor = Editor::new(
        EditorConfig::default(),
        modes,
        common::FakeRunner::default(),
    );
    editor.new_empty().unwrap();
    editor
}

#[test]
fn test_user_binding_overrides_default() {
    let editor = editor_from_keymap(
        r#"
modes:
  normal:
    bindings:
      - key: j
        command: MoveUp
"#,
    );
    let normal = editor.modes().get("normal").unwrap();
    assert_eq!(normal.lookup(&Keystroke::char('j')), Some(Command::MoveUp));
    // Untouched defaults survive
    assert_eq!(normal.lookup(&Keystroke::char('k')), Some(Command::MoveUp));
}

#[test]
fn test_noop_removes_binding() {
    let mut editor = editor_from_keymap(
        r#"
modes:
  normal:
    bindings:
      - key: q
        command: Noop
"#,
    );
    press_char(&mut editor, 'q');
    assert!(!editor.should_quit());
}

#[test]
fn test_user_defined_mode_with_hooks() {
    let mut editor = editor_from_keymap(
        r#"
modes:
  normal:
    bindings:
      - key: o
        command: SwitchMode open
  open:
    self_insert: true
    on_enter: InsertNewline
    on_exit: MoveLeft
    bindings:
      - key: esc
        command: SwitchMode normal
"#,
    );

    press_char(&mut editor, 'o');
    assert_eq!(mode_name(&editor), "open");
    assert_eq!(cursor(&editor), (1, 0));

    press_char(&mut editor, 'x');
    editor
        .handle_key(Keystroke::key(jk::keymap::KeyCode::Escape))
        .unwrap();

    assert_eq!(buffer_to_string(&editor), "\nx");
    assert_eq!(mode_name(&editor), "normal");
    assert_eq!(cursor(&editor), (1, 0));
}

#[test]
fn test_switch_to_undefined_mode_rejects_file() {
    let editor = editor_from_keymap(
        r#"
modes:
  normal:
    bindings:
      - key: j
        command: SwitchMode nowhere
"#,
    );
    let normal = editor.modes().get("normal").unwrap();
    assert_eq!(normal.lookup(&Keystroke::char('j')), Some(Command::MoveDown));
}

#[test]
fn test_unparseable_file_falls_back_to_defaults() {
    let editor = editor_from_keymap("modes: [not, a, map");
    assert_eq!(editor.modes().names(), vec!["insert", "normal"]);
}

#[test]
fn test_config_file_sets_tag_and_initial_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "tag_text: \"save quit make\"\ninitial_mode: insert\n").unwrap();

    let config = EditorConfig::load_from(&path);
    assert_eq!(config.tab_width, 4);

    let mut editor = Editor::new(config, common::registry(), common::FakeRunner::default());
    editor.new_empty().unwrap();

    assert_eq!(common::tag_to_string(&editor), "save quit make");
    assert_eq!(mode_name(&editor), "insert");
    press_char(&mut editor, 'z');
    assert_eq!(buffer_to_string(&editor), "z");
}
