//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use jk::config::EditorConfig;
use jk::error::{EditorError, Result};
use jk::keymap::{default_modes, KeyCode, Keystroke, ModeRegistry, Modifiers};
use jk::model::{Editor, TextStore};
use jk::process::ProcessRunner;

/// Calls seen by a [`FakeRunner`]: (program, args)
pub type Calls = Rc<RefCell<Vec<(String, Vec<String>)>>>;

/// A process runner that records calls and returns canned output
#[derive(Clone, Default)]
pub struct FakeRunner {
    pub calls: Calls,
    pub output: Vec<u8>,
    pub fail: bool,
}

impl FakeRunner {
    pub fn returning(output: &str) -> Self {
        Self {
            output: output.as_bytes().to_vec(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>> {
        self.calls
            .borrow_mut()
            .push((program.to_string(), args.to_vec()));
        if self.fail {
            return Err(EditorError::ExternalCommandFailure {
                program: program.to_string(),
                reason: "exit status: 1".to_string(),
            });
        }
        Ok(self.output.clone())
    }
}

pub fn registry() -> ModeRegistry {
    default_modes().into_iter().collect()
}

/// Create a test editor with one view holding `text`, cursor at (line, column)
pub fn test_editor(text: &str, line: usize, column: usize) -> Editor {
    test_editor_with_runner(text, line, column, FakeRunner::default())
}

pub fn test_editor_with_runner(
    text: &str,
    line: usize,
    column: usize,
    runner: FakeRunner,
) -> Editor {
    let mut editor = Editor::new(EditorConfig::default(), registry(), runner);
    editor.open_store(TextStore::from_bytes(text)).unwrap();
    editor.current_view_mut().unwrap().buffer.set_cursor(line, column);
    editor
}

/// Helper to get buffer content as string
pub fn buffer_to_string(editor: &Editor) -> String {
    String::from_utf8(editor.current_view().unwrap().buffer.store.contents()).unwrap()
}

pub fn tag_to_string(editor: &Editor) -> String {
    String::from_utf8(editor.current_view().unwrap().tag.store.contents()).unwrap()
}

/// (line, column) of the active pane's cursor
pub fn cursor(editor: &Editor) -> (usize, usize) {
    let c = editor.current_view().unwrap().active_pane().cursor;
    (c.line, c.column)
}

pub fn mode_name(editor: &Editor) -> String {
    editor.current_view().unwrap().mode_name().to_string()
}

pub fn press(editor: &mut Editor, key: KeyCode) {
    editor.handle_key(Keystroke::key(key)).unwrap();
}

pub fn press_char(editor: &mut Editor, c: char) {
    editor.handle_key(Keystroke::char(c)).unwrap();
}

pub fn press_ctrl(editor: &mut Editor, c: char) {
    editor
        .handle_key(Keystroke::new(KeyCode::Char(c), Modifiers::CTRL))
        .unwrap();
}

/// Press each character of `keys` in turn
pub fn type_keys(editor: &mut Editor, keys: &str) {
    for c in keys.chars() {
        press_char(editor, c);
    }
}
