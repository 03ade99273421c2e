//! Editor - open views, the mode registry, and command dispatch
//!
//! Key events arrive through [`Editor::handle_key`], are resolved against the
//! current view's mode, and run through [`Editor::execute`]. Tag line scripts
//! go through [`Editor::interpret`], which either runs a table command or
//! hands the tokens to the injected [`ProcessRunner`].

use std::path::Path;
use std::rc::Rc;

use super::cursor::Viewport;
use super::log::EditorLog;
use super::status_bar::{sync_status_bar, StatusBar};
use super::text_store::TextStore;
use super::view::View;
use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::interpreter::{parse_expression, CommandTable};
use crate::keymap::{Command, Keystroke, Mode, ModeRegistry};
use crate::process::ProcessRunner;

/// Terminal height assumed until the first resize
const DEFAULT_HEIGHT: usize = 24;

pub struct Editor {
    config: EditorConfig,
    modes: Rc<ModeRegistry>,
    commands: CommandTable,
    runner: Box<dyn ProcessRunner>,
    /// Insertion order is tab order
    views: Vec<View>,
    current: usize,
    height: usize,
    log: EditorLog,
    status_bar: StatusBar,
    should_quit: bool,
    /// Set while exit/enter hooks run; a hook cannot switch modes again
    switching: bool,
}

impl Editor {
    pub fn new(
        config: EditorConfig,
        modes: ModeRegistry,
        runner: impl ProcessRunner + 'static,
    ) -> Self {
        Self {
            config,
            modes: Rc::new(modes),
            commands: CommandTable::default(),
            runner: Box::new(runner),
            views: Vec::new(),
            current: 0,
            height: DEFAULT_HEIGHT,
            log: EditorLog::new(),
            status_bar: StatusBar::new(),
            should_quit: false,
            switching: false,
        }
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Add a view for `store` and make it current.
    ///
    /// Fails with [`EditorError::ModeNotFound`] if the configured initial
    /// mode is not registered.
    pub fn open_store(&mut self, store: TextStore) -> Result<usize> {
        let mode = self.modes.get(&self.config.initial_mode)?;
        let viewport = Viewport::new(self.height, self.config.reserved_rows);
        let view = View::new(store, &self.config.tag_text, viewport, mode);

        self.views.push(view);
        self.current = self.views.len() - 1;
        Ok(self.current)
    }

    /// Open `path` in a new view.
    ///
    /// A file that cannot be read (missing, permission denied) fails with
    /// [`EditorError::Io`] and no view is added.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let store = TextStore::load_file(path).inspect_err(|e| {
            self.log.error(e.to_string());
        })?;
        self.log.info(format!(
            "opened {} ({} lines)",
            path.display(),
            store.line_count()
        ));
        self.open_store(store)
    }

    /// Open `path`, or an empty buffer named after it if the file does not
    /// exist yet. The file is created on first save.
    pub fn open_or_create(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        if path.exists() {
            return self.add_file(path);
        }
        self.log.info(format!("new file {}", path.display()));
        self.open_store(TextStore::with_name(path))
    }

    /// Open an unnamed scratch buffer
    pub fn new_empty(&mut self) -> Result<usize> {
        self.open_store(TextStore::new())
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_view(&self) -> Option<&View> {
        self.views.get(self.current)
    }

    pub fn current_view_mut(&mut self) -> Option<&mut View> {
        self.views.get_mut(self.current)
    }

    /// Make view `index` current; out-of-range indices are ignored
    pub fn select_view(&mut self, index: usize) -> bool {
        if index < self.views.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Make the next view current, wrapping around
    pub fn next_view(&mut self) {
        if !self.views.is_empty() {
            self.current = (self.current + 1) % self.views.len();
        }
    }

    /// Make the previous view current, wrapping around
    pub fn prev_view(&mut self) {
        if !self.views.is_empty() {
            self.current = (self.current + self.views.len() - 1) % self.views.len();
        }
    }

    /// Terminal height changed; every view keeps its cursor on screen
    pub fn resize(&mut self, height: usize) {
        self.height = height;
        for view in &mut self.views {
            view.resize(height);
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn modes(&self) -> &Rc<ModeRegistry> {
        &self.modes
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandTable {
        &mut self.commands
    }

    pub fn log(&self) -> &EditorLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut EditorLog {
        &mut self.log
    }

    pub fn status_bar_mut(&mut self) -> &mut StatusBar {
        &mut self.status_bar
    }

    /// Status line text for a terminal `width` columns wide
    pub fn status_line(&mut self, width: usize) -> String {
        sync_status_bar(self);
        self.status_bar.layout(width)
    }

    /// The signaled exit condition for the input loop
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Run the current mode's binding for `keystroke`.
    ///
    /// Unbound keys are ignored. Errors are logged for the status line and
    /// returned.
    pub fn handle_key(&mut self, keystroke: Keystroke) -> Result<()> {
        let Some(view) = self.current_view() else {
            return Ok(());
        };
        let mode = Rc::clone(view.mode());

        let Some(command) = mode.lookup(&keystroke) else {
            self.log
                .debug(format!("{} is unbound in {} mode", keystroke, mode.name()));
            return Ok(());
        };

        tracing::debug!(key = %keystroke, mode = mode.name(), command = %command, "dispatch");
        self.execute(&command, 1).inspect_err(|e| {
            self.log.error(e.to_string());
        })
    }

    /// Run `command` against the current view, `count` times if it repeats
    pub fn execute(&mut self, command: &Command, count: usize) -> Result<()> {
        let count = if command.is_repeatable() {
            count.max(1)
        } else {
            1
        };
        for _ in 0..count {
            self.execute_once(command)?;
        }
        Ok(())
    }

    fn execute_once(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Unbound => return Ok(()),
            Command::Quit => {
                self.should_quit = true;
                return Ok(());
            }
            Command::NextView => {
                self.next_view();
                return Ok(());
            }
            Command::PrevView => {
                self.prev_view();
                return Ok(());
            }
            Command::SwitchMode(name) => return self.switch_mode(name),
            Command::Append => {
                self.execute_once(&Command::MoveRight)?;
                return self.switch_mode(Command::INSERT_MODE);
            }
            Command::Save => return self.save(),
            Command::ExecuteUnderCursor => return self.execute_under_cursor(),
            _ => {}
        }

        let Some(view) = self.views.get_mut(self.current) else {
            return Ok(());
        };
        if *command == Command::ToggleTarget {
            view.toggle_target();
            return Ok(());
        }

        let pane = view.active_pane_mut();
        match command {
            Command::MoveLeft => pane.move_cursor(-1, 0),
            Command::MoveRight => pane.move_cursor(1, 0),
            Command::MoveUp => pane.move_cursor(0, -1),
            Command::MoveDown => pane.move_cursor(0, 1),
            Command::LineStart => pane.line_start(),
            Command::LineEnd => pane.line_end(),
            Command::PageUp => pane.page_up(),
            Command::PageDown => pane.page_down(),
            Command::DocumentStart => pane.document_start(),
            Command::DocumentEnd => pane.document_end(),
            Command::InsertByte(byte) => pane.insert_byte(*byte)?,
            Command::InsertNewline => pane.insert_newline()?,
            Command::DeleteBackward => pane.delete_backward()?,
            Command::DeleteForward => pane.delete_forward()?,
            _ => {}
        }
        Ok(())
    }

    /// Make `name` the current view's mode.
    ///
    /// The outgoing mode's `on_exit` runs first, then the incoming mode's
    /// `on_enter`, even when both are the same mode. A mode switch requested
    /// from inside a hook is ignored.
    pub fn switch_mode(&mut self, name: &str) -> Result<()> {
        if self.switching {
            self.log
                .warn(format!("ignoring switch to {} from a mode hook", name));
            return Ok(());
        }

        let incoming = self.modes.get(name)?;
        let Some(view) = self.current_view() else {
            return Ok(());
        };
        let outgoing = Rc::clone(view.mode());

        self.switching = true;
        let result = self.run_mode_switch(outgoing, incoming);
        self.switching = false;
        result
    }

    /// Exit hook, install, enter hook. A failing enter hook puts the
    /// outgoing mode back.
    fn run_mode_switch(&mut self, outgoing: Rc<Mode>, incoming: Rc<Mode>) -> Result<()> {
        if let Some(hook) = outgoing.on_exit() {
            self.execute(hook, 1)?;
        }

        tracing::debug!(from = outgoing.name(), to = incoming.name(), "mode switch");
        if let Some(view) = self.current_view_mut() {
            view.set_mode(Rc::clone(&incoming));
        }

        if let Some(hook) = incoming.on_enter() {
            if let Err(e) = self.execute(hook, 1) {
                tracing::warn!(mode = incoming.name(), error = %e, "enter hook failed");
                if let Some(view) = self.current_view_mut() {
                    view.set_mode(outgoing);
                }
                return Err(e);
            }
        }
        Ok(())
    }

    /// Save the current view's buffer to its own file
    fn save(&mut self) -> Result<()> {
        let Some(view) = self.current_view_mut() else {
            return Ok(());
        };
        let store = &mut view.buffer.store;
        store.save(None)?;

        let message = match store.name() {
            Some(path) => format!("saved {} ({} bytes)", path.display(), store.len()),
            None => "saved".to_string(),
        };
        self.log.info(message);
        Ok(())
    }

    // ========================================================================
    // Scripting
    // ========================================================================

    /// Evaluate a tag line expression such as `(save)` or `(ls -l)`.
    ///
    /// Table commands run against the current view and produce no output.
    /// Anything else runs as an external program and its stdout is returned.
    pub fn interpret(&mut self, expression: &str) -> Result<Vec<u8>> {
        let Some(tokens) = parse_expression(expression)? else {
            return Ok(Vec::new());
        };
        let Some((name, args)) = tokens.split_first() else {
            return Ok(Vec::new());
        };

        match self.commands.resolve(name) {
            Ok(command) => {
                let command = command.clone();
                self.execute(&command, 1)?;
                Ok(Vec::new())
            }
            Err(EditorError::UnknownCommand(_)) => {
                let output = self.runner.run(name, args)?;
                self.log
                    .info(format!("ran {} ({} bytes)", tokens.join(" "), output.len()));
                Ok(output)
            }
            Err(e) => Err(e),
        }
    }

    /// Interpret the token under the cursor and insert any output at the
    /// cursor, which stays where it is
    fn execute_under_cursor(&mut self) -> Result<()> {
        let Some(view) = self.current_view() else {
            return Ok(());
        };
        let token = view.active_pane().token_under_cursor()?;

        let output = self.interpret(&format!("({})", token))?;
        if output.is_empty() {
            return Ok(());
        }

        match self.current_view_mut() {
            Some(view) => view.active_pane_mut().insert(&output),
            None => Ok(()),
        }
    }
}
