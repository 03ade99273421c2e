//! Terminal shell - crossterm input and line painting
//!
//! Screen layout, top to bottom: the tag line, the buffer rows of the
//! current view, and the status line. The editor model knows nothing about
//! the terminal; this module converts key events into [`Keystroke`]s and
//! prints what the model exposes.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode as CtKeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::keymap::{KeyCode, Keystroke, Modifiers};
use crate::model::{expand_tabs, visual_column, EditTarget, Editor};

/// Rows above the buffer taken by the tag line
pub const TAG_ROWS: usize = 1;

/// Convert a crossterm key event into a keystroke.
///
/// Returns `None` for key releases and keys the editor has no name for.
pub fn keystroke_from_crossterm(event: &KeyEvent) -> Option<Keystroke> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let key = match event.code {
        CtKeyCode::Char(' ') => KeyCode::Space,
        CtKeyCode::Char(c) => KeyCode::Char(c),
        CtKeyCode::Enter => KeyCode::Enter,
        CtKeyCode::Esc => KeyCode::Escape,
        CtKeyCode::Tab => KeyCode::Tab,
        CtKeyCode::Backspace => KeyCode::Backspace,
        CtKeyCode::Delete => KeyCode::Delete,
        CtKeyCode::Up => KeyCode::Up,
        CtKeyCode::Down => KeyCode::Down,
        CtKeyCode::Left => KeyCode::Left,
        CtKeyCode::Right => KeyCode::Right,
        CtKeyCode::Home => KeyCode::Home,
        CtKeyCode::End => KeyCode::End,
        CtKeyCode::PageUp => KeyCode::PageUp,
        CtKeyCode::PageDown => KeyCode::PageDown,
        CtKeyCode::Insert => KeyCode::Insert,
        CtKeyCode::F(n @ 1..=12) => KeyCode::F(n),
        _ => return None,
    };

    let mods = Modifiers::new(
        event.modifiers.contains(KeyModifiers::SHIFT),
        event.modifiers.contains(KeyModifiers::CONTROL),
        event.modifiers.contains(KeyModifiers::ALT),
    );

    // Shift is already in the character's case
    let mods = match key {
        KeyCode::Char(_) | KeyCode::Space => mods.without_shift(),
        _ => mods,
    };

    Some(Keystroke::new(key, mods))
}

/// Raw mode plus alternate screen for as long as the guard lives
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        queue!(stdout, EnterAlternateScreen, Clear(ClearType::All))?;
        stdout.flush()?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = queue!(stdout, Show, LeaveAlternateScreen);
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}

/// Buffer region height for a terminal `rows` tall
pub fn buffer_height(rows: u16) -> usize {
    usize::from(rows).saturating_sub(TAG_ROWS).max(1)
}

/// Draw the current view and status line into `out`
pub fn paint<W: Write>(out: &mut W, editor: &mut Editor, width: u16, rows: u16) -> io::Result<()> {
    let width_cols = usize::from(width);
    let tab_width = editor.config().tab_width;
    let status = editor.status_line(width_cols);

    queue!(out, Hide, Clear(ClearType::All))?;

    let Some(view) = editor.current_view() else {
        queue!(out, MoveTo(0, 0), Print(status))?;
        return out.flush();
    };

    // Tag line
    let tag = view.tag.store.contents();
    queue!(
        out,
        MoveTo(0, 0),
        SetAttribute(Attribute::Reverse),
        Print(pad(&expand_tabs(&tag, tab_width), width_cols)),
        SetAttribute(Attribute::Reset)
    )?;

    // Buffer rows
    for (row, (_, line)) in view.visible_lines().iter().enumerate() {
        let y = to_u16(row + TAG_ROWS);
        let text: String = expand_tabs(line, tab_width)
            .chars()
            .take(width_cols)
            .collect();
        queue!(out, MoveTo(0, y), Print(text))?;
    }

    // Status line
    queue!(
        out,
        MoveTo(0, rows.saturating_sub(1)),
        SetAttribute(Attribute::Reverse),
        Print(status),
        SetAttribute(Attribute::Reset)
    )?;

    // Cursor
    let (x, y) = match view.target() {
        EditTarget::Tag => (visual_column(&tag, view.tag.cursor.column, tab_width), 0),
        EditTarget::Buffer => {
            let cursor = view.buffer.cursor;
            let line = view.buffer.store.line(cursor.line).unwrap_or_default();
            let row = cursor
                .line
                .saturating_sub(view.buffer.viewport.first_visible_line);
            (
                visual_column(&line, cursor.column, tab_width),
                row + TAG_ROWS,
            )
        }
    };
    queue!(out, MoveTo(to_u16(x), to_u16(y)), Show)?;

    out.flush()
}

fn pad(text: &str, width: usize) -> String {
    let mut line: String = text.chars().take(width).collect();
    let len = line.chars().count();
    line.push_str(&" ".repeat(width - len));
    line
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Run the input loop until the editor signals quit
pub fn run(editor: &mut Editor) -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();

    let (mut width, mut rows) = terminal::size()?;
    editor.resize(buffer_height(rows));

    while !editor.should_quit() {
        paint(&mut stdout, editor, width, rows)?;

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(keystroke) = keystroke_from_crossterm(&key) {
                    // Already logged for the status line
                    let _ = editor.handle_key(keystroke);
                }
            }
            Event::Resize(w, h) => {
                width = w;
                rows = h;
                editor.resize(buffer_height(rows));
            }
            _ => {}
        }
    }

    Ok(())
}
