//! View - one open buffer with its tag line and active mode
//!
//! A view pairs the main buffer pane with a one-line tag pane. Exactly one
//! of them is the edit target at any time; motion and edit commands act on
//! whichever it is. The active mode is held as an `Rc` into the editor's
//! shared registry.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use super::cursor::Viewport;
use super::pane::Pane;
use super::text_store::TextStore;
use crate::keymap::Mode;

/// Which pane of a view receives edits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditTarget {
    #[default]
    Buffer,
    Tag,
}

impl EditTarget {
    pub fn toggled(self) -> Self {
        match self {
            EditTarget::Buffer => EditTarget::Tag,
            EditTarget::Tag => EditTarget::Buffer,
        }
    }
}

impl fmt::Display for EditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditTarget::Buffer => write!(f, "buffer"),
            EditTarget::Tag => write!(f, "tag"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct View {
    pub buffer: Pane,
    pub tag: Pane,
    target: EditTarget,
    mode: Rc<Mode>,
}

impl View {
    pub fn new(store: TextStore, tag_text: &str, viewport: Viewport, mode: Rc<Mode>) -> Self {
        Self {
            buffer: Pane::new(store, viewport),
            tag: Pane::single_line(tag_text),
            target: EditTarget::Buffer,
            mode,
        }
    }

    pub fn target(&self) -> EditTarget {
        self.target
    }

    pub fn toggle_target(&mut self) {
        self.target = self.target.toggled();
        tracing::debug!(target = %self.target, "edit target toggled");
    }

    /// The pane that currently receives edits
    pub fn active_pane(&self) -> &Pane {
        match self.target {
            EditTarget::Buffer => &self.buffer,
            EditTarget::Tag => &self.tag,
        }
    }

    pub fn active_pane_mut(&mut self) -> &mut Pane {
        match self.target {
            EditTarget::Buffer => &mut self.buffer,
            EditTarget::Tag => &mut self.tag,
        }
    }

    pub fn mode(&self) -> &Rc<Mode> {
        &self.mode
    }

    pub fn mode_name(&self) -> &str {
        self.mode.name()
    }

    pub(crate) fn set_mode(&mut self, mode: Rc<Mode>) {
        self.mode = mode;
    }

    /// Resize the buffer region (the status row is part of `height`)
    pub fn resize(&mut self, height: usize) {
        self.buffer.viewport.height = height;
        let line = self.buffer.cursor.line;
        self.buffer.viewport.follow(line);
    }

    /// Buffer lines on screen, as (line number, bytes without `\n`)
    pub fn visible_lines(&self) -> Vec<(usize, Cow<'_, [u8]>)> {
        let store = &self.buffer.store;
        let viewport = &self.buffer.viewport;
        let end = store
            .line_count()
            .min(viewport.last_visible_line().saturating_add(1));

        (viewport.first_visible_line..end)
            .filter_map(|n| store.line(n).ok().map(|line| (n, strip_newline(line))))
            .collect()
    }
}

fn strip_newline(line: Cow<'_, [u8]>) -> Cow<'_, [u8]> {
    match line {
        Cow::Borrowed(bytes) => Cow::Borrowed(bytes.strip_suffix(b"\n").unwrap_or(bytes)),
        Cow::Owned(mut bytes) => {
            if bytes.last() == Some(&b'\n') {
                bytes.pop();
            }
            Cow::Owned(bytes)
        }
    }
}

// ============================================================================
// Rendering helpers
// ============================================================================

/// Expand tab characters to spaces for display.
///
/// Each tab advances to the next multiple of `tab_width`. Bytes that are not
/// valid UTF-8 show as U+FFFD and other control bytes as `?`.
pub fn expand_tabs(line: &[u8], tab_width: usize) -> String {
    let text = String::from_utf8_lossy(line);
    let tab_width = tab_width.max(1);
    let mut result = String::with_capacity(text.len());
    let mut visual_col = 0;

    for ch in text.chars() {
        match ch {
            '\t' => {
                let spaces = tab_width - (visual_col % tab_width);
                result.push_str(&" ".repeat(spaces));
                visual_col += spaces;
            }
            '\n' | '\r' => {}
            c if c.is_control() => {
                result.push('?');
                visual_col += 1;
            }
            c => {
                result.push(c);
                visual_col += 1;
            }
        }
    }

    result
}

/// Screen column of byte `column` in `line` after tab expansion
pub fn visual_column(line: &[u8], column: usize, tab_width: usize) -> usize {
    let prefix = &line[..column.min(line.len())];
    expand_tabs(prefix, tab_width).chars().count()
}
