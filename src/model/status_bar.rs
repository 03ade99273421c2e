//! Status bar model - segments and layout
//!
//! The bottom row of the terminal. Segments are filled from the current
//! view by [`sync_status_bar`] and laid out left/right by
//! [`StatusBar::layout`]; the terminal painter only prints the result.

use super::log::LogLevel;
use super::view::{EditTarget, View};
use super::Editor;

/// Identifier for status bar segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentId {
    /// Active mode name (e.g., "NORMAL")
    Mode,
    /// Edit target when it is the tag line
    Target,
    /// File name display
    FileName,
    /// Modified indicator (e.g., "*")
    ModifiedIndicator,
    /// Most recent log message
    StatusMessage,
    /// Cursor position (e.g., "12:4")
    CursorPosition,
}

/// Position of a segment in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPosition {
    Left,
    Right,
}

/// A single segment in the status bar
#[derive(Debug, Clone)]
pub struct StatusSegment {
    pub id: SegmentId,
    pub position: SegmentPosition,
    /// Empty text hides the segment
    pub text: String,
}

impl StatusSegment {
    pub fn new(id: SegmentId) -> Self {
        let position = match id {
            SegmentId::CursorPosition => SegmentPosition::Right,
            _ => SegmentPosition::Left,
        };

        Self {
            id,
            position,
            text: String::new(),
        }
    }
}

/// The complete status bar state
#[derive(Debug, Clone)]
pub struct StatusBar {
    segments: Vec<StatusSegment>,
    /// Spacing between segments (character units)
    pub separator_spacing: usize,
    /// Padding on each side (character units)
    pub padding: usize,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            segments: [
                SegmentId::Mode,
                SegmentId::Target,
                SegmentId::FileName,
                SegmentId::ModifiedIndicator,
                SegmentId::StatusMessage,
                SegmentId::CursorPosition,
            ]
            .into_iter()
            .map(StatusSegment::new)
            .collect(),
            separator_spacing: 1,
            padding: 1,
        }
    }

    pub fn get_segment(&self, id: SegmentId) -> Option<&StatusSegment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Text of a segment, empty if hidden
    pub fn text(&self, id: SegmentId) -> &str {
        self.get_segment(id).map_or("", |s| s.text.as_str())
    }

    pub fn update_segment(&mut self, id: SegmentId, text: impl Into<String>) {
        if let Some(segment) = self.segments.iter_mut().find(|s| s.id == id) {
            segment.text = text.into();
        }
    }

    /// Iterate over visible segments (non-empty text)
    pub fn visible_segments(&self) -> impl Iterator<Item = &StatusSegment> {
        self.segments.iter().filter(|s| !s.text.is_empty())
    }

    /// Render into exactly `available_width` characters.
    ///
    /// Right segments are placed first; left segments get what remains and
    /// are truncated from the end.
    pub fn layout(&self, available_width: usize) -> String {
        let join = |position: SegmentPosition| {
            self.visible_segments()
                .filter(|s| s.position == position)
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(&" ".repeat(self.separator_spacing))
        };
        let left = join(SegmentPosition::Left);
        let right = join(SegmentPosition::Right);

        let right_width = right.chars().count();
        let left_room = available_width
            .saturating_sub(right_width)
            .saturating_sub(self.padding * 2);

        let mut line = " ".repeat(self.padding.min(available_width));
        line.extend(left.chars().take(left_room));

        let used = line.chars().count();
        let gap = available_width.saturating_sub(used + right_width + self.padding);
        line.push_str(&" ".repeat(gap));
        line.push_str(&right);
        line.push_str(&" ".repeat(self.padding));

        line.chars().take(available_width).collect()
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Sync Function
// =============================================================================

/// Synchronize status bar segments with the editor's current view
pub fn sync_status_bar(editor: &mut Editor) {
    let message = editor
        .log()
        .last()
        .map(|entry| match entry.level {
            LogLevel::Error => format!("error: {}", entry.message),
            _ => entry.message.clone(),
        })
        .unwrap_or_default();

    let Some(view) = editor.current_view() else {
        let status = editor.status_bar_mut();
        status.update_segment(SegmentId::StatusMessage, message);
        return;
    };
    let segments = view_segments(view);

    let status = editor.status_bar_mut();
    for (id, text) in segments {
        status.update_segment(id, text);
    }
    status.update_segment(SegmentId::StatusMessage, message);
}

fn view_segments(view: &View) -> [(SegmentId, String); 5] {
    let store = &view.buffer.store;
    let filename = store
        .name()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "[scratch]".to_string());
    let modified = if store.is_modified() { "*" } else { "" };
    let target = match view.target() {
        EditTarget::Tag => "[tag]",
        EditTarget::Buffer => "",
    };
    let cursor = view.active_pane().cursor;

    [
        (SegmentId::Mode, view.mode_name().to_uppercase()),
        (SegmentId::Target, target.to_string()),
        (SegmentId::FileName, filename),
        (SegmentId::ModifiedIndicator, modified.to_string()),
        (
            SegmentId::CursorPosition,
            format!("{}:{}", cursor.line + 1, cursor.column + 1),
        ),
    ]
}
