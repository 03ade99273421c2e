//! Editor model - buffers, cursors, views, and the editor that owns them
//!
//! Storage sits at the bottom (`gap_buffer`, `line_index`, `text_store`),
//! cursor handling above it (`cursor`, `pane`), then `view` and the
//! [`Editor`] that dispatches commands across views.

pub mod cursor;
pub mod editor;
pub mod gap_buffer;
pub mod line_index;
pub mod log;
pub mod pane;
pub mod status_bar;
pub mod text_store;
pub mod view;

pub use cursor::{Cursor, Viewport};
pub use editor::Editor;
pub use log::{EditorLog, LogEntry, LogLevel};
pub use pane::Pane;
pub use status_bar::{sync_status_bar, SegmentId, SegmentPosition, StatusBar, StatusSegment};
pub use text_store::TextStore;
pub use view::{expand_tabs, visual_column, EditTarget, View};
