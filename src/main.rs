//! jk - a small modal text editor for the terminal

use anyhow::{Context, Result};
use clap::Parser;

use jk::cli::CliArgs;
use jk::config::EditorConfig;
use jk::keymap::load_modes;
use jk::model::Editor;
use jk::process::SystemRunner;

fn main() -> Result<()> {
    let _log_guard = jk::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    let config = EditorConfig::load();
    let modes = load_modes(startup.keymap.as_deref());
    let mut editor = Editor::new(config, modes, SystemRunner);

    if startup.files.is_empty() {
        editor.new_empty()?;
    }
    for path in &startup.files {
        editor
            .open_or_create(path)
            .with_context(|| format!("opening {}", path.display()))?;
    }

    // Start on the first file; --line applies to it
    editor.select_view(0);
    if let Some((line, column)) = startup.initial_position {
        if let Some(view) = editor.current_view_mut() {
            view.buffer.set_cursor(line, column);
        }
    }

    tracing::info!(views = editor.views().len(), "starting jk");
    jk::term::run(&mut editor).context("terminal error")?;
    tracing::info!("exiting jk");

    Ok(())
}
