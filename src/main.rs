//! markup-editor - Main Entry Point
//!
//! Headless driver: renders a Markdown file, prints its outline and status,
//! and optionally simulates a cursor move to report where the preview scrolls.
//!
//! ```text
//! markup-editor <file.md> [cursor-line]
//! ```

use log::{error, info};
use markup_editor::config::save_config_silent;
use markup_editor::editor::{flatten, EditingSurface, TextBuffer};
use markup_editor::preview::{HeadlessPreview, ScrollContainer};
use markup_editor::{load_config, EditorShell, Error, Result};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Application name constant.
const APP_NAME: &str = "markup-editor";

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| Error::Usage(format!("usage: {} <file.md> [cursor-line]", APP_NAME)))?;
    let cursor_line = args
        .next()
        .map(|arg| {
            arg.parse::<usize>()
                .map_err(|_| Error::Usage(format!("invalid cursor line: {}", arg)))
        })
        .transpose()?;

    info!("Starting {}", APP_NAME);
    let settings = load_config();
    let text = fs::read_to_string(&path).map_err(|source| Error::DocumentRead {
        path: PathBuf::from(&path),
        source,
    })?;

    let preview = HeadlessPreview::new(f64::from(settings.height));
    let mut shell = EditorShell::with_settings(TextBuffer::new(text), preview, settings)?;

    println!("Outline:");
    for (depth, node) in flatten(shell.outline()) {
        println!("{}- {} (#{})", "  ".repeat(depth), node.plain_text(), node.id);
    }

    if let Some(line) = cursor_line {
        shell.editing_mut().set_cursor(line, 0);
        let line = shell.editing().cursor_line();
        shell.on_cursor_activity(line)?;
        let steps = shell.finish_scroll();

        match shell.anchor_line() {
            Some(anchor) => println!("Cursor line {} anchored at line {}", line + 1, anchor + 1),
            None => println!("Cursor line {} has no anchor", line + 1),
        }
        println!(
            "Preview scroll offset: {:.1}px ({} steps)",
            shell.preview().scroll_offset(),
            steps
        );
    }

    let status = shell.status();
    println!(
        "{} lines | Ln {}, Col {}",
        status.loc, status.line, status.col
    );

    // Persist so a first run leaves an editable config file behind
    save_config_silent(shell.settings());
    Ok(())
}
