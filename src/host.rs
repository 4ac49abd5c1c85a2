// SPDX-License-Identifier: GPL-3.0-only

//! Host capability seams.
//!
//! The conversion core never touches the filesystem, the clipboard, or
//! the user's notification surface directly. Embedders provide those
//! capabilities through the traits in this module, which keeps every
//! flow here testable with in-memory fakes. The CLI binary is one such
//! embedder, wiring [`DiskStore`] and a stderr notifier.

use crate::parser::parse_chat;
use crate::renderer::render_chat;
use snafu::prelude::*;
use std::path::Path;

/// Read/write access to the files the export operation touches.
pub trait FileStore {
    /// Reads the full contents of `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error (not found, permissions, ...).
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Writes `contents` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;
}

/// User-facing, fire-and-forget notifications.
pub trait Notifier {
    /// Shows `message` to the user.
    fn notify(&self, message: &str);
}

/// Error returned by a failed clipboard write.
#[derive(Debug, Snafu)]
#[snafu(display("clipboard copy failed: {reason}"))]
pub struct CopyFailed {
    /// Host-provided description of the failure.
    pub reason: String,
}

/// A sink that accepts text for the system clipboard.
pub trait Clipboard {
    /// Places `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`CopyFailed`] when the host could not complete the copy.
    fn copy(&self, text: &str) -> Result<(), CopyFailed>;
}

/// The [`FileStore`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// Copies `text` through `primary`, falling back to `fallback` when the
/// primary path fails.
///
/// The fallback models the host's legacy selection-based copy command.
/// A success through either path produces a success notice. When both
/// paths fail the user gets a failure notice instead of a silent (or
/// falsely optimistic) result.
///
/// Returns `true` when some copy path succeeded.
pub fn copy_text(
    primary: &dyn Clipboard,
    fallback: &dyn Clipboard,
    notices: &dyn Notifier,
    text: &str,
) -> bool {
    let copied = primary.copy(text).or_else(|_| fallback.copy(text));
    match copied {
        Ok(()) => {
            notices.notify("Copied to clipboard");
            true
        }
        Err(err) => {
            notices.notify(&err.to_string());
            false
        }
    }
}

/// Exports the chat file at `source` to a sibling Markdown file.
///
/// This is the one user-invocable operation: read the active export,
/// convert it, and write `<stem>.md` next to it, overwriting any
/// existing file. Every failure mode ends in a notice and leaves no
/// partial output: no active file, unreadable file, malformed JSON, or
/// a failed write.
///
/// Returns `true` when the Markdown file was written.
pub fn export_chat(store: &dyn FileStore, notices: &dyn Notifier, source: Option<&Path>) -> bool {
    let Some(source) = source else {
        notices.notify("No chat export is open");
        return false;
    };

    let raw = match store.read_to_string(source) {
        Ok(raw) => raw,
        Err(err) => {
            notices.notify(&format!("Failed to read chat export: {err}"));
            return false;
        }
    };

    let chat = match parse_chat(&raw) {
        Ok(chat) => chat,
        Err(err) => {
            notices.notify(&format!("Failed to export chat: {err}"));
            return false;
        }
    };

    let title = source
        .file_stem()
        .map_or_else(|| "Chat".to_owned(), |stem| stem.to_string_lossy().into_owned());
    let markdown = render_chat(&chat, &title);

    let target = source.with_extension("md");
    match store.write(&target, &markdown) {
        Ok(()) => {
            notices.notify(&format!("Exported to {}", target.display()));
            true
        }
        Err(err) => {
            notices.notify(&format!("Failed to write Markdown file: {err}"));
            false
        }
    }
}
