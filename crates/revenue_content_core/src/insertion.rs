//! crates/revenue_content_core/src/insertion.rs
//!
//! Hands rendered HTML to whichever editor the host currently exposes.
//!
//! Editors are capability probes tried in priority order (block editor,
//! inline rich-text editor, plain text area). The first one that accepts the
//! content wins; if none does, the content goes to the clipboard.

use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EditorKind {
    BlockEditor,
    InlineRichText,
    PlainTextArea,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct InsertError(pub String);

pub trait EditorTarget {
    fn kind(&self) -> EditorKind;

    /// Inserts `html` if this editor is available.
    ///
    /// `Ok(false)` means the editor is not present and the next one should be tried.
    fn try_insert(&mut self, html: &str) -> Result<bool, InsertError>;
}

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), InsertError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertionOutcome {
    Inserted(EditorKind),
    CopiedToClipboard,
}

/// Tries every editor in priority order, falling back to the clipboard.
///
/// An editor that errors is treated like an unavailable one. Only a failing
/// clipboard is reported as an error.
pub fn insert_content(
    editors: &mut [Box<dyn EditorTarget>],
    clipboard: &mut dyn Clipboard,
    html: &str,
) -> Result<InsertionOutcome, InsertError> {
    editors.sort_by_key(|editor| editor.kind());

    for editor in editors.iter_mut() {
        let kind = editor.kind();
        match editor.try_insert(html) {
            Ok(true) => return Ok(InsertionOutcome::Inserted(kind)),
            Ok(false) => debug!(?kind, "Editor not available"),
            Err(e) => warn!(?kind, "Editor insert failed: {}", e),
        }
    }

    clipboard.copy(html)?;
    Ok(InsertionOutcome::CopiedToClipboard)
}
