//! Documents: a path plus its buffer, as seen by the editor commands.

use std::path::{Path, PathBuf};

use super::markdown::{extension_of, is_markdown};
use crate::models::TextBuffer;

/// An open text document: the unit every editor command acts on.
#[derive(Clone)]
pub struct Document {
    id: String,
    path: PathBuf,
    buffer: TextBuffer,
    kernel_language: Option<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            buffer: TextBuffer::from_text(text),
            kernel_language: None,
        }
    }

    pub fn with_kernel_language(mut self, language: impl Into<String>) -> Self {
        self.kernel_language = Some(language.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path as sent to the host; non UTF-8 components are replaced.
    pub fn path_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn extension(&self) -> String {
        extension_of(&self.path)
    }

    pub fn is_markdown(&self) -> bool {
        is_markdown(&self.extension())
    }

    pub fn kernel_language(&self) -> Option<&str> {
        self.kernel_language.as_deref()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }
}
