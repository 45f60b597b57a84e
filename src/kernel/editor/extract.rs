//! Code extraction: decide which text of a buffer should be executed.

use super::markdown::{code_blocks, is_markdown};
use crate::models::TextBuffer;

/// Where an extracted snippet came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetSource {
    Selection,
    CodeBlock { start_line: usize, end_line: usize },
    /// The cursor line; the cursor has been moved to the following line.
    Line(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub code: String,
    pub source: SnippetSource,
}

/// Extract the code for "run code".
///
/// Priority: a non-empty selection, then (Markdown only) the fenced block
/// holding the cursor line, then the cursor line itself. Only the last case
/// touches the buffer: the cursor moves down one line, and a trailing newline
/// is appended first when the cursor sits on the last line.
pub fn extract_code(buffer: &mut TextBuffer, extension: &str) -> Snippet {
    if let Some(code) = buffer.selected_text() {
        return Snippet {
            code,
            source: SnippetSource::Selection,
        };
    }

    let (row, col) = buffer.cursor();

    if is_markdown(extension) {
        if let Some(block) = code_blocks(buffer.rope()).find(|block| block.contains_line(row)) {
            return Snippet {
                source: SnippetSource::CodeBlock {
                    start_line: block.start_line,
                    end_line: block.end_line,
                },
                code: block.code,
            };
        }
    }

    let code = buffer.line_text(row).unwrap_or_default();
    if buffer.is_last_line(row) {
        buffer.append("\n");
    }
    buffer.clear_selection();
    buffer.set_cursor(row + 1, col);

    Snippet {
        code,
        source: SnippetSource::Line(row),
    }
}

/// Extract the code for "run all": every fenced block concatenated for
/// Markdown, the whole text otherwise.
pub fn extract_all_code(buffer: &TextBuffer, extension: &str) -> String {
    if is_markdown(extension) {
        code_blocks(buffer.rope()).map(|block| block.code).collect()
    } else {
        buffer.text()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/extract.rs"]
mod tests;
