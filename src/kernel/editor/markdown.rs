//! Fenced code block scanning for Markdown documents.
//!
//! Only backtick fences that start at column 0 are recognised. Lines are the
//! rope's lines, so block spans use the same row numbers as the buffer cursor
//! for every line break ropey knows (`\n`, `\r\n`, lone `\r`, form feed,
//! U+2028 ...). Each code line contributes its text without the break plus `\n`.

use ropey::Rope;
use std::iter::Enumerate;
use std::path::Path;

use crate::models::{slice_to_cow, strip_line_ending};

const FENCE: &str = "```";

/// File extensions treated as Markdown (compared with a leading dot, case-sensitive).
pub const MARKDOWN_EXTENSIONS: &[&str] = &[
    ".markdown", ".mdown", ".mkdn", ".md", ".mkd", ".mdwn", ".mdtxt", ".mdtext", ".text", ".txt",
    ".Rmd",
];

/// Whether `extension` (with or without the leading dot) names a Markdown file.
pub fn is_markdown(extension: &str) -> bool {
    let ext = extension.strip_prefix('.').unwrap_or(extension);
    if ext.is_empty() {
        return false;
    }
    MARKDOWN_EXTENSIONS
        .iter()
        .any(|known| known.strip_prefix('.') == Some(ext))
}

/// Extension of `path` with a leading dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

/// A fenced region of a Markdown document.
///
/// `start_line` is the opening fence and `end_line` the closing fence, both
/// inclusive. A single-line fence has `start_line == end_line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub start_line: usize,
    pub end_line: usize,
    pub language: Option<String>,
    pub code: String,
}

impl CodeBlock {
    pub fn contains_line(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

/// Lazy iterator over the fenced code blocks of a text, in document order.
///
/// A clone scans independently from the same position. Call [`code_blocks`]
/// again to scan from the top.
#[derive(Clone)]
pub struct CodeBlocks<'a> {
    lines: Enumerate<ropey::iter::Lines<'a>>,
}

/// Scan `rope` for fenced code blocks. An unterminated fence yields nothing.
pub fn code_blocks(rope: &Rope) -> CodeBlocks<'_> {
    CodeBlocks {
        lines: rope.lines().enumerate(),
    }
}

impl Iterator for CodeBlocks<'_> {
    type Item = CodeBlock;

    fn next(&mut self) -> Option<CodeBlock> {
        let mut open: Option<CodeBlock> = None;

        for (idx, slice) in self.lines.by_ref() {
            let line = slice_to_cow(slice);
            let line = strip_line_ending(&line);
            let is_fence = line.starts_with(FENCE);

            let Some(block) = open.as_mut() else {
                if !is_fence {
                    continue;
                }
                let rest = &line[FENCE.len()..];
                if let Some(close) = rest.rfind(FENCE) {
                    return Some(CodeBlock {
                        start_line: idx,
                        end_line: idx,
                        language: None,
                        code: rest[..close].to_string(),
                    });
                }
                open = Some(CodeBlock {
                    start_line: idx,
                    end_line: idx,
                    language: fence_language(rest),
                    code: String::new(),
                });
                continue;
            };

            if is_fence {
                block.end_line = idx;
                return open.take();
            }
            block.code.push_str(line);
            block.code.push('\n');
        }

        if let Some(block) = open {
            tracing::debug!(start_line = block.start_line, "unterminated code fence ignored");
        }
        None
    }
}

fn fence_language(rest: &str) -> Option<String> {
    rest.split_whitespace()
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/markdown.rs"]
mod tests;
