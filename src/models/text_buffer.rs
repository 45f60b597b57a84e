//! 文本缓冲区模型
//!
//! 职责：
//! - 文本存储（Rope）
//! - 光标和选区管理
//! - 行列 ↔ 字符偏移映射

use super::selection::Selection;
use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

/// 从 RopeSlice 获取字符串，优先零拷贝
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

/// ropey 认可的全部换行符（默认启用 `cr_lines` 与 `unicode_lines`）
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0B}', '\u{0C}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// 去掉 rope 行末尾的换行符（`\r\n` 视为一个）
pub fn strip_line_ending(line: &str) -> &str {
    if let Some(line) = line.strip_suffix("\r\n") {
        return line;
    }
    line.strip_suffix(LINE_BREAKS).unwrap_or(line)
}

#[derive(Clone)]
pub struct TextBuffer {
    rope: Rope,
    cursor: (usize, usize),
    selection: Option<Selection>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: (0, 0),
            selection: None,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: (0, 0),
            selection: None,
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn set_cursor(&mut self, row: usize, col: usize) {
        self.cursor = self.clamp_pos((row, col));
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
        if let Some(sel) = &self.selection {
            self.cursor = sel.cursor();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn is_last_line(&self, row: usize) -> bool {
        row + 1 >= self.rope.len_lines()
    }

    /// 行文本（不含行尾换行符）
    pub fn line_text(&self, row: usize) -> Option<String> {
        if row < self.rope.len_lines() {
            let slice = self.rope.line(row);
            Some(strip_line_ending(&slice_to_cow(slice)).to_string())
        } else {
            None
        }
    }

    pub fn line_slice(&self, row: usize) -> Option<RopeSlice<'_>> {
        if row < self.rope.len_lines() {
            Some(self.rope.line(row))
        } else {
            None
        }
    }

    pub fn pos_to_char(&self, pos: (usize, usize)) -> usize {
        let (row, col) = self.clamp_pos(pos);
        self.rope.line_to_char(row) + self.grapheme_to_char_index(row, col)
    }

    fn grapheme_to_char_index(&self, row: usize, grapheme_index: usize) -> usize {
        let slice = self.rope.line(row);
        let line = slice_to_cow(slice);
        strip_line_ending(&line)
            .graphemes(true)
            .take(grapheme_index)
            .map(|g| g.chars().count())
            .sum()
    }

    pub fn line_grapheme_len(&self, row: usize) -> usize {
        match self.line_slice(row) {
            Some(slice) => strip_line_ending(&slice_to_cow(slice)).graphemes(true).count(),
            None => 0,
        }
    }

    /// 将位置限制在文档范围内
    pub fn clamp_pos(&self, pos: (usize, usize)) -> (usize, usize) {
        let row = pos.0.min(self.rope.len_lines().saturating_sub(1));
        let col = pos.1.min(self.line_grapheme_len(row));
        (row, col)
    }

    /// 两个位置之间的文本；位置会先按文档顺序排序
    pub fn text_between(&self, start: (usize, usize), end: (usize, usize)) -> String {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let start = self.pos_to_char(start);
        let end = self.pos_to_char(end);
        self.rope.slice(start..end).to_string()
    }

    /// 当前选区文本；无选区或空选区返回 None
    pub fn selected_text(&self) -> Option<String> {
        let sel = self.selection.as_ref().filter(|s| !s.is_empty())?;
        let (start, end) = sel.range();
        Some(self.text_between(start, end))
    }

    /// 在文档末尾追加文本，不移动光标
    pub fn append(&mut self, s: &str) {
        let end = self.rope.len_chars();
        self.rope.insert(end, s);
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_buffer.rs"]
mod tests;
