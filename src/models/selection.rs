//! 选区模型：锚点 + 光标，位置以 (行, 字素列) 表示

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    anchor: (usize, usize),
    cursor: (usize, usize),
}

impl Selection {
    pub fn new(anchor: (usize, usize), cursor: (usize, usize)) -> Self {
        Self { anchor, cursor }
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// 按文档顺序返回 (start, end)
    pub fn range(&self) -> ((usize, usize), (usize, usize)) {
        if self.anchor <= self.cursor {
            (self.anchor, self.cursor)
        } else {
            (self.cursor, self.anchor)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.cursor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/selection.rs"]
mod tests;
