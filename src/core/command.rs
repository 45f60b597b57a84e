//! 命令系统：语义命令定义
//!
//! - Command: 编辑器扩展提供的全部命令（与菜单/按键无关）
//! - 命令 ID 与宿主注册表中的字符串一一对应

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ==================== 文件操作 ====================
    CreateNew,
    CreateNewMarkdown,

    // ==================== 编辑器配置 ====================
    ChangeFontSize,
    ToggleLineNumbers,
    ToggleLineWrap,
    ChangeTabs,
    ToggleMatchBrackets,
    ToggleAutoClosingBrackets,

    // ==================== 运行 ====================
    CreateConsole,
    RunCode,
    RunAllCode,

    // ==================== 视图 ====================
    MarkdownPreview,
}

impl Command {
    pub const ALL: [Command; 12] = [
        Command::CreateNew,
        Command::CreateNewMarkdown,
        Command::ChangeFontSize,
        Command::ToggleLineNumbers,
        Command::ToggleLineWrap,
        Command::ChangeTabs,
        Command::ToggleMatchBrackets,
        Command::ToggleAutoClosingBrackets,
        Command::CreateConsole,
        Command::RunCode,
        Command::RunAllCode,
        Command::MarkdownPreview,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Command::CreateNew => "fileeditor:create-new",
            Command::CreateNewMarkdown => "fileeditor:create-new-markdown-file",
            Command::ChangeFontSize => "fileeditor:change-font-size",
            Command::ToggleLineNumbers => "fileeditor:toggle-line-numbers",
            Command::ToggleLineWrap => "fileeditor:toggle-line-wrap",
            Command::ChangeTabs => "fileeditor:change-tabs",
            Command::ToggleMatchBrackets => "fileeditor:toggle-match-brackets",
            Command::ToggleAutoClosingBrackets => "fileeditor:toggle-autoclosing-brackets",
            Command::CreateConsole => "fileeditor:create-console",
            Command::RunCode => "fileeditor:run-code",
            Command::RunAllCode => "fileeditor:run-all",
            Command::MarkdownPreview => "fileeditor:markdown-preview",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.id() == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
