//! Menu and launcher contributions. The host renders these; here they are
//! plain data pointing at registered commands.

use crate::core::{ArgValue, Command, CommandArgs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    FileNew,
    File,
    Settings,
    View,
    Run,
}

impl Menu {
    pub fn label(self) -> &'static str {
        match self {
            Menu::FileNew => "File > New",
            Menu::File => "File",
            Menu::Settings => "Settings",
            Menu::View => "View",
            Menu::Run => "Run",
        }
    }
}

pub const INDENTATION_SUBMENU: &str = "Text Editor Indentation";

#[derive(Debug, Clone)]
pub struct MenuEntry {
    pub menu: Menu,
    pub submenu: Option<&'static str>,
    /// Entries with the same group are rendered together.
    pub group: u8,
    pub command: Command,
    pub args: &'static [(&'static str, ArgValue)],
}

impl MenuEntry {
    pub fn args(&self) -> CommandArgs {
        CommandArgs::from_pairs(self.args)
    }
}

const fn entry(menu: Menu, group: u8, command: Command) -> MenuEntry {
    MenuEntry {
        menu,
        submenu: None,
        group,
        command,
        args: &[],
    }
}

pub static MENU_ENTRIES: &[MenuEntry] = &[
    entry(Menu::FileNew, 30, Command::CreateNew),
    entry(Menu::FileNew, 30, Command::CreateNewMarkdown),
    entry(Menu::File, 40, Command::CreateConsole),
    MenuEntry {
        menu: Menu::Settings,
        submenu: None,
        group: 30,
        command: Command::ChangeFontSize,
        args: &[("delta", ArgValue::Number(1))],
    },
    MenuEntry {
        menu: Menu::Settings,
        submenu: None,
        group: 30,
        command: Command::ChangeFontSize,
        args: &[("delta", ArgValue::Number(-1))],
    },
    entry(Menu::Settings, 30, Command::ToggleAutoClosingBrackets),
    MenuEntry {
        menu: Menu::Settings,
        submenu: Some(INDENTATION_SUBMENU),
        group: 30,
        command: Command::ChangeTabs,
        args: &[
            ("insertSpaces", ArgValue::Bool(false)),
            ("size", ArgValue::Number(4)),
            ("name", ArgValue::Str("Indent with Tab")),
        ],
    },
    MenuEntry {
        menu: Menu::Settings,
        submenu: Some(INDENTATION_SUBMENU),
        group: 30,
        command: Command::ChangeTabs,
        args: &[
            ("insertSpaces", ArgValue::Bool(true)),
            ("size", ArgValue::Number(1)),
            ("name", ArgValue::Str("Spaces: 1")),
        ],
    },
    MenuEntry {
        menu: Menu::Settings,
        submenu: Some(INDENTATION_SUBMENU),
        group: 30,
        command: Command::ChangeTabs,
        args: &[
            ("insertSpaces", ArgValue::Bool(true)),
            ("size", ArgValue::Number(2)),
            ("name", ArgValue::Str("Spaces: 2")),
        ],
    },
    MenuEntry {
        menu: Menu::Settings,
        submenu: Some(INDENTATION_SUBMENU),
        group: 30,
        command: Command::ChangeTabs,
        args: &[
            ("insertSpaces", ArgValue::Bool(true)),
            ("size", ArgValue::Number(4)),
            ("name", ArgValue::Str("Spaces: 4")),
        ],
    },
    MenuEntry {
        menu: Menu::Settings,
        submenu: Some(INDENTATION_SUBMENU),
        group: 30,
        command: Command::ChangeTabs,
        args: &[
            ("insertSpaces", ArgValue::Bool(true)),
            ("size", ArgValue::Number(8)),
            ("name", ArgValue::Str("Spaces: 8")),
        ],
    },
    entry(Menu::View, 10, Command::ToggleLineNumbers),
    entry(Menu::View, 10, Command::ToggleLineWrap),
    entry(Menu::View, 10, Command::ToggleMatchBrackets),
    entry(Menu::Run, 10, Command::RunCode),
    entry(Menu::Run, 10, Command::RunAllCode),
];

pub fn entries_for(menu: Menu) -> impl Iterator<Item = &'static MenuEntry> {
    MENU_ENTRIES.iter().filter(move |entry| entry.menu == menu)
}

pub const LAUNCHER_CATEGORY: &str = "Other";

#[derive(Debug, Clone)]
pub struct LauncherItem {
    pub command: Command,
    pub category: &'static str,
    pub rank: u32,
}

pub static LAUNCHER_ITEMS: &[LauncherItem] = &[
    LauncherItem {
        command: Command::CreateNew,
        category: LAUNCHER_CATEGORY,
        rank: 1,
    },
    LauncherItem {
        command: Command::CreateNewMarkdown,
        category: LAUNCHER_CATEGORY,
        rank: 2,
    },
];

#[cfg(test)]
#[path = "../../tests/unit/kernel/menu.rs"]
mod tests;
