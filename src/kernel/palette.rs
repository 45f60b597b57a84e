use crate::core::{ArgValue, Command, CommandArgs};

use super::commands::CommandRegistry;

pub const PALETTE_CATEGORY: &str = "Text Editor";

#[derive(Debug, Clone)]
pub struct PaletteItem {
    pub command: Command,
    pub args: &'static [(&'static str, ArgValue)],
}

impl PaletteItem {
    pub fn args(&self) -> CommandArgs {
        CommandArgs::from_pairs(self.args)
    }
}

pub struct PaletteMatch {
    pub label: String,
    pub item: &'static PaletteItem,
}

pub static PALETTE_ITEMS: &[PaletteItem] = &[
    PaletteItem {
        command: Command::CreateNew,
        args: &[("isPalette", ArgValue::Bool(true))],
    },
    PaletteItem {
        command: Command::CreateNewMarkdown,
        args: &[("isPalette", ArgValue::Bool(true))],
    },
    PaletteItem {
        command: Command::ChangeFontSize,
        args: &[("delta", ArgValue::Number(1))],
    },
    PaletteItem {
        command: Command::ChangeFontSize,
        args: &[("delta", ArgValue::Number(-1))],
    },
    PaletteItem {
        command: Command::ChangeTabs,
        args: &[
            ("insertSpaces", ArgValue::Bool(false)),
            ("size", ArgValue::Number(4)),
            ("name", ArgValue::Str("Indent with Tab")),
        ],
    },
    PaletteItem {
        command: Command::ChangeTabs,
        args: &[
            ("insertSpaces", ArgValue::Bool(true)),
            ("size", ArgValue::Number(1)),
            ("name", ArgValue::Str("Spaces: 1")),
        ],
    },
    PaletteItem {
        command: Command::ChangeTabs,
        args: &[
            ("insertSpaces", ArgValue::Bool(true)),
            ("size", ArgValue::Number(2)),
            ("name", ArgValue::Str("Spaces: 2")),
        ],
    },
    PaletteItem {
        command: Command::ChangeTabs,
        args: &[
            ("insertSpaces", ArgValue::Bool(true)),
            ("size", ArgValue::Number(4)),
            ("name", ArgValue::Str("Spaces: 4")),
        ],
    },
    PaletteItem {
        command: Command::ChangeTabs,
        args: &[
            ("insertSpaces", ArgValue::Bool(true)),
            ("size", ArgValue::Number(8)),
            ("name", ArgValue::Str("Spaces: 8")),
        ],
    },
    PaletteItem {
        command: Command::ToggleLineNumbers,
        args: &[],
    },
    PaletteItem {
        command: Command::ToggleLineWrap,
        args: &[],
    },
    PaletteItem {
        command: Command::ToggleMatchBrackets,
        args: &[],
    },
    PaletteItem {
        command: Command::ToggleAutoClosingBrackets,
        args: &[],
    },
];

/// Palette entries whose label contains `query` (case-insensitive), in table order.
pub fn search(registry: &CommandRegistry, query: &str) -> Vec<PaletteMatch> {
    let query = query.trim().to_lowercase();
    PALETTE_ITEMS
        .iter()
        .filter_map(|item| {
            let label = registry.label(item.command, &item.args());
            label
                .to_lowercase()
                .contains(&query)
                .then_some(PaletteMatch { label, item })
        })
        .collect()
}
