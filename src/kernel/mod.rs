//! Headless application core (commands/editor/services).

pub mod commands;
pub mod editor;
pub mod menu;
pub mod palette;
pub mod services;

pub use commands::{
    CommandContext, CommandError, CommandOutcome, CommandRegistry, CommandSpec, Requirement,
    COMMANDS,
};
pub use editor::{extract_all_code, extract_code, Document, Snippet, SnippetSource};
pub use menu::{entries_for, LauncherItem, Menu, MenuEntry, LAUNCHER_ITEMS, MENU_ENTRIES};
pub use palette::{PaletteItem, PaletteMatch, PALETTE_ITEMS};
