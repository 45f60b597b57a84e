use super::*;
use crate::kernel::commands::CommandRegistry;

#[test]
fn menu_entries_reference_valid_commands_and_args() {
    let registry = CommandRegistry::new();
    for entry in MENU_ENTRIES {
        let spec = registry.spec(entry.command).expect("registered command");
        let args = entry.args();
        for arg in spec.args {
            assert!(!arg.required || args.contains(arg.name));
            assert!(args.check(arg).is_ok());
        }
    }
}

#[test]
fn run_menu_holds_run_commands() {
    let commands: Vec<_> = entries_for(Menu::Run).map(|e| e.command).collect();
    assert_eq!(commands, vec![Command::RunCode, Command::RunAllCode]);
}

#[test]
fn indentation_submenu_labels() {
    let registry = CommandRegistry::new();
    let labels: Vec<_> = entries_for(Menu::Settings)
        .filter(|e| e.submenu == Some(INDENTATION_SUBMENU))
        .map(|e| registry.label(e.command, &e.args()))
        .collect();
    assert_eq!(
        labels,
        vec![
            "Indent with Tab",
            "Spaces: 1",
            "Spaces: 2",
            "Spaces: 4",
            "Spaces: 8"
        ]
    );
}

#[test]
fn view_menu_items_are_toggleable() {
    let registry = CommandRegistry::new();
    for entry in entries_for(Menu::View) {
        assert!(registry.spec(entry.command).unwrap().is_toggleable());
    }
}

#[test]
fn launcher_items_create_files_in_rank_order() {
    let registry = CommandRegistry::new();
    let labels: Vec<_> = LAUNCHER_ITEMS
        .iter()
        .map(|item| {
            assert_eq!(item.category, "Other");
            registry.label(item.command, &CommandArgs::new())
        })
        .collect();
    assert_eq!(labels, vec!["Text File", "Markdown File"]);
    assert!(LAUNCHER_ITEMS.windows(2).all(|w| w[0].rank < w[1].rank));
}
