//! Static command registry: one typed record per [`Command`] holding its
//! argument schema, label, toggled state, enablement and handler.

use rustc_hash::FxHashMap;
use std::fmt;

use crate::core::{ArgError, ArgKind, ArgSpec, Command, CommandArgs};
use crate::kernel::editor::{extract_all_code, extract_code, Document};
use crate::kernel::services::ports::{
    CreateConsole, EditorConfig, Host, HostFuture, HostRequest, InjectCode, LineWrap,
    MarkdownPreview, NewUntitled, PreviewOptions, Settings, SettingsError, SettingsStore,
};

const CONSOLE_INSERT_MODE: &str = "split-bottom";
const PREVIEW_MODE: &str = "split-right";
const EDITOR_FACTORY: &str = "Editor";

/// Everything a handler may touch. The configuration is shared by all
/// documents; `document` is the active editor, if any.
pub struct CommandContext<'a> {
    pub config: &'a mut EditorConfig,
    pub settings: &'a mut dyn SettingsStore,
    pub host: &'a dyn Host,
    pub document: Option<&'a mut Document>,
    /// Directory new files are created in.
    pub cwd: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    Document,
    MarkdownDocument,
}

pub enum CommandOutcome {
    /// Configuration updated and persisted.
    ConfigChanged,
    /// Request handed to the host; the future is not awaited here.
    Forwarded(HostFuture),
    /// Nothing to do (e.g. the extracted snippet was empty).
    Skipped,
}

impl fmt::Debug for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::ConfigChanged => write!(f, "ConfigChanged"),
            CommandOutcome::Forwarded(_) => write!(f, "Forwarded(..)"),
            CommandOutcome::Skipped => write!(f, "Skipped"),
        }
    }
}

#[derive(Debug)]
pub enum CommandError {
    UnknownCommand(String),
    NoActiveDocument(Command),
    NotMarkdown(Command),
    MissingArgument {
        command: Command,
        name: &'static str,
    },
    InvalidArgument {
        command: Command,
        error: ArgError,
    },
    Settings(SettingsError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownCommand(id) => write!(f, "unknown command: {id}"),
            CommandError::NoActiveDocument(command) => {
                write!(f, "{} needs an active document", command.id())
            }
            CommandError::NotMarkdown(command) => {
                write!(f, "{} needs a Markdown document", command.id())
            }
            CommandError::MissingArgument { command, name } => {
                write!(f, "{}: missing argument `{name}`", command.id())
            }
            CommandError::InvalidArgument { command, error } => {
                write!(f, "{}: {error}", command.id())
            }
            CommandError::Settings(e) => write!(f, "failed to persist settings: {e}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::InvalidArgument { error, .. } => Some(error),
            CommandError::Settings(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SettingsError> for CommandError {
    fn from(e: SettingsError) -> Self {
        CommandError::Settings(e)
    }
}

type Handler = fn(&mut CommandContext<'_>, &CommandArgs) -> Result<CommandOutcome, CommandError>;

pub struct CommandSpec {
    pub command: Command,
    pub args: &'static [ArgSpec],
    pub caption: &'static str,
    pub requires: Requirement,
    label: fn(&CommandArgs) -> String,
    toggled: Option<fn(&EditorConfig, &CommandArgs) -> bool>,
    handler: Handler,
}

impl CommandSpec {
    pub fn label(&self, args: &CommandArgs) -> String {
        (self.label)(args)
    }

    pub fn is_toggleable(&self) -> bool {
        self.toggled.is_some()
    }

    pub fn is_toggled(&self, config: &EditorConfig, args: &CommandArgs) -> bool {
        self.toggled.is_some_and(|toggled| toggled(config, args))
    }

    pub fn is_enabled(&self, document: Option<&Document>) -> bool {
        self.check_requirement(document).is_ok()
    }

    fn check_requirement(&self, document: Option<&Document>) -> Result<(), CommandError> {
        match (self.requires, document) {
            (Requirement::Always, _) => Ok(()),
            (_, None) => Err(CommandError::NoActiveDocument(self.command)),
            (Requirement::MarkdownDocument, Some(doc)) if !doc.is_markdown() => {
                Err(CommandError::NotMarkdown(self.command))
            }
            _ => Ok(()),
        }
    }

    fn validate(&self, args: &CommandArgs) -> Result<(), CommandError> {
        for spec in self.args {
            if spec.required && !args.contains(spec.name) {
                return Err(CommandError::MissingArgument {
                    command: self.command,
                    name: spec.name,
                });
            }
            args.check(spec)
                .map_err(|error| CommandError::InvalidArgument {
                    command: self.command,
                    error,
                })?;
        }
        Ok(())
    }
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: Command::CreateNew,
        args: &[ArgSpec::optional("isPalette", ArgKind::Bool)],
        caption: "Create a new text file",
        requires: Requirement::Always,
        label: label_create_new,
        toggled: None,
        handler: create_new,
    },
    CommandSpec {
        command: Command::CreateNewMarkdown,
        args: &[ArgSpec::optional("isPalette", ArgKind::Bool)],
        caption: "Create a new markdown file",
        requires: Requirement::Always,
        label: label_create_new_markdown,
        toggled: None,
        handler: create_new_markdown,
    },
    CommandSpec {
        command: Command::ChangeFontSize,
        args: &[ArgSpec::required("delta", ArgKind::Number)],
        caption: "",
        requires: Requirement::Always,
        label: label_change_font_size,
        toggled: None,
        handler: change_font_size,
    },
    CommandSpec {
        command: Command::ToggleLineNumbers,
        args: &[],
        caption: "",
        requires: Requirement::Always,
        label: label_line_numbers,
        toggled: Some(is_line_numbers_toggled),
        handler: toggle_line_numbers,
    },
    CommandSpec {
        command: Command::ToggleLineWrap,
        args: &[ArgSpec::optional("mode", ArgKind::String)],
        caption: "",
        requires: Requirement::Always,
        label: label_word_wrap,
        toggled: Some(is_line_wrap_toggled),
        handler: toggle_line_wrap,
    },
    CommandSpec {
        command: Command::ChangeTabs,
        args: &[
            ArgSpec::required("insertSpaces", ArgKind::Bool),
            ArgSpec::required("size", ArgKind::Number),
            ArgSpec::optional("name", ArgKind::String),
        ],
        caption: "",
        requires: Requirement::Always,
        label: label_change_tabs,
        toggled: Some(is_tabs_toggled),
        handler: change_tabs,
    },
    CommandSpec {
        command: Command::ToggleMatchBrackets,
        args: &[],
        caption: "",
        requires: Requirement::Always,
        label: label_match_brackets,
        toggled: Some(is_match_brackets_toggled),
        handler: toggle_match_brackets,
    },
    CommandSpec {
        command: Command::ToggleAutoClosingBrackets,
        args: &[],
        caption: "",
        requires: Requirement::Always,
        label: label_auto_closing_brackets,
        toggled: Some(is_auto_closing_brackets_toggled),
        handler: toggle_auto_closing_brackets,
    },
    CommandSpec {
        command: Command::CreateConsole,
        args: &[ArgSpec::optional("activate", ArgKind::Bool)],
        caption: "",
        requires: Requirement::Document,
        label: label_create_console,
        toggled: None,
        handler: create_console,
    },
    CommandSpec {
        command: Command::RunCode,
        args: &[],
        caption: "",
        requires: Requirement::Document,
        label: label_run_code,
        toggled: None,
        handler: run_code,
    },
    CommandSpec {
        command: Command::RunAllCode,
        args: &[],
        caption: "",
        requires: Requirement::Document,
        label: label_run_all_code,
        toggled: None,
        handler: run_all_code,
    },
    CommandSpec {
        command: Command::MarkdownPreview,
        args: &[],
        caption: "",
        requires: Requirement::MarkdownDocument,
        label: label_markdown_preview,
        toggled: None,
        handler: markdown_preview,
    },
];

pub struct CommandRegistry {
    by_id: FxHashMap<&'static str, &'static CommandSpec>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let by_id = COMMANDS
            .iter()
            .map(|spec| (spec.command.id(), spec))
            .collect();
        Self { by_id }
    }

    pub fn lookup(&self, id: &str) -> Option<&'static CommandSpec> {
        self.by_id.get(id).copied()
    }

    pub fn spec(&self, command: Command) -> Option<&'static CommandSpec> {
        self.lookup(command.id())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn label(&self, command: Command, args: &CommandArgs) -> String {
        self.spec(command)
            .map(|spec| spec.label(args))
            .unwrap_or_else(|| command.id().to_string())
    }

    pub fn is_toggled(&self, command: Command, config: &EditorConfig, args: &CommandArgs) -> bool {
        self.spec(command)
            .is_some_and(|spec| spec.is_toggled(config, args))
    }

    pub fn is_enabled(&self, command: Command, document: Option<&Document>) -> bool {
        self.spec(command)
            .is_some_and(|spec| spec.is_enabled(document))
    }

    pub fn execute_id(
        &self,
        id: &str,
        ctx: &mut CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<CommandOutcome, CommandError> {
        let command =
            Command::from_id(id).ok_or_else(|| CommandError::UnknownCommand(id.to_string()))?;
        self.execute(command, ctx, args)
    }

    pub fn execute(
        &self,
        command: Command,
        ctx: &mut CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<CommandOutcome, CommandError> {
        let spec = self
            .spec(command)
            .ok_or_else(|| CommandError::UnknownCommand(command.id().to_string()))?;

        let result = spec
            .check_requirement(ctx.document.as_deref())
            .and_then(|()| spec.validate(args))
            .and_then(|()| (spec.handler)(ctx, args));

        match &result {
            Ok(outcome) => {
                tracing::info!(command = command.id(), outcome = ?outcome, "command executed")
            }
            Err(error) => tracing::error!(command = command.id(), error = %error, "command failed"),
        }
        result
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== labels / toggled ====================

fn is_palette(args: &CommandArgs) -> bool {
    args.bool("isPalette").ok().flatten().unwrap_or(false)
}

fn label_create_new(args: &CommandArgs) -> String {
    let label = if is_palette(args) {
        "New Text File"
    } else {
        "Text File"
    };
    label.to_string()
}

fn label_create_new_markdown(args: &CommandArgs) -> String {
    let label = if is_palette(args) {
        "New Markdown File"
    } else {
        "Markdown File"
    };
    label.to_string()
}

fn label_change_font_size(args: &CommandArgs) -> String {
    let delta = args.number("delta").ok().flatten().unwrap_or(0.0);
    let label = if delta > 0.0 {
        "Increase Text Editor Font Size"
    } else {
        "Decrease Text Editor Font Size"
    };
    label.to_string()
}

fn label_change_tabs(args: &CommandArgs) -> String {
    if let Ok(Some(name)) = args.str("name") {
        return name.to_string();
    }
    match (args.bool("insertSpaces"), args.number("size")) {
        (Ok(Some(false)), _) => "Indent with Tab".to_string(),
        (_, Ok(Some(size))) => format!("Spaces: {}", tab_size(size)),
        _ => "Change Tabs".to_string(),
    }
}

fn label_line_numbers(_args: &CommandArgs) -> String {
    "Line Numbers".to_string()
}

fn label_word_wrap(_args: &CommandArgs) -> String {
    "Word Wrap".to_string()
}

fn label_match_brackets(_args: &CommandArgs) -> String {
    "Match Brackets".to_string()
}

fn label_auto_closing_brackets(_args: &CommandArgs) -> String {
    "Auto Close Brackets for Text Editor".to_string()
}

fn label_create_console(_args: &CommandArgs) -> String {
    "Create Console for Editor".to_string()
}

fn label_run_code(_args: &CommandArgs) -> String {
    "Run Code".to_string()
}

fn label_run_all_code(_args: &CommandArgs) -> String {
    "Run All Code".to_string()
}

fn label_markdown_preview(_args: &CommandArgs) -> String {
    "Show Markdown Preview".to_string()
}

fn is_line_numbers_toggled(config: &EditorConfig, _args: &CommandArgs) -> bool {
    config.line_numbers
}

fn is_match_brackets_toggled(config: &EditorConfig, _args: &CommandArgs) -> bool {
    config.match_brackets
}

fn is_auto_closing_brackets_toggled(config: &EditorConfig, _args: &CommandArgs) -> bool {
    config.auto_closing_brackets
}

fn is_line_wrap_toggled(config: &EditorConfig, args: &CommandArgs) -> bool {
    match args.str("mode") {
        Ok(Some(mode)) => LineWrap::from_name(mode) == Some(config.line_wrap),
        _ => config.line_wrap != LineWrap::Off,
    }
}

fn is_tabs_toggled(config: &EditorConfig, args: &CommandArgs) -> bool {
    match (args.bool("insertSpaces"), args.number("size")) {
        (Ok(Some(insert_spaces)), Ok(Some(size))) => {
            config.insert_spaces == insert_spaces && config.tab_size == tab_size(size)
        }
        _ => false,
    }
}

fn tab_size(size: f64) -> u32 {
    size.round().max(1.0) as u32
}

// ==================== handlers ====================

/// Apply `change` to a copy of the configuration, persist it, and only then
/// commit it, so a failed save leaves the live configuration untouched.
fn update_config(
    ctx: &mut CommandContext<'_>,
    change: impl FnOnce(&mut EditorConfig),
) -> Result<CommandOutcome, CommandError> {
    let mut next = ctx.config.clone();
    change(&mut next);
    ctx.settings.save(&Settings::new(next.clone()))?;
    *ctx.config = next;
    Ok(CommandOutcome::ConfigChanged)
}

fn new_untitled(ctx: &CommandContext<'_>, ext: &str) -> CommandOutcome {
    let request = HostRequest::NewUntitled(NewUntitled {
        path: ctx.cwd.to_string(),
        kind: "file".to_string(),
        ext: ext.to_string(),
        factory: EDITOR_FACTORY.to_string(),
    });
    CommandOutcome::Forwarded(ctx.host.execute(request))
}

fn create_new(
    ctx: &mut CommandContext<'_>,
    _args: &CommandArgs,
) -> Result<CommandOutcome, CommandError> {
    Ok(new_untitled(ctx, "txt"))
}

fn create_new_markdown(
    ctx: &mut CommandContext<'_>,
    _args: &CommandArgs,
) -> Result<CommandOutcome, CommandError> {
    Ok(new_untitled(ctx, "md"))
}

fn change_font_size(
    ctx: &mut CommandContext<'_>,
    args: &CommandArgs,
) -> Result<CommandOutcome, CommandError> {
    let delta = args
        .number("delta")
        .map_err(|error| CommandError::InvalidArgument {
            command: Command::ChangeFontSize,
            error,
        })?
        .ok_or(CommandError::MissingArgument {
            command: Command::ChangeFontSize,
            name: "delta",
        })?;

    let current = ctx.config.effective_font_size();
    let size = (f64::from(current) + delta).round().max(1.0) as u32;
    tracing::debug!(current, size, "changing font size");
    update_config(ctx, |config| config.font_size = Some(size))
}

fn toggle_line_numbers(
    ctx: &mut CommandContext<'_>,
    _args: &CommandArgs,
) -> Result<CommandOutcome, CommandError> {
    update_config(ctx, |config| config.line_numbers = !config.line_numbers)
}

fn toggle_line_wrap(
    ctx: &mut CommandContext<'_>,
    args: &CommandArgs,
) -> Result<CommandOutcome, CommandError> {
    let invalid = |error: ArgError| CommandError::InvalidArgument {
        command: Command::ToggleLineWrap,
        error,
    };
    let wrap = match args.str("mode").map_err(invalid)? {
        Some(mode) => LineWrap::from_name(mode).ok_or_else(|| {
            invalid(ArgError {
                name: "mode".to_string(),
                expected: ArgKind::String,
                found: format!("{mode:?}"),
            })
        })?,
        None if ctx.config.line_wrap == LineWrap::Off => LineWrap::On,
        None => LineWrap::Off,
    };
    update_config(ctx, |config| config.line_wrap = wrap)
}

fn change_tabs(
    ctx: &mut CommandContext<'_>,
    args: &CommandArgs,
) -> Result<CommandOutcome, CommandError> {
    let invalid = |error: ArgError| CommandError::InvalidArgument {
        command: Command::ChangeTabs,
        error,
    };
    let insert_spaces = args.bool("insertSpaces").map_err(invalid)?;
    let size = args.number("size").map_err(invalid)?;
    let (Some(insert_spaces), Some(size)) = (insert_spaces, size) else {
        return Err(CommandError::MissingArgument {
            command: Command::ChangeTabs,
            name: if insert_spaces.is_none() {
                "insertSpaces"
            } else {
                "size"
            },
        });
    };
    update_config(ctx, |config| {
        config.insert_spaces = insert_spaces;
        config.tab_size = tab_size(size);
    })
}

fn toggle_match_brackets(
    ctx: &mut CommandContext<'_>,
    _args: &CommandArgs,
) -> Result<CommandOutcome, CommandError> {
    update_config(ctx, |config| config.match_brackets = !config.match_brackets)
}

fn toggle_auto_closing_brackets(
    ctx: &mut CommandContext<'_>,
    _args: &CommandArgs,
) -> Result<CommandOutcome, CommandError> {
    update_config(ctx, |config| {
        config.auto_closing_brackets = !config.auto_closing_brackets
    })
}

fn create_console(
    ctx: &mut CommandContext<'_>,
    args: &CommandArgs,
) -> Result<CommandOutcome, CommandError> {
    let activate = args
        .bool("activate")
        .map_err(|error| CommandError::InvalidArgument {
            command: Command::CreateConsole,
            error,
        })?
        .unwrap_or(true);
    let Some(doc) = ctx.document.as_deref() else {
        return Err(CommandError::NoActiveDocument(Command::CreateConsole));
    };
    let request = HostRequest::CreateConsole(CreateConsole {
        activate,
        path: doc.path_string(),
        preferred_language: doc.kernel_language().map(str::to_string),
        reference: doc.id().to_string(),
        insert_mode: CONSOLE_INSERT_MODE.to_string(),
    });
    Ok(CommandOutcome::Forwarded(ctx.host.execute(request)))
}

fn inject(host: &dyn Host, doc: &Document, code: String) -> CommandOutcome {
    if code.is_empty() {
        tracing::debug!(path = %doc.path().display(), "nothing to run");
        return CommandOutcome::Skipped;
    }
    let request = HostRequest::InjectCode(InjectCode {
        activate: false,
        code,
        path: doc.path_string(),
    });
    CommandOutcome::Forwarded(host.execute(request))
}

fn run_code(
    ctx: &mut CommandContext<'_>,
    _args: &CommandArgs,
) -> Result<CommandOutcome, CommandError> {
    let Some(doc) = ctx.document.as_deref_mut() else {
        return Err(CommandError::NoActiveDocument(Command::RunCode));
    };
    let extension = doc.extension();
    let snippet = extract_code(doc.buffer_mut(), &extension);
    tracing::debug!(source = ?snippet.source, len = snippet.code.len(), "code extracted");
    Ok(inject(ctx.host, doc, snippet.code))
}

fn run_all_code(
    ctx: &mut CommandContext<'_>,
    _args: &CommandArgs,
) -> Result<CommandOutcome, CommandError> {
    let Some(doc) = ctx.document.as_deref() else {
        return Err(CommandError::NoActiveDocument(Command::RunAllCode));
    };
    let code = extract_all_code(doc.buffer(), &doc.extension());
    Ok(inject(ctx.host, doc, code))
}

fn markdown_preview(
    ctx: &mut CommandContext<'_>,
    _args: &CommandArgs,
) -> Result<CommandOutcome, CommandError> {
    let Some(doc) = ctx.document.as_deref() else {
        return Err(CommandError::NoActiveDocument(Command::MarkdownPreview));
    };
    let request = HostRequest::OpenMarkdownPreview(MarkdownPreview {
        path: doc.path_string(),
        options: PreviewOptions {
            mode: PREVIEW_MODE.to_string(),
        },
    });
    Ok(CommandOutcome::Forwarded(ctx.host.execute(request)))
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/commands.rs"]
mod tests;
