mod logging;

use std::fmt;
use std::process::ExitCode;

use fileeditor::core::{Command, CommandArgs};
use fileeditor::models::Selection;
use fileeditor::kernel::services::adapters::{host_channel, HostReceiver, JsonSettingsStore};
use fileeditor::kernel::services::ports::{HostError, SettingsError, SettingsStore};
use fileeditor::kernel::{
    CommandContext, CommandError, CommandOutcome, CommandRegistry, Document, COMMANDS,
};

const USAGE: &str = "\
usage: fileeditor [--verbose] [--language=<name>] <command>

commands:
  run <path> [line] [column] [anchor-line] [anchor-column]
                                        run the selection from the anchor to the cursor,
                                        or the code at the cursor (zero-based positions)
  run-all <path>                        run every code block, or the whole file
  exec <command-id> [json-args] [path]  execute a registered command
  commands                              list registered commands and toggle states";

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(std::io::Error),
    Settings(SettingsError),
    Command(CommandError),
    Host(HostError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Settings(e) => write!(f, "{e}"),
            CliError::Command(e) => write!(f, "{e}"),
            CliError::Host(e) => write!(f, "{e}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<SettingsError> for CliError {
    fn from(e: SettingsError) -> Self {
        CliError::Settings(e)
    }
}

impl From<CommandError> for CliError {
    fn from(e: CommandError) -> Self {
        CliError::Command(e)
    }
}

impl From<HostError> for CliError {
    fn from(e: HostError) -> Self {
        CliError::Host(e)
    }
}

#[derive(Default)]
struct Options {
    verbose: bool,
    language: Option<String>,
}

fn main() -> ExitCode {
    let mut options = Options::default();
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--verbose" {
            options.verbose = true;
        } else if let Some(value) = arg.strip_prefix("--language=") {
            options.language = Some(value.to_string());
        } else {
            positional.push(arg);
        }
    }

    let _logging = logging::init(options.verbose);

    match run(&options, &positional) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(msg)) => {
            eprintln!("fileeditor: {msg}\n\n{USAGE}");
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!(error = %e, "fileeditor failed");
            eprintln!("fileeditor: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options, args: &[String]) -> Result<(), CliError> {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CliError::Usage("missing command".to_string()));
    };

    match subcommand.as_str() {
        "commands" => list_commands(),
        "run" => {
            let path = required(rest, 0, "path")?;
            let line = parse_index(rest.get(1), "line")?;
            let column = parse_index(rest.get(2), "column")?;
            let mut document = open_document(path, options)?;
            document.buffer_mut().set_cursor(line, column);
            if rest.len() > 3 {
                let anchor = (
                    parse_index(rest.get(3), "anchor-line")?,
                    parse_index(rest.get(4), "anchor-column")?,
                );
                let cursor = document.buffer().cursor();
                let anchor = document.buffer().clamp_pos(anchor);
                document
                    .buffer_mut()
                    .set_selection(Some(Selection::new(anchor, cursor)));
            }
            dispatch(Command::RunCode.id(), &CommandArgs::new(), Some(document))
        }
        "run-all" => {
            let path = required(rest, 0, "path")?;
            let document = open_document(path, options)?;
            dispatch(Command::RunAllCode.id(), &CommandArgs::new(), Some(document))
        }
        "exec" => {
            let id = required(rest, 0, "command-id")?;
            let args = match rest.get(1) {
                Some(json) => parse_args(json)?,
                None => CommandArgs::new(),
            };
            let document = rest
                .get(2)
                .map(|path| open_document(path, options))
                .transpose()?;
            dispatch(id, &args, document)
        }
        other => Err(CliError::Usage(format!("unknown command: {other}"))),
    }
}

fn required<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, CliError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("missing <{name}>")))
}

fn parse_index(value: Option<&String>, name: &str) -> Result<usize, CliError> {
    match value {
        None => Ok(0),
        Some(value) => value
            .parse()
            .map_err(|_| CliError::Usage(format!("<{name}> must be a non-negative integer"))),
    }
}

fn parse_args(json: &str) -> Result<CommandArgs, CliError> {
    serde_json::from_str(json)
        .ok()
        .and_then(CommandArgs::from_json)
        .ok_or_else(|| CliError::Usage(format!("arguments must be a JSON object: {json}")))
}

fn open_document(path: &str, options: &Options) -> Result<Document, CliError> {
    let text = std::fs::read_to_string(path)?;
    let document = Document::new(path, path, &text);
    Ok(match &options.language {
        Some(language) => document.with_kernel_language(language.as_str()),
        None => document,
    })
}

fn list_commands() -> Result<(), CliError> {
    let config = JsonSettingsStore::open_default()?.load()?.editor_config;
    let args = CommandArgs::new();
    for spec in COMMANDS {
        let state = match (spec.is_toggleable(), spec.is_toggled(&config, &args)) {
            (false, _) => "",
            (true, true) => " [on]",
            (true, false) => " [off]",
        };
        println!("{:<40} {}{state}", spec.command.id(), spec.label(&args));
    }
    Ok(())
}

/// Prints each forwarded request as one JSON line and acknowledges it.
async fn print_requests(mut receiver: HostReceiver) {
    while let Some(envelope) = receiver.recv().await {
        let result = match serde_json::to_string(&envelope.request) {
            Ok(line) => {
                println!("{line}");
                Ok(())
            }
            Err(e) => Err(HostError::Rejected(e.to_string())),
        };
        envelope.reply(result);
    }
}

fn dispatch(
    id: &str,
    args: &CommandArgs,
    mut document: Option<Document>,
) -> Result<(), CliError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .build()
        .or_else(|e| {
            tracing::error!(
                error = %e,
                "Failed to create multi-thread tokio runtime, falling back to current-thread"
            );
            tokio::runtime::Builder::new_current_thread().build()
        })?;

    let mut settings = JsonSettingsStore::open_default()?;
    let mut config = settings.load()?.editor_config;
    let cwd = std::env::current_dir()?.to_string_lossy().into_owned();

    let (host, receiver) = host_channel();
    let printer = runtime.spawn(print_requests(receiver));

    let registry = CommandRegistry::new();
    let outcome = {
        let mut ctx = CommandContext {
            config: &mut config,
            settings: &mut settings,
            host: &host,
            document: document.as_mut(),
            cwd: &cwd,
        };
        registry.execute_id(id, &mut ctx, args)?
    };

    if let Some(doc) = document.as_ref() {
        let (row, col) = doc.buffer().cursor();
        tracing::info!(path = %doc.path().display(), row, col, "cursor after command");
    }

    let result = match outcome {
        CommandOutcome::Forwarded(reply) => runtime.block_on(reply).map_err(CliError::from),
        CommandOutcome::ConfigChanged => {
            tracing::info!(path = %settings.path().display(), "configuration updated");
            Ok(())
        }
        CommandOutcome::Skipped => Ok(()),
    };

    drop(host);
    if let Err(e) = runtime.block_on(printer) {
        tracing::warn!(error = %e, "request printer stopped");
    }
    result
}
