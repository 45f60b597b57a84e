use super::*;
use crate::kernel::services::adapters::MemorySettingsStore;
use crate::kernel::services::ports::{resolved, HostError, DEFAULT_CODE_FONT_SIZE};
use crate::models::Selection;
use serde_json::json;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingHost {
    requests: Mutex<Vec<HostRequest>>,
}

impl RecordingHost {
    fn requests(&self) -> Vec<HostRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Host for RecordingHost {
    fn execute(&self, request: HostRequest) -> HostFuture {
        self.requests.lock().unwrap().push(request);
        resolved(Ok(()))
    }
}

struct FailingStore;

impl SettingsStore for FailingStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        Ok(Settings::default())
    }

    fn save(&mut self, _settings: &Settings) -> Result<(), SettingsError> {
        Err(SettingsError::NoSettingsDir)
    }
}

struct Harness {
    registry: CommandRegistry,
    config: EditorConfig,
    store: MemorySettingsStore,
    host: RecordingHost,
    document: Option<Document>,
}

impl Harness {
    fn new(document: Option<Document>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            config: EditorConfig::default(),
            store: MemorySettingsStore::default(),
            host: RecordingHost::default(),
            document,
        }
    }

    fn with_doc(path: &str, text: &str) -> Self {
        Self::new(Some(Document::new("editor-1", path, text)))
    }

    fn run(&mut self, command: Command, args: CommandArgs) -> Result<CommandOutcome, CommandError> {
        let mut ctx = CommandContext {
            config: &mut self.config,
            settings: &mut self.store,
            host: &self.host,
            document: self.document.as_mut(),
            cwd: "work",
        };
        self.registry.execute(command, &mut ctx, &args)
    }

    fn doc(&self) -> &Document {
        self.document.as_ref().unwrap()
    }
}

fn block_on(outcome: CommandOutcome) -> Result<(), HostError> {
    match outcome {
        CommandOutcome::Forwarded(pending) => tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(pending),
        other => panic!("expected a forwarded request, got {other:?}"),
    }
}

fn inject(code: &str, path: &str) -> HostRequest {
    HostRequest::InjectCode(InjectCode {
        activate: false,
        code: code.to_string(),
        path: path.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[test]
fn every_command_is_registered_once() {
    let registry = CommandRegistry::new();
    assert_eq!(registry.len(), Command::ALL.len());
    assert_eq!(COMMANDS.len(), Command::ALL.len());
    for command in Command::ALL {
        let spec = registry.spec(command).expect("command registered");
        assert_eq!(spec.command, command);
    }
}

#[test]
fn unknown_id_is_an_error() {
    let mut h = Harness::new(None);
    let mut ctx = CommandContext {
        config: &mut h.config,
        settings: &mut h.store,
        host: &h.host,
        document: None,
        cwd: "",
    };
    let err = h
        .registry
        .execute_id("fileeditor:nope", &mut ctx, &CommandArgs::new())
        .unwrap_err();
    assert!(matches!(err, CommandError::UnknownCommand(id) if id == "fileeditor:nope"));
}

#[test]
fn execute_by_id() {
    let mut h = Harness::with_doc("a.py", "x = 1\n");
    let mut ctx = CommandContext {
        config: &mut h.config,
        settings: &mut h.store,
        host: &h.host,
        document: h.document.as_mut(),
        cwd: "",
    };
    let outcome = h
        .registry
        .execute_id("fileeditor:run-code", &mut ctx, &CommandArgs::new())
        .unwrap();
    assert!(block_on(outcome).is_ok());
    assert_eq!(h.host.requests(), vec![inject("x = 1", "a.py")]);
}

#[test]
fn labels() {
    let registry = CommandRegistry::new();
    let palette = CommandArgs::new().with("isPalette", true);

    assert_eq!(registry.label(Command::CreateNew, &palette), "New Text File");
    assert_eq!(registry.label(Command::CreateNew, &CommandArgs::new()), "Text File");
    assert_eq!(
        registry.label(Command::CreateNewMarkdown, &palette),
        "New Markdown File"
    );
    assert_eq!(
        registry.label(Command::ChangeFontSize, &CommandArgs::new().with("delta", 1)),
        "Increase Text Editor Font Size"
    );
    assert_eq!(
        registry.label(Command::ChangeFontSize, &CommandArgs::new().with("delta", -1)),
        "Decrease Text Editor Font Size"
    );
    assert_eq!(
        registry.label(
            Command::ChangeTabs,
            &CommandArgs::new().with("insertSpaces", true).with("size", 2)
        ),
        "Spaces: 2"
    );
    assert_eq!(
        registry.label(
            Command::ChangeTabs,
            &CommandArgs::new().with("insertSpaces", false).with("size", 4)
        ),
        "Indent with Tab"
    );
    assert_eq!(
        registry.label(Command::RunAllCode, &CommandArgs::new()),
        "Run All Code"
    );
}

#[test]
fn enablement_follows_requirements() {
    let registry = CommandRegistry::new();
    let py = Document::new("1", "a.py", "");
    let md = Document::new("2", "b.md", "");

    assert!(registry.is_enabled(Command::CreateNew, None));
    assert!(registry.is_enabled(Command::ToggleLineNumbers, None));
    assert!(!registry.is_enabled(Command::RunCode, None));
    assert!(registry.is_enabled(Command::RunCode, Some(&py)));
    assert!(!registry.is_enabled(Command::MarkdownPreview, Some(&py)));
    assert!(registry.is_enabled(Command::MarkdownPreview, Some(&md)));
}

// ---------------------------------------------------------------------------
// Configuration commands
// ---------------------------------------------------------------------------

#[test]
fn change_font_size_from_default_and_persists() {
    let mut h = Harness::new(None);

    let outcome = h
        .run(Command::ChangeFontSize, CommandArgs::new().with("delta", 1))
        .unwrap();
    assert!(matches!(outcome, CommandOutcome::ConfigChanged));
    assert_eq!(h.config.font_size, Some(DEFAULT_CODE_FONT_SIZE + 1));

    h.run(Command::ChangeFontSize, CommandArgs::new().with("delta", "-3"))
        .unwrap();
    assert_eq!(h.config.font_size, Some(DEFAULT_CODE_FONT_SIZE - 2));

    assert_eq!(h.store.saves(), 2);
    assert_eq!(h.store.settings().editor_config, h.config);
}

#[test]
fn change_font_size_never_goes_below_one() {
    let mut h = Harness::new(None);
    h.run(Command::ChangeFontSize, CommandArgs::new().with("delta", -100))
        .unwrap();
    assert_eq!(h.config.font_size, Some(1));
}

#[test]
fn change_font_size_rejects_bad_delta_without_mutation() {
    let mut h = Harness::new(None);

    let err = h
        .run(Command::ChangeFontSize, CommandArgs::new().with("delta", "bigger"))
        .unwrap_err();
    assert!(matches!(
        err,
        CommandError::InvalidArgument {
            command: Command::ChangeFontSize,
            ..
        }
    ));

    let err = h
        .run(Command::ChangeFontSize, CommandArgs::new())
        .unwrap_err();
    assert!(matches!(
        err,
        CommandError::MissingArgument { name: "delta", .. }
    ));

    assert_eq!(h.config, EditorConfig::default());
    assert_eq!(h.store.saves(), 0);
}

#[test]
fn toggles_flip_and_persist() {
    let mut h = Harness::new(None);
    let registry = CommandRegistry::new();
    let none = CommandArgs::new();

    assert!(registry.is_toggled(Command::ToggleLineNumbers, &h.config, &none));
    h.run(Command::ToggleLineNumbers, CommandArgs::new()).unwrap();
    assert!(!h.config.line_numbers);
    assert!(!registry.is_toggled(Command::ToggleLineNumbers, &h.config, &none));

    h.run(Command::ToggleMatchBrackets, CommandArgs::new()).unwrap();
    assert!(!h.config.match_brackets);

    h.run(Command::ToggleAutoClosingBrackets, CommandArgs::new())
        .unwrap();
    h.run(Command::ToggleAutoClosingBrackets, CommandArgs::new())
        .unwrap();
    assert!(h.config.auto_closing_brackets);

    assert_eq!(h.store.saves(), 4);
    assert_eq!(h.store.settings().editor_config, h.config);
}

#[test]
fn toggle_line_wrap_flips_or_sets_mode() {
    let mut h = Harness::new(None);
    let registry = CommandRegistry::new();

    h.run(Command::ToggleLineWrap, CommandArgs::new()).unwrap();
    assert_eq!(h.config.line_wrap, LineWrap::Off);
    h.run(Command::ToggleLineWrap, CommandArgs::new()).unwrap();
    assert_eq!(h.config.line_wrap, LineWrap::On);

    let bounded = CommandArgs::new().with("mode", "bounded");
    assert!(!registry.is_toggled(Command::ToggleLineWrap, &h.config, &bounded));
    h.run(Command::ToggleLineWrap, bounded.clone()).unwrap();
    assert_eq!(h.config.line_wrap, LineWrap::Bounded);
    assert!(registry.is_toggled(Command::ToggleLineWrap, &h.config, &bounded));

    let err = h
        .run(Command::ToggleLineWrap, CommandArgs::new().with("mode", "diagonal"))
        .unwrap_err();
    assert!(matches!(err, CommandError::InvalidArgument { .. }));
    assert_eq!(h.config.line_wrap, LineWrap::Bounded);
}

#[test]
fn change_tabs_sets_both_fields() {
    let mut h = Harness::new(None);
    let registry = CommandRegistry::new();
    let tabs = CommandArgs::new()
        .with("insertSpaces", false)
        .with("size", 8)
        .with("name", "Indent with Tab");

    assert!(!registry.is_toggled(Command::ChangeTabs, &h.config, &tabs));
    h.run(Command::ChangeTabs, tabs.clone()).unwrap();
    assert!(!h.config.insert_spaces);
    assert_eq!(h.config.tab_size, 8);
    assert!(registry.is_toggled(Command::ChangeTabs, &h.config, &tabs));
    assert_eq!(registry.label(Command::ChangeTabs, &tabs), "Indent with Tab");
}

#[test]
fn change_tabs_requires_arguments() {
    let mut h = Harness::new(None);
    let err = h
        .run(Command::ChangeTabs, CommandArgs::new().with("size", 2))
        .unwrap_err();
    assert!(matches!(
        err,
        CommandError::MissingArgument {
            name: "insertSpaces",
            ..
        }
    ));
    assert_eq!(h.store.saves(), 0);
}

#[test]
fn failed_save_leaves_config_untouched() {
    let registry = CommandRegistry::new();
    let mut config = EditorConfig::default();
    let mut store = FailingStore;
    let host = RecordingHost::default();
    let mut ctx = CommandContext {
        config: &mut config,
        settings: &mut store,
        host: &host,
        document: None,
        cwd: "",
    };

    let err = registry
        .execute(Command::ToggleLineNumbers, &mut ctx, &CommandArgs::new())
        .unwrap_err();
    assert!(matches!(err, CommandError::Settings(_)));
    assert!(config.line_numbers);
}

// ---------------------------------------------------------------------------
// Host-forwarding commands
// ---------------------------------------------------------------------------

#[test]
fn run_code_markdown_block() {
    let mut h = Harness::with_doc("notes.md", "line1\n```py\nprint(1)\n```\nline2");
    h.document.as_mut().unwrap().buffer_mut().set_cursor(2, 0);

    let outcome = h.run(Command::RunCode, CommandArgs::new()).unwrap();
    assert!(block_on(outcome).is_ok());
    assert_eq!(h.host.requests(), vec![inject("print(1)\n", "notes.md")]);
    assert_eq!(h.doc().buffer().cursor(), (2, 0));
}

#[test]
fn run_code_selection() {
    let mut h = Harness::with_doc("a.py", "a = 1\nb = 2\n");
    h.document
        .as_mut()
        .unwrap()
        .buffer_mut()
        .set_selection(Some(Selection::new((0, 0), (1, 5))));

    let outcome = h.run(Command::RunCode, CommandArgs::new()).unwrap();
    assert!(block_on(outcome).is_ok());
    assert_eq!(h.host.requests(), vec![inject("a = 1\nb = 2", "a.py")]);
}

#[test]
fn run_code_line_advances_cursor() {
    let mut h = Harness::with_doc("a.py", "a = 1\nb = 2");
    h.run(Command::RunCode, CommandArgs::new()).unwrap();
    h.run(Command::RunCode, CommandArgs::new()).unwrap();

    assert_eq!(
        h.host.requests(),
        vec![inject("a = 1", "a.py"), inject("b = 2", "a.py")]
    );
    assert_eq!(h.doc().buffer().text(), "a = 1\nb = 2\n");
    assert_eq!(h.doc().buffer().cursor(), (2, 0));
}

#[test]
fn run_code_empty_line_is_skipped() {
    let mut h = Harness::with_doc("a.py", "\nx = 1");
    let outcome = h.run(Command::RunCode, CommandArgs::new()).unwrap();

    assert!(matches!(outcome, CommandOutcome::Skipped));
    assert!(h.host.requests().is_empty());
    assert_eq!(h.doc().buffer().cursor(), (1, 0));
}

#[test]
fn run_code_without_document_fails() {
    let mut h = Harness::new(None);
    let err = h.run(Command::RunCode, CommandArgs::new()).unwrap_err();
    assert!(matches!(err, CommandError::NoActiveDocument(Command::RunCode)));
}

#[test]
fn run_all_markdown_and_plain() {
    let mut h = Harness::with_doc("doc.md", "```\na()\n```\ntext\n```\nb()\n```\n");
    let outcome = h.run(Command::RunAllCode, CommandArgs::new()).unwrap();
    assert!(block_on(outcome).is_ok());
    assert_eq!(h.host.requests(), vec![inject("a()\nb()\n", "doc.md")]);

    let mut h = Harness::with_doc("doc.py", "a()\nb()\n");
    h.run(Command::RunAllCode, CommandArgs::new()).unwrap();
    assert_eq!(h.host.requests(), vec![inject("a()\nb()\n", "doc.py")]);
    assert_eq!(h.doc().buffer().cursor(), (0, 0));
}

#[test]
fn run_all_markdown_without_blocks_is_skipped() {
    let mut h = Harness::with_doc("doc.md", "only prose");
    let outcome = h.run(Command::RunAllCode, CommandArgs::new()).unwrap();
    assert!(matches!(outcome, CommandOutcome::Skipped));
}

#[test]
fn create_console_request() {
    let mut h = Harness::new(Some(
        Document::new("editor-7", "src/a.py", "").with_kernel_language("python"),
    ));
    h.run(Command::CreateConsole, CommandArgs::new()).unwrap();
    h.run(Command::CreateConsole, CommandArgs::new().with("activate", false))
        .unwrap();

    let requests = h.host.requests();
    assert_eq!(
        serde_json::to_value(&requests[0]).unwrap(),
        json!({
            "command": "console:create",
            "args": {
                "activate": true,
                "path": "src/a.py",
                "preferredLanguage": "python",
                "ref": "editor-7",
                "insertMode": "split-bottom"
            }
        })
    );
    assert!(matches!(
        &requests[1],
        HostRequest::CreateConsole(CreateConsole { activate: false, .. })
    ));
}

#[test]
fn markdown_preview_only_for_markdown() {
    let mut h = Harness::with_doc("a.py", "");
    let err = h.run(Command::MarkdownPreview, CommandArgs::new()).unwrap_err();
    assert!(matches!(err, CommandError::NotMarkdown(_)));

    let mut h = Harness::with_doc("README.md", "# hi");
    h.run(Command::MarkdownPreview, CommandArgs::new()).unwrap();
    assert_eq!(
        h.host.requests(),
        vec![HostRequest::OpenMarkdownPreview(MarkdownPreview {
            path: "README.md".to_string(),
            options: PreviewOptions {
                mode: "split-right".to_string()
            },
        })]
    );
}

#[test]
fn create_new_files_in_cwd() {
    let mut h = Harness::new(None);
    h.run(Command::CreateNew, CommandArgs::new()).unwrap();
    h.run(Command::CreateNewMarkdown, CommandArgs::new().with("isPalette", true))
        .unwrap();

    let exts: Vec<_> = h
        .host
        .requests()
        .into_iter()
        .map(|request| match request {
            HostRequest::NewUntitled(new) => {
                assert_eq!(new.path, "work");
                assert_eq!(new.kind, "file");
                assert_eq!(new.factory, "Editor");
                new.ext
            }
            other => panic!("unexpected request {other:?}"),
        })
        .collect();
    assert_eq!(exts, vec!["txt".to_string(), "md".to_string()]);
}

#[test]
fn wrong_argument_type_is_rejected_before_handler() {
    let mut h = Harness::with_doc("a.py", "x");
    let err = h
        .run(Command::CreateConsole, CommandArgs::new().with("activate", "yes"))
        .unwrap_err();
    assert!(matches!(err, CommandError::InvalidArgument { .. }));
    assert!(h.host.requests().is_empty());
}
