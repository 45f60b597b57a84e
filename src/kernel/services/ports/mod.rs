//! Service ports: traits + data contracts.

pub mod config;
pub mod host;
pub mod settings;

pub use config::{EditorConfig, LineWrap, DEFAULT_CODE_FONT_SIZE};
pub use host::{
    resolved, CreateConsole, Host, HostError, HostFuture, HostRequest, InjectCode,
    MarkdownPreview, NewUntitled, PreviewOptions,
};
pub use settings::{Settings, SettingsError, SettingsStore};
