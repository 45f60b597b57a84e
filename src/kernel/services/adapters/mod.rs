//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod host;
pub mod paths;
pub mod settings;

pub use host::{host_channel, ChannelHost, HostEnvelope, HostReceiver};
pub use paths::{ensure_log_dir, get_app_dir, get_log_dir};
pub use settings::{get_settings_path, JsonSettingsStore, MemorySettingsStore};
