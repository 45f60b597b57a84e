use crate::kernel::services::ports::{Settings, SettingsError, SettingsStore};
use std::path::{Path, PathBuf};

use super::paths::get_app_dir;

const SETTINGS_FILE: &str = "settings.json";

pub fn get_settings_path() -> Option<PathBuf> {
    get_app_dir().map(|dir| dir.join(SETTINGS_FILE))
}

/// 以格式化 JSON 持久化设置；文件不存在时读取为默认值
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 默认位置：用户缓存目录下的应用数据目录
    pub fn open_default() -> Result<Self, SettingsError> {
        get_settings_path()
            .map(Self::new)
            .ok_or(SettingsError::NoSettingsDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "settings file missing, using defaults");
            return Ok(Settings::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        let settings = serde_json::from_str(&data)?;
        Ok(settings)
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, content)?;
        tracing::info!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// 进程内存储：保留最后一次保存的设置并统计保存次数
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Settings,
    saves: usize,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self { settings, saves: 0 }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        Ok(self.settings.clone())
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        self.settings = settings.clone();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
