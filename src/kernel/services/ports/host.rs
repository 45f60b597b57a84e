//! Contract with the hosting application: requests the editor forwards and
//! the future the host hands back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub type HostFuture = Pin<Box<dyn Future<Output = Result<(), HostError>> + Send + 'static>>;

/// An already-resolved [`HostFuture`].
pub fn resolved(result: Result<(), HostError>) -> HostFuture {
    Box::pin(std::future::ready(result))
}

pub trait Host: Send + Sync {
    /// Forward `request`. The returned future completes when the host has
    /// handled it; callers are free to drop it.
    fn execute(&self, request: HostRequest) -> HostFuture;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    Disconnected,
    Rejected(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Disconnected => write!(f, "host is not accepting requests"),
            HostError::Rejected(reason) => write!(f, "host rejected request: {reason}"),
        }
    }
}

impl std::error::Error for HostError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "args")]
pub enum HostRequest {
    #[serde(rename = "console:inject")]
    InjectCode(InjectCode),
    #[serde(rename = "console:create")]
    CreateConsole(CreateConsole),
    #[serde(rename = "markdownviewer:open")]
    OpenMarkdownPreview(MarkdownPreview),
    #[serde(rename = "docmanager:new-untitled")]
    NewUntitled(NewUntitled),
}

impl HostRequest {
    pub fn command(&self) -> &'static str {
        match self {
            HostRequest::InjectCode(_) => "console:inject",
            HostRequest::CreateConsole(_) => "console:create",
            HostRequest::OpenMarkdownPreview(_) => "markdownviewer:open",
            HostRequest::NewUntitled(_) => "docmanager:new-untitled",
        }
    }
}

/// Send `code` to the console attached to `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectCode {
    pub activate: bool,
    pub code: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsole {
    pub activate: bool,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(rename = "ref")]
    pub reference: String,
    pub insert_mode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownPreview {
    pub path: String,
    pub options: PreviewOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewOptions {
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUntitled {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub ext: String,
    pub factory: String,
}
