//! fileeditor - 文本编辑器命令层库
//!
//! 模块结构：
//! - core: 命令标识与参数（Command, CommandArgs）
//! - models: 数据模型（TextBuffer, Selection）
//! - kernel: 无界面内核（命令注册表、代码提取、宿主与设置服务）

pub mod core;
pub mod kernel;
pub mod models;
