//! 核心抽象
//!
//! - Command: 命令枚举及其宿主 ID
//! - CommandArgs: 命令参数（JSON 对象）及参数模式

pub mod args;
pub mod command;

pub use args::{ArgError, ArgKind, ArgSpec, ArgValue, CommandArgs};
pub use command::Command;
