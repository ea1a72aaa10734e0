//! 应用层 - 命令
//!
//! 所有用例都以命令 + 处理器的形式组织

mod speak_commands;

pub mod handlers;

pub use speak_commands::*;
