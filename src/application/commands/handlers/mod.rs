//! Command Handlers 实现

mod speak_handlers;
mod split_handlers;

pub use speak_handlers::*;
pub use split_handlers::*;
