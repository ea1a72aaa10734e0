//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod player;
pub mod segmenter;
pub mod storage;
pub mod tts;

pub use player::*;
pub use segmenter::*;
pub use storage::*;
pub use tts::*;
