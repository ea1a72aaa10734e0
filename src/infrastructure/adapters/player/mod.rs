//! Player Adapter - 音频播放实现

mod command_player;
mod null_player;

pub use command_player::{CommandAudioPlayer, CommandAudioPlayerConfig};
pub use null_player::NullAudioPlayer;
