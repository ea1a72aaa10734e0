//! LongTalker - 长文本朗读工具
//!
//! 命令行入口:
//! - speak: 分段 -> 合成 -> 保存 -> 按顺序播放
//! - split: 只输出分段结果
//! - play: 回放已保存的会话目录
//! - languages: 列出支持的语言

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use longtalker::application::{
    ApplicationError, AudioPlayerPort, PlaySession, PlaySessionHandler, SpeakText,
    SpeakTextHandler, SplitText, SplitTextHandler, StatusTone,
};
use longtalker::config::{load_config_from_path, print_config, AppConfig};
use longtalker::domain::{LanguageCode, DEFAULT_LANGUAGE_CODE, SUPPORTED_LANGUAGES};
use longtalker::infrastructure::adapters::{
    CommandAudioPlayer, FileAudioStorage, GoogleTtsClient, NullAudioPlayer, PunctuationSegmenter,
};
use longtalker::infrastructure::EventPublisher;

/// 没有可朗读内容时的退出码
const EXIT_NOTHING_TO_DO: u8 = 2;

/// Ctrl-C 中断时的退出码
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Debug, Parser)]
#[command(name = "longtalker")]
#[command(about = "Read long text aloud through a cloud text-to-speech service")]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认搜索 longtalker.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Segment, synthesize, save and play text
    Speak(SpeakArgs),
    /// Print the segments text would be split into
    Split(SplitArgs),
    /// Replay the audio files of a saved session directory
    Play {
        /// Session directory containing 001.mp3, 002.mp3, ...
        dir: PathBuf,
    },
    /// List supported languages
    Languages,
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Text to read; falls back to --file, then stdin
    text: Option<String>,

    /// Read text from a file
    #[arg(long, short, conflicts_with = "text")]
    file: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct SpeakArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Language code or label, e.g. `ja` or `日本語 (ja)`
    #[arg(long, short)]
    lang: Option<String>,

    /// Only create the audio files
    #[arg(long)]
    no_play: bool,

    /// Print status events as JSON lines
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct SplitArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Override the configured segment limit
    #[arg(long)]
    max_chars: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志（输出到 stderr，stdout 留给分段和状态）
    let log_filter = format!("{},longtalker={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    print_config(&config);

    match cli.command {
        Commands::Speak(args) => run_speak(&config, args).await,
        Commands::Split(args) => run_split(&config, args).await,
        Commands::Play { dir } => run_play(&config, dir).await,
        Commands::Languages => {
            for lang in SUPPORTED_LANGUAGES {
                let marker = if lang.code == DEFAULT_LANGUAGE_CODE { "*" } else { " " };
                println!("{} {}", marker, lang.display_label());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_speak(config: &AppConfig, args: SpeakArgs) -> anyhow::Result<ExitCode> {
    let text = read_input(&args.input).await?;

    let selection = args.lang.as_deref().unwrap_or(&config.tts.default_language);
    let language = LanguageCode::parse(selection).context("Invalid language selection")?;
    if !language.is_supported() {
        tracing::warn!(language = %language, "Language is not in the supported list, passing through");
    }

    let play = config.playback.enabled && !args.no_play;

    let publisher = Arc::new(EventPublisher::new());
    let printer = spawn_status_printer(&publisher, args.json);

    let tts_engine = Arc::new(
        GoogleTtsClient::new(config.tts.client_config()).context("Failed to create TTS client")?,
    );
    let storage = Arc::new(
        FileAudioStorage::new(&config.storage.audio_dir)
            .await
            .context("Failed to prepare audio directory")?,
    );

    let handler = SpeakTextHandler::new(
        Arc::new(PunctuationSegmenter::new()),
        config.segment.to_segment_config(),
        tts_engine,
        storage,
        build_player(config, play),
        publisher.clone(),
    );

    let command = SpeakText {
        text,
        language,
        play,
    };

    let outcome = tokio::select! {
        result = handler.handle(command) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    // 关闭事件通道，等待状态输出结束
    drop(handler);
    drop(publisher);
    let _ = printer.await;

    match outcome {
        Some(Ok(response)) => {
            tracing::info!(
                session = %response.session.path.display(),
                segments = response.segments.len(),
                "Done"
            );
            Ok(ExitCode::SUCCESS)
        }
        Some(Err(e)) => Ok(exit_code_for(&e)),
        None => {
            tracing::info!("Received shutdown signal");
            Ok(ExitCode::from(EXIT_INTERRUPTED))
        }
    }
}

async fn run_split(config: &AppConfig, args: SplitArgs) -> anyhow::Result<ExitCode> {
    let text = read_input(&args.input).await?;

    let mut segment_config = config.segment.to_segment_config();
    if let Some(max_chars) = args.max_chars {
        segment_config.max_chars = max_chars;
    }

    let handler = SplitTextHandler::new(Arc::new(PunctuationSegmenter::new()));
    let segments = handler
        .handle(SplitText {
            text,
            config: segment_config,
        })
        .context("Failed to split text")?;

    if segments.is_empty() {
        eprintln!("分割可能なテキストが見つかりません");
        return Ok(ExitCode::from(EXIT_NOTHING_TO_DO));
    }

    for segment in &segments {
        println!("{}\t{}", segment.index + 1, segment.content);
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_play(config: &AppConfig, dir: PathBuf) -> anyhow::Result<ExitCode> {
    let publisher = Arc::new(EventPublisher::new());
    let printer = spawn_status_printer(&publisher, false);

    let storage = Arc::new(
        FileAudioStorage::new(&config.storage.audio_dir)
            .await
            .context("Failed to prepare audio directory")?,
    );
    let handler = PlaySessionHandler::new(storage, build_player(config, true), publisher.clone());

    let outcome = tokio::select! {
        result = handler.handle(PlaySession { dir }) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    drop(handler);
    drop(publisher);
    let _ = printer.await;

    match outcome {
        Some(Ok(_)) => Ok(ExitCode::SUCCESS),
        Some(Err(e)) => Ok(exit_code_for(&e)),
        None => Ok(ExitCode::from(EXIT_INTERRUPTED)),
    }
}

fn build_player(config: &AppConfig, play: bool) -> Arc<dyn AudioPlayerPort> {
    if play {
        Arc::new(CommandAudioPlayer::new(config.playback.player_config()))
    } else {
        Arc::new(NullAudioPlayer::new())
    }
}

fn exit_code_for(error: &ApplicationError) -> ExitCode {
    if error.is_nothing_to_do() {
        ExitCode::from(EXIT_NOTHING_TO_DO)
    } else {
        ExitCode::FAILURE
    }
}

/// 读取输入文本：参数 > 文件 > stdin
async fn read_input(input: &InputArgs) -> anyhow::Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }

    if let Some(path) = &input.file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read stdin")?;
    Ok(text)
}

/// 订阅状态事件并输出到终端，通道关闭后结束
fn spawn_status_printer(publisher: &EventPublisher, json: bool) -> JoinHandle<()> {
    let mut rx = publisher.subscribe();
    tokio::spawn(async move {
        loop {
            let event = match rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Status printer lagged");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            if json {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => tracing::warn!(error = %e, "Failed to serialize status event"),
                }
            } else if event.tone() == StatusTone::Error {
                eprintln!("{}", event.message());
            } else {
                println!("{}", event.message());
            }
        }
    })
}
