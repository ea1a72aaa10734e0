//! Integration tests for the speak pipeline (segment -> synthesize -> save -> play)

use std::sync::Arc;

use tempfile::tempdir;
use tokio::sync::broadcast;

use longtalker::application::{
    ApplicationError, PlaySession, PlaySessionHandler, SpeakText, SpeakTextHandler, StatusEvent,
};
use longtalker::domain::{LanguageCode, SegmentConfig};
use longtalker::infrastructure::adapters::{
    FakeTtsClient, FakeTtsClientConfig, FileAudioStorage, NullAudioPlayer, PunctuationSegmenter,
};
use longtalker::infrastructure::EventPublisher;

struct Pipeline {
    handler: SpeakTextHandler,
    tts: Arc<FakeTtsClient>,
    player: Arc<NullAudioPlayer>,
    events: broadcast::Receiver<StatusEvent>,
}

async fn pipeline(
    audio_dir: &std::path::Path,
    max_chars: usize,
    tts_config: FakeTtsClientConfig,
) -> Pipeline {
    let publisher = Arc::new(EventPublisher::with_capacity(256));
    let events = publisher.subscribe();
    let tts = Arc::new(FakeTtsClient::new(tts_config));
    let player = Arc::new(NullAudioPlayer::new());
    let storage = Arc::new(FileAudioStorage::new(audio_dir).await.unwrap());

    let handler = SpeakTextHandler::new(
        Arc::new(PunctuationSegmenter::new()),
        SegmentConfig::with_max_chars(max_chars),
        tts.clone(),
        storage,
        player.clone(),
        publisher,
    );

    Pipeline {
        handler,
        tts,
        player,
        events,
    }
}

fn drain(rx: &mut broadcast::Receiver<StatusEvent>) -> Vec<StatusEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn speak(text: &str, play: bool) -> SpeakText {
    SpeakText {
        text: text.to_string(),
        language: LanguageCode::parse("日本語 (ja)").unwrap(),
        play,
    }
}

/// Each segment is synthesized once, in order, and saved as a numbered file
#[tokio::test]
async fn test_speak_synthesizes_saves_and_plays_in_order() {
    let dir = tempdir().unwrap();
    let mut p = pipeline(dir.path(), 10, FakeTtsClientConfig::default()).await;

    let response = p
        .handler
        .handle(speak("これは文です。これは別の文です。最後。", true))
        .await
        .unwrap();

    let contents: Vec<&str> = response.segments.iter().map(|s| s.content.as_str()).collect();
    assert_eq!(contents, vec!["これは文です。", "これは別の文です。", "最後。"]);

    let requested: Vec<String> = p.tts.requests().into_iter().map(|r| r.text).collect();
    assert_eq!(requested, contents);
    assert!(p.tts.requests().iter().all(|r| r.language.as_str() == "ja"));

    let names: Vec<String> = response
        .files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["001.mp3", "002.mp3", "003.mp3"]);
    assert!(response.files.iter().all(|f| f.starts_with(&response.session.path)));
    assert!(response.session.path.starts_with(dir.path()));
    assert!(response.played);
    assert_eq!(p.player.played(), response.files);

    let dir_display = response.session.path.display().to_string();
    let events = drain(&mut p.events);
    assert_eq!(
        events,
        vec![
            StatusEvent::Segmenting,
            StatusEvent::Segmented { total: 3 },
            StatusEvent::Synthesizing { index: 0, total: 3 },
            StatusEvent::Synthesizing { index: 1, total: 3 },
            StatusEvent::Synthesizing { index: 2, total: 3 },
            StatusEvent::Synthesized {
                count: 3,
                dir: dir_display.clone(),
            },
            StatusEvent::Playing {
                index: 0,
                total: 3,
                file_name: "001.mp3".to_string(),
            },
            StatusEvent::Playing {
                index: 1,
                total: 3,
                file_name: "002.mp3".to_string(),
            },
            StatusEvent::Playing {
                index: 2,
                total: 3,
                file_name: "003.mp3".to_string(),
            },
            StatusEvent::Completed { dir: dir_display },
        ]
    );
}

/// Without playback the files are still written but nothing is played
#[tokio::test]
async fn test_speak_without_playback() {
    let dir = tempdir().unwrap();
    let mut p = pipeline(dir.path(), 300, FakeTtsClientConfig::default()).await;

    let response = p.handler.handle(speak("短い文。", false)).await.unwrap();
    assert_eq!(response.files.len(), 1);
    assert!(!response.played);
    assert!(p.player.played().is_empty());
    assert_eq!(
        tokio::fs::read(&response.files[0]).await.unwrap(),
        FakeTtsClientConfig::default().audio_data
    );

    let events = drain(&mut p.events);
    assert!(matches!(events.last(), Some(StatusEvent::Synthesized { count: 1, .. })));
    assert!(!events.iter().any(|e| matches!(e, StatusEvent::Playing { .. })));
}

/// Whitespace-only input is reported as "no input", not as a failure
#[tokio::test]
async fn test_whitespace_input_reports_no_input() {
    let dir = tempdir().unwrap();
    let mut p = pipeline(dir.path(), 300, FakeTtsClientConfig::default()).await;

    let err = p.handler.handle(speak("   \n ", true)).await.unwrap_err();
    assert!(matches!(err, ApplicationError::EmptyInput));
    assert!(err.is_nothing_to_do());
    assert!(p.tts.requests().is_empty());
    assert_eq!(drain(&mut p.events), vec![StatusEvent::NoInput]);
}

/// Input made only of terminators segments to nothing
#[tokio::test]
async fn test_terminator_only_input_has_nothing_to_synthesize() {
    let dir = tempdir().unwrap();
    let mut p = pipeline(dir.path(), 300, FakeTtsClientConfig::default()).await;

    let err = p.handler.handle(speak("。。。", true)).await.unwrap_err();
    assert!(matches!(err, ApplicationError::NothingToSynthesize));
    assert_eq!(
        drain(&mut p.events),
        vec![StatusEvent::Segmenting, StatusEvent::NothingToSynthesize]
    );

    // 没有创建会话目录
    let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}

/// A synthesis failure stops the pipeline and is published as a failure
#[tokio::test]
async fn test_synthesis_failure_is_published() {
    let dir = tempdir().unwrap();
    let mut p = pipeline(
        dir.path(),
        5,
        FakeTtsClientConfig {
            fail_on_call: Some(1),
            ..Default::default()
        },
    )
    .await;

    let err = p
        .handler
        .handle(speak("一文目。二文目。三文目。", true))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Synthesis(_)));
    assert!(!err.is_retryable());
    assert_eq!(p.tts.requests().len(), 2);
    assert!(p.player.played().is_empty());

    let events = drain(&mut p.events);
    assert!(matches!(events.last(), Some(StatusEvent::Failed { .. })));
    assert!(!events.iter().any(|e| matches!(e, StatusEvent::Synthesized { .. })));
}

/// Long text without terminators is hard-cut to the limit
#[tokio::test]
async fn test_long_run_is_split_to_limit() {
    let dir = tempdir().unwrap();
    let p = pipeline(dir.path(), 300, FakeTtsClientConfig::default()).await;

    let text = "あ".repeat(700);
    let response = p.handler.handle(speak(&text, false)).await.unwrap();
    let lengths: Vec<usize> = response
        .segments
        .iter()
        .map(|s| s.content.chars().count())
        .collect();
    assert_eq!(lengths, vec![300, 300, 100]);
    assert_eq!(response.files.len(), 3);
}

/// A saved session can be replayed in file order
#[tokio::test]
async fn test_replay_saved_session() {
    let dir = tempdir().unwrap();
    let p = pipeline(dir.path(), 4, FakeTtsClientConfig::default()).await;
    let response = p
        .handler
        .handle(speak("一つ。二つ。三つ。", false))
        .await
        .unwrap();

    let publisher = Arc::new(EventPublisher::new());
    let mut events = publisher.subscribe();
    let player = Arc::new(NullAudioPlayer::new());
    let replay = PlaySessionHandler::new(
        Arc::new(FileAudioStorage::new(dir.path()).await.unwrap()),
        player.clone(),
        publisher,
    );

    let played = replay
        .handle(PlaySession {
            dir: response.session.path.clone(),
        })
        .await
        .unwrap();
    assert_eq!(played, response.files);
    assert_eq!(player.played(), response.files);

    let events = drain(&mut events);
    assert_eq!(events.len(), 4);
    assert!(matches!(events.last(), Some(StatusEvent::Completed { .. })));
}

/// Replaying a missing directory is a storage failure
#[tokio::test]
async fn test_replay_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let replay = PlaySessionHandler::new(
        Arc::new(FileAudioStorage::new(dir.path()).await.unwrap()),
        Arc::new(NullAudioPlayer::new()),
        Arc::new(EventPublisher::new()),
    );

    let err = replay
        .handle(PlaySession {
            dir: dir.path().join("missing"),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Storage(_)));
    assert!(!err.is_nothing_to_do());
}
