//! End-to-end pipeline runs against a fake inference executable and a
//! recording speech engine.
#![cfg(unix)]

use async_trait::async_trait;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use sightspeak_agents::AgentRegistry;
use sightspeak_core::{SightSpeakError, UNCLEAN_SENTINEL};
use sightspeak_inference::{InferenceConfig, Invoker};
use sightspeak_pipeline::Pipeline;
use sightspeak_speech::{SpeechEngine, Voice};

const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0 fake jpeg payload";

fn fake_executable(dir: &Path, script: &str) -> PathBuf {
    let path = dir.join("fake-llava");
    std::fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[derive(Debug, Clone)]
struct Spoken {
    text: String,
    voice: Option<usize>,
    rate: u32,
}

#[derive(Default)]
struct RecordingEngine {
    spoken: Mutex<Vec<Spoken>>,
    fail: bool,
}

impl RecordingEngine {
    fn failing() -> Self {
        Self {
            spoken: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn recorded(&self) -> Vec<Spoken> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechEngine for RecordingEngine {
    fn default_rate(&self) -> u32 {
        200
    }

    async fn voices(&self) -> Result<Vec<Voice>, SightSpeakError> {
        Ok(vec![Voice {
            index: 0,
            id: "en-us".to_string(),
            name: "English_(America)".to_string(),
        }])
    }

    async fn speak(
        &self,
        text: &str,
        voice: Option<&Voice>,
        rate: u32,
    ) -> Result<(), SightSpeakError> {
        if self.fail {
            return Err(SightSpeakError::AudioRender("no audio device".to_string()));
        }
        self.spoken.lock().unwrap().push(Spoken {
            text: text.to_string(),
            voice: voice.map(|v| v.index),
            rate,
        });
        Ok(())
    }
}

fn pipeline_with(exec: PathBuf, engine: Arc<RecordingEngine>) -> Pipeline {
    Pipeline::new(
        AgentRegistry::builtin(),
        Invoker::new(InferenceConfig::new(exec, "model.gguf", "mmproj.gguf")),
        Some(engine),
    )
}

#[tokio::test]
async fn narrates_an_eiffel_tower_photo() {
    let dir = TempDir::new().unwrap();
    let exec = fake_executable(
        dir.path(),
        r#"printf 'loading...\n\nThe Eiffel Tower stands tall.\n\nmain: total time = 123ms\n'"#,
    );
    let engine = Arc::new(RecordingEngine::default());
    let pipeline = pipeline_with(exec, engine.clone());

    let output = pipeline
        .run(JPEG_BYTES, "eiffel.jpg", "Paris Tourist Guide")
        .await
        .unwrap();

    assert_eq!(output.display_text, "The Eiffel Tower stands tall.");
    assert_eq!(output.spoken_text, "The Eiffel Tower stands tall.");
    assert!(output.answer_clean);
    assert!(output.audio_error.is_none());

    let spoken = engine.recorded();
    assert_eq!(spoken.len(), 1);
    assert_eq!(spoken[0].text, "The Eiffel Tower stands tall.");
    // Persona voice selector is -1 -> engine default voice.
    assert_eq!(spoken[0].voice, None);
    assert_eq!(spoken[0].rate, 200 - 20);
}

#[tokio::test]
async fn failed_inference_skips_extraction_and_speech() {
    let dir = TempDir::new().unwrap();
    let exec = fake_executable(dir.path(), "echo 'gpu meltdown' >&2\nexit 1");
    let engine = Arc::new(RecordingEngine::default());
    let pipeline = pipeline_with(exec, engine.clone());

    let err = pipeline
        .run(JPEG_BYTES, "eiffel.jpg", "Paris Tourist Guide")
        .await
        .unwrap_err();

    match err {
        SightSpeakError::InferenceFailed { stderr, .. } => {
            assert!(stderr.contains("gpu meltdown"));
        }
        other => panic!("expected InferenceFailed, got {other:?}"),
    }
    assert!(engine.recorded().is_empty());
}

#[tokio::test]
async fn empty_output_is_an_inference_failure() {
    let dir = TempDir::new().unwrap();
    let exec = fake_executable(dir.path(), "exit 0");
    let engine = Arc::new(RecordingEngine::default());
    let pipeline = pipeline_with(exec, engine.clone());

    let err = pipeline
        .run(JPEG_BYTES, "eiffel.jpg", "Paris Tourist Guide")
        .await
        .unwrap_err();
    assert!(matches!(err, SightSpeakError::InferenceFailed { .. }));
    assert!(engine.recorded().is_empty());
}

#[tokio::test]
async fn ambiguous_output_continues_with_sentinel() {
    let dir = TempDir::new().unwrap();
    // No "main:" marker anywhere: extraction soft-fails.
    let exec = fake_executable(dir.path(), "printf 'log line\\nanother log line\\n'");
    let engine = Arc::new(RecordingEngine::default());
    let pipeline = pipeline_with(exec, engine.clone());

    let output = pipeline
        .run(JPEG_BYTES, "eiffel.jpg", "Sighted Guide")
        .await
        .unwrap();

    assert!(!output.answer_clean);
    assert_eq!(output.spoken_text, UNCLEAN_SENTINEL);
    assert_eq!(output.display_text, UNCLEAN_SENTINEL);
    // The run still reaches the renderer with the sentinel.
    assert_eq!(engine.recorded()[0].text, UNCLEAN_SENTINEL);
}

#[tokio::test]
async fn unknown_agent_fails_before_any_work() {
    let dir = TempDir::new().unwrap();
    let touched = dir.path().join("invoked");
    let exec = fake_executable(dir.path(), &format!("touch {}", touched.display()));
    let engine = Arc::new(RecordingEngine::default());
    let pipeline = pipeline_with(exec, engine.clone());

    let err = pipeline
        .run(JPEG_BYTES, "eiffel.jpg", "Weather Reporter")
        .await
        .unwrap_err();

    assert!(matches!(err, SightSpeakError::UnknownAgent(_)));
    assert!(!touched.exists(), "inference must not have been spawned");
    assert!(engine.recorded().is_empty());
}

#[tokio::test]
async fn unsupported_upload_is_rejected_before_inference() {
    let dir = TempDir::new().unwrap();
    let touched = dir.path().join("invoked");
    let exec = fake_executable(dir.path(), &format!("touch {}", touched.display()));
    let pipeline = pipeline_with(exec, Arc::new(RecordingEngine::default()));

    let err = pipeline
        .run(b"GIF89a", "clip.gif", "Paris Tourist Guide")
        .await
        .unwrap_err();

    assert!(matches!(err, SightSpeakError::InvalidImage(_)));
    assert!(!touched.exists());
}

#[tokio::test]
async fn audio_failure_does_not_invalidate_text() {
    let dir = TempDir::new().unwrap();
    let exec = fake_executable(
        dir.path(),
        r#"printf 'loading...\n\nA quiet street corner.\n\nmain: total time = 99ms\n'"#,
    );
    let pipeline = pipeline_with(exec, Arc::new(RecordingEngine::failing()));

    let output = pipeline
        .run(JPEG_BYTES, "street.png", "Sighted Guide")
        .await
        .unwrap();

    assert_eq!(output.display_text, "A quiet street corner.");
    assert!(output.audio_error.unwrap().contains("no audio device"));
}
