/// Pipeline orchestration — generate, clean, present, speak.
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use sightspeak_agents::AgentRegistry;
use sightspeak_core::{InferenceRequest, SightSpeakError};
use sightspeak_inference::{extract_answer, Invoker};
use sightspeak_speech::{speak_as, SpeechEngine};

use crate::format::split_sentences;
use crate::media::validate_image;

/// What one pipeline run produced for the caller.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Sentence-per-line text for display.
    pub display_text: String,
    /// The cleaned (not reformatted) text handed to the speech renderer;
    /// the fixed sentinel when extraction was ambiguous.
    pub spoken_text: String,
    /// False when the extractor soft-failed and the sentinel was used.
    pub answer_clean: bool,
    /// Set when the speech engine failed. The text stages above stand
    /// regardless of rendering outcome.
    pub audio_error: Option<String>,
}

pub struct Pipeline {
    registry: AgentRegistry,
    invoker: Invoker,
    /// `None` disables speech rendering (e.g. `--no-speech`).
    engine: Option<Arc<dyn SpeechEngine>>,
}

impl Pipeline {
    pub fn new(
        registry: AgentRegistry,
        invoker: Invoker,
        engine: Option<Arc<dyn SpeechEngine>>,
    ) -> Self {
        Self {
            registry,
            invoker,
            engine,
        }
    }

    /// Run one full narration over an uploaded image.
    ///
    /// Stages before extraction fail fast and abort the run; extraction
    /// ambiguity is absorbed into the sentinel and the run continues. No
    /// stage is retried.
    pub async fn run(
        &self,
        image_bytes: &[u8],
        image_name: &str,
        agent_name: &str,
    ) -> Result<PipelineOutput, SightSpeakError> {
        let agent = self.registry.get_agent(agent_name)?.clone();
        validate_image(image_bytes, image_name)?;

        let (image_path, output_path) = staging_paths(image_name);
        tokio::fs::write(&image_path, image_bytes)
            .await
            .with_context(|| format!("staging image at {}", image_path.display()))?;
        info!(
            "[Pipeline] Staged {} bytes at {} (agent={})",
            image_bytes.len(),
            image_path.display(),
            agent.name
        );

        let request = InferenceRequest {
            image_path,
            output_path,
            agent: agent.clone(),
        };
        let result = self.invoker.run_inference(&request).await?;
        if !result.exit_success {
            return Err(SightSpeakError::InferenceFailed {
                reason: "inference process exited with an error".to_string(),
                stderr: result.raw_stderr,
            });
        }

        // Display text comes from the persisted raw output, not the
        // in-memory capture.
        let raw = tokio::fs::read_to_string(&request.output_path)
            .await
            .with_context(|| format!("reading raw output {}", request.output_path.display()))?;
        if raw.trim().is_empty() {
            return Err(SightSpeakError::InferenceFailed {
                reason: "inference produced no output".to_string(),
                stderr: result.raw_stderr,
            });
        }

        let cleaned = extract_answer(&raw);
        if !cleaned.is_clean() {
            warn!("[Pipeline] Could not isolate answer; showing sentinel");
        }
        let spoken_text = cleaned.as_str().to_string();
        let display_text = split_sentences(&spoken_text);

        let audio_error = match &self.engine {
            Some(engine) => speak_as(engine.as_ref(), &spoken_text, &agent)
                .await
                .err()
                .map(|e| e.to_string()),
            None => None,
        };
        if let Some(message) = &audio_error {
            warn!("[Pipeline] Speech rendering failed: {message}");
        }

        Ok(PipelineOutput {
            display_text,
            spoken_text,
            answer_clean: cleaned.is_clean(),
            audio_error,
        })
    }
}

/// Collision-free staging paths derived from the uploaded filename. The raw
/// output lands next to the image with a `.txt` extension; the uuid prefix
/// keeps concurrent runs from interfering through the filesystem.
fn staging_paths(image_name: &str) -> (PathBuf, PathBuf) {
    let file_name = Path::new(image_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.jpg");
    let image_path = std::env::temp_dir().join(format!("{}-{}", Uuid::new_v4(), file_name));
    let output_path = image_path.with_extension("txt");
    (image_path, output_path)
}
