/// Inference invoker — runs the llava CLI against an image and captures output.
///
/// One external OS process per call, awaited to completion. Model inference
/// can take tens of seconds; the pipeline stays sequential for the duration.
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{info, warn};

use sightspeak_core::{InferenceRequest, InferenceResult, SightSpeakError};

/// Lower temperatures favor deterministic output; 0.1 is the recommended
/// default for factual description tasks.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Immutable invoker configuration. Built once and passed in explicitly so
/// multiple configurations (e.g. different model weights) can coexist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Path to the external inference binary.
    pub executable_path: PathBuf,
    /// Path to the model weights.
    pub model_path: PathBuf,
    /// Path to the multimodal projector asset.
    pub projector_path: PathBuf,
    /// Sampling temperature, in (0, 2].
    pub temperature: f32,
}

impl InferenceConfig {
    pub fn new(
        executable_path: impl Into<PathBuf>,
        model_path: impl Into<PathBuf>,
        projector_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            executable_path: executable_path.into(),
            model_path: model_path.into(),
            projector_path: projector_path.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Override the sampling temperature, rejecting values outside (0, 2].
    pub fn with_temperature(mut self, temperature: f32) -> Result<Self, SightSpeakError> {
        if !(temperature > 0.0 && temperature <= 2.0) {
            return Err(SightSpeakError::Config(format!(
                "temperature {temperature} out of range (0, 2]"
            )));
        }
        self.temperature = temperature;
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Invoker
// ---------------------------------------------------------------------------

pub struct Invoker {
    config: InferenceConfig,
}

impl Invoker {
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Run one inference over `req.image_path` with the persona's prompt.
    ///
    /// stdout is captured in memory and persisted to `req.output_path`;
    /// stderr is captured separately so tool diagnostics never corrupt the
    /// extraction input. The prompt and image path are passed as single argv
    /// entries — no shell is involved, so metacharacters in an uploaded
    /// filename cannot inject commands.
    ///
    /// A non-zero exit is reported through `exit_success`, not as an error.
    /// Only failure to start the process at all yields
    /// [`SightSpeakError::Launch`].
    pub async fn run_inference(
        &self,
        req: &InferenceRequest,
    ) -> Result<InferenceResult, SightSpeakError> {
        info!(
            "[Invoker] Running {} (agent={}, image={})",
            self.config.executable_path.display(),
            req.agent.name,
            req.image_path.display()
        );

        let output = Command::new(&self.config.executable_path)
            .arg("-m")
            .arg(&self.config.model_path)
            .arg("--mmproj")
            .arg(&self.config.projector_path)
            .arg("--temp")
            .arg(self.config.temperature.to_string())
            .arg("-p")
            .arg(&req.agent.prompt)
            .arg("--image")
            .arg(&req.image_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(SightSpeakError::Launch)?;

        let raw_stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let raw_stderr = String::from_utf8_lossy(&output.stderr).to_string();

        tokio::fs::write(&req.output_path, &raw_stdout)
            .await
            .with_context(|| format!("writing raw output to {}", req.output_path.display()))?;

        let exit_success = output.status.success();
        if !exit_success {
            warn!(
                "[Invoker] Inference exited with {:?} ({} bytes of stderr)",
                output.status.code(),
                raw_stderr.len()
            );
        }

        Ok(InferenceResult {
            exit_success,
            raw_stdout,
            raw_stderr,
        })
    }
}
