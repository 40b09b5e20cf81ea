//! Value objects flowing through the narration pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Voice selector meaning "use the engine's default voice".
pub const DEFAULT_VOICE: i32 = -1;

/// Fixed placeholder shown (and spoken) when the extractor cannot isolate
/// the model's answer.
pub const UNCLEAN_SENTINEL: &str = "Text could not be cleaned";

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// A narration persona: display name, generation prompt, and voice choice.
///
/// Agents are immutable value objects built once at startup and looked up by
/// name for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique display label; doubles as the registry lookup key.
    pub name: String,
    /// Verbatim instruction text sent to the model. Embedded newlines and
    /// whitespace are part of the payload and must survive untouched.
    pub prompt: String,
    /// `-1` = engine default voice; `>= 0` indexes the engine's ordered
    /// voice list.
    pub voice_selector: i32,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        prompt: impl Into<String>,
        voice_selector: i32,
    ) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            voice_selector,
        }
    }
}

// ---------------------------------------------------------------------------
// Inference request / result
// ---------------------------------------------------------------------------

/// One inference invocation: where the image lives, where raw model output
/// lands, and which persona drives the prompt. Created per pipeline run and
/// consumed once.
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub image_path: PathBuf,
    pub output_path: PathBuf,
    pub agent: Agent,
}

/// Captured outcome of one external inference process execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResult {
    /// True iff the process terminated with a zero exit status.
    pub exit_success: bool,
    pub raw_stdout: String,
    pub raw_stderr: String,
}

// ---------------------------------------------------------------------------
// Cleaned text
// ---------------------------------------------------------------------------

/// The extractor's verdict on raw inference output.
///
/// `Ambiguous` is a soft failure: downstream stages render it as
/// [`UNCLEAN_SENTINEL`] and the pipeline continues rather than aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanedText {
    /// The isolated single-line answer, already trimmed.
    Answer(String),
    /// Zero, multiple, or out-of-range marker lines — no answer recovered.
    Ambiguous,
}

impl CleanedText {
    /// The text to display and speak; the fixed sentinel when ambiguous.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Answer(text) => text,
            Self::Ambiguous => UNCLEAN_SENTINEL,
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Answer(_))
    }
}

impl fmt::Display for CleanedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
