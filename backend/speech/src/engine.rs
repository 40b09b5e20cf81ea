/// Speech engine trait and persona-driven voice selection.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use sightspeak_core::{Agent, SightSpeakError};

/// Fixed amount subtracted from the engine's default speaking rate, in words
/// per minute. Narration reads slower than the engine default.
pub const RATE_OFFSET: u32 = 20;

/// One entry of the engine's enumerated, ordered voice list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Stable position in the engine's voice list.
    pub index: usize,
    /// Engine identifier, passed back verbatim when selecting the voice.
    pub id: String,
    /// Human-readable voice name.
    pub name: String,
}

/// An external speech synthesis engine. Blocks until playback completes.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// The engine's default speaking rate in words per minute.
    fn default_rate(&self) -> u32;

    /// Enumerate available voices in stable engine order.
    async fn voices(&self) -> Result<Vec<Voice>, SightSpeakError>;

    /// Speak `text` with the given voice (engine default when `None`) at
    /// `rate` words per minute, returning once playback finishes.
    async fn speak(
        &self,
        text: &str,
        voice: Option<&Voice>,
        rate: u32,
    ) -> Result<(), SightSpeakError>;
}

/// Resolve a persona's voice selector against an enumerated voice list.
/// Negative and out-of-range selectors fall back to the engine default.
pub fn select_voice(voices: &[Voice], selector: i32) -> Option<&Voice> {
    usize::try_from(selector).ok().and_then(|i| voices.get(i))
}

/// Vocalize `text` with the persona's voice at the slowed narration rate.
pub async fn speak_as(
    engine: &dyn SpeechEngine,
    text: &str,
    agent: &Agent,
) -> Result<(), SightSpeakError> {
    let voices = engine.voices().await?;
    let voice = select_voice(&voices, agent.voice_selector);
    let rate = engine.default_rate().saturating_sub(RATE_OFFSET);
    info!(
        "[Speech] Speaking {} chars as {} (voice={}, rate={})",
        text.len(),
        agent.name,
        voice.map(|v| v.name.as_str()).unwrap_or("default"),
        rate
    );
    engine.speak(text, voice, rate).await
}
