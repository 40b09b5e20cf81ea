/// espeak-ng subprocess engine.
///
/// Voice enumeration shells out to `espeak-ng --voices`; playback runs
/// `espeak-ng -s <rate> [-v <voice>] <text>` and waits for it to finish.
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

use sightspeak_core::SightSpeakError;

use crate::engine::{SpeechEngine, Voice};

/// espeak-ng's documented default speaking rate.
const ESPEAK_DEFAULT_RATE: u32 = 175;

pub struct EspeakEngine {
    executable: PathBuf,
}

impl EspeakEngine {
    pub fn new() -> Self {
        Self {
            executable: PathBuf::from("espeak-ng"),
        }
    }

    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

impl Default for EspeakEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `espeak-ng --voices` output into an ordered voice list.
///
/// Listing format: a header line, then one voice per line:
/// `Pty Language Age/Gender VoiceName File [Other Languages]`. The language
/// code is what `-v` accepts, so it becomes the voice id.
fn parse_voice_listing(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 5 {
                return None;
            }
            Some((fields[1].to_string(), fields[3].to_string()))
        })
        .enumerate()
        .map(|(index, (id, name))| Voice { index, id, name })
        .collect()
}

#[async_trait]
impl SpeechEngine for EspeakEngine {
    fn default_rate(&self) -> u32 {
        ESPEAK_DEFAULT_RATE
    }

    async fn voices(&self) -> Result<Vec<Voice>, SightSpeakError> {
        let output = Command::new(&self.executable)
            .arg("--voices")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| SightSpeakError::AudioRender(format!("espeak-ng unavailable: {e}")))?;
        if !output.status.success() {
            return Err(SightSpeakError::AudioRender(format!(
                "espeak-ng --voices exited with {:?}",
                output.status.code()
            )));
        }
        Ok(parse_voice_listing(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn speak(
        &self,
        text: &str,
        voice: Option<&Voice>,
        rate: u32,
    ) -> Result<(), SightSpeakError> {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("-s").arg(rate.to_string());
        if let Some(voice) = voice {
            cmd.arg("-v").arg(&voice.id);
        }
        // Text is a single argv entry, never shell-interpreted.
        cmd.arg("--").arg(text).stdin(Stdio::null());

        info!("[Speech] espeak-ng rate={} voice={:?}", rate, voice.map(|v| &v.id));
        let status = cmd
            .status()
            .await
            .map_err(|e| SightSpeakError::AudioRender(format!("espeak-ng unavailable: {e}")))?;
        if !status.success() {
            return Err(SightSpeakError::AudioRender(format!(
                "espeak-ng exited with {:?}",
                status.code()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LISTING: &str = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  af              --/M      Afrikaans          gmw/af
 5  en-gb           --/M      English_(Great_Britain) gmw/en
 2  en-us           --/M      English_(America)  gmw/en-US            (en 3)
";

    #[test]
    fn parses_listing_in_order() {
        let voices = parse_voice_listing(SAMPLE_LISTING);
        assert_eq!(voices.len(), 3);
        assert_eq!(voices[0].index, 0);
        assert_eq!(voices[0].id, "af");
        assert_eq!(voices[0].name, "Afrikaans");
        assert_eq!(voices[2].id, "en-us");
        assert_eq!(voices[2].name, "English_(America)");
    }

    #[test]
    fn short_lines_are_skipped() {
        assert!(parse_voice_listing("header only\n\n").is_empty());
    }

    #[test]
    fn default_rate_is_espeak_default() {
        assert_eq!(EspeakEngine::new().default_rate(), 175);
    }
}
