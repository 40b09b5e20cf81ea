//! `sightspeak-speech` — persona-voiced narration through an external
//! synthesis engine.
//!
//! The [`SpeechEngine`] trait is the seam: production code drives
//! `espeak-ng` as a subprocess ([`EspeakEngine`]), tests substitute a
//! recording stub.

pub mod engine;
pub mod espeak;

pub use engine::{select_voice, speak_as, SpeechEngine, Voice, RATE_OFFSET};
pub use espeak::EspeakEngine;
