//! `sightspeak-core` — shared types for the SightSpeak narration pipeline.
//!
//! Provides:
//! - The `Agent` persona value object and inference request/result types
//! - The `CleanedText` answer representation with its soft-failure sentinel
//! - The top-level `SightSpeakError` taxonomy

pub mod error;
pub mod types;

pub use error::SightSpeakError;
pub use types::{
    Agent, CleanedText, InferenceRequest, InferenceResult, DEFAULT_VOICE, UNCLEAN_SENTINEL,
};
