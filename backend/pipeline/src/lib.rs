//! `sightspeak-pipeline` — orchestrates one narration run.
//!
//! Strictly sequential: image write → inference (blocking subprocess wait) →
//! extraction → formatting → speech rendering. Concurrent uploads are
//! independent runs with collision-free staging paths; no state is shared
//! between them and nothing is retried automatically.

pub mod format;
pub mod media;
pub mod pipeline;

pub use format::split_sentences;
pub use media::validate_image;
pub use pipeline::{Pipeline, PipelineOutput};
