//! `sightspeak-inference` — drives the external vision-language model.
//!
//! Two halves:
//! - [`invoker`]: spawns the llava-style CLI against an image and captures
//!   its exit status, stdout, and stderr.
//! - [`extract`]: isolates the model's actual answer from the tool's
//!   log-interleaved output.

pub mod extract;
pub mod invoker;

pub use extract::extract_answer;
pub use invoker::{Invoker, InferenceConfig, DEFAULT_TEMPERATURE};
