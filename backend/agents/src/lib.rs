//! `sightspeak-agents` — the closed set of selectable narration personas.

pub mod registry;

pub use registry::{builtin_registry, AgentRegistry};
