/// SightSpeak runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the llava inference binary
    pub llava_exec_path: String,
    /// Path to the model weights
    pub model_path: String,
    /// Path to the multimodal projector asset
    pub mmproj_path: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llava_exec_path: "llava".to_string(),
            model_path: "models/ggml_llava-v1.5-7b/ggml-model-q5_k.gguf".to_string(),
            mmproj_path: "models/ggml_llava-v1.5-7b/mmproj-model-f16.gguf".to_string(),
            temperature: sightspeak_inference::DEFAULT_TEMPERATURE,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            llava_exec_path: std::env::var("SIGHTSPEAK_LLAVA_EXEC")
                .unwrap_or(defaults.llava_exec_path),
            model_path: std::env::var("SIGHTSPEAK_MODEL").unwrap_or(defaults.model_path),
            mmproj_path: std::env::var("SIGHTSPEAK_MMPROJ").unwrap_or(defaults.mmproj_path),
            temperature: std::env::var("SIGHTSPEAK_TEMP")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.temperature),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}
