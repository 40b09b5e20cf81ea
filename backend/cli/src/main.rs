mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use sightspeak_agents::{builtin_registry, AgentRegistry};
use sightspeak_inference::{InferenceConfig, Invoker};
use sightspeak_pipeline::Pipeline;
use sightspeak_speech::{EspeakEngine, SpeechEngine};

use config::Config;

#[derive(Parser)]
#[command(name = "sightspeak")]
#[command(about = "SightSpeak — spoken narration for images")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available narration personas
    Agents,
    /// Describe an image and speak the narration
    Narrate {
        /// Path to a jpg/png image
        #[arg(short, long)]
        image: PathBuf,
        /// Persona to narrate with
        #[arg(short, long, default_value = "Paris Tourist Guide")]
        agent: String,
        /// Skip speech rendering (text output only)
        #[arg(long)]
        no_speech: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Agents => {
            for name in builtin_registry().list_agents() {
                println!("{name}");
            }
        }
        Commands::Narrate {
            image,
            agent,
            no_speech,
        } => {
            narrate(&config, &image, &agent, no_speech).await?;
        }
    }

    Ok(())
}

async fn narrate(config: &Config, image: &PathBuf, agent: &str, no_speech: bool) -> Result<()> {
    info!(
        exec = %config.llava_exec_path,
        model = %config.model_path,
        agent = %agent,
        "Starting narration"
    );

    let inference_config = InferenceConfig::new(
        &config.llava_exec_path,
        &config.model_path,
        &config.mmproj_path,
    )
    .with_temperature(config.temperature)?;

    let engine: Option<Arc<dyn SpeechEngine>> = if no_speech {
        None
    } else {
        Some(Arc::new(EspeakEngine::new()))
    };
    let pipeline = Pipeline::new(
        AgentRegistry::builtin(),
        Invoker::new(inference_config),
        engine,
    );

    let image_bytes = tokio::fs::read(image)
        .await
        .with_context(|| format!("reading image {}", image.display()))?;
    let image_name = image
        .file_name()
        .and_then(|n| n.to_str())
        .context("image path has no filename")?;

    let output = pipeline.run(&image_bytes, image_name, agent).await?;

    println!("{}", output.display_text);
    if !output.answer_clean {
        warn!("Model output could not be cleaned; see the captured raw output");
    }
    if let Some(audio_error) = output.audio_error {
        warn!("Narration text produced, but audio rendering failed: {audio_error}");
    }

    Ok(())
}
