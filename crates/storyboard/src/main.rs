//! Storyboard CLI binary.
//!
//! This binary provides command-line access to Storyboard's functionality:
//! - Generate a story and a five-panel storyboard from a topic
//! - Render missing panels for an existing topic (rerun-driven retry)

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_generate};

    // Load .env for GEMINI_API_KEY if present
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Execute the requested command
    match cli.command {
        Commands::Generate {
            topic,
            media_dir,
            model,
            image_model,
            skip_images,
        } => {
            run_generate(&topic, media_dir, model, image_model, skip_images).await?;
        }
    }

    Ok(())
}
