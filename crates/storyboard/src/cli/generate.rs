//! Storyboard generation command handler.

use std::path::PathBuf;
use std::sync::Arc;
use storyboard::{
    GeminiClient, PanelRenderer, RenderOutcome, SceneDirector, Session, SessionOrchestrator,
    StoryComposer, StoryboardConfig, StoryboardResult,
};

/// Generate a story and render its storyboard panels.
///
/// Maps the two presentation events onto orchestrator operations: the
/// topic submission (`submit`) and one render request per scene index
/// (`ensure_image`). A failed panel is reported and the remaining panels
/// still render.
///
/// # Arguments
///
/// * `topic` - The story topic
/// * `media_dir` - Optional media directory override
/// * `model` - Optional text model override (story and scenes)
/// * `image_model` - Optional image model override
/// * `skip_images` - Generate the story and scenes only
pub async fn run_generate(
    topic: &str,
    media_dir: Option<PathBuf>,
    model: Option<String>,
    image_model: Option<String>,
    skip_images: bool,
) -> StoryboardResult<()> {
    let config = StoryboardConfig::load()?;

    let media_dir = media_dir.unwrap_or_else(|| PathBuf::from(&config.media_dir));

    // One Gemini client backs all three services
    let story_model = model.clone().or(config.story_model);
    let scene_model = model.or(config.scene_model);
    let client = Arc::new(GeminiClient::with_models(
        story_model.clone(),
        image_model.or(config.image_model),
    )?);

    let mut composer = StoryComposer::new(client.clone());
    if let Some(m) = story_model {
        composer = composer.with_model(m);
    }
    if let Some(t) = config.temperature {
        composer = composer.with_temperature(t);
    }
    if let Some(max) = config.max_tokens {
        composer = composer.with_max_tokens(max);
    }

    let mut director = SceneDirector::new(client.clone());
    if let Some(m) = scene_model {
        director = director.with_model(m);
    }
    if let Some(t) = config.temperature {
        director = director.with_temperature(t);
    }
    if let Some(max) = config.max_tokens {
        director = director.with_max_tokens(max);
    }

    let orchestrator = SessionOrchestrator::new(
        composer,
        director,
        PanelRenderer::new(client),
        media_dir,
    );

    tracing::info!(
        topic = %topic,
        media_dir = %orchestrator.media_dir().display(),
        "Starting storyboard generation"
    );

    // Step 1 and 2: story generation and scene extraction
    let mut session = Session::new();
    orchestrator.submit(&mut session, topic).await?;

    println!("\nYour Generated Story");
    println!("====================");
    if let Some(story) = session.story_text() {
        println!("{}", story);
    }
    println!();

    if skip_images {
        tracing::info!("Skipping image rendering (--skip-images)");
        print_summary(&session, &[]);
        return Ok(());
    }

    // Step 3: render each panel independently; a failure in one panel
    // does not block the others.
    let mut outcomes: Vec<String> = Vec::new();
    for index in 0..session.scenes().len() {
        match orchestrator.ensure_image(&mut session, index).await {
            Ok(RenderOutcome::Rendered(path)) => {
                outcomes.push(format!("rendered {}", path.display()));
            }
            Ok(RenderOutcome::Cached(path)) => {
                outcomes.push(format!("cached {}", path.display()));
            }
            Ok(RenderOutcome::Skipped { reason }) => {
                tracing::warn!(index, "{}", reason);
                outcomes.push(format!("skipped ({})", reason));
            }
            Err(e) => {
                tracing::error!(index, error = %e, "Panel rendering failed");
                outcomes.push(format!("failed ({})", e));
            }
        }
    }

    print_summary(&session, &outcomes);

    Ok(())
}

/// Print the per-scene execution summary.
fn print_summary(session: &Session, outcomes: &[String]) {
    println!("Storyboard Generation Summary:");
    println!("==============================");
    println!("Topic: {}", session.topic());
    println!("Scenes: {}", session.scenes().len());
    println!("Panels rendered: {}", session.rendered_count());
    println!();

    for (index, scene) in session.scenes().iter().enumerate() {
        println!("Scene {}: {}", index + 1, scene.caption());
        if let Some(outcome) = outcomes.get(index) {
            println!("  {}", outcome);
        }
        println!();
    }
}
