//! CLI for Mog Machine - charcoal frog portraits via the Gemini image API.

use clap::Parser;
use mog_machine::{GeminiTransformer, MogController, Phase};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mog")]
#[command(about = "Reinterpret a photo as a charcoal-sketch anthropomorphic frog")]
#[command(version)]
struct Cli {
    /// The photo to transform
    input: PathBuf,

    /// Output file path
    #[arg(short, long, default_value = "mogged.png")]
    output: PathBuf,

    /// Model identifier to use
    #[arg(long)]
    model: Option<String>,

    /// Override the built-in transformation instruction
    #[arg(long)]
    prompt: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = GeminiTransformer::builder();
    if let Some(model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(prompt) = cli.prompt {
        builder = builder.prompt(prompt);
    }
    let transformer = builder.build()?;

    let mut controller = MogController::new(transformer);

    controller.upload(&cli.input).await;
    if let Some(error) = &controller.state().error {
        anyhow::bail!("{error}");
    }

    controller.mogify().await;
    if controller.phase() != Phase::Succeeded {
        let error = controller
            .state()
            .error
            .as_deref()
            .unwrap_or("transformation did not complete");
        anyhow::bail!("{error}");
    }

    let mogged = controller
        .state()
        .mogged
        .as_ref()
        .expect("succeeded phase carries a result");
    mogged.save(&cli.output)?;

    if cli.json {
        let result = serde_json::json!({
            "success": true,
            "output": cli.output.display().to_string(),
            "size_bytes": mogged.size(),
            "format": mogged.format.extension(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Mogged image: {} ({} bytes)",
            cli.output.display(),
            mogged.size()
        );
    }

    Ok(())
}
