//! Transforms a photo into a charcoal frog portrait.
//!
//! Run with: `cargo run --example mogify_photo -- <photo.jpg>`
//!
//! Requires `GOOGLE_API_KEY` environment variable.

use mog_machine::{GeminiTransformer, MogController, Phase};

#[tokio::main]
async fn main() -> mog_machine::Result<()> {
    let input_path = std::env::args()
        .nth(1)
        .expect("Usage: mogify_photo <photo.jpg>");

    let transformer = GeminiTransformer::builder().build()?;
    let mut controller = MogController::new(transformer);

    controller.upload(&input_path).await;
    controller.mogify().await;

    match controller.phase() {
        Phase::Succeeded => {
            let mogged = controller.state().mogged.as_ref().unwrap();
            mogged.save("mogged.png")?;
            println!("Mogged image saved to mogged.png ({} bytes)", mogged.size());
        }
        _ => {
            if let Some(error) = &controller.state().error {
                eprintln!("{error}");
            }
        }
    }

    Ok(())
}
