use photoforge::{GenerationRequest, ImageClient, InputImage, StabilityConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    photoforge::logger::init()?;

    let api_key = env::var("STABILITY_API_KEY")?;
    let client = ImageClient::new(StabilityConfig::new().with_api_key(api_key));

    log::info!("🖼️  Available models:");
    for (id, name) in ImageClient::supported_models() {
        log::info!("  {} - {}", id, name);
    }

    let fresh = client
        .generate(GenerationRequest::new(
            "a minimalist ceramic coffee mug on a light oak table, morning light",
        ))
        .await?;
    std::fs::write("mug.png", fresh.decode()?)?;
    log::info!("💾 Saved mug.png");

    let edited = client
        .generate(
            GenerationRequest::new("replace the background with soft pastel pink")
                .with_image(InputImage::from_file("mug.png")?),
        )
        .await?;
    std::fs::write("mug_pastel.png", edited.decode()?)?;
    log::info!("💾 Saved mug_pastel.png");

    Ok(())
}
