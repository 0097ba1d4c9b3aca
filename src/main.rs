use photoforge::{
    logger::{self, LoggerConfig},
    Config, ImageClient,
};

fn load_environment() -> Result<Config, Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::from_env())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = Config::from_env();
    logger::log_config_info(&config);
    Ok(config)
}

#[cfg(feature = "server")]
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_environment()?;

    logger::log_startup_info(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        &config.server.host,
        config.server.port_or_default(),
    );

    let client = ImageClient::new(config.stability.clone());
    photoforge::server::run(config.server, client).await?;
    Ok(())
}

#[cfg(not(feature = "server"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use photoforge::{GenerationRequest, InputImage};
    use std::fs;

    let mut args = std::env::args().skip(1);
    let instruction = match args.next() {
        Some(instruction) => instruction,
        None => {
            eprintln!("usage: photoforge <instruction> [input-image] [output.png]");
            std::process::exit(2);
        }
    };
    let input_path = args.next();
    let output_path = args.next().unwrap_or_else(|| {
        format!("generated_image_{}.png", chrono::Utc::now().timestamp())
    });

    let config = load_environment()?;
    let client = ImageClient::new(config.stability);

    let mut request = GenerationRequest::new(instruction);
    if let Some(path) = input_path {
        let image = InputImage::from_file(&path)?;
        log::info!("🖼️  Editing {} ({})", path, image.mime_type);
        request = request.with_image(image);
    }

    let data_url = client.generate(request).await?;
    fs::write(&output_path, data_url.decode()?)?;
    log::info!("💾 Image saved to: {}", output_path);

    Ok(())
}
