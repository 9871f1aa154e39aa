use base64::{engine::general_purpose::STANDARD, Engine};
use std::env;
use std::fs;
use toonify::{encode, logger, CartoonStyle, GeminiClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_with_config(
        logger::LoggerConfig::development().with_level(logger::LogLevel::Debug),
    )?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        log::error!("Usage: toonify <image-file> [style]");
        log::info!("🎨 Available styles:");
        for style in CartoonStyle::ALL {
            log::info!("  {} - {}", style.label(), style.prompt());
        }
        std::process::exit(1);
    }

    let image_path = &args[1];
    let style = match args.get(2) {
        Some(name) => match name.parse::<CartoonStyle>() {
            Ok(style) => style,
            Err(e) => {
                log::error!("❌ {}", e);
                log::info!("🎨 Available styles:");
                for style in CartoonStyle::ALL {
                    log::info!("  {}", style.label());
                }
                std::process::exit(1);
            }
        },
        None => CartoonStyle::Pixar3D,
    };

    if env::var("GEMINI_API_KEY").is_ok() || env::var("API_KEY").is_ok() {
        log::info!("✅ Gemini API key found in environment");
    } else {
        log::error!("❌ No GEMINI_API_KEY in environment, the request will fail");
    }

    log::info!("🔄 Creating Gemini client...");
    let client = match GeminiClient::from_env() {
        Ok(client) => {
            log::info!("✅ Gemini client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            return Err(e.into());
        }
    };

    log::info!("📷 Encoding image: {}", image_path);
    let encoded = match encode::encode_file(image_path).await {
        Ok(encoded) => {
            log::info!("✅ Encoded {} ({} characters)", image_path, encoded.len());
            encoded
        }
        Err(e) => {
            log::error!("❌ Failed to encode image: {}", e);
            return Err(e.into());
        }
    };

    log::info!("🎨 Applying style: {}", style.label());
    match client.toonify(&encoded, style).await {
        Ok(result) => {
            log::info!("✅ Stylization successful!");
            log::info!(
                "📏 Result data length: {} characters",
                result.processed.len()
            );

            let filename = format!("toonified-{}.png", chrono::Utc::now().timestamp());
            let payload = encode::strip_prefix(&result.processed);

            match STANDARD.decode(payload) {
                Ok(image_bytes) => match fs::write(&filename, image_bytes) {
                    Ok(_) => log::info!("💾 Image saved to: {}", filename),
                    Err(e) => log::error!("❌ Failed to save image: {}", e),
                },
                Err(e) => log::error!("❌ Failed to decode base64 image: {}", e),
            }
        }
        Err(e) => {
            log::error!("❌ Stylization failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
