pub mod image_client;

use crate::{
    config::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL_ID},
    error::{Result, ToonifyError},
    models::{CartoonStyle, StylizedImage},
};
use reqwest::Client;

pub use image_client::ImageClient;

/// Entry point for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| ToonifyError::ConfigError("Gemini API key is required".into()))?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let model_id = config
            .model_id
            .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());

        Ok(Self {
            image_client: ImageClient::new(Client::new(), api_key, base_url, model_id),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env())
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    /// Stylize an encoded image and pair the result with its input.
    pub async fn toonify(
        &self,
        encoded_image: &str,
        style: CartoonStyle,
    ) -> Result<StylizedImage> {
        let processed = self.image_client.stylize(encoded_image, style).await?;

        Ok(StylizedImage {
            original: encoded_image.to_string(),
            processed,
            style,
        })
    }
}
