//! Toonify turns photos into cartoons with Google's Gemini image model.
//!
//! ```no_run
//! use toonify::{encode, CartoonStyle, GeminiClient};
//!
//! # async fn run() -> toonify::Result<()> {
//! let client = GeminiClient::from_env()?;
//! let photo = encode::encode_file("selfie.jpg").await?;
//! let result = client.toonify(&photo, CartoonStyle::Anime).await?;
//! println!("{}", result.processed);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod encode;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;

pub use config::GeminiConfig;
pub use error::{Result, ToonifyError};
pub use gemini::{GeminiClient, ImageClient};
pub use models::{CartoonStyle, StylizedImage};
