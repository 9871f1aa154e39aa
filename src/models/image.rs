use crate::models::CartoonStyle;
use serde::{Deserialize, Serialize};

/// One completed generation: the uploaded image, the stylized copy the model
/// produced, and the style that was applied. Both images are data URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylizedImage {
    pub original: String,
    pub processed: String,
    pub style: CartoonStyle,
}
