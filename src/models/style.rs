use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight cartoon presets. Fixed at compile time; adding a style means
/// adding one variant plus its label and prompt arms below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CartoonStyle {
    Pixar3D,
    Anime,
    ComicBook,
    Caricature,
    PixelArt,
    Claymation,
    Cyberpunk,
    Sketch,
}

impl CartoonStyle {
    pub const ALL: [CartoonStyle; 8] = [
        CartoonStyle::Pixar3D,
        CartoonStyle::Anime,
        CartoonStyle::ComicBook,
        CartoonStyle::Caricature,
        CartoonStyle::PixelArt,
        CartoonStyle::Claymation,
        CartoonStyle::Cyberpunk,
        CartoonStyle::Sketch,
    ];

    /// User-facing display label, distinct from the instruction text.
    pub fn label(&self) -> &'static str {
        match self {
            CartoonStyle::Pixar3D => "3D Cartoon",
            CartoonStyle::Anime => "Anime",
            CartoonStyle::ComicBook => "Comic Book",
            CartoonStyle::Caricature => "Caricature",
            CartoonStyle::PixelArt => "Pixel Art",
            CartoonStyle::Claymation => "Claymation",
            CartoonStyle::Cyberpunk => "Cyberpunk",
            CartoonStyle::Sketch => "Pencil Sketch",
        }
    }

    /// Natural-language transformation instruction sent to the model.
    pub fn prompt(&self) -> &'static str {
        match self {
            CartoonStyle::Pixar3D => {
                "Transform this image into a high-quality 3D animated movie character style (like Pixar or Disney). Make it look cute, expressive, and vibrant with soft lighting and smooth textures. Keep the original composition and facial features recognizable but stylized."
            }
            CartoonStyle::Anime => {
                "Transform this image into a high-quality Japanese anime style illustration. Use vibrant colors, sharp lines, and distinct anime facial characteristics while keeping the subject recognizable."
            }
            CartoonStyle::ComicBook => {
                "Transform this image into a classic western comic book style. Use bold outlines, half-tone patterns, and dramatic shading. Make it look like a panel from a superhero comic."
            }
            CartoonStyle::Caricature => {
                "Transform this image into a funny and artistic caricature. Exaggerate distinct facial features slightly for a humorous effect while maintaining a high-quality hand-drawn artistic look."
            }
            CartoonStyle::PixelArt => {
                "Transform this image into a 16-bit pixel art style. Use a limited, vibrant color palette and blocky pixels reminiscent of retro video games. Keep the subject recognizable but stylized as a game sprite."
            }
            CartoonStyle::Claymation => {
                "Transform this image into a claymation style. Give the subject a textured, plasticine look with soft, rounded edges and stop-motion lighting, resembling a character from a stop-motion animated movie."
            }
            CartoonStyle::Cyberpunk => {
                "Transform this image into a futuristic cyberpunk style. Add neon lighting (pink, blue, cyan), high-tech cybernetic details, and a dark, atmospheric background while keeping the facial features clear."
            }
            CartoonStyle::Sketch => {
                "Transform this image into a charcoal or pencil sketch. Use visible hatching, shading lines, and a monochrome or sepia palette on a textured paper background."
            }
        }
    }
}

impl fmt::Display for CartoonStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CartoonStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "pixar3d" | "3dcartoon" | "3d" => Ok(CartoonStyle::Pixar3D),
            "anime" => Ok(CartoonStyle::Anime),
            "comicbook" | "comic" => Ok(CartoonStyle::ComicBook),
            "caricature" => Ok(CartoonStyle::Caricature),
            "pixelart" | "pixel" => Ok(CartoonStyle::PixelArt),
            "claymation" | "clay" => Ok(CartoonStyle::Claymation),
            "cyberpunk" => Ok(CartoonStyle::Cyberpunk),
            "sketch" | "pencilsketch" | "pencil" => Ok(CartoonStyle::Sketch),
            _ => Err(format!("Unknown style: {}", s)),
        }
    }
}
