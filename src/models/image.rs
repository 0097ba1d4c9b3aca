use crate::error::{Result, StudioError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const DEFAULT_MIME_TYPE: &str = "image/png";
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl InputImage {
    /// Wraps raw upload bytes. An empty or missing MIME type falls back to `image/png`.
    pub fn new(bytes: Vec<u8>, mime_type: Option<&str>) -> Self {
        let mime_type = mime_type
            .map(str::trim)
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();
        Self { bytes, mime_type }
    }

    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let mime_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(mime_for_extension);
        Ok(Self::new(bytes, mime_type))
    }
}

pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationMode {
    #[serde(rename = "text-to-image")]
    Generate,
    #[serde(rename = "image-to-image")]
    Edit,
}

impl GenerationMode {
    /// Wire tag sent in the `mode` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Generate => "text-to-image",
            GenerationMode::Edit => "image-to-image",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub instruction: String,
    pub image: Option<InputImage>,
}

impl GenerationRequest {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: InputImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn mode(&self) -> GenerationMode {
        match self.image {
            Some(_) => GenerationMode::Edit,
            None => GenerationMode::Generate,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.instruction.trim().is_empty() {
            return Err(StudioError::InvalidRequest(
                "instruction must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// A PNG embedded as `data:image/png;base64,...`, usable directly as an image source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageDataUrl(String);

impl ImageDataUrl {
    pub fn from_png_bytes(bytes: &[u8]) -> Self {
        Self(format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        let payload = self.0.strip_prefix(PNG_DATA_URL_PREFIX).ok_or_else(|| {
            StudioError::InvalidRequest("not a base64 PNG data URL".into())
        })?;
        STANDARD
            .decode(payload)
            .map_err(|e| StudioError::InvalidRequest(format!("invalid base64 payload: {}", e)))
    }
}

impl fmt::Display for ImageDataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
