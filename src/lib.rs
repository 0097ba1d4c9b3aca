pub mod config;
pub mod error;
pub mod logger;
pub mod models;
#[cfg(feature = "server")]
pub mod server;
pub mod stability;

pub use config::{Config, ServerConfig, StabilityConfig};
pub use error::{ErrorKind, Result, StudioError};
pub use models::{GenerationMode, GenerationRequest, ImageDataUrl, InputImage};
pub use stability::ImageClient;
