pub mod image_client;
pub mod payload;
pub mod prompt;
pub mod transport;

pub use image_client::ImageClient;
pub use payload::{ProviderRequest, EDIT_STRENGTH, GENERATE_ASPECT_RATIO, OUTPUT_FORMAT};
pub use prompt::compose_prompt;
pub use transport::{OutboundRequest, ReqwestTransport, Transport, TransportResponse};
