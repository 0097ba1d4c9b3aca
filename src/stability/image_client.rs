use crate::{
    config::StabilityConfig,
    error::{Result, StudioError},
    logger,
    models::{GenerationRequest, ImageDataUrl},
    stability::{
        payload::ProviderRequest,
        transport::{OutboundRequest, ReqwestTransport, Transport},
    },
};
use std::sync::Arc;
use uuid::Uuid;

const ACCEPT_IMAGE: &str = "image/*";

#[derive(Clone)]
pub struct ImageClient {
    config: StabilityConfig,
    transport: Arc<dyn Transport>,
}

impl ImageClient {
    pub fn new(config: StabilityConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(config: StabilityConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &StabilityConfig {
        &self.config
    }

    /// Models the SD3 endpoint accepts as the `model` field.
    pub fn supported_models() -> Vec<(&'static str, &'static str)> {
        vec![
            ("sd3-medium", "Stable Diffusion 3 Medium"),
            ("sd3-large", "Stable Diffusion 3 Large"),
            ("sd3-large-turbo", "Stable Diffusion 3 Large Turbo"),
            ("sd3.5-large", "Stable Diffusion 3.5 Large"),
            ("sd3.5-medium", "Stable Diffusion 3.5 Medium"),
        ]
    }

    /// Generates a new product photo, or edits the supplied one, and returns it as a PNG data URL.
    pub async fn generate(&self, request: GenerationRequest) -> Result<ImageDataUrl> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key.to_string(),
            _ => {
                log::error!("Refusing to call Stability: no API key configured");
                return Err(StudioError::Configuration);
            }
        };

        request.validate()?;

        let request_id = Uuid::new_v4();
        let mode = request.mode();
        let payload = ProviderRequest::build(request, &self.config.model);

        log::info!(
            "[req:{}] Generating image with model {} ({})",
            request_id,
            self.config.model,
            mode
        );
        if let Some(image) = payload.image() {
            log::debug!(
                "[req:{}] Input image: {} bytes, {}",
                request_id,
                image.bytes.len(),
                image.mime_type
            );
        }

        let outbound = OutboundRequest {
            url: self.config.endpoint.clone(),
            api_key,
            accept: ACCEPT_IMAGE,
            payload,
        };

        let timer = logger::timer(&format!("stability {} [req:{}]", mode, request_id));
        let result = self.send(outbound).await;
        drop(timer);

        match result {
            Ok(data_url) => {
                log::info!("[req:{}] Image generated", request_id);
                Ok(data_url)
            }
            Err(e) => {
                log::error!("[req:{}] Stability API error: {}", request_id, e);
                Err(e)
            }
        }
    }

    async fn send(&self, outbound: OutboundRequest) -> Result<ImageDataUrl> {
        let response = self.transport.send(outbound).await?;

        if !response.is_success() {
            return Err(StudioError::Provider {
                status: response.status,
                body: response.body_text(),
            });
        }

        Ok(ImageDataUrl::from_png_bytes(&response.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{ErrorKind, GENERATION_FAILED_PREFIX},
        models::{GenerationMode, InputImage},
        stability::transport::mock::MockTransport,
    };

    fn client_with(transport: Arc<MockTransport>) -> ImageClient {
        ImageClient::with_transport(StabilityConfig::new().with_api_key("sk-test"), transport)
    }

    #[tokio::test]
    async fn test_generate_mode_without_image() {
        let transport = MockTransport::replying(200, b"png");
        let client = client_with(transport.clone());

        client
            .generate(GenerationRequest::new("a leather wallet on slate"))
            .await
            .unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.payload.mode(), GenerationMode::Generate);
        assert!(sent.payload.has_field("aspect_ratio"));
        assert!(!sent.payload.has_field("image"));
        assert!(!sent.payload.has_field("strength"));
        assert_eq!(sent.api_key, "sk-test");
        assert_eq!(sent.accept, "image/*");
        assert_eq!(sent.url, crate::config::DEFAULT_STABILITY_URL);
    }

    #[tokio::test]
    async fn test_edit_mode_with_image() {
        let transport = MockTransport::replying(200, b"png");
        let client = client_with(transport.clone());
        let request = GenerationRequest::new("warm sunset backdrop")
            .with_image(InputImage::new(vec![9, 8, 7], Some("image/webp")));

        client.generate(request).await.unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.payload.mode(), GenerationMode::Edit);
        assert!(sent.payload.has_field("image"));
        assert!(sent.payload.has_field("strength"));
        assert!(!sent.payload.has_field("aspect_ratio"));
        assert_eq!(sent.payload.image().unwrap().mime_type, "image/webp");
    }

    #[tokio::test]
    async fn test_missing_credential_skips_transport() {
        let transport = MockTransport::replying(200, b"png");
        let client = ImageClient::with_transport(StabilityConfig::new(), transport.clone());

        let err = client
            .generate(GenerationRequest::new("anything"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_credential_skips_transport() {
        let transport = MockTransport::replying(200, b"png");
        let client = ImageClient::with_transport(
            StabilityConfig::new().with_api_key(""),
            transport.clone(),
        );

        let err = client
            .generate(GenerationRequest::new("anything"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_instruction_skips_transport() {
        let transport = MockTransport::replying(200, b"png");
        let client = client_with(transport.clone());

        let err = client
            .generate(GenerationRequest::new(""))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_unauthorized_response() {
        let transport = MockTransport::replying(401, b"{\"errors\":[\"invalid api key\"]}");
        let client = client_with(transport.clone());

        let err = client
            .generate(GenerationRequest::new("blue gradient"))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert_eq!(err.kind(), ErrorKind::Provider);
        assert!(message.contains("401"));
        assert!(message.contains("invalid api key"));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_success_round_trips_bytes() {
        let bytes = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x7F, 0xFE];
        let transport = MockTransport::replying(200, &bytes);
        let client = client_with(transport);

        let url = client
            .generate(GenerationRequest::new("clean white studio"))
            .await
            .unwrap();

        assert!(url.as_str().starts_with("data:image/png;base64,"));
        assert_eq!(url.decode().unwrap(), bytes.to_vec());
    }

    #[tokio::test]
    async fn test_transport_failure_is_wrapped() {
        let transport = MockTransport::failing("connection refused");
        let client = client_with(transport.clone());

        let err = client
            .generate(GenerationRequest::new("neon lights"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(
            err.to_string(),
            format!("{}connection refused", GENERATION_FAILED_PREFIX)
        );
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_connection_refused_over_real_transport() {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = ImageClient::with_transport(
            StabilityConfig::new()
                .with_api_key("sk-test")
                .with_endpoint("http://127.0.0.1:1/v2beta/stable-image/generate/sd3"),
            Arc::new(ReqwestTransport::with_client(http)),
        );

        let err = client
            .generate(GenerationRequest::new("anything"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().starts_with(GENERATION_FAILED_PREFIX));
        assert!(err.to_string().len() > GENERATION_FAILED_PREFIX.len());
    }

    #[test]
    fn test_supported_models_include_default() {
        assert!(ImageClient::supported_models()
            .iter()
            .any(|(id, _)| *id == crate::config::DEFAULT_STABILITY_MODEL));
    }
}
