use crate::{error::Result, stability::payload::ProviderRequest};
use async_trait::async_trait;
use reqwest::{header, Client};

/// Everything needed to put one provider call on the wire.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub url: String,
    pub api_key: String,
    pub accept: &'static str,
    pub payload: ProviderRequest,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends a built request and hands back the raw status and body.
///
/// Failures to reach the provider or to read its body are `StudioError::Transport`;
/// a non-2xx status is not an error at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse>;
}

#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse> {
        let form = request.payload.into_form()?;

        let response = self
            .client
            .post(&request.url)
            .bearer_auth(&request.api_key)
            .header(header::ACCEPT, request.accept)
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse { status, body })
    }
}
