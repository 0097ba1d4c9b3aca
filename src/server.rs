//! HTTP front door: `POST /api/edit-image` takes a multipart form with a
//! `prompt` and an optional `image`, and answers with the generated image as a
//! data URL.

use crate::{
    config::ServerConfig,
    error::ErrorKind,
    models::{EditImageResponse, ErrorResponse, GenerationRequest, HealthResponse, InputImage},
    stability::ImageClient,
};
use actix_multipart::{Multipart, MultipartError};
use actix_web::{get, post, web, App, HttpResponse, HttpServer};
use futures::TryStreamExt;

pub const MISSING_PROMPT: &str = "Missing or invalid 'prompt' field";

#[derive(Debug, Default)]
struct EditForm {
    prompt: Option<String>,
    image: Option<InputImage>,
}

async fn read_edit_form(mut payload: Multipart) -> Result<EditForm, MultipartError> {
    let mut form = EditForm::default();

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().to_string();
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            data.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "prompt" => form.prompt = String::from_utf8(data).ok(),
            // An empty file input still arrives as a zero-byte part.
            "image" if !data.is_empty() => {
                form.image = Some(InputImage::new(data, content_type.as_deref()));
            }
            _ => {}
        }
    }

    Ok(form)
}

fn error_response(kind: ErrorKind, message: impl Into<String>) -> HttpResponse {
    let body = ErrorResponse {
        error: message.into(),
    };
    match kind {
        ErrorKind::InvalidRequest => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

#[post("/api/edit-image")]
async fn edit_image(client: web::Data<ImageClient>, payload: Multipart) -> HttpResponse {
    let form = match read_edit_form(payload).await {
        Ok(form) => form,
        Err(e) => {
            log::warn!("Rejected malformed multipart body: {}", e);
            return error_response(ErrorKind::InvalidRequest, e.to_string());
        }
    };

    let prompt = match form.prompt.filter(|prompt| !prompt.trim().is_empty()) {
        Some(prompt) => prompt,
        None => return error_response(ErrorKind::InvalidRequest, MISSING_PROMPT),
    };

    let mut request = GenerationRequest::new(prompt);
    if let Some(image) = form.image {
        request = request.with_image(image);
    }

    match client.generate(request).await {
        Ok(data_url) => HttpResponse::Ok().json(EditImageResponse {
            image_url: data_url.into_string(),
        }),
        Err(e) => {
            log::error!("Error in /api/edit-image: {}", e);
            error_response(e.kind(), e.to_string())
        }
    }
}

#[get("/api/health")]
async fn health(client: web::Data<ImageClient>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        credential_configured: client.config().has_credential(),
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(edit_image).service(health);
}

pub async fn run(config: ServerConfig, client: ImageClient) -> std::io::Result<()> {
    let client = web::Data::new(client);
    let port = config.port_or_default();

    log::info!("🌐 Listening on http://{}:{}", config.host, port);

    HttpServer::new(move || App::new().app_data(client.clone()).configure(configure))
        .bind((config.host.as_str(), port))?
        .run()
        .await
}
