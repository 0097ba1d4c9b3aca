use crate::{
    error::{Result, StudioError},
    models::{GenerationMode, GenerationRequest, InputImage},
    stability::prompt::compose_prompt,
};
use reqwest::multipart::{Form, Part};

pub const OUTPUT_FORMAT: &str = "png";
pub const GENERATE_ASPECT_RATIO: &str = "1:1";
/// How far an edit may move away from the input pixels, in `[0, 1]`.
pub const EDIT_STRENGTH: f32 = 0.25;
pub const INPUT_IMAGE_FILE_NAME: &str = "input-image.png";

/// Multipart body for one Stability call, one variant per mode.
#[derive(Debug, Clone)]
pub enum ProviderRequest {
    Generate {
        prompt: String,
        model: String,
        aspect_ratio: &'static str,
    },
    Edit {
        prompt: String,
        model: String,
        image: InputImage,
        strength: f32,
    },
}

impl ProviderRequest {
    pub fn build(request: GenerationRequest, model: &str) -> Self {
        let prompt = compose_prompt(request.mode(), &request.instruction);
        match request.image {
            None => ProviderRequest::Generate {
                prompt,
                model: model.to_string(),
                aspect_ratio: GENERATE_ASPECT_RATIO,
            },
            Some(image) => ProviderRequest::Edit {
                prompt,
                model: model.to_string(),
                image,
                strength: EDIT_STRENGTH,
            },
        }
    }

    pub fn mode(&self) -> GenerationMode {
        match self {
            ProviderRequest::Generate { .. } => GenerationMode::Generate,
            ProviderRequest::Edit { .. } => GenerationMode::Edit,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            ProviderRequest::Generate { prompt, .. } | ProviderRequest::Edit { prompt, .. } => {
                prompt
            }
        }
    }

    pub fn image(&self) -> Option<&InputImage> {
        match self {
            ProviderRequest::Generate { .. } => None,
            ProviderRequest::Edit { image, .. } => Some(image),
        }
    }

    /// Text parts of the form, in the order they are appended.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let (prompt, model) = match self {
            ProviderRequest::Generate { prompt, model, .. }
            | ProviderRequest::Edit { prompt, model, .. } => (prompt, model),
        };

        let mut fields = vec![
            ("prompt", prompt.clone()),
            ("output_format", OUTPUT_FORMAT.to_string()),
            ("mode", self.mode().as_str().to_string()),
            ("model", model.clone()),
        ];

        match self {
            ProviderRequest::Generate { aspect_ratio, .. } => {
                fields.push(("aspect_ratio", aspect_ratio.to_string()));
            }
            ProviderRequest::Edit { strength, .. } => {
                fields.push(("strength", strength.to_string()));
            }
        }

        fields
    }

    pub fn has_field(&self, name: &str) -> bool {
        (name == "image" && self.image().is_some())
            || self.text_fields().iter().any(|(field, _)| *field == name)
    }

    pub fn into_form(self) -> Result<Form> {
        let form = self
            .text_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        match self {
            ProviderRequest::Generate { .. } => Ok(form),
            ProviderRequest::Edit { image, .. } => {
                let part = Part::bytes(image.bytes)
                    .file_name(INPUT_IMAGE_FILE_NAME)
                    .mime_str(&image.mime_type)
                    .map_err(|e| {
                        StudioError::InvalidRequest(format!(
                            "unsupported image content type '{}': {}",
                            image.mime_type, e
                        ))
                    })?;
                Ok(form.part("image", part))
            }
        }
    }
}
