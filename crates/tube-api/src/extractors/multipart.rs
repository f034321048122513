//! Multipart form extractors
//!
//! Upload forms are read completely into memory. The route's body limit caps
//! how much that can be; the services enforce the per-file limits.

use axum::{
    async_trait,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::StatusCode,
};
use tube_common::AppError;
use tube_service::{UpdateProfileRequest, UploadVideoRequest, UploadedFile};

use crate::response::ApiError;

/// Video upload form: `video`, `thumbnail`, `caption` files plus metadata
#[derive(Debug, Clone)]
pub struct VideoUploadForm(pub UploadVideoRequest);

/// Profile edit form: `bio`, `sign_language`, `is_deaf`, `avatar`
#[derive(Debug, Clone)]
pub struct ProfileForm(pub UpdateProfileRequest);

enum FormValue {
    Text(String),
    File(UploadedFile),
}

#[async_trait]
impl<S> FromRequest<S> for VideoUploadForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = open(req, state).await?;
        let mut form = UploadVideoRequest::default();

        while let Some((name, value)) = next_part(&mut multipart).await? {
            match (name.as_str(), value) {
                ("video", FormValue::File(file)) => form.video = Some(file),
                ("thumbnail", FormValue::File(file)) => form.thumbnail = Some(file),
                ("caption", FormValue::File(file)) => form.caption = Some(file),
                ("title", FormValue::Text(text)) => form.title = Some(text),
                ("description", FormValue::Text(text)) => form.description = Some(text),
                ("category", FormValue::Text(text)) => form.category = Some(text),
                ("tags", FormValue::Text(text)) => form.tags = Some(text),
                ("has_sign_language", FormValue::Text(text)) => {
                    form.has_sign_language = parse_flag(&text);
                }
                (other, _) => tracing::debug!(field = other, "Ignoring upload form field"),
            }
        }

        Ok(VideoUploadForm(form))
    }
}

#[async_trait]
impl<S> FromRequest<S> for ProfileForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = open(req, state).await?;
        let mut form = UpdateProfileRequest::default();

        while let Some((name, value)) = next_part(&mut multipart).await? {
            match (name.as_str(), value) {
                ("avatar", FormValue::File(file)) => form.avatar = Some(file),
                ("bio", FormValue::Text(text)) => form.bio = Some(text),
                ("sign_language", FormValue::Text(text)) => form.sign_language = Some(text),
                ("is_deaf", FormValue::Text(text)) => form.is_deaf = Some(parse_flag(&text)),
                (other, _) => tracing::debug!(field = other, "Ignoring profile form field"),
            }
        }

        Ok(ProfileForm(form))
    }
}

async fn open<S>(req: Request, state: &S) -> Result<Multipart, ApiError>
where
    S: Send + Sync,
{
    Multipart::from_request(req, state)
        .await
        .map_err(|e| ApiError::invalid_body(e.body_text()))
}

/// Read the next named part; parts carrying a file name are files
///
/// A file input left empty still arrives as a part with no bytes and is skipped.
async fn next_part(multipart: &mut Multipart) -> Result<Option<(String, FormValue)>, ApiError> {
    loop {
        let Some(field) = multipart.next_field().await.map_err(multipart_error)? else {
            return Ok(None);
        };
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        match field.file_name().map(ToString::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.map_err(multipart_error)?;
                if bytes.is_empty() {
                    continue;
                }
                let file = UploadedFile::new(file_name, bytes.to_vec());
                return Ok(Some((name, FormValue::File(file))));
            }
            None => {
                let text = field.text().await.map_err(multipart_error)?;
                return Ok(Some((name, FormValue::Text(text))));
            }
        }
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::App(AppError::PayloadTooLarge("Upload exceeds the size limit".to_string()))
    } else {
        ApiError::invalid_body(err.body_text())
    }
}

/// HTML forms send checkboxes as `on`; scripts tend to send `true` or `1`
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "on" | "yes"
    )
}
