use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    error::{ClassifyError, ErrorResponse, ValidationError},
    protocol::{ClassificationResult, IMAGE_FIELD},
};
use tracing::{debug, warn};

pub mod config;
pub mod controller;
pub mod selection;
pub mod view;

pub use config::Settings;
pub use controller::{DisplaySurface, Region, Submission, UiState, UploadController};
pub use selection::SelectedFile;
pub use view::{LevelBanner, ResultsView, ScoreBar, ScoreKind};

/// Settled result of one classification request.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyOutcome {
    Success(ClassificationResult),
    Failure(ClassifyError),
}

impl ClassifyOutcome {
    pub fn into_result(self) -> Result<ClassificationResult, ClassifyError> {
        match self {
            Self::Success(result) => Ok(result),
            Self::Failure(err) => Err(err),
        }
    }
}

impl From<Result<ClassificationResult, ClassifyError>> for ClassifyOutcome {
    fn from(value: Result<ClassificationResult, ClassifyError>) -> Self {
        match value {
            Ok(result) => Self::Success(result),
            Err(err) => Self::Failure(err),
        }
    }
}

#[async_trait]
pub trait ClassifyClient: Send + Sync {
    async fn classify(&self, file: SelectedFile) -> ClassifyOutcome;
}

/// Sends images to a classification service as `multipart/form-data`.
#[derive(Debug, Clone)]
pub struct HttpClassifyClient {
    http: Client,
    endpoint: String,
}

impl HttpClassifyClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Self::with_timeout(&settings.classify_endpoint(), settings.request_timeout())
    }

    pub fn with_timeout(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build classification http client")?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_image(&self, file: SelectedFile) -> Result<ClassificationResult, ClassifyError> {
        if !file.is_image() {
            return Err(ValidationError::NotAnImage.into());
        }
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(media_type) = file.media_type.as_deref() {
            part = part
                .mime_str(media_type.trim())
                .map_err(|err| {
                    warn!(media_type, "declared media type rejected by encoder: {err}");
                    ClassifyError::from(ValidationError::NotAnImage)
                })?;
        }
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| ClassifyError::network(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| ClassifyError::network(err.to_string()))?;
        debug!(status = status.as_u16(), body_len = body.len(), "classification response received");

        if !status.is_success() {
            let message = match serde_json::from_slice::<ErrorResponse>(&body) {
                Ok(parsed) => parsed.error,
                Err(err) => {
                    warn!(status = status.as_u16(), "unparseable error body: {err}");
                    None
                }
            };
            return Err(ClassifyError::server(status.as_u16(), message));
        }

        serde_json::from_slice::<ClassificationResult>(&body)
            .map_err(|err| ClassifyError::malformed(err.to_string()))
    }
}

#[async_trait]
impl ClassifyClient for HttpClassifyClient {
    async fn classify(&self, file: SelectedFile) -> ClassifyOutcome {
        self.post_image(file).await.into()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
