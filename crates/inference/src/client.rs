//! HTTP executor for planned generation attempts.
//!
//! [`InferenceClient`] holds the service base URL and a pooled
//! [`reqwest::Client`]. It is stateless between calls and cheap to share
//! across handlers.

use crate::classify::{self, ClassifyProfile, UrlFetcher};
use crate::encode::{Attempt, WireBody};
use crate::error::InferenceError;
use crate::result::GenerationResult;

/// HTTP client for a single inference service deployment.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: reqwest::Client,
    base_url: String,
}

/// Raw outcome of one attempt, before classification.
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Declared `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Full response body.
    pub bytes: Vec<u8>,
}

impl InferenceClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (connection pooling across callers).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base HTTP URL of the service.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a planned attempt sequence strictly in order.
    ///
    /// Each attempt is sent only after the previous one's outcome is known.
    /// A non-2xx status or a transport failure advances to the next attempt;
    /// the first success short-circuits. When the final attempt fails, its
    /// failure is returned unchanged -- there is no retry beyond the plan.
    pub async fn execute(&self, attempts: &[Attempt]) -> Result<RawResponse, InferenceError> {
        let total = attempts.len();
        let mut last_error = None;

        for (index, attempt) in attempts.iter().enumerate() {
            match self.send(attempt).await {
                Ok(raw) if (200..300).contains(&raw.status) => return Ok(raw),
                Ok(raw) => {
                    tracing::warn!(
                        endpoint = attempt.endpoint,
                        status = raw.status,
                        attempt = index + 1,
                        total,
                        "Inference attempt rejected"
                    );
                    last_error = Some(InferenceError::Upstream {
                        status: raw.status,
                        body: classify::excerpt(&raw.bytes),
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        endpoint = attempt.endpoint,
                        error = %err,
                        attempt = index + 1,
                        total,
                        "Inference attempt failed to send"
                    );
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| InferenceError::Upstream {
            status: 500,
            body: "no attempts planned".to_string(),
        }))
    }

    /// Execute and classify in one step.
    pub async fn generate(
        &self,
        attempts: &[Attempt],
        profile: ClassifyProfile,
    ) -> Result<GenerationResult, InferenceError> {
        let raw = self.execute(attempts).await?;
        classify::classify(profile, raw.content_type.as_deref(), raw.bytes, self).await
    }

    async fn send(&self, attempt: &Attempt) -> Result<RawResponse, InferenceError> {
        // The trailing slash is part of the service's route contract.
        let url = format!("{}/{}/", self.base_url, attempt.endpoint);

        let request = self.client.post(&url);
        let request = match &attempt.body {
            WireBody::Form(fields) => request.form(fields),
            WireBody::Multipart { file, fields } => {
                let mut form = reqwest::multipart::Form::new();
                if let Some(file) = file {
                    let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                        .file_name(file.file_name)
                        .mime_str(file.content_type)?;
                    form = form.part("file", part);
                }
                for (name, value) in fields {
                    form = form.text(*name, value.clone());
                }
                request.multipart(form)
            }
            WireBody::JsonPrompt(prompt) => request.json(prompt),
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            content_type,
            bytes,
        })
    }
}

impl UrlFetcher for InferenceClient {
    /// Secondary fetch for URL-valued media fields inside upstream replies.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, InferenceError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .bytes()
                .await
                .map(|b| classify::excerpt(&b))
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(InferenceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}
