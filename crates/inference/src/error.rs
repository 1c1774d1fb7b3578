/// Errors from the inference client layer.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status on the final planned attempt.
    #[error("Inference API error ({status}): {body}")]
    Upstream {
        /// HTTP status code of the last failing attempt.
        status: u16,
        /// Bounded excerpt of the response body for diagnostics.
        body: String,
    },

    /// The response body could not be interpreted under any
    /// classification rule.
    #[error("Unclassifiable response: {message}")]
    Classification {
        /// What went wrong while classifying.
        message: String,
        /// Bounded excerpt of the offending body.
        excerpt: String,
    },
}
