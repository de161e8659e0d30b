/// Errors from the extraction pipeline.
///
/// `Display` strings are sent to the browser in the terminal `error`
/// event, so they never include upstream response bodies.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    /// The HTTP request or the response stream failed.
    #[error("Model request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The model API returned a non-2xx status code.
    #[error("Model API returned HTTP {status}")]
    Api {
        status: u16,
        /// Raw response body, logged but never relayed.
        body: String,
    },

    /// The stream carried an error object instead of content.
    #[error("Model stream error: {0}")]
    Stream(String),

    /// No JSON object could be recovered from the model output.
    #[error("No listing data found in model output")]
    NoJson,

    /// An upload was not an image or PDF.
    #[error("Unsupported file type: {0}")]
    UnsupportedMime(String),

    /// The receiving side of the relay hung up.
    #[error("Client disconnected")]
    Disconnected,
}
