/// Errors from the VaultRE integration layer.
#[derive(Debug, thiserror::Error)]
pub enum VaultReError {
    /// The HTTP request itself failed (network, DNS, TLS, decode, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// VaultRE returned a non-2xx status code.
    #[error("VaultRE API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The suburb directory returned nothing for the requested name.
    #[error("Suburb not found: {0}")]
    SuburbNotFound(String),

    /// The listing agent could not be matched to a VaultRE staff member.
    #[error("Listing agent not recognised: {0}")]
    AgentNotMatched(String),

    /// The draft is missing data needed to talk to the CRM.
    #[error("Invalid listing: {0}")]
    InvalidDraft(String),
}
