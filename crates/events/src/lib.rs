//! Outbound notifications for listdesk.
//!
//! - [`WorkflowEvent`]: the envelope posted to the workflow automation
//!   webhook when a listing or offer is saved.
//! - [`delivery`]: external delivery channels (currently the webhook).

pub mod delivery;
pub mod event;

pub use delivery::webhook::{WebhookDelivery, WebhookError};
pub use event::WorkflowEvent;
