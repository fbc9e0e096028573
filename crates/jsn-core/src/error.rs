//! Error types

use jsn_dom::DomError;

/// Errors surfaced by the notice pipeline.
///
/// Misconfiguration (bad class names, unknown styles, a missing anchor) is
/// not an error; it is dropped or reported through
/// [`NotifyOutcome`](crate::NotifyOutcome).
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("DOM operation failed: {0}")]
    Dom(#[from] DomError),

    #[error("Invalid options: {0}")]
    Options(#[from] serde_json::Error),
}
