//! Error types for wizard initialization.
//!
//! Nothing here is fatal to the page. A failed instance is logged and falls
//! back to the host's plain single-page submit; validation problems are not
//! errors at all but verdicts (see [`crate::validators`]).

use thiserror::Error;

/// Reasons a wizard instance cannot take over a form.
#[derive(Error, Debug)]
pub enum WizardError {
    /// The provider found no field group it could classify.
    #[error("no eligible field groups found in the form")]
    NoEligibleFields,

    /// The control region or its native submit control is missing, so the
    /// Next/Previous affordances cannot be placed.
    #[error("form footer or submit control not found")]
    MissingControls,

    /// The deployment-supplied settings object is malformed.
    #[error("invalid form settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}
