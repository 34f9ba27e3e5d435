//! # landeseiten-form
//!
//! A guided one-field-at-a-time wizard engine for long web forms.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `landeseiten-form` to get the whole engine, or on the
//! individual crates for finer-grained control.
//!
//! ```
//! use landeseiten_form::wizard::initialize_all;
//! use landeseiten_form::dom::Document;
//!
//! let document = Document::new();
//! // ... host builds its form markup under document.body() ...
//! let forms = initialize_all(&document, &serde_json::json!({ "mode": "paged" }));
//! assert!(forms.is_empty()); // no marked form roots on this page
//! ```

/// Host document abstraction: elements, events, and the timer queue.
pub use landeseiten_form_dom as dom;

/// Wizard core: configuration, validators, fields, providers, and the
/// step engine.
pub use landeseiten_form_wizard as wizard;

pub use landeseiten_form_wizard::{
    initialize_all, FormConfig, LandeseitenForm, TransitionMode, WizardError,
};

// Third-party re-exports for user convenience.
pub use serde_json;
pub use tracing;
