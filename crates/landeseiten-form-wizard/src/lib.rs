//! # landeseiten-form-wizard
//!
//! The client-side wizard core: renders one long form as a guided,
//! one-field-at-a-time sequence with inline validation and animated
//! transitions, without server round-trips.
//!
//! The crate is organized leaf-first:
//! - [`validators`] — pure verdicts over a field's current value
//! - [`fields`] — the uniform value/validate/show/focus contract over
//!   heterogeneous widgets
//! - [`provider`] / [`controls`] — scan the host markup into fields and
//!   navigation buttons
//! - [`engine`] — the step state machine ([`LandeseitenForm`])
//! - [`bootstrap`] — page-level initialization with per-instance isolation
//!
//! The host supplies a [`landeseiten_form_dom::Document`] containing the
//! form markup and a plain JSON settings object; everything else (styling,
//! submission, persistence) stays on the host side.

pub mod bootstrap;
pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod fields;
pub mod logging;
pub mod markup;
pub mod progress;
pub mod provider;
pub mod timing;
pub mod validators;

pub use bootstrap::initialize_all;
pub use config::{ButtonText, ErrorMessages, FormConfig, SettingsOverrides, TransitionMode};
pub use engine::LandeseitenForm;
pub use error::WizardError;
pub use fields::{Field, FieldControl, FieldValue};
pub use validators::{Validator, Verdict};
