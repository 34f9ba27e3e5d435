//! Page-level initialization.
//!
//! One page may carry several wizard forms. [`initialize_all`] resolves
//! the page-wide settings once, then initializes every marked form root
//! under its own span, layering any per-form `data-settings` JSON on top.
//! Instances are isolated: a failure tears down nothing, is logged, and
//! leaves that form as a plain single-page form while the others run.

use landeseiten_form_dom::{Document, Element};

use crate::config::{FormConfig, SettingsOverrides};
use crate::engine::LandeseitenForm;
use crate::error::WizardError;
use crate::logging;
use crate::markup;

/// Initializes a wizard on every marked form root in the document.
///
/// `settings` is the page-wide JSON settings object; a malformed object is
/// logged and replaced with the defaults rather than blocking the page.
pub fn initialize_all(document: &Document, settings: &serde_json::Value) -> Vec<LandeseitenForm> {
    let page_config = match FormConfig::from_json(settings) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "page settings malformed, using defaults");
            FormConfig::default()
        }
    };

    let roots = document
        .body()
        .find_all(|el| el.has_class(markup::FORM_ACTIVE));
    tracing::info!(forms = roots.len(), "bootstrapping wizard forms");

    let mut instances = Vec::new();
    for (index, root) in roots.iter().enumerate() {
        let span = logging::form_span(index);
        let _guard = span.enter();
        match initialize_one(document, root, page_config.clone()) {
            Ok(wizard) => instances.push(wizard),
            Err(error) => {
                tracing::error!(%error, "wizard unavailable, leaving the plain form");
                expose_plain_submit(root);
            }
        }
    }
    instances
}

fn initialize_one(
    document: &Document,
    root: &Element,
    mut config: FormConfig,
) -> Result<LandeseitenForm, WizardError> {
    if let Some(raw) = root.attr("data-settings") {
        let overrides: SettingsOverrides = serde_json::from_str(&raw)?;
        config.apply(overrides);
    }
    LandeseitenForm::initialize(document, root, config)
}

/// Fallback for a form the wizard could not take over: make sure the
/// native submit control is not left hidden.
fn expose_plain_submit(root: &Element) {
    let submit = root
        .find(|el| el.tag() == "input" && el.input_type().as_deref() == Some("submit"));
    if let Some(submit) = submit {
        submit.set_display(None);
    }
}
