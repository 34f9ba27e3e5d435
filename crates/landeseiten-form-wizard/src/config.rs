//! Per-form configuration and the settings deep merge.
//!
//! A deployment supplies a plain JSON settings object (possibly sparse,
//! possibly empty). [`SettingsOverrides`] deserializes it; [`FormConfig`]
//! holds the fully resolved values after a key-wise deep merge onto the
//! built-in defaults. Nested maps (`buttonText`, `errorMessages`) merge per
//! key — overriding one message never drops its sibling defaults. The
//! resolved config is immutable for the lifetime of the form instance.

use serde::Deserialize;

use crate::error::WizardError;

/// How the wizard moves between steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionMode {
    /// Prior steps stay visible; the viewport scrolls to reveal the next.
    Reveal,
    /// Only one step is visible at a time, with an animated swap.
    Paged,
}

impl TransitionMode {
    /// The wire name, as stamped into the form root's `data-mode`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reveal => "reveal",
            Self::Paged => "paged",
        }
    }
}

/// Labels for the three navigation affordances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonText {
    pub next: String,
    pub previous: String,
    pub submit: String,
}

/// The localizable error-message catalog, keyed by validator kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorMessages {
    pub required: String,
    pub email: String,
    pub phone: String,
    pub url: String,
    pub consent: String,
}

/// Fully resolved configuration for one form instance.
#[derive(Clone, Debug, PartialEq)]
pub struct FormConfig {
    pub mode: TransitionMode,
    pub auto_focus: bool,
    pub enter_to_advance: bool,
    pub auto_progress_radio: bool,
    pub hide_error_until_dirty: bool,
    pub progress_bar: bool,
    /// Pixels between the viewport top and the current step after a scroll.
    pub scroll_top_margin: f64,
    pub button_text: ButtonText,
    pub error_messages: ErrorMessages,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            mode: TransitionMode::Reveal,
            auto_focus: true,
            enter_to_advance: true,
            auto_progress_radio: true,
            hide_error_until_dirty: true,
            progress_bar: false,
            scroll_top_margin: 150.0,
            button_text: ButtonText {
                next: "Weiter →".to_string(),
                previous: "← Zurück".to_string(),
                submit: "Absenden".to_string(),
            },
            error_messages: ErrorMessages {
                required: "Dieses Feld ist erforderlich.".to_string(),
                email: "Bitte geben Sie eine gültige E-Mail-Adresse ein.".to_string(),
                phone: "Bitte geben Sie eine gültige Telefonnummer ein.".to_string(),
                url: "Bitte geben Sie eine gültige Web-Adresse ein.".to_string(),
                consent: "Bitte stimmen Sie den Bedingungen zu.".to_string(),
            },
        }
    }
}

/// Sparse settings as supplied by a deployment.
///
/// Every key is optional; unknown keys are ignored. Empty strings count as
/// missing (the admin surface sends empty fields for "use the default").
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverrides {
    pub mode: Option<TransitionMode>,
    pub auto_focus: Option<bool>,
    pub enter_to_advance: Option<bool>,
    pub auto_progress_radio: Option<bool>,
    pub hide_error_until_dirty: Option<bool>,
    pub progress_bar: Option<bool>,
    pub scroll_top_margin: Option<f64>,
    #[serde(default)]
    pub button_text: ButtonTextOverrides,
    #[serde(default)]
    pub error_messages: ErrorMessageOverrides,
}

/// Sparse overrides for [`ButtonText`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonTextOverrides {
    pub next: Option<String>,
    pub previous: Option<String>,
    pub submit: Option<String>,
}

/// Sparse overrides for [`ErrorMessages`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessageOverrides {
    pub required: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub consent: Option<String>,
}

/// Keeps an override only if it is present and non-empty.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl FormConfig {
    /// Resolves a config by deep-merging `overrides` onto the defaults.
    #[must_use]
    pub fn with_overrides(overrides: SettingsOverrides) -> Self {
        let mut config = Self::default();
        config.apply(overrides);
        config
    }

    /// Deep-merges `overrides` onto this config, key-wise. Layering is
    /// associative: page-wide settings first, then per-form settings.
    pub fn apply(&mut self, overrides: SettingsOverrides) {
        let config = self;
        if let Some(mode) = overrides.mode {
            config.mode = mode;
        }
        if let Some(auto_focus) = overrides.auto_focus {
            config.auto_focus = auto_focus;
        }
        if let Some(enter_to_advance) = overrides.enter_to_advance {
            config.enter_to_advance = enter_to_advance;
        }
        if let Some(auto_progress_radio) = overrides.auto_progress_radio {
            config.auto_progress_radio = auto_progress_radio;
        }
        if let Some(hide_error_until_dirty) = overrides.hide_error_until_dirty {
            config.hide_error_until_dirty = hide_error_until_dirty;
        }
        if let Some(progress_bar) = overrides.progress_bar {
            config.progress_bar = progress_bar;
        }
        if let Some(margin) = overrides.scroll_top_margin {
            config.scroll_top_margin = margin;
        }

        let buttons = overrides.button_text;
        if let Some(next) = non_empty(buttons.next) {
            config.button_text.next = next;
        }
        if let Some(previous) = non_empty(buttons.previous) {
            config.button_text.previous = previous;
        }
        if let Some(submit) = non_empty(buttons.submit) {
            config.button_text.submit = submit;
        }

        let messages = overrides.error_messages;
        if let Some(required) = non_empty(messages.required) {
            config.error_messages.required = required;
        }
        if let Some(email) = non_empty(messages.email) {
            config.error_messages.email = email;
        }
        if let Some(phone) = non_empty(messages.phone) {
            config.error_messages.phone = phone;
        }
        if let Some(url) = non_empty(messages.url) {
            config.error_messages.url = url;
        }
        if let Some(consent) = non_empty(messages.consent) {
            config.error_messages.consent = consent;
        }
    }

    /// Resolves a config from the raw JSON settings object.
    ///
    /// A type mismatch (e.g. a numeric `mode`) is an
    /// [`WizardError::InvalidSettings`]; unknown keys are simply ignored.
    pub fn from_json(settings: &serde_json::Value) -> Result<Self, WizardError> {
        let overrides: SettingsOverrides = serde_json::from_value(settings.clone())?;
        Ok(Self::with_overrides(overrides))
    }
}
