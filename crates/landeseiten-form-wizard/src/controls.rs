//! Locates and creates the wizard's navigation controls.
//!
//! The host form already carries a native submit control in its footer; the
//! provider creates the Previous/Next buttons next to it. All three are
//! returned as one bundle so the engine owns exactly one handle per
//! affordance.

use landeseiten_form_dom::{Document, Element};

use crate::config::ButtonText;
use crate::markup;

/// The three navigation affordances of one wizard instance.
pub struct FormControls {
    /// Created by the provider; starts disabled until the first field
    /// validates.
    pub next_button: Element,
    /// Created by the provider; starts hidden (there is no step before the
    /// first).
    pub previous_button: Element,
    /// The host's own submit control; hidden until the last visible step is
    /// reached and valid.
    pub submit_button: Element,
}

/// Builds [`FormControls`] from a Gravity-Forms-shaped footer.
pub struct GravityControlsProvider {
    document: Document,
    form: Element,
}

impl GravityControlsProvider {
    #[must_use]
    pub fn new(document: Document, form: Element) -> Self {
        Self { document, form }
    }

    /// Finds the footer's submit control and creates the two navigation
    /// buttons before it.
    ///
    /// Returns `None` when the footer or submit control is missing; the
    /// caller falls back to the plain form.
    #[must_use]
    pub fn provide(&self, labels: &ButtonText) -> Option<FormControls> {
        let footer = self.form.find(|el| el.has_class(markup::FOOTER));
        let submit_button = footer.as_ref().and_then(|footer| {
            footer.find(|el| el.tag() == "input" && el.input_type().as_deref() == Some("submit"))
        });
        let (Some(footer), Some(submit_button)) = (footer, submit_button) else {
            tracing::warn!("form footer or submit control missing, navigation unavailable");
            return None;
        };

        let previous_button = self.make_button(&markup::PREVIOUS_BUTTON, &labels.previous);
        previous_button.set_display(Some("none"));
        let next_button = self.make_button(&markup::NEXT_BUTTON, &labels.next);
        next_button.set_disabled(true);

        footer.insert_before(&previous_button, &submit_button);
        footer.insert_before(&next_button, &submit_button);

        Some(FormControls {
            next_button,
            previous_button,
            submit_button,
        })
    }

    /// A non-submitting button, so clicks never trigger the native submit.
    fn make_button(&self, classes: &[&str], label: &str) -> Element {
        let button = self.document.create_element("button");
        button.set_attr("type", "button");
        for class in classes {
            button.add_class(class);
        }
        button.set_text(label);
        button
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;

    fn form_with_footer() -> (Document, Element, Element) {
        let document = Document::new();
        let form = document.create_element("form");
        document.body().append_child(&form);
        let footer = document.create_element("div");
        footer.add_class(markup::FOOTER);
        form.append_child(&footer);
        let submit = document.create_element("input");
        submit.set_attr("type", "submit");
        footer.append_child(&submit);
        (document, form, footer)
    }

    #[test]
    fn buttons_are_created_before_the_submit_control() {
        let (document, form, footer) = form_with_footer();
        let labels = FormConfig::default().button_text;
        let controls = GravityControlsProvider::new(document, form)
            .provide(&labels)
            .unwrap();

        let children = footer.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], controls.previous_button);
        assert_eq!(children[1], controls.next_button);
        assert_eq!(children[2], controls.submit_button);
    }

    #[test]
    fn created_buttons_never_submit_the_form() {
        let (document, form, _footer) = form_with_footer();
        let labels = FormConfig::default().button_text;
        let controls = GravityControlsProvider::new(document, form)
            .provide(&labels)
            .unwrap();
        assert_eq!(controls.next_button.attr("type").as_deref(), Some("button"));
        assert_eq!(
            controls.previous_button.attr("type").as_deref(),
            Some("button")
        );
    }

    #[test]
    fn initial_states_gate_navigation() {
        let (document, form, _footer) = form_with_footer();
        let labels = FormConfig::default().button_text;
        let controls = GravityControlsProvider::new(document, form)
            .provide(&labels)
            .unwrap();
        assert!(controls.next_button.disabled());
        assert_eq!(
            controls.previous_button.display().as_deref(),
            Some("none")
        );
    }

    #[test]
    fn labels_come_from_the_config() {
        let (document, form, _footer) = form_with_footer();
        let labels = ButtonText {
            next: "Continue".to_string(),
            previous: "Back".to_string(),
            submit: "Send".to_string(),
        };
        let controls = GravityControlsProvider::new(document, form)
            .provide(&labels)
            .unwrap();
        assert_eq!(controls.next_button.text(), "Continue");
        assert_eq!(controls.previous_button.text(), "Back");
    }

    #[test]
    fn missing_footer_yields_none() {
        let document = Document::new();
        let form = document.create_element("form");
        document.body().append_child(&form);
        let labels = FormConfig::default().button_text;
        assert!(GravityControlsProvider::new(document, form)
            .provide(&labels)
            .is_none());
    }

    #[test]
    fn footer_without_submit_yields_none() {
        let document = Document::new();
        let form = document.create_element("form");
        document.body().append_child(&form);
        let footer = document.create_element("div");
        footer.add_class(markup::FOOTER);
        form.append_child(&footer);
        let labels = FormConfig::default().button_text;
        assert!(GravityControlsProvider::new(document, form)
            .provide(&labels)
            .is_none());
    }
}
