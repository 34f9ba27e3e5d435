//! Scans the host form into the ordered field list.
//!
//! The provider walks every field-group wrapper in document order, filters
//! out groups that can never be steps, classifies each remaining group into
//! a [`FieldControl`] by inspecting its child markup, and attaches the
//! validators its markers declare. The returned order IS the step order.

use std::rc::Rc;

use landeseiten_form_dom::{Document, Element};

use crate::fields::{Field, FieldControl};
use crate::markup;
use crate::validators::Validator;

/// Input types classified as text-like.
const TEXT_INPUT_TYPES: [&str; 6] = ["text", "email", "number", "tel", "url", "date"];

/// Provides the wizard's fields from a Gravity-Forms-shaped host form.
pub struct GravityFieldsProvider {
    document: Document,
    form: Element,
}

impl GravityFieldsProvider {
    #[must_use]
    pub fn new(document: Document, form: Element) -> Self {
        Self { document, form }
    }

    /// Scans, filters, and classifies all field groups, in document order.
    ///
    /// Groups that match no known shape are dropped silently — they are
    /// simply not part of the wizard.
    #[must_use]
    pub fn provide(&self) -> Vec<Rc<Field>> {
        self.form
            .find_all(|el| el.has_class(markup::FIELD_GROUP))
            .iter()
            .filter_map(|wrapper| self.resolve_single(wrapper))
            .collect()
    }

    fn resolve_single(&self, wrapper: &Element) -> Option<Rc<Field>> {
        if wrapper.display().as_deref() == Some("none")
            || wrapper.has_class(markup::VALIDATION_CONTAINER)
            || wrapper.has_class(markup::VISIBILITY_HIDDEN)
            || wrapper.has_class(markup::SKIP)
        {
            return None;
        }

        let Some(control) = Self::classify(wrapper) else {
            tracing::debug!(wrapper = ?wrapper, "unrecognized field group, excluded from wizard");
            return None;
        };

        let field = Field::new(self.document.clone(), wrapper.clone(), control);

        if wrapper.has_class(markup::REQUIRED) {
            let required = match field.control() {
                FieldControl::Consent(_) => Validator::Consent,
                _ => Validator::Required,
            };
            field.add_validator(required);
        }
        if let FieldControl::Input(input) = field.control() {
            match input.input_type().as_deref() {
                Some("email") => field.add_validator(Validator::Email),
                Some("tel") => field.add_validator(Validator::Phone),
                Some("url") => field.add_validator(Validator::Url),
                _ => {}
            }
        }

        Some(field)
    }

    /// Classifies a group by its child markup, in priority order:
    /// radio group, checkbox group, consent marker, file input, select,
    /// textarea, generic text-like input.
    fn classify(wrapper: &Element) -> Option<FieldControl> {
        if wrapper.find(|el| el.has_class(markup::RADIO_GROUP)).is_some() {
            return Some(FieldControl::Radio(Self::choices(wrapper)));
        }
        if wrapper
            .find(|el| el.has_class(markup::CHECKBOX_GROUP))
            .is_some()
        {
            return Some(FieldControl::Checkboxes(Self::choices(wrapper)));
        }
        if let Some(consent) = wrapper.find(|el| el.has_class(markup::CONSENT_CONTAINER)) {
            let checkbox = consent
                .find(|el| el.tag() == "input" && el.input_type().as_deref() == Some("checkbox"))?;
            return Some(FieldControl::Consent(checkbox));
        }
        if let Some(file) = wrapper
            .find(|el| el.tag() == "input" && el.input_type().as_deref() == Some("file"))
        {
            return Some(FieldControl::FileUpload(file));
        }
        if let Some(select) = wrapper.find(|el| el.tag() == "select") {
            return Some(FieldControl::Select(select));
        }
        if let Some(textarea) = wrapper.find(|el| el.tag() == "textarea") {
            return Some(FieldControl::Input(textarea));
        }
        if let Some(input) = wrapper.find(|el| {
            el.tag() == "input"
                && el
                    .input_type()
                    .is_some_and(|t| TEXT_INPUT_TYPES.contains(&t.as_str()))
        }) {
            return Some(FieldControl::Input(input));
        }
        None
    }

    /// The option inputs of a choice group, in document order.
    fn choices(wrapper: &Element) -> Vec<Element> {
        wrapper.find_all(|el| {
            el.tag() == "input" && el.closest(|a| a.has_class(markup::CHOICE)).is_some()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Harness {
        document: Document,
        form: Element,
    }

    impl Harness {
        fn new() -> Self {
            let document = Document::new();
            let form = document.create_element("form");
            document.body().append_child(&form);
            Self { document, form }
        }

        fn provider(&self) -> GravityFieldsProvider {
            GravityFieldsProvider::new(self.document.clone(), self.form.clone())
        }

        fn group(&self, classes: &[&str]) -> Element {
            let wrapper = self.document.create_element("div");
            wrapper.add_class(markup::FIELD_GROUP);
            for class in classes {
                wrapper.add_class(class);
            }
            self.form.append_child(&wrapper);
            wrapper
        }

        fn text_group(&self, input_type: &str, required: bool) -> Element {
            let wrapper = if required {
                self.group(&[markup::REQUIRED])
            } else {
                self.group(&[])
            };
            let container = self.document.create_element("div");
            container.add_class(markup::INPUT_CONTAINER);
            wrapper.append_child(&container);
            let input = self.document.create_element("input");
            input.set_attr("type", input_type);
            container.append_child(&input);
            wrapper
        }
    }

    #[test]
    fn scan_order_is_step_order() {
        let h = Harness::new();
        let first = h.text_group("text", false);
        let second = h.text_group("email", false);
        let fields = h.provider().provide();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].wrapper(), &first);
        assert_eq!(fields[1].wrapper(), &second);
    }

    #[test]
    fn skip_markers_exclude_groups() {
        let h = Harness::new();
        h.text_group("text", false);
        let hidden = h.text_group("text", false);
        hidden.set_display(Some("none"));
        let utility = h.text_group("text", false);
        utility.add_class(markup::VALIDATION_CONTAINER);
        let invisible = h.text_group("text", false);
        invisible.add_class(markup::VISIBILITY_HIDDEN);
        let opted_out = h.text_group("text", false);
        opted_out.add_class(markup::SKIP);

        assert_eq!(h.provider().provide().len(), 1);
    }

    #[test]
    fn unrecognized_groups_are_dropped_not_errored() {
        let h = Harness::new();
        let wrapper = h.group(&[]);
        let mystery = h.document.create_element("canvas");
        wrapper.append_child(&mystery);
        assert!(h.provider().provide().is_empty());
    }

    #[test]
    fn radio_marker_wins_over_contained_text_inputs() {
        let h = Harness::new();
        let wrapper = h.group(&[]);
        let group = h.document.create_element("div");
        group.add_class(markup::RADIO_GROUP);
        wrapper.append_child(&group);
        for value in ["a", "b"] {
            let choice = h.document.create_element("div");
            choice.add_class(markup::CHOICE);
            group.append_child(&choice);
            let input = h.document.create_element("input");
            input.set_attr("type", "radio");
            input.set_value(value);
            choice.append_child(&input);
        }
        // An "other" free-text input inside the same group must not demote
        // the classification, and it is no choice either: only inputs under
        // a choice container count.
        let other = h.document.create_element("input");
        other.set_attr("type", "text");
        wrapper.append_child(&other);

        let fields = h.provider().provide();
        assert_eq!(fields.len(), 1);
        match fields[0].control() {
            FieldControl::Radio(choices) => assert_eq!(choices.len(), 2),
            control => panic!("expected radio classification, got {control:?}"),
        }
    }

    #[test]
    fn consent_marker_wins_over_generic_checkbox_input() {
        let h = Harness::new();
        let wrapper = h.group(&[markup::REQUIRED]);
        let container = h.document.create_element("div");
        container.add_class(markup::INPUT_CONTAINER);
        container.add_class(markup::CONSENT_CONTAINER);
        wrapper.append_child(&container);
        let checkbox = h.document.create_element("input");
        checkbox.set_attr("type", "checkbox");
        checkbox.set_value("1");
        container.append_child(&checkbox);

        let fields = h.provider().provide();
        assert_eq!(fields.len(), 1);
        assert!(matches!(fields[0].control(), FieldControl::Consent(_)));
        assert_eq!(fields[0].validators(), vec![Validator::Consent]);
    }

    #[test]
    fn textarea_wins_over_nothing_and_classifies_as_input() {
        let h = Harness::new();
        let wrapper = h.group(&[]);
        let textarea = h.document.create_element("textarea");
        wrapper.append_child(&textarea);
        let fields = h.provider().provide();
        assert!(matches!(fields[0].control(), FieldControl::Input(_)));
    }

    #[test]
    fn validators_attach_from_markers_and_input_kind() {
        let h = Harness::new();
        h.text_group("email", true);
        h.text_group("tel", false);
        h.text_group("url", false);
        let fields = h.provider().provide();
        assert_eq!(
            fields[0].validators(),
            vec![Validator::Required, Validator::Email]
        );
        assert_eq!(fields[1].validators(), vec![Validator::Phone]);
        assert_eq!(fields[2].validators(), vec![Validator::Url]);
    }

    #[test]
    fn file_and_select_classify_before_text() {
        let h = Harness::new();
        let wrapper = h.group(&[]);
        let file = h.document.create_element("input");
        file.set_attr("type", "file");
        wrapper.append_child(&file);

        let select_wrapper = h.group(&[]);
        let select = h.document.create_element("select");
        select_wrapper.append_child(&select);

        let fields = h.provider().provide();
        assert!(matches!(fields[0].control(), FieldControl::FileUpload(_)));
        assert!(matches!(fields[1].control(), FieldControl::Select(_)));
    }
}
