//! The field abstraction layer.
//!
//! A [`Field`] wraps one visual form group and exposes a uniform
//! value/validate/show/focus contract over whatever widget actually lives
//! inside it. The wrapper element is the field's identity — it is an
//! exclusively owned handle into the host tree, and visibility is always
//! re-derived from it live, because the host's conditional logic may hide
//! or show groups at any time.
//!
//! The widget set is closed (see [`FieldControl`]); there is no open-ended
//! subclassing.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use landeseiten_form_dom::{Document, Element, EventKind, ListenerId};

use crate::config::FormConfig;
use crate::markup;
use crate::timing::DATE_WIDGET_SETTLE_MS;
use crate::validators::Validator;

/// A field's current value, read live from the host tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// Raw text of an input, textarea, or select.
    Text(String),
    /// Zero-or-one selection (radio group, consent checkbox).
    Single(Option<String>),
    /// Checked option values of a checkbox group, in document order.
    Many(Vec<String>),
    /// The file selection of a file input.
    Files(Vec<String>),
}

impl FieldValue {
    /// Type-specific emptiness: trimmed text, list length, selection
    /// presence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Single(selection) => selection.is_none(),
            Self::Many(values) => values.is_empty(),
            Self::Files(files) => files.is_empty(),
        }
    }

    /// The textual form, for the shape validators. Non-text values have
    /// none.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// The closed set of widgets a field group can contain.
#[derive(Clone, Debug)]
pub enum FieldControl {
    /// A text-like input (text/email/number/tel/url/date) or textarea.
    Input(Element),
    /// A file input; selecting files auto-advances.
    FileUpload(Element),
    /// A single-select dropdown.
    Select(Element),
    /// A consent checkbox; unchecked reads as no value at all.
    Consent(Element),
    /// A multi-select checkbox group.
    Checkboxes(Vec<Element>),
    /// A single-select radio group.
    Radio(Vec<Element>),
}

/// One visual form group under wizard control.
pub struct Field {
    document: Document,
    wrapper: Element,
    control: FieldControl,
    validators: RefCell<Vec<Validator>>,
    dirty: Cell<bool>,
}

impl Field {
    /// Wraps a field group. Tel inputs get their live input filter attached
    /// immediately, before any change wiring.
    pub fn new(document: Document, wrapper: Element, control: FieldControl) -> Rc<Self> {
        if let FieldControl::Input(input) = &control {
            if input.input_type().as_deref() == Some("tel") {
                Self::attach_tel_filter(input);
            }
        }
        Rc::new(Self {
            document,
            wrapper,
            control,
            validators: RefCell::new(Vec::new()),
            dirty: Cell::new(false),
        })
    }

    /// Strips characters a phone value may not contain, as the user types.
    fn attach_tel_filter(input: &Element) {
        let handle = input.clone();
        input.add_event_listener(EventKind::Input, move |_| {
            let raw = handle.value();
            let filtered: String = raw
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '))
                .collect();
            if filtered != raw {
                handle.set_value(&filtered);
            }
        });
    }

    /// The wrapper element — the field's identity in the host tree.
    #[must_use]
    pub fn wrapper(&self) -> &Element {
        &self.wrapper
    }

    #[must_use]
    pub fn control(&self) -> &FieldControl {
        &self.control
    }

    /// Whether the user has interacted with this field at least once.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn add_validator(&self, validator: Validator) {
        self.validators.borrow_mut().push(validator);
    }

    /// The attached validators, in evaluation order.
    #[must_use]
    pub fn validators(&self) -> Vec<Validator> {
        self.validators.borrow().clone()
    }

    /// Reads the current value live from the underlying widget.
    #[must_use]
    pub fn value(&self) -> FieldValue {
        match &self.control {
            FieldControl::Input(input) => FieldValue::Text(input.value()),
            FieldControl::Select(select) => FieldValue::Text(select.value()),
            FieldControl::FileUpload(input) => FieldValue::Files(input.files()),
            FieldControl::Consent(checkbox) => {
                FieldValue::Single(checkbox.checked().then(|| checkbox.value()))
            }
            FieldControl::Checkboxes(choices) => FieldValue::Many(
                choices
                    .iter()
                    .filter(|choice| choice.checked())
                    .map(Element::value)
                    .collect(),
            ),
            FieldControl::Radio(choices) => FieldValue::Single(
                choices
                    .iter()
                    .find(|choice| choice.checked())
                    .map(Element::value),
            ),
        }
    }

    /// Runs the validators in order and displays the first failure.
    ///
    /// When `hide_error_until_dirty` is set and the field is untouched, no
    /// error is rendered — but the true validity is still returned, so step
    /// advancement stays gated independently of what is shown.
    pub fn validate(&self, config: &FormConfig) -> bool {
        let mut failure = None;
        for validator in self.validators.borrow().iter() {
            let verdict = validator.is_valid(self, &config.error_messages);
            if !verdict.valid {
                failure = verdict.message;
                break;
            }
        }

        if config.hide_error_until_dirty && !self.dirty.get() {
            self.display_error(None);
        } else {
            self.display_error(failure.as_deref());
        }

        failure.is_none()
    }

    /// Shows, updates, or hides the single error node for this field.
    ///
    /// Idempotent: repeated calls with the same message reuse the node. The
    /// node sits immediately after the input container.
    pub fn display_error(&self, message: Option<&str>) {
        let existing = self
            .wrapper
            .find(|el| markup::ERROR_NODE.iter().all(|class| el.has_class(class)));

        self.wrapper.remove_class(markup::FIELD_ERROR);
        if let Some(node) = &existing {
            node.set_display(Some("none"));
        }

        let Some(message) = message else { return };

        self.wrapper.add_class(markup::FIELD_ERROR);
        let node = existing.unwrap_or_else(|| {
            let node = self.document.create_element("div");
            for class in markup::ERROR_NODE {
                node.add_class(class);
            }
            let container = self
                .wrapper
                .find(|el| el.has_class(markup::INPUT_CONTAINER));
            match container.and_then(|c| c.parent().map(|p| (p, c))) {
                Some((parent, container)) => parent.insert_after(&node, &container),
                None => self.wrapper.append_child(&node),
            }
            node
        });
        node.set_text(message);
        node.set_display(Some("block"));
    }

    /// Marks this field as the current step (or not). Display of the
    /// wrapper itself stays host-owned.
    pub fn show(&self, on: bool) {
        self.wrapper.set_class(markup::ACTIVE, on);
    }

    /// Whether the host currently renders this field's wrapper.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.wrapper.is_displayed()
    }

    /// Moves focus into the field's widget.
    ///
    /// File inputs are left alone: popping the file chooser when the step
    /// activates is disruptive, so the user clicks it themselves.
    pub fn focus(&self) {
        match &self.control {
            FieldControl::Input(element)
            | FieldControl::Select(element)
            | FieldControl::Consent(element) => element.focus(),
            FieldControl::Checkboxes(choices) | FieldControl::Radio(choices) => {
                if let Some(first) = choices.first() {
                    first.focus();
                }
            }
            FieldControl::FileUpload(_) => {}
        }
    }

    /// Scrolls the viewport so the wrapper sits centered.
    pub fn scroll_into_center(&self) {
        let rect = self.wrapper.rect();
        let target = rect.top + rect.height / 2.0 - self.document.viewport_height() / 2.0;
        self.document.scroll_to(target);
    }

    /// Wires change detection.
    ///
    /// `on_change` fires on every user interaction, after the dirty flag is
    /// set. `on_advance` is the variant-specific advance trigger: Enter on
    /// a text-like input, or a non-empty file selection.
    pub fn on_change(self: &Rc<Self>, on_change: Rc<dyn Fn()>, on_advance: Rc<dyn Fn()>) {
        let changed = self.make_change_handler(&on_change);

        match &self.control {
            FieldControl::Input(input) => {
                let handler = Rc::clone(&changed);
                input.add_event_listener(EventKind::Input, move |_| handler());
                let advance = Rc::clone(&on_advance);
                input.add_event_listener(EventKind::Keydown, move |event| {
                    if event.is_key("Enter") {
                        advance();
                    }
                });
                if input.has_class(markup::DATEPICKER) {
                    self.wire_date_widget(input, changed);
                }
            }
            FieldControl::FileUpload(input) => {
                let field = Rc::downgrade(self);
                let handler = Rc::clone(&changed);
                let advance = Rc::clone(&on_advance);
                input.add_event_listener(EventKind::Change, move |_| {
                    handler();
                    let Some(field) = field.upgrade() else { return };
                    if !field.value().is_empty() {
                        advance();
                    }
                });
            }
            FieldControl::Select(element) | FieldControl::Consent(element) => {
                for kind in [EventKind::Change, EventKind::Input] {
                    let handler = Rc::clone(&changed);
                    element.add_event_listener(kind, move |_| handler());
                }
            }
            FieldControl::Checkboxes(choices) | FieldControl::Radio(choices) => {
                for choice in choices {
                    for kind in [EventKind::Change, EventKind::Input] {
                        let handler = Rc::clone(&changed);
                        choice.add_event_listener(kind, move |_| handler());
                    }
                }
            }
        }
    }

    /// Builds the shared "mark dirty, then notify" handler.
    fn make_change_handler(self: &Rc<Self>, on_change: &Rc<dyn Fn()>) -> Rc<dyn Fn()> {
        let field: Weak<Self> = Rc::downgrade(self);
        let on_change = Rc::clone(on_change);
        Rc::new(move || {
            if let Some(field) = field.upgrade() {
                field.dirty.set(true);
            }
            on_change();
        })
    }

    /// Integrates the external date widget.
    ///
    /// The widget commits its value from a popup overlay the field never
    /// owns, so change detection goes the long way around: when the input
    /// gains focus, a one-shot click listener on the body watches for a
    /// click inside the overlay, then re-validates shortly after so the
    /// widget has written the (possibly range-separated) value.
    ///
    /// At most one watcher is pending per field: re-focusing replaces the
    /// previous registration instead of stacking a second one.
    fn wire_date_widget(self: &Rc<Self>, input: &Element, changed: Rc<dyn Fn()>) {
        let document = self.document.clone();
        let pending: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
        input.add_event_listener(EventKind::Focus, move |_| {
            let body = document.body();
            if let Some(stale) = pending.take() {
                body.remove_event_listener(stale);
            }
            let slot = Rc::clone(&pending);
            let remove_from = body.clone();
            let timers = document.clone();
            let changed = Rc::clone(&changed);
            let id = body.add_event_listener(EventKind::Click, move |event| {
                let inside_overlay = event
                    .target
                    .closest(|el| el.attr("id").as_deref() == Some(markup::DATEPICKER_OVERLAY_ID))
                    .is_some();
                if !inside_overlay {
                    return;
                }
                let notify = Rc::clone(&changed);
                timers.set_timeout(DATE_WIDGET_SETTLE_MS, move || notify());
                if let Some(id) = slot.take() {
                    remove_from.remove_event_listener(id);
                }
            });
            pending.set(Some(id));
        });
    }
}
