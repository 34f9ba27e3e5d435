//! The step state machine.
//!
//! [`LandeseitenForm`] drives one host form as a guided sequence: it owns
//! the ordered field list, the index of the current step, the transition
//! lock, and the navigation controls. Everything else is derived live —
//! visibility comes from the host tree on every decision, so fields the
//! host hides or reveals between interactions are skipped or picked up
//! without any re-registration.
//!
//! Transitions are dropped, not queued: while a paged swap is animating,
//! further advance/back requests are ignored.

use std::cell::Cell;
use std::rc::Rc;

use landeseiten_form_dom::{Document, Element, EventKind};

use crate::config::{FormConfig, TransitionMode};
use crate::controls::{FormControls, GravityControlsProvider};
use crate::error::WizardError;
use crate::fields::{Field, FieldControl};
use crate::markup;
use crate::progress::ProgressBar;
use crate::provider::GravityFieldsProvider;
use crate::timing::{AUTO_ADVANCE_MS, FILE_ADVANCE_MS, FOCUS_DELAY_MS, PAGED_ANIMATION_MS};

/// One wizard instance bound to one form root.
pub struct LandeseitenForm {
    inner: Rc<WizardInner>,
}

struct WizardInner {
    document: Document,
    form: Element,
    config: FormConfig,
    fields: Vec<Rc<Field>>,
    controls: FormControls,
    progress: Option<ProgressBar>,
    current: Cell<usize>,
    animating: Cell<bool>,
}

impl LandeseitenForm {
    /// Takes over a form root: scans its fields, creates the navigation
    /// controls, wires change detection, and activates the initial step.
    ///
    /// The initial step is the first visible field the host already marked
    /// as erroring (a server-side validation round leaves those marks), or
    /// failing that the first visible field.
    pub fn initialize(
        document: &Document,
        form: &Element,
        config: FormConfig,
    ) -> Result<Self, WizardError> {
        let fields = GravityFieldsProvider::new(document.clone(), form.clone()).provide();
        if fields.is_empty() {
            return Err(WizardError::NoEligibleFields);
        }
        let controls = GravityControlsProvider::new(document.clone(), form.clone())
            .provide(&config.button_text)
            .ok_or(WizardError::MissingControls)?;
        let progress = config
            .progress_bar
            .then(|| ProgressBar::create(document, form));

        let initial = fields
            .iter()
            .position(|f| f.is_visible() && f.wrapper().has_class(markup::FIELD_ERROR))
            .or_else(|| fields.iter().position(|f| f.is_visible()))
            .unwrap_or(0);

        tracing::info!(
            fields = fields.len(),
            mode = config.mode.as_str(),
            initial,
            "wizard taking over form"
        );

        let inner = Rc::new(WizardInner {
            document: document.clone(),
            form: form.clone(),
            config,
            fields,
            controls,
            progress,
            current: Cell::new(initial),
            animating: Cell::new(false),
        });
        inner.init();
        Ok(Self { inner })
    }

    /// The form root this instance drives.
    #[must_use]
    pub fn form(&self) -> &Element {
        &self.inner.form
    }

    /// Index of the current step within the full field list.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.inner.current.get()
    }

    /// Whether a paged transition is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.inner.animating.get()
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.inner.fields.len()
    }

    /// Completion percentage over the currently visible fields.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.inner.progress_percent()
    }
}

impl WizardInner {
    fn init(self: &Rc<Self>) {
        self.form.add_class(markup::FORM_ACTIVE);
        self.form
            .set_attr("data-mode", self.config.mode.as_str());

        // The native submit stays out of reach until the last step.
        self.controls
            .submit_button
            .set_value(&self.config.button_text.submit);
        self.controls.submit_button.set_display(Some("none"));

        for (index, field) in self.fields.iter().enumerate() {
            self.wire_field(index, field);
            field.show(index == self.current.get());
        }

        let weak = Rc::downgrade(self);
        self.controls
            .next_button
            .add_event_listener(EventKind::Click, move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.advance();
                }
            });
        let weak = Rc::downgrade(self);
        self.controls
            .previous_button
            .add_event_listener(EventKind::Click, move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.go_back();
                }
            });

        if self.config.auto_focus {
            let field = &self.fields[self.current.get()];
            if field.is_visible() {
                field.focus();
            }
        }
        self.handle_field_change();
    }

    /// Wires one field's change/advance callbacks.
    ///
    /// Radio and select choices schedule a debounced auto-advance on every
    /// change (when enabled); file selections schedule a shorter one; Enter
    /// on a text-like input advances immediately (when enabled).
    fn wire_field(self: &Rc<Self>, index: usize, field: &Rc<Field>) {
        let auto_advance = self.config.auto_progress_radio
            && matches!(
                field.control(),
                FieldControl::Radio(_) | FieldControl::Select(_)
            );

        let weak = Rc::downgrade(self);
        let changed: Rc<dyn Fn()> = Rc::new(move || {
            let Some(inner) = weak.upgrade() else { return };
            inner.handle_field_change();
            if auto_advance {
                inner.schedule_auto_advance(AUTO_ADVANCE_MS, index);
            }
        });

        let advance: Rc<dyn Fn()> = match field.control() {
            FieldControl::FileUpload(_) => {
                let weak = Rc::downgrade(self);
                Rc::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.schedule_auto_advance(FILE_ADVANCE_MS, index);
                    }
                })
            }
            FieldControl::Input(_) if self.config.enter_to_advance => {
                let weak = Rc::downgrade(self);
                Rc::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.advance();
                    }
                })
            }
            _ => Rc::new(|| {}),
        };

        field.on_change(changed, advance);
    }

    /// Re-validates the current step and refreshes every derived control.
    ///
    /// A current step the host has hidden never gates advancement: it is
    /// skipped outright instead of validated, so Next stays usable and the
    /// user can move on to the next visible step.
    fn handle_field_change(&self) {
        let field = &self.fields[self.current.get()];
        let valid = !field.is_visible() || field.validate(&self.config);
        self.controls.next_button.set_disabled(!valid);
        self.update_button_visibility();
        if let Some(bar) = &self.progress {
            bar.update(self.progress_percent());
        }
    }

    fn find_next_visible(&self, from: usize) -> Option<usize> {
        self.fields
            .iter()
            .enumerate()
            .skip(from + 1)
            .find(|(_, field)| field.is_visible())
            .map(|(index, _)| index)
    }

    fn find_prev_visible(&self, from: usize) -> Option<usize> {
        self.fields[..from]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, field)| field.is_visible())
            .map(|(index, _)| index)
    }

    fn advance(self: &Rc<Self>) {
        if self.animating.get() || self.controls.next_button.disabled() {
            return;
        }
        let current = self.current.get();
        let Some(next) = self.find_next_visible(current) else {
            // Last visible step: nothing to advance to, but the submit
            // affordance may need to appear.
            self.update_button_visibility();
            return;
        };
        tracing::trace!(from = current, to = next, "advancing");
        self.fields[current]
            .wrapper()
            .add_class(markup::STEP_COMPLETED);
        self.transition_to(next, true);
    }

    fn go_back(self: &Rc<Self>) {
        if self.animating.get() {
            return;
        }
        let current = self.current.get();
        let Some(prev) = self.find_prev_visible(current) else {
            return;
        };
        tracing::trace!(from = current, to = prev, "going back");
        self.fields[prev]
            .wrapper()
            .remove_class(markup::STEP_COMPLETED);
        self.transition_to(prev, false);
    }

    fn transition_to(self: &Rc<Self>, target: usize, forward: bool) {
        self.animating.set(true);
        self.form.set_class(markup::REVERSING, !forward);
        let origin = self.current.get();

        if self.config.mode == TransitionMode::Paged {
            self.fields[origin]
                .wrapper()
                .add_class(markup::ANIMATING_OUT);
            let weak = Rc::downgrade(self);
            self.document.set_timeout(PAGED_ANIMATION_MS, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.complete_transition(origin, target, forward);
                }
            });
        } else {
            self.complete_transition(origin, target, forward);
        }
    }

    fn complete_transition(self: &Rc<Self>, origin: usize, target: usize, forward: bool) {
        let paged = self.config.mode == TransitionMode::Paged;
        let old = &self.fields[origin];
        let new = &self.fields[target];

        old.wrapper().remove_class(markup::ANIMATING_OUT);
        // In reveal mode, completed steps stay marked active above the
        // current one; everywhere else the old step deactivates.
        if paged || !forward {
            old.show(false);
        }
        new.show(true);

        let margin = self.config.scroll_top_margin;
        if !paged && forward {
            let delta = old.wrapper().rect().bottom() - self.document.scroll_y() - margin;
            self.document.scroll_by(delta);
        } else {
            self.document.scroll_to(new.wrapper().rect().top - margin);
        }

        if self.config.auto_focus {
            let field = Rc::clone(new);
            self.document
                .set_timeout(FOCUS_DELAY_MS, move || field.focus());
        }

        self.current.set(target);
        self.handle_field_change();
        self.animating.set(false);
    }

    /// Shows the affordances that make sense for the current position:
    /// submit replaces next on the last visible step once it validates,
    /// previous appears whenever there is a visible step behind.
    fn update_button_visibility(&self) {
        let current = self.current.get();
        let at_last = self.find_next_visible(current).is_none();
        let valid = !self.controls.next_button.disabled();

        if at_last && valid {
            self.controls.next_button.set_display(Some("none"));
            self.controls
                .submit_button
                .set_display(Some("inline-block"));
        } else {
            self.controls.next_button.set_display(None);
            self.controls.submit_button.set_display(Some("none"));
        }

        let has_prev = self.find_prev_visible(current).is_some();
        self.controls
            .previous_button
            .set_display(Some(if has_prev { "inline-block" } else { "none" }));
    }

    fn progress_percent(&self) -> f64 {
        let visible: Vec<usize> = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_visible())
            .map(|(index, _)| index)
            .collect();
        if visible.len() <= 1 {
            return 0.0;
        }
        let position = visible
            .iter()
            .position(|&index| index == self.current.get())
            .unwrap_or(0);
        #[allow(clippy::cast_precision_loss)]
        let percent = (position + 1) as f64 / visible.len() as f64 * 100.0;
        percent.clamp(0.0, 100.0)
    }

    /// Debounced auto-advance. The choice that scheduled it is re-checked
    /// at fire time: a retracted or re-edited selection, or a step change
    /// in the meantime, cancels the advance.
    fn schedule_auto_advance(self: &Rc<Self>, delay_ms: u64, origin: usize) {
        let weak = Rc::downgrade(self);
        self.document.set_timeout(delay_ms, move || {
            let Some(inner) = weak.upgrade() else { return };
            if inner.current.get() != origin || inner.animating.get() {
                return;
            }
            inner.handle_field_change();
            inner.advance();
        });
    }
}
