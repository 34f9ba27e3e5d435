//! Class names and markers of the host form markup.
//!
//! The host renders Gravity-Forms-shaped markup; these constants are the
//! complete vocabulary the wizard reads from it and writes back to it.

/// Marks a form root the bootstrap should take over.
pub const FORM_ACTIVE: &str = "landeseiten-form-active";

// ── Read from the host ───────────────────────────────────────────────

/// A field-group wrapper.
pub const FIELD_GROUP: &str = "gfield";
/// Utility container used by the host's validation summary; never a step.
pub const VALIDATION_CONTAINER: &str = "gform_validation_container";
/// Host-hidden field; never a step.
pub const VISIBILITY_HIDDEN: &str = "gfield_visibility_hidden";
/// Explicit opt-out marker; never a step.
pub const SKIP: &str = "lf-skip";
/// The group carries a required constraint.
pub const REQUIRED: &str = "gfield_contains_required";
/// A radio choice group lives inside the wrapper.
pub const RADIO_GROUP: &str = "gfield_radio";
/// A checkbox choice group lives inside the wrapper.
pub const CHECKBOX_GROUP: &str = "gfield_checkbox";
/// A consent checkbox lives inside the wrapper.
pub const CONSENT_CONTAINER: &str = "ginput_container_consent";
/// One selectable option of a choice group.
pub const CHOICE: &str = "gchoice";
/// The container holding the group's input widget; the error node is
/// inserted immediately after it.
pub const INPUT_CONTAINER: &str = "ginput_container";
/// The control region holding the native submit control.
pub const FOOTER: &str = "gform_footer";
/// An input managed by the external date-range widget.
pub const DATEPICKER: &str = "datepicker";
/// Element id of the external date widget's popup overlay.
pub const DATEPICKER_OVERLAY_ID: &str = "ui-datepicker-div";
/// Separator between the two halves of a date-range value.
pub const DATE_RANGE_SEPARATOR: &str = " - ";

// ── Written by the wizard ────────────────────────────────────────────

/// The wrapper of the current step.
pub const ACTIVE: &str = "active";
/// A step the user has completed and moved past.
pub const STEP_COMPLETED: &str = "step-completed";
/// A wrapper mid animate-out during a paged transition.
pub const ANIMATING_OUT: &str = "animating-out";
/// Set on the form root while moving backward.
pub const REVERSING: &str = "is-reversing";
/// The wrapper of a field whose first failing validator is displayed.
pub const FIELD_ERROR: &str = "gfield_error";
/// Classes of the inserted error text node.
pub const ERROR_NODE: [&str; 2] = ["gfield_description", "validation_message"];
/// Classes of the created Next button.
pub const NEXT_BUTTON: [&str; 3] = ["gform_button", "button", "button-next"];
/// Classes of the created Previous button.
pub const PREVIOUS_BUTTON: [&str; 3] = ["gform_button", "button", "button-previous"];
/// The progress indicator track appended to the form root.
pub const PROGRESS: &str = "lf-progress";
/// The progress indicator fill.
pub const PROGRESS_FILL: &str = "lf-progress-fill";
