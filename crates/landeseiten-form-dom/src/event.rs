//! Event types dispatched through the host tree.

use crate::element::Element;

/// The kinds of events the wizard core listens for.
///
/// This is a closed set: the engine only ever wires these five, so there is
/// no need for arbitrary event names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Fired as the user edits a value (per keystroke / per toggle).
    Input,
    /// Fired when a value change is committed (file picked, option chosen).
    Change,
    /// Fired on pointer activation.
    Click,
    /// Fired on a key press; carries the key name.
    Keydown,
    /// Fired when an element receives focus.
    Focus,
}

/// A dispatched event.
///
/// Events bubble from the target up through its ancestors; every listener
/// on the chain registered for the matching [`EventKind`] is invoked with
/// the same event value.
#[derive(Clone)]
pub struct Event {
    /// What kind of event this is.
    pub kind: EventKind,
    /// The key name for [`EventKind::Keydown`] events (`"Enter"`, ...).
    pub key: Option<String>,
    /// The element the event was dispatched on.
    pub target: Element,
}

impl Event {
    /// Returns `true` if this is a keydown of the named key.
    #[must_use]
    pub fn is_key(&self, name: &str) -> bool {
        self.kind == EventKind::Keydown && self.key.as_deref() == Some(name)
    }
}
