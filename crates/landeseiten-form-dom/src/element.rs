//! Element handles for the headless host tree.
//!
//! An [`Element`] is a cheap, cloneable handle to one node. Identity is the
//! handle itself: two `Element`s compare equal iff they point at the same
//! node, which is how the wizard treats a field's wrapper as its identity —
//! no separate id is derived or compared.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::document::DocumentData;
use crate::event::{Event, EventKind};

/// Absolute layout geometry for an element.
///
/// `top` is measured from the top of the page, not the viewport; the
/// document's scroll position converts between the two.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Distance of the top edge from the top of the page, in pixels.
    pub top: f64,
    /// Rendered height, in pixels.
    pub height: f64,
}

impl Rect {
    /// Distance of the bottom edge from the top of the page.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Identifies a registered event listener so it can be removed later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

struct ListenerEntry {
    id: ListenerId,
    kind: EventKind,
    handler: Rc<dyn Fn(&Event)>,
}

pub(crate) struct ElementData {
    tag: String,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    value: String,
    checked: bool,
    disabled: bool,
    text: String,
    display: Option<String>,
    rect: Rect,
    files: Vec<String>,
    parent: Weak<RefCell<ElementData>>,
    children: Vec<Element>,
    listeners: Vec<ListenerEntry>,
    next_listener_id: u64,
    document: Weak<RefCell<DocumentData>>,
}

/// A handle to a node in the host tree.
#[derive(Clone)]
pub struct Element {
    pub(crate) inner: Rc<RefCell<ElementData>>,
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        write!(f, "<{}", data.tag)?;
        if !data.classes.is_empty() {
            write!(f, " class=\"{}\"", data.classes.join(" "))?;
        }
        write!(f, ">")
    }
}

impl Element {
    pub(crate) fn new(document: Weak<RefCell<DocumentData>>, tag: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementData {
                tag: tag.to_string(),
                classes: Vec::new(),
                attributes: HashMap::new(),
                value: String::new(),
                checked: false,
                disabled: false,
                text: String::new(),
                display: None,
                rect: Rect::default(),
                files: Vec::new(),
                parent: Weak::new(),
                children: Vec::new(),
                listeners: Vec::new(),
                next_listener_id: 0,
                document,
            })),
        }
    }

    /// The element's tag name (`"input"`, `"div"`, ...).
    #[must_use]
    pub fn tag(&self) -> String {
        self.inner.borrow().tag.clone()
    }

    // ── Classes ──────────────────────────────────────────────────────

    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.inner.borrow().classes.iter().any(|c| c == name)
    }

    pub fn add_class(&self, name: &str) {
        let mut data = self.inner.borrow_mut();
        if !data.classes.iter().any(|c| c == name) {
            data.classes.push(name.to_string());
        }
    }

    pub fn remove_class(&self, name: &str) {
        self.inner.borrow_mut().classes.retain(|c| c != name);
    }

    /// Adds or removes a class depending on `on`.
    pub fn set_class(&self, name: &str, on: bool) {
        if on {
            self.add_class(name);
        } else {
            self.remove_class(name);
        }
    }

    // ── Attributes and form state ────────────────────────────────────

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<String> {
        self.inner.borrow().attributes.get(name).cloned()
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        self.inner
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// The `type` attribute, if any (input kind discrimination).
    #[must_use]
    pub fn input_type(&self) -> Option<String> {
        self.attr("type")
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.inner.borrow().value.clone()
    }

    pub fn set_value(&self, value: &str) {
        self.inner.borrow_mut().value = value.to_string();
    }

    #[must_use]
    pub fn checked(&self) -> bool {
        self.inner.borrow().checked
    }

    pub fn set_checked(&self, checked: bool) {
        self.inner.borrow_mut().checked = checked;
    }

    #[must_use]
    pub fn disabled(&self) -> bool {
        self.inner.borrow().disabled
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.inner.borrow_mut().disabled = disabled;
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    pub fn set_text(&self, text: &str) {
        self.inner.borrow_mut().text = text.to_string();
    }

    /// The file selection of a file input (names only; contents are the
    /// host's concern).
    #[must_use]
    pub fn files(&self) -> Vec<String> {
        self.inner.borrow().files.clone()
    }

    pub fn set_files(&self, files: Vec<String>) {
        self.inner.borrow_mut().files = files;
    }

    // ── Display and layout ───────────────────────────────────────────

    /// The inline `display` style, if one is set.
    #[must_use]
    pub fn display(&self) -> Option<String> {
        self.inner.borrow().display.clone()
    }

    /// Sets or clears the inline `display` style.
    pub fn set_display(&self, display: Option<&str>) {
        self.inner.borrow_mut().display = display.map(str::to_string);
    }

    /// Whether this element is currently rendered.
    ///
    /// An element is displayed iff neither it nor any ancestor carries an
    /// inline `display: none`. This is re-derived from the live tree on
    /// every call; host-owned conditional logic may flip it at any time.
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        let mut current = Some(self.clone());
        while let Some(element) = current {
            if element.inner.borrow().display.as_deref() == Some("none") {
                return false;
            }
            current = element.parent();
        }
        true
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.inner.borrow().rect
    }

    pub fn set_rect(&self, top: f64, height: f64) {
        self.inner.borrow_mut().rect = Rect { top, height };
    }

    // ── Tree structure ───────────────────────────────────────────────

    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let parent = self.inner.borrow().parent.upgrade()?;
        Some(Self { inner: parent })
    }

    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.inner.borrow().children.clone()
    }

    fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.inner.borrow_mut().children.retain(|c| c != self);
        }
        self.inner.borrow_mut().parent = Weak::new();
    }

    pub fn append_child(&self, child: &Self) {
        child.detach();
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        self.inner.borrow_mut().children.push(child.clone());
    }

    /// Inserts `child` as the first child.
    pub fn prepend_child(&self, child: &Self) {
        child.detach();
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        self.inner.borrow_mut().children.insert(0, child.clone());
    }

    /// Inserts `new_child` immediately before `reference` among this
    /// element's children; appends if `reference` is not a child.
    pub fn insert_before(&self, new_child: &Self, reference: &Self) {
        new_child.detach();
        new_child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        let mut data = self.inner.borrow_mut();
        let position = data.children.iter().position(|c| c == reference);
        match position {
            Some(index) => data.children.insert(index, new_child.clone()),
            None => data.children.push(new_child.clone()),
        }
    }

    /// Inserts `new_child` immediately after `reference` among this
    /// element's children; appends if `reference` is not a child.
    pub fn insert_after(&self, new_child: &Self, reference: &Self) {
        new_child.detach();
        new_child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        let mut data = self.inner.borrow_mut();
        let position = data.children.iter().position(|c| c == reference);
        match position {
            Some(index) => data.children.insert(index + 1, new_child.clone()),
            None => data.children.push(new_child.clone()),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Depth-first search over descendants (document order), returning the
    /// first match. Does not consider `self`.
    #[must_use]
    pub fn find<P>(&self, predicate: P) -> Option<Self>
    where
        P: Fn(&Self) -> bool,
    {
        self.find_impl(&predicate)
    }

    fn find_impl(&self, predicate: &dyn Fn(&Self) -> bool) -> Option<Self> {
        for child in self.children() {
            if predicate(&child) {
                return Some(child);
            }
            if let Some(found) = child.find_impl(predicate) {
                return Some(found);
            }
        }
        None
    }

    /// All matching descendants, in document order. Does not consider `self`.
    #[must_use]
    pub fn find_all<P>(&self, predicate: P) -> Vec<Self>
    where
        P: Fn(&Self) -> bool,
    {
        let mut matches = Vec::new();
        self.find_all_impl(&predicate, &mut matches);
        matches
    }

    fn find_all_impl(&self, predicate: &dyn Fn(&Self) -> bool, matches: &mut Vec<Self>) {
        for child in self.children() {
            if predicate(&child) {
                matches.push(child.clone());
            }
            child.find_all_impl(predicate, matches);
        }
    }

    /// Walks up from `self` (inclusive) and returns the first element
    /// matching the predicate.
    #[must_use]
    pub fn closest<P>(&self, predicate: P) -> Option<Self>
    where
        P: Fn(&Self) -> bool,
    {
        let mut current = Some(self.clone());
        while let Some(element) = current {
            if predicate(&element) {
                return Some(element);
            }
            current = element.parent();
        }
        None
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Registers a listener for `kind` on this element.
    pub fn add_event_listener<F>(&self, kind: EventKind, handler: F) -> ListenerId
    where
        F: Fn(&Event) + 'static,
    {
        let mut data = self.inner.borrow_mut();
        let id = ListenerId(data.next_listener_id);
        data.next_listener_id += 1;
        data.listeners.push(ListenerEntry {
            id,
            kind,
            handler: Rc::new(handler),
        });
        id
    }

    pub fn remove_event_listener(&self, id: ListenerId) {
        self.inner.borrow_mut().listeners.retain(|l| l.id != id);
    }

    /// Dispatches an event on this element, bubbling through its ancestors.
    ///
    /// Listener lists are snapshotted per element before invocation, so
    /// handlers may freely mutate the tree or their own registration.
    pub fn dispatch(&self, kind: EventKind, key: Option<&str>) {
        let event = Event {
            kind,
            key: key.map(str::to_string),
            target: self.clone(),
        };
        let mut chain = vec![self.clone()];
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            chain.push(parent.clone());
            current = parent;
        }
        tracing::trace!(?kind, target = ?self, depth = chain.len(), "dispatch");
        for element in chain {
            let handlers: Vec<Rc<dyn Fn(&Event)>> = element
                .inner
                .borrow()
                .listeners
                .iter()
                .filter(|l| l.kind == kind)
                .map(|l| Rc::clone(&l.handler))
                .collect();
            for handler in handlers {
                handler(&event);
            }
        }
    }

    /// Dispatches an `input` event.
    pub fn dispatch_input(&self) {
        self.dispatch(EventKind::Input, None);
    }

    /// Dispatches a `change` event.
    pub fn dispatch_change(&self) {
        self.dispatch(EventKind::Change, None);
    }

    /// Dispatches a `click` event.
    pub fn dispatch_click(&self) {
        self.dispatch(EventKind::Click, None);
    }

    /// Dispatches a `keydown` event for the named key.
    pub fn dispatch_keydown(&self, key: &str) {
        self.dispatch(EventKind::Keydown, Some(key));
    }

    /// Gives this element focus and dispatches a `focus` event.
    pub fn focus(&self) {
        let document = self.inner.borrow().document.clone();
        if let Some(document) = document.upgrade() {
            document.borrow_mut().focused = Some(self.clone());
        }
        self.dispatch(EventKind::Focus, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use std::cell::Cell;

    fn doc() -> Document {
        Document::new()
    }

    #[test]
    fn class_toggling_is_idempotent() {
        let document = doc();
        let element = document.create_element("div");
        element.add_class("active");
        element.add_class("active");
        assert!(element.has_class("active"));
        element.remove_class("active");
        assert!(!element.has_class("active"));
        element.set_class("active", true);
        element.set_class("active", false);
        assert!(!element.has_class("active"));
    }

    #[test]
    fn identity_is_handle_equality() {
        let document = doc();
        let a = document.create_element("div");
        let b = document.create_element("div");
        let a2 = a.clone();
        assert_eq!(a, a2);
        assert_ne!(a, b);
    }

    #[test]
    fn displayed_derives_from_ancestor_chain() {
        let document = doc();
        let outer = document.create_element("div");
        let inner = document.create_element("div");
        outer.append_child(&inner);
        assert!(inner.is_displayed());
        outer.set_display(Some("none"));
        assert!(!inner.is_displayed());
        outer.set_display(Some("block"));
        assert!(inner.is_displayed());
        inner.set_display(Some("none"));
        assert!(!inner.is_displayed());
    }

    #[test]
    fn insert_before_and_after_keep_order() {
        let document = doc();
        let parent = document.create_element("div");
        let first = document.create_element("span");
        let last = document.create_element("span");
        parent.append_child(&first);
        parent.append_child(&last);

        let middle = document.create_element("span");
        parent.insert_before(&middle, &last);
        assert_eq!(parent.children(), vec![first.clone(), middle.clone(), last.clone()]);

        let second = document.create_element("span");
        parent.insert_after(&second, &first);
        assert_eq!(parent.children()[1], second);
        assert_eq!(parent.children().len(), 4);
    }

    #[test]
    fn reinserting_moves_instead_of_duplicating() {
        let document = doc();
        let a = document.create_element("div");
        let b = document.create_element("div");
        let child = document.create_element("span");
        a.append_child(&child);
        b.append_child(&child);
        assert!(a.children().is_empty());
        assert_eq!(child.parent(), Some(b));
    }

    #[test]
    fn find_all_is_document_order() {
        let document = doc();
        let root = document.create_element("div");
        let group_a = document.create_element("div");
        let group_b = document.create_element("div");
        root.append_child(&group_a);
        root.append_child(&group_b);
        let input_a = document.create_element("input");
        let input_b = document.create_element("input");
        group_a.append_child(&input_a);
        group_b.append_child(&input_b);

        let inputs = root.find_all(|el| el.tag() == "input");
        assert_eq!(inputs, vec![input_a, input_b]);
    }

    #[test]
    fn closest_walks_up_inclusive() {
        let document = doc();
        let outer = document.create_element("div");
        outer.add_class("wrapper");
        let inner = document.create_element("input");
        outer.append_child(&inner);
        assert_eq!(inner.closest(|el| el.has_class("wrapper")), Some(outer.clone()));
        assert_eq!(outer.closest(|el| el.has_class("wrapper")), Some(outer));
        assert_eq!(inner.closest(|el| el.has_class("missing")), None);
    }

    #[test]
    fn events_bubble_to_ancestors() {
        let document = doc();
        let outer = document.create_element("div");
        let inner = document.create_element("input");
        outer.append_child(&inner);

        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        inner.add_event_listener(EventKind::Input, move |_| h.set(h.get() + 1));
        let h = Rc::clone(&hits);
        outer.add_event_listener(EventKind::Input, move |_| h.set(h.get() + 10));

        inner.dispatch_input();
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn removed_listener_no_longer_fires() {
        let document = doc();
        let element = document.create_element("div");
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let id = element.add_event_listener(EventKind::Click, move |_| h.set(h.get() + 1));
        element.dispatch_click();
        element.remove_event_listener(id);
        element.dispatch_click();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn keydown_carries_key_name() {
        let document = doc();
        let element = document.create_element("input");
        let saw_enter = Rc::new(Cell::new(false));
        let s = Rc::clone(&saw_enter);
        element.add_event_listener(EventKind::Keydown, move |event| {
            if event.is_key("Enter") {
                s.set(true);
            }
        });
        element.dispatch_keydown("a");
        assert!(!saw_enter.get());
        element.dispatch_keydown("Enter");
        assert!(saw_enter.get());
    }

    #[test]
    fn focus_tracks_on_document() {
        let document = doc();
        let element = document.create_element("input");
        document.body().append_child(&element);
        assert!(document.focused().is_none());
        element.focus();
        assert_eq!(document.focused(), Some(element));
    }
}
