//! The document: element factory, viewport state, focus, and timers.
//!
//! All of the wizard's suspension points are plain timeouts (animation
//! settle, auto-advance debounce, deferred focus), so the document carries a
//! deterministic timer queue instead of an async runtime. The host — or a
//! test — pumps it with [`Document::advance`]; callbacks run to completion
//! in deadline order on the caller's stack, which is exactly the
//! cooperative, no-preemption model of a UI runtime.

use std::cell::RefCell;
use std::rc::Rc;

use crate::element::Element;

/// Identifies a scheduled timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerId(u64);

struct Timer {
    id: u64,
    deadline: u64,
    callback: Option<Box<dyn FnOnce()>>,
}

pub(crate) struct DocumentData {
    scroll_y: f64,
    viewport_height: f64,
    pub(crate) focused: Option<Element>,
    now_ms: u64,
    next_timer_id: u64,
    timers: Vec<Timer>,
}

/// A handle to the page: owns the body, the viewport, and the timer queue.
#[derive(Clone)]
pub struct Document {
    inner: Rc<RefCell<DocumentData>>,
    body: Element,
}

impl Document {
    /// Creates an empty document with a fresh `body` element.
    #[must_use]
    pub fn new() -> Self {
        let inner = Rc::new(RefCell::new(DocumentData {
            scroll_y: 0.0,
            viewport_height: 800.0,
            focused: None,
            now_ms: 0,
            next_timer_id: 0,
            timers: Vec::new(),
        }));
        let body = Element::new(Rc::downgrade(&inner), "body");
        Self { inner, body }
    }

    /// The root element the host attaches its markup under.
    #[must_use]
    pub fn body(&self) -> Element {
        self.body.clone()
    }

    /// Creates a detached element owned by this document.
    #[must_use]
    pub fn create_element(&self, tag: &str) -> Element {
        Element::new(Rc::downgrade(&self.inner), tag)
    }

    // ── Viewport ─────────────────────────────────────────────────────

    #[must_use]
    pub fn scroll_y(&self) -> f64 {
        self.inner.borrow().scroll_y
    }

    /// Scrolls to an absolute offset, clamped at the top of the page.
    pub fn scroll_to(&self, y: f64) {
        self.inner.borrow_mut().scroll_y = y.max(0.0);
    }

    /// Scrolls by a relative amount, clamped at the top of the page.
    pub fn scroll_by(&self, delta: f64) {
        let mut data = self.inner.borrow_mut();
        data.scroll_y = (data.scroll_y + delta).max(0.0);
    }

    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.inner.borrow().viewport_height
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.inner.borrow_mut().viewport_height = height;
    }

    /// The element that currently holds focus, if any.
    #[must_use]
    pub fn focused(&self) -> Option<Element> {
        self.inner.borrow().focused.clone()
    }

    // ── Timers ───────────────────────────────────────────────────────

    /// Current document clock, in milliseconds since creation.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Schedules `callback` to run once `delay_ms` of document time has
    /// elapsed. Timers with equal deadlines run in scheduling order.
    pub fn set_timeout<F>(&self, delay_ms: u64, callback: F) -> TimerId
    where
        F: FnOnce() + 'static,
    {
        let mut data = self.inner.borrow_mut();
        let id = data.next_timer_id;
        data.next_timer_id += 1;
        let deadline = data.now_ms + delay_ms;
        tracing::trace!(id, delay_ms, deadline, "timeout scheduled");
        data.timers.push(Timer {
            id,
            deadline,
            callback: Some(Box::new(callback)),
        });
        TimerId(id)
    }

    /// Advances the document clock by `ms`, running every due timer in
    /// deadline order. Timers scheduled by a running callback also fire if
    /// their deadline falls within the advanced window.
    pub fn advance(&self, ms: u64) {
        let target = self.inner.borrow().now_ms + ms;
        loop {
            let callback = {
                let mut data = self.inner.borrow_mut();
                let due = data
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.deadline <= target)
                    .min_by_key(|(_, t)| (t.deadline, t.id))
                    .map(|(index, _)| index);
                match due {
                    Some(index) => {
                        let mut timer = data.timers.remove(index);
                        data.now_ms = data.now_ms.max(timer.deadline);
                        timer.callback.take()
                    }
                    None => {
                        data.now_ms = target;
                        None
                    }
                }
            };
            match callback {
                Some(callback) => callback(),
                None => break,
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
