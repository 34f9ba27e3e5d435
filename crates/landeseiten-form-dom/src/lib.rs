//! # landeseiten-form-dom
//!
//! A headless, single-threaded host-DOM abstraction for the wizard engine.
//!
//! The wizard core never talks to a real browser directly; it talks to the
//! small surface modeled here: an element tree with class lists, inline
//! display styles, attributes and layout rects, bubbling event dispatch, and
//! a [`Document`] owning viewport scroll state, the focused element, and a
//! deterministic timer queue.
//!
//! Everything is cooperative and single-threaded: handles are `Rc`-based,
//! events and timers run to completion on the caller's stack, and tests
//! drive time explicitly through [`Document::advance`].

pub mod document;
pub mod element;
pub mod event;

pub use document::{Document, TimerId};
pub use element::{Element, ListenerId, Rect};
pub use event::{Event, EventKind};
