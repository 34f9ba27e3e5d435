//! Timing constants for the wizard's deferred work.
//!
//! All suspension points in the engine are plain timeouts on the document
//! clock; tests pump them with `Document::advance`.

/// Settle time of the paged-mode animate-out before the swap completes.
pub const PAGED_ANIMATION_MS: u64 = 500;

/// Debounce before a radio or select choice auto-advances, so the UI can
/// render the selection first.
pub const AUTO_ADVANCE_MS: u64 = 150;

/// Debounce before a file selection auto-advances.
pub const FILE_ADVANCE_MS: u64 = 100;

/// Delay before the new step receives focus, after scrolling settles.
pub const FOCUS_DELAY_MS: u64 = 300;

/// Delay before re-validating after a click inside the external date
/// widget's overlay, so the widget can write its value first.
pub const DATE_WIDGET_SETTLE_MS: u64 = 100;
