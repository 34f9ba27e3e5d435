//! Logging integration for the wizard.
//!
//! Provides helpers for configuring [`tracing`]-based logging and for
//! creating per-form spans so concurrent instances on one page stay
//! distinguishable in the logs.

/// Sets up the global tracing subscriber.
///
/// The filter comes from `level` (e.g. "debug", "info", or a full filter
/// directive). With `debug` set a pretty, human-readable format is used;
/// otherwise a structured JSON format is used. Installing twice is a no-op.
pub fn setup_logging(level: &str, debug: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    if debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one form instance.
///
/// Enter it around initialization and event handling so all entries carry
/// the form's index on the page.
///
/// # Examples
///
/// ```
/// use landeseiten_form_wizard::logging::form_span;
///
/// let span = form_span(0);
/// let _guard = span.enter();
/// tracing::info!("initializing");
/// ```
pub fn form_span(form_index: usize) -> tracing::Span {
    tracing::info_span!("form", index = form_index)
}
