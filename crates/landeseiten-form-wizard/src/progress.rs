//! The optional progress indicator.

use landeseiten_form_dom::{Document, Element};

use crate::markup;

/// A track-and-fill progress bar prepended to the form root.
pub struct ProgressBar {
    fill: Element,
}

impl ProgressBar {
    /// Creates the bar as the form's first child, at 0%.
    #[must_use]
    pub fn create(document: &Document, form: &Element) -> Self {
        let track = document.create_element("div");
        track.add_class(markup::PROGRESS);
        track.set_attr("role", "progressbar");
        track.set_attr("aria-valuemin", "0");
        track.set_attr("aria-valuemax", "100");
        let fill = document.create_element("div");
        fill.add_class(markup::PROGRESS_FILL);
        track.append_child(&fill);
        form.prepend_child(&track);
        let bar = Self { fill };
        bar.update(0.0);
        bar
    }

    /// Sets the fill width to `percent` of the track.
    pub fn update(&self, percent: f64) {
        self.fill
            .set_attr("style", &format!("width: {percent:.0}%"));
        if let Some(track) = self.fill.parent() {
            track.set_attr("aria-valuenow", &format!("{percent:.0}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_prepended_and_starts_at_zero() {
        let document = Document::new();
        let form = document.create_element("form");
        document.body().append_child(&form);
        let field = document.create_element("div");
        form.append_child(&field);

        let _bar = ProgressBar::create(&document, &form);

        let children = form.children();
        assert!(children[0].has_class(markup::PROGRESS));
        assert_eq!(children[0].attr("aria-valuenow").as_deref(), Some("0"));
        let fill = children[0].children()[0].clone();
        assert!(fill.has_class(markup::PROGRESS_FILL));
        assert_eq!(fill.attr("style").as_deref(), Some("width: 0%"));
    }

    #[test]
    fn update_writes_width_and_aria_state() {
        let document = Document::new();
        let form = document.create_element("form");
        document.body().append_child(&form);
        let bar = ProgressBar::create(&document, &form);

        bar.update(75.0);
        let track = form.children()[0].clone();
        assert_eq!(track.attr("aria-valuenow").as_deref(), Some("75"));
        assert_eq!(
            track.children()[0].attr("style").as_deref(),
            Some("width: 75%")
        );
    }
}
