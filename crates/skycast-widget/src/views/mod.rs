//! Maud renderers for the widget's panel regions.
//!
//! Every user- or server-provided string passes through maud's
//! escaping; no panel markup is assembled by string pasting.

pub mod conditions;
pub mod dropdown;
pub mod forecast;
pub mod saved;
pub mod toggle;

use maud::{html, Markup};

/// One-line status message shown under the forms.
pub fn status_line(message: &str) -> Markup {
    html! {
        p class="status" role="status" { (message) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_escapes_markup() {
        let markup = status_line("<b>oops</b>").into_string();
        assert!(markup.contains("&lt;b&gt;oops&lt;/b&gt;"));
        assert!(!markup.contains("<b>"));
    }
}
