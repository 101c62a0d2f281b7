//! Autocomplete dropdown list.
//!
//! Selectable entries carry their index so the host can map a click
//! back to [`crate::events::WidgetEvent::SuggestionPicked`].
//! Informational entries from the backend render in place of results
//! but are never selectable.

use maud::{html, Markup};
use skycast_api::Suggestion;

pub fn suggestions(items: &[Suggestion]) -> Markup {
    html! {
        ul class="suggestions" role="listbox" {
            @for (index, item) in items.iter().enumerate() {
                @if item.is_selectable() {
                    li class="suggestion" role="option" data-index=(index) {
                        (item.label)
                    }
                } @else {
                    li class="suggestion suggestion-disabled" aria-disabled="true" {
                        (item.label)
                    }
                }
            }
        }
    }
}

/// Single non-selectable line, used for fetch failures.
pub fn notice(message: &str) -> Markup {
    html! {
        ul class="suggestions" role="listbox" {
            li class="suggestion suggestion-disabled" aria-disabled="true" {
                (message)
            }
        }
    }
}
