//! Saved-request list with per-row view, edit, and delete controls.

use maud::{html, Markup};
use skycast_api::{Coordinate, SavedRequest};

use crate::format;

pub fn saved_list(records: &[SavedRequest]) -> Markup {
    html! {
        @if records.is_empty() {
            p class="saved-empty" { "No saved requests yet." }
        } @else {
            ul class="saved" {
                @for record in records {
                    li class="saved-row" data-id=(record.id) {
                        span class="label" { (display_label(record)) }
                        span class="dates" {
                            (format::fmt_date_range(&record.start_date, &record.end_date))
                        }
                        span class="unit" { (format::unit_labels(record.unit).temperature) }
                        span class="coords" {
                            (format::fmt_coordinate(Coordinate::new(record.latitude, record.longitude)))
                        }
                        button class="view" data-id=(record.id) { "View" }
                        button class="edit" data-id=(record.id) { "Edit" }
                        button class="delete" data-id=(record.id) { "Delete" }
                    }
                }
            }
        }
    }
}

fn display_label(record: &SavedRequest) -> &str {
    if record.label.is_empty() {
        "(unnamed)"
    } else {
        &record.label
    }
}
