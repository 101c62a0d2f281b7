//! User-facing events the widget reacts to.

use skycast_api::Unit;

/// Everything the host can tell the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// The widget finished mounting. Triggers the saved-request list
    /// fetch and a silent location attempt.
    Loaded,
    /// The search box content changed. Carries the full new text.
    QueryChanged(String),
    /// Enter was pressed in the search box.
    QuerySubmitted,
    /// A dropdown entry was activated, by index into the current list.
    SuggestionPicked(usize),
    /// One of the unit buttons was clicked.
    UnitSelected(Unit),
    /// The "use my location" control was clicked.
    LocateRequested,
    /// The save form was submitted.
    SaveSubmitted(SaveForm),
    /// The edit dialog was submitted for a saved request.
    EditSubmitted { id: i64, form: EditForm },
    /// A saved request's delete control was activated. `confirmed` is
    /// false when the host's confirmation prompt was declined.
    DeleteRequested { id: i64, confirmed: bool },
    /// A saved request's view control was activated.
    ViewRequested { id: i64 },
}

/// Contents of the save form. The unit is taken from widget state, not
/// the form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SaveForm {
    /// Optional label; blank falls back to the current query.
    pub label: String,
    pub start_date: String,
    pub end_date: String,
}

/// Contents of the edit dialog, submitted as one unit so a record is
/// never half-updated.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub start_date: String,
    pub end_date: String,
    pub unit: Unit,
}
