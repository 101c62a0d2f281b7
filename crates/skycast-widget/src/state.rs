//! Widget state.
//!
//! All fields live in one struct committed to only by the event loop,
//! so every render reads a consistent snapshot.

use skycast_api::{Coordinate, SavedRequest, Suggestion, Unit};

/// Everything the widget remembers between events.
#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    /// Active display unit, also sent with every weather request.
    pub unit: Unit,
    /// Raw search box contents, untrimmed.
    pub query: String,
    /// Coordinate of the currently shown weather, if any. Unit toggles
    /// re-fetch against this instead of re-geocoding.
    pub current: Option<Coordinate>,
    /// Last query an autocomplete request actually went out for.
    /// Debounce fires for an unchanged query are dropped against this.
    pub last_sent_query: Option<String>,
    /// Suggestions currently offered in the dropdown.
    pub suggestions: Vec<Suggestion>,
    /// Saved requests as last fetched from the backend.
    pub saved: Vec<SavedRequest>,
    /// Stamp for actions that target the results panel. A completion
    /// carrying an older stamp is discarded.
    pub results_generation: u64,
    /// Stamp for autocomplete runs, bumped on every edit and on
    /// selection so stale suggestion lists never reopen the dropdown.
    pub autocomplete_generation: u64,
}
