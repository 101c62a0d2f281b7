//! The widget event loop.
//!
//! [`Widget::handle_event`] is synchronous and never blocks: network
//! and timer work runs in spawned tasks that report back over an
//! internal channel, and [`Widget::run_until_idle`] drains those
//! completions back into state and panels. Only the loop writes state,
//! so partial results never show.
//!
//! Actions that target the results panel claim a generation stamp;
//! a completion carrying an old stamp is discarded instead of
//! rendered, so a slow response can never clobber a newer one.
//! Chained legs (geocode then weather, locate then weather) run under
//! the stamp claimed by the action that started them.

use std::sync::Arc;
use std::time::Duration;

use skycast_api::{
    ApiError, BackendClient, Coordinate, CreateRequest, Created, Geocoded, SavedRequest,
    Suggestion, Unit, UpdateRequest, WeatherReport,
};
use skycast_core::{Config, DateRange, ValidationError};
use tokio::sync::mpsc;

use crate::debounce::Debouncer;
use crate::events::{EditForm, SaveForm, WidgetEvent};
use crate::panels::Panels;
use crate::position::{self, Position, PositionError, PositionPolicy, PositionSource};
use crate::state::WidgetState;

/// Tunables fixed at construction.
#[derive(Debug, Clone)]
pub struct WidgetOptions {
    /// Quiet period after a keystroke before autocomplete fires.
    pub debounce: Duration,
    /// Queries shorter than this never hit the network.
    pub min_query_len: usize,
    pub position_policy: PositionPolicy,
    pub default_unit: Unit,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(750),
            min_query_len: 3,
            position_policy: PositionPolicy::default(),
            default_unit: Unit::Fahrenheit,
        }
    }
}

impl WidgetOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            debounce: Duration::from_millis(config.autocomplete.debounce_ms),
            min_query_len: config.autocomplete.min_query_len,
            position_policy: PositionPolicy {
                timeout: Duration::from_secs(config.geolocation.timeout_secs),
                maximum_age: Duration::from_secs(config.geolocation.maximum_age_secs),
                high_accuracy: config.geolocation.high_accuracy,
            },
            default_unit: config.display.default_unit,
        }
    }
}

/// Completions sent from spawned tasks back to the loop. Every spawned
/// task sends exactly one of these, which is what keeps the in-flight
/// count honest.
#[derive(Debug)]
pub(crate) enum Msg {
    DebounceFired {
        generation: u64,
        query: String,
    },
    DebounceCancelled,
    SuggestionsReady {
        generation: u64,
        result: Result<Vec<Suggestion>, ApiError>,
    },
    GeocodeReady {
        generation: u64,
        result: Result<Geocoded, ApiError>,
    },
    PositionReady {
        generation: u64,
        silent: bool,
        result: Result<Position, PositionError>,
    },
    WeatherReady {
        generation: u64,
        coordinate: Coordinate,
        result: Result<WeatherReport, ApiError>,
    },
    RecordReady {
        generation: u64,
        result: Result<SavedRequest, ApiError>,
    },
    SavedListReady {
        result: Result<Vec<SavedRequest>, ApiError>,
    },
    CreateDone {
        result: Result<Created, ApiError>,
    },
    UpdateDone {
        id: i64,
        result: Result<(), ApiError>,
    },
    DeleteDone {
        id: i64,
        result: Result<(), ApiError>,
    },
}

pub struct Widget {
    state: WidgetState,
    panels: Panels,
    client: BackendClient,
    position: Arc<dyn PositionSource>,
    options: WidgetOptions,
    debouncer: Debouncer,
    tx: mpsc::UnboundedSender<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
    inflight: usize,
}

impl Widget {
    /// Build a widget. Must run inside a tokio runtime; event handling
    /// spawns onto it.
    pub fn new(
        client: BackendClient,
        position: Arc<dyn PositionSource>,
        options: WidgetOptions,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = WidgetState {
            unit: options.default_unit,
            ..WidgetState::default()
        };
        let mut panels = Panels::default();
        panels.render_toggle(state.unit);
        panels.render_saved(&state.saved);

        Self {
            state,
            panels,
            client,
            position,
            options,
            debouncer: Debouncer::default(),
            tx,
            rx,
            inflight: 0,
        }
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// React to a host event. Returns once local state and panels are
    /// consistent; any network work continues in the background.
    pub fn handle_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::Loaded => self.on_loaded(),
            WidgetEvent::QueryChanged(text) => self.on_query_changed(text),
            WidgetEvent::QuerySubmitted => self.on_query_submitted(),
            WidgetEvent::SuggestionPicked(index) => self.on_suggestion_picked(index),
            WidgetEvent::UnitSelected(unit) => self.on_unit_selected(unit),
            WidgetEvent::LocateRequested => self.request_position(false),
            WidgetEvent::SaveSubmitted(form) => self.on_save_submitted(form),
            WidgetEvent::EditSubmitted { id, form } => self.on_edit_submitted(id, form),
            WidgetEvent::DeleteRequested { id, confirmed } => {
                self.on_delete_requested(id, confirmed);
            }
            WidgetEvent::ViewRequested { id } => self.on_view_requested(id),
        }
    }

    /// Drain background work until nothing is in flight. Debounce
    /// timers count as in-flight work, so this waits out the quiet
    /// period too.
    pub async fn run_until_idle(&mut self) {
        while self.inflight > 0 {
            match self.rx.recv().await {
                Some(msg) => {
                    self.inflight -= 1;
                    self.apply(msg);
                }
                None => break,
            }
        }
    }

    fn on_loaded(&mut self) {
        self.refresh_saved_list();
        self.request_position(true);
    }

    fn on_query_changed(&mut self, text: String) {
        self.state.query = text;
        self.state.autocomplete_generation += 1;

        let trimmed = self.state.query.trim();
        if trimmed.chars().count() < self.options.min_query_len {
            self.debouncer.cancel();
            self.state.suggestions.clear();
            self.panels.hide_dropdown();
            return;
        }

        self.debouncer.schedule(
            self.tx.clone(),
            self.state.autocomplete_generation,
            trimmed.to_string(),
            self.options.debounce,
        );
        self.inflight += 1;
    }

    fn on_query_submitted(&mut self) {
        let query = self.state.query.trim().to_string();
        if query.is_empty() {
            return;
        }

        self.state.results_generation += 1;
        let generation = self.state.results_generation;
        self.panels.show_results_loading();

        let client = self.client.clone();
        let tx = self.tx.clone();
        self.inflight += 1;
        tokio::spawn(async move {
            let result = client.geocode(&query).await;
            let _ = tx.send(Msg::GeocodeReady { generation, result });
        });
    }

    fn on_suggestion_picked(&mut self, index: usize) {
        let Some(suggestion) = self.state.suggestions.get(index) else {
            tracing::debug!(index, "pick ignored, no such suggestion");
            return;
        };
        if !suggestion.is_selectable() {
            return;
        }
        let Some(coordinate) = suggestion.coordinate() else {
            return;
        };
        let label = suggestion.label.clone();

        self.state.query = label;
        self.state.autocomplete_generation += 1;
        self.debouncer.cancel();
        self.state.suggestions.clear();
        self.panels.hide_dropdown();

        self.start_weather_fetch(coordinate);
    }

    fn on_unit_selected(&mut self, unit: Unit) {
        self.state.unit = unit;
        self.panels.render_toggle(unit);
        // Conversion is server-side; re-fetch even when the unit is
        // unchanged.
        if let Some(coordinate) = self.state.current {
            self.start_weather_fetch(coordinate);
        }
    }

    fn request_position(&mut self, silent: bool) {
        if !self.position.is_supported() {
            if silent {
                tracing::debug!("geolocation unsupported, skipping silent attempt");
            } else {
                self.panels
                    .show_status(PositionError::Unsupported.user_message());
            }
            return;
        }

        self.state.results_generation += 1;
        let generation = self.state.results_generation;
        if !silent {
            self.panels.show_status("Finding your location...");
        }

        let source = Arc::clone(&self.position);
        let policy = self.options.position_policy;
        let tx = self.tx.clone();
        self.inflight += 1;
        tokio::spawn(async move {
            let result = position::acquire(source.as_ref(), policy).await;
            let _ = tx.send(Msg::PositionReady {
                generation,
                silent,
                result,
            });
        });
    }

    fn on_save_submitted(&mut self, form: SaveForm) {
        let range = match DateRange::parse(&form.start_date, &form.end_date) {
            Ok(range) => range,
            Err(err) => {
                self.panels.show_status(err.user_message());
                return;
            }
        };

        let query = self.state.query.trim().to_string();
        let (lat, lon, query_field) = match self.state.current {
            Some(coordinate) => (
                Some(coordinate.latitude),
                Some(coordinate.longitude),
                None,
            ),
            None if query.is_empty() => {
                self.panels
                    .show_status(ValidationError::EmptyQuery.user_message());
                return;
            }
            None => (None, None, Some(query.clone())),
        };

        let label = {
            let trimmed = form.label.trim();
            if !trimmed.is_empty() {
                Some(trimmed.to_string())
            } else if !query.is_empty() {
                Some(query)
            } else {
                None
            }
        };

        let req = CreateRequest {
            lat,
            lon,
            query: query_field,
            label,
            start_date: range.start.to_string(),
            end_date: range.end.to_string(),
            unit: self.state.unit,
        };

        self.panels.show_status("Saving...");
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.inflight += 1;
        tokio::spawn(async move {
            let result = client.create_request(&req).await;
            let _ = tx.send(Msg::CreateDone { result });
        });
    }

    fn on_edit_submitted(&mut self, id: i64, form: EditForm) {
        let range = match DateRange::parse(&form.start_date, &form.end_date) {
            Ok(range) => range,
            Err(err) => {
                self.panels.show_status(err.user_message());
                return;
            }
        };
        let Some(record) = self.state.saved.iter().find(|r| r.id == id) else {
            self.panels
                .show_status("That saved request is gone. Refresh and try again.");
            return;
        };

        let start_date = range.start.to_string();
        let end_date = range.end.to_string();
        let req = UpdateRequest {
            start_date: (start_date != record.start_date).then_some(start_date),
            end_date: (end_date != record.end_date).then_some(end_date),
            unit: (form.unit != record.unit).then_some(form.unit),
        };
        if req.is_empty() {
            tracing::debug!(id, "edit made no changes");
            return;
        }

        self.panels.show_status("Updating...");
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.inflight += 1;
        tokio::spawn(async move {
            let result = client.update_request(id, &req).await;
            let _ = tx.send(Msg::UpdateDone { id, result });
        });
    }

    fn on_delete_requested(&mut self, id: i64, confirmed: bool) {
        if !confirmed {
            tracing::debug!(id, "delete declined");
            return;
        }

        let client = self.client.clone();
        let tx = self.tx.clone();
        self.inflight += 1;
        tokio::spawn(async move {
            let result = client.delete_request(id).await;
            let _ = tx.send(Msg::DeleteDone { id, result });
        });
    }

    fn on_view_requested(&mut self, id: i64) {
        self.state.results_generation += 1;
        let generation = self.state.results_generation;
        self.panels.show_results_loading();

        let client = self.client.clone();
        let tx = self.tx.clone();
        self.inflight += 1;
        tokio::spawn(async move {
            let result = client.get_request(id).await;
            let _ = tx.send(Msg::RecordReady { generation, result });
        });
    }

    /// Claim a fresh results stamp and fetch weather at `coordinate`.
    fn start_weather_fetch(&mut self, coordinate: Coordinate) {
        self.state.results_generation += 1;
        self.spawn_weather(self.state.results_generation, coordinate);
    }

    /// Fetch weather under an already-claimed stamp.
    fn spawn_weather(&mut self, generation: u64, coordinate: Coordinate) {
        self.panels.show_results_loading();

        let client = self.client.clone();
        let unit = self.state.unit;
        let tx = self.tx.clone();
        self.inflight += 1;
        tokio::spawn(async move {
            let result = client.weather(coordinate, unit).await;
            let _ = tx.send(Msg::WeatherReady {
                generation,
                coordinate,
                result,
            });
        });
    }

    fn spawn_autocomplete(&mut self, generation: u64, query: String) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.inflight += 1;
        tokio::spawn(async move {
            let result = client.autocomplete(&query).await;
            let _ = tx.send(Msg::SuggestionsReady { generation, result });
        });
    }

    fn refresh_saved_list(&mut self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.inflight += 1;
        tokio::spawn(async move {
            let result = client.list_requests().await;
            let _ = tx.send(Msg::SavedListReady { result });
        });
    }

    /// Commit one completion. Stale-stamp completions are dropped here,
    /// before anything touches the panels.
    fn apply(&mut self, msg: Msg) {
        match msg {
            Msg::DebounceCancelled => {}
            Msg::DebounceFired { generation, query } => {
                if generation != self.state.autocomplete_generation {
                    return;
                }
                if self.state.last_sent_query.as_deref() == Some(query.as_str()) {
                    tracing::debug!(%query, "autocomplete suppressed for repeat query");
                    return;
                }
                self.state.last_sent_query = Some(query.clone());
                self.spawn_autocomplete(generation, query);
            }
            Msg::SuggestionsReady { generation, result } => {
                if generation != self.state.autocomplete_generation {
                    tracing::debug!("discarding stale suggestions");
                    return;
                }
                match result {
                    Ok(items) if items.is_empty() => {
                        self.state.suggestions.clear();
                        self.panels.hide_dropdown();
                    }
                    Ok(items) => {
                        self.state.suggestions = items;
                        self.panels.show_suggestions(&self.state.suggestions);
                    }
                    Err(ApiError::Signaled(message)) => {
                        self.state.suggestions.clear();
                        self.panels.show_dropdown_notice(&message);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "autocomplete failed");
                        self.state.suggestions.clear();
                        self.panels
                            .show_dropdown_notice("Could not load suggestions. Try again.");
                    }
                }
            }
            Msg::GeocodeReady { generation, result } => {
                if generation != self.state.results_generation {
                    tracing::debug!("discarding stale geocode result");
                    return;
                }
                match result {
                    Ok(geocoded) => {
                        tracing::debug!(label = ?geocoded.label, "query geocoded");
                        self.spawn_weather(generation, geocoded.coordinate);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "geocode failed");
                        self.panels.show_results_error(&err.user_message());
                    }
                }
            }
            Msg::PositionReady {
                generation,
                silent,
                result,
            } => {
                if generation != self.state.results_generation {
                    if !silent {
                        self.panels.clear_status();
                    }
                    tracing::debug!("discarding stale position");
                    return;
                }
                match result {
                    Ok(fix) => {
                        self.panels.clear_status();
                        self.spawn_weather(generation, fix.coordinate);
                    }
                    Err(err) if silent => {
                        tracing::debug!(error = %err, "silent position attempt failed");
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "position attempt failed");
                        self.panels.show_status(err.user_message());
                    }
                }
            }
            Msg::WeatherReady {
                generation,
                coordinate,
                result,
            } => {
                if generation != self.state.results_generation {
                    tracing::debug!("discarding stale weather report");
                    return;
                }
                match result {
                    Ok(report) => {
                        self.state.current = Some(coordinate);
                        let unit = report.unit.unwrap_or(self.state.unit);
                        self.panels.render_weather(&report, unit, coordinate);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "weather fetch failed");
                        self.panels.show_results_error(&err.user_message());
                    }
                }
            }
            Msg::RecordReady { generation, result } => {
                if generation != self.state.results_generation {
                    tracing::debug!("discarding stale record fetch");
                    return;
                }
                match result {
                    Ok(record) => {
                        self.state.unit = record.unit;
                        self.panels.render_toggle(record.unit);
                        let coordinate = Coordinate::new(record.latitude, record.longitude);
                        self.spawn_weather(generation, coordinate);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "saved request fetch failed");
                        self.panels.show_results_error(&err.user_message());
                    }
                }
            }
            Msg::SavedListReady { result } => match result {
                Ok(records) => {
                    self.state.saved = records;
                    self.panels.render_saved(&self.state.saved);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "saved list fetch failed");
                    self.panels.show_status(&err.user_message());
                }
            },
            Msg::CreateDone { result } => match result {
                Ok(created) => {
                    tracing::debug!(id = created.id, "request saved");
                    self.panels.show_status("Saved.");
                    self.refresh_saved_list();
                }
                Err(err) => {
                    tracing::warn!(error = %err, "save failed");
                    self.panels.show_status(&err.user_message());
                }
            },
            Msg::UpdateDone { id, result } => match result {
                Ok(()) => {
                    tracing::debug!(id, "request updated");
                    self.panels.show_status("Updated.");
                    self.refresh_saved_list();
                }
                Err(err) => {
                    tracing::warn!(id, error = %err, "update failed");
                    self.panels.show_status(&err.user_message());
                }
            },
            Msg::DeleteDone { id, result } => match result {
                Ok(()) => {
                    tracing::debug!(id, "request deleted");
                    self.panels.show_status("Deleted.");
                    self.refresh_saved_list();
                }
                Err(err) => {
                    tracing::warn!(id, error = %err, "delete failed");
                    self.panels.show_status(&err.user_message());
                }
            },
        }
    }
}
