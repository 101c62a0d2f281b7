//! Rendered output regions.
//!
//! Each field holds the current markup for one region of the widget;
//! the host swaps a region's contents whenever the string changes.
//! Only the event loop writes here, always through the view renderers.

use skycast_api::{Coordinate, SavedRequest, Suggestion, Unit, WeatherReport};

use crate::views;
use crate::views::conditions::ConditionsVm;
use crate::views::forecast::ForecastRowVm;
use crate::views::{conditions, dropdown, forecast, saved, toggle};

#[derive(Debug, Clone, Default)]
pub struct Panels {
    /// Current-conditions card, also hosts loading and error states.
    pub conditions: String,
    /// Daily forecast strip.
    pub forecast: String,
    /// Autocomplete dropdown contents.
    pub dropdown: String,
    /// Whether the dropdown should be open.
    pub dropdown_visible: bool,
    /// Saved-request list.
    pub saved: String,
    /// Unit toggle buttons.
    pub toggle: String,
    /// One-line status under the forms.
    pub status: String,
}

impl Panels {
    pub(crate) fn show_results_loading(&mut self) {
        self.conditions = conditions::loading().into_string();
        self.forecast.clear();
    }

    pub(crate) fn show_results_error(&mut self, message: &str) {
        self.conditions = conditions::error(message).into_string();
        self.forecast.clear();
    }

    pub(crate) fn render_weather(&mut self, report: &WeatherReport, unit: Unit, at: Coordinate) {
        let vm = ConditionsVm::new(&report.current, unit, at);
        self.conditions = conditions::current(&vm).into_string();

        let rows: Vec<ForecastRowVm> = report
            .daily
            .iter()
            .map(|day| ForecastRowVm::new(day, unit))
            .collect();
        self.forecast = forecast::strip(&rows).into_string();
    }

    pub(crate) fn show_suggestions(&mut self, items: &[Suggestion]) {
        self.dropdown = dropdown::suggestions(items).into_string();
        self.dropdown_visible = true;
    }

    pub(crate) fn show_dropdown_notice(&mut self, message: &str) {
        self.dropdown = dropdown::notice(message).into_string();
        self.dropdown_visible = true;
    }

    pub(crate) fn hide_dropdown(&mut self) {
        self.dropdown.clear();
        self.dropdown_visible = false;
    }

    pub(crate) fn render_saved(&mut self, records: &[SavedRequest]) {
        self.saved = saved::saved_list(records).into_string();
    }

    pub(crate) fn render_toggle(&mut self, unit: Unit) {
        self.toggle = toggle::unit_toggle(unit).into_string();
    }

    pub(crate) fn show_status(&mut self, message: &str) {
        self.status = views::status_line(message).into_string();
    }

    pub(crate) fn clear_status(&mut self) {
        self.status.clear();
    }
}
