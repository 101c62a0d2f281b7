//! Daily forecast strip. Rows keep the backend's order.

use maud::{html, Markup};
use skycast_api::{ForecastDay, Unit};

use crate::format;

/// Display-ready strings for one forecast day.
#[derive(Debug, Clone)]
pub struct ForecastRowVm {
    pub date: String,
    pub icon: String,
    pub description: String,
    pub high: String,
    pub low: String,
    pub probability: String,
    pub wind: String,
}

impl ForecastRowVm {
    pub fn new(day: &ForecastDay, unit: Unit) -> Self {
        Self {
            date: format::fmt_forecast_date(&day.date),
            icon: day.icon.clone(),
            description: day.description.clone(),
            high: format::fmt_temperature(day.t_max, unit),
            low: format::fmt_temperature(day.t_min, unit),
            probability: format::fmt_probability(day.precipitation_probability),
            wind: format::fmt_speed(day.wind_max, unit),
        }
    }
}

pub fn strip(rows: &[ForecastRowVm]) -> Markup {
    html! {
        div class="forecast" {
            @for row in rows {
                div class="forecast-day" {
                    p class="date" { (row.date) }
                    i class=(row.icon) aria-hidden="true" {}
                    p class="temps" {
                        span class="high" { (row.high) }
                        " / "
                        span class="low" { (row.low) }
                    }
                    p class="probability" { "Precip " (row.probability) }
                    p class="wind" { "Wind " (row.wind) }
                    p class="description" { (row.description) }
                }
            }
        }
    }
}
