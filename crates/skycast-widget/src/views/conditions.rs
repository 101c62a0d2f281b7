//! Current-conditions card.

use maud::{html, Markup};
use skycast_api::{Coordinate, CurrentWeather, Unit};

use crate::format;

/// Display-ready strings for the conditions card.
#[derive(Debug, Clone)]
pub struct ConditionsVm {
    pub place: String,
    pub icon: String,
    pub description: String,
    pub temperature: String,
    pub apparent: String,
    pub humidity: String,
    pub wind: String,
    pub precipitation: String,
    pub cloud_cover: String,
    pub pressure: String,
    pub observed: String,
}

impl ConditionsVm {
    pub fn new(current: &CurrentWeather, unit: Unit, coordinate: Coordinate) -> Self {
        let speed = format::fmt_speed(current.wind_speed, unit);
        let wind = match format::compass_point(current.wind_direction) {
            "" => speed,
            direction => format!("{speed} {direction}"),
        };
        Self {
            place: format::fmt_coordinate(coordinate),
            icon: current.icon.clone(),
            description: current.description.clone(),
            temperature: format::fmt_temperature(current.temperature, unit),
            apparent: format::fmt_temperature(current.apparent_temperature, unit),
            humidity: format::fmt_percent(current.humidity),
            wind,
            precipitation: format::fmt_precipitation(current.precipitation, unit),
            cloud_cover: format::fmt_percent(current.cloud_cover),
            pressure: format::fmt_pressure(current.pressure),
            observed: current
                .timestamp
                .as_deref()
                .map(format::fmt_timestamp)
                .unwrap_or_default(),
        }
    }
}

pub fn current(vm: &ConditionsVm) -> Markup {
    html! {
        div class="conditions" {
            div class="conditions-head" {
                i class=(vm.icon) aria-hidden="true" {}
                div {
                    p class="temperature" { (vm.temperature) }
                    p class="description" { (vm.description) }
                }
            }
            p class="place" { (vm.place) }
            @if !vm.observed.is_empty() {
                p class="observed" { "As of " (vm.observed) }
            }
            ul class="details" {
                li { "Feels like " (vm.apparent) }
                li { "Humidity " (vm.humidity) }
                li { "Wind " (vm.wind) }
                li { "Precipitation " (vm.precipitation) }
                li { "Cloud cover " (vm.cloud_cover) }
                li { "Pressure " (vm.pressure) }
            }
        }
    }
}

pub fn loading() -> Markup {
    html! {
        div class="conditions conditions-loading" {
            p { "Loading weather..." }
        }
    }
}

pub fn error(message: &str) -> Markup {
    html! {
        div class="conditions conditions-error" {
            p { (message) }
        }
    }
}
