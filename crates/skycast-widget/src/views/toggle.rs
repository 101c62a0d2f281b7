//! Fahrenheit/Celsius toggle. Exactly one button is active.

use maud::{html, Markup};
use skycast_api::Unit;

pub fn unit_toggle(active: Unit) -> Markup {
    let class_for = |unit: Unit| {
        if unit == active {
            "unit-btn active"
        } else {
            "unit-btn"
        }
    };
    html! {
        div class="unit-toggle" role="group" {
            button class=(class_for(Unit::Fahrenheit)) data-unit="fahrenheit" { "°F" }
            button class=(class_for(Unit::Celsius)) data-unit="celsius" { "°C" }
        }
    }
}
