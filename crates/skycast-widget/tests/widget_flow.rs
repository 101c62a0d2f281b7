//! End-to-end widget flows against a mock backend: debounced
//! autocomplete, search submit, suggestion picks, unit toggling, and
//! out-of-order response handling.

use std::sync::Arc;
use std::time::Duration;

use skycast_api::{BackendClient, Coordinate, StaticToken};
use skycast_widget::{SystemPositionSource, Widget, WidgetEvent, WidgetOptions};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_widget(server: &MockServer) -> Widget {
    let client = BackendClient::new(&server.uri(), Arc::new(StaticToken::new("test-token")))
        .expect("client should build");
    let options = WidgetOptions {
        debounce: Duration::from_millis(25),
        ..WidgetOptions::default()
    };
    Widget::new(client, Arc::new(SystemPositionSource), options)
}

fn paris_suggestions() -> serde_json::Value {
    serde_json::json!({
        "suggestions": [
            {"label": "Paris, France", "lat": 48.8566, "lon": 2.3522},
            {"label": "Paris, Texas", "lat": 33.6609, "lon": -95.5555}
        ]
    })
}

fn weather_body(temperature: f64, unit: &str) -> serde_json::Value {
    serde_json::json!({
        "location": {"lat": 48.8566, "lon": 2.3522},
        "unit": unit,
        "current": {
            "temperature": temperature,
            "apparent_temperature": temperature - 1.0,
            "humidity": 55,
            "wind_speed": 8.4,
            "wind_dir": 230,
            "cloud_cover": 20,
            "pressure": 1015.2,
            "icon": "wi wi-day-sunny",
            "code_text": "Mainly clear",
            "time": "2025-08-01T14:30"
        },
        "daily": [
            {"date": "2025-08-02", "t_max": 75.1, "t_min": 58.9, "pop": 35,
             "wind_max": 12.0, "icon": "wi wi-day-rain", "code_text": "Slight rain"}
        ]
    })
}

#[tokio::test]
async fn debounced_query_fetches_suggestions_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .and(query_param("q", "par"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_suggestions()))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("par".to_string()));
    widget.run_until_idle().await;

    assert_eq!(widget.state().suggestions.len(), 2);
    assert!(widget.panels().dropdown_visible);
    assert!(widget.panels().dropdown.contains("Paris, France"));
    assert!(widget.panels().dropdown.contains("Paris, Texas"));
}

#[tokio::test]
async fn short_query_never_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_suggestions()))
        .expect(0)
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("ab".to_string()));
    widget.run_until_idle().await;

    assert!(!widget.panels().dropdown_visible);
    assert!(widget.state().suggestions.is_empty());
}

#[tokio::test]
async fn newer_keystroke_cancels_pending_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .and(query_param("q", "par"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_suggestions()))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .and(query_param("q", "pari"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_suggestions()))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("par".to_string()));
    widget.handle_event(WidgetEvent::QueryChanged("pari".to_string()));
    widget.run_until_idle().await;

    assert!(widget.panels().dropdown_visible);
}

#[tokio::test]
async fn repeat_query_is_not_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .and(query_param("q", "par"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_suggestions()))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("par".to_string()));
    widget.run_until_idle().await;
    widget.handle_event(WidgetEvent::QueryChanged("pa".to_string()));
    widget.run_until_idle().await;
    widget.handle_event(WidgetEvent::QueryChanged("par".to_string()));
    widget.run_until_idle().await;
}

#[tokio::test]
async fn empty_suggestion_list_closes_dropdown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"suggestions": []})),
        )
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("xyzzy".to_string()));
    widget.run_until_idle().await;

    assert!(!widget.panels().dropdown_visible);
    assert!(widget.state().suggestions.is_empty());
}

#[tokio::test]
async fn body_error_shows_server_wording_in_dropdown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "Autocomplete quota exceeded"
        })))
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("par".to_string()));
    widget.run_until_idle().await;

    assert!(widget.panels().dropdown_visible);
    assert!(widget
        .panels()
        .dropdown
        .contains("Autocomplete quota exceeded"));
}

#[tokio::test]
async fn autocomplete_failure_shows_generic_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("par".to_string()));
    widget.run_until_idle().await;

    assert!(widget.panels().dropdown_visible);
    assert!(widget
        .panels()
        .dropdown
        .contains("Could not load suggestions."));
}

#[tokio::test]
async fn rate_limit_item_renders_but_cannot_be_picked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "suggestions": [
                {"label": "Rate-limited: pause typing for a second…",
                 "lat": null, "lon": null, "disabled": true}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(71.3, "fahrenheit")))
        .expect(0)
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("par".to_string()));
    widget.run_until_idle().await;

    assert!(widget.panels().dropdown.contains("Rate-limited"));
    assert!(widget.panels().dropdown.contains("suggestion-disabled"));

    widget.handle_event(WidgetEvent::SuggestionPicked(0));
    widget.run_until_idle().await;

    assert!(widget.state().current.is_none());
}

#[tokio::test]
async fn picking_a_suggestion_fetches_weather_there() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_suggestions()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("lat", "48.8566"))
        .and(query_param("lon", "2.3522"))
        .and(query_param("unit", "fahrenheit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(71.3, "fahrenheit")))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("par".to_string()));
    widget.run_until_idle().await;
    widget.handle_event(WidgetEvent::SuggestionPicked(0));
    widget.run_until_idle().await;

    assert_eq!(widget.state().query, "Paris, France");
    assert!(!widget.panels().dropdown_visible);
    assert_eq!(
        widget.state().current,
        Some(Coordinate::new(48.8566, 2.3522))
    );
    assert!(widget.panels().conditions.contains("71°F"));
    assert!(widget.panels().conditions.contains("Mainly clear"));
    assert!(widget.panels().forecast.contains("Sat, Aug 2"));
}

#[tokio::test]
async fn submit_geocodes_then_fetches_weather() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"suggestions": []})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/geocode"))
        .and(query_param("q", "paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "label": "paris", "lat": 48.8566, "lon": 2.3522
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("lat", "48.8566"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(71.3, "fahrenheit")))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("paris".to_string()));
    widget.handle_event(WidgetEvent::QuerySubmitted);
    widget.run_until_idle().await;

    assert!(widget.panels().conditions.contains("71°F"));
    assert!(widget.panels().conditions.contains("48.8566, 2.3522"));
    assert!(widget.panels().conditions.contains("8 mph SW"));
    assert_eq!(
        widget.state().current,
        Some(Coordinate::new(48.8566, 2.3522))
    );
}

#[tokio::test]
async fn submit_with_empty_query_does_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/geocode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("   ".to_string()));
    widget.handle_event(WidgetEvent::QuerySubmitted);
    widget.run_until_idle().await;

    assert!(widget.panels().conditions.is_empty());
}

#[tokio::test]
async fn geocode_failure_renders_in_results_panel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"suggestions": []})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/geocode"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "No location matches that query"
        })))
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("nowhere at all".to_string()));
    widget.handle_event(WidgetEvent::QuerySubmitted);
    widget.run_until_idle().await;

    assert!(widget
        .panels()
        .conditions
        .contains("No location matches that query"));
    assert!(widget.panels().forecast.is_empty());
}

#[tokio::test]
async fn unit_toggle_refetches_at_current_coordinate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"suggestions": []})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/geocode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "label": "paris", "lat": 48.8566, "lon": 2.3522
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("lat", "48.8566"))
        .and(query_param("unit", "fahrenheit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(71.3, "fahrenheit")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("lat", "48.8566"))
        .and(query_param("unit", "celsius"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(21.8, "celsius")))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("paris".to_string()));
    widget.handle_event(WidgetEvent::QuerySubmitted);
    widget.run_until_idle().await;
    assert!(widget.panels().conditions.contains("71°F"));

    widget.handle_event(WidgetEvent::UnitSelected(skycast_api::Unit::Celsius));
    widget.run_until_idle().await;

    assert!(widget.panels().conditions.contains("22°C"));
    assert!(widget
        .panels()
        .toggle
        .contains("class=\"unit-btn active\" data-unit=\"celsius\""));
    assert_eq!(
        widget.state().current,
        Some(Coordinate::new(48.8566, 2.3522))
    );
}

#[tokio::test]
async fn unit_toggle_without_location_only_restyles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(71.3, "fahrenheit")))
        .expect(0)
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::UnitSelected(skycast_api::Unit::Celsius));
    widget.run_until_idle().await;

    assert!(widget
        .panels()
        .toggle
        .contains("class=\"unit-btn active\" data-unit=\"celsius\""));
    assert!(widget.panels().conditions.is_empty());
}

#[tokio::test]
async fn slow_response_for_old_action_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .and(query_param("q", "par"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "suggestions": [
                {"label": "Slowville", "lat": 10.0, "lon": 10.0},
                {"label": "Fasttown", "lat": 20.0, "lon": 20.0}
            ]
        })))
        .mount(&server)
        .await;
    // The pick's weather call answers slowly with one reading.
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("lat", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(weather_body(50.0, "fahrenheit"))
                .set_delay(Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/geocode"))
        .and(query_param("q", "fasttown"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "label": "fasttown", "lat": 20.0, "lon": 20.0
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("lat", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(90.0, "fahrenheit")))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("par".to_string()));
    widget.run_until_idle().await;

    // Pick starts a slow fetch; the submit right after supersedes it.
    widget.handle_event(WidgetEvent::SuggestionPicked(0));
    widget.handle_event(WidgetEvent::QueryChanged("fasttown".to_string()));
    widget.handle_event(WidgetEvent::QuerySubmitted);
    widget.run_until_idle().await;

    assert!(widget.panels().conditions.contains("90°F"));
    assert!(!widget.panels().conditions.contains("50°F"));
    assert_eq!(widget.state().current, Some(Coordinate::new(20.0, 20.0)));
}

#[tokio::test]
async fn weather_description_is_escaped() {
    let server = MockServer::start().await;
    let mut body = weather_body(71.3, "fahrenheit");
    body["current"]["code_text"] = serde_json::json!("<script>alert(1)</script>");
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"suggestions": []})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/geocode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "label": "paris", "lat": 48.8566, "lon": 2.3522
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("paris".to_string()));
    widget.handle_event(WidgetEvent::QuerySubmitted);
    widget.run_until_idle().await;

    assert!(widget.panels().conditions.contains("&lt;script&gt;"));
    assert!(!widget.panels().conditions.contains("<script>"));
}

#[tokio::test]
async fn body_error_on_weather_renders_in_results_panel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/autocomplete"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"suggestions": []})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/geocode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "label": "paris", "lat": 48.8566, "lon": 2.3522
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "Open-Meteo is unavailable right now"
        })))
        .mount(&server)
        .await;

    let mut widget = test_widget(&server);
    widget.handle_event(WidgetEvent::QueryChanged("paris".to_string()));
    widget.handle_event(WidgetEvent::QuerySubmitted);
    widget.run_until_idle().await;

    assert!(widget
        .panels()
        .conditions
        .contains("Open-Meteo is unavailable right now"));
    assert!(widget.state().current.is_none());
}
