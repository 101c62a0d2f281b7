//! Event-driven weather lookup widget.
//!
//! The widget owns its state and a set of rendered panel regions.
//! Hosts feed it [`WidgetEvent`]s, await [`Widget::run_until_idle`],
//! and swap the panel markup into place. Debounced autocomplete,
//! geocoding, device location, weather rendering, and saved-request
//! CRUD all flow through one event loop; see [`controller`] for the
//! ordering rules.

pub mod controller;
mod debounce;
pub mod events;
pub mod format;
pub mod panels;
pub mod position;
pub mod state;
pub mod views;

pub use controller::{Widget, WidgetOptions};
pub use events::{EditForm, SaveForm, WidgetEvent};
pub use panels::Panels;
pub use position::{
    acquire, CachedSource, Position, PositionError, PositionPolicy, PositionSource,
    SystemPositionSource,
};
pub use state::WidgetState;
