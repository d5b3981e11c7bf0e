//! Indonesia education progress dashboard.
//!
//! Loads a wide indicator-by-year table and a PISA score table, reshapes them
//! into long form, and filters them by year range and chosen indicators for
//! an egui report.
//!
//! ```text
//!  loader → reshape → filter → ui
//! ```
//!
//! Loading happens once (see [`state::DashboardData`]); every frame re-runs
//! the filter over that immutable data with the current
//! [`data::filter::Selection`].

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use app::DashboardApp;
pub use config::DashboardConfig;
pub use error::{DashboardError, ParseWarning, Result};
pub use state::{AppState, DashboardData};
