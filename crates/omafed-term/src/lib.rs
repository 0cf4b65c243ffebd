//! Terminal picker for omafed.
//!
//! This crate draws the welcome screen and the multi-select script list, maps
//! terminal input onto selector events and owns the layered configuration
//! (built-in defaults, config file, command-line flags) shared with the CLI.

pub mod application;
pub mod configuration;
pub mod domain;
pub use application::ui::{destruct_terminal_for_panic, run, start_loop};
pub use configuration::{Config, ConfigKey};
pub use domain::models::{ConvertScope, Event, Screen, SessionOutcome};
pub use domain::services::{AppState, AppStateProps, RESERVED_ROWS};
