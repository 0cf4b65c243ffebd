//! Core domain logic for the terminal picker.
//!
//! This module holds the events the picker reacts to and the state it keeps
//! between them, independent of how the terminal draws it.

pub mod models;
pub mod services;
