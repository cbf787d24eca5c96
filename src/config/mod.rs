//! Configuration module
//!
//! Handles the team layout and editing policies of a session.

pub mod settings;

pub use settings::{GearPolicy, Settings};
