//! Configuration management for freeport.
//!
//! Provides XDG-compliant storage of the default search settings.

mod settings;

pub use settings::{Paths, Settings};
