//! Configuration management for mypa.
//!
//! This module handles loading configuration from `~/.mypa/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, TaskDefaults};
