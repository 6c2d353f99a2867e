// src/config/mod.rs
// Configuration: environment-based settings

pub mod env;

pub use env::{ConfigValidation, Settings, Transport};
