//! Irrigation controller firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod irrigation;
pub mod protocol;
pub mod runtime;
pub mod scheduler;

// Peripheral-facing modules; the ESP-IDF implementations are guarded by
// cfg attributes inside, with simulation stubs on other targets.
pub mod adapters;
pub mod drivers;
pub mod pins;
