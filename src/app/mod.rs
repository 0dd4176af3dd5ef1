//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the irrigation controller:
//! command handling, the per-tick watering pass and phase tracking.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
