//! Step definitions for the regimail send flow scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
