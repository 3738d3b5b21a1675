//! Add-on workflow around the regify helper window.
//!
//! Covers the toolbar actions (send and read a regimail), selection
//! tracking in the message view, location of the regify application
//! server, and the pages shown inside the helper window.

pub mod adapters;
pub mod domain;
pub mod hint;
pub mod pages;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
